//! AWS Lightsail implementation of [`InstanceProvider`].
//!
//! # Responsibilities
//! - Build an SDK client from static credentials and a region
//! - Translate GetInstance / StartInstance / StopInstance calls
//! - Render SDK errors with full context for the operational log

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_lightsail::config::Credentials;
use aws_sdk_lightsail::error::DisplayErrorContext;
use aws_sdk_lightsail::types::Instance;
use aws_sdk_lightsail::Client;

use crate::config::ProviderConfig;
use crate::provider::types::{InstanceSnapshot, ProviderError, ProviderResult};
use crate::provider::InstanceProvider;

const CREDENTIALS_SOURCE: &str = "instance-control-config";

/// Lightsail client wrapper.
#[derive(Clone)]
pub struct LightsailProvider {
    client: Client,
}

impl LightsailProvider {
    /// Create a provider from configuration. No network call is made here.
    pub async fn new(config: &ProviderConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            CREDENTIALS_SOURCE,
        );

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);
        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint.clone());
        }
        let sdk_config = loader.load().await;

        tracing::info!(
            region = %config.region,
            endpoint_override = config.endpoint_url.is_some(),
            "Lightsail client initialized"
        );

        Self::from_client(Client::new(&sdk_config))
    }

    /// Wrap an already-configured SDK client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InstanceProvider for LightsailProvider {
    fn name(&self) -> &str {
        "lightsail"
    }

    async fn get_instance(&self, instance_name: &str) -> ProviderResult<InstanceSnapshot> {
        let output = self
            .client
            .get_instance()
            .instance_name(instance_name)
            .send()
            .await
            .map_err(|e| ProviderError::Api(DisplayErrorContext(&e).to_string()))?;

        snapshot_from(instance_name, output.instance())
    }

    async fn start_instance(&self, instance_name: &str) -> ProviderResult<()> {
        self.client
            .start_instance()
            .instance_name(instance_name)
            .send()
            .await
            .map_err(|e| ProviderError::Api(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }

    async fn stop_instance(&self, instance_name: &str) -> ProviderResult<()> {
        self.client
            .stop_instance()
            .instance_name(instance_name)
            .send()
            .await
            .map_err(|e| ProviderError::Api(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}

/// Project the SDK's instance record onto [`InstanceSnapshot`].
fn snapshot_from(requested: &str, instance: Option<&Instance>) -> ProviderResult<InstanceSnapshot> {
    let instance = instance.ok_or_else(|| {
        ProviderError::MalformedResponse(format!("no instance returned for '{}'", requested))
    })?;

    let state = instance
        .state()
        .and_then(|s| s.name())
        .ok_or_else(|| {
            ProviderError::MalformedResponse(format!("instance '{}' has no state name", requested))
        })?;

    Ok(InstanceSnapshot {
        name: instance.name().unwrap_or(requested).to_string(),
        state: state.to_string(),
        public_ip: instance.public_ip_address().map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_lightsail::types::InstanceState;

    #[test]
    fn running_instance_projects_all_fields() {
        let instance = Instance::builder()
            .name("web-1")
            .public_ip_address("1.2.3.4")
            .state(InstanceState::builder().name("running").code(16).build())
            .build();

        let snapshot = snapshot_from("web-1", Some(&instance)).unwrap();
        assert_eq!(
            snapshot,
            InstanceSnapshot {
                name: "web-1".into(),
                state: "running".into(),
                public_ip: Some("1.2.3.4".into()),
            }
        );
    }

    #[test]
    fn stopped_instance_has_no_address() {
        let instance = Instance::builder()
            .state(InstanceState::builder().name("stopped").build())
            .build();

        let snapshot = snapshot_from("web-1", Some(&instance)).unwrap();
        assert_eq!(snapshot.name, "web-1");
        assert_eq!(snapshot.state, "stopped");
        assert_eq!(snapshot.public_ip, None);
    }

    #[test]
    fn missing_instance_or_state_is_malformed() {
        assert!(matches!(
            snapshot_from("web-1", None),
            Err(ProviderError::MalformedResponse(_))
        ));

        let stateless = Instance::builder().name("web-1").build();
        assert!(matches!(
            snapshot_from("web-1", Some(&stateless)),
            Err(ProviderError::MalformedResponse(_))
        ));
    }
}
