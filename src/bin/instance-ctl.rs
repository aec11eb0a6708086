use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "instance-ctl")]
#[command(about = "Command-line client for the instance control API", long_about = None)]
struct Cli {
    #[arg(short, long, env = "INSTANCE_CONTROL_URL", default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show lifecycle state and public address
    Status,
    /// Ask the provider to start the instance
    Start,
    /// Ask the provider to stop the instance
    Stop,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Status => client.get(format!("{}/api/status", base)).send().await?,
        Commands::Start => client.post(format!("{}/api/start", base)).send().await?,
        Commands::Stop => client.post(format!("{}/api/stop", base)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    let rendered = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if status.is_success() {
        println!("{}", rendered);
        Ok(())
    } else {
        eprintln!("Error: API returned status {}", status);
        eprintln!("{}", rendered);
        std::process::exit(1);
    }
}
