use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "wallet-cli")]
#[command(about = "Command-line client for the omniwallet API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the wallet address
    Address,
    /// List token balances
    Portfolio {
        /// Address to look up; defaults to the wallet's own
        #[arg(short, long)]
        address: Option<String>,
        #[arg(short, long, default_value = "eth")]
        chain: String,
    },
    /// Send the native asset
    Send {
        #[arg(long)]
        to: String,
        /// Amount in whole units, e.g. 0.25
        #[arg(long)]
        amount: String,
        #[arg(short, long, default_value = "eth")]
        chain: String,
        /// Gas price override in gwei
        #[arg(long)]
        gas_price_gwei: Option<String>,
    },
    /// Check server health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = match cli.command {
        Commands::Address => client.get(format!("{}/api/address", cli.url)).send().await?,
        Commands::Portfolio { address, chain } => {
            let mut query = vec![("chain", chain)];
            if let Some(address) = address {
                query.push(("address", address));
            }
            client
                .get(format!("{}/api/portfolio", cli.url))
                .query(&query)
                .send()
                .await?
        }
        Commands::Send {
            to,
            amount,
            chain,
            gas_price_gwei,
        } => {
            let mut body = json!({ "chain": chain, "to": to, "amount_eth": amount });
            if let Some(gwei) = gas_price_gwei {
                body["gas_price_gwei"] = Value::String(gwei);
            }
            client
                .post(format!("{}/api/send", cli.url))
                .json(&body)
                .send()
                .await?
        }
        Commands::Health => client.get(format!("{}/health", cli.url)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: wallet API returned status {}", status);
    }
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    if !status.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
