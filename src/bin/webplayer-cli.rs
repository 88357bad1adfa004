use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "webplayer-cli")]
#[command(about = "Query a running Navidrome web player backend", long_about = None)]
struct Cli {
    #[arg(short, long, env = "WEBPLAYER_URL", default_value = "http://localhost:5069")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the service is alive
    Ping,
    /// Fetch a list of random songs
    Random {
        #[arg(short, long, default_value_t = 10)]
        size: u32,
    },
    /// Search songs by title, artist or album
    Search {
        query: String,
        #[arg(short = 'n', long, default_value_t = 25)]
        song_count: u32,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match &cli.command {
        Commands::Ping => client.get(format!("{}/ping", base)),
        Commands::Random { size } => client
            .get(format!("{}/api/random/list", base))
            .query(&[("size", size.to_string())]),
        Commands::Search { query, song_count } => client
            .get(format!("{}/api/search", base))
            .query(&[("query", query.clone()), ("songCount", song_count.to_string())]),
    };

    if !print_response(request.send().await?).await? {
        std::process::exit(1);
    }
    Ok(())
}

/// Print the body; `false` when the service answered with an error status.
async fn print_response(res: reqwest::Response) -> Result<bool, Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(false);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(true)
}
