use clap::Parser;
use colorapp::cli::{serve, Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Gateway(args) => serve::run_gateway(args).await,
        Commands::Teller(args) => serve::run_teller(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
