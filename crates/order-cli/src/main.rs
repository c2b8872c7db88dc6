//! Limit order CLI
//!
//! Builds, signs, and submits limit orders to the 1inch orderbook, and runs
//! the on-chain preparation steps (allowance approval, native wrapping) the
//! orders depend on.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use orderbook_core::chain::Network;
use orderbook_core::config::Config;
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "order-cli",
    version,
    about = "Build, sign, and submit limit orders to the 1inch orderbook"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum NetworkArg {
    Sepolia,
    Polygon,
}

impl From<NetworkArg> for Network {
    fn from(arg: NetworkArg) -> Self {
        match arg {
            NetworkArg::Sepolia => Network::Sepolia,
            NetworkArg::Polygon => Network::Polygon,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Build, sign, and submit a limit order for the network's demo pair
    Submit {
        #[arg(long, value_enum)]
        network: NetworkArg,
        /// Amount of the maker token to sell (human-readable)
        #[arg(long)]
        making_amount: Option<Decimal>,
        /// Amount of the taker token to receive (human-readable)
        #[arg(long)]
        taking_amount: Option<Decimal>,
    },
    /// Grant the router an allowance on the maker token
    Approve {
        #[arg(long, value_enum)]
        network: NetworkArg,
        /// Amount to approve (human-readable); unlimited when omitted
        #[arg(long)]
        amount: Option<Decimal>,
    },
    /// Wrap native currency into the network's wrapped trading token
    Wrap {
        #[arg(long, value_enum)]
        network: NetworkArg,
        /// Amount of native currency to wrap (human-readable)
        #[arg(long)]
        amount: Decimal,
    },
    /// Probe which networks the orderbook service supports
    CheckNetworks,
    /// Inspect the orderbook API shape without placing a real order
    ProbeApi {
        #[arg(long, value_enum)]
        network: NetworkArg,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "order_cli=info,orderbook_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    tracing::debug!("Starting order-cli");

    // Configuration is validated before anything touches the network; a
    // missing secret is fatal here.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ {}", e);
            eprintln!("Set AUTH_KEY and PRIVATE_KEY in the environment or a .env file.");
            std::process::exit(1);
        }
    };

    match cli.command {
        Command::Submit {
            network,
            making_amount,
            taking_amount,
        } => commands::submit::run(&config, network.into(), making_amount, taking_amount).await,
        Command::Approve { network, amount } => {
            commands::approve::run(&config, network.into(), amount).await
        }
        Command::Wrap { network, amount } => {
            commands::wrap::run(&config, network.into(), amount).await
        }
        Command::CheckNetworks => commands::networks::run(&config).await,
        Command::ProbeApi { network } => commands::probe::run(&config, network.into()).await,
    }
}
