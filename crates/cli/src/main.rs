mod subscriber_commands;

use std::sync::Arc;

use {
    clap::{Parser, Subcommand},
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use {
    courier_dispatch::{Dispatcher, Transport},
    courier_gateway::AppState,
    courier_line::LineTransport,
    courier_subscribers::{FileSubscriberStore, SubscriberStore},
};

#[derive(Parser)]
#[command(name = "courier", about = "Courier — webhook-driven messaging relay")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Explicit config file path (skips the courier.toml discovery).
    #[arg(long, global = true, env = "COURIER_CONFIG")]
    config: Option<std::path::PathBuf>,

    /// Address to bind to (overrides config value).
    #[arg(long, global = true)]
    bind: Option<String>,

    /// Port to listen on (overrides config value).
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Subscriber file path (overrides config value).
    #[arg(long, global = true)]
    subscribers_file: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the relay gateway (default when no subcommand is provided).
    Serve,
    /// Subscriber registry management.
    Subscribers {
        #[command(subcommand)]
        action: subscriber_commands::SubscriberAction,
    },
    /// Push a message to every subscriber and report the outcome.
    Broadcast {
        #[arg(short, long)]
        message: String,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    let mut config = match cli.config {
        Some(ref path) => courier_config::load_from(path)?,
        None => courier_config::discover_and_load(),
    };
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(path) = cli.subscribers_file {
        config.subscribers_file = path;
    }

    let store: Arc<dyn SubscriberStore> =
        Arc::new(FileSubscriberStore::new(config.subscribers_file.clone()));

    match cli.command {
        None | Some(Commands::Serve) => {
            config.ensure_credentials()?;
            info!(version = env!("CARGO_PKG_VERSION"), "courier starting");

            let transport: Arc<dyn Transport> = Arc::new(LineTransport::with_base(
                config.channel_access_token.clone(),
                config.api_base.clone(),
            ));
            let dispatcher = Arc::new(
                Dispatcher::new(Arc::clone(&store), transport)
                    .with_parallelism(config.broadcast_parallelism),
            );
            let state = AppState::new(store, dispatcher, config.channel_secret.clone());
            courier_gateway::serve(&config.bind, config.port, state).await
        },
        Some(Commands::Subscribers { action }) => {
            subscriber_commands::handle_subscribers(action, &*store).await
        },
        Some(Commands::Broadcast { message }) => {
            config.ensure_credentials()?;
            subscriber_commands::broadcast(&config, store, &message).await
        },
    }
}
