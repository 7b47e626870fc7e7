mod session;

use clap::{Parser, Subcommand, ValueEnum};
use ordertrack_client::{ClientConfig, LookupMode, TrackingClient};
use ordertrack_view::{DateFormatter, TrackerView};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ordertrack")]
#[command(about = "Track your order in real-time")]
struct Cli {
    /// Backend base URL; overrides `ORDERTRACK_API_URL`.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Endpoint used to resolve order numbers.
    #[arg(long, global = true, value_enum, default_value_t = Lookup::Search)]
    lookup: Lookup,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up one order and print its status card.
    Track {
        /// Order number; surrounding whitespace is ignored.
        #[arg(default_value = "")]
        order_number: String,
    },
    /// Read order numbers from stdin, one per line.
    Interactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Lookup {
    Search,
    Track,
}

impl From<Lookup> for LookupMode {
    fn from(lookup: Lookup) -> Self {
        match lookup {
            Lookup::Search => LookupMode::Search,
            Lookup::Track => LookupMode::Track,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = ordertrack_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut client_config = ClientConfig::from_app_config(&config).with_lookup(cli.lookup.into());
    if let Some(api_url) = cli.api_url {
        client_config.base_url = api_url;
    }
    tracing::debug!(
        env = %config.env,
        base_url = %client_config.base_url,
        credentials = %client_config.credentials,
        "tracking client configured"
    );
    let client = TrackingClient::new(client_config)?;
    let dates = DateFormatter::new(config.display_offset);
    let mut view = TrackerView::new();

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Track { order_number } => {
            view.set_input(order_number);
            let mut stdout = std::io::stdout();
            session::search_and_render(&mut view, &client, &dates, &mut stdout).await?;
        }
        Commands::Interactive => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            session::run(stdin, std::io::stdout(), &mut view, &client, &dates).await?;
        }
    }

    Ok(())
}
