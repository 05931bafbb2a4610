use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod domain;
mod application;
mod infrastructure;

use application::errors::BotError;
use application::services::docs_service::DEFAULT_OUTPUT;
use application::services::storefront::storefront_router;
use application::services::{DocsService, Manifest, MessageService};
use domain::traits::Bot;
use infrastructure::adapters::{ConsoleAdapter, GreenApiAdapter};
use infrastructure::config::Config;

#[derive(Parser)]
#[command(name = "muntushop-bot")]
#[command(about = "MuntuShop WhatsApp bot and documentation tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run {
        /// Chat on stdin/stdout instead of WhatsApp
        #[arg(long)]
        console: bool,
    },
    /// Combine the project markdown files into one document
    CombineDocs {
        /// Directory the manifest paths are relative to
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Output file
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// YAML manifest replacing the built-in document list
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { console } => run_bot(&cli.config, console),
        Commands::CombineDocs { root, output, manifest } => combine_docs(root, output, manifest),
        Commands::Version => {
            println!("muntushop-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: &Path) -> Result<Config, BotError> {
    let mut config = if path.exists() {
        tracing::info!("Loading configuration from: {}", path.display());
        Config::load(path)?
    } else {
        tracing::info!("{} not found, using defaults and environment", path.display());
        Config::default()
    };
    config.apply_env();
    Ok(config)
}

fn run_bot(config_path: &Path, console: bool) -> Result<(), BotError> {
    let config = load_config(config_path)?;
    let router = storefront_router(&config.bot.command_prefix);

    tracing::info!("Starting {}", config.bot.name);

    let rt = tokio::runtime::Runtime::new()?;

    if console {
        return rt.block_on(serve(ConsoleAdapter::new(), router));
    }

    let credentials = config.credentials()?;
    let bot = GreenApiAdapter::new(credentials, &config.green_api)?.with_name(&config.bot.name);

    println!("🚀 Starting MuntuShop WhatsApp Bot...");
    println!("📱 Instance ID: {}", bot.bot_info().id);
    println!("✅ Bot is running. Press Ctrl+C to stop.");

    rt.block_on(serve(bot, router))
}

async fn serve<B: Bot>(bot: B, router: application::messaging::MessageRouter) -> Result<(), BotError> {
    let service = MessageService::new(bot, router);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    service.run(shutdown).await?;
    println!("\n👋 Bot stopped. Goodbye!");
    Ok(())
}

fn combine_docs(root: PathBuf, output: PathBuf, manifest: Option<PathBuf>) -> Result<(), BotError> {
    let manifest = match manifest {
        Some(path) => Manifest::load(path)?,
        None => Manifest::builtin(),
    };

    let generated_at = chrono::Local::now().format("%a %b %e %H:%M:%S %Z %Y").to_string();
    let doc = DocsService::new(root, manifest).write(&output, &generated_at)?;

    println!("✅ Created {}", output.display());
    println!("   Total lines: {}", doc.line_count());
    println!("   Files combined: {}", doc.files_combined);
    Ok(())
}

fn init_config() -> Result<(), BotError> {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config)
        .map_err(|e| BotError::Parse(e.to_string()))?;
    println!("{}", yaml);
    println!("# Save this to config.yaml and set the green-api credentials");
    println!("# (or export GREEN_ID_INSTANCE and GREEN_API_TOKEN_INSTANCE).");
    Ok(())
}
