use anyhow::Result;
use clap::{Parser, Subcommand};
use pictor_pipeline::BotKind;
use pictor_server::{ConfigOverrides, ServerConfig, init_logging, serve};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Pictor prompt-pipeline bot server", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve one bot over HTTP (the default)
    Serve(ServeArgs),
    /// List available bots and exit
    List,
    /// Print a bot's settings descriptor as JSON
    Settings {
        /// Catalog name, e.g. "memes-creator"
        bot: String,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
struct ServeArgs {
    /// Bot to serve (e.g., "cartoon-avatar", "story-teller")
    #[arg(short, long)]
    bot: Option<String>,

    /// Address to listen on (default: 0.0.0.0:8080)
    #[arg(long)]
    bind: Option<String>,

    /// Access key for the bot
    #[arg(long)]
    access_key: Option<String>,

    /// Backend base URL
    #[arg(long)]
    backend_url: Option<String>,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,
}

impl ServeArgs {
    fn overrides(self) -> ConfigOverrides {
        ConfigOverrides {
            bind: self.bind,
            bot: self.bot,
            access_key: self.access_key,
            backend_url: self.backend_url,
            json_logs: self.json_logs.then_some(true),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    match args.command {
        Some(Command::List) => {
            println!("\nAvailable bots:");
            println!("{:-<80}", "");
            for kind in BotKind::all() {
                let profile = kind.profile()?;
                println!("{}", kind);
                println!("  Models: {} -> {}", profile.llm_model(), profile.image_model());
                println!("  Key variable: {}", kind.legacy_key_env());
                println!();
            }
            Ok(())
        }
        Some(Command::Settings { bot }) => {
            let profile = BotKind::lookup(&bot)
                .map_err(|_| anyhow::anyhow!("Unknown bot: {}. Use `list` to see available bots.", bot))?
                .profile()?;
            println!("{}", serde_json::to_string_pretty(&profile.settings())?);
            Ok(())
        }
        Some(Command::Serve(serve_args)) => run(args.config, serve_args).await,
        None => run(args.config, args.serve).await,
    }
}

async fn run(config: Option<PathBuf>, serve_args: ServeArgs) -> Result<()> {
    let config = ServerConfig::load(config.as_deref(), &serve_args.overrides())?;
    init_logging(*config.json_logs())?;

    info!(
        bot = %config.bot(),
        bind = %config.bind(),
        backend = %config.backend_url(),
        "Starting Pictor bot server"
    );

    serve(config).await?;
    Ok(())
}
