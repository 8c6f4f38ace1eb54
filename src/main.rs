//! Binary entrypoint for the isaacbot CLI.
//!
//! Commands:
//! - `init` - write a starter `config.toml`
//! - `query <text> [--exact]` - resolve one query and print the reply
//! - `section <key>` - print one section, e.g. `Effects/Item/A Pony`
//! - `run` / `challenge` / `spin` - random run suggestions
//! - `chat` - console transport: `/cmd` lines are commands, `@key` lines are
//!   button presses, anything else is a query
//!
//! See the library crate docs for module-level details: `isaacbot::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{error, info};
use tokio::io::{AsyncBufReadExt, BufReader};

use isaacbot::bot::{run, Bot, Reply};
use isaacbot::config::Config;
use isaacbot::format::Formatter;
use isaacbot::resolver::{Resolution, Resolver};
use isaacbot::source::Sources;

#[derive(Parser)]
#[command(name = "isaacbot")]
#[command(about = "The Binding of Isaac reference bot")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,
    /// Resolve a query and print the reply
    Query {
        /// Free text to look up
        text: Vec<String>,
        /// Only accept a verbatim catalog name
        #[arg(short, long)]
        exact: bool,
    },
    /// Print one section of an entity (`section/entityType/entityName`)
    Section {
        key: String,
    },
    /// Suggest a random character and mode
    Run,
    /// Suggest a random challenge
    Challenge,
    /// Suggest a run or a challenge
    Spin,
    /// Interactive console chat
    Chat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Peek for logging only; commands reload and fail on a bad file.
    let config = match cli.command {
        Commands::Init => None,
        _ => Config::load(&cli.config).await.ok(),
    };
    if !matches!(cli.command, Commands::Init) {
        init_logging(&config, cli.verbose);
    }

    match cli.command {
        Commands::Init => {
            Config::create_default(&cli.config).await?;
            println!("Wrote default configuration to {}", cli.config);
        }
        Commands::Run => println!("{}", run::new_run()),
        Commands::Challenge => println!("{}", run::new_challenge()),
        Commands::Spin => println!("{}", run::new_spin()),
        Commands::Query { text, exact } => {
            let bot = build_bot(Config::load_or_default(&cli.config).await?).await?;
            let query = text.join(" ");
            if exact {
                let resolution = bot.resolver().resolve(&query, true).await?;
                print_resolution(&bot, &resolution);
            } else {
                print_reply(&bot.handle_message(&query).await?);
            }
        }
        Commands::Section { key } => {
            let bot = build_bot(Config::load_or_default(&cli.config).await?).await?;
            print_reply(&bot.handle_callback(&key).await?);
        }
        Commands::Chat => {
            let bot = build_bot(Config::load_or_default(&cli.config).await?).await?;
            chat(&bot).await?;
        }
    }
    Ok(())
}

async fn build_bot(config: Config) -> Result<Bot<Sources>> {
    let sources = Sources::from_config(&config)?;
    let emojis = sources.documents().emojis().await?;
    info!(
        "Starting isaacbot v{} (data dir {}, {} emojis)",
        env!("CARGO_PKG_VERSION"),
        sources.documents().data_dir().display(),
        emojis.len()
    );
    let resolver = Resolver::new(sources, Formatter::new(emojis), &config.resolver)?;
    Ok(Bot::new(resolver, config.bot))
}

async fn chat(bot: &Bot<Sources>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let result = match line.strip_prefix('@') {
            Some(key) => bot.handle_callback(key.trim()).await,
            None => bot.handle_message(line).await,
        };
        match result {
            Ok(reply) => print_reply(&reply),
            Err(e) => {
                error!("request failed: {}", e);
                println!("Something went wrong: {}", e);
            }
        }
    }
    Ok(())
}

fn print_reply(reply: &Reply) {
    if let Some(image) = &reply.image {
        println!("[image] {}", image);
    }
    println!("{}", reply.text);
    for button in &reply.buttons {
        println!("  [{}] @{}", button.label, button.data);
    }
}

fn print_resolution(bot: &Bot<Sources>, resolution: &Resolution) {
    match resolution {
        Resolution::Found { kind, name, record } => {
            println!("{} ({})", name, kind);
            println!("{}", bot.resolver().formatter().render(record));
        }
        Resolution::Similar(candidates) if candidates.is_empty() => println!("Not found"),
        Resolution::Similar(candidates) => {
            for c in candidates {
                println!("  [{}] @{}", c.name, c.key());
            }
        }
    }
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let level = match verbosity {
        0 => config
            .as_ref()
            .and_then(|c| c.logging.level.parse().ok())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(level);

    let file = config
        .as_ref()
        .and_then(|c| c.logging.file.as_deref())
        .and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });

    match file {
        Some(f) => {
            let file = std::sync::Mutex::new(f);
            // Console copy only when attached to a terminal
            let is_tty = atty::is(atty::Stream::Stderr);
            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());
                if let Ok(mut guard) = file.lock() {
                    let _ = writeln!(guard, "{}", line);
                }
                if is_tty {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
        }
        None => {
            builder.format(|fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
            });
        }
    }
    let _ = builder.try_init();
}
