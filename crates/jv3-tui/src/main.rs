use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use jv3_core::{ArtifactFlow, Classifier, Config, ReplyScheduler, SystemClipboard, SystemOpener, RULES};

mod app;
mod editor;
mod handler;
mod tui;
mod ui;

use app::App;
use tui::EventHandler;

const LOG_ENV: &str = "JV3_LOG";

#[derive(Parser)]
#[command(name = "jv3")]
#[command(version, about = "Prompt-to-component studio with a live HTML preview")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Thinking delay before a reply appears, in milliseconds
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    /// Which artifacts carry HTML: simplified or extended
    #[arg(long, global = true)]
    flow: Option<ArtifactFlow>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a prompt and print the generated artifact
    Generate {
        /// The prompt to classify
        prompt: String,
        /// Print the artifact as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the keyword rules in priority order
    Rules,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// The terminal belongs to the UI, so TUI sessions log to a file
fn init_file_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .context("Could not find data directory")?
        .join("jv3");
    fs::create_dir_all(&log_dir)?;

    let log_path = log_dir.join("jv3.log");
    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    tracing::info!("Logging initialized to: {:?}", log_path);
    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Config {
    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        Config::new()
    });

    if let Some(delay_ms) = cli.delay_ms {
        config.reply_delay_ms = delay_ms;
    }
    if let Some(flow) = cli.flow {
        config.flow = flow;
    }
    config
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Generate { prompt, json }) => {
            init_stderr_logging();
            let config = load_config(&cli);
            generate(&config, prompt, *json)
        }
        Some(Commands::Rules) => {
            init_stderr_logging();
            list_rules();
            Ok(())
        }
        None => {
            if let Err(e) = init_file_logging() {
                eprintln!("Logging disabled: {}", e);
            }
            let config = load_config(&cli);
            run_tui(config).await
        }
    }
}

fn generate(config: &Config, prompt: &str, json: bool) -> Result<()> {
    let artifact = Classifier::new(config.flow).classify(prompt);

    if json {
        println!("{}", serde_json::to_string_pretty(&artifact)?);
        return Ok(());
    }

    println!("[{}] {}", artifact.template.as_str(), artifact.chat_message);
    println!();
    println!("{}", artifact.source_code);
    if let Some(html) = &artifact.html {
        println!();
        println!("--- html ---");
        println!("{}", html);
    }
    Ok(())
}

fn list_rules() {
    for (i, rule) in RULES.iter().enumerate() {
        println!("{}. {:<8} {}", i + 1, rule.template.as_str(), rule.keywords.join(", "));
    }
    println!("{}. {:<8} (anything else)", RULES.len() + 1, "default");
}

async fn run_tui(config: Config) -> Result<()> {
    tui::install_panic_hook();
    let mut terminal = tui::init()?;

    let (scheduler, mut replies) = ReplyScheduler::spawn(config.reply_delay(), Classifier::new(config.flow));
    let mut events = EventHandler::new(config.tick_rate());
    let mut app = App::new(config, scheduler, Box::new(SystemClipboard), Box::new(SystemOpener));

    tracing::info!("jv3 started");

    let result = run_loop(&mut terminal, &mut app, &mut events, &mut replies).await;

    app.shutdown();
    tui::restore()?;
    tracing::info!("jv3 exiting");
    result
}

async fn run_loop(
    terminal: &mut tui::Tui,
    app: &mut App,
    events: &mut EventHandler,
    replies: &mut tokio::sync::mpsc::UnboundedReceiver<jv3_core::Reply>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(app, frame))?;

        tokio::select! {
            event = events.next() => {
                match event {
                    Some(event) => handler::handle_event(app, event),
                    None => break,
                }
            }
            Some(reply) = replies.recv() => {
                app.on_reply(reply);
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
