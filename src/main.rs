use chatbot::core::config::{self, CliOverrides, ChatbotConfig};
use clap::Parser;
use log::{info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

const DEFAULT_LOG_FILE: &str = "chatbot.log";

#[derive(Parser)]
#[command(name = "chatbot", about = "A single-screen terminal chat")]
struct Args {
    /// Window title
    #[arg(long)]
    title: Option<String>,

    /// Artificial delay before each reply, in milliseconds
    #[arg(long)]
    reply_delay_ms: Option<u64>,

    /// How long the "copied" indicator stays on, in milliseconds
    #[arg(long)]
    copied_ms: Option<u64>,

    /// Log file path (default: chatbot.log, or CHATBOT_LOG_FILE)
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // File logger: the terminal belongs to the UI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let log_path = args
        .log_file
        .clone()
        .or_else(|| std::env::var("CHATBOT_LOG_FILE").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    if let Ok(log_file) = File::create(&log_path) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("Config error, using defaults: {e}");
        ChatbotConfig::default()
    });

    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            title: args.title,
            reply_delay_ms: args.reply_delay_ms,
            copied_indicator_ms: args.copied_ms,
        },
    );

    info!(
        "Chatbot starting up (reply delay {}ms, copied indicator {}ms)",
        resolved.reply_delay_ms, resolved.copied_indicator_ms
    );

    chatbot::tui::run(resolved)
}
