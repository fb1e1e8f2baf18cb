//! Post a message to Google Chat from the command line.
//!
//! ```text
//! GOOGLE_CHAT_SPACES='{"ops": "https://chat.googleapis.com/v1/spaces/XXX/messages?key=...&token=..."}' \
//!     cargo run -p google-chat-notify --example send_webhook -- --space ops --threaded "Deploy finished"
//! ```

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use google_chat_notify::{
    AnonymousNotifiable, GoogleChatChannel, GoogleChatConfig, GoogleChatMessage,
    GOOGLE_CHAT_CHANNEL,
};

#[derive(Parser)]
#[command(name = "send_webhook")]
#[command(about = "Send a message to a Google Chat space")]
struct Cli {
    /// Message text
    text: String,

    /// Space alias or webhook URL (defaults to GOOGLE_CHAT_SPACE)
    #[arg(long)]
    space: Option<String>,

    /// Reply in the existing thread, or start a new one
    #[arg(long)]
    threaded: bool,

    /// Thread key to post into
    #[arg(long)]
    thread_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("google_chat_notify=debug,send_webhook=debug,info")
    } else {
        EnvFilter::new("google_chat_notify=info,warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = GoogleChatConfig::from_env().context("Invalid Google Chat configuration")?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cli.timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;
    let channel = GoogleChatChannel::with_client(client, config);

    let mut message = GoogleChatMessage::new().text(&cli.text);
    if cli.threaded {
        message = message.threaded();
    }
    if let Some(key) = cli.thread_key {
        message = message.thread(key);
    }

    let mut notifiable = AnonymousNotifiable::new();
    if let Some(space) = cli.space {
        notifiable = notifiable.route(GOOGLE_CHAT_CHANNEL, space);
    }

    channel
        .send_message(&notifiable, &message)
        .await
        .context("Failed to send Google Chat message")?;

    info!("Message sent");
    Ok(())
}
