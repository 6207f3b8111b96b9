//! nexus-chat – terminal front-end for the chat relay.
//!
//! Each line read from stdin is submitted as one message; every message the
//! session appends is printed. `/quit` or EOF ends the session.

use clap::Parser;
use nexus_client::render::format_message;
use nexus_client::{ChatSession, DEFAULT_ENDPOINT, HttpTransport, Transcript};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "nexus-chat", version, about = "Chat with the NEXUS relay from a terminal")]
struct Args {
    /// Chat endpoint URL.
    #[arg(long, env = "NEXUS_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Start with an empty transcript instead of the welcome lines.
    #[arg(long)]
    no_greeting: bool,

    /// `tracing` filter for diagnostics written to stderr.
    #[arg(long, env = "NEXUS_LOG", default_value = "warn")]
    log: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_new(&args.log)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let transport = HttpTransport::new(&args.endpoint)?;
    match transport.check_backend().await {
        Ok(true) => info!(endpoint = %transport.endpoint(), "relay reachable"),
        Ok(false) => warn!(endpoint = %transport.endpoint(), "relay health check failed"),
        Err(e) => warn!(error = %e, "relay not reachable; messages will fail until it is up"),
    }

    let transcript = if args.no_greeting {
        Transcript::new()
    } else {
        Transcript::with_greeting()
    };
    let mut session = ChatSession::with_transcript(transport, transcript);

    let mut stdout = tokio::io::stdout();
    for message in session.transcript() {
        stdout
            .write_all(format!("{}\n", format_message(message)).as_bytes())
            .await?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim() == "/quit" {
            break;
        }

        let before = session.transcript().len();
        if session.submit(&line).await.is_none() {
            continue;
        }
        for message in session.transcript().since(before) {
            stdout
                .write_all(format!("{}\n", format_message(message)).as_bytes())
                .await?;
        }
    }

    stdout.flush().await?;
    Ok(())
}
