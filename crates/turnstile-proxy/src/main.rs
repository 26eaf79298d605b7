use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use turnstile_core::TrimSettings;
use turnstile_proxy::state::AppState;
use turnstile_proxy::upstream::HttpUpstream;

/// Conversation-trimming interception proxy.
#[derive(Debug, Parser)]
#[command(name = "turnstile", version)]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:8787")]
    listen: SocketAddr,

    /// Upstream base URL traffic is forwarded to.
    #[arg(long)]
    upstream: String,

    /// Trailing turns to keep per conversation.
    #[arg(long, default_value_t = 15)]
    message_limit: u32,

    /// Ceiling on extra turns accumulated via "load older" requests.
    #[arg(long, default_value_t = 300)]
    max_extra_messages: u32,

    /// Serve everything untrimmed (interception disabled).
    #[arg(long)]
    disabled: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let settings = TrimSettings {
        enabled: !args.disabled,
        message_limit: args.message_limit,
        max_extra_messages: args.max_extra_messages,
        ..Default::default()
    }
    .normalized();

    let upstream = Arc::new(HttpUpstream::new(args.upstream.clone()));
    let state = AppState::new(upstream, settings);
    let app = turnstile_proxy::app_with_state(state);

    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    info!(listen = %args.listen, upstream = %args.upstream, "turnstile proxy listening");
    axum::serve(listener, app).await?;

    Ok(())
}
