mod api_client;
mod credentials;
mod render;
mod types;

use anyhow::Result;
use clap::Parser;
use render::{BOLD, RED, RESET};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "claude-usage")]
#[command(about = "Claude rate-limit usage for the 5-hour and 7-day windows")]
#[command(version)]
struct Cli {
    /// Claude session key (sk-ant-…)
    #[arg(long)]
    session_key: Option<String>,

    /// Organization UUID (auto-fetched if not set)
    #[arg(long)]
    org_id: Option<String>,

    /// One-line output
    #[arg(long)]
    compact: bool,
}

fn main() {
    init_tracing();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("{BOLD}{RED}Error:{RESET} {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = credentials::load_config();
    let creds = credentials::resolve(cli.session_key, cli.org_id, config);

    let Some(session_key) = creds.session_key else {
        print_missing_key_guidance();
        std::process::exit(1);
    };

    // The organization list call is skipped when the id is already known;
    // the display name is only available when we had to look it up.
    let (org_id, org_name) = match creds.organization_id {
        Some(id) => (id, None),
        None => {
            let org = api_client::resolve_organization(&session_key)?;
            (org.uuid, Some(org.name))
        }
    };

    let usage = api_client::fetch_usage(&session_key, &org_id)?;

    if cli.compact {
        print!("{}", render::render_compact(&usage));
    } else {
        print!("{}", render::render_detailed(&usage, org_name.as_deref()));
    }
    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("claude_usage=warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn print_missing_key_guidance() {
    let config_path = credentials::config_path()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<config dir>/claude-usage/config".to_string());

    eprintln!("{BOLD}{RED}Error:{RESET} session key required\n");
    eprintln!("Provide it via:");
    eprintln!("  --session-key <key>       CLI flag");
    eprintln!("  CLAUDE_SESSION_KEY=<key>  environment variable");
    eprintln!("  {config_path:<26}  config file\n");
    eprintln!("To find your session key:");
    eprintln!("  1. Open claude.ai/settings/usage in your browser");
    eprintln!("  2. DevTools (F12) → Application → Cookies → claude.ai");
    eprintln!("  3. Copy the value of the 'sessionKey' cookie");
}
