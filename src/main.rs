mod app;
mod domain;
mod repo;
mod usecase;

use std::future::Future;
use std::time::Duration;

use anyhow::{Result, anyhow};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use app::{App, DEFAULT_PAGE_SIZE, SweepConfig};
use domain::notification::{IgnoreSets, SweepReport};
use repo::github::auth::{TOKEN_ENV, resolve_github_token};
use repo::github::{GithubInbox, build_client};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "notisweep: mark PR review-request notifications from ignored authors/teams as read",
    long_about = None
)]
struct Args {
    /// PR author login whose review requests are dismissed (repeatable)
    #[arg(long, value_name = "LOGIN")]
    authors_to_ignore: Vec<String>,

    /// Team name whose review requests are dismissed unless you were also asked by name (repeatable)
    #[arg(long, value_name = "TEAM")]
    teams_to_ignore: Vec<String>,

    /// Only log which notifications would be marked read
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Notifications requested per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = clap::value_parser!(u8).range(1..=100))]
    page_size: u8,

    /// Abort the whole run after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// API root, e.g. https://ghe.example.com/api/v3
    #[arg(long)]
    api_base: Option<String>,

    /// Log filter directive (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let token = resolve_github_token()?;
    if token.is_none() {
        tracing::warn!("{TOKEN_ENV} is not set; requests will be unauthenticated");
    }
    if args.dry_run {
        tracing::warn!("dry run: no notification will be marked read");
    }

    let mut config = SweepConfig::new(IgnoreSets::new(
        args.authors_to_ignore,
        args.teams_to_ignore,
    ));
    config.page_size = args.page_size;
    config.dry_run = args.dry_run;
    let timeout = args.timeout_secs.map(Duration::from_secs);
    let api_base = args.api_base;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| anyhow!("failed to build tokio runtime: {e}"))?;

    let report = rt.block_on(async move {
        let octo = build_client(token, api_base)?;
        let mut app = App::new(GithubInbox::new(octo), config);
        until_cancelled(app.run(), timeout).await
    })?;

    tracing::info!(
        pages = report.pages,
        scanned = report.scanned,
        dismissed = report.dismissed,
        "sweep finished"
    );
    Ok(())
}

fn init_tracing(level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_new(level).map_err(|e| anyhow!("invalid --log-level {level:?}: {e}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Drive the sweep until it finishes, the deadline passes, or Ctrl-C arrives.
/// The latter two drop the in-flight request.
async fn until_cancelled(
    run: impl Future<Output = Result<SweepReport>>,
    timeout: Option<Duration>,
) -> Result<SweepReport> {
    let bounded = async {
        match timeout {
            Some(limit) => match tokio::time::timeout(limit, run).await {
                Ok(res) => res,
                Err(_) => Err(anyhow!("sweep timed out after {}s", limit.as_secs())),
            },
            None => run.await,
        }
    };
    tokio::select! {
        res = bounded => res,
        _ = tokio::signal::ctrl_c() => Err(anyhow!("interrupted; sweep aborted")),
    }
}
