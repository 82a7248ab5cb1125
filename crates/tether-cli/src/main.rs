use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::time::{Duration, interval};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tether_core::{FuncRelay, MethodDescriptor, Publisher, PublisherConfig, WeakRelay, method};

#[derive(Parser)]
#[command(name = "tether")]
#[command(version, about = "Weak callback relay demo: a ticker that does not keep its listeners alive")]
struct Cli {
    /// Number of ticks to publish
    #[arg(long, default_value = "10")]
    ticks: u64,

    /// Drop the dashboard subscriber after this many ticks
    #[arg(long, default_value = "4", value_parser = clap::value_parser!(u64).range(1..))]
    drop_after: u64,

    /// Milliseconds between ticks
    #[arg(long, default_value = "100", value_parser = clap::value_parser!(u64).range(1..))]
    interval_ms: u64,

    /// Publisher config (JSON)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Prints every tick it receives.
struct Dashboard {
    name: String,
}

impl Dashboard {
    fn on_tick(&self, n: u64) {
        info!(dashboard = %self.name, tick = n, "tick received");
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        info!(dashboard = %self.name, "dashboard dropped");
    }
}

/// Remembers the latest tick; polled through a producer relay.
#[derive(Default)]
struct Recorder {
    latest: AtomicU64,
    seen: AtomicU64,
}

impl Recorder {
    fn on_tick(&self, n: u64) {
        self.latest.store(n, Ordering::SeqCst);
        self.seen.fetch_add(1, Ordering::SeqCst);
    }

    fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<PublisherConfig> {
    let Some(path) = path else {
        return Ok(PublisherConfig::named("ticker"));
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid config {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    // (A) Publisher と購読者を用意
    let mut ticker: Publisher<u64> = Publisher::with_config(config);
    let dashboard = Arc::new(Dashboard {
        name: "main".to_string(),
    });
    let recorder = Arc::new(Recorder::default());

    ticker.subscribe_method(&dashboard, method!(Dashboard::on_tick));
    ticker.subscribe_method(&recorder, method!(Recorder::on_tick));

    let poll: FuncRelay<u64> =
        WeakRelay::new(&recorder, MethodDescriptor::nullary("latest", Recorder::latest));

    // (B) dashboard の所有者は main だけ。Publisher は生かし続けない
    let mut dashboard = Some(dashboard);
    let mut clock = interval(Duration::from_millis(cli.interval_ms));

    for n in 1..=cli.ticks {
        clock.tick().await;
        ticker.emit(n)?;

        if n == cli.drop_after {
            drop(dashboard.take());
        }
        let counts = ticker.counts();
        info!(
            tick = n,
            alive = counts.alive,
            expired = counts.expired,
            polled = poll.dispatch(())?,
            "published"
        );
    }

    // (C) 後片付け: 回収済みスロットを明示的に外す
    let pruned = ticker.prune_expired();
    if pruned == 0 && !ticker.config().prune_expired_on_emit && cli.drop_after <= cli.ticks {
        warn!("expected an expired slot after dropping the dashboard");
    }
    info!(seen = recorder.seen.load(Ordering::SeqCst), pruned, "done");

    drop(recorder);
    info!(polled = poll.dispatch(())?, "recorder dropped; poll falls back to default");

    println!("{}", serde_json::to_string(&ticker.counts())?);
    Ok(())
}
