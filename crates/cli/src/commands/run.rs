//! `run` command implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use contracts::PageBlueprint;
use tokio::time::{self, MissedTickBehavior};
use tracing::{info, warn};
use viewer::{Page, PageHandle, PageSnapshot};

use crate::cli::RunArgs;
use crate::script::{load_script, replay};

/// Execute the `run` command
pub async fn run_page(args: &RunArgs) -> Result<()> {
    info!(page = %args.page.display(), "Loading page description");

    let mut blueprint = super::load_page(&args.page)
        .with_context(|| format!("Failed to load page from {}", args.page.display()))?;

    if let Some(ref origin) = args.origin {
        info!(origin = %origin, "Overriding origin from CLI");
        blueprint.settings.origin = Some(origin.clone());
    }

    info!(
        carousels = blueprint.carousels.len(),
        origin = ?blueprint.settings.origin,
        overlay = blueprint.overlay.is_some(),
        "Page description loaded"
    );

    if args.dry_run {
        info!("Dry run mode - page description is valid, exiting");
        print_page_summary(&blueprint);
        return Ok(());
    }

    // Parse the script before anything starts rotating
    let script = args
        .script
        .as_deref()
        .map(load_script)
        .transpose()
        .context("Failed to load input script")?;

    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
    }

    let page = Page::from_blueprint(&blueprint)
        .await
        .context("Failed to build page")?;
    let handle = page.spawn();

    let script_task = script.map(|steps| tokio::spawn(replay(steps, handle.sender())));

    info!("Page running");
    wait_for_stop(args, &handle).await;

    if let Some(task) = script_task {
        // Unfinished scripts would keep the page's input open
        task.abort();
        let _ = task.await;
    }

    let snapshot = handle.shutdown().await.context("Page shutdown failed")?;
    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot).context("Failed to serialize page snapshot")?
    );

    info!("Carousel viewer finished");
    Ok(())
}

/// Block until the run duration elapses or a shutdown signal arrives,
/// logging snapshots along the way if requested
async fn wait_for_stop(args: &RunArgs, handle: &PageHandle) {
    let deadline = async {
        if args.duration == 0 {
            std::future::pending::<()>().await;
        } else {
            time::sleep(Duration::from_secs(args.duration)).await;
        }
    };
    tokio::pin!(deadline);

    let mut snapshots = (args.snapshot_interval > 0).then(|| {
        let period = Duration::from_secs(args.snapshot_interval);
        let mut interval = time::interval_at(time::Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        interval
    });

    let shutdown_signal = shutdown_signal();
    tokio::pin!(shutdown_signal);

    loop {
        tokio::select! {
            _ = &mut deadline => {
                info!(seconds = args.duration, "Run duration elapsed");
                break;
            }
            _ = &mut shutdown_signal => {
                warn!("Received shutdown signal, stopping page...");
                break;
            }
            _ = async {
                match snapshots.as_mut() {
                    Some(interval) => { interval.tick().await; }
                    None => std::future::pending::<()>().await,
                }
            } => {
                log_snapshot(&handle.latest());
                if handle.is_finished() {
                    warn!("Page event loop exited early");
                    break;
                }
            }
        }
    }
}

fn log_snapshot(snapshot: &PageSnapshot) {
    for carousel in &snapshot.carousels {
        info!(
            root_id = %carousel.root_id,
            index = carousel.current_index,
            running = carousel.running,
            active_src = %carousel.active_src,
            "Carousel state"
        );
    }
    if let Some(overlay) = snapshot.overlay.as_ref().filter(|o| o.is_open) {
        info!(src = ?overlay.current_src, "Overlay open");
    }
}

/// Ctrl+C and SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print page summary for dry-run mode
fn print_page_summary(blueprint: &PageBlueprint) {
    println!("\n=== Page Summary ===\n");
    println!(
        "Origin: {}",
        blueprint.settings.origin.as_deref().unwrap_or("(none)")
    );
    println!("\nCarousels ({}):", blueprint.carousels.len());
    for root in &blueprint.carousels {
        let config = config_loader::carousel_config(root);
        println!(
            "  - {} ({:?}) every {} ms{}",
            root.root_id,
            root.variant,
            config.interval.as_millis(),
            if root.home { " [home]" } else { "" }
        );
    }
    println!(
        "\nOverlay: {}",
        if blueprint.overlay.is_some_and(|o| o.is_complete()) {
            "enabled"
        } else {
            "disabled"
        }
    );
}
