// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/qcvision

//! QC Vision - Garment Inspection Line Simulator
//!
//! Headless driver: runs the inspection engine against real time and
//! reports the dashboard state on a fixed interval.

use anyhow::Result;
use clap::Parser;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use qcvision::{Config, DashboardSnapshot, Engine, NAME, VERSION};

/// QC Vision - Garment Inspection Line Simulator
#[derive(Parser, Debug)]
#[command(name = "qcvision")]
#[command(author = "QC Vision Project")]
#[command(version = VERSION)]
#[command(about = "Simulated garment inspection line with synthetic defect detection")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace-level logging
    #[arg(long)]
    trace: bool,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many seconds of real time
    #[arg(long)]
    duration_secs: Option<u64>,

    /// Simulated milliseconds per real millisecond
    #[arg(long, default_value = "1.0")]
    time_scale: f64,

    /// Dashboard report interval in milliseconds
    #[arg(long, default_value = "3000")]
    report_ms: u64,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.trace {
        Level::TRACE
    } else if args.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_file(args.debug)
        .with_line_number(args.debug)
        .with_ansi(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("{} v{} - Garment Inspection Line Simulator", NAME, VERSION);

    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_create(&config_path)?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;

    info!("Configuration loaded from {:?}", config_path);
    match config.seed {
        Some(seed) => info!("Seed: {}", seed),
        None => info!("Seed: entropy"),
    }

    if !(args.time_scale.is_finite() && args.time_scale > 0.0) {
        anyhow::bail!("--time-scale must be a positive number, got {}", args.time_scale);
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_headless(config, args))
}

async fn run_headless(config: Config, args: Args) -> Result<()> {
    let tick_ms = config.simulation.scan_period_ms;
    let engine = Arc::new(Mutex::new(Engine::new(config)?));

    let bus = engine.lock().event_bus();
    let mut detections = bus.subscribe_detections();
    let mut log_entries = bus.subscribe_log_entries();

    engine.lock().start();
    info!("🚀 Inspection running");
    info!("   Press Ctrl+C to shutdown");

    let reporter = {
        let engine = Arc::clone(&engine);
        let period = Duration::from_millis(args.report_ms.max(1));
        let json = args.json;
        tokio::spawn(async move {
            let mut report = tokio::time::interval(period);
            loop {
                report.tick().await;
                let snapshot = engine.lock().snapshot();
                if let Err(e) = print_report(&snapshot, json) {
                    warn!("Failed to print report: {}", e);
                }
            }
        })
    };

    let mut ticker = tokio::time::interval(Duration::from_millis(tick_ms));
    let deadline = async {
        match args.duration_secs {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(deadline);

    let mut last = Instant::now();
    let mut carry = 0.0f64;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let elapsed = last.elapsed();
                last = Instant::now();
                let virtual_ms = elapsed.as_secs_f64() * 1000.0 * args.time_scale + carry;
                let whole = virtual_ms.floor();
                carry = virtual_ms - whole;
                engine.lock().advance(whole as u64);
            }
            Ok(detection) = detections.recv() => {
                warn!(
                    "DEFECT DETECTED #{}: {} - {:.1}% ({})",
                    detection.id, detection.category, detection.confidence, detection.severity
                );
            }
            Ok(entry) = log_entries.recv() => {
                info!(
                    "[{}] {} {} {} {:.1}% {}",
                    entry.timestamp, entry.camera, entry.category, entry.severity, entry.confidence, entry.position
                );
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received, cleaning up...");
                break;
            }
            _ = &mut deadline => {
                info!("Run duration elapsed");
                break;
            }
        }
    }

    reporter.abort();
    let summary = {
        let mut engine = engine.lock();
        engine.stop();
        engine.snapshot()
    };
    print_report(&summary, args.json)?;

    info!(
        "Inspected {} garments, {} defects, efficiency {:.1}%",
        summary.counters.inspected, summary.counters.defects, summary.stats.efficiency
    );
    Ok(())
}

fn print_report(snapshot: &DashboardSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
        return Ok(());
    }

    let status = if snapshot.running { "ACTIVE" } else { "STOPPED" };
    let camera = match &snapshot.active_detection {
        Some(d) => format!("DEFECT {} {:.1}%", d.category, d.confidence),
        None => "QUALITY OK".to_string(),
    };
    println!(
        "{:<7} | inspected {:>5} | defects {:>4} | eff {:>5.1}% | rate {:>5.1}% | {:>5.1} pcs/h | scan {:>2}% | AI {:>5.1}% | {} | log {} (high {}, medium {})",
        status,
        snapshot.counters.inspected,
        snapshot.counters.defects,
        snapshot.stats.efficiency,
        snapshot.stats.defect_rate,
        snapshot.counters.speed,
        snapshot.scan_progress,
        snapshot.model_confidence,
        camera,
        snapshot.log_len,
        snapshot.severity.high,
        snapshot.severity.medium,
    );
    Ok(())
}
