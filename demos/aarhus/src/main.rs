//! aarhus: runs the street-lamp fleet simulator over a small harbour-front
//! lamp layout.
//!
//! Ticks come either from a JSON-lines file (`--ticks`, one
//! `{"timestamp": …, "active": [ids…]}` per line) or, without one, from a
//! seeded random motion generator.  Levels and per-tick cost rows are written
//! as CSV to `--out`.

mod jsonl;
mod progress;


use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use sl_core::{LampId, SimConfig};
use sl_output::{CsvWriter, SimOutputObserver};
use sl_sim::{LEVEL_TOPIC, MOTION_TOPIC, RandomMotionSource, Sim, SimObserver, TickSource};
use sl_topology::{NeighborGraph, centroid, load_lamps_csv};

use jsonl::JsonLinesSource;
use progress::ProgressObserver;

// ── Defaults for the synthetic run ────────────────────────────────────────────

const SEED:              u64 = 42;
const START_UNIX_SECS:   i64 = 1_699_030_800; // 2023-11-03 17:00 UTC
const TICK_SECS:         i64 = 60;
const MOTION_PROBABILITY: f64 = 0.02;

#[derive(Parser, Debug)]
#[command(name = "aarhus", about = "Street-lamp fleet simulation")]
struct Args {
    /// TOML configuration; defaults apply to anything left out.
    #[arg(long, default_value = "demos/aarhus/data/config.toml")]
    config: PathBuf,

    /// Lamp positions, `id,lat,lon` CSV.
    #[arg(long, default_value = "demos/aarhus/data/lamps.csv")]
    lamps: PathBuf,

    /// JSON-lines tick file.  Random motion is generated when absent.
    #[arg(long)]
    ticks: Option<PathBuf>,

    /// Number of random ticks to generate.
    #[arg(long, default_value_t = 14 * 60)]
    random_ticks: u64,

    /// Stop after this many ticks regardless of the source.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    max_ticks: Option<u64>,

    /// Output directory for CSV files.
    #[arg(long, default_value = "output/aarhus")]
    out: PathBuf,

    /// Log a progress line every N ticks.
    #[arg(long, default_value_t = 60)]
    log_every: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aarhus=info,sl_topology=info,sl_sim=warn".into()),
        )
        .init();

    let args = Args::parse();

    // 1. Configuration.
    let config = SimConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    info!(?config, "configuration loaded");

    // 2. Topology.
    let records = load_lamps_csv(&args.lamps)
        .with_context(|| format!("loading {}", args.lamps.display()))?;
    if let Some(center) = centroid(&records) {
        info!(lamps = records.len(), %center, "lamp layout");
    }
    let graph = NeighborGraph::from_records(&records, config.network.range_km)?;
    let isolated = graph.indices().filter(|&i| graph.degree(i) == 0).count();
    if isolated > 0 {
        warn!(isolated, "lamps with no neighbor in range");
    }
    let lamp_ids: Vec<LampId> = graph.lamp_ids.clone();

    // 3. Engine.
    let mut sim = Sim::with_controller(config, graph)?;

    // 4. Output.
    std::fs::create_dir_all(&args.out)?;
    let writer = CsvWriter::new(&args.out)?;
    let stop = Arc::new(AtomicBool::new(false));
    spawn_interrupt_listener(Arc::clone(&stop))?;
    let mut obs = ProgressObserver::new(
        SimOutputObserver::new(writer),
        args.log_every,
        args.max_ticks,
        Arc::clone(&stop),
    );

    // 5. Run.
    let t0 = Instant::now();
    match &args.ticks {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            info!(topic = MOTION_TOPIC, path = %path.display(), "replaying motion ticks");
            let mut source = JsonLinesSource::new(BufReader::new(file));
            run(&mut sim, &mut source, &mut obs, &stop)?;
            if source.dropped() > 0 {
                warn!(dropped = source.dropped(), "ticks dropped by the source");
            }
        }
        None => {
            let mut source = RandomMotionSource::new(
                SEED,
                lamp_ids,
                MOTION_PROBABILITY,
                START_UNIX_SECS,
                TICK_SECS,
                args.random_ticks,
            );
            info!(topic = MOTION_TOPIC, ticks = args.random_ticks, "generating random motion");
            run(&mut sim, &mut source, &mut obs, &stop)?;
        }
    }
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Summary.
    let counters = sim.counters();
    let stopped = if stop.load(Ordering::Relaxed) { " (stopped early)" } else { "" };
    println!("Simulation complete in {:.3} s{stopped}", elapsed.as_secs_f64());
    println!("  ticks processed   : {}", counters.ticks_processed);
    println!("  messages sent     : {}", counters.messages_sent);
    println!("  messages received : {}", counters.messages_received);
    println!("  unknown lamp ids  : {}", counters.unknown_ids);
    println!();

    if let Some(last) = &obs.last {
        println!("Last {LEVEL_TOPIC} snapshot (tick {}):", last.tick);
        println!("{}", serde_json::to_string(last)?);
    }

    Ok(())
}

fn run<S: TickSource, O: SimObserver>(
    sim:      &mut Sim<sl_control::LightController>,
    source:   &mut S,
    observer: &mut O,
    stop:     &AtomicBool,
) -> Result<()> {
    sim.run(source, observer, stop)?;
    Ok(())
}

/// Set `stop` on Ctrl-C so the run ends after the tick in flight and the
/// output files and summary are still written.
fn spawn_interrupt_listener(stop: Arc<AtomicBool>) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building signal runtime")?;
    std::thread::Builder::new()
        .name("interrupt".into())
        .spawn(move || {
            runtime.block_on(async {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        info!("interrupt received, stopping after the current tick");
                        stop.store(true, Ordering::Relaxed);
                    }
                    Err(e) => warn!(error = %e, "failed to listen for ctrl_c"),
                }
            });
        })
        .context("spawning interrupt listener")?;
    Ok(())
}
