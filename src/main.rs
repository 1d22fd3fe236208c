use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};
use std::{fs, thread};

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use concept_atlas::graph::{GraphStore, LayoutSnapshot, ingest};
use concept_atlas::physics::{PhysicsParams, recenter, step_layout};
use concept_atlas::search::search_nodes;
use concept_atlas::selection::{SelectionState, neighbor_list};
use concept_atlas::source::{UpdateChecker, load_link_rows, load_node_rows};
use concept_atlas::view::render_view;

const SAVE_INTERVAL: Duration = Duration::from_secs(1);
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const UPDATE_CHECK_TICKS: u64 = 120;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long)]
    nodes: PathBuf,

    #[arg(long)]
    links: PathBuf,

    #[arg(long, default_value = "layout.json")]
    snapshot: PathBuf,

    #[arg(long, default_value_t = 600)]
    ticks: u64,

    #[arg(long, default_value_t = 0.5)]
    cohesion: f32,

    #[arg(long)]
    select: Option<String>,

    #[arg(long)]
    recenter: bool,

    #[arg(long)]
    reset_layout: bool,

    #[arg(long)]
    watch: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if args.reset_layout && fs::remove_file(&args.snapshot).is_ok() {
        info!(snapshot = %args.snapshot.display(), "cleared saved layout");
    }

    let mut store = GraphStore::default();
    let mut snapshot = LayoutSnapshot::load(&args.snapshot);
    reload(&mut store, &args, &snapshot)?;

    let mut selection = SelectionState::default();
    if let Some(target) = &args.select {
        apply_selection(&store, &mut selection, target);
    }

    run_simulation(&mut store, &mut snapshot, &args);

    if args.recenter {
        recenter(&mut store);
        info!("recentered layout on the graph centroid");
    }

    snapshot = LayoutSnapshot::capture(&store);
    snapshot.save(&args.snapshot)?;

    let view = render_view(&store, &selection);
    let emphasized = view.nodes.iter().filter(|node| node.emphasized).count();
    info!(
        nodes = view.nodes.len(),
        links = view.links.len(),
        emphasized,
        snapshot = %args.snapshot.display(),
        "layout complete"
    );

    Ok(())
}

fn reload(store: &mut GraphStore, args: &Args, snapshot: &LayoutSnapshot) -> Result<()> {
    let node_rows = load_node_rows(&args.nodes)?;
    let link_rows = load_link_rows(&args.links)?;
    ingest(store, &node_rows, &link_rows, snapshot);
    info!(
        nodes = store.node_count(),
        links = store.link_count(),
        "graph ingested"
    );
    Ok(())
}

fn apply_selection(store: &GraphStore, selection: &mut SelectionState, target: &str) {
    let resolved = if store.contains(target) {
        Some(target.to_string())
    } else {
        search_nodes(store, target, 1).into_iter().next()
    };

    let Some(id) = resolved else {
        warn!(target = %target, "no node matches selection target");
        return;
    };

    selection.select(store, Some(&id));
    let neighbors = neighbor_list(store, &id);
    info!(id = %id, neighbors = ?neighbors, "selected node");
}

fn run_simulation(store: &mut GraphStore, snapshot: &mut LayoutSnapshot, args: &Args) {
    let params = PhysicsParams::default();
    let mut checker = UpdateChecker::default();
    checker.observe(&source_stamp(args));

    let mut last_save = Instant::now();
    let mut tick = 0u64;

    loop {
        if !args.watch && tick >= args.ticks {
            return;
        }

        step_layout(store, params, args.cohesion);
        tick += 1;

        if last_save.elapsed() >= SAVE_INTERVAL {
            *snapshot = LayoutSnapshot::capture(store);
            if let Err(error) = snapshot.save(&args.snapshot) {
                warn!(%error, "failed to save layout snapshot");
            }
            last_save = Instant::now();
        }

        if args.watch {
            if tick % UPDATE_CHECK_TICKS == 0 && checker.observe(&source_stamp(args)) {
                info!("row files changed, reloading graph");
                *snapshot = LayoutSnapshot::capture(store);
                if let Err(error) = reload(store, args, snapshot) {
                    warn!(%error, "reload failed, keeping current graph");
                }
            }
            thread::sleep(FRAME_INTERVAL);
        }
    }
}

fn source_stamp(args: &Args) -> String {
    format!(
        "{:?} {:?}",
        file_stamp(&args.nodes),
        file_stamp(&args.links)
    )
}

fn file_stamp(path: &Path) -> Option<SystemTime> {
    fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .ok()
}
