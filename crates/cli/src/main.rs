//! streamnet CLI - drainage network analysis over flow graphs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{json, Value};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use streamnet_algorithms::geometry::{ChiParams, SlopeParams, SnapTarget};
use streamnet_algorithms::network::{DrainageNetwork, NetworkExtraction, NetworkParams};
use streamnet_algorithms::topology::{CoordKind, OrderKind, PoiKind, PoiLocations};
use streamnet_core::{Algorithm, FlowGraph};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "streamnet")]
#[command(author, version, about = "Drainage network analysis over flow graphs", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Flow accumulation a cell must exceed to start a channel edge
    /// (0 = 0.5 % of the grid's cell count)
    #[arg(short, long, global = true, default_value = "0")]
    threshold: f64,

    /// Reference concavity for the network's chi
    #[arg(long, global = true, default_value = "0.45")]
    thetaref: f64,

    /// Write the JSON result to this file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise the channel network of a flow graph
    Info {
        /// Input flow graph (JSON)
        input: PathBuf,
    },
    /// List channel heads, confluences or outlets
    Poi {
        /// Input flow graph (JSON)
        input: PathBuf,
        /// Point kind: heads, confluences, outlets
        #[arg(short, long, default_value_t = PoiKind::Heads)]
        kind: PoiKind,
        /// Coordinates: cell, xy, ind
        #[arg(short, long, default_value_t = CoordKind::Cell)]
        coords: CoordKind,
    },
    /// Snap points onto the channel network
    Snap {
        /// Input flow graph (JSON)
        input: PathBuf,
        /// Points as 'x,y;x,y;...' in map coordinates
        #[arg(short, long)]
        points: String,
        /// Reference set: channel, heads, confluences, outlets
        #[arg(long, default_value_t = SnapTarget::Channel)]
        target: SnapTarget,
    },
    /// Chi transform of every channel cell
    Chi {
        /// Input flow graph (JSON)
        input: PathBuf,
        /// Concavity index (defaults to --thetaref)
        #[arg(long)]
        theta: Option<f64>,
        /// Reference drainage area
        #[arg(long, default_value = "1.0")]
        a0: f64,
    },
    /// Moving-window channel slope and R²
    Slope {
        /// Input flow graph (JSON)
        input: PathBuf,
        /// Cells on each side of the window centre
        #[arg(short, long, default_value = "4")]
        npoints: usize,
    },
    /// Stream segment grid
    Segments {
        /// Input flow graph (JSON)
        input: PathBuf,
    },
    /// Strahler or Shreeve stream order grid
    Order {
        /// Input flow graph (JSON)
        input: PathBuf,
        /// Ordering: strahler, shreeve
        #[arg(short, long, default_value_t = OrderKind::Strahler)]
        kind: OrderKind,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to install log subscriber")
}

fn spinner(msg: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("Invalid spinner template")?,
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    Ok(pb)
}

fn read_flow(path: &Path) -> Result<FlowGraph> {
    let pb = spinner("Reading flow graph...")?;
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let flow: FlowGraph =
        serde_json::from_reader(BufReader::new(file)).context("Failed to parse flow graph")?;
    pb.finish_and_clear();
    let (rows, cols) = flow.layout().shape();
    info!("Input: {} x {}, {} edges", cols, rows, flow.len());
    Ok(flow)
}

fn build_network(cli: &Cli, path: &Path) -> Result<DrainageNetwork> {
    let flow = read_flow(path)?;
    let params = NetworkParams {
        threshold: cli.threshold,
        thetaref: cli.thetaref,
    };
    let start = Instant::now();
    let network = NetworkExtraction
        .execute(flow, params)
        .context("Failed to extract channel network")?;
    info!(
        "Network: {} channel edges above threshold {} ({:.2?})",
        network.len(),
        network.threshold(),
        start.elapsed()
    );
    Ok(network)
}

fn write_json(value: &Value, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value).context("Failed to write output")?;
            writer.flush().context("Failed to write output")?;
            info!("Result saved to: {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            serde_json::to_writer_pretty(&mut lock, value).context("Failed to write output")?;
            writeln!(lock).context("Failed to write output")?;
        }
    }
    Ok(())
}

fn done(name: &str, elapsed: std::time::Duration) {
    info!("{} processing time: {:.2?}", name, elapsed);
}

fn parse_points(s: &str) -> Result<Vec<(f64, f64)>> {
    s.split(';')
        .filter(|pair| !pair.trim().is_empty())
        .map(|pair| {
            let parts: Vec<&str> = pair.trim().split(',').collect();
            if parts.len() != 2 {
                anyhow::bail!("Point must be 'x,y', got: {}", pair);
            }
            let x: f64 = parts[0].trim().parse().context("Invalid x")?;
            let y: f64 = parts[1].trim().parse().context("Invalid y")?;
            Ok((x, y))
        })
        .collect()
}

fn locations_json(locations: PoiLocations) -> Value {
    match locations {
        PoiLocations::Cells(cells) => json!(cells),
        PoiLocations::Xy(points) => json!(points),
        PoiLocations::Indices(indices) => json!(indices),
    }
}

fn grid_json<T: serde::Serialize>(network: &DrainageNetwork, data: Vec<T>) -> Value {
    let (rows, cols) = network.layout().shape();
    json!({
        "rows": rows,
        "cols": cols,
        "nodata": 0,
        "data": data,
    })
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;
    let output = cli.output.as_deref();

    let result = match &cli.command {
        Commands::Info { input } => {
            let network = build_network(&cli, input)?;
            let layout = network.layout();
            let (rows, cols) = layout.shape();
            let max_of = |values: &[f64]| values.iter().copied().fold(0.0, f64::max);
            json!({
                "rows": rows,
                "cols": cols,
                "cell_size": layout.cell_size(),
                "crs": layout.crs.as_ref().map(|crs| crs.identifier()),
                "threshold": network.threshold(),
                "thetaref": network.thetaref(),
                "edges": network.len(),
                "heads": network.stream_poi(PoiKind::Heads).len(),
                "confluences": network.stream_poi(PoiKind::Confluences).len(),
                "outlets": network.stream_poi(PoiKind::Outlets).len(),
                "max_distance": max_of(network.distance_to_outlet()),
                "max_chi": max_of(network.chi()),
            })
        }

        Commands::Poi {
            input,
            kind,
            coords,
        } => {
            let network = build_network(&cli, input)?;
            let locations = network.stream_poi_as(*kind, *coords);
            info!("{} {}", locations.len(), kind);
            json!({
                "kind": kind.to_string(),
                "coords": coords.to_string(),
                "locations": locations_json(locations),
            })
        }

        Commands::Snap {
            input,
            points,
            target,
        } => {
            let points = parse_points(points)?;
            if points.is_empty() {
                anyhow::bail!("At least one point is required");
            }
            let network = build_network(&cli, input)?;
            let start = Instant::now();
            let snapped = network
                .snap_points(&points, *target)
                .context("Failed to snap points")?;
            done("Snapping", start.elapsed());
            json!({
                "target": target.to_string(),
                "points": snapped,
            })
        }

        Commands::Chi { input, theta, a0 } => {
            let network = build_network(&cli, input)?;
            let params = ChiParams {
                thetaref: theta.unwrap_or(cli.thetaref),
                a0: *a0,
            };
            let start = Instant::now();
            let chi = network
                .compute_chi(params)
                .context("Failed to compute chi")?;
            done("Chi", start.elapsed());
            json!({
                "thetaref": params.thetaref,
                "a0": params.a0,
                "cells": network.givers(),
                "chi": chi,
            })
        }

        Commands::Slope { input, npoints } => {
            let network = build_network(&cli, input)?;
            let start = Instant::now();
            let result = network
                .channel_slope(SlopeParams { npoints: *npoints })
                .context("Failed to estimate channel slope")?;
            done("Channel slope", start.elapsed());
            json!({
                "npoints": npoints,
                "skipped_heads": result.skipped_heads,
                "cells": network.givers(),
                "slope": result.slopes(),
                "r2": result.r2(),
            })
        }

        Commands::Segments { input } => {
            let network = build_network(&cli, input)?;
            let start = Instant::now();
            let ids = network.segment_ids();
            done("Stream segments", start.elapsed());
            grid_json(&network, ids)
        }

        Commands::Order { input, kind } => {
            let network = build_network(&cli, input)?;
            let start = Instant::now();
            let order = network.order_values(*kind);
            done("Stream order", start.elapsed());
            let mut value = grid_json(&network, order);
            value["kind"] = json!(kind.to_string());
            value
        }
    };

    write_json(&result, output)
}
