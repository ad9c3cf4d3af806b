use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use planimetry::diagram::{Derived, Diagram, DiagramKind, Session, TimedEvent, Update};
use planimetry::geom2::{intersect_eps, Line, Point};
use planimetry::points::ControlPointSet;
use planimetry::scene::{self, Scene};
use planimetry::view::{Transform, Viewport};
use planimetry::DiagramCfg;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

#[derive(Parser)]
#[command(name = "planimetry")]
#[command(about = "Plane-geometry diagrams: derive, intersect, replay sessions")]
struct Cmd {
    /// JSON file with `DiagramCfg` overrides; missing fields keep defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log drag, snap and timer decisions
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print the derived geometry of a diagram as JSON
    Derive {
        #[arg(long, default_value = "triangle")]
        kind: DiagramKind,
        /// Control point `x,y` (repeat; defaults when omitted)
        #[arg(long = "point", allow_hyphen_values = true, value_parser = parse_point)]
        points: Vec<Point>,
        #[arg(long, default_value_t = 600.0)]
        width: f64,
        #[arg(long, default_value_t = 600.0)]
        height: f64,
        /// Include the device-space display list
        #[arg(long)]
        scene: bool,
    },
    /// Intersect the line through the first two points with the line through the last two
    Intersect {
        #[arg(num_args = 4, required = true, allow_hyphen_values = true, value_parser = parse_point)]
        points: Vec<Point>,
    },
    /// Replay a scripted session and write the final state as JSON
    Replay {
        #[arg(long)]
        script: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Include the final display list in the output
        #[arg(long)]
        scene: bool,
    },
    /// Print version, commit and effective configuration
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    let cfg = load_cfg(cmd.config.as_deref())?;
    match cmd.action {
        Action::Derive {
            kind,
            points,
            width,
            height,
            scene,
        } => derive(kind, points, width, height, scene, &cfg),
        Action::Intersect { points } => intersect(&points, &cfg),
        Action::Replay { script, out, scene } => {
            replay(&script, &out, scene, &cfg, cmd.config.as_deref()).map(|_| ())
        }
        Action::Report => report(&cfg),
    }
}

/// `"x,y"` → point.
fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("bad coordinate `{v}` in `{s}`: {e}"))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}

fn load_cfg(path: Option<&Path>) -> Result<DiagramCfg> {
    let cfg = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => DiagramCfg::default(),
    };
    cfg.validate().context("invalid configuration")?;
    Ok(cfg)
}

#[derive(Serialize)]
struct DeriveOut {
    diagram: Diagram,
    derived: Derived,
    messages: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scene: Option<Scene>,
}

fn derive(
    kind: DiagramKind,
    points: Vec<Point>,
    width: f64,
    height: f64,
    with_scene: bool,
    cfg: &DiagramCfg,
) -> Result<()> {
    let diagram = if points.is_empty() {
        Diagram::open(kind)
    } else {
        Diagram::new(kind, ControlPointSet::new(points))?
    };
    let tf = Transform::from_raw(width, height, cfg.initial_scale)?;
    let derived = diagram.derive(&cfg.triangle_cfg(tf.scale));
    tracing::info!(%kind, "derive");
    let out = DeriveOut {
        messages: diagram.messages(&derived),
        scene: with_scene.then(|| scene::build(&diagram, &derived, &tf, cfg)),
        diagram,
        derived,
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn intersect(points: &[Point], cfg: &DiagramCfg) -> Result<()> {
    let [a, b, c, d] = points else {
        bail!("intersect takes exactly four points, got {}", points.len());
    };
    let hit = intersect_eps(&Line::new(*a, *b), &Line::new(*c, *d), cfg.geom);
    println!("{}", planimetry::diagram::intersection_message(hit));
    Ok(())
}

/// A scripted session: the diagram to open and the timestamped inputs.
#[derive(Deserialize)]
struct Script {
    kind: DiagramKind,
    viewport: Viewport,
    /// Starting control points; the kind's defaults when absent.
    #[serde(default)]
    points: Option<ControlPointSet>,
    events: Vec<TimedEvent>,
}

#[derive(Serialize)]
struct ReplayOut {
    diagram: Diagram,
    transform: Transform,
    derived: Derived,
    messages: Vec<String>,
    updates: Vec<Update>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scene: Option<Scene>,
}

fn replay(
    script_path: &Path,
    out: &Path,
    with_scene: bool,
    cfg: &DiagramCfg,
    config_path: Option<&Path>,
) -> Result<PathBuf> {
    let text = std::fs::read_to_string(script_path)
        .with_context(|| format!("reading script {}", script_path.display()))?;
    let script: Script = serde_json::from_str(&text)
        .with_context(|| format!("parsing script {}", script_path.display()))?;
    tracing::info!(
        kind = %script.kind,
        events = script.events.len(),
        script = %script_path.display(),
        "replay"
    );

    let diagram = match script.points {
        Some(points) => Diagram::new(script.kind, points)?,
        None => Diagram::open(script.kind),
    };
    let mut session = Session::with_diagram(diagram, script.viewport, *cfg)?;
    let updates = session.replay(&script.events);

    let derived = session.derived();
    let result = ReplayOut {
        diagram: session.diagram().clone(),
        transform: session.transform(),
        messages: session.diagram().messages(&derived),
        scene: with_scene
            .then(|| scene::build(session.diagram(), &derived, &session.transform(), cfg)),
        derived,
        updates,
    };

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(&result)?)
        .with_context(|| format!("writing {}", out.display()))?;

    let payload = provenance::Payload::new(
        serde_json::json!({
            "script": script_path.to_string_lossy(),
            "config": config_path.map(|p| p.to_string_lossy().into_owned()),
            "kind": script.kind,
            "events": script.events.len(),
            "scene": with_scene,
        }),
        serde_json::to_value(cfg)?,
    );
    let prov = provenance::write_sidecar(out, payload)?;
    tracing::info!(out = %out.display(), provenance = %prov.display(), "replay written");
    Ok(prov)
}

fn report(cfg: &DiagramCfg) -> Result<()> {
    let obj = serde_json::json!({
        "tool": "planimetry",
        "version": planimetry::VERSION,
        "code_rev": provenance::current_git_rev(),
        "kinds": DiagramKind::ALL,
        "config": cfg,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
