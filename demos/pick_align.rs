//! Pick alignment demo
//!
//! Replays a sequence of snapped picks through the alignment tool, the way a
//! host viewer would forward clicks, and prints the transform written to the
//! transforming object.
//!
//! Picks come from a text file with one `object x y z` line per click, or
//! from a built-in scenario for the selected mode.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use pickalign_core::{ObjectId, ObjectTransforms, PickResult, Point3d};
use pickalign_tool::{
    init_logging, AlignConfig, AlignmentMode, AlignmentTool, MarkerLayer, MouseButton,
    PickAlignTool, SceneTransforms,
};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Rotation,
    Translation,
}

impl From<Mode> for AlignmentMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Rotation => AlignmentMode::Rotation,
            Mode::Translation => AlignmentMode::Translation,
        }
    }
}

#[derive(Parser)]
#[command(name = "pick_align")]
#[command(about = "Align two objects from picked landmark points")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the mode from the configuration
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Pick script with one `object x y z` line per click
    #[arg(short, long)]
    picks: Option<PathBuf>,
}

fn parse_picks(content: &str) -> Result<Vec<PickResult>> {
    let mut picks = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 4 {
            bail!("line {}: expected `object x y z`, got {:?}", line_no + 1, line);
        }
        let object: u32 = fields[0]
            .parse()
            .with_context(|| format!("line {}: bad object id", line_no + 1))?;
        let mut coords = [0.0f64; 3];
        for (slot, field) in coords.iter_mut().zip(&fields[1..]) {
            *slot = field
                .parse()
                .with_context(|| format!("line {}: bad coordinate {:?}", line_no + 1, field))?;
        }
        picks.push(PickResult::new(object, Point3d::from(coords)));
    }
    Ok(picks)
}

fn builtin_picks(mode: AlignmentMode) -> Vec<PickResult> {
    match mode {
        AlignmentMode::Rotation => vec![
            PickResult::new(1, Point3d::new(0.0, 0.0, 0.0)),
            PickResult::new(1, Point3d::new(1.0, 0.0, 0.0)),
            PickResult::new(1, Point3d::new(0.0, 1.0, 0.0)),
            PickResult::new(2, Point3d::new(5.0, 5.0, 5.0)),
            PickResult::new(2, Point3d::new(5.0, 6.0, 5.0)),
            PickResult::new(2, Point3d::new(5.0, 5.0, 6.0)),
        ],
        AlignmentMode::Translation => vec![
            PickResult::new(1, Point3d::new(0.0, 0.0, 0.0)),
            PickResult::new(2, Point3d::new(1.0, 2.0, 3.0)),
        ],
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AlignConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => AlignConfig::default(),
    };
    if let Some(mode) = cli.mode {
        config.mode = mode.into();
    }
    init_logging(&config.logging)?;

    let picks = match &cli.picks {
        Some(path) => parse_picks(&fs::read_to_string(path)?)?,
        None => builtin_picks(config.mode),
    };

    let mut tool = PickAlignTool::new(&config, SceneTransforms::new(), MarkerLayer::new());
    tool.register();
    tool.activate();

    println!("Pick alignment ({:?} mode, tool '{}')", config.mode, tool.names()[0]);
    println!("=========================================");

    let mut aligned: Option<ObjectId> = None;
    for pick in picks {
        let transforming = tool.session().transforming_object_id().unwrap_or(pick.object_id);
        match tool.handle_single_click(MouseButton::Primary, &Some(pick)) {
            Ok(true) => {
                aligned = Some(transforming);
                println!("pick on object {} resolved the alignment", pick.object_id);
            }
            Ok(false) => println!(
                "pick on object {} at {:?} accepted ({} buffered)",
                pick.object_id,
                pick.point.coords.as_slice(),
                tool.session().buffer().total_count()
            ),
            Err(err) if !err.is_fatal() => println!("re-pick needed: {}", err),
            Err(err) => {
                tool.deregister();
                return Err(err.into());
            }
        }
    }

    match aligned {
        Some(object) => {
            let transform = tool
                .session()
                .transforms()
                .transform(object)
                .context("aligned object has no transform")?;
            println!("\nTransform applied to object {}:{}", object, transform.matrix);
        }
        None => {
            tracing::warn!(
                buffered = tool.session().buffer().total_count(),
                "picks ran out before the alignment resolved"
            );
            println!("\nNot enough picks to resolve an alignment");
        }
    }

    tool.deregister();
    Ok(())
}
