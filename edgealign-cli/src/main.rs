use clap::Parser;
use edgealign::io::{load_gray_image, save_gray_image};
use edgealign::lowlevel::is_accepted;
use edgealign::{
    CanvasConfig, GeometrySet, GridConfig, MatchConfig, MatchResult, Matcher, ScoredTransform,
    Shape, NEIGHBORHOOD_9,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "EdgeAlign CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output (per-frame results and search spans).
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct MatchConfigJson {
    output_width: usize,
    output_height: usize,
    shrink_factor_x: f64,
    shrink_factor_y: f64,
    template_threshold: f64,
    offset_step_px: i32,
    rotation_step_deg: f64,
    offset_neighborhood: Vec<(i32, i32)>,
    parallel: bool,
}

impl Default for MatchConfigJson {
    fn default() -> Self {
        let cfg = MatchConfig::default();
        Self {
            output_width: cfg.canvas.width,
            output_height: cfg.canvas.height,
            shrink_factor_x: cfg.canvas.shrink_x,
            shrink_factor_y: cfg.canvas.shrink_y,
            template_threshold: cfg.template_threshold,
            offset_step_px: cfg.grid.offset_step_px,
            rotation_step_deg: cfg.grid.rotation_step_deg,
            offset_neighborhood: NEIGHBORHOOD_9.to_vec(),
            parallel: cfg.parallel,
        }
    }
}

impl From<MatchConfigJson> for MatchConfig {
    fn from(value: MatchConfigJson) -> Self {
        MatchConfig {
            canvas: CanvasConfig {
                width: value.output_width,
                height: value.output_height,
                shrink_x: value.shrink_factor_x,
                shrink_y: value.shrink_factor_y,
            },
            grid: GridConfig {
                offsets: value.offset_neighborhood,
                offset_step_px: value.offset_step_px,
                rotation_step_deg: value.rotation_step_deg,
            },
            template_threshold: value.template_threshold,
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    reference_path: String,
    frames: Vec<String>,
    output_path: Option<String>,
    mask_dir: Option<String>,
    topk: usize,
    #[serde(rename = "match")]
    match_cfg: MatchConfigJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference_path: String::new(),
            frames: Vec::new(),
            output_path: None,
            mask_dir: None,
            topk: 1,
            match_cfg: MatchConfigJson::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ShapeJson {
    Polygon(Vec<(f64, f64)>),
    MultiPolygon(Vec<Vec<(f64, f64)>>),
    Polyline(Vec<(f64, f64)>),
}

#[derive(Debug, Deserialize)]
struct ReferenceJson {
    shapes: Vec<ShapeJson>,
}

impl From<ReferenceJson> for GeometrySet {
    fn from(value: ReferenceJson) -> Self {
        let mut set = GeometrySet::default();
        for shape in value.shapes {
            match shape {
                ShapeJson::Polygon(ring) => set.push(Shape::polygon(ring)),
                ShapeJson::MultiPolygon(rings) => set.push(Shape::multi_polygon(rings)),
                ShapeJson::Polyline(points) => set.push(Shape::polyline(points)),
            }
        }
        set
    }
}

#[derive(Debug, Serialize)]
struct CandidateRecord {
    grid_index: usize,
    dx: i32,
    dy: i32,
    angle_deg: f64,
    score: f64,
    x: usize,
    y: usize,
}

impl From<ScoredTransform> for CandidateRecord {
    fn from(value: ScoredTransform) -> Self {
        Self {
            grid_index: value.grid_index,
            dx: value.transform.dx,
            dy: value.transform.dy,
            angle_deg: value.transform.angle_deg,
            score: value.score,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Serialize)]
struct FrameRecord {
    frame: usize,
    path: String,
    dx: i32,
    dy: i32,
    angle_deg: f64,
    offset_px: (i64, i64),
    score: f64,
    x: usize,
    y: usize,
    accepted: bool,
    topk: Vec<CandidateRecord>,
}

/// The ranked list already starts with the best-of candidate, so the frame
/// need not be searched a second time.
fn best_of_ranked(top: &[ScoredTransform], threshold: f64) -> Option<MatchResult> {
    let best = top.first()?;
    Some(MatchResult {
        transform: best.transform,
        grid_index: best.grid_index,
        score: best.score,
        location: (best.x, best.y),
        accepted: is_accepted(best.score, threshold),
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env()
                    .add_directive("edgealign=info".parse()?)
                    .add_directive("edgealign_cli=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.reference_path.is_empty() {
        return Err("reference_path must be set in the config".into());
    }
    if config.frames.is_empty() {
        return Err("frames must list at least one edge image".into());
    }
    if config.topk == 0 {
        return Err("topk must be at least 1".into());
    }

    let reference_text = fs::read_to_string(&config.reference_path)?;
    let reference: ReferenceJson = serde_json::from_str(&reference_text)?;
    let geometry = GeometrySet::from(reference);

    let matcher = Matcher::new(&geometry, config.match_cfg.into())?;
    let step = matcher.config().grid.offset_step_px;
    if let Some(dir) = &config.mask_dir {
        fs::create_dir_all(dir)?;
    }

    let mut records = Vec::with_capacity(config.frames.len());
    for (frame_idx, path) in config.frames.iter().enumerate() {
        let frame = load_gray_image(path)?;
        let (result, topk) = if config.topk > 1 {
            let top = matcher.match_frame_topk(frame.view(), config.topk)?;
            let result = best_of_ranked(&top, matcher.config().template_threshold)
                .ok_or("transform grid produced no candidates")?;
            (result, top.into_iter().map(CandidateRecord::from).collect())
        } else {
            (matcher.match_frame(frame.view())?, Vec::new())
        };

        let t = result.transform;
        info!(
            frame = frame_idx,
            score = %format!("{:.3}", result.score),
            dx = t.dx,
            dy = t.dy,
            rotation = t.angle_deg,
            "{}",
            if result.accepted { "MATCH" } else { "NO MATCH" }
        );

        if let Some(dir) = &config.mask_dir {
            let mask = matcher.render_mask(t)?;
            save_gray_image(&mask, Path::new(dir).join(format!("mask_{frame_idx:05}.png")))?;
        }

        records.push(FrameRecord {
            frame: frame_idx,
            path: path.clone(),
            dx: t.dx,
            dy: t.dy,
            angle_deg: t.angle_deg,
            offset_px: t.pixel_offset(step),
            score: result.score,
            x: result.location.0,
            y: result.location.1,
            accepted: result.accepted,
            topk,
        });
    }

    let json = serde_json::to_string_pretty(&records)?;
    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
