use clap::Parser;
use faceboxes::io::scale_for_image_file;
use faceboxes::{
    scores_from_two_class, Anchor, Detection, DetectionPipeline, ImageSize, Offset,
    PipelineConfig, ResizePolicy, Variance,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "FaceBoxes post-processing CLI (JSON config driven)")]
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
    /// Enable tracing output for the pipeline stages.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct PipelineConfigJson {
    confidence_threshold: f32,
    iou_threshold: f32,
    top_k: usize,
    keep_top_k: usize,
    variance: [f32; 2],
    parallel: bool,
}

impl Default for PipelineConfigJson {
    fn default() -> Self {
        let cfg = PipelineConfig::default();
        Self {
            confidence_threshold: cfg.confidence_threshold,
            iou_threshold: cfg.iou_threshold,
            top_k: cfg.top_k,
            keep_top_k: cfg.keep_top_k,
            variance: [cfg.variance.center, cfg.variance.size],
            parallel: cfg.parallel,
        }
    }
}

impl From<PipelineConfigJson> for PipelineConfig {
    fn from(value: PipelineConfigJson) -> Self {
        Self {
            confidence_threshold: value.confidence_threshold,
            iou_threshold: value.iou_threshold,
            top_k: value.top_k,
            keep_top_k: value.keep_top_k,
            variance: Variance {
                center: value.variance[0],
                size: value.variance[1],
            },
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ResizePolicyJson {
    target_min_side: f64,
}

impl Default for ResizePolicyJson {
    fn default() -> Self {
        Self {
            target_min_side: ResizePolicy::default().target_min_side,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    input_path: String,
    output_path: Option<String>,
    pipeline: PipelineConfigJson,
    resize: ResizePolicyJson,
}

/// Raw detector output dumped next to the inference step.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DetectorOutput {
    anchors: Vec<[f32; 4]>,
    offsets: Vec<[f32; 4]>,
    /// Foreground scores, one per anchor.
    scores: Option<Vec<f32>>,
    /// Two-class `[background, face]` rows, used when `scores` is absent.
    conf: Option<Vec<[f32; 2]>>,
    resized_width: Option<usize>,
    resized_height: Option<usize>,
    scale: Option<f64>,
    original_width: Option<usize>,
    original_height: Option<usize>,
    /// Original image; only its header is read, to pick the scale.
    image_path: Option<String>,
}

#[derive(Debug, Serialize)]
struct DetectionRecord {
    label: &'static str,
    score: f32,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl From<Detection> for DetectionRecord {
    fn from(value: Detection) -> Self {
        Self {
            label: value.label(),
            score: value.score,
            x: value.x,
            y: value.y,
            width: value.width,
            height: value.height,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    scale: f64,
    detections: Vec<DetectionRecord>,
}

/// Works out `(scale, resized size)` from whatever geometry the dump carries.
///
/// An explicit scale wins, then original dimensions, then the image header.
fn resolve_geometry(
    input: &DetectorOutput,
    policy: &ResizePolicy,
) -> Result<(f64, ImageSize), Box<dyn std::error::Error>> {
    policy.validate()?;
    let explicit_size = match (input.resized_width, input.resized_height) {
        (Some(w), Some(h)) => Some(ImageSize::new(w, h)),
        (None, None) => None,
        _ => return Err("resized_width and resized_height must be set together".into()),
    };

    let (scale, derived_size) = if let Some(scale) = input.scale {
        (scale, None)
    } else if let (Some(w), Some(h)) = (input.original_width, input.original_height) {
        (policy.scale_for(h, w), Some(policy.resized_size(h, w)))
    } else if let Some(path) = &input.image_path {
        let (scale, size) = scale_for_image_file(path, policy)?;
        (scale, Some(size))
    } else {
        return Err("input needs scale, original_width/original_height, or image_path".into());
    };

    let size = explicit_size
        .or(derived_size)
        .ok_or("resized_width and resized_height are required with an explicit scale")?;
    Ok((scale, size))
}

fn resolve_scores(input: &DetectorOutput) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
    match (&input.scores, &input.conf) {
        (Some(scores), _) => Ok(scores.clone()),
        (None, Some(conf)) => {
            let flat: Vec<f32> = conf.iter().flatten().copied().collect();
            Ok(scores_from_two_class(&flat)?)
        }
        (None, None) => Err("input needs scores or conf".into()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("faceboxes=debug".parse()?),
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
    if config.input_path.is_empty() {
        return Err("input_path must be set in the config".into());
    }

    let input_text = fs::read_to_string(&config.input_path)?;
    let input: DetectorOutput = serde_json::from_str(&input_text)?;

    let policy = ResizePolicy {
        target_min_side: config.resize.target_min_side,
    };
    let (scale, size) = resolve_geometry(&input, &policy)?;
    let scores = resolve_scores(&input)?;
    let anchors: Vec<Anchor> = input.anchors.iter().copied().map(Anchor::from).collect();
    let offsets: Vec<Offset> = input.offsets.iter().copied().map(Offset::from).collect();

    let pipeline = DetectionPipeline::new().with_config(config.pipeline.into());
    let result = pipeline.detect(&anchors, &offsets, &scores, size, scale)?;
    tracing::info!(
        detections = result.len(),
        scale = result.scale,
        "post-processing finished"
    );

    let output = Output {
        scale: result.scale,
        detections: result
            .detections
            .into_iter()
            .map(DetectionRecord::from)
            .collect(),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
