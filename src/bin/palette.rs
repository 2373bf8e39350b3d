use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use image::GenericImageView;
use image_to_palette_wasm::{
    EmptyClusterPolicy, PaletteOptions, extract_palette, prepare_image, render_preview,
};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EmptyCluster {
    /// Reset empty clusters to neutral gray
    Gray,
    /// Keep the previous centroid
    Retain,
}

impl From<EmptyCluster> for EmptyClusterPolicy {
    fn from(v: EmptyCluster) -> Self {
        match v {
            EmptyCluster::Gray => EmptyClusterPolicy::Gray,
            EmptyCluster::Retain => EmptyClusterPolicy::Retain,
        }
    }
}

/// Extract dominant color palettes from images.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Number of palette colors
    #[arg(short = 'k', long, default_value_t = 5)]
    colors: usize,

    /// Maximum number of sampled pixels
    #[arg(long, default_value_t = 12_000)]
    max_samples: usize,

    /// Fixed number of k-means iterations
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Longest side of the working image
    #[arg(long, default_value_t = 600)]
    max_side: u32,

    /// Seed for reproducible palettes
    #[arg(long)]
    seed: Option<u64>,

    /// What to do with clusters that receive no pixels
    #[arg(long, value_enum, default_value_t = EmptyCluster::Gray)]
    empty_cluster: EmptyCluster,

    /// Write a palette-mapped preview PNG per input into this directory
    #[arg(short = 'd', long)]
    preview_dir: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let options = PaletteOptions {
        colors: args.colors,
        max_samples: args.max_samples,
        iterations: args.iterations,
        max_side: args.max_side,
        empty_cluster: args.empty_cluster.into(),
        seed: args.seed,
    };
    options.validate().context("invalid palette options")?;

    let mut results = Vec::with_capacity(args.inputs.len());
    for input in &args.inputs {
        let img = image::open(input)
            .with_context(|| format!("unable to open {}", input.display()))?;
        let (width, height) = img.dimensions();
        let working = prepare_image(&img, options.max_side);
        let (w, h) = working.dimensions();

        let palette = extract_palette(working.as_raw(), w, h, &options)
            .with_context(|| format!("palette extraction failed for {}", input.display()))?;

        if let Some(dir) = &args.preview_dir {
            fs::create_dir_all(dir)
                .with_context(|| format!("unable to create {}", dir.display()))?;
            let stem = input.file_stem().unwrap_or_default().to_string_lossy();
            let out_path = dir.join(format!("{stem}_palette.png"));
            render_preview(&working, &palette)
                .save(&out_path)
                .with_context(|| format!("unable to write {}", out_path.display()))?;
            info!(path = %out_path.display(), "saved preview");
        }

        let colors: Vec<_> = palette
            .iter()
            .map(|c| json!({ "hex": c.hex, "rgb": c.channels() }))
            .collect();
        results.push(json!({
            "file": input.display().to_string(),
            "width": width,
            "height": height,
            "palette": colors,
        }));
    }

    let doc = serde_json::Value::Array(results);
    let text = if args.pretty {
        serde_json::to_string_pretty(&doc)?
    } else {
        serde_json::to_string(&doc)?
    };
    println!("{text}");

    Ok(())
}
