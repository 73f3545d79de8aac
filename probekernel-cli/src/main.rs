use clap::Parser;
use probekernel::io::{load_probe_image, save_kernel_png};
use probekernel::{KernelArgs, KernelMode, Metadata, ParamValue, Probe};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Probe kernel builder (JSON config driven)")]
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
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

/// Keyword parameters; only the keys present in the file are forwarded.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ParamsJson {
    center: Option<[f64; 2]>,
    sigma: Option<f64>,
    radii: Option<[f64; 2]>,
    bilinear: Option<bool>,
}

impl ParamsJson {
    fn to_args(&self) -> KernelArgs {
        let mut args = KernelArgs::new();
        if let Some([x, y]) = self.center {
            args.insert("center".into(), ParamValue::Pair(x, y));
        }
        if let Some(sigma) = self.sigma {
            args.insert("sigma".into(), ParamValue::Float(sigma));
        }
        if let Some([ri, ro]) = self.radii {
            args.insert("radii".into(), ParamValue::Pair(ri, ro));
        }
        if let Some(bilinear) = self.bilinear {
            args.insert("bilinear".into(), ParamValue::Bool(bilinear));
        }
        args
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    probe_path: String,
    output_path: Option<String>,
    metadata_path: Option<String>,
    mode: KernelMode,
    params: ParamsJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe_path: String::new(),
            output_path: None,
            metadata_path: None,
            mode: KernelMode::Flat,
            params: ParamsJson::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct KernelSummary {
    width: usize,
    height: usize,
    sum: f64,
    min: f64,
    max: f64,
}

#[derive(Debug, Serialize)]
struct Output<'a> {
    kernel: KernelSummary,
    metadata: Option<&'a Metadata>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("probekernel=debug".parse()?),
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
    if config.probe_path.is_empty() {
        return Err("probe_path must be set in the config".into());
    }

    let mut probe = Probe::new(load_probe_image(&config.probe_path)?);
    let kernel = probe
        .get_kernel(config.mode.as_str(), &config.params.to_args(), true)?
        .ok_or("kernel was not returned")?;
    tracing::info!(
        mode = config.mode.as_str(),
        width = kernel.width(),
        height = kernel.height(),
        "kernel built"
    );

    if let Some(path) = &config.output_path {
        save_kernel_png(&kernel, path)?;
        tracing::info!(path = path.as_str(), "kernel image written");
    }

    let (min, max) = kernel
        .data()
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let output = Output {
        kernel: KernelSummary {
            width: kernel.width(),
            height: kernel.height(),
            sum: kernel.sum(),
            min,
            max,
        },
        metadata: probe.kernel_metadata(),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.metadata_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
