//! CIVIA CLI

use anyhow::{Context, Result};
use civia_core::{AxisSpec, IsoLevelSpec, ModelParameters};
use civia_field::CUSTOM_PARAMS_LABEL;
use civia_model::Preset;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "civia")]
#[command(about = "CIVIA - propofol/sevoflurane/remifentanil interaction surface")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

/// Parameter selection shared by every evaluating subcommand.
#[derive(Args)]
struct ParamsArgs {
    /// Named parameter preset
    #[arg(long, default_value = "reference", conflicts_with = "params")]
    preset: String,

    /// Custom parameter record (JSON: {"c50": [..], "gamma": .., "gamma0": ..})
    #[arg(long)]
    params: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate P and eMAC at one concentration triple
    Point {
        /// Propofol effect-site concentration (µg/mL)
        #[arg(long, allow_negative_numbers = true)]
        prop: f64,

        /// End-tidal sevoflurane (%)
        #[arg(long, allow_negative_numbers = true)]
        sevo: f64,

        /// Remifentanil effect-site concentration (ng/mL)
        #[arg(long, allow_negative_numbers = true)]
        remi: f64,

        #[command(flatten)]
        params: ParamsArgs,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Sample P over a 3D grid and select iso-probability bands
    Field {
        /// Propofol range MIN:MAX (µg/mL)
        #[arg(long, default_value = "0:6", value_parser = parse_range)]
        prop_range: (f64, f64),

        /// Sevoflurane range MIN:MAX (%)
        #[arg(long, default_value = "0:3", value_parser = parse_range)]
        sevo_range: (f64, f64),

        /// Remifentanil range MIN:MAX (ng/mL)
        #[arg(long, default_value = "0:4", value_parser = parse_range)]
        remi_range: (f64, f64),

        /// Samples per axis (applies to all three axes)
        #[arg(long, default_value = "60", conflicts_with = "resolutions")]
        resolution: usize,

        /// Samples per axis, comma separated (PROP,SEVO,REMI)
        #[arg(long, value_delimiter = ',')]
        resolutions: Option<Vec<usize>>,

        /// Iso-level band NAME=TARGET:HALF_WIDTH (repeatable). Defaults to
        /// loss_of_response=0.5:0.01 and high_probability=0.95:0.01.
        #[arg(long = "iso", value_parser = parse_iso)]
        iso: Vec<IsoLevelSpec>,

        /// Query point PROP,SEVO,REMI to annotate inside the field
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        point: Option<Vec<f64>>,

        #[command(flatten)]
        params: ParamsArgs,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Threads (0 = auto).
        #[arg(long, default_value = "0")]
        threads: usize,
    },

    /// List the built-in parameter presets
    Presets {
        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the JSON result.
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Point { prop, sevo, remi, params, output } => {
            cmd_point([prop, sevo, remi], &params, output.as_ref())
        }
        Commands::Field {
            prop_range,
            sevo_range,
            remi_range,
            resolution,
            resolutions,
            iso,
            point,
            params,
            output,
            threads,
        } => {
            let resolutions = match resolutions {
                Some(r) => triple(&r, "--resolutions")?,
                None => [resolution; 3],
            };
            let point = point.map(|p| triple(&p, "--point")).transpose()?;
            cmd_field(
                [prop_range, sevo_range, remi_range],
                resolutions,
                iso,
                point,
                &params,
                output.as_ref(),
                threads,
            )
        }
        Commands::Presets { output } => cmd_presets(output.as_ref()),
        Commands::Version => {
            println!("civia {}", civia_core::VERSION);
            Ok(())
        }
    }
}

fn cmd_point(
    concentration: [f64; 3],
    params: &ParamsArgs,
    output: Option<&PathBuf>,
) -> Result<()> {
    let (name, params) = resolve_params(params)?;
    let artifact = civia_field::evaluate_point_with_params(concentration, &params)?;
    tracing::info!(params = %name, u = artifact.u, p = artifact.p, "point evaluated");
    if artifact.degenerate {
        tracing::warn!("eMAC is undefined at this point (P saturated)");
    }
    write_json(output, serde_json::to_value(&artifact)?)
}

fn cmd_field(
    ranges: [(f64, f64); 3],
    resolutions: [usize; 3],
    iso: Vec<IsoLevelSpec>,
    point: Option<[f64; 3]>,
    params: &ParamsArgs,
    output: Option<&PathBuf>,
    threads: usize,
) -> Result<()> {
    if threads > 0 {
        // Best-effort; if a global pool already exists, keep going.
        let _ = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global();
    }

    let (name, params) = resolve_params(params)?;
    let axes = [
        AxisSpec::new(ranges[0].0, ranges[0].1, resolutions[0])?,
        AxisSpec::new(ranges[1].0, ranges[1].1, resolutions[1])?,
        AxisSpec::new(ranges[2].0, ranges[2].1, resolutions[2])?,
    ];
    let levels = if iso.is_empty() { IsoLevelSpec::standard() } else { iso };

    tracing::info!(params = %name, ?resolutions, bands = levels.len(), "sampling field");
    let mut artifact = civia_field::evaluate_field_with_params(&axes, &params, &name, &levels)?;
    if let Some(c) = point {
        artifact = artifact.with_point(civia_field::evaluate_point_with_params(c, &params)?);
    }
    tracing::info!(nodes = artifact.field.len(), p_max = artifact.p_max, "field complete");

    write_json(output, serde_json::to_value(&artifact)?)
}

fn cmd_presets(output: Option<&PathBuf>) -> Result<()> {
    let presets: Vec<serde_json::Value> = Preset::ALL
        .iter()
        .map(|p| {
            serde_json::json!({
                "name": p.name(),
                "citation": p.citation(),
                "params": p.parameters(),
            })
        })
        .collect();
    write_json(output, serde_json::Value::Array(presets))
}

fn resolve_params(args: &ParamsArgs) -> Result<(String, ModelParameters)> {
    if let Some(path) = &args.params {
        tracing::info!(path = %path.display(), "loading parameter record");
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let params = ModelParameters::from_json_str(&json)?;
        return Ok((CUSTOM_PARAMS_LABEL.to_string(), params));
    }
    let preset = Preset::from_name(&args.preset)?;
    Ok((preset.name().to_string(), preset.parameters()))
}

fn triple<T: Copy>(values: &[T], flag: &str) -> Result<[T; 3]> {
    match values {
        [a, b, c] => Ok([*a, *b, *c]),
        _ => anyhow::bail!(
            "{} expects exactly 3 comma-separated values, got {}",
            flag,
            values.len()
        ),
    }
}

fn parse_range(s: &str) -> std::result::Result<(f64, f64), String> {
    let (lo, hi) = s.split_once(':').ok_or_else(|| format!("expected MIN:MAX, got '{}'", s))?;
    let lo: f64 = lo.trim().parse().map_err(|e| format!("bad range min '{}': {}", lo, e))?;
    let hi: f64 = hi.trim().parse().map_err(|e| format!("bad range max '{}': {}", hi, e))?;
    Ok((lo, hi))
}

fn parse_iso(s: &str) -> std::result::Result<IsoLevelSpec, String> {
    let (name, band) =
        s.split_once('=').ok_or_else(|| format!("expected NAME=TARGET:HALF_WIDTH, got '{}'", s))?;
    let (target, half_width) = parse_range(band)?;
    IsoLevelSpec::new(name.trim(), target, half_width).map_err(|e| e.to_string())
}

fn write_json(output: Option<&PathBuf>, value: serde_json::Value) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&value)?)?;
    } else {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}
