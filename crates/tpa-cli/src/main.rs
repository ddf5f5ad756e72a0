//! `tpa` command-line front end.
//! - `compute`: full transfer path analysis, result record as JSON on stdout
//! - `svd`: conditioning of a caller-supplied matrix
//! - `catalog`: fixed path and frequency band tables
//!
//! Exit status is 0 on success, 2 for rejected input, 1 for computation failures.

mod cli;
mod logging;

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use prometheus::Registry;
use prometheus_bridge::{render_text, TpaMetrics};
use serde::{Deserialize, Serialize};
use tpa_analysis::{analyze_rows, compute_tpa};
use tpa_core::{
    ErrorKind, FrequencyBand, PathCategory, TpaConfig, TpaError, TpaRequest, TransferPath,
};
use tracing::error;

const EXIT_COMPUTATION: u8 = 1;
const EXIT_INVALID_INPUT: u8 = 2;

/// Body of the `svd` matrix file.
#[derive(Debug, Deserialize)]
struct SvdRequest {
    #[serde(default)]
    matrix: Vec<Vec<f64>>,
}

#[derive(Serialize)]
struct CatalogPath {
    name: &'static str,
    color: &'static str,
    category: PathCategory,
}

#[derive(Serialize)]
struct CatalogBand {
    label: &'static str,
    hz: f64,
}

#[derive(Serialize)]
struct Catalog {
    paths: Vec<CatalogPath>,
    bands: Vec<CatalogBand>,
}

fn main() -> ExitCode {
    let matches = cli::build().get_matches();
    let Some((name, sub)) = matches.subcommand() else {
        eprintln!("error: no subcommand given");
        return ExitCode::from(EXIT_INVALID_INPUT);
    };
    logging::init(sub.get_flag("log-json"));

    match run(name, sub) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::from(exit_status(&err))
        }
    }
}

fn run(name: &str, sub: &ArgMatches) -> Result<()> {
    let pretty = sub.get_flag("pretty");
    match name {
        "compute" => run_compute(sub, pretty),
        "svd" => run_svd(sub, pretty),
        "catalog" => print_json(&catalog(), pretty),
        other => Err(anyhow!("unknown subcommand {other}")),
    }
}

fn load_config(sub: &ArgMatches) -> Result<TpaConfig> {
    match sub.get_one::<String>("config") {
        Some(path) => Ok(TpaConfig::load(path)?),
        None => Ok(TpaConfig::default()),
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &str) -> Result<T> {
    let text = fs::read_to_string(Path::new(path)).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

fn run_compute(sub: &ArgMatches, pretty: bool) -> Result<()> {
    let mut config = load_config(sub)?;
    if let Some(seed) = sub.get_one::<u64>("transfer-seed") {
        config.seeds.transfer = *seed;
    }
    if let Some(seed) = sub.get_one::<u64>("force-seed") {
        config.seeds.force = *seed;
    }
    if let Some(seed) = sub.get_one::<u64>("measurement-seed") {
        config.seeds.measurement = *seed;
    }

    let mut request: TpaRequest = match sub.get_one::<String>("request") {
        Some(path) => read_json(path)?,
        None => TpaRequest::default(),
    };
    if let Some(band) = sub.get_one::<String>("band") {
        request.frequency_band = band.clone();
    }
    if let Some(target) = sub.get_one::<String>("target") {
        request.target = target.clone();
    }

    let result = compute_tpa(&request, &config)?;

    if sub.get_flag("metrics") {
        let registry = Registry::new();
        let metrics = TpaMetrics::new(&registry)?;
        metrics.observe(&result);
        eprint!("{}", render_text(&registry)?);
    }
    print_json(&result, pretty)
}

fn run_svd(sub: &ArgMatches, pretty: bool) -> Result<()> {
    let config = load_config(sub)?;
    let path = sub
        .get_one::<String>("matrix")
        .ok_or_else(|| anyhow!("--matrix is required"))?;
    let body: SvdRequest = read_json(path)?;
    let result = analyze_rows(body.matrix, &config)?;
    print_json(&result, pretty)
}

fn catalog() -> Catalog {
    Catalog {
        paths: TransferPath::ALL
            .iter()
            .map(|p| CatalogPath {
                name: p.label(),
                color: p.color(),
                category: p.category(),
            })
            .collect(),
        bands: FrequencyBand::ALL
            .iter()
            .map(|b| CatalogBand {
                label: b.label(),
                hz: b.hz(),
            })
            .collect(),
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}

/// Input problems (bad files, malformed JSON, rejected matrices or config)
/// map to 2; everything else to 1.
fn exit_status(err: &anyhow::Error) -> u8 {
    if let Some(tpa) = err.downcast_ref::<TpaError>() {
        return match tpa.kind() {
            ErrorKind::InvalidInput => EXIT_INVALID_INPUT,
            ErrorKind::Computation => EXIT_COMPUTATION,
        };
    }
    let input = err
        .chain()
        .any(|cause| cause.is::<serde_json::Error>() || cause.is::<std::io::Error>());
    if input {
        EXIT_INVALID_INPUT
    } else {
        EXIT_COMPUTATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_status_separates_input_from_computation() {
        let empty = anyhow::Error::new(TpaError::EmptyMatrix);
        assert_eq!(exit_status(&empty), EXIT_INVALID_INPUT);

        let shape = anyhow::Error::new(TpaError::ShapeMismatch {
            left: (8, 7),
            right: (8, 6),
        });
        assert_eq!(exit_status(&shape), EXIT_COMPUTATION);

        let parse = serde_json::from_str::<SvdRequest>("not json").unwrap_err();
        let wrapped = anyhow::Error::new(parse).context("parsing matrix.json");
        assert_eq!(exit_status(&wrapped), EXIT_INVALID_INPUT);
    }

    #[test]
    fn svd_request_without_matrix_is_empty() {
        let body: SvdRequest = serde_json::from_str("{}").unwrap();
        let err = analyze_rows(body.matrix, &TpaConfig::default()).unwrap_err();
        assert_eq!(exit_status(&anyhow::Error::new(err)), EXIT_INVALID_INPUT);
    }

    #[test]
    fn cli_accepts_compute_flags() {
        let matches = cli::build()
            .try_get_matches_from([
                "tpa",
                "compute",
                "--band",
                "100-500 Hz",
                "--force-seed",
                "7",
                "--pretty",
            ])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "compute");
        assert_eq!(sub.get_one::<String>("band").map(String::as_str), Some("100-500 Hz"));
        assert_eq!(sub.get_one::<u64>("force-seed"), Some(&7));
        assert!(sub.get_flag("pretty"));
    }

    #[test]
    fn catalog_lists_every_path_and_band() {
        let c = catalog();
        assert_eq!(c.paths.len(), 8);
        assert_eq!(c.bands.len(), 7);
        assert_eq!(c.paths[2].name, "Exhaust Hanger");
    }
}
