//! Growth-accounting panel builder.
//!
//! Extends a country panel to the configured end year, computes the capital
//! stock and derived indicators, and writes the result as CSV.
//!
//! Usage: `solow INPUT.csv [--config FILE] [--projections FILE] [--output FILE] [--provenance FILE]`
//! Example: `RUST_LOG=debug solow data/ken.csv --config solow.toml --provenance ken.json`

use std::{env, fs, path::PathBuf, process};

use solow::{
    pipeline::{Pipeline, PipelineConfig},
    primitives::Provenance,
    utils::{read_panel, write_csv},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "Usage: solow INPUT.csv [--config FILE] [--projections FILE] [--output FILE] [--provenance FILE]";

/// Parsed command line.
#[derive(Debug, PartialEq, Eq)]
struct Args {
    input: PathBuf,
    config: Option<PathBuf>,
    projections: Option<PathBuf>,
    output: PathBuf,
    provenance: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut input = None;
    let mut config = None;
    let mut projections = None;
    let mut output = None;
    let mut provenance = None;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        let slot = match arg.as_str() {
            "--config" => &mut config,
            "--projections" => &mut projections,
            "--output" => &mut output,
            "--provenance" => &mut provenance,
            flag if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
            path => {
                if input.replace(PathBuf::from(path)).is_some() {
                    return Err(format!("unexpected argument {path}"));
                }
                continue;
            }
        };
        let value = iter.next().ok_or_else(|| format!("{arg} requires a value"))?;
        *slot = Some(PathBuf::from(value));
    }

    let input: PathBuf = input.ok_or_else(|| "missing input file".to_string())?;
    let output = output.unwrap_or_else(|| input.with_extension("extended.csv"));
    Ok(Args { input, config, projections, output, provenance })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("Error: {msg}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };
    let pipeline = Pipeline::new(config)?;

    let panel = read_panel(&args.input)?;
    let projections = args.projections.as_ref().map(read_panel).transpose()?;

    let mut output = pipeline.run(panel, projections.as_ref())?;
    write_csv(&mut output.frame, &args.output)?;

    if let Some(path) = &args.provenance {
        fs::write(path, serde_json::to_string_pretty(&output.provenance)?)?;
        info!(path = %path.display(), "wrote provenance");
    }

    print_summary(&output.provenance, pipeline.config().end_year);
    Ok(())
}

fn print_summary(provenance: &Provenance, end_year: i32) {
    println!("\nExtended to {end_year}:");
    if provenance.is_empty() {
        println!("  nothing to extrapolate");
        return;
    }
    for (column, record) in provenance.iter() {
        let span = match (record.years.first(), record.years.last()) {
            (Some(first), Some(last)) if first != last => format!("{first}-{last}"),
            (Some(year), _) => year.to_string(),
            _ => continue,
        };
        println!("  {column:<16} {span:<10} {}", record.method);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("solow").chain(list.iter().copied()).map(String::from).collect()
    }

    #[test]
    fn parses_all_options() {
        let parsed = parse_args(&args(&[
            "in.csv",
            "--config",
            "cfg.toml",
            "--projections",
            "weo.csv",
            "--output",
            "out.csv",
            "--provenance",
            "prov.json",
        ]))
        .unwrap();

        assert_eq!(
            parsed,
            Args {
                input: "in.csv".into(),
                config: Some("cfg.toml".into()),
                projections: Some("weo.csv".into()),
                output: "out.csv".into(),
                provenance: Some("prov.json".into()),
            }
        );
    }

    #[test]
    fn default_output_next_to_input() {
        let parsed = parse_args(&args(&["data/ken.csv"])).unwrap();
        assert_eq!(parsed.output, PathBuf::from("data/ken.extended.csv"));
        assert_eq!(parsed.config, None);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["in.csv", "--config"])).is_err());
        assert!(parse_args(&args(&["in.csv", "--verbose"])).is_err());
        assert!(parse_args(&args(&["a.csv", "b.csv"])).is_err());
    }
}
