//! CLI tool for schedview - lays out a schedule document and outputs JSON
//!
//! Usage:
//!   schedview_cli <input.json>                 # Output layout JSON to stdout
//!   schedview_cli <input.json> -o out.json     # Output layout JSON to file
//!   schedview_cli <input.json> --step 8        # Use 8px per lane (default 10)
//!
//! Set `RUST_LOG=debug` to see per-column lane counts.

#![allow(clippy::exit)]

use std::env;
use std::fs;
use std::io::{self, Write};
use schedview::{layout_document, ScheduleDocument, DEFAULT_ADJACENT_STEP};

const USAGE: &str = "Usage: schedview_cli <input.json> [-o output.json] [--step N]";

struct Options<'a> {
    input: &'a str,
    output: Option<&'a str>,
    step: f32,
}

fn parse_args(args: &[String]) -> Result<Options<'_>, String> {
    let input = args.get(1).ok_or_else(|| USAGE.to_string())?;
    let mut options = Options {
        input: input.as_str(),
        output: None,
        step: DEFAULT_ADJACENT_STEP,
    };

    let mut rest = args.iter().skip(2);
    while let Some(flag) = rest.next() {
        match (flag.as_str(), rest.next()) {
            ("-o", Some(path)) => options.output = Some(path.as_str()),
            ("--step", Some(value)) => {
                options.step = value
                    .parse::<f32>()
                    .map_err(|e| format!("Invalid --step '{value}': {e}"))?;
            }
            _ => return Err(USAGE.to_string()),
        }
    }
    Ok(options)
}

fn run(options: &Options<'_>) -> schedview::Result<()> {
    let document = ScheduleDocument::from_path(options.input)?;
    let layout = layout_document(document, options.step)?;
    let output = serde_json::to_string_pretty(&layout)?;

    match options.output {
        Some(path) => {
            fs::write(path, &output)?;
            eprintln!("Written: {path}");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&options) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
