//! Command-line front end: parse filenames given as arguments (or on
//! stdin, one per line) and print the extracted elements.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::map::Entry;
use serde_json::{json, Map, Value};

use seiri_parse::{parse_with, Options, ParseResult};

#[derive(Parser)]
#[command(name = "seiri")]
#[command(about = "Extract structured metadata from anime video filenames")]
#[command(version)]
struct Cli {
    /// Filenames to parse; reads newline-separated names from stdin when
    /// none are given
    filenames: Vec<String>,

    /// Emit one JSON object per input instead of a readable listing
    #[arg(long)]
    json: bool,

    /// Do not look for an episode number
    #[arg(long)]
    no_episode_number: bool,

    /// Do not look for an episode title
    #[arg(long)]
    no_episode_title: bool,

    /// Do not strip or report the file extension
    #[arg(long)]
    no_file_extension: bool,

    /// Do not look for a release group
    #[arg(long)]
    no_release_group: bool,

    /// Characters the tokenizer may treat as delimiters
    #[arg(long, value_name = "CHARS")]
    delimiters: Option<String>,

    /// Substring removed from the filename before parsing; repeatable
    #[arg(long = "ignore", value_name = "STRING")]
    ignored: Vec<String>,
}

impl Cli {
    fn options(&self) -> Options {
        let defaults = Options::default();
        Options {
            parse_episode_number: !self.no_episode_number,
            parse_episode_title: !self.no_episode_title,
            parse_file_extension: !self.no_file_extension,
            parse_release_group: !self.no_release_group,
            allowed_delimiters: self
                .delimiters
                .clone()
                .unwrap_or(defaults.allowed_delimiters),
            ignored_strings: self.ignored.clone(),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let options = cli.options();

    let inputs: Vec<String> = if cli.filenames.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<_>>()
            .context("reading filenames from stdin")?
    } else {
        cli.filenames.clone()
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (index, filename) in inputs.iter().enumerate() {
        let result = parse_with(filename, &options);
        if cli.json {
            writeln!(out, "{}", to_json(filename, &result))?;
        } else {
            if index > 0 {
                writeln!(out)?;
            }
            write_listing(&mut out, filename, &result, inputs.len() > 1)?;
        }
    }

    Ok(())
}

/// One object per input: element kinds as keys, repeated kinds folded
/// into arrays, extraction order preserved within a kind.
fn to_json(filename: &str, result: &ParseResult) -> Value {
    let mut object = Map::new();
    object.insert("input".to_string(), Value::String(filename.to_string()));
    object.insert("succeeded".to_string(), Value::Bool(result.succeeded));

    for element in &result.elements {
        let value = Value::String(element.value.clone());
        match object.entry(element.kind.as_str().to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Value::Array(values) => values.push(value),
                existing => {
                    let first = existing.take();
                    *existing = json!([first, value]);
                }
            },
        }
    }

    Value::Object(object)
}

fn write_listing(
    out: &mut impl Write,
    filename: &str,
    result: &ParseResult,
    with_header: bool,
) -> Result<()> {
    if with_header {
        writeln!(out, "{filename}")?;
    }
    if !result.succeeded {
        writeln!(out, "  (no title found)")?;
    }
    for element in &result.elements {
        writeln!(out, "  {}: {}", element.kind.as_str(), element.value)?;
    }
    Ok(())
}
