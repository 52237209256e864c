use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use tracing::debug;

use dsdiff_diff::{DiffConfig, DiffMap, PayloadPair, RecordDiffer};
use dsdiff_format::{FormatConfig, FormatKind, Formatter};
use dsdiff_types::Record;

use crate::cli::*;

/// Settings read from `--config`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub diff: DiffConfig,
    pub format: FormatConfig,
}

impl Config {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = toml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let out = match cli.command {
        Command::Diff(args) => cmd_diff(&args, &config)?,
        Command::Components(args) => cmd_components(&args, &config)?,
    };
    print!("{out}");
    Ok(())
}

fn load_record(path: &Path) -> anyhow::Result<Record> {
    let bytes = fs::read(path)
        .with_context(|| format!("reading record {}", path.display()))?;
    Record::from_slice(&bytes).with_context(|| format!("loading record {}", path.display()))
}

fn read_body(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("reading body {}", path.display()))
}

fn diff_files(
    a: &Path,
    b: &Path,
    bodies: Option<(&[u8], &[u8])>,
    config: DiffConfig,
) -> anyhow::Result<DiffMap> {
    let ra = load_record(a)?;
    let rb = load_record(b)?;
    let payload = bodies.map(|(a, b)| PayloadPair::new(a, b));
    let map = RecordDiffer::new(config)
        .diff_records(&ra, &rb, payload)
        .with_context(|| format!("comparing {} and {}", a.display(), b.display()))?;
    debug!(
        compared = map.len(),
        changed = map.changed().count(),
        "records compared"
    );
    Ok(map)
}

fn cmd_diff(args: &DiffArgs, config: &Config) -> anyhow::Result<String> {
    let mut diff_config = config.diff.clone();
    diff_config.parallel |= args.parallel;

    let bodies = match (&args.body_a, &args.body_b) {
        (Some(a), Some(b)) => Some((read_body(a)?, read_body(b)?)),
        _ => None,
    };
    let map = diff_files(
        &args.a,
        &args.b,
        bodies.as_ref().map(|(a, b)| (a.as_slice(), b.as_slice())),
        diff_config,
    )?;

    let formatter = Formatter::new(config.format.clone());
    let kind = FormatKind::from(args.format);
    let summaries = if args.all {
        formatter
            .summarize_all(&map, kind)?
            .into_iter()
            .map(|(_, summary)| summary)
            .collect()
    } else {
        let summary = formatter.select_summary(&map, kind)?;
        if summary.is_empty() {
            Vec::new()
        } else {
            vec![summary]
        }
    };

    if summaries.is_empty() {
        return Ok("No changes.\n".to_string());
    }
    let mut out = String::new();
    for summary in summaries {
        out.push_str(&summary);
        if !summary.ends_with('\n') {
            out.push('\n');
        }
    }
    Ok(out)
}

fn cmd_components(args: &ComponentsArgs, config: &Config) -> anyhow::Result<String> {
    let map = diff_files(&args.a, &args.b, None, config.diff.clone())?;
    let mut out = String::new();
    for sub in map.iter() {
        let changes = sub.delta().leaf_count();
        let status = if sub.is_modified() {
            format!("changed ({changes})").yellow()
        } else {
            "unchanged".green()
        };
        out.push_str(&format!("{:<10} {}\n", sub.component().name(), status));
    }
    Ok(out)
}
