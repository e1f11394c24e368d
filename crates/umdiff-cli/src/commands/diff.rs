//! Diff command

use super::{emit, to_json, OutputFormat, EXIT_DIFFERENCES};
use crate::settings::UmdiffConfig;
use anyhow::bail;
use clap::Args;
use std::collections::BTreeMap;
use std::path::PathBuf;
use umdiff_core::diff::{render_aggregate_summary, render_diff_summary};
use umdiff_core::{compare_architectures, compare_references, Resolver};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Old manifest: local path or http(s) URL
    #[arg(required_unless_present = "arch", conflicts_with = "arch")]
    pub old: Option<String>,

    /// New manifest: local path or http(s) URL
    #[arg(required_unless_present = "arch", conflicts_with = "arch")]
    pub new: Option<String>,

    /// One architecture pair; repeat for each architecture
    #[arg(long, value_name = "LABEL=OLD,NEW", value_parser = parse_arch_pair)]
    pub arch: Vec<ArchPair>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the report to FILE instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Exit with status 2 when any difference is found
    #[arg(long)]
    pub fail_on_diff: bool,

    /// Remote fetch timeout in seconds (at least 1)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchPair {
    pub label: String,
    pub old: String,
    pub new: String,
}

/// `LABEL=OLD,NEW`; the label ends at the first `=`, OLD at the first `,`.
fn parse_arch_pair(raw: &str) -> Result<ArchPair, String> {
    let (label, refs) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected LABEL=OLD,NEW, got '{}'", raw))?;
    let (old, new) = refs
        .split_once(',')
        .ok_or_else(|| format!("expected LABEL=OLD,NEW, got '{}'", raw))?;
    let (label, old, new) = (label.trim(), old.trim(), new.trim());
    if label.is_empty() || old.is_empty() || new.is_empty() {
        return Err(format!("empty label or reference in '{}'", raw));
    }
    Ok(ArchPair {
        label: label.to_string(),
        old: old.to_string(),
        new: new.to_string(),
    })
}

pub fn execute(args: DiffArgs, config: &UmdiffConfig) -> anyhow::Result<i32> {
    let format = match args.format {
        Some(format) => format,
        None => config.output_format()?,
    };
    let resolver = Resolver::http(config.http_options(args.timeout_secs))?;

    let (report, has_differences) = if args.arch.is_empty() {
        let (Some(old), Some(new)) = (args.old.as_deref(), args.new.as_deref()) else {
            bail!("Must specify OLD and NEW, or at least one --arch");
        };
        let result = compare_references(&resolver, old, new)?;
        let report = match format {
            OutputFormat::Text => render_diff_summary(&result),
            OutputFormat::Json => to_json(&result)?,
        };
        (report, !result.is_empty())
    } else {
        let mut old_refs = BTreeMap::new();
        let mut new_refs = BTreeMap::new();
        for pair in args.arch {
            if old_refs.contains_key(&pair.label) {
                bail!("Architecture label '{}' given more than once", pair.label);
            }
            old_refs.insert(pair.label.clone(), pair.old);
            new_refs.insert(pair.label, pair.new);
        }
        let result = compare_architectures(&resolver, &old_refs, &new_refs)?;
        let report = match format {
            OutputFormat::Text => render_aggregate_summary(&result),
            OutputFormat::Json => to_json(&result)?,
        };
        (report, !result.is_empty())
    };

    emit(&report, args.output.as_deref())?;

    if args.fail_on_diff && has_differences {
        return Ok(EXIT_DIFFERENCES);
    }
    Ok(0)
}
