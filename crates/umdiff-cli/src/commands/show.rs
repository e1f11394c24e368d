//! Show command: parse one manifest and list it

use super::{emit, to_json, OutputFormat};
use crate::settings::UmdiffConfig;
use clap::Args;
use std::path::PathBuf;
use umdiff_core::{load_manifest, ManifestDocument, PackageKind, Resolver};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Manifest: local path or http(s) URL
    pub reference: String,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the listing to FILE instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Remote fetch timeout in seconds (at least 1)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,
}

pub fn execute(args: ShowArgs, config: &UmdiffConfig) -> anyhow::Result<i32> {
    let format = match args.format {
        Some(format) => format,
        None => config.output_format()?,
    };
    let resolver = Resolver::http(config.http_options(args.timeout_secs))?;
    let doc = load_manifest(&resolver, &args.reference, None)?;

    let report = match format {
        OutputFormat::Text => render_listing(&doc),
        OutputFormat::Json => to_json(&doc)?,
    };
    emit(&report, args.output.as_deref())?;
    Ok(0)
}

fn render_listing(doc: &ManifestDocument) -> String {
    let mut out = String::new();
    out.push_str("## Manifest\n\n");
    out.push_str(&format!(
        "**Origin**: {}  \n**Packages**: {}  \n**Digest**: `{}`\n\n",
        doc.origin(),
        doc.len(),
        doc.content_digest()
    ));

    for entry in doc.entries() {
        let mut line = format!("- `{}` `{}`", entry.name, entry.normalized_version());
        if let Some(source) = &entry.source_package {
            line.push_str(&format!(" (source: {})", source));
        }
        if entry.kind == PackageKind::Snap {
            if let Some(channel) = &entry.channel {
                line.push_str(&format!(" (snap, {})", channel));
            }
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}
