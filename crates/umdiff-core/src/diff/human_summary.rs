//! Human-readable summary renderer for manifest diffs.

use crate::diff::model::{
    AggregateDiffResult, ChangeDirection, DiffClassification, DiffDelta, DiffResult,
};
use crate::model::PackageEntry;

/// Render a Markdown/text summary of a [`DiffResult`].
///
/// Informational only; the structured result is the source of truth.
pub fn render_diff_summary(result: &DiffResult) -> String {
    let mut out = String::new();

    out.push_str("## Manifest Diff\n\n");
    if let Some(label) = &result.architecture_label {
        out.push_str(&format!("**Architecture**: {label}  \n"));
    }
    out.push_str(&format!(
        "**Classification**: {}  \n**Compared**: {} packages ({} unchanged)\n\n",
        classification_label(result.classification),
        result.total_compared(),
        result.unchanged_count
    ));

    out.push_str("### Identity\n\n");
    out.push_str(&format!(
        "| | Origin | Digest |\n\
         |---|---|---|\n\
         | old | {} | `{}` |\n\
         | new | {} | `{}` |\n\n",
        result.identity.old_origin,
        short(&result.identity.old_content_digest),
        result.identity.new_origin,
        short(&result.identity.new_content_digest),
    ));

    if result.is_empty() {
        out.push_str("_No package changes detected._\n");
        return out;
    }

    push_delta(&mut out, &result.delta(), "###");
    out
}

/// Render the common view followed by each architecture's deviations.
pub fn render_aggregate_summary(result: &AggregateDiffResult) -> String {
    let mut out = String::new();

    out.push_str("## Manifest Diff (all architectures)\n\n");
    let labels: Vec<&str> = result.labels().collect();
    out.push_str(&format!("**Architectures**: {}\n\n", labels.join(", ")));

    if result.is_empty() {
        out.push_str("_No package changes detected._\n");
        return out;
    }

    out.push_str("### Common to all architectures\n\n");
    if result.common.is_empty() {
        out.push_str("_None._\n\n");
    } else {
        push_delta(&mut out, &result.common, "####");
    }

    for (label, delta) in &result.architecture_specific {
        if delta.is_empty() {
            continue;
        }
        out.push_str(&format!("### Only on {label}\n\n"));
        push_delta(&mut out, delta, "####");
    }

    out
}

fn push_delta(out: &mut String, delta: &DiffDelta, heading: &str) {
    if !delta.added.is_empty() {
        out.push_str(&format!("{heading} Added ({})\n\n", delta.added.len()));
        for entry in &delta.added {
            out.push_str(&format!("- `{}` {}\n", entry.name, describe(entry)));
        }
        out.push('\n');
    }
    if !delta.removed.is_empty() {
        out.push_str(&format!("{heading} Removed ({})\n\n", delta.removed.len()));
        for entry in &delta.removed {
            out.push_str(&format!("- `{}` {}\n", entry.name, describe(entry)));
        }
        out.push('\n');
    }
    if !delta.changed.is_empty() {
        out.push_str(&format!("{heading} Changed ({})\n\n", delta.changed.len()));
        for change in &delta.changed {
            out.push_str(&format!(
                "- `{}`: `{}` → `{}`{}\n",
                change.name,
                change.old_version,
                change.new_version,
                direction_suffix(change.direction)
            ));
        }
        out.push('\n');
    }
}

fn describe(entry: &PackageEntry) -> String {
    match &entry.channel {
        Some(channel) => format!("`{}` ({})", entry.normalized_version(), channel),
        None => format!("`{}`", entry.normalized_version()),
    }
}

fn classification_label(classification: DiffClassification) -> &'static str {
    match classification {
        DiffClassification::Identical => "Identical",
        DiffClassification::NoPackageChange => "No Package Change",
        DiffClassification::Changed => "Changed",
    }
}

fn direction_suffix(direction: ChangeDirection) -> &'static str {
    match direction {
        ChangeDirection::Upgrade => "",
        ChangeDirection::Downgrade => " (downgrade)",
        ChangeDirection::Equivalent => " (equivalent)",
    }
}

fn short(digest: &str) -> &str {
    digest.get(..12).unwrap_or(digest)
}
