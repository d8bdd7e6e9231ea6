//! Changelog and compare formatters

use crate::output::{OutputFormat, category_label, title_case};
use crate::track::changelog::{ApiChangelog, VersionDiff};

pub fn render(changelog: &ApiChangelog, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => text(changelog),
        OutputFormat::Markdown => markdown(changelog),
        OutputFormat::Csv => csv(changelog),
        OutputFormat::Json => {
            serde_json::to_string_pretty(changelog).expect("changelog serializes to JSON")
        }
    }
}

fn text(changelog: &ApiChangelog) -> String {
    let label = title_case(&category_label(&changelog.api_types));
    let mut lines = Vec::new();

    lines.push("=".repeat(70));
    lines.push(format!("CUDA {} API Changelog", label));
    lines.push(format!(
        "Versions: {} -> {}",
        changelog.since, changelog.until
    ));
    lines.push(format!("Generated: {}", changelog.generated_timestamp));
    lines.push("=".repeat(70));

    lines.push(String::new());
    lines.push("SUMMARY".to_string());
    lines.push(format!(
        "  Total APIs added:   {}",
        changelog.summary.total_added
    ));
    lines.push(format!(
        "  Total APIs removed: {}",
        changelog.summary.total_removed
    ));
    lines.push(format!(
        "  Net new APIs:       {}",
        changelog.summary.net_new.len()
    ));
    lines.push(format!(
        "  Net removed APIs:   {}",
        changelog.summary.net_removed.len()
    ));

    lines.push(String::new());
    lines.push("=".repeat(70));
    lines.push("CHANGES BY VERSION".to_string());
    lines.push("=".repeat(70));

    for diff in &changelog.versions {
        if diff.added.is_empty() && diff.removed.is_empty() {
            continue;
        }

        lines.push(String::new());
        lines.push(format!("## CUDA {} (from {})", diff.version, diff.previous));
        lines.push(format!("   Total APIs: {}", diff.total_apis));

        if !diff.added.is_empty() {
            lines.push(String::new());
            lines.push(format!("   ADDED ({}):", diff.added_count));
            for name in &diff.added {
                lines.push(format!("      + {}", name));
            }
        }

        if !diff.removed.is_empty() {
            lines.push(String::new());
            lines.push(format!("   REMOVED ({}):", diff.removed_count));
            for name in &diff.removed {
                lines.push(format!("      - {}", name));
            }
        }
    }

    if !changelog.summary.net_new.is_empty() {
        lines.push(String::new());
        lines.push("=".repeat(70));
        lines.push(format!(
            "ALL NET NEW APIs ({})",
            changelog.summary.net_new.len()
        ));
        lines.push("=".repeat(70));
        for name in &changelog.summary.net_new {
            lines.push(format!("  + {}", name));
        }
    }

    if !changelog.summary.net_removed.is_empty() {
        lines.push(String::new());
        lines.push("=".repeat(70));
        lines.push(format!(
            "ALL NET REMOVED APIs ({})",
            changelog.summary.net_removed.len()
        ));
        lines.push("=".repeat(70));
        for name in &changelog.summary.net_removed {
            lines.push(format!("  - {}", name));
        }
    }

    lines.join("\n")
}

fn markdown(changelog: &ApiChangelog) -> String {
    let label = title_case(&category_label(&changelog.api_types));
    let mut lines = Vec::new();

    lines.push(format!("# CUDA {} API Changelog", label));
    lines.push(String::new());
    lines.push(format!(
        "**Versions:** {} -> {}  ",
        changelog.since, changelog.until
    ));
    lines.push(format!("**Generated:** {}", changelog.generated_timestamp));

    lines.push(String::new());
    lines.push("## Summary".to_string());
    lines.push(String::new());
    lines.push("| Metric | Count |".to_string());
    lines.push("|--------|-------|".to_string());
    lines.push(format!(
        "| Total APIs added | {} |",
        changelog.summary.total_added
    ));
    lines.push(format!(
        "| Total APIs removed | {} |",
        changelog.summary.total_removed
    ));
    lines.push(format!(
        "| Net new APIs | {} |",
        changelog.summary.net_new.len()
    ));
    lines.push(format!(
        "| Net removed APIs | {} |",
        changelog.summary.net_removed.len()
    ));

    lines.push(String::new());
    lines.push("## Changes by Version".to_string());

    for diff in &changelog.versions {
        if diff.added.is_empty() && diff.removed.is_empty() {
            continue;
        }

        lines.push(String::new());
        lines.push(format!("### CUDA {}", diff.version));
        lines.push(String::new());
        lines.push(format!(
            "*From {} - {} total APIs*",
            diff.previous, diff.total_apis
        ));

        if !diff.added.is_empty() {
            lines.push(String::new());
            lines.push("<details>".to_string());
            lines.push(format!("<summary>Added ({})</summary>", diff.added_count));
            lines.push(String::new());
            lines.push("```".to_string());
            for name in &diff.added {
                lines.push(name.clone());
            }
            lines.push("```".to_string());
            lines.push("</details>".to_string());
        }

        if !diff.removed.is_empty() {
            lines.push(String::new());
            lines.push("<details>".to_string());
            lines.push(format!(
                "<summary>Removed ({})</summary>",
                diff.removed_count
            ));
            lines.push(String::new());
            lines.push("```".to_string());
            for name in &diff.removed {
                lines.push(name.clone());
            }
            lines.push("```".to_string());
            lines.push("</details>".to_string());
        }
    }

    for (title, names) in [
        ("All Net New APIs", &changelog.summary.net_new),
        ("All Net Removed APIs", &changelog.summary.net_removed),
    ] {
        if names.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(format!("## {} ({})", title, names.len()));
        lines.push(String::new());
        lines.push("<details>".to_string());
        lines.push("<summary>Click to expand</summary>".to_string());
        lines.push(String::new());
        lines.push("```".to_string());
        for name in names {
            lines.push(name.clone());
        }
        lines.push("```".to_string());
        lines.push("</details>".to_string());
    }

    lines.join("\n")
}

fn csv(changelog: &ApiChangelog) -> String {
    let mut lines = vec!["version,previous_version,action,api_name".to_string()];

    for diff in &changelog.versions {
        for name in &diff.added {
            lines.push(format!("{},{},added,{}", diff.version, diff.previous, name));
        }
        for name in &diff.removed {
            lines.push(format!(
                "{},{},removed,{}",
                diff.version, diff.previous, name
            ));
        }
    }

    lines.join("\n")
}

/// Plain text rendering of a two-version comparison
pub fn render_compare_text(diff: &VersionDiff) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "Comparing CUDA {} -> {}",
        diff.previous, diff.version
    ));

    lines.push(String::new());
    lines.push(format!(
        "NEW APIs in CUDA {} ({}):",
        diff.version, diff.added_count
    ));
    for name in &diff.added {
        lines.push(format!("  + {}", name));
    }

    lines.push(String::new());
    lines.push(format!(
        "REMOVED APIs after CUDA {} ({}):",
        diff.previous, diff.removed_count
    ));
    for name in &diff.removed {
        lines.push(format!("  - {}", name));
    }

    lines.join("\n")
}
