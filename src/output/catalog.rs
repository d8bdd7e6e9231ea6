//! Catalog formatters

use crate::output::{OutputFormat, category_label, title_case};
use crate::track::catalog::{ApiCatalog, ApiStatus};

pub fn render(catalog: &ApiCatalog, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => text(catalog),
        OutputFormat::Markdown => markdown(catalog),
        OutputFormat::Csv => csv(catalog),
        OutputFormat::Json => {
            serde_json::to_string_pretty(catalog).expect("catalog serializes to JSON")
        }
    }
}

fn text(catalog: &ApiCatalog) -> String {
    let label = title_case(&category_label(&catalog.api_types));
    let mut lines = Vec::new();

    lines.push("=".repeat(80));
    lines.push(format!("CUDA {} API Catalog", label));
    lines.push(format!("Versions: {} -> {}", catalog.since, catalog.until));
    lines.push(format!("Generated: {}", catalog.generated_timestamp));
    lines.push("=".repeat(80));

    lines.push(String::new());
    lines.push("SUMMARY".to_string());
    lines.push(format!(
        "  Total APIs found:       {}",
        catalog.summary.total
    ));
    lines.push(format!(
        "  Already present in {}:  {}",
        catalog.since, catalog.summary.already_present
    ));
    lines.push(format!(
        "  Introduced in range:    {}",
        catalog.summary.introduced_in_range
    ));
    lines.push(format!(
        "  Removed in range:       {}",
        catalog.summary.removed
    ));
    lines.push(format!(
        "  Currently present:      {}",
        catalog.summary.present
    ));

    lines.push(String::new());
    lines.push("=".repeat(80));
    lines.push(format!(
        "{:<50} {:<12} {:<12} {}",
        "API Name", "Introduced", "Removed", "Status"
    ));
    lines.push("=".repeat(80));

    for (name, lifecycle) in &catalog.apis {
        let introduced = lifecycle.introduced.as_deref().unwrap_or("-");
        let removed = lifecycle.removed.as_deref().unwrap_or("-");
        let status = match lifecycle.status {
            ApiStatus::Present => "present",
            ApiStatus::Removed => "removed",
        };
        lines.push(format!(
            "{:<50} {:<12} {:<12} {}",
            name, introduced, removed, status
        ));
    }

    lines.join("\n")
}

fn markdown(catalog: &ApiCatalog) -> String {
    let label = title_case(&category_label(&catalog.api_types));
    let mut lines = Vec::new();

    lines.push(format!("# CUDA {} API Catalog", label));
    lines.push(String::new());
    lines.push(format!(
        "**Versions:** {} -> {}  ",
        catalog.since, catalog.until
    ));
    lines.push(format!("**Generated:** {}", catalog.generated_timestamp));

    lines.push(String::new());
    lines.push("## Summary".to_string());
    lines.push(String::new());
    lines.push("| Metric | Count |".to_string());
    lines.push("|--------|-------|".to_string());
    lines.push(format!("| Total APIs found | {} |", catalog.summary.total));
    lines.push(format!(
        "| Already present in {} | {} |",
        catalog.since, catalog.summary.already_present
    ));
    lines.push(format!(
        "| Introduced in range | {} |",
        catalog.summary.introduced_in_range
    ));
    lines.push(format!(
        "| Removed in range | {} |",
        catalog.summary.removed
    ));
    lines.push(format!(
        "| Currently present | {} |",
        catalog.summary.present
    ));

    lines.push(String::new());
    lines.push(format!("## All APIs ({})", catalog.apis.len()));
    lines.push(String::new());
    lines.push("| API | Introduced | Removed | Status |".to_string());
    lines.push("|-----|------------|---------|--------|".to_string());

    for (name, lifecycle) in &catalog.apis {
        let introduced = lifecycle.introduced.as_deref().unwrap_or("-");
        let removed = lifecycle.removed.as_deref().unwrap_or("-");
        let status = match lifecycle.status {
            ApiStatus::Present => "present",
            ApiStatus::Removed => "removed",
        };
        lines.push(format!(
            "| `{}` | {} | {} | {} |",
            name, introduced, removed, status
        ));
    }

    lines.join("\n")
}

fn csv(catalog: &ApiCatalog) -> String {
    let mut lines = vec!["api_name,introduced,removed,status,present_in_versions".to_string()];

    for (name, lifecycle) in &catalog.apis {
        let introduced = lifecycle.introduced.as_deref().unwrap_or("");
        let removed = lifecycle.removed.as_deref().unwrap_or("");
        let status = match lifecycle.status {
            ApiStatus::Present => "present",
            ApiStatus::Removed => "removed",
        };
        lines.push(format!(
            "{},{},{},{},{}",
            name,
            introduced,
            removed,
            status,
            lifecycle.present_in.join(";")
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::catalog::build_catalog;
    use crate::track::types::ApiCategory;
    use std::collections::{BTreeSet, HashMap};

    fn sample_catalog() -> ApiCatalog {
        let versions: Vec<String> = ["1.0", "2.0", "3.0"]
            .iter()
            .map(|v| v.to_string())
            .collect();
        let mut sets: HashMap<String, BTreeSet<String>> = HashMap::new();
        sets.insert("1.0".into(), ["cudaOld"].iter().map(|s| s.to_string()).collect());
        sets.insert(
            "2.0".into(),
            ["cudaOld", "cudaNew"].iter().map(|s| s.to_string()).collect(),
        );
        sets.insert("3.0".into(), ["cudaNew"].iter().map(|s| s.to_string()).collect());

        build_catalog(&[ApiCategory::Runtime], &versions, &sets)
    }

    #[test]
    fn text_contains_summary_and_one_row_per_api() {
        let rendered = render(&sample_catalog(), OutputFormat::Text);

        assert!(rendered.contains("CUDA Runtime API Catalog"));
        assert!(rendered.contains("Total APIs found:       2"));
        assert!(rendered.contains("cudaOld"));
        assert!(rendered.contains("cudaNew"));
    }

    #[test]
    fn markdown_renders_tables() {
        let rendered = render(&sample_catalog(), OutputFormat::Markdown);

        assert!(rendered.contains("# CUDA Runtime API Catalog"));
        assert!(rendered.contains("| Metric | Count |"));
        assert!(rendered.contains("| `cudaNew` | 2.0 | - | present |"));
    }

    #[test]
    fn csv_has_a_header_and_one_row_per_api() {
        let rendered = render(&sample_catalog(), OutputFormat::Csv);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(
            lines[0],
            "api_name,introduced,removed,status,present_in_versions"
        );
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().any(|l| l.starts_with("cudaOld,,3.0,removed,")));
    }

    #[test]
    fn json_round_trips_through_serde() {
        let rendered = render(&sample_catalog(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["since"], "1.0");
        assert_eq!(value["apis"]["cudaOld"]["status"], "removed");
    }
}
