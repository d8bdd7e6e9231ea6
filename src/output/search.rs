//! Search result formatter

use crate::output::title_case;
use crate::track::search::{Origin, SearchResult};

/// Plain text summary of a single-symbol search
pub fn render_text(result: &SearchResult, total_versions: usize) -> String {
    let mut lines = Vec::new();

    lines.push("=".repeat(60));
    lines.push(format!("API: {}", result.api_name));
    lines.push(format!(
        "Type: CUDA {} API",
        title_case(result.category.as_str())
    ));
    lines.push("=".repeat(60));
    lines.push(format!(
        "(Checked {} of {} versions)",
        result.versions_checked, total_versions
    ));

    if result.present_in.is_empty() {
        lines.push(String::new());
        lines.push("API NOT FOUND in any checked version.".to_string());
        lines.push(String::new());
        lines.push("Possible reasons:".to_string());
        lines.push("  - The API name might be misspelled".to_string());
        lines.push("  - It might be in the other API type (runtime vs driver)".to_string());
        lines.push("  - It might be in a version not checked (try --full-scan)".to_string());
        lines.push("  - The documentation structure might have changed".to_string());
        return lines.join("\n");
    }

    lines.push(String::new());
    match &result.origin {
        Some(Origin::Introduced(version)) => {
            lines.push(format!("INTRODUCED in: CUDA {}", version));
        }
        Some(Origin::AtLeast(version)) => {
            lines.push(format!(
                "PRESENT since at least CUDA {} (the oldest version checked; \
                 the true introduction may be earlier)",
                version
            ));
        }
        None => {}
    }

    let newest_present = result
        .present_in
        .last()
        .map(String::as_str)
        .unwrap_or_default();
    match &result.removed {
        Some(removed) => {
            lines.push(format!("REMOVED/DEPRECATED after: CUDA {}", newest_present));
            lines.push(format!("   (First missing in: CUDA {})", removed));
        }
        None => {
            lines.push(format!("STILL PRESENT in: CUDA {}", newest_present));
        }
    }

    if result.present_in.len() > 1 {
        lines.push(String::new());
        lines.push(format!(
            "Confirmed in {} versions:",
            result.present_in.len()
        ));
        if result.present_in.len() > 5 {
            lines.push(format!(
                "  {} -> {}",
                result.present_in[0],
                result.present_in[result.present_in.len() - 1]
            ));
        } else {
            lines.push(format!("  {}", result.present_in.join(", ")));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::types::ApiCategory;

    fn result_with(
        origin: Option<Origin>,
        removed: Option<&str>,
        present_in: &[&str],
    ) -> SearchResult {
        SearchResult {
            api_name: "cudaMalloc".to_string(),
            category: ApiCategory::Runtime,
            origin,
            removed: removed.map(|v| v.to_string()),
            present_in: present_in.iter().map(|v| v.to_string()).collect(),
            not_found_in: Vec::new(),
            versions_checked: present_in.len(),
        }
    }

    #[test]
    fn reports_a_boundary_introduction() {
        let result = result_with(
            Some(Origin::Introduced("2.0".to_string())),
            None,
            &["2.0", "3.0"],
        );
        let rendered = render_text(&result, 3);

        assert!(rendered.contains("INTRODUCED in: CUDA 2.0"));
        assert!(rendered.contains("STILL PRESENT in: CUDA 3.0"));
        assert!(rendered.contains("(Checked 2 of 3 versions)"));
    }

    #[test]
    fn distinguishes_an_unknowable_introduction() {
        let result = result_with(
            Some(Origin::AtLeast("1.0".to_string())),
            None,
            &["1.0", "2.0", "3.0"],
        );
        let rendered = render_text(&result, 3);

        assert!(rendered.contains("PRESENT since at least CUDA 1.0"));
        assert!(!rendered.contains("INTRODUCED in:"));
    }

    #[test]
    fn reports_removal_with_the_first_missing_version() {
        let result = result_with(
            Some(Origin::Introduced("2.0".to_string())),
            Some("3.0"),
            &["2.0"],
        );
        let rendered = render_text(&result, 4);

        assert!(rendered.contains("REMOVED/DEPRECATED after: CUDA 2.0"));
        assert!(rendered.contains("(First missing in: CUDA 3.0)"));
    }

    #[test]
    fn explains_a_miss() {
        let result = result_with(None, None, &[]);
        let rendered = render_text(&result, 5);

        assert!(rendered.contains("API NOT FOUND in any checked version."));
        assert!(rendered.contains("--full-scan"));
    }

    #[test]
    fn long_presence_runs_are_abbreviated() {
        let result = result_with(
            Some(Origin::AtLeast("1.0".to_string())),
            None,
            &["1.0", "2.0", "3.0", "4.0", "5.0", "6.0"],
        );
        let rendered = render_text(&result, 6);

        assert!(rendered.contains("Confirmed in 6 versions:"));
        assert!(rendered.contains("1.0 -> 6.0"));
    }
}
