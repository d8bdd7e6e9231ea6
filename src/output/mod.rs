//! Rendering of catalog, changelog, and search results
//!
//! Formatters are pure functions over the builder outputs; JSON rendering
//! reuses the serde schemas directly.

pub mod catalog;
pub mod changelog;
pub mod search;

use clap::ValueEnum;

use crate::track::types::ApiCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Markdown,
    Json,
    Csv,
}

/// "runtime", "driver", or "runtime + driver" for headings
pub(crate) fn category_label(api_types: &[ApiCategory]) -> String {
    api_types
        .iter()
        .map(|category| category.as_str())
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Capitalize each word for display headings ("runtime + driver" ->
/// "Runtime + Driver")
pub(crate) fn title_case(label: &str) -> String {
    label
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
