//! Core library for tracking CUDA API symbol lifecycles across toolkit
//! documentation releases.
//!
//! The [`track`] module holds the extraction and diff engine; [`output`]
//! renders its results as text, Markdown, CSV, or JSON.

pub mod config;
pub mod output;
pub mod track;
