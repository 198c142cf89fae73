// src/extract/mod.rs

pub mod download;
pub mod latest_versions;
pub mod pep;
pub mod whats_new;

pub use download::download;
pub use latest_versions::latest_versions;
pub use pep::pep;
pub use whats_new::whats_new;

/// One output line; field meaning depends on the mode.
pub type Row = Vec<String>;

/// Ordered rows, first row is the header.
pub type Table = Vec<Row>;
