// src/github/mod.rs
// =============================================================================
// This module handles fetching files from hosted repositories.
//
// Currently implements:
// - Building raw-content URLs from repo/branch/file
// - Fetching them over HTTP(S) with reqwest
//
// Rust concepts:
// - Modules: Organizing related functionality
// - Public API: What other parts of the app can use
// =============================================================================

mod fetch;

pub use fetch::{file_url, FetchError, FileFetcher, HttpFileFetcher};
