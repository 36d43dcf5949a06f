// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The binary plays the part of the wiki host: it collects repo/branch/file,
// hands them to the renderer and prints what comes back.
//
// Rust concepts:
// - Derive macros: clap generates the parser from these structs
// - Enums: One variant per subcommand
// =============================================================================

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "wiki-source-view",
    version,
    about = "Render a file from a hosted repository as wiki HTML",
    long_about = "wiki-source-view fetches a file from a raw-content host and renders it: \
                  Markdown files become HTML, other files are syntax highlighted, and files \
                  with an unknown extension are printed as-is."
)]
pub struct Cli {
    /// TOML config file
    #[arg(long, global = true, env = "WIKI_SOURCE_VIEW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Raw-content host (overrides the config file)
    ///
    /// Files are fetched from <base-url>/<repo>/<branch>/<file>
    #[arg(long, global = true, env = "WIKI_SOURCE_VIEW_BASE_URL")]
    pub base_url: Option<String>,

    /// Output results as JSON instead of bare HTML
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render one or more files from a repository
    ///
    /// Example: wiki-source-view render --repo rust-lang/rust --branch master README.md
    Render {
        /// Repository, e.g. owner/project
        #[arg(long)]
        repo: String,

        /// Branch name (defaults to the configured default branch)
        #[arg(long)]
        branch: Option<String>,

        /// File paths inside the repository
        #[arg(required = true)]
        files: Vec<String>,
    },

    /// Render using wiki parser-function arguments
    ///
    /// Example: wiki-source-view hook "src/main.rs|repo=owner/project|branch=main"
    Hook {
        /// Arguments as written in the wiki page, separated by '|'
        args: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from([
            "wiki-source-view",
            "render",
            "--repo",
            "foo",
            "README.md",
            "src/lib.rs",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Commands::Render { repo, branch, files } => {
                assert_eq!(repo, "foo");
                assert_eq!(branch, None);
                assert_eq!(files, vec!["README.md", "src/lib.rs"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_render_requires_a_file() {
        let result = Cli::try_parse_from(["wiki-source-view", "render", "--repo", "foo"]);
        assert!(result.is_err());
    }
}
