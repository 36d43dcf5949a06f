// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (to stderr, so stdout only carries rendered output)
// 2. Parse command-line arguments and load the config
// 3. Build the renderer from a real HTTP fetcher and syntect
// 4. Render every requested file and print the results
// 5. Exit with proper code (0 = success, 1 = a fetch failed, 2 = error)
// =============================================================================

mod cli;
mod config;
mod github;
mod hook;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};
use config::Config;
use github::{FileFetcher, HttpFileFetcher};
use render::{FileRenderer, RenderRequest, SyntectHighlighter};

// How many files we fetch at the same time
const MAX_CONCURRENT_FETCHES: usize = 8;

// One rendered file, as printed by --json
#[derive(Debug, Serialize)]
struct RenderOutput {
    repo: String,
    branch: String,
    file: String,
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wiki_source_view=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = every file rendered
//   Ok(1) = at least one fetch failed
//   Err   = bad config or arguments
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())
        .context("loading configuration")?
        .with_base_url(cli.base_url)
        .validate()?;
    info!(base_url = %config.base_url, "configuration loaded");

    let requests = match cli.command {
        Commands::Render {
            repo,
            branch,
            files,
        } => {
            let branch = branch.unwrap_or_else(|| config.default_branch.clone());
            files
                .into_iter()
                .map(|file| RenderRequest::new(repo.as_str(), branch.as_str(), file))
                .collect::<Vec<_>>()
        }
        Commands::Hook { args } => {
            let request = hook::parse_hook_args(&args, &config.default_branch)
                .with_context(|| format!("invalid hook arguments '{}'", args))?;
            vec![request]
        }
    };

    let fetcher = HttpFileFetcher::new(config.timeout(), &config.user_agent)
        .context("creating HTTP client")?;
    let renderer = FileRenderer::new(fetcher, SyntectHighlighter::new(), config.base_url.as_str())
        .with_theme(config.theme.as_str());

    let outputs = render_all(&renderer, requests).await;
    let failed = outputs.iter().filter(|o| o.error.is_some()).count();

    print_outputs(&outputs, cli.json)?;

    if failed > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Renders every request, a few at a time
//
// .buffered() keeps results in request order even though fetches overlap.
async fn render_all<F: FileFetcher>(
    renderer: &FileRenderer<F, SyntectHighlighter>,
    requests: Vec<RenderRequest>,
) -> Vec<RenderOutput> {
    let futures = requests.into_iter().map(|request| async move {
        let url = renderer.file_url(&request);
        info!(%url, "rendering");

        let rendered = renderer
            .handle(&request.repo_name, &request.branch_name, &request.file_name)
            .await;

        let (html, error) = match rendered {
            Ok(html) => (Some(html), None),
            Err(e) => {
                error!(%url, error = %e, "fetch failed");
                (None, Some(e.to_string()))
            }
        };

        RenderOutput {
            repo: request.repo_name,
            branch: request.branch_name,
            file: request.file_name,
            url,
            html,
            error,
        }
    });

    stream::iter(futures)
        .buffered(MAX_CONCURRENT_FETCHES)
        .collect()
        .await
}

// Prints rendered HTML to stdout and fetch errors to stderr,
// or everything as one JSON array
fn print_outputs(outputs: &[RenderOutput], json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(outputs)?;
        println!("{}", json_output);
        return Ok(());
    }

    for output in outputs {
        match (&output.html, &output.error) {
            (Some(html), _) => {
                print!("{}", html);
                if !html.ends_with('\n') {
                    println!();
                }
            }
            (None, Some(e)) => eprintln!("Error: {}: {}", output.file, e),
            (None, None) => {}
        }
    }
    Ok(())
}
