use std::io::{self, IsTerminal};
use std::sync::atomic::Ordering;

use anyhow::{Context, Result};
use harvester_core::source::{self, PageLoader};
use harvester_core::{HarvestEngine, HttpClient, candidate_urls};
use tracing::{debug, info};

use crate::ProcessExit;
use crate::app::config_runtime::RunSettings;
use crate::app::{config_manager, config_runtime, exit_handler, progress_manager, terminal};
use crate::output;

pub(crate) async fn run_harvester() -> Result<ProcessExit> {
    let (args, cli_sources) = config_runtime::parse_cli_with_sources();
    let settings = config_manager::resolve_config(args, &cli_sources)?;

    let default_level = config_runtime::resolve_default_log_level(&settings);
    let force_cli_log_level = config_runtime::should_force_cli_log_level(&cli_sources);
    terminal::init_tracing(default_level, force_cli_log_level);

    debug!(?settings, "settings resolved");
    info!("pdf-harvester starting");

    if settings.seeds.is_empty() && settings.html_file.is_none() {
        output::print_quick_start_guidance();
        return Ok(ProcessExit::Success);
    }

    harvest(&settings).await
}

pub(crate) async fn harvest(settings: &RunSettings) -> Result<ProcessExit> {
    let client = HttpClient::with_timeout(settings.timeout);

    let pages = if let Some(html_file) = &settings.html_file {
        vec![source::read_html_file(html_file, settings.base_url.as_deref()).await?]
    } else {
        let mut loader = PageLoader::new(&client);
        if let Some(cache_dir) = &settings.page_cache {
            loader = loader.with_cache_dir(cache_dir);
        }
        source::gather_from_seeds(&loader, &settings.seeds).await?
    };

    let urls = candidate_urls(&pages, settings.resolve_relative);
    info!(pages = pages.len(), candidates = urls.len(), "collected PDF links");

    tokio::fs::create_dir_all(&settings.output_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create output directory '{}'",
                settings.output_dir.display()
            )
        })?;

    let engine = HarvestEngine::new(settings.concurrency)?;

    let use_spinner = terminal::should_use_spinner(
        io::stderr().is_terminal(),
        settings.quiet,
        settings.json,
        terminal::is_dumb_terminal(),
    );
    let (progress_handle, progress_stop) =
        progress_manager::spawn_progress_ui(use_spinner, engine.stats(), urls.len());

    let report = engine.run(&client, &urls, &settings.output_dir).await;

    progress_stop.store(true, Ordering::SeqCst);
    if let Some(handle) = progress_handle {
        let _ = handle.await;
    }

    output::print_completion_summary(&report, &settings.output_dir, settings.json)?;

    Ok(exit_handler::determine_exit_outcome(
        report.succeeded() + report.skipped(),
        report.failed(),
    ))
}
