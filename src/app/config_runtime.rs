use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::{ArgMatches, CommandFactory, FromArgMatches, parser::ValueSource};
use harvester_core::{MAX_CONCURRENCY, MAX_TIMEOUT_SECS};

use crate::app_config::{FileConfig, VerbositySetting};
use crate::cli::Args;

/// Output directory used when neither CLI nor config name one.
pub(crate) const DEFAULT_OUTPUT_DIR: &str = "PDFs";

/// Which arguments were given explicitly on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CliValueSources {
    pub(crate) output_dir: bool,
    pub(crate) concurrency: bool,
    pub(crate) timeout_secs: bool,
    pub(crate) page_cache: bool,
    pub(crate) resolve_relative: bool,
    pub(crate) verbose: bool,
    pub(crate) quiet: bool,
}

/// Effective settings for one run after merging CLI, config file, and defaults.
#[derive(Debug, Clone)]
pub(crate) struct RunSettings {
    pub(crate) seeds: Vec<String>,
    pub(crate) html_file: Option<PathBuf>,
    pub(crate) base_url: Option<String>,
    pub(crate) output_dir: PathBuf,
    pub(crate) concurrency: usize,
    pub(crate) timeout: Duration,
    pub(crate) page_cache: Option<PathBuf>,
    pub(crate) resolve_relative: bool,
    pub(crate) json: bool,
    pub(crate) verbose: u8,
    pub(crate) quiet: bool,
    pub(crate) debug: bool,
}

pub(crate) fn parse_cli_with_sources() -> (Args, CliValueSources) {
    let matches = Args::command().get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());
    (args, sources_from_matches(&matches))
}

pub(crate) fn sources_from_matches(matches: &ArgMatches) -> CliValueSources {
    CliValueSources {
        output_dir: is_commandline_value(matches, "output_dir"),
        concurrency: is_commandline_value(matches, "concurrency"),
        timeout_secs: is_commandline_value(matches, "timeout_secs"),
        page_cache: is_commandline_value(matches, "page_cache"),
        resolve_relative: is_commandline_value(matches, "resolve_relative"),
        verbose: is_commandline_value(matches, "verbose"),
        quiet: is_commandline_value(matches, "quiet"),
    }
}

fn is_commandline_value(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ValueSource::CommandLine)
}

/// Merges CLI values over config file values over built-in defaults.
pub(crate) fn resolve_settings(
    args: Args,
    cli_sources: &CliValueSources,
    file_config: Option<&FileConfig>,
) -> Result<RunSettings> {
    let mut settings = RunSettings {
        seeds: args.seeds,
        html_file: args.html_file,
        base_url: args.base_url,
        output_dir: args
            .output_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        concurrency: usize::from(args.concurrency),
        timeout: Duration::from_secs(args.timeout_secs),
        page_cache: args.page_cache,
        resolve_relative: args.resolve_relative,
        json: args.json,
        verbose: args.verbose,
        quiet: args.quiet,
        debug: false,
    };

    if let Some(file_config) = file_config {
        if !cli_sources.output_dir
            && let Some(output_dir) = &file_config.output_dir
        {
            settings.output_dir.clone_from(output_dir);
        }

        if !cli_sources.concurrency
            && let Some(concurrency) = file_config.concurrency
        {
            settings.concurrency = usize::from(concurrency);
        }

        if !cli_sources.timeout_secs
            && let Some(timeout_secs) = file_config.timeout_secs
        {
            settings.timeout = Duration::from_secs(timeout_secs);
        }

        if !cli_sources.page_cache
            && settings.page_cache.is_none()
            && let Some(page_cache) = &file_config.page_cache
        {
            settings.page_cache = Some(page_cache.clone());
        }

        if !cli_sources.resolve_relative
            && let Some(resolve_relative) = file_config.resolve_relative
        {
            settings.resolve_relative = resolve_relative;
        }

        if !cli_sources.verbose
            && !cli_sources.quiet
            && let Some(verbosity) = file_config.verbosity
        {
            apply_config_verbosity(&mut settings, verbosity);
        }
    }

    if !(1..=MAX_CONCURRENCY).contains(&settings.concurrency) {
        bail!(
            "Invalid effective concurrency value: {}. Expected range: 1..={MAX_CONCURRENCY}",
            settings.concurrency
        );
    }
    if !(1..=MAX_TIMEOUT_SECS).contains(&settings.timeout.as_secs()) {
        bail!(
            "Invalid effective timeout value: {}s. Expected range: 1..={MAX_TIMEOUT_SECS}",
            settings.timeout.as_secs()
        );
    }

    Ok(settings)
}

fn apply_config_verbosity(settings: &mut RunSettings, verbosity: VerbositySetting) {
    let (verbose, quiet, debug) = match verbosity {
        VerbositySetting::Default => (0, false, false),
        VerbositySetting::Verbose => (1, false, false),
        VerbositySetting::Quiet => (0, true, false),
        VerbositySetting::Debug => (0, false, true),
    };
    settings.verbose = verbose;
    settings.quiet = quiet;
    settings.debug = debug;
}

pub(crate) fn resolve_default_log_level(settings: &RunSettings) -> &'static str {
    if settings.quiet {
        "error"
    } else if settings.debug {
        "trace"
    } else {
        match settings.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

pub(crate) fn should_force_cli_log_level(cli_sources: &CliValueSources) -> bool {
    cli_sources.verbose || cli_sources.quiet
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> (Args, CliValueSources) {
        let matches = Args::command().try_get_matches_from(argv).unwrap();
        let args = Args::from_arg_matches(&matches).unwrap();
        (args, sources_from_matches(&matches))
    }

    fn full_file_config() -> FileConfig {
        FileConfig {
            output_dir: Some(PathBuf::from("from-config")),
            concurrency: Some(8),
            timeout_secs: Some(90),
            page_cache: Some(PathBuf::from("cache")),
            resolve_relative: Some(true),
            verbosity: Some(VerbositySetting::Quiet),
        }
    }

    #[test]
    fn test_resolve_settings_defaults_without_config() {
        let (args, sources) = parse(&["pdf-harvester", "https://example.com/"]);
        let settings = resolve_settings(args, &sources, None).unwrap();

        assert_eq!(settings.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(settings.concurrency, 1);
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert!(settings.page_cache.is_none());
        assert!(!settings.resolve_relative);
        assert_eq!(settings.seeds, vec!["https://example.com/"]);
        assert_eq!(resolve_default_log_level(&settings), "info");
    }

    #[test]
    fn test_resolve_settings_config_fills_unset_values() {
        let (args, sources) = parse(&["pdf-harvester"]);
        let config = full_file_config();
        let settings = resolve_settings(args, &sources, Some(&config)).unwrap();

        assert_eq!(settings.output_dir, PathBuf::from("from-config"));
        assert_eq!(settings.concurrency, 8);
        assert_eq!(settings.timeout, Duration::from_secs(90));
        assert_eq!(settings.page_cache, Some(PathBuf::from("cache")));
        assert!(settings.resolve_relative);
        assert!(settings.quiet);
        assert_eq!(resolve_default_log_level(&settings), "error");
    }

    #[test]
    fn test_resolve_settings_cli_wins_over_config() {
        let (args, sources) = parse(&[
            "pdf-harvester",
            "-o",
            "cli-out",
            "-c",
            "2",
            "-t",
            "5",
            "--page-cache",
            "cli-cache",
            "-v",
        ]);
        let config = full_file_config();
        let settings = resolve_settings(args, &sources, Some(&config)).unwrap();

        assert_eq!(settings.output_dir, PathBuf::from("cli-out"));
        assert_eq!(settings.concurrency, 2);
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.page_cache, Some(PathBuf::from("cli-cache")));
        assert!(!settings.quiet);
        assert_eq!(resolve_default_log_level(&settings), "debug");
        assert!(should_force_cli_log_level(&sources));
    }

    #[test]
    fn test_resolve_settings_explicit_default_value_still_wins() {
        // `-c 1` equals the default but was typed, so config must not override it.
        let (args, sources) = parse(&["pdf-harvester", "-c", "1"]);
        let config = full_file_config();
        let settings = resolve_settings(args, &sources, Some(&config)).unwrap();
        assert_eq!(settings.concurrency, 1);
    }

    #[test]
    fn test_resolve_settings_rejects_out_of_range_config_concurrency() {
        let (args, sources) = parse(&["pdf-harvester"]);
        let config = FileConfig {
            concurrency: Some(40),
            ..FileConfig::default()
        };
        let err = resolve_settings(args, &sources, Some(&config)).unwrap_err();
        assert!(err.to_string().contains("concurrency"));
    }

    #[test]
    fn test_config_debug_verbosity_maps_to_trace() {
        let (args, sources) = parse(&["pdf-harvester"]);
        let config = FileConfig {
            verbosity: Some(VerbositySetting::Debug),
            ..FileConfig::default()
        };
        let settings = resolve_settings(args, &sources, Some(&config)).unwrap();
        assert_eq!(resolve_default_log_level(&settings), "trace");
        assert!(!should_force_cli_log_level(&sources));
    }

    #[test]
    fn test_default_log_level_by_verbose_count() {
        let (args, sources) = parse(&["pdf-harvester", "-vv"]);
        let settings = resolve_settings(args, &sources, None).unwrap();
        assert_eq!(resolve_default_log_level(&settings), "trace");
    }
}
