use std::path::Path;
use std::time::Duration;

use f2rn_lib::{BatchConfig, Config, F2rnError, GenerationOptions};

use crate::cli::GenerationArgs;

/// Tracks which batch flags were explicitly provided vs. defaulted.
#[derive(Debug, Default)]
pub struct BatchFlagSources {
    pub concurrency: bool,
    pub delay_ms: bool,
}

impl BatchFlagSources {
    pub fn from_args(args: &[String]) -> Self {
        Self {
            concurrency: flag_present(args, "--concurrency"),
            delay_ms: flag_present(args, "--delay-ms"),
        }
    }
}

/// Checks if a flag was present in the command-line arguments.
pub fn flag_present(args: &[String], flag: &str) -> bool {
    args.iter()
        .any(|arg| arg == flag || arg.starts_with(&format!("{flag}=")))
}

/// Switches only ever move away from the config value when given.
pub fn resolve_generation_options(
    args: &GenerationArgs,
    force_tests: bool,
    config: &GenerationOptions,
) -> GenerationOptions {
    GenerationOptions {
        include_types: config.include_types && !args.no_types,
        use_style_sheet: config.use_style_sheet && !args.inline_styles,
        generate_tests: config.generate_tests || args.tests || force_tests,
        format_code: config.format_code && !args.no_format,
    }
}

/// Merge CLI arguments with config file, preferring CLI when flags are present.
pub fn resolve_batch_config(
    cli_concurrency: usize,
    cli_delay_ms: u64,
    config: &BatchConfig,
    flags: &BatchFlagSources,
) -> Result<BatchConfig, F2rnError> {
    let concurrency = if flags.concurrency {
        cli_concurrency
    } else {
        config.concurrency
    };
    if concurrency == 0 {
        return Err(F2rnError::Config(
            "--concurrency must be at least 1".to_string(),
        ));
    }

    Ok(BatchConfig {
        concurrency,
        delay: if flags.delay_ms {
            Duration::from_millis(cli_delay_ms)
        } else {
            config.delay
        },
    })
}

/// Load config from a TOML file, central config, or return defaults.
/// Priority: explicit path > ~/.config/f2rn/config.toml > defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, F2rnError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        F2rnError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        F2rnError::Config(prefix)
    })?;
    Ok(cfg)
}

/// Format effective settings as a single-line string.
pub fn format_effective_config(
    options: &GenerationOptions,
    batch: Option<&BatchConfig>,
    config_source: Option<&Path>,
) -> String {
    let source = config_source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    let mut line = format!(
        "Effective config [{source}]: types={}, stylesheet={}, tests={}, format={}",
        options.include_types, options.use_style_sheet, options.generate_tests, options.format_code
    );
    if let Some(batch) = batch {
        line.push_str(&format!(
            ", concurrency={}, delay={}ms",
            batch.concurrency,
            batch.delay.as_millis()
        ));
    }
    line
}
