use clap::{Args, Parser, Subcommand, ValueEnum};
use f2rn_lib::ResourceKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "f2rn")]
#[command(
    version,
    about = "Figma to React Native - Generate React Native components from Figma nodes",
    long_about = "Figma to React Native (f2rn)\n\nModes:\n- generate: turn one Figma node (URL or local JSON export) into a TSX component.\n- batch: generate many components with throttled Figma requests.\n\nFigma URLs need FIGMA_TOKEN (or FIGMA_OAUTH_TOKEN). Use --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) with [generation], [batch] and [figma] defaults; CLI flags override config"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate one component from a Figma URL or local node JSON
    Generate {
        #[arg(long, help = "Input resource (Figma URL with node-id, or local .json export)")]
        input: String,

        #[arg(long, value_enum, help = "Override type detection for input")]
        input_type: Option<ResourceType>,

        #[arg(long, help = "Component name (defaults to the PascalCase node name)")]
        name: Option<String>,

        #[arg(
            long,
            short,
            help = "Write the component to this file (JSON status is printed to stdout)"
        )]
        output: Option<PathBuf>,

        #[arg(
            long,
            value_name = "PATH",
            help = "Write the snapshot test here (implies --tests; defaults next to --output)"
        )]
        test_output: Option<PathBuf>,

        #[command(flatten)]
        generation: GenerationArgs,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,
    },

    /// Generate several components, a few at a time
    Batch {
        #[arg(
            long,
            value_delimiter = ',',
            required = true,
            help = "Inputs (comma-separated Figma URLs and/or .json files)"
        )]
        input: Vec<String>,

        #[arg(long, value_name = "DIR", help = "Directory for generated files; created if missing")]
        output_dir: PathBuf,

        #[arg(long, default_value = "3", help = "Items generated concurrently per chunk")]
        concurrency: usize,

        #[arg(long, default_value = "1000", help = "Pause between chunks (milliseconds)")]
        delay_ms: u64,

        #[command(flatten)]
        generation: GenerationArgs,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,
    },
}

/// Switches shared by every generating command.
#[derive(Args, Clone, Copy, Debug, Default)]
pub struct GenerationArgs {
    #[arg(long, help = "Omit the TypeScript props interface and annotations")]
    pub no_types: bool,

    #[arg(long, help = "Emit inline style objects instead of StyleSheet.create")]
    pub inline_styles: bool,

    #[arg(long, help = "Also generate a react-test-renderer snapshot test")]
    pub tests: bool,

    #[arg(long, help = "Skip whitespace normalization of the generated file")]
    pub no_format: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ResourceType {
    Figma,
    File,
}

impl From<ResourceType> for ResourceKind {
    fn from(rt: ResourceType) -> Self {
        match rt {
            ResourceType::Figma => ResourceKind::Figma,
            ResourceType::File => ResourceKind::File,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands, OutputFormat, ResourceType};
    use clap::Parser;

    #[test]
    fn generate_command_uses_defaults() {
        let cli = Cli::parse_from(["f2rn", "generate", "--input", "button.json"]);

        assert!(!cli.verbose);
        assert!(cli.config.is_none());

        match cli.command {
            Commands::Generate {
                input,
                input_type,
                name,
                output,
                test_output,
                generation,
                format,
            } => {
                assert_eq!(input, "button.json");
                assert!(input_type.is_none());
                assert!(name.is_none());
                assert!(output.is_none());
                assert!(test_output.is_none());
                assert!(!generation.no_types);
                assert!(!generation.inline_styles);
                assert!(!generation.tests);
                assert!(!generation.no_format);
                assert!(matches!(format, OutputFormat::Json));
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn generate_command_respects_overrides() {
        let cli = Cli::parse_from([
            "f2rn",
            "--verbose",
            "generate",
            "--input",
            "https://www.figma.com/design/KEY/Name?node-id=1-2",
            "--input-type",
            "figma",
            "--name",
            "LoginButton",
            "--output",
            "LoginButton.tsx",
            "--no-types",
            "--inline-styles",
            "--tests",
            "--no-format",
            "--format",
            "pretty",
            "--config",
            "f2rn.toml",
        ]);

        assert!(cli.verbose);
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("f2rn.toml")));
        match cli.command {
            Commands::Generate {
                input_type,
                name,
                output,
                generation,
                format,
                ..
            } => {
                assert!(matches!(input_type, Some(ResourceType::Figma)));
                assert_eq!(name.as_deref(), Some("LoginButton"));
                assert_eq!(output.as_deref(), Some(std::path::Path::new("LoginButton.tsx")));
                assert!(generation.no_types);
                assert!(generation.inline_styles);
                assert!(generation.tests);
                assert!(generation.no_format);
                assert!(matches!(format, OutputFormat::Pretty));
            }
            _ => panic!("expected generate command with overrides"),
        }
    }

    #[test]
    fn batch_command_splits_inputs() {
        let cli = Cli::parse_from([
            "f2rn",
            "batch",
            "--input",
            "a.json,b.json",
            "--input",
            "c.json",
            "--output-dir",
            "out",
            "--concurrency",
            "5",
        ]);

        match cli.command {
            Commands::Batch {
                input,
                output_dir,
                concurrency,
                delay_ms,
                ..
            } => {
                assert_eq!(input, vec!["a.json", "b.json", "c.json"]);
                assert_eq!(output_dir, std::path::PathBuf::from("out"));
                assert_eq!(concurrency, 5);
                assert_eq!(delay_ms, 1000);
            }
            _ => panic!("expected batch command"),
        }
    }

    #[test]
    fn batch_requires_output_dir() {
        let result = Cli::try_parse_from(["f2rn", "batch", "--input", "a.json"]);
        assert!(result.is_err());
    }
}
