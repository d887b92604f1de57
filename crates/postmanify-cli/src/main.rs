use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use log::info;

use postmanify_core::config::{self, CONFIG_FILE_NAME, ConvertConfig};
use postmanify_core::convert::{self, SourceFormat};
use postmanify_core::parse::{self, spec::SwaggerSpec};

#[derive(Parser)]
#[command(
    name = "postmanify",
    about = "Convert Swagger 2.0 specs into Postman collections",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Swagger spec into a Postman collection
    Convert {
        /// Path to the Swagger spec file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Path of the collection file to write
        #[arg(short, long)]
        output: PathBuf,

        /// Config file to read
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        config: PathBuf,

        /// Hostname, defaults to the spec's host
        #[arg(long)]
        hostname: Option<String>,

        /// Text prepended to the hostname
        #[arg(long)]
        prefix: Option<String>,

        /// Text appended to the hostname
        #[arg(long)]
        suffix: Option<String>,

        /// Base path, defaults to the spec's basePath
        #[arg(long)]
        base_path: Option<String>,

        /// URL scheme, defaults to the spec's first scheme or http
        #[arg(long)]
        scheme: Option<String>,

        /// Header added to every request, as "Key: Value"
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
    },

    /// Validate a Swagger spec
    Validate {
        /// Path to the Swagger spec file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Initialize a new postmanify configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Flags of the `convert` command that map onto config fields.
struct Overrides {
    hostname: Option<String>,
    prefix: Option<String>,
    suffix: Option<String>,
    base_path: Option<String>,
    scheme: Option<String>,
    headers: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            config,
            hostname,
            prefix,
            suffix,
            base_path,
            scheme,
            headers,
        } => {
            let overrides = Overrides {
                hostname,
                prefix,
                suffix,
                base_path,
                scheme,
                headers,
            };
            cmd_convert(&input, &output, &config, overrides)
        }

        Commands::Validate { input } => cmd_validate(&input),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "postmanify", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn source_format(path: &Path) -> SourceFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => SourceFormat::Json,
        _ => SourceFormat::Yaml,
    }
}

fn load_spec(path: &Path) -> Result<SwaggerSpec> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let spec = match source_format(path) {
        SourceFormat::Json => parse::load_json(&content),
        SourceFormat::Yaml => parse::load_yaml(&content),
    }
    .with_context(|| format!("failed to load {}", path.display()))?;

    Ok(spec)
}

/// Config file values with command line flags layered on top.
fn build_config(config_path: &Path, overrides: Overrides) -> Result<ConvertConfig> {
    let file = config::load_config(config_path)?.unwrap_or_default();

    let headers = overrides
        .headers
        .iter()
        .map(|raw| config::parse_header(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let flags = ConvertConfig {
        hostname: overrides.hostname,
        hostname_prefix: overrides.prefix,
        hostname_suffix: overrides.suffix,
        base_path: overrides.base_path,
        scheme: overrides.scheme,
        headers,
    };

    Ok(file.merge(flags))
}

fn cmd_convert(input: &Path, output: &Path, config_path: &Path, overrides: Overrides) -> Result<()> {
    let cfg = build_config(config_path, overrides)?;
    let content =
        fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))?;

    let json = convert::convert_str(&content, source_format(input), &cfg)
        .with_context(|| format!("failed to convert {}", input.display()))?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(output, json).with_context(|| format!("failed to write {}", output.display()))?;

    info!("converted {} into {}", input.display(), output.display());
    eprintln!("Wrote {}", output.display());
    Ok(())
}

fn cmd_validate(input: &Path) -> Result<()> {
    let spec = load_spec(input)?;

    let operations: Vec<_> = spec
        .paths
        .values()
        .flat_map(|item| item.operations())
        .collect();
    let tagged = operations
        .iter()
        .filter(|(_, op)| op.folder_tag().is_some())
        .count();

    eprintln!("Valid Swagger {} spec: {}", spec.swagger, spec.info.title);
    eprintln!("  Version: {}", spec.info.version);
    eprintln!("  Paths: {}", spec.paths.len());
    eprintln!("  Definitions: {}", spec.definitions.len());
    eprintln!("  Operations: {} ({} tagged)", operations.len(), tagged);

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
