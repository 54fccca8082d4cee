//! Gatebridge CLI
//!
//! Command-line interface for synthesizing API gateway event-bus
//! integrations into CloudFormation deployment templates. This binary
//! plays the packaging-hook role: it runs once per build, just before
//! the compiled template is finalized.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use gatebridge_common::{MergePolicy, Template};
use gatebridge_config::{resolve_integration, IntegrationConfig};
use gatebridge_synthesizer::{FragmentSet, TemplateSynthesizer};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gatebridge")]
#[command(version, about = "Synthesize API gateway event-bus integrations into deployment templates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an integration config and show what would be synthesized
    #[command(after_help = "EXAMPLES:\n  \
        # Validate a YAML config\n  \
        gatebridge validate --config integrations.yml\n\n  \
        # JSON works too, detected from the extension\n  \
        gatebridge validate --config integrations.json")]
    Validate {
        /// Path to the integration config file (YAML or JSON)
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Synthesize resource fragments from an integration config
    #[command(after_help = "EXAMPLES:\n  \
        # Print fragments to stdout\n  \
        gatebridge synthesize --config integrations.yml\n\n  \
        # Write fragments for a production stage\n  \
        gatebridge synthesize \\\n    \
        --config integrations.yml \\\n    \
        --stage production \\\n    \
        --output fragments.json")]
    Synthesize {
        /// Path to the integration config file (YAML or JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Deployment stage name
        #[arg(long, default_value = "dev")]
        stage: String,

        /// Write fragments to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Merge synthesized fragments into a deployment template
    #[command(after_help = "EXAMPLES:\n  \
        # Merge in place, refusing logical-name collisions\n  \
        gatebridge package --config integrations.yml --template template.json\n\n  \
        # Replace fragments from an earlier run\n  \
        gatebridge package \\\n    \
        --config integrations.yml \\\n    \
        --template template.json \\\n    \
        --overwrite\n\n  \
        # Leave the input template untouched\n  \
        gatebridge package \\\n    \
        --config integrations.yml \\\n    \
        --template template.json \\\n    \
        --output merged.json")]
    Package {
        /// Path to the integration config file (YAML or JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Path to the deployment template (JSON)
        #[arg(short, long)]
        template: PathBuf,

        /// Deployment stage name
        #[arg(long, default_value = "dev")]
        stage: String,

        /// Write the merged template here instead of back in place
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replace fragments whose logical names already exist
        #[arg(long)]
        overwrite: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        println!("{} Verbose mode enabled", "→".cyan());
    }

    match cli.command {
        Commands::Validate { config } => {
            validate_command(config.as_path(), cli.verbose)?;
        }
        Commands::Synthesize {
            config,
            stage,
            output,
        } => {
            synthesize_command(config.as_path(), &stage, output.as_deref(), cli.verbose)?;
        }
        Commands::Package {
            config,
            template,
            stage,
            output,
            overwrite,
        } => {
            package_command(PackageArgs {
                config_path: config.as_path(),
                template_path: template.as_path(),
                stage: &stage,
                output: output.as_deref(),
                overwrite,
                verbose: cli.verbose,
            })?;
        }
    }

    Ok(())
}

fn load_config(path: &Path, verbose: bool) -> Result<IntegrationConfig> {
    println!("{} Loading config: {}", "→".cyan(), path.display());

    let config = IntegrationConfig::from_file(path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;

    if verbose {
        println!("  Prefix: {}", config.prefix);
        println!("  Domain: {}", config.domain);
        println!("  Path: {}", config.path);
        println!("  Title: {}", config.title);
    }

    Ok(config)
}

/// Run synthesis, downgrading the "no recognized integration" outcome to
/// a warning: nothing is emitted and the build continues.
fn synthesize_fragments(config: IntegrationConfig, stage: &str) -> Result<Option<FragmentSet>> {
    let synthesizer = TemplateSynthesizer::new(config, stage);
    match synthesizer.synthesize() {
        Ok(fragments) => Ok(Some(fragments)),
        Err(e) if e.is_soft() => {
            eprintln!("{} {}", "⚠".yellow(), e);
            Ok(None)
        }
        Err(e) => Err(e).context("Failed to synthesize fragments"),
    }
}

fn validate_command(config_path: &Path, verbose: bool) -> Result<()> {
    let config = load_config(config_path, verbose)?;

    let kind = match resolve_integration(&config) {
        Ok(resolved) => resolved.kind(),
        Err(e) if e.is_soft() => {
            eprintln!("{} {}", "⚠".yellow(), e);
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to resolve integration type"),
    };

    config
        .validate()
        .context("Configuration failed validation")?;

    println!("\n{}", "✓ Configuration valid".green().bold());
    println!("  Integration: {}", kind.to_string().yellow());
    println!("  Logical names:");
    for logical_id in [
        gatebridge_synthesizer::mapping_logical_id(&config.prefix),
        gatebridge_synthesizer::api_logical_id(&config.prefix),
        gatebridge_synthesizer::stage_logical_id(&config.prefix),
        gatebridge_synthesizer::role_logical_id(&config.prefix),
    ] {
        println!("    • {}", logical_id.cyan());
    }

    Ok(())
}

fn synthesize_command(
    config_path: &Path,
    stage: &str,
    output: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let config = load_config(config_path, verbose)?;

    let Some(fragments) = synthesize_fragments(config, stage)? else {
        return Ok(());
    };

    println!(
        "{} Synthesized {} fragments for stage {}",
        "✓".green(),
        fragments.len(),
        stage.yellow()
    );

    let rendered = fragments
        .to_json_pretty()
        .context("Failed to serialize fragments")?;

    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} Wrote {}", "✓".green().bold(), path.display());
        }
        None => println!("\n{}", rendered),
    }

    Ok(())
}

struct PackageArgs<'a> {
    config_path: &'a Path,
    template_path: &'a Path,
    stage: &'a str,
    output: Option<&'a Path>,
    overwrite: bool,
    verbose: bool,
}

fn package_command(args: PackageArgs) -> Result<()> {
    let config = load_config(args.config_path, args.verbose)?;

    println!(
        "{} Loading template: {}",
        "→".cyan(),
        args.template_path.display()
    );
    let mut template = Template::from_file(args.template_path)
        .with_context(|| format!("Failed to load template {}", args.template_path.display()))?;

    let Some(fragments) = synthesize_fragments(config, args.stage)? else {
        println!("{} Template left unchanged", "→".cyan());
        return Ok(());
    };

    let policy = if args.overwrite {
        MergePolicy::Overwrite
    } else {
        MergePolicy::Reject
    };

    let replaced = fragments
        .merge_into(&mut template, policy)
        .context("Failed to merge fragments into template")?;

    if !replaced.is_empty() {
        println!(
            "{} Replaced existing fragments: {}",
            "⚠".yellow(),
            replaced.join(", ")
        );
    }

    let destination = args.output.unwrap_or(args.template_path);
    template
        .write_to_file(destination)
        .with_context(|| format!("Failed to write {}", destination.display()))?;

    println!("\n{}", "✓ Package complete!".green().bold());
    println!(
        "  {} fragments merged into {}",
        fragments.len(),
        destination.display()
    );
    if args.verbose {
        for (logical_id, _) in &fragments {
            println!("    • {}", logical_id.cyan());
        }
    }

    Ok(())
}
