//! swagen CLI
//!
//! Command-line interface for generating typed Rust API clients from
//! legacy Swagger 1.x descriptions.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use swagen_codegen::Generator;
use swagen_common::GeneratorConfig;
use swagen_parser::{declaration_location, DeclarationParser, ListingParser};

#[derive(Parser)]
#[command(name = "swagen")]
#[command(version, about = "Generate typed Rust API clients from legacy Swagger 1.x descriptions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a resource listing and display a summary
    #[command(after_help = "EXAMPLES:\n  \
        # Summarize a listing and its declarations\n  \
        swagen parse --input api-docs/service.json\n\n  \
        # Include per-operation detail\n  \
        swagen parse --input api-docs/service.json --verbose")]
    Parse {
        /// Path to the resource listing file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Generate a client crate from a resource listing
    #[command(after_help = "EXAMPLES:\n  \
        # Generate a client crate rooted at namespace fbs\n  \
        swagen generate \\\n    \
        --input api-docs/service.json \\\n    \
        --namespace fbs \\\n    \
        --output ./clients/fbs\n\n  \
        # Keep data structs in their own namespace\n  \
        swagen generate \\\n    \
        --input api-docs/service.json \\\n    \
        --namespace fbs \\\n    \
        --model-namespace fbs::model \\\n    \
        --output ./clients/fbs")]
    Generate {
        /// Path to the resource listing file
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Root namespace; also names the generated crate
        #[arg(short, long)]
        namespace: String,

        /// Namespace for service structs (defaults to the root namespace)
        #[arg(long)]
        client_namespace: Option<String>,

        /// Namespace for data structs (defaults to the root namespace)
        #[arg(long)]
        model_namespace: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        println!("{} Verbose mode enabled", "→".cyan());
    }

    match cli.command {
        Commands::Parse { input } => {
            parse_command(input.as_path(), cli.verbose)?;
        }
        Commands::Generate {
            input,
            output,
            namespace,
            client_namespace,
            model_namespace,
        } => {
            generate_command(
                input.as_path(),
                output.as_path(),
                &namespace,
                client_namespace,
                model_namespace,
            )?;
        }
    }

    Ok(())
}

fn parse_command(input: &Path, verbose: bool) -> Result<()> {
    println!(
        "{} Parsing resource listing: {}",
        "→".cyan(),
        input.display()
    );

    let listing = ListingParser::from_file(input)
        .context("Failed to load resource listing")?
        .parse()
        .context("Failed to parse resource listing")?;

    println!("\n{}", "✓ Parse successful!".green().bold());
    println!("  Base path: {}", listing.base_path.yellow());
    println!("  Resources: {}", listing.resources.len());

    for resource in &listing.resources {
        let location = declaration_location(input, &listing.base_path, &resource.path);
        let declaration = DeclarationParser::from_file(&location)
            .with_context(|| format!("Failed to load declaration {}", location.display()))?
            .parse()
            .with_context(|| format!("Failed to parse declaration {}", location.display()))?;

        println!(
            "  • {} ({} operations, {} models)",
            resource.description.cyan(),
            declaration.operation_count(),
            declaration.models.len()
        );

        if verbose {
            for group in &declaration.groups {
                for operation in &group.operations {
                    println!(
                        "      {} {} {}",
                        operation.method.as_str().yellow(),
                        group.path,
                        operation.nickname
                    );
                }
            }
        }
    }

    Ok(())
}

fn generate_command(
    input: &Path,
    output: &Path,
    namespace: &str,
    client_namespace: Option<String>,
    model_namespace: Option<String>,
) -> Result<()> {
    println!(
        "{} Generating client from: {}",
        "→".cyan(),
        input.display()
    );

    let config = GeneratorConfig::new(input, output, namespace, client_namespace, model_namespace)
        .context("Invalid generator configuration")?;

    let generator = Generator::new(config).context("Failed to initialize generator")?;
    let report = generator.generate().context("Generation failed")?;

    println!("\n{}", "✓ Generation successful!".green().bold());
    println!("  Services: {}", report.services);
    println!("  Models: {}", report.models);
    println!("  Files written: {}", report.files);
    println!("  Output: {}", output.display().to_string().yellow());

    Ok(())
}
