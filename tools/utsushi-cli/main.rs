use clap::{Parser, ValueEnum};
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use utsushi::prelude::*;

/// Define a CLI-specific enum for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatCli {
    /// Rust source for every generated unit
    Rust,
    /// Indented plan trees
    Plan,
}

/// Plans and renders conversion mappers from a JSON manifest
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the manifest JSON file (types and directive groups)
    manifest_path: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "rust")]
    format: FormatCli,

    /// Write the generation artifact (bincode) to this path
    #[arg(short, long)]
    artifact: Option<String>,

    /// Compare against a previously written artifact and report whether the output changed
    #[arg(long)]
    compare: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let total_start = Instant::now();

    // --- 1. Manifest Loading ---
    let manifest = Manifest::from_file(&cli.manifest_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to load manifest '{}': {}",
            &cli.manifest_path, e
        ))
    });
    tracing::info!(
        types = manifest.types.len(),
        directives = manifest.directive_count(),
        "manifest loaded"
    );

    let generator = manifest
        .into_generator()
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid type catalog: {}", e)));

    // --- 2. Generation ---
    let generate_start = Instant::now();
    let mut diagnostics = Diagnostics::new();
    let output = generator.generate(&mut diagnostics);
    let generate_duration = generate_start.elapsed();

    // --- 3. Rendering ---
    let choice = match cli.format {
        FormatCli::Rust => RenderChoice::Rust,
        FormatCli::Plan => RenderChoice::PlanTree,
    };
    println!("{}", choice.renderer().render(&output));

    let artifact = GenerationArtifact::new(output, diagnostics.entries().to_vec());
    if let Some(path) = &cli.compare {
        let previous = GenerationArtifact::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load artifact: {}", e)));
        let unchanged = artifact
            .is_identical_to(&previous)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to compare artifacts: {}", e)));
        eprintln!(
            "Output {} since '{}'",
            if unchanged { "unchanged" } else { "changed" },
            path
        );
    }
    if let Some(path) = &cli.artifact {
        artifact
            .save(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to save artifact: {}", e)));
    }

    // --- 4. Summary ---
    for diagnostic in diagnostics.entries() {
        eprintln!("{}", diagnostic);
    }
    eprintln!(
        "{} unit(s), {} operation(s), {} warning(s), {} error(s) in {:?} (total {:?})",
        artifact.output.units.len(),
        artifact.output.operations().count(),
        diagnostics.warnings().count(),
        diagnostics.errors().count(),
        generate_duration,
        total_start.elapsed()
    );

    if diagnostics.has_errors() {
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
