use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use swagger2apis::config::{load_config, merge_with_cli_args};
use swagger2apis::generators::GeneratorRegistry;
use swagger2apis::parsers::ParserRegistry;
use swagger2apis::transform;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the Swagger document (YAML or JSON)
    #[arg(short, long)]
    spec: Option<PathBuf>,

    /// Output directory for generated code
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to config file (overrides default location)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Namespace for the generated interfaces (overrides every generation)
    #[arg(short, long)]
    namespace: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swagger2apis=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let merged_config = merge_with_cli_args(config, args.spec, args.output, args.namespace);

    let input_config = merged_config
        .input
        .ok_or_else(|| anyhow::anyhow!("No input source specified. Use --spec or configure input in config file"))?;

    info!("Reading input from {:?}", input_config.source);

    let parser_registry = ParserRegistry::new();

    let format = input_config.format.clone().unwrap_or_else(|| {
        parser_registry
            .detect_format(&input_config.source)
            .unwrap_or("swagger")
            .to_string()
    });

    let parser = parser_registry
        .get(&format)
        .ok_or_else(|| anyhow::anyhow!("Unknown input format: {}", format))?;

    let document = parser
        .parse(&input_config.source)
        .with_context(|| format!("Failed to parse {} input", format))?;

    let model = transform(&document);
    info!(
        "Resolved {} endpoints and {} interfaces",
        model.apis.len(),
        model.interfaces.len()
    );

    let generator_registry = GeneratorRegistry::new();

    let output_dir = merged_config.output.unwrap_or_else(|| PathBuf::from("generated"));
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    let mut generated_count = 0;
    for gen_config in &merged_config.generations {
        if !gen_config.enabled {
            info!("Skipping disabled generator: {}", gen_config.generator);
            continue;
        }

        let generator = generator_registry.get(&gen_config.generator).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown generator: {} (available: {})",
                gen_config.generator,
                generator_registry.available_generators().join(", ")
            )
        })?;

        generator.validate_config(gen_config)?;

        let output = generator
            .generate(&model, gen_config)
            .with_context(|| format!("Failed to generate with '{}'", gen_config.generator))?;

        let output_path = output_dir.join(&output.filename);
        fs::write(&output_path, output.content)
            .with_context(|| format!("Failed to write output file: {:?}", output_path))?;

        info!("Generated {:?}", output_path);
        generated_count += 1;
    }

    if generated_count == 0 {
        warn!("No generators were enabled. Check your configuration.");
    } else {
        info!("Generated {} file(s)", generated_count);
    }

    Ok(())
}
