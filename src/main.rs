use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vibe::options::{OptionsBuilder, RunMode};
use vibe::output::OutputFormat;

/// Retrieves the genes associated to a set of phenotypes and prioritizes them
#[derive(Parser, Debug)]
#[command(name = "vibe", version, about)]
struct Cli {
    /// Seed phenotype, e.g. hp:0000123 (can be used multiple times)
    #[arg(short = 'p', long = "phenotype")]
    phenotypes: Vec<String>,

    /// hp.obo file used to expand the phenotypes
    #[arg(short = 'w', long)]
    ontology: Option<PathBuf>,

    /// Expansion algorithm: children or distance
    #[arg(short = 'n', long)]
    algorithm: Option<String>,

    /// Maximum distance of the distance algorithm
    #[arg(short = 'm', long)]
    max_distance: Option<String>,

    /// Directory of the association dataset
    #[arg(short = 'd', long)]
    dataset: Option<PathBuf>,

    /// Output file, must not exist yet
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Prioritization strategy: score-max, dsi-max or dpi-min
    #[arg(short = 's', long = "sort")]
    strategy: Option<String>,

    /// Only write the gene symbols, separated by ","
    #[arg(short = 'l', long)]
    simple_output: bool,

    /// Log debug information
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    fn options_builder(&self) -> OptionsBuilder {
        let mut builder = OptionsBuilder::new(RunMode::GenesForPhenotypes);
        for phenotype in &self.phenotypes {
            builder.add_phenotype(phenotype);
        }
        if let Some(ontology) = &self.ontology {
            builder.set_ontology(ontology);
        }
        if let Some(algorithm) = &self.algorithm {
            builder.set_algorithm(algorithm);
        }
        if let Some(max_distance) = &self.max_distance {
            builder.set_max_distance(max_distance);
        }
        if let Some(dataset) = &self.dataset {
            builder.set_dataset(dataset);
        }
        if let Some(output) = &self.output {
            builder.set_output(output);
        }
        if let Some(strategy) = &self.strategy {
            builder.set_strategy(strategy);
        }
        if self.simple_output {
            builder.set_output_format(OutputFormat::Simple);
        }
        builder
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let options = cli.options_builder().build()?;
    vibe::pipeline::run(&options)?;
    Ok(())
}
