//! The complete `vibe` run
//!
//! 1. Expand the seed phenotypes via the ontology (optional)
//! 2. Retrieve and aggregate the gene-disease associations
//! 3. Prioritize the genes
//! 4. Write the output file

use tracing::info;

use crate::ontology::PhenotypeGroup;
use crate::options::{RunMode, RunOptions};
use crate::parser::hp_obo;
use crate::prioritize::Prioritizer;
use crate::query::TsvDataset;
use crate::retriever::GenesForPhenotypeRetriever;
use crate::{GeneDiseaseCollection, OntologyExpander, VibeError, VibeResult};

/// Executes the operation of `options`
///
/// # Errors
///
/// Any error of the individual stages. The output file is only created
/// after all associations are retrieved.
pub fn run(options: &RunOptions) -> VibeResult<()> {
    match options.run_mode() {
        RunMode::None => Ok(()),
        RunMode::GenesForPhenotypes => genes_for_phenotypes(options),
    }
}

fn genes_for_phenotypes(options: &RunOptions) -> VibeResult<()> {
    let (Some(dataset), Some(output)) = (options.dataset(), options.output()) else {
        return Err(VibeError::Config(vec![
            "dataset directory and output file are required".to_string(),
        ]));
    };

    let phenotypes = expand(options)?;

    info!("Retrieving associations from {}", dataset.display());
    let collection = retrieve(dataset, &phenotypes)?;

    info!("Prioritizing genes by {}", options.strategy());
    let genes = options.strategy().prioritize(&collection);

    info!("Writing {} genes to {}", genes.len(), output.display());
    options
        .output_format()
        .write_file(output, &genes, &collection)
}

fn expand(options: &RunOptions) -> VibeResult<PhenotypeGroup> {
    let Some((ontology, algorithm)) = options.expansion() else {
        info!("Using {} phenotypes without expansion", options.phenotypes().len());
        return Ok(options.phenotypes().clone());
    };

    info!("Loading ontology from {}", ontology.display());
    let graph = hp_obo::read_obo_file(ontology)?;

    let phenotypes = OntologyExpander::new(&graph, algorithm).expand(options.phenotypes());
    info!(
        "Expanded {} phenotypes to {} using {}",
        options.phenotypes().len(),
        phenotypes.len(),
        algorithm
    );
    Ok(phenotypes)
}

/// Retrieves the aggregated gene-disease combinations of `phenotypes`
/// from the dataset in `dataset`
///
/// # Errors
///
/// The dataset cannot be read or is corrupt
pub fn retrieve<P: AsRef<std::path::Path>>(
    dataset: P,
    phenotypes: &PhenotypeGroup,
) -> VibeResult<GeneDiseaseCollection> {
    let dataset = TsvDataset::open(dataset)?;
    GenesForPhenotypeRetriever::new(&dataset, phenotypes).run()
}
