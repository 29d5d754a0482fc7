//! Writers for the prioritized genes
//!
//! - [`OutputFormat::Simple`]: the gene symbols in priority order, separated
//!   by `,` on a single line
//! - [`OutputFormat::Detailed`]: one tab-separated line per gene-disease
//!   combination, genes in priority order

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, error};

use crate::annotations::Gene;
use crate::{GeneDiseaseCollection, GeneDiseaseCombination, PrefixedId, VibeError, VibeResult};

const DETAILED_HEADER: [&str; 9] = [
    "gene",
    "gene_symbol",
    "dsi",
    "dpi",
    "disease",
    "disease_name",
    "score",
    "sources",
    "evidence",
];

/// The layout of the output file
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Gene symbols only
    Simple,
    /// All gene-disease combinations with their sources and evidence
    #[default]
    Detailed,
}

impl OutputFormat {
    /// Writes the prioritized `genes` to `writer`
    ///
    /// `collection` is only used by the [`OutputFormat::Detailed`] format.
    ///
    /// # Errors
    ///
    /// [`VibeError::CannotWriteFile`] if writing fails
    pub fn write<W: Write>(
        &self,
        writer: W,
        genes: &[&Gene],
        collection: &GeneDiseaseCollection,
    ) -> VibeResult<()> {
        match self {
            OutputFormat::Simple => write_simple(writer, genes),
            OutputFormat::Detailed => write_detailed(writer, genes, collection),
        }
    }

    /// Creates the file `filename` and writes the prioritized `genes` to it
    ///
    /// # Errors
    ///
    /// [`VibeError::CannotWriteFile`] if the file cannot be created or written
    pub fn write_file<P: AsRef<Path>>(
        &self,
        filename: P,
        genes: &[&Gene],
        collection: &GeneDiseaseCollection,
    ) -> VibeResult<()> {
        let filename = filename.as_ref();
        let file = File::create_new(filename).map_err(|err| {
            error!("Unable to create {}: {}", filename.display(), err);
            VibeError::CannotWriteFile(filename.display().to_string())
        })?;
        self.write(BufWriter::new(file), genes, collection)?;
        debug!("Wrote {} genes to {}", genes.len(), filename.display());
        Ok(())
    }
}

fn write_error<E: std::fmt::Display>(err: E) -> VibeError {
    error!("Unable to write output: {}", err);
    VibeError::CannotWriteFile(err.to_string())
}

/// Writes the gene symbols on one line, separated by `,`
pub fn write_simple<W: Write>(mut writer: W, genes: &[&Gene]) -> VibeResult<()> {
    let symbols: Vec<&str> = genes.iter().map(|gene| gene.symbol()).collect();
    writeln!(writer, "{}", symbols.join(",")).map_err(write_error)?;
    writer.flush().map_err(write_error)
}

/// Writes one tab-separated line per gene-disease combination
///
/// The genes follow the given order, the combinations of each gene follow
/// the order of the collection.
pub fn write_detailed<W: Write>(
    writer: W,
    genes: &[&Gene],
    collection: &GeneDiseaseCollection,
) -> VibeResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);
    wtr.write_record(DETAILED_HEADER).map_err(write_error)?;
    for gene in genes {
        for combination in collection.combinations_for_gene(gene.id()) {
            wtr.write_record(detailed_record(combination))
                .map_err(write_error)?;
        }
    }
    wtr.flush().map_err(write_error)
}

fn optional(value: Option<f64>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

fn detailed_record(combination: &GeneDiseaseCombination) -> [String; 9] {
    let gene = combination.gene();
    let disease = combination.disease();
    let sources: Vec<String> = combination
        .sources_count()
        .iter()
        .map(|(source, count)| format!("{}:{}", source.name(), count))
        .collect();
    [
        gene.id().formatted_id(),
        gene.symbol().to_string(),
        optional(gene.dsi()),
        optional(gene.dpi()),
        disease.id().formatted_id(),
        disease.name().to_string(),
        optional(combination.score()),
        sources.join(";"),
        combination.all_evidence_simplified_ordered().join(","),
    ]
}
