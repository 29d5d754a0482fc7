//! Folding of raw association rows into a [`GeneDiseaseCollection`]

use std::collections::{HashMap, HashSet};

use tracing::{debug, error, info};

use crate::annotations::{Disease, DiseaseId, Gene, GeneId, Source};
use crate::ontology::PhenotypeGroup;
use crate::query::{AssociationRow, QueryRunner};
use crate::{GeneDiseaseCollection, GeneDiseaseCombination, VibeError, VibeResult};

/// Retrieves all gene-disease combinations of the genes that are
/// associated to a set of phenotypes
///
/// Genes and diseases are deduplicated by their id, the first row that
/// mentions a gene or disease defines its name and other properties.
///
/// # Examples
///
/// ```no_run
/// use vibe::ontology::PhenotypeGroup;
/// use vibe::query::TsvDataset;
/// use vibe::retriever::GenesForPhenotypeRetriever;
/// use vibe::Phenotype;
///
/// let dataset = TsvDataset::open("data/disgenet").unwrap();
/// let phenotypes: PhenotypeGroup = [Phenotype::try_from("hp:0002451").unwrap()]
///     .into_iter()
///     .collect();
///
/// let collection = GenesForPhenotypeRetriever::new(&dataset, &phenotypes)
///     .run()
///     .unwrap();
/// println!("{} gene-disease combinations", collection.len());
/// ```
pub struct GenesForPhenotypeRetriever<'a, Q: ?Sized> {
    query: &'a Q,
    phenotypes: &'a PhenotypeGroup,
    genes: HashMap<GeneId, Gene>,
    diseases: HashMap<DiseaseId, Disease>,
    collection: GeneDiseaseCollection,
}

impl<'a, Q: QueryRunner + ?Sized> GenesForPhenotypeRetriever<'a, Q> {
    /// Constructs a new retriever
    pub fn new(query: &'a Q, phenotypes: &'a PhenotypeGroup) -> Self {
        Self {
            query,
            phenotypes,
            genes: HashMap::new(),
            diseases: HashMap::new(),
            collection: GeneDiseaseCollection::new(),
        }
    }

    /// Runs the retrieval and returns the collection
    ///
    /// # Errors
    ///
    /// - [`VibeError::UnknownSource`]: a row references a source that is
    ///   not in the source catalog of the dataset. This indicates a corrupt
    ///   dataset and aborts the retrieval.
    /// - Any error of the [`QueryRunner`] or of an invalid row
    pub fn run(mut self) -> VibeResult<GeneDiseaseCollection> {
        let sources: HashSet<Source> = self.query.sources()?.into_iter().collect();
        debug!("Source catalog contains {} sources", sources.len());

        let mut n_rows = 0usize;
        for row in self.query.associations(self.phenotypes)? {
            self.add_row(&sources, &row?)?;
            n_rows += 1;
        }

        info!(
            "Aggregated {} associations into {} gene-disease combinations",
            n_rows,
            self.collection.len()
        );
        Ok(self.collection)
    }

    fn add_row(&mut self, sources: &HashSet<Source>, row: &AssociationRow) -> VibeResult<()> {
        let gene = self.gene(row)?;
        let disease = self.disease(row)?;

        let source = row.source()?;
        let Some(source) = sources.get(&source) else {
            error!("{} is not part of the source catalog", source);
            return Err(VibeError::UnknownSource(source.to_string()));
        };

        let score = row.score()?;
        let combination = self
            .collection
            .get_or_insert(GeneDiseaseCombination::new(gene, disease, score));

        match row.evidence()? {
            Some(evidence) => combination.add_with_evidence(source, evidence),
            None => combination.add(source),
        }
        Ok(())
    }

    fn gene(&mut self, row: &AssociationRow) -> VibeResult<Gene> {
        let gene = row.gene()?;
        Ok(self.genes.entry(*gene.id()).or_insert(gene).clone())
    }

    fn disease(&mut self, row: &AssociationRow) -> VibeResult<Disease> {
        let disease = row.disease()?;
        Ok(self.diseases.entry(*disease.id()).or_insert(disease).clone())
    }
}
