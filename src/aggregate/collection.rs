use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use tracing::error;

use crate::aggregate::combination::{CombinationKey, GeneDiseaseCombination};
use crate::annotations::{Gene, GeneId};
use crate::{VibeError, VibeResult};

#[cfg_attr(doc, aquamarine::aquamarine)]
/// All unique [`GeneDiseaseCombination`]s of one retrieval run
///
/// The collection owns the combinations and deduplicates them by their
/// identity (gene and disease). Callers only ever hold references that
/// were handed out by the collection itself. Iteration follows the order
/// in which the combinations were first added.
///
/// ```mermaid
/// erDiagram
///     COLLECTION ||--o{ COMBINATION : owns
///     COMBINATION ||--|| GENE : gene
///     COMBINATION ||--|| DISEASE : disease
///     COMBINATION ||--o{ SOURCE : "count per source"
///     SOURCE ||--o{ EVIDENCE : "evidence per source"
/// ```
///
/// # Examples
///
/// ```
/// use vibe::annotations::{Disease, DiseaseId, Gene, GeneId, Source};
/// use vibe::{GeneDiseaseCollection, GeneDiseaseCombination};
///
/// let gene = Gene::new(GeneId::from(1u32), "A1BG", "");
/// let disease = Disease::new(DiseaseId::from(123456u32), "");
/// let source = Source::try_from("http://rdf.disgenet.org/v6.0.0/void/BEFREE").unwrap();
///
/// let mut collection = GeneDiseaseCollection::default();
/// collection
///     .get_or_insert(GeneDiseaseCombination::new(gene.clone(), disease.clone(), Some(0.4)))
///     .add(&source);
///
/// // a second row for the same pair, the score of the candidate is ignored
/// let candidate = GeneDiseaseCombination::new(gene, disease, Some(0.9));
/// collection.get_or_insert(candidate.clone()).add(&source);
///
/// assert_eq!(collection.len(), 1);
/// let stored = collection.get(&candidate).unwrap();
/// assert_eq!(stored.score(), Some(0.4));
/// assert_eq!(stored.count_for_source(&source), 2);
/// ```
#[derive(Debug, Default, Clone)]
pub struct GeneDiseaseCollection {
    combinations: Vec<GeneDiseaseCombination>,
    index: HashMap<CombinationKey, usize>,
}

impl GeneDiseaseCollection {
    /// Constructs a new, empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of combinations
    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    /// Returns `true` if the collection contains no combinations
    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    /// Returns the stored combination with the same identity as `candidate`
    ///
    /// The stored instance is returned, not the `candidate`, so its sources
    /// and evidence reflect everything added so far.
    pub fn get(&self, candidate: &GeneDiseaseCombination) -> Option<&GeneDiseaseCombination> {
        self.get_by_key(&candidate.key())
    }

    /// Returns the stored combination for the given key
    pub fn get_by_key(&self, key: &CombinationKey) -> Option<&GeneDiseaseCombination> {
        self.index.get(key).map(|idx| &self.combinations[*idx])
    }

    /// Returns a mutable reference to the stored combination with the same
    /// identity as `candidate`
    pub fn get_mut(
        &mut self,
        candidate: &GeneDiseaseCombination,
    ) -> Option<&mut GeneDiseaseCombination> {
        let idx = *self.index.get(&candidate.key())?;
        Some(&mut self.combinations[idx])
    }

    /// Registers a new combination
    ///
    /// # Errors
    ///
    /// [`VibeError::DuplicateCombination`] if a combination with the same
    /// gene and disease is already present. Use [`GeneDiseaseCollection::get`]
    /// or [`GeneDiseaseCollection::get_or_insert`] to merge instead.
    pub fn add(
        &mut self,
        combination: GeneDiseaseCombination,
    ) -> VibeResult<&mut GeneDiseaseCombination> {
        match self.index.entry(combination.key()) {
            Entry::Occupied(_) => {
                error!("{} is already part of the collection", combination);
                Err(VibeError::DuplicateCombination(combination.to_string()))
            }
            Entry::Vacant(entry) => {
                let idx = self.combinations.len();
                entry.insert(idx);
                self.combinations.push(combination);
                Ok(&mut self.combinations[idx])
            }
        }
    }

    /// Returns the stored combination with the identity of `candidate`,
    /// inserting `candidate` first if there is none
    pub fn get_or_insert(
        &mut self,
        candidate: GeneDiseaseCombination,
    ) -> &mut GeneDiseaseCombination {
        let idx = match self.index.entry(candidate.key()) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let idx = self.combinations.len();
                entry.insert(idx);
                self.combinations.push(candidate);
                idx
            }
        };
        &mut self.combinations[idx]
    }

    /// Returns an iterator of all combinations in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, GeneDiseaseCombination> {
        self.combinations.iter()
    }

    /// Returns all unique genes in the order they were first encountered
    pub fn genes(&self) -> Vec<&Gene> {
        let mut seen: HashSet<GeneId> = HashSet::new();
        self.combinations
            .iter()
            .map(GeneDiseaseCombination::gene)
            .filter(|gene| seen.insert(*gene.id()))
            .collect()
    }

    /// Returns all combinations of one gene in insertion order
    pub fn combinations_for_gene<'a>(
        &'a self,
        gene: &'a GeneId,
    ) -> impl Iterator<Item = &'a GeneDiseaseCombination> + 'a {
        self.combinations
            .iter()
            .filter(move |combination| combination.gene().id() == gene)
    }
}

impl<'a> IntoIterator for &'a GeneDiseaseCollection {
    type Item = &'a GeneDiseaseCombination;
    type IntoIter = std::slice::Iter<'a, GeneDiseaseCombination>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
