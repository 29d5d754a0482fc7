//! Ranking of the genes of a [`GeneDiseaseCollection`]
//!
//! All strategies sort stable: genes with an equal key keep the order in
//! which they were first encountered in the collection. Genes without a
//! value for the key are ranked last.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Display;

use tracing::{debug, error};

use crate::annotations::{Gene, GeneId};
use crate::{GeneDiseaseCollection, VibeError, VibeResult};

/// Ranks the genes of a [`GeneDiseaseCollection`]
pub trait Prioritizer {
    /// Returns all unique genes of the collection, most relevant first
    fn prioritize<'a>(&self, collection: &'a GeneDiseaseCollection) -> Vec<&'a Gene>;
}

/// The available prioritization strategies
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Descending by the highest association score of each gene
    #[default]
    ScoreMax,
    /// Descending by Disease Specificity Index
    DsiMax,
    /// Ascending by Disease Pleiotropy Index
    DpiMin,
}

impl Strategy {
    /// The name of the strategy, as used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::ScoreMax => "score-max",
            Strategy::DsiMax => "dsi-max",
            Strategy::DpiMin => "dpi-min",
        }
    }

    /// Returns the strategy with the given name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "score-max" => Some(Strategy::ScoreMax),
            "dsi-max" => Some(Strategy::DsiMax),
            "dpi-min" => Some(Strategy::DpiMin),
            _ => None,
        }
    }

    fn keys<'a>(&self, collection: &'a GeneDiseaseCollection) -> Vec<(&'a Gene, Option<f64>)> {
        let genes = collection.genes();
        match self {
            Strategy::ScoreMax => {
                let mut scores: HashMap<GeneId, f64> = HashMap::with_capacity(genes.len());
                for combination in collection {
                    if let Some(score) = finite(combination.score()) {
                        scores
                            .entry(*combination.gene().id())
                            .and_modify(|best| *best = best.max(score))
                            .or_insert(score);
                    }
                }
                genes
                    .into_iter()
                    .map(|gene| (gene, scores.get(gene.id()).copied()))
                    .collect()
            }
            Strategy::DsiMax => genes
                .into_iter()
                .map(|gene| (gene, finite(gene.dsi())))
                .collect(),
            Strategy::DpiMin => genes
                .into_iter()
                .map(|gene| (gene, finite(gene.dpi())))
                .collect(),
        }
    }

    fn compare(&self, a: Option<f64>, b: Option<f64>) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => match self {
                Strategy::ScoreMax | Strategy::DsiMax => b.total_cmp(&a),
                Strategy::DpiMin => a.total_cmp(&b),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// `NaN` and infinite values rank like missing values
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|value| value.is_finite())
}

impl Prioritizer for Strategy {
    /// Ranks the genes of the collection
    ///
    /// # Examples
    ///
    /// ```
    /// use vibe::annotations::{Disease, DiseaseId, Gene, GeneId};
    /// use vibe::prioritize::{Prioritizer, Strategy};
    /// use vibe::{GeneDiseaseCollection, GeneDiseaseCombination};
    ///
    /// let disease = Disease::new(DiseaseId::from(1u32), "");
    /// let mut collection = GeneDiseaseCollection::default();
    /// for (id, score) in [(1u32, 0.5), (2, 0.8), (3, 0.2)] {
    ///     let gene = Gene::new(GeneId::from(id), &format!("G{id}"), "");
    ///     collection.get_or_insert(GeneDiseaseCombination::new(gene, disease.clone(), Some(score)));
    /// }
    ///
    /// let ranking: Vec<&str> = Strategy::ScoreMax
    ///     .prioritize(&collection)
    ///     .iter()
    ///     .map(|gene| gene.symbol())
    ///     .collect();
    /// assert_eq!(ranking, ["G2", "G1", "G3"]);
    /// ```
    fn prioritize<'a>(&self, collection: &'a GeneDiseaseCollection) -> Vec<&'a Gene> {
        let mut keys = self.keys(collection);
        // `sort_by` is stable
        keys.sort_by(|(_, a), (_, b)| self.compare(*a, *b));
        debug!("Prioritized {} genes by {}", keys.len(), self);
        keys.into_iter().map(|(gene, _)| gene).collect()
    }
}

impl TryFrom<&str> for Strategy {
    type Error = VibeError;
    fn try_from(value: &str) -> VibeResult<Self> {
        Strategy::from_name(value).ok_or_else(|| {
            error!("Unknown prioritization strategy {}", value);
            VibeError::InvalidInput(format!("unknown prioritization strategy: {value}"))
        })
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
