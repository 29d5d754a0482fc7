//! Expansion of seed phenotypes via the phenotype ontology
//!
//! A patient's phenotypes are often recorded with terms that are more or
//! less specific than the terms used in the association data. The
//! [`OntologyExpander`] widens the seed terms to related terms before
//! the associations are queried.
//!
//! The ontology itself is accessed through the [`OntologyGraph`] trait,
//! [`PhenotypeGraph`] is the in-memory implementation.

use std::collections::{HashMap, VecDeque};
use std::fmt::Display;

use tracing::{debug, error};

use crate::{Phenotype, VibeError, VibeResult};

mod graph;
mod group;

pub use graph::PhenotypeGraph;
pub use group::{PhenotypeGroup, Phenotypes};

/// Access to the direct `is_a` relations of a phenotype ontology
pub trait OntologyGraph {
    /// Returns the direct parents (more general terms) of `id`
    ///
    /// Unknown terms have no parents
    fn parents(&self, id: &Phenotype) -> &[Phenotype];

    /// Returns the direct children (more specific terms) of `id`
    ///
    /// Unknown terms have no children
    fn children(&self, id: &Phenotype) -> &[Phenotype];
}

/// The algorithm used to find related phenotypes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OntologyAlgorithm {
    /// All descendants of the seeds, at any depth
    Children,
    /// All terms within the given number of `is_a` edges of a seed,
    /// traversing to ancestors and descendants alike
    Distance(usize),
}

impl OntologyAlgorithm {
    /// Constructs the algorithm from its name, `children` or `distance`
    ///
    /// # Errors
    ///
    /// [`VibeError::InvalidInput`] if the name is unknown or the `distance`
    /// algorithm lacks a maximum distance
    ///
    /// # Examples
    ///
    /// ```
    /// use vibe::OntologyAlgorithm;
    ///
    /// assert_eq!(OntologyAlgorithm::try_new("children", None).unwrap(), OntologyAlgorithm::Children);
    /// assert_eq!(OntologyAlgorithm::try_new("distance", Some(2)).unwrap(), OntologyAlgorithm::Distance(2));
    /// assert!(OntologyAlgorithm::try_new("distance", None).is_err());
    /// assert!(OntologyAlgorithm::try_new("parents", None).is_err());
    /// ```
    pub fn try_new(name: &str, max_distance: Option<usize>) -> VibeResult<Self> {
        match (name, max_distance) {
            ("children", _) => Ok(OntologyAlgorithm::Children),
            ("distance", Some(max)) => Ok(OntologyAlgorithm::Distance(max)),
            ("distance", None) => {
                error!("The distance algorithm requires a maximum distance");
                Err(VibeError::InvalidInput(
                    "the distance algorithm requires a maximum distance".to_string(),
                ))
            }
            _ => {
                error!("Unknown ontology algorithm {}", name);
                Err(VibeError::InvalidInput(format!(
                    "unknown ontology algorithm: {name}"
                )))
            }
        }
    }

    /// The name of the algorithm
    pub fn name(&self) -> &'static str {
        match self {
            OntologyAlgorithm::Children => "children",
            OntologyAlgorithm::Distance(_) => "distance",
        }
    }
}

impl Display for OntologyAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OntologyAlgorithm::Children => write!(f, "children"),
            OntologyAlgorithm::Distance(max) => write!(f, "distance (max {max})"),
        }
    }
}

/// Expands seed phenotypes to related terms of the ontology
///
/// The expansion is a breadth-first search starting from all seeds. The
/// result always contains the seeds themselves.
///
/// # Examples
///
/// ```
/// use vibe::{OntologyAlgorithm, OntologyExpander, Phenotype, PhenotypeGraph};
///
/// // 3 -> 1 -> 2 -> 4
/// let mut graph = PhenotypeGraph::default();
/// graph.add_parent(3u32, 1u32);
/// graph.add_parent(1u32, 2u32);
/// graph.add_parent(2u32, 4u32);
///
/// let seeds = [Phenotype::from(1u32)];
///
/// let children = OntologyExpander::new(&graph, OntologyAlgorithm::Children).expand(seeds);
/// assert_eq!(children.len(), 3); // 1, 2, 4
///
/// let near = OntologyExpander::new(&graph, OntologyAlgorithm::Distance(1)).expand(seeds);
/// assert_eq!(near.len(), 3); // 1, 2, 3
/// ```
pub struct OntologyExpander<'a, G: ?Sized> {
    graph: &'a G,
    algorithm: OntologyAlgorithm,
}

impl<'a, G: OntologyGraph + ?Sized> OntologyExpander<'a, G> {
    /// Constructs a new expander
    pub fn new(graph: &'a G, algorithm: OntologyAlgorithm) -> Self {
        Self { graph, algorithm }
    }

    /// The algorithm of the expander
    pub fn algorithm(&self) -> OntologyAlgorithm {
        self.algorithm
    }

    /// Returns the seeds and all related terms
    pub fn expand<I: IntoIterator<Item = Phenotype>>(&self, seeds: I) -> PhenotypeGroup {
        let ids: Vec<Phenotype> = self.distances(seeds).into_keys().collect();
        PhenotypeGroup::from(ids)
    }

    /// Returns the seeds and all related terms with their shortest distance
    /// (number of edges) to any of the seeds
    pub fn distances<I: IntoIterator<Item = Phenotype>>(&self, seeds: I) -> HashMap<Phenotype, usize> {
        let mut distances: HashMap<Phenotype, usize> = HashMap::new();
        let mut queue: VecDeque<Phenotype> = VecDeque::new();

        for seed in seeds {
            if distances.insert(seed, 0).is_none() {
                queue.push_back(seed);
            }
        }
        let n_seeds = queue.len();

        // All seeds start at distance 0, so the first visit of a term
        // is always its shortest distance
        while let Some(term) = queue.pop_front() {
            let distance = distances[&term];
            if let OntologyAlgorithm::Distance(max) = self.algorithm {
                if distance >= max {
                    continue;
                }
            }

            let parents: &[Phenotype] = match self.algorithm {
                OntologyAlgorithm::Children => &[],
                OntologyAlgorithm::Distance(_) => self.graph.parents(&term),
            };

            for next in self.graph.children(&term).iter().chain(parents) {
                if !distances.contains_key(next) {
                    distances.insert(*next, distance + 1);
                    queue.push_back(*next);
                }
            }
        }

        debug!(
            "Expanded {} seeds to {} phenotypes using {}",
            n_seeds,
            distances.len(),
            self.algorithm
        );
        distances
    }
}
