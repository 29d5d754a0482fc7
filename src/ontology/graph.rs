use std::collections::HashMap;

use smallvec::SmallVec;

use crate::ontology::OntologyGraph;
use crate::Phenotype;

const DEFAULT_NUM_RELATIVES: usize = 4;
const DEFAULT_NUM_TERMS: usize = 20_000;

type Relatives = SmallVec<[Phenotype; DEFAULT_NUM_RELATIVES]>;

#[derive(Debug, Default, Clone)]
struct Node {
    parents: Relatives,
    children: Relatives,
}

/// An in-memory phenotype ontology
///
/// The graph only stores the `is_a` relations between terms. It is
/// usually built by [`crate::parser::hp_obo`] but can be
/// assembled manually as well.
///
/// # Examples
///
/// ```
/// use vibe::{OntologyGraph, Phenotype, PhenotypeGraph};
///
/// let mut graph = PhenotypeGraph::default();
/// graph.add_parent(1u32, 118u32);
/// graph.add_parent(118u32, 707u32);
///
/// assert_eq!(graph.len(), 3);
/// assert_eq!(graph.parents(&Phenotype::from(707u32)), &[Phenotype::from(118u32)]);
/// assert_eq!(graph.children(&Phenotype::from(1u32)), &[Phenotype::from(118u32)]);
/// ```
#[derive(Debug, Clone)]
pub struct PhenotypeGraph {
    nodes: HashMap<Phenotype, Node>,
}

impl Default for PhenotypeGraph {
    fn default() -> Self {
        Self {
            nodes: HashMap::with_capacity(DEFAULT_NUM_TERMS),
        }
    }
}

impl PhenotypeGraph {
    /// Returns the number of terms
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no terms
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if the term is part of the graph
    pub fn contains(&self, id: &Phenotype) -> bool {
        self.nodes.contains_key(id)
    }

    /// Adds a term without any relations
    ///
    /// Adding an existing term has no effect
    pub fn insert_term<I: Into<Phenotype>>(&mut self, id: I) {
        self.nodes.entry(id.into()).or_default();
    }

    /// Connects `child` to its `parent` in an `is_a` relation
    ///
    /// Missing terms are added to the graph.
    pub fn add_parent<I: Into<Phenotype>, J: Into<Phenotype>>(&mut self, parent_id: I, child_id: J) {
        let parent_id = parent_id.into();
        let child_id = child_id.into();

        let child = self.nodes.entry(child_id).or_default();
        if !child.parents.contains(&parent_id) {
            child.parents.push(parent_id);
        }

        let parent = self.nodes.entry(parent_id).or_default();
        if !parent.children.contains(&child_id) {
            parent.children.push(child_id);
        }
    }
}

impl OntologyGraph for PhenotypeGraph {
    fn parents(&self, id: &Phenotype) -> &[Phenotype] {
        self.nodes
            .get(id)
            .map(|node| &node.parents[..])
            .unwrap_or(&[])
    }

    fn children(&self, id: &Phenotype) -> &[Phenotype] {
        self.nodes
            .get(id)
            .map(|node| &node.children[..])
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn add_relations() {
        let mut graph = PhenotypeGraph::default();
        graph.insert_term(1u32);
        graph.add_parent(1u32, 2u32);
        graph.add_parent(1u32, 3u32);
        graph.add_parent(2u32, 3u32);
        graph.add_parent(2u32, 3u32);

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.children(&1u32.into()).len(), 2);
        assert_eq!(graph.parents(&3u32.into()).len(), 2);
        assert_eq!(graph.children(&2u32.into()), &[Phenotype::from(3u32)]);
    }

    #[test]
    fn unknown_term() {
        let graph = PhenotypeGraph::default();
        assert!(graph.is_empty());
        assert!(graph.parents(&1u32.into()).is_empty());
        assert!(graph.children(&1u32.into()).is_empty());
        assert!(!graph.contains(&1u32.into()));
    }
}
