use std::collections::{BTreeMap, HashSet};
use std::fmt::Display;

use crate::annotations::{Disease, DiseaseId, Gene, GeneId, PubmedEvidence, Source};

/// The evidence citations of one [`Source`]
pub type EvidenceSet = HashSet<PubmedEvidence>;

/// The identity of a [`GeneDiseaseCombination`], its gene and disease ids
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct CombinationKey {
    gene: GeneId,
    disease: DiseaseId,
}

impl CombinationKey {
    /// The id of the gene
    pub fn gene(&self) -> &GeneId {
        &self.gene
    }

    /// The id of the disease
    pub fn disease(&self) -> &DiseaseId {
        &self.disease
    }
}

impl Display for CombinationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.gene, self.disease)
    }
}

/// A unique gene-disease pair with the provenance of its association
///
/// Each combination counts how often every [`Source`] reported the
/// association and collects the [`PubmedEvidence`] citations per source.
///
/// There are two ways to compare combinations:
/// - [`GeneDiseaseCombination::identity_eq`] only compares gene and disease.
///   This is how [`GeneDiseaseCollection`](`crate::GeneDiseaseCollection`)
///   deduplicates combinations.
/// - [`GeneDiseaseCombination::all_fields_eq`] additionally compares the
///   score, the source counts and all evidence (including publication years).
///
/// # Examples
///
/// ```
/// use vibe::annotations::{Disease, DiseaseId, Gene, GeneId, PubmedEvidence, Source};
/// use vibe::GeneDiseaseCombination;
///
/// let gene = Gene::new(GeneId::from(1u32), "A1BG", "");
/// let disease = Disease::new(DiseaseId::from(123456u32), "");
/// let source = Source::try_from("http://rdf.disgenet.org/v6.0.0/void/BEFREE").unwrap();
/// let evidence = PubmedEvidence::try_new("http://identifiers.org/pubmed/1", Some(2000)).unwrap();
///
/// let mut combination = GeneDiseaseCombination::new(gene, disease, Some(0.42));
/// combination.add(&source);
/// combination.add_with_evidence(&source, evidence.clone());
/// combination.add_with_evidence(&source, evidence);
///
/// assert_eq!(combination.count_for_source(&source), 3);
/// assert_eq!(combination.evidence_for_source(&source).unwrap().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GeneDiseaseCombination {
    gene: Gene,
    disease: Disease,
    score: Option<f64>,
    sources_count: BTreeMap<Source, u32>,
    sources_evidence: BTreeMap<Source, EvidenceSet>,
}

impl GeneDiseaseCombination {
    /// Constructs a new combination without any sources
    pub fn new(gene: Gene, disease: Disease, score: Option<f64>) -> Self {
        Self {
            gene,
            disease,
            score,
            sources_count: BTreeMap::new(),
            sources_evidence: BTreeMap::new(),
        }
    }

    /// The gene of the combination
    pub fn gene(&self) -> &Gene {
        &self.gene
    }

    /// The disease of the combination
    pub fn disease(&self) -> &Disease {
        &self.disease
    }

    /// The gene-disease association score
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    /// The identity of the combination
    pub fn key(&self) -> CombinationKey {
        CombinationKey {
            gene: *self.gene.id(),
            disease: *self.disease.id(),
        }
    }

    /// Registers one occurrence of `source` without evidence
    pub fn add(&mut self, source: &Source) {
        *self.sources_count.entry(source.clone()).or_default() += 1;
    }

    /// Registers one occurrence of `source`, supported by `evidence`
    ///
    /// The occurrence is always counted, but the evidence is only stored
    /// once per source (citations are equal if their URI is equal).
    pub fn add_with_evidence(&mut self, source: &Source, evidence: PubmedEvidence) {
        self.add(source);
        self.sources_evidence
            .entry(source.clone())
            .or_default()
            .insert(evidence);
    }

    /// The number of occurrences per source
    pub fn sources_count(&self) -> &BTreeMap<Source, u32> {
        &self.sources_count
    }

    /// The sources with at least one evidence citation, in order
    pub fn sources_with_evidence(&self) -> Vec<&Source> {
        self.sources_evidence
            .iter()
            .filter(|(_, evidence)| !evidence.is_empty())
            .map(|(source, _)| source)
            .collect()
    }

    /// The number of occurrences of `source`, `0` if it was never added
    pub fn count_for_source(&self, source: &Source) -> u32 {
        self.sources_count.get(source).copied().unwrap_or(0)
    }

    /// The evidence of `source`
    ///
    /// Returns `None` if no evidence was ever added for the source
    pub fn evidence_for_source(&self, source: &Source) -> Option<&EvidenceSet> {
        self.sources_evidence.get(source)
    }

    /// The evidence of all sources combined
    pub fn all_evidence(&self) -> HashSet<&PubmedEvidence> {
        self.sources_evidence.values().flatten().collect()
    }

    /// The evidence of all sources combined, ordered by the numeric PubMed id
    pub fn all_evidence_ordered(&self) -> Vec<&PubmedEvidence> {
        let mut evidence: Vec<&PubmedEvidence> = self.all_evidence().into_iter().collect();
        evidence.sort_by(|a, b| a.cmp_pubmed_id(b));
        evidence
    }

    /// The PubMed ids of all sources combined, ordered numerically
    pub fn all_evidence_simplified_ordered(&self) -> Vec<&str> {
        self.all_evidence_ordered()
            .into_iter()
            .map(PubmedEvidence::pubmed_id)
            .collect()
    }

    /// Returns `true` if both combinations refer to the same gene and disease
    pub fn identity_eq(&self, other: &GeneDiseaseCombination) -> bool {
        self.gene == other.gene && self.disease == other.disease
    }

    /// Returns `true` if gene, disease, score, source counts and evidence
    /// (including publication years) are equal
    pub fn all_fields_eq(&self, other: &GeneDiseaseCombination) -> bool {
        self.identity_eq(other)
            && self.score == other.score
            && self.sources_count == other.sources_count
            && evidence_eq(&self.sources_evidence, &other.sources_evidence)
    }
}

fn evidence_eq(a: &BTreeMap<Source, EvidenceSet>, b: &BTreeMap<Source, EvidenceSet>) -> bool {
    a.len() == b.len()
        && a.iter().all(|(source, evidence)| {
            let Some(other) = b.get(source) else {
                return false;
            };
            evidence.len() == other.len()
                && evidence
                    .iter()
                    .all(|e| other.get(e).is_some_and(|o| e.all_fields_eq(o)))
        })
}

impl Display for GeneDiseaseCombination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
