use crate::Phenotype;

/// A set of [`Phenotype`]s
///
/// Each term can occur only once in the group and the terms are kept in
/// ascending order, so iterating a group is deterministic and can be
/// repeated any number of times.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PhenotypeGroup {
    ids: Vec<Phenotype>,
}

impl PhenotypeGroup {
    /// Constructs a new, empty [`PhenotypeGroup`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a new, empty [`PhenotypeGroup`] with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
        }
    }

    /// Returns `true` if the group contains no [`Phenotype`]s
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of [`Phenotype`]s in the group
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Adds a new [`Phenotype`] to the group
    ///
    /// Returns whether the `Phenotype` was newly inserted. That is:
    ///
    /// - If the group did not previously contain this `Phenotype`, true is returned.
    /// - If the group already contained this `Phenotype`, false is returned.
    pub fn insert<I: Into<Phenotype>>(&mut self, id: I) -> bool {
        let id = id.into();
        match self.ids.binary_search(&id) {
            Ok(_) => false,
            Err(idx) => {
                self.ids.insert(idx, id);
                true
            }
        }
    }

    /// Returns `true` if the group contains the [`Phenotype`]
    pub fn contains(&self, id: &Phenotype) -> bool {
        self.ids.binary_search(id).is_ok()
    }

    /// Returns an Iterator of the [`Phenotype`]s inside the group
    pub fn iter(&self) -> Phenotypes<'_> {
        Phenotypes::new(self.ids.iter())
    }
}

impl From<Vec<Phenotype>> for PhenotypeGroup {
    fn from(mut ids: Vec<Phenotype>) -> Self {
        ids.sort_unstable();
        ids.dedup();
        Self { ids }
    }
}

impl FromIterator<Phenotype> for PhenotypeGroup {
    fn from_iter<T: IntoIterator<Item = Phenotype>>(iter: T) -> Self {
        Self::from(iter.into_iter().collect::<Vec<Phenotype>>())
    }
}

impl<'a> IntoIterator for &'a PhenotypeGroup {
    type Item = Phenotype;
    type IntoIter = Phenotypes<'a>;

    fn into_iter(self) -> Phenotypes<'a> {
        Phenotypes::new(self.ids.iter())
    }
}

/// An iterator over [`Phenotype`]s
pub struct Phenotypes<'a> {
    inner: std::slice::Iter<'a, Phenotype>,
}

impl<'a> Phenotypes<'a> {
    fn new(inner: std::slice::Iter<'a, Phenotype>) -> Self {
        Self { inner }
    }
}

impl Iterator for Phenotypes<'_> {
    type Item = Phenotype;
    fn next(&mut self) -> Option<Phenotype> {
        self.inner.next().copied()
    }
}
