use crate::{
    records::{Patron, PatronId},
    tree::SearchTree,
};

/// Patrons keyed by id in an unbalanced binary search tree
#[derive(Debug, Default)]
pub struct PatronIndex {
    /// Backing tree
    tree: SearchTree<PatronId, Patron>,
}

impl PatronIndex {
    /// Create an empty index
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a patron unless `id` is taken, in which case the stored patron is left as is.
    ///
    /// Returns whether a patron was created.
    pub fn insert(&mut self, id: PatronId, name: &str) -> bool {
        self.tree.insert_with(id, Patron::new(id, name), |_| {})
    }

    /// Find a patron by id
    #[must_use]
    pub fn get(&self, id: PatronId) -> Option<&Patron> {
        self.tree.get(&id)
    }

    /// Find a patron by id for mutation
    pub fn get_mut(&mut self, id: PatronId) -> Option<&mut Patron> {
        self.tree.get_mut(&id)
    }

    /// Whether a patron with `id` exists
    #[must_use]
    pub fn contains(&self, id: PatronId) -> bool {
        self.tree.contains(&id)
    }

    /// Patron stored under `id`, created with a placeholder name if absent
    pub fn get_or_insert(&mut self, id: PatronId) -> &mut Patron {
        self.tree.get_or_insert_with(id, || Patron::placeholder(id))
    }

    /// All patrons in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &Patron> {
        self.tree.values()
    }

    /// Number of patrons
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether no patron exists
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Backing tree, for shape inspection
    #[must_use]
    pub fn tree(&self) -> &SearchTree<PatronId, Patron> {
        &self.tree
    }
}
