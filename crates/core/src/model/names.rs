use std::collections::btree_set;
use std::collections::BTreeSet;

use crate::model::{Name, NameKind};

static INVALID_NAME: Name = Name::invalid();

/// All distinct candidate names attached to one address, kept in ranked order.
///
/// An empty set is a valid state: the address is known but has no name yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Names {
    names: BTreeSet<Name>,
}

impl Names {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a candidate. Empty text is rejected with `false` and no mutation.
    ///
    /// Re-adding an identical `(text, kind)` pair is accepted but does not grow
    /// the set.
    pub fn add(&mut self, text: &str, kind: NameKind) -> bool {
        if text.is_empty() {
            return false;
        }
        self.names.insert(Name::new(text, kind));
        true
    }

    /// Highest-ranked candidate, or the invalid sentinel when empty.
    pub fn preferred(&self) -> &Name {
        self.names.first().unwrap_or(&INVALID_NAME)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, text: &str, kind: NameKind) -> bool {
        self.names.contains(&Name::new(text, kind))
    }

    /// Candidates in ranked order, best first.
    pub fn iter(&self) -> btree_set::Iter<'_, Name> {
        self.names.iter()
    }
}

impl<'a> IntoIterator for &'a Names {
    type Item = &'a Name;
    type IntoIter = btree_set::Iter<'a, Name>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}
