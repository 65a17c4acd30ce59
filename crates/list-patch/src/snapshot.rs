//! Sectioned list snapshots.
//!
//! A [`ListSnapshot`] is an ordered sequence of sections, each an ordered
//! sequence of string items. It is the unit of state the patch machinery
//! works over: a batch update takes one snapshot (the prior) to the next
//! (the posterior). Shape is exactly what the last applied edit produced;
//! there is no implicit padding.

use std::fmt;

// ── Position ──────────────────────────────────────────────────────────────

/// A (section, item) pair identifying one slot in a snapshot.
///
/// Ordered by section first, then item, so instruction sets built from
/// positions iterate in a deterministic order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub section: usize,
    pub item: usize,
}

impl Position {
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.section, self.item)
    }
}

impl From<(usize, usize)> for Position {
    fn from((section, item): (usize, usize)) -> Self {
        Self { section, item }
    }
}

// ── ListSnapshot ──────────────────────────────────────────────────────────

/// An ordered grid of string items, grouped into sections.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListSnapshot {
    sections: Vec<Vec<String>>,
}

impl ListSnapshot {
    /// An empty snapshot (zero sections). Valid as a prior.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sections(sections: Vec<Vec<String>>) -> Self {
        Self { sections }
    }

    /// Convenience constructor for the common one-section case.
    pub fn single_section<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sections: vec![items.into_iter().map(Into::into).collect()],
        }
    }

    pub fn sections(&self) -> &[Vec<String>] {
        &self.sections
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Item count of one section, or `None` if the section does not exist.
    pub fn section_len(&self, section: usize) -> Option<usize> {
        self.sections.get(section).map(Vec::len)
    }

    /// Total item count across all sections.
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    pub fn get(&self, pos: Position) -> Option<&str> {
        self.sections
            .get(pos.section)?
            .get(pos.item)
            .map(String::as_str)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// Iterate every occupied position, section by section.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.sections
            .iter()
            .enumerate()
            .flat_map(|(s, items)| (0..items.len()).map(move |i| Position::new(s, i)))
    }

    /// Replace the value at `pos`, returning the old value.
    pub(crate) fn set(&mut self, pos: Position, value: String) -> Option<String> {
        let slot = self.sections.get_mut(pos.section)?.get_mut(pos.item)?;
        Some(std::mem::replace(slot, value))
    }

    /// Remove the item at `pos`; later items in the section shift left.
    pub(crate) fn remove(&mut self, pos: Position) -> Option<String> {
        let items = self.sections.get_mut(pos.section)?;
        if pos.item >= items.len() {
            return None;
        }
        Some(items.remove(pos.item))
    }

    /// Insert `value` at `pos` (item may equal the section length to append).
    pub(crate) fn insert(&mut self, pos: Position, value: String) -> bool {
        match self.sections.get_mut(pos.section) {
            Some(items) if pos.item <= items.len() => {
                items.insert(pos.item, value);
                true
            }
            _ => false,
        }
    }
}

impl From<Vec<Vec<String>>> for ListSnapshot {
    fn from(sections: Vec<Vec<String>>) -> Self {
        Self::from_sections(sections)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
