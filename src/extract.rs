//! Read access to native composites.
//!
//! An extractor is built inside [`Encodable::visit`] over the value being
//! encoded and lives only as long as that borrow.

use crate::{Encodable, Error, Result, Visit};

/// Positional (and optionally keyed) read access to a native composite.
pub trait Extractor {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element at `index`.
    ///
    /// Keyed shapes resolve `key` first when given: records by field name,
    /// mappings by string key.
    fn get_elem(&self, index: usize, key: Option<&str>) -> Result<&dyn Encodable>;
}

/// An extractor whose elements are addressed by a key as well.
pub trait KeyValueExtractor: Extractor {
    /// Returns the key of the entry at `index`, in the same order as
    /// [`Extractor::get_elem`] returns values.
    fn get_key(&self, index: usize) -> Result<&dyn Encodable>;
}

/// Sequence extractor over a borrowed slice.
pub struct SliceExtractor<'s, T> {
    slice: &'s [T],
}

impl<'s, T: Encodable> SliceExtractor<'s, T> {
    pub fn new(slice: &'s [T]) -> Self {
        Self { slice }
    }
}

impl<T: Encodable> Extractor for SliceExtractor<'_, T> {
    fn len(&self) -> usize {
        self.slice.len()
    }

    fn get_elem(&self, index: usize, _key: Option<&str>) -> Result<&dyn Encodable> {
        self.slice
            .get(index)
            .map(|elem| elem as &dyn Encodable)
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.slice.len(),
            })
    }
}

/// Sequence extractor over collected references, for containers without
/// positional access (sets, deques) and for Rust tuples.
pub struct RefsExtractor<'s> {
    elems: Vec<&'s dyn Encodable>,
}

impl<'s> RefsExtractor<'s> {
    pub fn new(elems: impl IntoIterator<Item = &'s dyn Encodable>) -> Self {
        Self {
            elems: elems.into_iter().collect(),
        }
    }
}

impl Extractor for RefsExtractor<'_> {
    fn len(&self) -> usize {
        self.elems.len()
    }

    fn get_elem(&self, index: usize, _key: Option<&str>) -> Result<&dyn Encodable> {
        self.elems.get(index).copied().ok_or(Error::IndexOutOfRange {
            index,
            len: self.elems.len(),
        })
    }
}

/// Mapping extractor over `(key, value)` entries, in the map's iteration
/// order.
pub struct MapExtractor<'s> {
    entries: Vec<(&'s dyn Encodable, &'s dyn Encodable)>,
}

impl<'s> MapExtractor<'s> {
    pub fn new(entries: impl IntoIterator<Item = (&'s dyn Encodable, &'s dyn Encodable)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    fn lookup(&self, key: &str) -> Result<&dyn Encodable> {
        for (entry_key, value) in &self.entries {
            match entry_key.visit() {
                Visit::Str(name) if name == key => return Ok(*value),
                Visit::Str(_) => {}
                _ => return Err(Error::KeyMustBeString),
            }
        }
        // absent keys read as NULL
        Ok(&())
    }
}

impl Extractor for MapExtractor<'_> {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn get_elem(&self, index: usize, key: Option<&str>) -> Result<&dyn Encodable> {
        if let Some(key) = key {
            return self.lookup(key);
        }
        self.entries
            .get(index)
            .map(|(_, value)| *value)
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }
}

impl KeyValueExtractor for MapExtractor<'_> {
    fn get_key(&self, index: usize) -> Result<&dyn Encodable> {
        self.entries
            .get(index)
            .map(|(key, _)| *key)
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }
}
