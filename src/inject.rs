//! Write access to native composites.
//!
//! An injector is built inside [`Decodable::visit_mut`] over the
//! destination. Composite codecs drive it in a fixed protocol:
//!
//! 1. [`Injector::resize`] with the decoded element count,
//! 2. per element, [`KeyValueInjector::zero_key`] (keyed shapes only) and
//!    [`Injector::zero_elem`] to get slots, decode into them,
//! 3. [`Injector::set_elem`] to commit the element.

use crate::{Decodable, Error, Result};

pub trait Injector {
    /// Prepares the destination to receive `len` elements, discarding what
    /// it held before.
    fn resize(&mut self, len: usize) -> Result<()>;

    /// Puts the destination back to its zero value.
    fn reset(&mut self) -> Result<()>;

    /// Returns a zero-valued slot for the element at `index` (or named
    /// `key`, for records).
    fn zero_elem(&mut self, index: usize, key: Option<&str>) -> Result<&mut dyn Decodable>;

    /// Commits the element last handed out by [`Injector::zero_elem`].
    fn set_elem(
        &mut self,
        index: usize,
        key: Option<&str>,
        key_was_null: bool,
        value_was_null: bool,
    ) -> Result<()>;

    /// The exact element count the destination holds, if it cannot grow or
    /// shrink.
    fn fixed_len(&self) -> Option<usize> {
        None
    }
}

pub trait KeyValueInjector: Injector {
    /// Returns a zero-valued slot for the key of entry `index`.
    fn zero_key(&mut self, index: usize) -> Result<&mut dyn Decodable>;
}

/// Sequence injector that grows a `Vec` in place.
pub struct VecInjector<'s, T> {
    vec: &'s mut Vec<T>,
}

impl<'s, T: Decodable> VecInjector<'s, T> {
    pub fn new(vec: &'s mut Vec<T>) -> Self {
        Self { vec }
    }
}

impl<T: Decodable> Injector for VecInjector<'_, T> {
    fn resize(&mut self, len: usize) -> Result<()> {
        self.vec.clear();
        self.vec.resize_with(len, T::zero);
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.vec.clear();
        Ok(())
    }

    fn zero_elem(&mut self, index: usize, _key: Option<&str>) -> Result<&mut dyn Decodable> {
        let len = self.vec.len();
        self.vec
            .get_mut(index)
            .map(|elem| elem as &mut dyn Decodable)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    fn set_elem(&mut self, _: usize, _: Option<&str>, _: bool, _: bool) -> Result<()> {
        Ok(())
    }
}

/// Sequence injector over a fixed-length array.
///
/// Fewer collection elements than the array holds leave the tail zeroed;
/// more are an error. Tuples must match the array length exactly.
pub struct SliceInjector<'s, T> {
    slice: &'s mut [T],
}

impl<'s, T: Decodable> SliceInjector<'s, T> {
    pub fn new(slice: &'s mut [T]) -> Self {
        Self { slice }
    }
}

impl<T: Decodable> Injector for SliceInjector<'_, T> {
    fn resize(&mut self, len: usize) -> Result<()> {
        if len > self.slice.len() {
            return Err(Error::IndexOutOfRange {
                index: len - 1,
                len: self.slice.len(),
            });
        }
        self.reset()
    }

    fn reset(&mut self) -> Result<()> {
        self.slice.iter_mut().for_each(|elem| *elem = T::zero());
        Ok(())
    }

    fn zero_elem(&mut self, index: usize, _key: Option<&str>) -> Result<&mut dyn Decodable> {
        let len = self.slice.len();
        self.slice
            .get_mut(index)
            .map(|elem| elem as &mut dyn Decodable)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    fn set_elem(&mut self, _: usize, _: Option<&str>, _: bool, _: bool) -> Result<()> {
        Ok(())
    }

    fn fixed_len(&self) -> Option<usize> {
        Some(self.slice.len())
    }
}

/// Sequence injector for containers that can only be extended: sets and
/// deques.
pub struct CollectInjector<'s, C, T> {
    container: &'s mut C,
    pending: Option<T>,
}

impl<'s, C: Extend<T> + Default, T: Decodable> CollectInjector<'s, C, T> {
    pub fn new(container: &'s mut C) -> Self {
        Self {
            container,
            pending: None,
        }
    }
}

impl<C: Extend<T> + Default, T: Decodable> Injector for CollectInjector<'_, C, T> {
    fn resize(&mut self, _len: usize) -> Result<()> {
        self.reset()
    }

    fn reset(&mut self) -> Result<()> {
        *self.container = C::default();
        self.pending = None;
        Ok(())
    }

    fn zero_elem(&mut self, _index: usize, _key: Option<&str>) -> Result<&mut dyn Decodable> {
        Ok(self.pending.insert(T::zero()))
    }

    fn set_elem(&mut self, _: usize, _: Option<&str>, _: bool, _: bool) -> Result<()> {
        self.container.extend(self.pending.take());
        Ok(())
    }
}

/// Mapping injector for any container built from `(key, value)` pairs.
pub struct MapInjector<'s, M, K, V> {
    map: &'s mut M,
    key: Option<K>,
    value: Option<V>,
}

impl<'s, M: Extend<(K, V)> + Default, K: Decodable, V: Decodable> MapInjector<'s, M, K, V> {
    pub fn new(map: &'s mut M) -> Self {
        Self {
            map,
            key: None,
            value: None,
        }
    }
}

impl<M: Extend<(K, V)> + Default, K: Decodable, V: Decodable> Injector
    for MapInjector<'_, M, K, V>
{
    fn resize(&mut self, _len: usize) -> Result<()> {
        self.reset()
    }

    fn reset(&mut self) -> Result<()> {
        *self.map = M::default();
        self.key = None;
        self.value = None;
        Ok(())
    }

    fn zero_elem(&mut self, _index: usize, _key: Option<&str>) -> Result<&mut dyn Decodable> {
        Ok(self.value.insert(V::zero()))
    }

    fn set_elem(&mut self, _: usize, _: Option<&str>, _: bool, _: bool) -> Result<()> {
        let key = self.key.take().unwrap_or_else(K::zero);
        let value = self.value.take().unwrap_or_else(V::zero);
        self.map.extend(Some((key, value)));
        Ok(())
    }
}

impl<M: Extend<(K, V)> + Default, K: Decodable, V: Decodable> KeyValueInjector
    for MapInjector<'_, M, K, V>
{
    fn zero_key(&mut self, _index: usize) -> Result<&mut dyn Decodable> {
        Ok(self.key.insert(K::zero()))
    }
}

/// Sequence injector over a fixed set of heterogeneous slots, one per Rust
/// tuple position.
pub struct SlotsInjector<'s> {
    slots: Vec<&'s mut dyn Decodable>,
}

impl<'s> SlotsInjector<'s> {
    pub fn new(slots: Vec<&'s mut dyn Decodable>) -> Self {
        Self { slots }
    }
}

impl Injector for SlotsInjector<'_> {
    fn resize(&mut self, len: usize) -> Result<()> {
        if len != self.slots.len() {
            return Err(Error::WrongElementCount {
                expected: self.slots.len(),
                actual: len,
            });
        }
        self.reset()
    }

    fn reset(&mut self) -> Result<()> {
        for slot in &mut self.slots {
            slot.visit_mut().set_zero()?;
        }
        Ok(())
    }

    fn zero_elem(&mut self, index: usize, _key: Option<&str>) -> Result<&mut dyn Decodable> {
        let len = self.slots.len();
        match self.slots.get_mut(index) {
            Some(slot) => Ok(&mut **slot),
            None => Err(Error::IndexOutOfRange { index, len }),
        }
    }

    fn set_elem(&mut self, _: usize, _: Option<&str>, _: bool, _: bool) -> Result<()> {
        Ok(())
    }
}
