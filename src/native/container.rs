use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    hash::{BuildHasher, Hash},
    rc::Rc,
    sync::Arc,
};

use crate::{
    CollectInjector, Decodable, Encodable, MapExtractor, MapInjector, RefsExtractor,
    SliceExtractor, SliceInjector, VecInjector, Visit, VisitMut,
};

impl<T: Encodable> Encodable for [T] {
    fn visit(&self) -> Visit<'_> {
        match T::slice_as_bytes(self) {
            Some(bytes) => Visit::Bytes(bytes),
            None => Visit::Seq(Box::new(SliceExtractor::new(self))),
        }
    }
}

impl<T: Encodable> Encodable for Vec<T> {
    fn visit(&self) -> Visit<'_> {
        self.as_slice().visit()
    }
}

impl<T: Decodable> Decodable for Vec<T> {
    fn visit_mut(&mut self) -> VisitMut<'_> {
        match T::vec_as_bytes(self) {
            Ok(bytes) => VisitMut::Bytes(bytes),
            Err(vec) => VisitMut::Seq(Box::new(VecInjector::new(vec))),
        }
    }

    fn zero() -> Self {
        Vec::new()
    }
}

impl<T: Encodable, const N: usize> Encodable for [T; N] {
    fn visit(&self) -> Visit<'_> {
        self.as_slice().visit()
    }
}

impl<T: Decodable, const N: usize> Decodable for [T; N] {
    fn visit_mut(&mut self) -> VisitMut<'_> {
        match T::slice_as_bytes_mut(self) {
            Ok(bytes) => VisitMut::FixedBytes(bytes),
            Err(slice) => VisitMut::Seq(Box::new(SliceInjector::new(slice))),
        }
    }

    fn zero() -> Self {
        std::array::from_fn(|_| T::zero())
    }
}

macro_rules! collected {
    ($($container:ident<T $(: $($bound:path),+)?>),* $(,)?) => {
        $(
            impl<T: Encodable> Encodable for $container<T> {
                fn visit(&self) -> Visit<'_> {
                    Visit::Seq(Box::new(RefsExtractor::new(
                        self.iter().map(|elem| elem as &dyn Encodable),
                    )))
                }
            }

            impl<T: Decodable $($(+ $bound)+)?> Decodable for $container<T> {
                fn visit_mut(&mut self) -> VisitMut<'_> {
                    VisitMut::Seq(Box::new(CollectInjector::<_, T>::new(self)))
                }

                fn zero() -> Self {
                    $container::new()
                }
            }
        )*
    };
}

collected! {
    VecDeque<T>,
    BTreeSet<T: Ord>,
}

impl<T: Encodable, S> Encodable for HashSet<T, S> {
    fn visit(&self) -> Visit<'_> {
        Visit::Seq(Box::new(RefsExtractor::new(
            self.iter().map(|elem| elem as &dyn Encodable),
        )))
    }
}

impl<T: Decodable + Eq + Hash, S: BuildHasher + Default> Decodable for HashSet<T, S> {
    fn visit_mut(&mut self) -> VisitMut<'_> {
        VisitMut::Seq(Box::new(CollectInjector::<_, T>::new(self)))
    }

    fn zero() -> Self {
        HashSet::default()
    }
}

impl<K: Encodable, V: Encodable, S> Encodable for HashMap<K, V, S> {
    fn visit(&self) -> Visit<'_> {
        Visit::Map(Box::new(MapExtractor::new(
            self.iter()
                .map(|(key, value)| (key as &dyn Encodable, value as &dyn Encodable)),
        )))
    }
}

impl<K, V, S> Decodable for HashMap<K, V, S>
where
    K: Decodable + Eq + Hash,
    V: Decodable,
    S: BuildHasher + Default,
{
    fn visit_mut(&mut self) -> VisitMut<'_> {
        VisitMut::Map(Box::new(MapInjector::<_, K, V>::new(self)))
    }

    fn zero() -> Self {
        HashMap::default()
    }
}

impl<K: Encodable, V: Encodable> Encodable for BTreeMap<K, V> {
    fn visit(&self) -> Visit<'_> {
        Visit::Map(Box::new(MapExtractor::new(
            self.iter()
                .map(|(key, value)| (key as &dyn Encodable, value as &dyn Encodable)),
        )))
    }
}

impl<K: Decodable + Ord, V: Decodable> Decodable for BTreeMap<K, V> {
    fn visit_mut(&mut self) -> VisitMut<'_> {
        VisitMut::Map(Box::new(MapInjector::<_, K, V>::new(self)))
    }

    fn zero() -> Self {
        BTreeMap::new()
    }
}

impl<T: Encodable> Encodable for Option<T> {
    fn visit(&self) -> Visit<'_> {
        match self {
            Some(value) => value.visit(),
            None => Visit::Null,
        }
    }

    fn is_null(&self) -> bool {
        match self {
            Some(value) => value.is_null(),
            None => true,
        }
    }
}

impl<T: Decodable> Decodable for Option<T> {
    fn visit_mut(&mut self) -> VisitMut<'_> {
        VisitMut::Nullable(self)
    }

    fn zero() -> Self {
        None
    }
}

macro_rules! pointer {
    ($($pointer:ident),*) => {
        $(
            impl<T: Encodable + ?Sized> Encodable for $pointer<T> {
                fn visit(&self) -> Visit<'_> {
                    (**self).visit()
                }

                fn type_name(&self) -> &'static str {
                    (**self).type_name()
                }

                fn is_null(&self) -> bool {
                    (**self).is_null()
                }
            }
        )*
    };
}

pointer!(Box, Rc, Arc);

impl<T: Encodable + ?Sized> Encodable for &T {
    fn visit(&self) -> Visit<'_> {
        (**self).visit()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T: Encodable + ?Sized> Encodable for &mut T {
    fn visit(&self) -> Visit<'_> {
        (**self).visit()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T: Decodable> Decodable for Box<T> {
    fn visit_mut(&mut self) -> VisitMut<'_> {
        (**self).visit_mut()
    }

    fn zero() -> Self {
        Box::new(T::zero())
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}
