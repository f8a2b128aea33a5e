use crate::{Decodable, Encodable, RefsExtractor, SlotsInjector, Visit, VisitMut};

// Rust tuples are sequences with one slot per position, so a `(i32, String)`
// reads and writes a `tuple<int, varchar>` directly.
macro_rules! tuple {
    ($(($($name:ident),+))*) => {
        $(
            impl<$($name: Encodable),+> Encodable for ($($name,)+) {
                fn visit(&self) -> Visit<'_> {
                    #[allow(non_snake_case)]
                    let ($($name,)+) = self;
                    Visit::Seq(Box::new(RefsExtractor::new([$($name as &dyn Encodable),+])))
                }
            }

            impl<$($name: Decodable),+> Decodable for ($($name,)+) {
                fn visit_mut(&mut self) -> VisitMut<'_> {
                    #[allow(non_snake_case)]
                    let ($($name,)+) = self;
                    VisitMut::Seq(Box::new(SlotsInjector::new(vec![
                        $($name as &mut dyn Decodable),+
                    ])))
                }

                fn zero() -> Self {
                    ($($name::zero(),)+)
                }
            }
        )*
    };
}

tuple! {
    (A)
    (A, B)
    (A, B, C)
    (A, B, C, D)
    (A, B, C, D, E)
    (A, B, C, D, E, F)
    (A, B, C, D, E, F, G)
    (A, B, C, D, E, F, G, H)
}
