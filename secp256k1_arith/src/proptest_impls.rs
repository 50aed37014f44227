//! Implementations of [`Arbitrary`] for core types.
//!
//! [`Arbitrary`]: proptest::arbitrary::Arbitrary
use crate::{Scalar, field::Field, group::Affine};
use ::proptest::prelude::*;

const MINUS_ONE: Scalar = Scalar::new(
    0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFE, 0xBAAEDCE6, 0xAF48A03B, 0xBFD25E8C, 0xD0364140,
);

const HALF_ORDER: Scalar = Scalar::new(
    0x7FFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF, 0x5D576E73, 0x57A4501D, 0xDFE92F46, 0x681B20A0,
);

impl Arbitrary for Scalar {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            // insert some pathological cases
            1 => Just(Scalar::ZERO),
            1 => Just(Scalar::ONE),
            1 => Just(MINUS_ONE),
            1 => Just(HALF_ORDER),
            1 => Just(HALF_ORDER + Scalar::ONE),
            1 => any::<u32>().prop_map(Scalar::from_int),
            24 => any::<[u8; 32]>().prop_map(|bytes| Scalar::from_bytes_mod_order(&bytes)),
        ]
        .boxed()
    }
}

impl Arbitrary for Field {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            1 => Just(Field::ZERO),
            1 => Just(Field::ONE),
            1 => (0u32..0x400_0000).prop_map(Field::from_int),
            27 => any::<[u8; 32]>().prop_filter_map("not below p", |bytes| Field::from_bytes(&bytes)),
        ]
        .boxed()
    }
}

impl Arbitrary for Affine {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    /// Points lifted from random x-coordinates. About half of all x-coordinates
    /// are on the curve.
    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<Field>(), any::<bool>())
            .prop_filter_map("x not on the curve", |(x, odd)| {
                Affine::set_xo_var(&x, odd)
            })
            .boxed()
    }
}
