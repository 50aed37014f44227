//! The three multiplication paths must agree with each other.
use proptest::prelude::*;
use secp256k1_arith::{
    Affine, Context, G, Jacobian, Scalar,
    ecmult::{constant::ecmult_const, generator::ECMultGenContext},
};
use sha2::Sha256;

fn scalar_from(bytes: [u8; 32]) -> Scalar {
    Scalar::from_bytes_mod_order(&bytes)
}

proptest! {
    #[test]
    fn generator_paths_agree(k in any::<[u8; 32]>()) {
        let ctx = Context::global();
        let k = scalar_from(k);
        let comb = ctx.generator.ecmult_gen(&k);
        let strauss = ctx.mult.ecmult(&Jacobian::INFINITY, &Scalar::ZERO, &k);
        let constant = ecmult_const(&G, &k, 256);
        prop_assert_eq!(comb.to_affine_var(), strauss.to_affine_var());
        prop_assert_eq!(comb.to_affine_var(), constant.to_affine_var());
    }

    #[test]
    fn double_mul_matches_parts(
        a in any::<[u8; 32]>(),
        na in any::<[u8; 32]>(),
        ng in any::<[u8; 32]>(),
    ) {
        let ctx = Context::global();
        let point = ctx.generator.ecmult_gen(&scalar_from(a)).to_affine_var();
        prop_assume!(!point.is_infinity());
        let (na, ng) = (scalar_from(na), scalar_from(ng));

        let combined = ctx.mult.ecmult(&Jacobian::from_affine(&point), &na, &ng);
        let by_parts = ecmult_const(&point, &na, 256)
            .add_var(&ctx.generator.ecmult_gen(&ng), None);
        prop_assert_eq!(combined.to_affine_var(), by_parts.to_affine_var());
    }

    #[test]
    fn multi_var_is_a_sum(seeds in proptest::collection::vec(any::<([u8; 32], [u8; 32])>(), 0..6)) {
        let ctx = Context::global();
        let mut points = Vec::new();
        let mut scalars = Vec::new();
        let mut expected = Jacobian::INFINITY;
        for (p, k) in &seeds {
            let point: Affine = ctx.generator.ecmult_gen(&scalar_from(*p)).to_affine_var();
            if point.is_infinity() {
                continue;
            }
            let k = scalar_from(*k);
            expected = expected.add_var(&ecmult_const(&point, &k, 256), None);
            points.push(point);
            scalars.push(k);
        }
        let ng = Scalar::from_int(seeds.len() as u32);
        expected = expected.add_var(&ctx.generator.ecmult_gen(&ng), None);
        let got = ctx.mult.ecmult_multi_var(&points, &scalars, Some(&ng));
        prop_assert_eq!(got.to_affine_var(), expected.to_affine_var());
    }
}

#[test]
fn blinded_generator_is_unchanged() {
    let mut blinded = ECMultGenContext::new();
    let plain = ECMultGenContext::new();
    for round in 0u8..4 {
        blinded.blind::<Sha256>(&[round; 32]);
        for k in [Scalar::ONE, Scalar::from_int(1 << 20), Scalar::ONE.negate()] {
            assert_eq!(
                blinded.ecmult_gen(&k).to_affine_var(),
                plain.ecmult_gen(&k).to_affine_var()
            );
        }
    }
    blinded.reset_blinding();
    assert_eq!(blinded.ecmult_gen(&Scalar::ONE).to_affine_var(), G);
}

#[test]
fn zero_scalar_gives_infinity() {
    let ctx = Context::global();
    assert!(ctx.generator.ecmult_gen(&Scalar::ZERO).is_infinity());
    assert!(ecmult_const(&G, &Scalar::ZERO, 256).is_infinity());
    assert!(
        ctx.mult
            .ecmult(&Jacobian::from_affine(&G), &Scalar::ZERO, &Scalar::ZERO)
            .is_infinity()
    );
}
