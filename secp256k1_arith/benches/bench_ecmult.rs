use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use secp256k1_arith::{
    Affine, Context, G, Jacobian, Scalar,
    ecmult::{ECMultContext, constant::ecmult_const, generator::ECMultGenContext},
};

fn random_point() -> Affine {
    let k = Scalar::random(&mut rand::thread_rng());
    Context::global().generator.ecmult_gen(&k).to_affine_var()
}

fn scalar_mul_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("ecmult");
    let ctx = Context::global();

    group.bench_function("ecmult_gen", |b| {
        b.iter_batched(
            || Scalar::random(&mut rand::thread_rng()),
            |scalar| ctx.generator.ecmult_gen(&scalar),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("ecmult_const", |b| {
        b.iter_batched(
            || (Scalar::random(&mut rand::thread_rng()), random_point()),
            |(scalar, point)| ecmult_const(&point, &scalar, 256),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("ecmult_const:basepoint", |b| {
        b.iter_batched(
            || Scalar::random(&mut rand::thread_rng()),
            |scalar| ecmult_const(&G, &scalar, 256),
            BatchSize::SmallInput,
        )
    });
}

fn double_mul(c: &mut Criterion) {
    let mut group = c.benchmark_group("double_mul");
    let ctx = Context::global();

    group.bench_function("strauss:basepoint", |b| {
        b.iter_batched(
            || {
                (
                    Scalar::random(&mut rand::thread_rng()),
                    Scalar::random(&mut rand::thread_rng()),
                    Jacobian::from_affine(&random_point()),
                )
            },
            |(na, ng, a)| ctx.mult.ecmult(&a, &na, &ng),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("strauss:multi,8", |b| {
        b.iter_batched(
            || {
                let points: Vec<Affine> = (0..8).map(|_| random_point()).collect();
                let scalars: Vec<Scalar> = (0..8)
                    .map(|_| Scalar::random(&mut rand::thread_rng()))
                    .collect();
                (points, scalars)
            },
            |(points, scalars)| ctx.mult.ecmult_multi_var(&points, &scalars, None),
            BatchSize::SmallInput,
        )
    });
}

fn precomputation(c: &mut Criterion) {
    let mut group = c.benchmark_group("precomputation");
    group.sample_size(10);
    group.bench_function("ECMultContext::new", |b| b.iter(ECMultContext::new));
    group.bench_function("ECMultGenContext::new", |b| b.iter(ECMultGenContext::new));
}

criterion_group!(benches, scalar_mul_point, double_mul, precomputation);
criterion_main!(benches);
