use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array3;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

use h5mesh::{generate, Extent3D, Scalar3D};

fn generate_bench(c: &mut Criterion) {
    let extent = Extent3D::new(256, 192, 128).unwrap();

    c.bench_function("sin cos scalars 256x192x128", |b| {
        b.iter(|| generate::sin_cos_scalars::<f32>(black_box(&extent)))
    });

    c.bench_function("reciprocal vectors 256x192x128", |b| {
        b.iter(|| generate::reciprocal_vectors::<f32>(black_box(&extent)))
    });

    c.bench_function("cylinder 256x193x128", |b| {
        b.iter(|| generate::cylindrical_coords::<f32>(black_box(256), 193, 128).unwrap())
    });

    // transposed arrays are copied into standard layout before writing
    let random: Array3<f64> = ndarray::Array::random((128, 128, 128), Uniform::new(0., 1.));
    let transposed = Scalar3D::new(random.reversed_axes());

    c.bench_function("standard layout copy 128", |b| {
        b.iter(|| black_box(transposed.as_standard_slice().len()))
    });
}

criterion_group!(benches, generate_bench);
criterion_main!(benches);
