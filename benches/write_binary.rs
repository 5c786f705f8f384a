use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array4;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

use h5mesh::{Center, Extent3D, Field, Vector3D, XmlContainer};

fn write_binary(dir: &std::path::Path, n: usize) {
    let array: Array4<f32> = ndarray::Array::random((n, n, n, 3), Uniform::new(0., 10.));
    let vectors = Vector3D::new(array).unwrap();

    let mut container = h5mesh::BinaryContainer::create(dir, "bench").unwrap();
    vectors
        .write_field(&mut container, "vectors", Center::Node)
        .unwrap();
}

fn write_inline(n: usize) {
    let extent = Extent3D::new(n, n, n).unwrap();
    let vectors = h5mesh::generate::reciprocal_vectors::<f32>(&extent);

    let mut container = XmlContainer::new();
    vectors
        .write_field(&mut container, "vectors", Center::Node)
        .unwrap();
}

fn write_binary_bench(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();

    c.bench_function("write binary 100", |b| {
        b.iter(|| write_binary(dir.path(), black_box(100)))
    });

    c.bench_function("write binary 150", |b| {
        b.iter(|| write_binary(dir.path(), black_box(150)))
    });

    c.bench_function("write inline 30", |b| b.iter(|| write_inline(black_box(30))));
}

criterion_group!(benches, write_binary_bench);
criterion_main!(benches);
