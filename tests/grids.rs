use h5mesh::container::{verify_document, Verified};
use h5mesh::generate;
use h5mesh::xdmf::{self, AttributeValue, GeometryType, Location, TopologyType};
use h5mesh::{
    BinaryContainer, Extent3D, Format, Image3D, MeshData, NamedField, Rectilinear3D, Scalar3D,
};

fn read_f32(path: &std::path::Path) -> Vec<f32> {
    BinaryContainer::read_dataset::<f32, _>(path).unwrap()
}

#[test]
fn image_scalar_binary() {
    let dir = tempfile::tempdir().unwrap();
    let extent = Extent3D::new(8, 6, 4).unwrap();
    let scalars = generate::sin_cos_scalars::<f32>(&extent);

    let mesh = MeshData::new(
        Image3D::new(extent),
        NamedField::node("scalars", scalars.clone()),
    );
    let files = h5mesh::write_mesh_files(dir.path(), "scalar", Format::Binary, &mesh).unwrap();

    assert_eq!(files.data, vec![dir.path().join("scalar_scalars.bin")]);

    let values = read_f32(&files.data[0]);
    assert_eq!(values.len(), extent.num_points());
    assert_eq!(values.as_slice(), scalars.as_standard_slice().as_ref());

    let document = xdmf::read_path(&files.xdmf).unwrap();
    let grid = &document.grids[0];

    assert_eq!(grid.name, "scalar");
    assert_eq!(grid.topology.kind, TopologyType::CoRectMesh3D);
    assert_eq!(grid.topology.dims, vec![4, 6, 8]);
    assert_eq!(grid.geometry.kind, GeometryType::OriginDxDyDz);
    assert_eq!(
        grid.attributes[0].value.items()[0].location,
        Location::Binary {
            file: "scalar_scalars.bin".into()
        }
    );

    let results = verify_document(&document, dir.path()).unwrap();
    assert!(results.iter().all(|result| *result == Verified::Checked));
}

#[test]
fn image_vectors_both_layouts() {
    let dir = tempfile::tempdir().unwrap();
    let extent = Extent3D::new(5, 4, 3).unwrap();

    let interleaved = MeshData::new(
        Image3D::new(extent),
        NamedField::node("vectors", generate::reciprocal_vectors::<f32>(&extent)),
    );
    let files = h5mesh::write_mesh_files(dir.path(), "interleaved", Format::Binary, &interleaved)
        .unwrap();
    let flat = read_f32(&files.data[0]);

    // component c of point (i, j, k) at 3 * index + c
    let (i, j, k) = (4, 2, 1);
    let idx = 3 * extent.linear_index(i, j, k);
    assert_eq!(flat[idx], 1.0 / 5.0);
    assert_eq!(flat[idx + 1], 1.0 / 3.0);
    assert_eq!(flat[idx + 2], 1.0 / 2.0);

    let comps = interleaved.new_data(NamedField::node(
        "vectors",
        generate::reciprocal_components::<f32>(&extent).with_dataset_names(
            "xcomps", "ycomps", "zcomps",
        ),
    ));
    let files = h5mesh::write_mesh_files(dir.path(), "comps", Format::Binary, &comps).unwrap();

    assert_eq!(
        files.data,
        vec![
            dir.path().join("comps_xcomps.bin"),
            dir.path().join("comps_ycomps.bin"),
            dir.path().join("comps_zcomps.bin"),
        ]
    );

    let xs = read_f32(&files.data[0]);
    let ys = read_f32(&files.data[1]);
    let zs = read_f32(&files.data[2]);
    let point = extent.linear_index(i, j, k);
    assert_eq!([xs[point], ys[point], zs[point]], [flat[idx], flat[idx + 1], flat[idx + 2]]);

    let document = xdmf::read_path(&files.xdmf).unwrap();
    match &document.grids[0].attributes[0].value {
        AttributeValue::Join { dims, items } => {
            assert_eq!(dims, &vec![3, 4, 5, 3]);
            assert_eq!(items.len(), 3);
        }
        other => panic!("expected joined components, got {other:?}"),
    }
}

#[test]
fn rectilinear_scalar() {
    let dir = tempfile::tempdir().unwrap();
    let grid = Rectilinear3D::new(
        generate::accumulating_axis::<f32>(6, 0.1),
        generate::accumulating_axis::<f32>(5, 0.1),
        generate::accumulating_axis::<f32>(4, 0.1),
    )
    .unwrap();

    let extent = h5mesh::Domain::extent(&grid);
    assert_eq!(extent.dims(), [4, 5, 6]);

    let mesh = MeshData::new(
        grid,
        NamedField::node("scalars", generate::sin_cos_scalars::<f32>(&extent)),
    );
    let files =
        h5mesh::write_mesh_files(dir.path(), "rectilinear_scalar", Format::Binary, &mesh).unwrap();

    let names: Vec<_> = files
        .data
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "rectilinear_scalar_xcoords.bin",
            "rectilinear_scalar_ycoords.bin",
            "rectilinear_scalar_zcoords.bin",
            "rectilinear_scalar_scalars.bin",
        ]
    );

    assert_eq!(read_f32(&files.data[0]), generate::accumulating_axis::<f32>(6, 0.1));

    let document = xdmf::read_path(&files.xdmf).unwrap();
    let geometry = &document.grids[0].geometry;
    assert_eq!(geometry.kind, GeometryType::VxVyVz);
    assert_eq!(geometry.items[0].dims, vec![6]);
    assert_eq!(geometry.items[2].dims, vec![4]);
}

#[test]
fn curvilinear_scalar() {
    let dir = tempfile::tempdir().unwrap();
    let (nr, ntheta, nz) = (6, 9, 3);

    let grid = generate::cylindrical_coords::<f32>(nr, ntheta, nz).unwrap();
    let scalars = generate::theta_scalars::<f32>(nr, ntheta, nz).unwrap();

    let mesh = MeshData::new(grid, NamedField::node("scalars", scalars));
    let files =
        h5mesh::write_mesh_files(dir.path(), "curvilinear_scalar", Format::Binary, &mesh).unwrap();

    let coords = read_f32(&files.data[0]);
    assert_eq!(coords.len(), nz * ntheta * nr * 3);

    let document = xdmf::read_path(&files.xdmf).unwrap();
    let grid = &document.grids[0];
    assert_eq!(grid.topology.kind, TopologyType::SMesh3D);
    assert_eq!(grid.topology.dims, vec![nz, ntheta, nr]);
    assert_eq!(grid.geometry.items[0].dims, vec![nz, ntheta, nr, 3]);

    verify_document(&document, dir.path()).unwrap();
}

#[test]
fn mismatched_field_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let extent = Extent3D::new(4, 4, 4).unwrap();
    let wrong = Scalar3D::<f32>::from_fn(&Extent3D::new(4, 4, 3).unwrap(), |_, _, _| 0.0);

    let mesh = MeshData::new(Image3D::new(extent), NamedField::node("scalars", wrong));
    let result = h5mesh::write_mesh_files(dir.path(), "bad", Format::Binary, &mesh);

    assert!(matches!(result, Err(h5mesh::Error::FieldShape { .. })));
    assert!(!dir.path().join("bad_scalars.bin").exists());
    assert!(!dir.path().join("bad.xdmf").exists());
}

#[test]
fn truncated_binary_detected() {
    let dir = tempfile::tempdir().unwrap();
    let extent = Extent3D::new(3, 3, 3).unwrap();
    let mesh = MeshData::new(
        Image3D::new(extent),
        NamedField::node("scalars", generate::sin_cos_scalars::<f64>(&extent)),
    );
    let files = h5mesh::write_mesh_files(dir.path(), "cut", Format::Binary, &mesh).unwrap();

    let bytes = std::fs::read(&files.data[0]).unwrap();
    std::fs::write(&files.data[0], &bytes[..bytes.len() - 8]).unwrap();

    let document = xdmf::read_path(&files.xdmf).unwrap();
    assert!(matches!(
        verify_document(&document, dir.path()),
        Err(h5mesh::Error::ShapeMismatch { .. })
    ));
}
