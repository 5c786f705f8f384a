use h5mesh::xdmf::{self, Document, Location};
use std::path::Path;
use std::process::{Command, Output};

const SMALL: [&str; 6] = ["--nx", "4", "--ny", "3", "--nz", "2"];

fn h5mesh(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_h5mesh"))
        .args(args)
        .env_remove("H5MESH_OUT_DIR")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write(command: &str, dir: &Path, extra: &[&str]) {
    let mut args = vec![command, "--out-dir", dir.to_str().unwrap()];
    args.extend_from_slice(&SMALL);
    args.extend_from_slice(extra);

    let output = h5mesh(&args);
    assert!(
        output.status.success(),
        "{command} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn read(path: &Path) -> Document {
    xdmf::read_path(path).unwrap()
}

fn binary_files(document: &Document) -> Vec<String> {
    document.grids[0]
        .items()
        .filter_map(|item| match &item.location {
            Location::Binary { file } => Some(file.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn basic_writes_basic_mesh() {
    let dir = tempfile::tempdir().unwrap();
    write("basic", dir.path(), &["--format", "binary"]);

    assert!(dir.path().join("basic_mesh_scalars.bin").is_file());

    let document = read(&dir.path().join("basic_mesh.xdmf"));
    assert_eq!(document.grids[0].topology.dims, vec![2, 3, 4]);
    assert_eq!(binary_files(&document), vec!["basic_mesh_scalars.bin"]);
}

#[test]
fn component_datasets_named_per_axis() {
    let dir = tempfile::tempdir().unwrap();
    write("image-vector-comps", dir.path(), &["--format", "binary"]);

    let document = read(&dir.path().join("vector_comps.xdmf"));
    assert_eq!(
        binary_files(&document),
        vec![
            "vector_comps_xcomps.bin",
            "vector_comps_ycomps.bin",
            "vector_comps_zcomps.bin"
        ]
    );
}

#[test]
fn cylinder_gets_closing_row() {
    let dir = tempfile::tempdir().unwrap();
    write("curvilinear-scalar", dir.path(), &["--format", "binary"]);

    let document = read(&dir.path().join("curvilinear_scalar.xdmf"));
    let grid = &document.grids[0];
    assert_eq!(grid.topology.dims, vec![2, 4, 4]);
    assert_eq!(grid.geometry.items[0].dims, vec![2, 4, 4, 3]);
}

#[test]
fn format_follows_build_features() {
    let dir = tempfile::tempdir().unwrap();
    write("image-scalar", dir.path(), &[]);

    let document = read(&dir.path().join("scalar.xdmf"));
    let location = &document.grids[0].attributes[0].value.items()[0].location;

    if cfg!(feature = "hdf5") {
        assert!(dir.path().join("scalar.h5").is_file());
        assert_eq!(
            location,
            &Location::Hdf {
                file: "scalar.h5".into(),
                path: "/scalars".into()
            }
        );
    } else {
        assert!(!dir.path().join("scalar.h5").exists());
        assert_eq!(
            location,
            &Location::Binary {
                file: "scalar_scalars.bin".into()
            }
        );
    }
}

#[cfg(not(feature = "hdf5"))]
#[test]
fn hdf5_format_unsupported_without_feature() {
    let dir = tempfile::tempdir().unwrap();
    let output = h5mesh(&[
        "image-scalar",
        "--out-dir",
        dir.path().to_str().unwrap(),
        "--format",
        "hdf5",
    ]);

    assert!(!output.status.success());
    assert!(!dir.path().join("scalar.xdmf").exists());
}

#[test]
fn inspect_checks_written_mesh() {
    let dir = tempfile::tempdir().unwrap();
    write("image-vector-comps", dir.path(), &["--format", "binary"]);

    let xdmf = dir.path().join("vector_comps.xdmf");
    let output = h5mesh(&["inspect", xdmf.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("grid `vector_comps`: 3DCoRectMesh 2 3 4"));
    assert!(stdout.contains("geometry ORIGIN_DXDYDZ (2 items)"));
    assert!(stdout.contains(
        "Vector `vectors` on Node: vector_comps_xcomps.bin, vector_comps_ycomps.bin, vector_comps_zcomps.bin"
    ));
    assert!(stdout.contains("5 items checked, 0 skipped"));
}

#[test]
fn inspect_fails_on_truncated_data() {
    let dir = tempfile::tempdir().unwrap();
    write("image-scalar", dir.path(), &["--format", "binary"]);

    let data = dir.path().join("scalar_scalars.bin");
    let bytes = std::fs::read(&data).unwrap();
    std::fs::write(&data, &bytes[..bytes.len() - 4]).unwrap();

    let xdmf = dir.path().join("scalar.xdmf");
    let output = h5mesh(&["inspect", xdmf.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("inconsistent"));
}
