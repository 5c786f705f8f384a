//! Write scalar and vector fields on structured meshes into HDF5 (or raw binary) files,
//! together with the XDMF description that ParaView and VisIt use to load them.
//!
//! Every file follows the same recipe: create the container, describe the shape of
//! an array (slowest varying axis first, `[z, y, x]` or `[z, y, x, component]`),
//! create a typed dataset, write the flat buffer, close. [`write_mesh`] runs that
//! recipe for a grid ([`Image3D`], [`Rectilinear3D`] or [`Curvilinear3D`]) and a
//! set of fields, and returns the matching [`xdmf::Document`].
//!
//! ```no_run
//! use h5mesh::{Extent3D, Format, Image3D, MeshData, NamedField};
//!
//! # fn main() -> Result<(), h5mesh::Error> {
//! let extent = Extent3D::new(256, 192, 128)?;
//! let scalars = h5mesh::generate::sin_cos_scalars::<f32>(&extent);
//!
//! let mesh = MeshData::new(Image3D::new(extent), NamedField::node("scalars", scalars));
//! h5mesh::write_mesh_files(".", "scalar", Format::Binary, &mesh)?;
//! # Ok(())
//! # }
//! ```

pub mod array;
pub mod container;
mod data;
pub mod generate;
pub mod mesh;
pub mod prelude;
mod shape;
mod traits;
mod write_mesh;
pub mod xdmf;

pub use traits::{Container, Domain, Field, FieldSet, Numeric, Precision, StorageType};

pub use data::{MeshData, NamedField};

pub use mesh::{Curvilinear3D, Image3D, Rectilinear3D};

pub use array::{Components3D, Scalar3D, Vector3D};

pub use shape::{check_len, dimension_string, parse_dimension_string, shape_len, Extent3D};

pub use container::{BinaryContainer, Format, XmlContainer};

#[cfg(feature = "hdf5")]
pub use container::Hdf5Container;

pub use xdmf::{AttributeType, Center};

pub use write_mesh::{write_field, write_mesh, write_mesh_files, MeshFiles};

#[cfg(feature = "derive")]
pub use h5mesh_derive::FieldSet;

pub use ndarray;

/// general purpose error enumeration for possible causes of failure.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("An io error occured: `{0}`")]
    Io(#[from] std::io::Error),
    #[error("Could not write XDMF data: `{0}`")]
    XmlWrite(#[from] quick_xml::Error),
    #[error("Error while parsing XDMF: {0}")]
    Parse(#[from] xdmf::ParseError),
    #[cfg(feature = "hdf5")]
    #[error("HDF5 library error: `{0}`")]
    Hdf5(#[from] hdf5::Error),
    #[error("dataset `{name}` declares shape {shape:?} ({expected} values) but the buffer holds {actual} values")]
    ShapeMismatch {
        name: String,
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },
    #[error("field `{name}` has shape {actual:?} but the grid expects {expected:?}")]
    FieldShape {
        name: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
    #[error("dataset `{0}` was already written to this file")]
    DuplicateDataset(String),
    #[error("`{0}` is not a valid dataset name")]
    InvalidName(String),
    #[error("dataset `{0}` has no values")]
    EmptyDataset(String),
    #[error("grid extents must be non-zero along every axis, got {0:?}")]
    EmptyExtent([usize; 3]),
    #[error("could not read dimensions from `{0}`")]
    InvalidDimensions(String),
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
    #[error("binary file {path} holds {bytes} bytes which is not a whole number of {size} byte values")]
    TruncatedData {
        path: std::path::PathBuf,
        bytes: u64,
        size: usize,
    },
    #[error("{0} is not supported by this build")]
    Unsupported(&'static str),
}
