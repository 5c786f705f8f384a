//! # Mesh Information
//!
//! A grid type describes where the points of your arrays sit in space. Each one knows its
//! [`Extent3D`](crate::Extent3D) (how many points along each axis) and how to describe its
//! geometry to XDMF, writing any coordinate datasets that description needs. Grids are
//! most often found in the `domain` field of [MeshData](`crate::MeshData`) and implement
//! the [Domain](`crate::Domain`) trait.
//!
//! | grid | topology | geometry | datasets |
//! |------|----------|----------|----------|
//! | [`Image3D`] | `3DCoRectMesh` | `ORIGIN_DXDYDZ` | none, origin and spacing are inline |
//! | [`Rectilinear3D`] | `3DRectMesh` | `VXVYVZ` | `/xcoords`, `/ycoords`, `/zcoords` |
//! | [`Curvilinear3D`] | `3DSMesh` | `XYZ` | `/coords` shaped `[nz, ny, nx, 3]` |
//!
//! The coordinate dataset names can be changed with each grid's `with_dataset_names`
//! (or `with_dataset_name`) builder.
//!
//! ## Defining your own domain
//!
//! Anything implementing [Domain](`crate::Domain`) can be written with
//! [write_mesh](`crate::write_mesh`). The implementation reports the extent and topology
//! and writes its coordinate arrays through the [`Container`](crate::Container) it is
//! handed, returning the data items that point at them.

mod curvilinear;
mod image;
mod rectilinear;

pub use curvilinear::Curvilinear3D;
pub use image::Image3D;
pub use rectilinear::Rectilinear3D;
