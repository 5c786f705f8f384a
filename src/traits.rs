//! # Traits
//!
//! These are the seams of the crate. A [`Container`] is where bytes end up (an HDF5 file,
//! raw binary files, or inline XML), a [`Domain`] describes the grid, and [`Field`] /
//! [`FieldSet`] describe the arrays living on it. `FieldSet` can be derived with the
//! `derive` feature.

use crate::xdmf;
use crate::Error;
use crate::Extent3D;
use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

/// floating point width of the values in a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    Float32,
    Float64,
}

impl Precision {
    /// bytes per value
    pub fn bytes(&self) -> usize {
        match self {
            Self::Float32 => 4,
            Self::Float64 => 8,
        }
    }

    /// the `Precision` attribute value used by XDMF
    pub(crate) fn as_xdmf(&self) -> &'static str {
        match self {
            Self::Float32 => "4",
            Self::Float64 => "8",
        }
    }

    pub(crate) fn from_xdmf(value: &str) -> Option<Self> {
        match value {
            "4" => Some(Self::Float32),
            "8" => Some(Self::Float64),
            _ => None,
        }
    }
}

/// extra bounds a value type must satisfy for the storage backends compiled in.
///
/// With the `hdf5` feature this requires the type to be writable by the HDF5 library,
/// otherwise it is implemented for every type.
#[cfg(feature = "hdf5")]
pub trait StorageType: hdf5::H5Type {}

#[cfg(feature = "hdf5")]
impl<T: hdf5::H5Type> StorageType for T {}

#[cfg(not(feature = "hdf5"))]
pub trait StorageType {}

#[cfg(not(feature = "hdf5"))]
impl<T> StorageType for T {}

/// Floating point types that can be stored in a dataset (`f32` and `f64`)
pub trait Numeric:
    num_traits::Float + StorageType + std::fmt::Debug + Default + Send + Sync + 'static
{
    /// size of one value in bytes
    const SIZE: usize;

    fn as_precision() -> Precision;

    /// write the little endian representation of the value
    fn write_le_bytes<W: Write>(&self, writer: &mut W) -> std::io::Result<()>;

    /// read one little endian value
    fn read_le_bytes<R: Read>(reader: &mut R) -> std::io::Result<Self>;

    fn as_f64(self) -> f64;

    fn cast_from_f64(value: f64) -> Self;

    /// shortest text representation that reads back to the same value
    fn format(self, buffer: &mut ryu::Buffer) -> &str;
}

impl Numeric for f32 {
    const SIZE: usize = 4;

    fn as_precision() -> Precision {
        Precision::Float32
    }

    fn write_le_bytes<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_f32::<LittleEndian>(*self)
    }

    fn read_le_bytes<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        reader.read_f32::<LittleEndian>()
    }

    fn as_f64(self) -> f64 {
        self as f64
    }

    fn cast_from_f64(value: f64) -> Self {
        value as f32
    }

    fn format(self, buffer: &mut ryu::Buffer) -> &str {
        buffer.format(self)
    }
}

impl Numeric for f64 {
    const SIZE: usize = 8;

    fn as_precision() -> Precision {
        Precision::Float64
    }

    fn write_le_bytes<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_f64::<LittleEndian>(*self)
    }

    fn read_le_bytes<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        reader.read_f64::<LittleEndian>()
    }

    fn as_f64(self) -> f64 {
        self
    }

    fn cast_from_f64(value: f64) -> Self {
        value
    }

    fn format(self, buffer: &mut ryu::Buffer) -> &str {
        buffer.format(self)
    }
}

/// A sink for named, shaped arrays of floats.
///
/// Writing a dataset covers the middle three steps of producing a mesh file: describing
/// the shape, creating a typed slot at a path, and writing the buffer into it. Creating
/// the container is left to each implementation's constructor and `close` releases it.
///
/// Every implementation checks (before writing any bytes) that
///
/// * the name is a valid path, `scalars` and `/scalars` refer to the same dataset
/// * the shape has at least one axis and `data.len()` equals the product of the shape
/// * the buffer is not empty
/// * the path has not already been written to this container
pub trait Container {
    /// Write a full dataset and return the XDMF item that points at it.
    ///
    /// `shape` is ordered slowest varying axis first, and `data` is laid out accordingly.
    fn write_dataset<NUM: Numeric>(
        &mut self,
        name: &str,
        shape: &[usize],
        data: &[NUM],
    ) -> Result<xdmf::DataItem, Error>;

    /// flush and release every resource held by the container
    fn close(self) -> Result<(), Error>
    where
        Self: Sized;
}

/// A grid that arrays can be placed on.
///
/// Implemented for [Image3D](`crate::Image3D`), [Rectilinear3D](`crate::Rectilinear3D`)
/// and [Curvilinear3D](`crate::Curvilinear3D`).
pub trait Domain {
    /// number of points along each axis
    fn extent(&self) -> Extent3D;

    fn topology(&self) -> xdmf::TopologyType;

    /// Write whatever arrays the geometry needs (coordinates) to the container and
    /// describe them. Grids with implicit geometry write nothing.
    fn write_geometry<C: Container>(&self, container: &mut C) -> Result<xdmf::Geometry, Error>;
}

/// A single array on a grid, written as one XDMF attribute
pub trait Field {
    /// shape of the field without a component axis, slowest varying axis first
    fn dims(&self) -> [usize; 3];

    fn attribute_type(&self) -> xdmf::AttributeType;

    /// write the dataset(s) backing this field and describe them as an attribute.
    ///
    /// Most callers want [`write_field`](crate::write_field) instead, which also checks
    /// the field against the grid.
    fn write_field<C: Container>(
        &self,
        container: &mut C,
        name: &str,
        center: xdmf::Center,
    ) -> Result<xdmf::Attribute, Error>;
}

/// A collection of fields written together on the same grid.
///
/// The easiest way to get this trait is deriving it:
///
/// ```ignore
/// #[derive(h5mesh::FieldSet)]
/// struct Flow {
///     pressure: h5mesh::Scalar3D<f32>,
///     #[mesh(rename = "velocity")]
///     u: h5mesh::Vector3D<f32>,
///     #[mesh(center = "cell")]
///     vorticity: h5mesh::Scalar3D<f32>,
/// }
/// ```
///
/// which writes the datasets `/pressure`, `/velocity` and `/vorticity` and an XDMF
/// attribute for each one.
pub trait FieldSet {
    fn write_fields<C: Container>(
        &self,
        container: &mut C,
        extent: &Extent3D,
    ) -> Result<Vec<xdmf::Attribute>, Error>;
}

impl FieldSet for () {
    fn write_fields<C: Container>(
        &self,
        _container: &mut C,
        _extent: &Extent3D,
    ) -> Result<Vec<xdmf::Attribute>, Error> {
        Ok(Vec::new())
    }
}

impl<T: FieldSet> FieldSet for &T {
    fn write_fields<C: Container>(
        &self,
        container: &mut C,
        extent: &Extent3D,
    ) -> Result<Vec<xdmf::Attribute>, Error> {
        (**self).write_fields(container, extent)
    }
}

macro_rules! tuple_field_set {
    ($($name:ident),+) => {
        impl<$($name: FieldSet),+> FieldSet for ($($name,)+) {
            #[allow(non_snake_case)]
            fn write_fields<C: Container>(
                &self,
                container: &mut C,
                extent: &Extent3D,
            ) -> Result<Vec<xdmf::Attribute>, Error> {
                let ($($name,)+) = self;
                let mut attributes = Vec::new();
                $(attributes.extend($name.write_fields(container, extent)?);)+
                Ok(attributes)
            }
        }
    };
}

tuple_field_set!(A);
tuple_field_set!(A, B);
tuple_field_set!(A, B, C0);
tuple_field_set!(A, B, C0, D);
