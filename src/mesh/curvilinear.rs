use crate::prelude::*;
use crate::xdmf::{Geometry, GeometryType, TopologyType};

/// A structured grid with an explicit position for every point.
///
/// Coordinates are indexed `[k, j, i, c]` with `c` selecting x, y or z, and are written to
/// a single interleaved dataset (`/coords` by default).
#[derive(Debug, Clone, PartialEq)]
pub struct Curvilinear3D<NUM> {
    coords: Array4<NUM>,
    extent: Extent3D,
    dataset_name: String,
}

impl<NUM> Curvilinear3D<NUM>
where
    NUM: Numeric,
{
    /// create a grid from coordinates shaped `[nz, ny, nx, 3]`
    pub fn new(coords: Array4<NUM>) -> Result<Self, Error> {
        let (nz, ny, nx, components) = coords.dim();

        if components != 3 {
            return Err(Error::InvalidGrid(format!(
                "curvilinear coordinates need 3 components per point, got {components}"
            )));
        }

        let extent = Extent3D::new(nx, ny, nz)?;

        Ok(Self {
            coords,
            extent,
            dataset_name: "coords".into(),
        })
    }

    /// create a grid from a flat interleaved buffer laid out `[nz, ny, nx, 3]`
    pub fn from_vec(extent: &Extent3D, coords: Vec<NUM>) -> Result<Self, Error> {
        let [nz, ny, nx, _] = extent.vector_dims(3);
        shape::check_len("coordinates", &extent.vector_dims(3), coords.len())?;

        let coords = Array4::from_shape_vec((nz, ny, nx, 3), coords)
            .map_err(|e| Error::InvalidDimensions(e.to_string()))?;

        Self::new(coords)
    }

    /// write the coordinates under a different dataset path
    pub fn with_dataset_name<S: Into<String>>(mut self, name: S) -> Self {
        self.dataset_name = name.into();
        self
    }

    pub fn coords(&self) -> &Array4<NUM> {
        &self.coords
    }
}

impl<NUM> Domain for Curvilinear3D<NUM>
where
    NUM: Numeric,
{
    fn extent(&self) -> Extent3D {
        self.extent
    }

    fn topology(&self) -> TopologyType {
        TopologyType::SMesh3D
    }

    fn write_geometry<C: Container>(&self, container: &mut C) -> Result<Geometry, Error> {
        let values = crate::array::standard_values(&self.coords);
        let item = container.write_dataset(
            &self.dataset_name,
            &self.extent.vector_dims(3),
            &*values,
        )?;

        Ok(Geometry::new(GeometryType::Xyz, vec![item]))
    }
}
