use crate::prelude::*;
use crate::xdmf::{Geometry, GeometryType, TopologyType};

/// Full information on a 3D rectilinear domain. Points lie on the tensor product of three
/// coordinate arrays, so spacing may vary along each axis.
///
/// The extent is taken from the lengths of the coordinate arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectilinear3D<NUM> {
    x_locations: Array1<NUM>,
    y_locations: Array1<NUM>,
    z_locations: Array1<NUM>,
    extent: Extent3D,
    dataset_names: [String; 3],
}

impl<NUM> Rectilinear3D<NUM>
where
    NUM: Numeric,
{
    /// create a domain from coordinate arrays. Every array must hold at least one point
    pub fn new<T: Into<Array1<NUM>>>(
        x_locations: T,
        y_locations: T,
        z_locations: T,
    ) -> Result<Self, Error> {
        let x_locations = x_locations.into();
        let y_locations = y_locations.into();
        let z_locations = z_locations.into();

        let extent = Extent3D::new(x_locations.len(), y_locations.len(), z_locations.len())
            .map_err(|_| {
                Error::InvalidGrid(format!(
                    "rectilinear coordinates need at least one point per axis, got {} {} {}",
                    x_locations.len(),
                    y_locations.len(),
                    z_locations.len()
                ))
            })?;

        Ok(Self {
            x_locations,
            y_locations,
            z_locations,
            extent,
            dataset_names: ["xcoords".into(), "ycoords".into(), "zcoords".into()],
        })
    }

    /// write the coordinate arrays under different dataset paths
    pub fn with_dataset_names<S: Into<String>>(mut self, x: S, y: S, z: S) -> Self {
        self.dataset_names = [x.into(), y.into(), z.into()];
        self
    }

    pub fn x_locations(&self) -> &Array1<NUM> {
        &self.x_locations
    }

    pub fn y_locations(&self) -> &Array1<NUM> {
        &self.y_locations
    }

    pub fn z_locations(&self) -> &Array1<NUM> {
        &self.z_locations
    }
}

impl<NUM> Domain for Rectilinear3D<NUM>
where
    NUM: Numeric,
{
    fn extent(&self) -> Extent3D {
        self.extent
    }

    fn topology(&self) -> TopologyType {
        TopologyType::RectMesh3D
    }

    fn write_geometry<C: Container>(&self, container: &mut C) -> Result<Geometry, Error> {
        let mut items = Vec::with_capacity(3);

        for (name, coords) in self.dataset_names.iter().zip([
            &self.x_locations,
            &self.y_locations,
            &self.z_locations,
        ]) {
            let values = crate::array::standard_values(coords);
            items.push(container.write_dataset(name, &[coords.len()], &*values)?);
        }

        Ok(Geometry::new(GeometryType::VxVyVz, items))
    }
}
