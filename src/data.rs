use crate::prelude::*;

#[derive(Debug, Default, Clone, PartialEq)]
/// Container type for a mesh to be written to a file.
///
/// `MeshData` contains two objects: a `DOMAIN` and a `D` in data. `domain` must implement
/// the [`Domain`](`crate::Domain`) trait and `data` must implement the
/// [`FieldSet`](`crate::FieldSet`) trait, which can be derived for your type. The `Domain`
/// trait is already implemented for the three grid types of this crate:
/// [Image3D](`crate::Image3D`), [Rectilinear3D](`crate::Rectilinear3D`) and
/// [Curvilinear3D](`crate::Curvilinear3D`).
///
/// Single fields can be written without a struct by wrapping them in a [`NamedField`]
/// (tuples of field sets are field sets too).
pub struct MeshData<DOMAIN, D> {
    pub domain: DOMAIN,
    pub data: D,
}

impl<DOMAIN, D> MeshData<DOMAIN, D> {
    /// Construct a mesh for writing to a file
    pub fn new(domain: DOMAIN, data: D) -> MeshData<DOMAIN, D> {
        MeshData { domain, data }
    }

    /// change the datatype of the data stored in this container while leaving the
    /// domain information constant
    pub fn new_data<T>(self, new_data: T) -> MeshData<DOMAIN, T> {
        MeshData {
            domain: self.domain,
            data: new_data,
        }
    }
}

/// A single field together with the attribute name and centering it is written with
#[derive(Debug, Clone, PartialEq, Constructor)]
pub struct NamedField<F> {
    pub name: String,
    pub center: Center,
    pub field: F,
}

impl<F> NamedField<F> {
    /// a field with one value per grid point
    pub fn node<S: Into<String>>(name: S, field: F) -> Self {
        Self::new(name.into(), Center::Node, field)
    }

    /// a field with one value per grid cell
    pub fn cell<S: Into<String>>(name: S, field: F) -> Self {
        Self::new(name.into(), Center::Cell, field)
    }
}

impl<F: Field> FieldSet for NamedField<F> {
    fn write_fields<C: Container>(
        &self,
        container: &mut C,
        extent: &Extent3D,
    ) -> Result<Vec<xdmf::Attribute>, Error> {
        let attribute = crate::write_field(container, &self.field, &self.name, self.center, extent)?;
        Ok(vec![attribute])
    }
}
