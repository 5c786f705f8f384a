//! Common traits and types that are useful for writing meshes
#![allow(unused_imports)]

pub use crate::data::{MeshData, NamedField};
pub use crate::traits::{Container, Domain, Field, FieldSet, Numeric};
pub use crate::xdmf::{AttributeType, Center};
pub use crate::Extent3D;

pub(crate) use crate::{Error, Precision};
pub(crate) use crate::{shape, traits, xdmf};

pub(crate) use tracing::{debug, info};

pub(crate) use derive_more::{Constructor, Deref, DerefMut, Into};

pub(crate) use ndarray::{Array1, Array3, Array4};
