//! # Containers
//!
//! Backends implementing [`Container`](crate::Container):
//!
//! * [`Hdf5Container`] (feature `hdf5`) writes every dataset into a single HDF5 file. This
//!   is the self-describing hierarchical container most tools expect.
//! * [`BinaryContainer`] writes every dataset to its own raw little endian file. XDMF reads
//!   these directly (`Format="Binary"`), which is handy when the HDF5 library is not around.
//! * [`XmlContainer`] keeps values in memory and inlines them into the XDMF document.
//!   Only sensible for tiny meshes, but it needs no extra files at all.
//!
//! All of them share the same dataset name rules and length checks, see
//! [`Container`](crate::Container).

mod binary;
#[cfg(feature = "hdf5")]
mod hdf5;
mod verify;
mod xml;

pub use binary::BinaryContainer;
#[cfg(feature = "hdf5")]
pub use self::hdf5::Hdf5Container;
pub use verify::{verify_document, verify_item, Verified};
pub use xml::XmlContainer;

use crate::shape::check_len;
use crate::Error;

use std::collections::BTreeSet;

/// which backend to write a mesh with, chosen at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Hdf5,
    Binary,
    Xml,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hdf5 => "hdf5",
            Self::Binary => "binary",
            Self::Xml => "xml",
        }
    }

    /// whether this build can write the format
    pub fn is_available(&self) -> bool {
        match self {
            Self::Hdf5 => cfg!(feature = "hdf5"),
            Self::Binary | Self::Xml => true,
        }
    }
}

impl Default for Format {
    /// HDF5 when compiled in, raw binary files otherwise
    fn default() -> Self {
        if cfg!(feature = "hdf5") {
            Self::Hdf5
        } else {
            Self::Binary
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turn a dataset name into an absolute path: `scalars` and `/scalars` both become
/// `/scalars`. Nested paths (`/fields/pressure`) are allowed.
pub fn normalize_name(name: &str) -> Result<String, Error> {
    let trimmed = name.strip_prefix('/').unwrap_or(name);

    let valid = !trimmed.is_empty()
        && trimmed.split('/').all(|segment| !segment.is_empty())
        // `:` separates the file from the dataset path in XDMF
        && !trimmed.contains(':')
        && !trimmed.chars().any(char::is_whitespace);

    if !valid {
        return Err(Error::InvalidName(name.to_string()));
    }

    Ok(format!("/{trimmed}"))
}

/// The datasets already written to one container
#[derive(Debug, Default, Clone)]
pub(crate) struct DatasetIndex {
    written: BTreeSet<String>,
}

impl DatasetIndex {
    /// validate a dataset before anything is written and remember its path
    pub(crate) fn register(
        &mut self,
        name: &str,
        shape: &[usize],
        len: usize,
    ) -> Result<String, Error> {
        let path = normalize_name(name)?;

        if shape.is_empty() {
            return Err(Error::InvalidDimensions(format!(
                "dataset `{path}` needs at least one axis"
            )));
        }

        if len == 0 {
            return Err(Error::EmptyDataset(path));
        }

        check_len(&path, shape, len)?;

        if self.written.contains(&path) {
            return Err(Error::DuplicateDataset(path));
        }

        self.written.insert(path.clone());
        Ok(path)
    }

    pub(crate) fn contains(&self, path: &str) -> bool {
        self.written.contains(path)
    }

    pub(crate) fn len(&self) -> usize {
        self.written.len()
    }
}
