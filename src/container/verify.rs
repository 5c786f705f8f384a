use crate::xdmf::{DataItem, Document, Location};
use crate::Error;

use std::path::Path;

/// Outcome of checking one item of a document against the data it points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verified {
    /// the referenced data exists and holds exactly the declared number of values
    Checked,
    /// the item could not be checked by this build
    Skipped(&'static str),
}

/// Check a single item. Relative file names are resolved against `base_dir`, the
/// directory of the XDMF document.
pub fn verify_item<P: AsRef<Path>>(base_dir: P, item: &DataItem) -> Result<Verified, Error> {
    let base_dir = base_dir.as_ref();

    match &item.location {
        Location::Binary { file } => {
            let path = base_dir.join(file);
            let size = item.precision.bytes();
            let count = item.num_values()?;
            let expected = count
                .checked_mul(size)
                .and_then(|bytes| u64::try_from(bytes).ok())
                .ok_or_else(|| {
                    Error::InvalidDimensions(format!(
                        "{} values of {size} bytes in {}",
                        count,
                        path.display()
                    ))
                })?;

            let bytes = std::fs::metadata(&path)?.len();
            if bytes != expected {
                return Err(Error::ShapeMismatch {
                    name: path.display().to_string(),
                    shape: item.dims.clone(),
                    expected: count,
                    actual: (bytes / size as u64) as usize,
                });
            }

            Ok(Verified::Checked)
        }
        Location::Xml(values) => {
            let actual = values.split_ascii_whitespace().count();
            crate::check_len("inline item", &item.dims, actual)?;
            Ok(Verified::Checked)
        }
        Location::Hdf { file, path } => verify_hdf(&base_dir.join(file), path, item),
    }
}

#[cfg(feature = "hdf5")]
fn verify_hdf(file: &Path, path: &str, item: &DataItem) -> Result<Verified, Error> {
    let h5 = hdf5::File::open(file)?;
    let dataset = h5.dataset(path)?;
    let shape = dataset.shape();

    if shape != item.dims {
        return Err(Error::ShapeMismatch {
            name: format!("{}:{path}", file.display()),
            shape: item.dims.clone(),
            expected: item.num_values()?,
            actual: crate::shape_len(&shape)?,
        });
    }

    Ok(Verified::Checked)
}

#[cfg(not(feature = "hdf5"))]
fn verify_hdf(file: &Path, _path: &str, _item: &DataItem) -> Result<Verified, Error> {
    if !file.is_file() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} does not exist", file.display()),
        )));
    }

    Ok(Verified::Skipped("built without hdf5 support"))
}

/// Check every item of every grid in a document, stopping at the first failure
pub fn verify_document<P: AsRef<Path>>(
    document: &Document,
    base_dir: P,
) -> Result<Vec<Verified>, Error> {
    let base_dir = base_dir.as_ref();

    document
        .grids
        .iter()
        .flat_map(|grid| grid.items())
        .map(|item| verify_item(base_dir, item))
        .collect()
}
