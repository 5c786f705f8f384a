use super::DatasetIndex;
use crate::xdmf::{DataItem, Location};
use crate::{Container, Error, Numeric};

use std::path::{Path, PathBuf};

use tracing::{debug, info};

/// Writes every dataset into one HDF5 file.
///
/// Creating the container truncates an existing file. Datasets are stored with the file
/// type of `NUM` (IEEE little endian floats on every platform this runs on), and nested
/// paths like `/fields/pressure` create their intermediate groups.
pub struct Hdf5Container {
    file: hdf5::File,
    path: PathBuf,
    /// file name as referenced from the XDMF document
    file_name: String,
    index: DatasetIndex,
}

impl Hdf5Container {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| Error::InvalidName(path.display().to_string()))?;

        info!(file = %path.display(), "creating hdf5 file");
        let file = hdf5::File::create(&path)?;

        Ok(Self {
            file,
            path,
            file_name,
            index: DatasetIndex::default(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// read a dataset (shape and values in slowest-first order) from an existing file
    pub fn read_dataset<NUM: Numeric, P: AsRef<Path>>(
        path: P,
        name: &str,
    ) -> Result<(Vec<usize>, Vec<NUM>), Error> {
        let dataset_path = super::normalize_name(name)?;
        let file = hdf5::File::open(path)?;
        let dataset = file.dataset(&dataset_path)?;

        let shape = dataset.shape();
        let values = dataset.read_raw::<NUM>()?;

        Ok((shape, values))
    }
}

impl Container for Hdf5Container {
    fn write_dataset<NUM: Numeric>(
        &mut self,
        name: &str,
        shape: &[usize],
        data: &[NUM],
    ) -> Result<DataItem, Error> {
        let path = self.index.register(name, shape, data.len())?;

        debug!(dataset = %path, ?shape, "writing hdf5 dataset");

        let dataset = self
            .file
            .new_dataset::<NUM>()
            .shape(shape.to_vec())
            .create(path.as_str())?;
        dataset.write_raw(data)?;

        Ok(DataItem::new(
            shape.to_vec(),
            NUM::as_precision(),
            Location::Hdf {
                file: self.file_name.clone(),
                path,
            },
        ))
    }

    fn close(self) -> Result<(), Error> {
        info!(file = %self.path.display(), datasets = self.index.len(), "closing hdf5 file");
        self.file.close()?;
        Ok(())
    }
}
