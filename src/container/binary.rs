use super::{normalize_name, DatasetIndex};
use crate::xdmf::{DataItem, Location};
use crate::{Container, Error, Numeric};

use std::collections::BTreeSet;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

/// Writes every dataset to its own raw little endian file next to the XDMF document.
///
/// A dataset `/scalars` in a container with stem `scalar` ends up in `scalar_scalars.bin`.
/// Existing files with the same name are truncated. Two paths that map to the same file
/// (`/fields/rho` and `/fields_rho`) cannot both be written to one container.
#[derive(Debug)]
pub struct BinaryContainer {
    dir: PathBuf,
    stem: String,
    index: DatasetIndex,
    file_names: BTreeSet<String>,
    files: Vec<PathBuf>,
}

impl BinaryContainer {
    /// create a container writing into `dir`, which must already exist
    pub fn create<P: AsRef<Path>>(dir: P, stem: &str) -> Result<Self, Error> {
        let dir = dir.as_ref().to_path_buf();

        if !dir.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("output directory {} does not exist", dir.display()),
            )));
        }

        if stem.is_empty() || stem.contains(['/', '\\']) {
            return Err(Error::InvalidName(stem.to_string()));
        }

        info!(dir = %dir.display(), stem, "creating binary container");

        Ok(Self {
            dir,
            stem: stem.to_string(),
            index: DatasetIndex::default(),
            file_names: BTreeSet::new(),
            files: Vec::new(),
        })
    }

    /// file name (relative to the output directory) used for a dataset path
    pub fn file_name(&self, path: &str) -> String {
        format!("{}{}.bin", self.stem, path.replace('/', "_"))
    }

    /// every file written so far
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// read a file written by this backend back into memory
    pub fn read_dataset<NUM: Numeric, P: AsRef<Path>>(path: P) -> Result<Vec<NUM>, Error> {
        let path = path.as_ref();
        let bytes = std::fs::metadata(path)?.len();

        if bytes % NUM::SIZE as u64 != 0 {
            return Err(Error::TruncatedData {
                path: path.to_path_buf(),
                bytes,
                size: NUM::SIZE,
            });
        }

        let count = (bytes / NUM::SIZE as u64) as usize;
        let mut reader = BufReader::new(std::fs::File::open(path)?);
        let mut values = Vec::with_capacity(count);

        for _ in 0..count {
            values.push(NUM::read_le_bytes(&mut reader)?);
        }

        Ok(values)
    }
}

impl Container for BinaryContainer {
    fn write_dataset<NUM: Numeric>(
        &mut self,
        name: &str,
        shape: &[usize],
        data: &[NUM],
    ) -> Result<DataItem, Error> {
        let file_name = self.file_name(&normalize_name(name)?);
        if self.file_names.contains(&file_name) {
            return Err(Error::DuplicateDataset(format!("{name} (file {file_name})")));
        }

        let path = self.index.register(name, shape, data.len())?;
        self.file_names.insert(file_name.clone());
        let full_path = self.dir.join(&file_name);

        debug!(dataset = %path, file = %full_path.display(), ?shape, "writing binary dataset");

        let mut writer = BufWriter::new(std::fs::File::create(&full_path)?);
        for value in data {
            value.write_le_bytes(&mut writer)?;
        }
        writer.flush()?;

        self.files.push(full_path);

        Ok(DataItem::new(
            shape.to_vec(),
            NUM::as_precision(),
            Location::Binary { file: file_name },
        ))
    }

    fn close(self) -> Result<(), Error> {
        // every file is flushed and closed as soon as it is written
        info!(stem = %self.stem, datasets = self.index.len(), "closed binary container");
        Ok(())
    }
}
