use super::DatasetIndex;
use crate::xdmf::{inline_values, DataItem, Location};
use crate::{Container, Error, Numeric};

use std::collections::BTreeMap;

use tracing::debug;

/// Keeps every dataset in memory and inlines its values into the XDMF document
#[derive(Debug, Default, Clone)]
pub struct XmlContainer {
    index: DatasetIndex,
    datasets: BTreeMap<String, (Vec<usize>, Vec<f64>)>,
}

impl XmlContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// shape and values of a written dataset
    pub fn dataset(&self, name: &str) -> Option<(&[usize], &[f64])> {
        let path = super::normalize_name(name).ok()?;
        self.datasets
            .get(&path)
            .map(|(shape, values)| (shape.as_slice(), values.as_slice()))
    }

    /// paths of every dataset written so far, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.datasets.keys().map(String::as_str)
    }
}

impl Container for XmlContainer {
    fn write_dataset<NUM: Numeric>(
        &mut self,
        name: &str,
        shape: &[usize],
        data: &[NUM],
    ) -> Result<DataItem, Error> {
        let path = self.index.register(name, shape, data.len())?;

        debug!(dataset = %path, ?shape, "inlining dataset");

        let text = inline_values(data);
        let values = data.iter().map(|value| value.as_f64()).collect();
        self.datasets.insert(path, (shape.to_vec(), values));

        Ok(DataItem::new(
            shape.to_vec(),
            NUM::as_precision(),
            Location::Xml(text),
        ))
    }

    fn close(self) -> Result<(), Error> {
        Ok(())
    }
}

#[test]
fn values_kept_and_inlined() {
    let mut container = XmlContainer::new();
    let item = container
        .write_dataset("/xcoords", &[3], &[0.0f32, 0.1, 0.3])
        .unwrap();

    assert_eq!(item.location, Location::Xml("0.0 0.1 0.3".into()));

    let (shape, values) = container.dataset("xcoords").unwrap();
    assert_eq!(shape, &[3]);
    assert_eq!(values.len(), 3);
    assert_eq!(container.names().collect::<Vec<_>>(), vec!["/xcoords"]);
}
