use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::core::collection::{Collection, Item, SourceFile};

use super::AdapterError;

/// Feature values keyed by image stem, loaded from a CSV feature file.
///
/// The table is validated on load: both named columns must exist and
/// every weight must parse as a finite non-negative number. Malformed
/// rows abort the load, so the splitting core never sees a bad weight.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    weights: HashMap<String, f64>,
}

impl FeatureTable {
    pub fn from_path(
        path: &Path,
        id_column: &str,
        weight_column: &str,
    ) -> Result<Self, AdapterError> {
        if !path.exists() {
            return Err(AdapterError::TableNotFound(path.to_path_buf()));
        }
        let reader = csv::Reader::from_path(path)?;
        let table = Self::from_reader(reader, id_column, weight_column)?;
        info!("Loaded {} feature rows from {:?}", table.len(), path);
        Ok(table)
    }

    fn from_reader<R: Read>(
        mut reader: csv::Reader<R>,
        id_column: &str,
        weight_column: &str,
    ) -> Result<Self, AdapterError> {
        let headers = reader.headers()?.clone();
        let id_idx = headers
            .iter()
            .position(|h| h == id_column)
            .ok_or_else(|| AdapterError::MissingColumn(id_column.to_string()))?;
        let weight_idx = headers
            .iter()
            .position(|h| h == weight_column)
            .ok_or_else(|| AdapterError::MissingColumn(weight_column.to_string()))?;

        let mut weights = HashMap::new();
        for record in reader.records() {
            let record = record?;
            let id = record.get(id_idx).unwrap_or("").trim().to_string();
            let raw = record.get(weight_idx).unwrap_or("").trim();

            let weight: f64 = raw.parse().map_err(|_| AdapterError::InvalidWeight {
                id: id.clone(),
                value: raw.to_string(),
            })?;
            if !weight.is_finite() || weight < 0.0 {
                return Err(AdapterError::InvalidWeight {
                    id,
                    value: raw.to_string(),
                });
            }

            if weights.insert(id.clone(), weight).is_some() {
                warn!("Duplicate feature row for {:?}, keeping the last value", id);
            }
        }

        Ok(Self { weights })
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn weight_for(&self, stem: &str) -> Option<f64> {
        self.weights.get(stem).copied()
    }

    /// Build a collection for the files that have a feature row.
    ///
    /// Files without a row are skipped, matching the join the splitter
    /// expects: only items the table knows a weight for take part.
    pub fn collection_for_files(&self, files: &[SourceFile]) -> Collection {
        let mut items = Vec::new();
        for file in files {
            match self.weight_for(&file.stem) {
                Some(weight) => items.push(Item::new(file.stem.clone(), weight)),
                None => warn!("No feature row for {:?}, skipping", file.file_name),
            }
        }
        Collection::from_items(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_from(data: &str, id_column: &str, weight_column: &str) -> Result<FeatureTable, AdapterError> {
        let reader = csv::Reader::from_reader(data.as_bytes());
        FeatureTable::from_reader(reader, id_column, weight_column)
    }

    #[test]
    fn test_loads_weights_by_stem() {
        let table = table_from(
            "image,points\nimg_001,12\nimg_002,7.5\n",
            "image",
            "points",
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.weight_for("img_001"), Some(12.0));
        assert_eq!(table.weight_for("img_002"), Some(7.5));
        assert_eq!(table.weight_for("img_003"), None);
    }

    #[test]
    fn test_missing_column_is_rejected() {
        let result = table_from("image,points\nimg_001,12\n", "image", "angle");
        assert!(matches!(result, Err(AdapterError::MissingColumn(c)) if c == "angle"));
    }

    #[test]
    fn test_non_numeric_weight_is_rejected() {
        let result = table_from("image,points\nimg_001,lots\n", "image", "points");
        assert!(matches!(result, Err(AdapterError::InvalidWeight { .. })));
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let result = table_from("image,points\nimg_001,-3\n", "image", "points");
        assert!(matches!(result, Err(AdapterError::InvalidWeight { .. })));
    }

    #[test]
    fn test_files_without_rows_are_skipped() {
        let table = table_from("image,points\na,1\nb,2\n", "image", "points").unwrap();
        let files = vec![
            SourceFile {
                stem: "a".to_string(),
                file_name: "a.png".to_string(),
            },
            SourceFile {
                stem: "c".to_string(),
                file_name: "c.png".to_string(),
            },
        ];

        let collection = table.collection_for_files(&files);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.items()[0].id(), "a");
    }
}
