use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::debug;

/// One logical image entry: a deduplicated file-name stem plus the numeric
/// feature value used as the balancing weight. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: String,
    weight: f64,
}

impl Item {
    /// Weight assigned when the source carries no feature values
    pub const DEFAULT_WEIGHT: f64 = 1.0;

    pub fn new(id: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            weight,
        }
    }

    /// Create an item with the default weight
    pub fn unweighted(id: impl Into<String>) -> Self {
        Self::new(id, Self::DEFAULT_WEIGHT)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// Ordered sequence of items, deduplicated by id (first occurrence wins)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    items: Vec<Item>,
}

impl Collection {
    /// Build a collection from items, dropping any item whose id was
    /// already seen earlier in the sequence
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut seen = HashSet::new();
        let mut deduped = Vec::new();
        for item in items {
            if seen.insert(item.id().to_string()) {
                deduped.push(item);
            } else {
                debug!("Dropping duplicate item id: {}", item.id());
            }
        }
        Self { items: deduped }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all item weights
    pub fn total_weight(&self) -> f64 {
        self.items.iter().map(Item::weight).sum()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(Item::id)
    }
}

/// A file kept after stem deduplication: the stem identifies the logical
/// item, the file name is its on-disk representative
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub stem: String,
    pub file_name: String,
}

/// Deduplicate a list of file names by stem.
///
/// Without a priority list the first file seen for a stem becomes its
/// representative, so a converted-format copy listed later is folded into
/// the original. With `extension_priority`, the file whose extension ranks
/// earliest in the list wins instead (unlisted extensions rank last, and
/// the first file seen breaks remaining ties). Output order is the order
/// in which each stem was first encountered.
pub fn dedup_by_stem(
    file_names: &[String],
    extension_priority: Option<&[String]>,
) -> Vec<SourceFile> {
    let mut stem_order: Vec<String> = Vec::new();
    let mut chosen: HashMap<String, String> = HashMap::new();

    for name in file_names {
        let stem = stem_of(name);
        match chosen.get(&stem) {
            None => {
                stem_order.push(stem.clone());
                chosen.insert(stem, name.clone());
            }
            Some(current) => {
                if let Some(priority) = extension_priority {
                    if extension_rank(name, priority) < extension_rank(current, priority) {
                        debug!("Replacing representative {} with {}", current, name);
                        chosen.insert(stem, name.clone());
                    }
                } else {
                    debug!("Dropping {} (stem already represented)", name);
                }
            }
        }
    }

    stem_order
        .into_iter()
        .map(|stem| {
            let file_name = chosen.remove(&stem).unwrap_or_default();
            SourceFile { stem, file_name }
        })
        .collect()
}

fn stem_of(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| file_name.to_string())
}

fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
}

/// Rank of a file's extension in the priority list; lower is better,
/// unlisted extensions sort after every listed one
fn extension_rank(file_name: &str, priority: &[String]) -> usize {
    extension_of(file_name)
        .and_then(|ext| priority.iter().position(|p| p.eq_ignore_ascii_case(&ext)))
        .unwrap_or(priority.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_dedup_first_seen_wins() {
        let files = names(&["photo.heic", "photo.jpeg"]);
        let deduped = dedup_by_stem(&files, None);

        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].stem, "photo");
        assert_eq!(deduped[0].file_name, "photo.heic");
    }

    #[test]
    fn test_dedup_extension_priority_overrides_order() {
        let files = names(&["photo.heic", "photo.jpeg"]);
        let priority = names(&["jpeg", "heic"]);
        let deduped = dedup_by_stem(&files, Some(&priority));

        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].file_name, "photo.jpeg");
    }

    #[test]
    fn test_dedup_unlisted_extension_loses_to_listed() {
        let files = names(&["shot.bmp", "shot.png"]);
        let priority = names(&["png"]);
        let deduped = dedup_by_stem(&files, Some(&priority));

        assert_eq!(deduped[0].file_name, "shot.png");
    }

    #[test]
    fn test_dedup_preserves_first_seen_stem_order() {
        let files = names(&["b.png", "a.png", "b.jpg", "c.png"]);
        let deduped = dedup_by_stem(&files, None);

        let stems: Vec<&str> = deduped.iter().map(|f| f.stem.as_str()).collect();
        assert_eq!(stems, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_collection_dedups_by_id() {
        let collection = Collection::from_items(vec![
            Item::new("a", 2.0),
            Item::new("b", 3.0),
            Item::new("a", 9.0),
        ]);

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.items()[0].weight(), 2.0);
        assert_eq!(collection.total_weight(), 5.0);
    }

    #[test]
    fn test_unweighted_item_defaults_to_one() {
        let item = Item::unweighted("x");
        assert_eq!(item.weight(), 1.0);
    }
}
