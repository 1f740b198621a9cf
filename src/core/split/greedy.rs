use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::info;

use crate::core::collection::{Collection, Item};

use super::{GroupAssignment, SplitError, SplitResult};

/// Split a collection across named groups, balancing weight sums with no
/// count target.
///
/// Items are visited in descending weight order (stable, so equal weights
/// keep their input order) and each goes to the group with the smallest
/// cumulative weight so far; ties go to the earliest group in the caller's
/// name order. Single pass, always terminates. An empty collection yields
/// all-empty groups with zero sums.
pub fn split_balanced_greedy(
    collection: &Collection,
    group_names: &[String],
) -> Result<SplitResult, SplitError> {
    if group_names.len() < 2 {
        return Err(SplitError::TooFewGroups(group_names.len()));
    }
    let mut seen = HashSet::new();
    for name in group_names {
        if !seen.insert(name.as_str()) {
            return Err(SplitError::DuplicateGroup(name.clone()));
        }
    }

    let mut groups: Vec<GroupAssignment> = group_names
        .iter()
        .map(|name| GroupAssignment::new(name))
        .collect();

    let mut items: Vec<&Item> = collection.items().iter().collect();
    items.sort_by(|a, b| {
        b.weight()
            .partial_cmp(&a.weight())
            .unwrap_or(Ordering::Equal)
    });

    for item in items {
        // strict less-than keeps the earliest group on ties
        let mut target = 0;
        for idx in 1..groups.len() {
            if groups[idx].weight_sum < groups[target].weight_sum {
                target = idx;
            }
        }
        groups[target].push(item.id(), item.weight());
    }

    info!(
        "Greedy split across {} groups: {}",
        groups.len(),
        groups
            .iter()
            .map(|g| format!("{}={} ({:.1})", g.name, g.len(), g.weight_sum))
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(SplitResult { groups })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn group_names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_documented_assignment_order() {
        let collection = Collection::from_items(vec![
            Item::new("a", 10.0),
            Item::new("b", 9.0),
            Item::new("c", 8.0),
            Item::new("d", 1.0),
        ]);
        let result =
            split_balanced_greedy(&collection, &group_names(&["train", "val"])).unwrap();

        let train = result.group("train").unwrap();
        let val = result.group("val").unwrap();

        assert_eq!(train.ids, vec!["a", "d"]);
        assert_eq!(train.weight_sum, 11.0);
        assert_eq!(val.ids, vec!["b", "c"]);
        assert_eq!(val.weight_sum, 17.0);
    }

    #[test]
    fn test_ties_go_to_earliest_group() {
        let collection = Collection::from_items(vec![
            Item::new("a", 5.0),
            Item::new("b", 5.0),
            Item::new("c", 5.0),
        ]);
        let result =
            split_balanced_greedy(&collection, &group_names(&["train", "val", "test"])).unwrap();

        // all sums start equal, so the first three assignments walk the
        // precedence order
        assert_eq!(result.group("train").unwrap().ids, vec!["a"]);
        assert_eq!(result.group("val").unwrap().ids, vec!["b"]);
        assert_eq!(result.group("test").unwrap().ids, vec!["c"]);
    }

    #[test]
    fn test_equal_weights_keep_input_order() {
        let collection = Collection::from_items(vec![
            Item::new("first", 2.0),
            Item::new("second", 2.0),
            Item::new("third", 7.0),
        ]);
        let result =
            split_balanced_greedy(&collection, &group_names(&["train", "val"])).unwrap();

        // 7.0 sorts first; the equal 2.0 items follow in input order
        assert_eq!(result.group("train").unwrap().ids, vec!["third"]);
        assert_eq!(result.group("val").unwrap().ids, vec!["first", "second"]);
    }

    #[test]
    fn test_empty_collection_yields_empty_groups() {
        let result =
            split_balanced_greedy(&Collection::default(), &group_names(&["train", "val"]))
                .unwrap();

        assert_eq!(result.groups.len(), 2);
        assert!(result.groups.iter().all(GroupAssignment::is_empty));
        assert!(result.groups.iter().all(|g| g.weight_sum == 0.0));
    }

    #[test]
    fn test_partition_covers_every_id_once() {
        let collection = Collection::from_items(
            (0..17).map(|i| Item::new(format!("img_{:02}", i), (i % 5) as f64 + 1.0)),
        );
        let result =
            split_balanced_greedy(&collection, &group_names(&["train", "val", "test"])).unwrap();

        let assigned: HashSet<&str> = result
            .groups
            .iter()
            .flat_map(|g| g.ids.iter().map(String::as_str))
            .collect();
        let expected: HashSet<&str> = collection.ids().collect();

        assert_eq!(result.assigned_count(), collection.len());
        assert_eq!(assigned, expected);
    }

    #[test]
    fn test_single_group_is_rejected() {
        let collection = Collection::from_items(vec![Item::unweighted("a")]);
        let result = split_balanced_greedy(&collection, &group_names(&["train"]));
        assert!(matches!(result, Err(SplitError::TooFewGroups(1))));
    }

    #[test]
    fn test_duplicate_group_is_rejected() {
        let collection = Collection::from_items(vec![Item::unweighted("a")]);
        let result = split_balanced_greedy(&collection, &group_names(&["train", "train"]));
        assert!(matches!(result, Err(SplitError::DuplicateGroup(_))));
    }
}
