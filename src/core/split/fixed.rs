use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::core::collection::{Collection, Item};

use super::{GroupAssignment, SplitError, SplitGroup, SplitResult};

/// Default attempt cap for the retry loop
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// Default weight-sum tolerance between the two groups
pub const DEFAULT_TOLERANCE: f64 = 10.0;

/// Configuration for the fixed-count weight-balanced split
#[derive(Debug, Clone)]
pub struct FixedCountConfig {
    /// Caller-declared item count; must match the collection size
    pub total_items: usize,
    /// Caller-declared sum of all item weights
    pub total_weight: f64,
    /// Maximum allowed difference between the two groups' weight sums
    pub tolerance: f64,
    /// Seed for the per-attempt shuffles; unseeded runs are not reproducible
    pub seed: Option<u64>,
    /// Attempts before giving up with `BalanceUnreachable`
    pub max_attempts: usize,
}

impl Default for FixedCountConfig {
    fn default() -> Self {
        Self {
            total_items: 0,
            total_weight: 0.0,
            tolerance: DEFAULT_TOLERANCE,
            seed: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl FixedCountConfig {
    /// Config whose declared totals are derived from the collection itself
    pub fn for_collection(collection: &Collection, tolerance: f64) -> Self {
        Self {
            total_items: collection.len(),
            total_weight: collection.total_weight(),
            tolerance,
            ..Self::default()
        }
    }
}

/// Split a collection into two equal-count halves whose weight sums differ
/// by at most the configured tolerance.
///
/// Each attempt reshuffles the items and scans them greedily: an item goes
/// to train while train is below its count target and adding the item
/// keeps the running weight difference within tolerance, otherwise to val
/// while val is below target, otherwise it is left out for this attempt.
/// An attempt is accepted when both groups hit the count target and the
/// final weight difference is within tolerance; after `max_attempts`
/// failed attempts the split is reported as unreachable.
pub fn split_balanced_fixed(
    collection: &Collection,
    config: &FixedCountConfig,
) -> Result<SplitResult, SplitError> {
    if collection.is_empty() {
        return Err(SplitError::EmptyInput);
    }
    if config.total_items != collection.len() {
        return Err(SplitError::CountMismatch {
            declared: config.total_items,
            actual: collection.len(),
        });
    }
    if config.total_items % 2 != 0 {
        return Err(SplitError::OddItemCount(config.total_items));
    }

    let target_count = config.total_items / 2;
    debug!(
        "Targets per group: {} items, ~{:.1} weight",
        target_count,
        config.total_weight / 2.0
    );

    let mut items: Vec<&Item> = collection.items().iter().collect();
    // one entropy-seeded generator serves every attempt of an unseeded run
    let mut entropy_rng = StdRng::from_entropy();
    let mut best_diff = f64::INFINITY;

    for attempt in 1..=config.max_attempts {
        match config.seed {
            // fresh generator per attempt, offset by the attempt number,
            // so a given seed replays the same attempt sequence
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(attempt as u64));
                items.shuffle(&mut rng);
            }
            None => items.shuffle(&mut entropy_rng),
        }

        let mut train = GroupAssignment::new(SplitGroup::Train.as_str());
        let mut val = GroupAssignment::new(SplitGroup::Val.as_str());

        for item in &items {
            let weight = item.weight();
            if train.len() < target_count
                && ((train.weight_sum + weight) - val.weight_sum).abs() <= config.tolerance
            {
                train.push(item.id(), weight);
            } else if val.len() < target_count {
                val.push(item.id(), weight);
            }
            // anything else is left out for this attempt
        }

        let diff = (train.weight_sum - val.weight_sum).abs();
        if train.len() == target_count && val.len() == target_count && diff <= config.tolerance {
            info!(
                "Balanced split found after {} attempts (weight difference {:.3})",
                attempt, diff
            );
            return Ok(SplitResult {
                groups: vec![train, val],
            });
        }
        if diff < best_diff {
            best_diff = diff;
        }
    }

    Err(SplitError::BalanceUnreachable {
        attempts: config.max_attempts,
        best_diff,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn weighted(weights: &[f64]) -> Collection {
        Collection::from_items(
            weights
                .iter()
                .enumerate()
                .map(|(i, w)| Item::new(format!("img_{:03}", i), *w)),
        )
    }

    #[test]
    fn test_feasible_input_terminates_balanced() {
        // ten items, total weight 100, an even partition exists
        let collection = weighted(&[10.0; 10]);
        let config = FixedCountConfig {
            total_items: 10,
            total_weight: 100.0,
            tolerance: 10.0,
            seed: Some(3),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        };

        let result = split_balanced_fixed(&collection, &config).unwrap();
        let train = result.group("train").unwrap();
        let val = result.group("val").unwrap();

        assert_eq!(train.len(), 5);
        assert_eq!(val.len(), 5);
        assert!((train.weight_sum - val.weight_sum).abs() <= config.tolerance);
    }

    #[test]
    fn test_mixed_weights_stay_within_tolerance() {
        let collection = weighted(&[12.0, 8.0, 15.0, 5.0, 11.0, 9.0, 14.0, 6.0, 13.0, 7.0]);
        let config = FixedCountConfig {
            total_items: 10,
            total_weight: 100.0,
            tolerance: 10.0,
            seed: Some(21),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        };

        let result = split_balanced_fixed(&collection, &config).unwrap();
        let train = result.group("train").unwrap();
        let val = result.group("val").unwrap();

        assert_eq!(train.len(), 5);
        assert_eq!(val.len(), 5);
        assert!((train.weight_sum - val.weight_sum).abs() <= 10.0);
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let collection = weighted(&[12.0, 8.0, 15.0, 5.0, 11.0, 9.0, 14.0, 6.0, 13.0, 7.0]);
        let config = FixedCountConfig {
            total_items: 10,
            total_weight: 100.0,
            tolerance: 10.0,
            seed: Some(5),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        };

        let first = split_balanced_fixed(&collection, &config).unwrap();
        let second = split_balanced_fixed(&collection, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_success_is_a_partition() {
        let collection = weighted(&[4.0, 6.0, 2.0, 8.0, 5.0, 5.0]);
        let config = FixedCountConfig {
            total_items: 6,
            total_weight: 30.0,
            tolerance: 4.0,
            seed: Some(11),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        };

        let result = split_balanced_fixed(&collection, &config).unwrap();
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
    fn test_declared_count_mismatch_is_rejected() {
        let collection = weighted(&[1.0, 2.0, 3.0, 4.0]);
        let config = FixedCountConfig {
            total_items: 6,
            total_weight: 10.0,
            ..FixedCountConfig::default()
        };

        let result = split_balanced_fixed(&collection, &config);
        assert!(matches!(
            result,
            Err(SplitError::CountMismatch {
                declared: 6,
                actual: 4
            })
        ));
    }

    #[test]
    fn test_odd_count_is_rejected() {
        let collection = weighted(&[1.0, 2.0, 3.0]);
        let config = FixedCountConfig {
            total_items: 3,
            total_weight: 6.0,
            ..FixedCountConfig::default()
        };

        let result = split_balanced_fixed(&collection, &config);
        assert!(matches!(result, Err(SplitError::OddItemCount(3))));
    }

    #[test]
    fn test_infeasible_input_reports_unreachable() {
        // one item alone exceeds the tolerance, no attempt can succeed
        let collection = weighted(&[100.0, 0.0]);
        let config = FixedCountConfig {
            total_items: 2,
            total_weight: 100.0,
            tolerance: 1.0,
            seed: Some(1),
            max_attempts: 25,
        };

        let result = split_balanced_fixed(&collection, &config);
        assert!(matches!(
            result,
            Err(SplitError::BalanceUnreachable { attempts: 25, .. })
        ));
    }
}
