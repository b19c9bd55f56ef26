use std::{cmp::Ordering, collections::HashSet};

use plume_types::ValidatorSnapshotRow;

/// Descending stake order. Total, so sorting never panics on odd input,
/// and `-0.0` ties with `0.0`.
pub(crate) fn by_stake_desc(a: f64, b: f64) -> Ordering {
    let normalize = |x: f64| if x == 0.0 { 0.0 } else { x };
    normalize(b).total_cmp(&normalize(a))
}

/// Names of the `n` validators holding the most stake.
///
/// Ties keep snapshot order. A name appearing twice only counts once.
pub fn top_validators_by_stake(snapshot: &[ValidatorSnapshotRow], n: usize) -> Vec<String> {
    let mut ranked: Vec<&ValidatorSnapshotRow> = snapshot.iter().collect();
    ranked.sort_by(|a, b| by_stake_desc(a.plume_staked, b.plume_staked));

    let mut seen = HashSet::new();
    ranked
        .into_iter()
        .filter(|row| seen.insert(row.validator.as_str()))
        .take(n)
        .map(|row| row.validator.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(validator: &str, plume_staked: f64) -> ValidatorSnapshotRow {
        ValidatorSnapshotRow {
            validator: validator.to_string(),
            plume_staked,
            stakers: 1,
            commission: 5.0,
        }
    }

    #[test]
    fn test_top_validators_by_stake() {
        let snapshot = [row("A", 10.0), row("B", 30.0), row("C", 20.0), row("D", 5.0)];

        assert_eq!(top_validators_by_stake(&snapshot, 2), ["B", "C"]);
        assert_eq!(top_validators_by_stake(&snapshot, 10), ["B", "C", "A", "D"]);
        assert!(top_validators_by_stake(&snapshot, 0).is_empty());
        assert!(top_validators_by_stake(&[], 3).is_empty());
    }

    #[test]
    fn test_ties_keep_snapshot_order() {
        let snapshot = [row("A", 1.0), row("B", 2.0), row("C", 1.0), row("D", 2.0), row("E", -0.0), row("F", 0.0)];

        assert_eq!(
            top_validators_by_stake(&snapshot, 6),
            ["B", "D", "A", "C", "E", "F"]
        );
    }

    #[test]
    fn test_duplicate_names_counted_once() {
        let snapshot = [row("A", 5.0), row("A", 4.0), row("B", 3.0)];

        assert_eq!(top_validators_by_stake(&snapshot, 2), ["A", "B"]);
    }
}
