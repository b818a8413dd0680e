use crate::{Lift, Weight};

/// Previous to-failure lifts of an exercise put in relation to a target weight.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparableLifts {
    /// The lift whose weight is closest to the target.
    pub closest_weight: Option<Lift>,
    /// The lift with the highest estimated one-rep max.
    pub personal_record: Option<Lift>,
    /// Reps needed at the target weight to match the personal record.
    pub pr_equivalent_reps: f64,
}

impl ComparableLifts {
    /// Searches `lifts` (most recent first) for the lifts to compare a set at `target` with.
    ///
    /// Ties in the distance to the target are resolved in favour of the higher estimated
    /// one-rep max. Otherwise the first lift found wins.
    #[must_use]
    pub fn find(lifts: &[Lift], target: Weight) -> Self {
        let mut closest_weight: Option<&Lift> = None;
        let mut personal_record: Option<&Lift> = None;

        for lift in lifts {
            let one_rep_max = lift.one_rep_max();

            closest_weight = match closest_weight {
                None => Some(lift),
                Some(closest) => {
                    let current = distance(lift.weight, target);
                    let best = distance(closest.weight, target);
                    if current < best
                        || (current == best && heavier(one_rep_max, closest.one_rep_max()))
                    {
                        Some(lift)
                    } else {
                        Some(closest)
                    }
                }
            };

            personal_record = match personal_record {
                Some(record) if !heavier(one_rep_max, record.one_rep_max()) => Some(record),
                _ => Some(lift),
            };
        }

        Self {
            pr_equivalent_reps: personal_record
                .and_then(|record| record.equivalent_reps(target))
                .unwrap_or(0.0),
            closest_weight: closest_weight.cloned(),
            personal_record: personal_record.cloned(),
        }
    }
}

impl Default for ComparableLifts {
    fn default() -> Self {
        Self {
            closest_weight: None,
            personal_record: None,
            pr_equivalent_reps: 0.0,
        }
    }
}

fn heavier(weight: Weight, other: Weight) -> bool {
    let (weight, other) = weight.align(other);
    weight.value() > other.value()
}

fn distance(weight: Weight, target: Weight) -> u32 {
    let (weight, target) = weight.align(target);
    weight.abs_diff(target).value()
}
