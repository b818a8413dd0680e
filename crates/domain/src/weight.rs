use std::fmt;

use derive_more::{Display, Into};

use crate::Reps;

/// Per-rep factor of the one-rep max estimation (roughly 1/30, Epley).
pub const EPLEY_FACTOR: f64 = 0.033_333_3;

/// Upper bound of parsed weights, so that any parsed weight can be expressed in centi-pounds.
pub const MAX_POUNDS: u32 = 100_000;

/// Fixed-point resolution of a [`Weight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightUnit {
    /// Tenths of a pound, e.g. 1775 == 177.5 lbs.
    DeciPounds,
    /// Hundredths of a pound, only needed for plate increments like 1.25 lbs.
    CentiPounds,
}

impl WeightUnit {
    #[must_use]
    pub fn per_pound(self) -> u32 {
        match self {
            WeightUnit::DeciPounds => 10,
            WeightUnit::CentiPounds => 100,
        }
    }

    fn fractional_digits(self) -> usize {
        match self {
            WeightUnit::DeciPounds => 1,
            WeightUnit::CentiPounds => 2,
        }
    }

    #[must_use]
    pub fn finer(self, other: WeightUnit) -> WeightUnit {
        if self.per_pound() >= other.per_pound() {
            self
        } else {
            other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Weight {
    unit: WeightUnit,
    value: u32,
}

impl Weight {
    pub const ZERO: Weight = Weight::deci_pounds(0);

    #[must_use]
    pub const fn new(value: u32, unit: WeightUnit) -> Self {
        Self { unit, value }
    }

    #[must_use]
    pub const fn deci_pounds(value: u32) -> Self {
        Self::new(value, WeightUnit::DeciPounds)
    }

    #[must_use]
    pub const fn centi_pounds(value: u32) -> Self {
        Self::new(value, WeightUnit::CentiPounds)
    }

    #[must_use]
    pub fn value(&self) -> u32 {
        self.value
    }

    #[must_use]
    pub fn unit(&self) -> WeightUnit {
        self.unit
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Expresses the weight in another unit. Returns `None` if precision would be lost.
    #[must_use]
    pub fn to_unit(self, unit: WeightUnit) -> Option<Weight> {
        let from = self.unit.per_pound();
        let to = unit.per_pound();
        if to >= from {
            self.value
                .checked_mul(to / from)
                .map(|value| Weight { unit, value })
        } else if self.value % (from / to) == 0 {
            Some(Weight {
                unit,
                value: self.value / (from / to),
            })
        } else {
            None
        }
    }

    /// Expresses both weights in the finer of their two units.
    ///
    /// # Panics
    ///
    /// Panics if a weight is too large to be represented in the finer unit.
    #[must_use]
    pub fn align(self, other: Weight) -> (Weight, Weight) {
        let unit = self.unit.finer(other.unit);
        match (self.to_unit(unit), other.to_unit(unit)) {
            (Some(a), Some(b)) => (a, b),
            _ => panic!("weights {self:?} and {other:?} cannot be aligned"),
        }
    }

    /// # Panics
    ///
    /// Panics if the units differ.
    #[must_use]
    pub fn abs_diff(self, other: Weight) -> Weight {
        assert_same_unit(self, other);
        Weight {
            unit: self.unit,
            value: self.value.abs_diff(other.value),
        }
    }

    /// Estimated one-rep max, truncated to the unit of the weight.
    #[must_use]
    pub fn one_rep_max(self, reps: Reps) -> Weight {
        if u32::from(reps) == 0 {
            return self;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let value = self.estimated_one_rep_max(reps) as u32;
        Weight {
            unit: self.unit,
            value,
        }
    }

    pub(crate) fn estimated_one_rep_max(self, reps: Reps) -> f64 {
        let weight = f64::from(self.value);
        weight + weight * f64::from(u32::from(reps)) * EPLEY_FACTOR
    }

    /// Reps at `target` which would result in the same estimated one-rep max as doing `reps`
    /// at this weight. Returns `None` for a zero target.
    #[must_use]
    pub fn equivalent_reps(self, reps: Reps, target: Weight) -> Option<f64> {
        let (weight, target) = self.align(target);
        if target.is_zero() {
            return None;
        }
        let one_rep_max = weight.estimated_one_rep_max(reps);
        Some((one_rep_max / f64::from(target.value) - 1.0) / EPLEY_FACTOR)
    }

    /// Calculates `percentage` of this training max and rounds the result to the nearest multiple
    /// of `increment`. A result exactly in the middle of two multiples is rounded up. A zero
    /// increment only rounds to the resolution of the unit.
    ///
    /// # Panics
    ///
    /// Panics if the training max and the increment do not share a unit, or if the rounded
    /// result does not fit into the unit.
    #[must_use]
    pub fn round_to_increment(self, percentage: Percentage, increment: Weight) -> Weight {
        assert_same_unit(self, increment);

        // Scaled by 100 to keep the percentage calculation exact.
        let target = u64::from(self.value) * u64::from(u8::from(percentage));
        let step = u64::from(increment.value) * 100;

        let rounded = if step == 0 {
            (target + 50) / 100
        } else {
            let lower = target / step * step;
            let upper = if lower == target { lower } else { lower + step };
            if target - lower < upper - target {
                lower / 100
            } else {
                upper / 100
            }
        };

        let Ok(value) = u32::try_from(rounded) else {
            panic!("rounding {self:?} to {increment:?} exceeds the weight range");
        };
        Weight {
            unit: self.unit,
            value,
        }
    }

    /// Parses a plate increment, which may need two fractional digits (e.g. "1.25").
    pub fn parse_increment(value: &str) -> Result<Self, WeightError> {
        let (whole, fraction) = split_decimal(value)?;
        match fraction.len() {
            0 | 1 => fixed_point(whole, fraction, WeightUnit::DeciPounds),
            2 if fraction.ends_with('0') => {
                fixed_point(whole, &fraction[..1], WeightUnit::DeciPounds)
            }
            2 => fixed_point(whole, fraction, WeightUnit::CentiPounds),
            _ => Err(WeightError::TooPrecise),
        }
    }
}

/// Parses decimal pounds with at most one fractional digit, e.g. "177.5", "150." or ".5".
impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let (whole, fraction) = split_decimal(value)?;
        if fraction.len() > 1 {
            return Err(WeightError::TooPrecise);
        }
        fixed_point(whole, fraction, WeightUnit::DeciPounds)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let per_pound = self.unit.per_pound();
        let whole = self.value / per_pound;
        let fraction = self.value % per_pound;
        if fraction == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!(
            "{fraction:0width$}",
            width = self.unit.fractional_digits()
        );
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

fn assert_same_unit(a: Weight, b: Weight) {
    assert!(
        a.unit == b.unit,
        "mismatched weight units: {:?} and {:?}",
        a.unit,
        b.unit
    );
}

fn split_decimal(value: &str) -> Result<(&str, &str), WeightError> {
    let value = value.trim();
    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));

    if whole.is_empty() && fraction.is_empty() {
        return Err(WeightError::Empty);
    }
    if whole.starts_with('-') || fraction.starts_with('-') {
        return Err(WeightError::Negative);
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(WeightError::Invalid(value.to_string()));
    }

    Ok((whole, fraction))
}

fn fixed_point(whole: &str, fraction: &str, unit: WeightUnit) -> Result<Weight, WeightError> {
    let digits = unit.fractional_digits();
    let whole = if whole.is_empty() {
        0
    } else {
        whole.parse::<u32>().map_err(|_| WeightError::OutOfRange)?
    };
    let fraction = format!("{fraction:0<digits$}")
        .parse::<u32>()
        .map_err(|_| WeightError::Invalid(fraction.to_string()))?;

    whole
        .checked_mul(unit.per_pound())
        .and_then(|w| w.checked_add(fraction))
        .filter(|value| *value <= MAX_POUNDS * unit.per_pound())
        .map(|value| Weight { unit, value })
        .ok_or(WeightError::OutOfRange)
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must not be empty")]
    Empty,
    #[error("Weight must not be negative")]
    Negative,
    #[error("Weight must be a decimal number ({0:?})")]
    Invalid(String),
    #[error("Weight must be a multiple of 0.1 lbs")]
    TooPrecise,
    #[error("Weight must be {} lbs or less", MAX_POUNDS)]
    OutOfRange,
}

/// Portion of a training max, 0 to 100.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Percentage(u8);

impl Percentage {
    pub fn new(value: u8) -> Result<Self, PercentageError> {
        if value > 100 {
            return Err(PercentageError::OutOfRange(value.into()));
        }
        Ok(Self(value))
    }
}

impl TryFrom<u32> for Percentage {
    type Error = PercentageError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| PercentageError::OutOfRange(value))
            .and_then(Percentage::new)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PercentageError {
    #[error("Percentage must be 100 or less ({0} > 100)")]
    OutOfRange(u32),
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn reps(value: u32) -> Reps {
        Reps::new(value).unwrap()
    }

    fn percent(value: u8) -> Percentage {
        Percentage::new(value).unwrap()
    }

    #[rstest]
    #[case("5", Ok(Weight::deci_pounds(50)))]
    #[case("150", Ok(Weight::deci_pounds(1500)))]
    #[case("150.", Ok(Weight::deci_pounds(1500)))]
    #[case("150.0", Ok(Weight::deci_pounds(1500)))]
    #[case("150.5", Ok(Weight::deci_pounds(1505)))]
    #[case(".5", Ok(Weight::deci_pounds(5)))]
    #[case("0.5", Ok(Weight::deci_pounds(5)))]
    #[case(" 177.5 ", Ok(Weight::deci_pounds(1775)))]
    #[case("", Err(WeightError::Empty))]
    #[case(".", Err(WeightError::Empty))]
    #[case("abc", Err(WeightError::Invalid("abc".to_string())))]
    #[case("abc.5", Err(WeightError::Invalid("abc.5".to_string())))]
    #[case("-1", Err(WeightError::Negative))]
    #[case("-100.0", Err(WeightError::Negative))]
    #[case("100.-9", Err(WeightError::Negative))]
    #[case("100.abc", Err(WeightError::Invalid("100.abc".to_string())))]
    #[case("100.12", Err(WeightError::TooPrecise))]
    #[case("1.2.3", Err(WeightError::Invalid("1.2.3".to_string())))]
    #[case("99999999999", Err(WeightError::OutOfRange))]
    #[case("100000", Ok(Weight::deci_pounds(1_000_000)))]
    #[case("100000.1", Err(WeightError::OutOfRange))]
    #[case("400000000", Err(WeightError::OutOfRange))]
    fn test_weight_try_from_str(#[case] input: &str, #[case] expected: Result<Weight, WeightError>) {
        assert_eq!(Weight::try_from(input), expected);
    }

    #[rstest]
    #[case("1.25", Ok(Weight::centi_pounds(125)))]
    #[case("2.5", Ok(Weight::deci_pounds(25)))]
    #[case("2.50", Ok(Weight::deci_pounds(25)))]
    #[case("5", Ok(Weight::deci_pounds(50)))]
    #[case("0.125", Err(WeightError::TooPrecise))]
    #[case("-1.25", Err(WeightError::Negative))]
    #[case("100000.01", Err(WeightError::OutOfRange))]
    fn test_weight_parse_increment(
        #[case] input: &str,
        #[case] expected: Result<Weight, WeightError>,
    ) {
        assert_eq!(Weight::parse_increment(input), expected);
    }

    #[rstest]
    #[case(Weight::deci_pounds(1000), "100")]
    #[case(Weight::deci_pounds(1005), "100.5")]
    #[case(Weight::deci_pounds(5), "0.5")]
    #[case(Weight::deci_pounds(0), "0")]
    #[case(Weight::centi_pounds(125), "1.25")]
    #[case(Weight::centi_pounds(5120), "51.2")]
    #[case(Weight::centi_pounds(5100), "51")]
    #[case(Weight::centi_pounds(5105), "51.05")]
    fn test_weight_display(#[case] input: Weight, #[case] expected: &str) {
        assert_eq!(input.to_string(), expected);
    }

    #[rstest]
    #[case("150.5")]
    #[case("0.5")]
    #[case("1")]
    #[case("999.9")]
    fn test_weight_string_round_trip(#[case] input: &str) {
        assert_eq!(Weight::try_from(input).unwrap().to_string(), input);
    }

    #[rstest]
    #[case(Weight::deci_pounds(1275), WeightUnit::CentiPounds, Some(Weight::centi_pounds(12750)))]
    #[case(Weight::centi_pounds(12750), WeightUnit::DeciPounds, Some(Weight::deci_pounds(1275)))]
    #[case(Weight::centi_pounds(125), WeightUnit::DeciPounds, None)]
    #[case(Weight::deci_pounds(25), WeightUnit::DeciPounds, Some(Weight::deci_pounds(25)))]
    fn test_weight_to_unit(
        #[case] weight: Weight,
        #[case] unit: WeightUnit,
        #[case] expected: Option<Weight>,
    ) {
        assert_eq!(weight.to_unit(unit), expected);
    }

    #[test]
    fn test_weight_align() {
        assert_eq!(
            Weight::deci_pounds(1275).align(Weight::centi_pounds(125)),
            (Weight::centi_pounds(12750), Weight::centi_pounds(125))
        );
        assert_eq!(
            Weight::deci_pounds(1275).align(Weight::deci_pounds(25)),
            (Weight::deci_pounds(1275), Weight::deci_pounds(25))
        );
    }

    #[test]
    fn test_weight_abs_diff() {
        assert_eq!(
            Weight::deci_pounds(900).abs_diff(Weight::deci_pounds(1000)),
            Weight::deci_pounds(100)
        );
        assert_eq!(
            Weight::deci_pounds(1000).abs_diff(Weight::deci_pounds(900)),
            Weight::deci_pounds(100)
        );
    }

    #[test]
    #[should_panic(expected = "mismatched weight units")]
    fn test_weight_abs_diff_mismatched_units() {
        let _ = Weight::deci_pounds(900).abs_diff(Weight::centi_pounds(9000));
    }

    #[rstest]
    #[case(Weight::deci_pounds(1000), 0, Weight::deci_pounds(1000))]
    #[case(Weight::deci_pounds(1000), 1, Weight::deci_pounds(1033))]
    #[case(Weight::deci_pounds(1000), 10, Weight::deci_pounds(1333))]
    #[case(Weight::deci_pounds(1075), 7, Weight::deci_pounds(1325))]
    #[case(Weight::deci_pounds(0), 5, Weight::deci_pounds(0))]
    fn test_weight_one_rep_max(#[case] weight: Weight, #[case] r: u32, #[case] expected: Weight) {
        assert_eq!(weight.one_rep_max(reps(r)), expected);
    }

    #[test]
    fn test_weight_equivalent_reps() {
        let weight = Weight::deci_pounds(1000);
        assert_approx_eq!(
            weight
                .equivalent_reps(reps(10), Weight::deci_pounds(1000))
                .unwrap(),
            10.0
        );
        assert_approx_eq!(
            weight
                .equivalent_reps(reps(5), Weight::deci_pounds(1000))
                .unwrap(),
            5.0
        );
        assert_approx_eq!(
            weight
                .equivalent_reps(reps(0), Weight::deci_pounds(1000))
                .unwrap(),
            0.0
        );
        // 100 x 10 ~ 133.3, which is about 3.33 reps at 120
        assert_approx_eq!(
            weight
                .equivalent_reps(reps(10), Weight::deci_pounds(1200))
                .unwrap(),
            3.333_33,
            1e-3
        );
        assert_approx_eq!(
            weight
                .equivalent_reps(reps(10), Weight::centi_pounds(10000))
                .unwrap(),
            10.0
        );
    }

    #[test]
    fn test_weight_equivalent_reps_zero_target() {
        assert_eq!(
            Weight::deci_pounds(1000).equivalent_reps(reps(5), Weight::ZERO),
            None
        );
    }

    #[rstest]
    #[case(1050, 85, 25, 900)]
    #[case(1050, 85, 50, 900)]
    #[case(2100, 85, 25, 1775)]
    #[case(2100, 85, 50, 1800)]
    #[case(1700, 85, 25, 1450)]
    #[case(1700, 85, 100, 1400)]
    #[case(2650, 85, 25, 2250)]
    #[case(1050, 90, 25, 950)]
    #[case(2100, 90, 25, 1900)]
    #[case(1700, 90, 25, 1525)]
    #[case(2650, 90, 25, 2375)]
    #[case(1050, 95, 25, 1000)]
    #[case(1000, 50, 40, 520)]
    #[case(1000, 100, 25, 1000)]
    #[case(1000, 0, 25, 0)]
    #[case(1275, 40, 0, 510)]
    #[case(1275, 65, 0, 829)]
    fn test_weight_round_to_increment(
        #[case] training_max: u32,
        #[case] percentage: u8,
        #[case] increment: u32,
        #[case] expected: u32,
    ) {
        assert_eq!(
            Weight::deci_pounds(training_max)
                .round_to_increment(percent(percentage), Weight::deci_pounds(increment)),
            Weight::deci_pounds(expected)
        );
    }

    #[test]
    fn test_weight_round_to_increment_centi_pounds() {
        let (training_max, increment) = Weight::deci_pounds(1275).align(Weight::centi_pounds(125));
        assert_eq!(
            training_max.round_to_increment(percent(40), increment),
            Weight::centi_pounds(5125)
        );
    }

    #[test]
    fn test_weight_round_to_increment_largest_weight() {
        let (training_max, increment) = Weight::try_from("100000")
            .unwrap()
            .align(Weight::parse_increment("1.25").unwrap());
        assert_eq!(
            training_max.round_to_increment(percent(95), increment),
            Weight::centi_pounds(9_500_000)
        );
    }

    #[test]
    #[should_panic(expected = "exceeds the weight range")]
    fn test_weight_round_to_increment_overflow() {
        let _ = Weight::deci_pounds(u32::MAX)
            .round_to_increment(percent(100), Weight::deci_pounds(2));
    }

    #[test]
    #[should_panic(expected = "mismatched weight units")]
    fn test_weight_round_to_increment_mismatched_units() {
        let _ = Weight::deci_pounds(1275).round_to_increment(percent(40), Weight::centi_pounds(125));
    }

    #[rstest]
    #[case(0, Ok(Percentage(0)))]
    #[case(100, Ok(Percentage(100)))]
    #[case(101, Err(PercentageError::OutOfRange(101)))]
    fn test_percentage_new(#[case] value: u8, #[case] expected: Result<Percentage, PercentageError>) {
        assert_eq!(Percentage::new(value), expected);
    }

    #[test]
    fn test_percentage_try_from_u32() {
        assert_eq!(Percentage::try_from(85_u32), Ok(Percentage(85)));
        assert_eq!(
            Percentage::try_from(1000_u32),
            Err(PercentageError::OutOfRange(1000))
        );
    }
}
