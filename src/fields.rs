use std::collections::BTreeMap;

use crate::outcome::Letter;

/// Reads a numeric input the way the form treats it: blank, garbage and
/// non-finite values count as zero. A comma works as decimal separator.
pub fn coerce(raw: &str) -> f64 {
    parse(raw).unwrap_or(0.0)
}

/// Parses a stake edit. Only finite values above zero are accepted.
pub fn positive(raw: &str) -> Option<f64> {
    parse(raw).filter(|v| *v > 0.0)
}

fn parse(raw: &str) -> Option<f64> {
    let s = raw.trim().replace(',', ".");
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Raw text of the inputs of one outcome card.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SlotInputs {
    pub odd: String,
    pub cashback: String,
}

/// Flat numeric view of every visible input, keyed by letter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldSnapshot {
    pub odds: BTreeMap<Letter, f64>,
    pub cashbacks: BTreeMap<Letter, f64>,
    pub stakes: BTreeMap<Letter, f64>,
    pub base_stake: f64,
}

impl FieldSnapshot {
    pub fn odd(&self, letter: Letter) -> f64 {
        self.odds.get(&letter).copied().unwrap_or(0.0)
    }

    pub fn cashback(&self, letter: Letter) -> f64 {
        self.cashbacks.get(&letter).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_treats_garbage_as_zero() {
        assert_eq!(coerce(""), 0.0);
        assert_eq!(coerce("   "), 0.0);
        assert_eq!(coerce("abc"), 0.0);
        assert_eq!(coerce("NaN"), 0.0);
        assert_eq!(coerce("inf"), 0.0);
        assert_eq!(coerce(" 2.10 "), 2.1);
        assert_eq!(coerce("2,5"), 2.5);
    }

    #[test]
    fn positive_rejects_zero_and_negatives() {
        assert_eq!(positive("0"), None);
        assert_eq!(positive("-3"), None);
        assert_eq!(positive(""), None);
        assert_eq!(positive("150"), Some(150.0));
    }

    #[test]
    fn snapshot_lookups_default_to_zero() {
        let mut snap = FieldSnapshot::default();
        snap.odds.insert(Letter::A, 2.0);
        assert_eq!(snap.odd(Letter::A), 2.0);
        assert_eq!(snap.odd(Letter::B), 0.0);
        assert_eq!(snap.cashback(Letter::A), 0.0);
    }
}
