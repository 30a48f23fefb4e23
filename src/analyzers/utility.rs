/// Cell values read as missing data, in addition to the empty string.
///
/// Same set pandas `read_csv` uses for its default `na_values`.
pub static MISSING_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Returns true if a CSV cell holds no value.
pub fn is_missing(cell: &str) -> bool {
    cell.is_empty() || MISSING_TOKENS.contains(&cell)
}

/// Like [`is_missing`], also accepting the `NaT` marker written for
/// missing timestamps.
pub fn is_missing_time(cell: &str) -> bool {
    is_missing(cell) || cell == "NaT"
}

/// Running count and sum of fares for one group.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FareAccumulator {
    pub count: u64,
    pub total: f64,
}

impl FareAccumulator {
    pub fn push(&mut self, fare: f64) {
        self.count += 1;
        self.total += fare;
    }

    /// Arithmetic mean of the pushed fares. Returns 0.0 for an empty group.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.total / self.count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_empty_group() {
        assert_eq!(FareAccumulator::default().mean(), 0.0);
    }

    #[test]
    fn test_accumulates() {
        let mut acc = FareAccumulator::default();
        acc.push(10.0);
        acc.push(20.0);
        assert_eq!(acc.count, 2);
        assert_eq!(acc.total, 30.0);
        assert_eq!(acc.mean(), 15.0);
    }

    #[test]
    fn test_missing_empty_and_null_words() {
        for cell in ["", "NA", "NULL", "null", "None", "<NA>"] {
            assert!(is_missing(cell), "{cell:?}");
        }
    }

    #[test]
    fn test_missing_not_available_spellings() {
        for cell in ["N/A", "n/a", "#N/A", "#N/A N/A", "#NA"] {
            assert!(is_missing(cell), "{cell:?}");
        }
    }

    #[test]
    fn test_missing_nan_spellings() {
        for cell in ["NaN", "nan", "-NaN", "-nan", "1.#QNAN", "-1.#QNAN", "1.#IND", "-1.#IND"] {
            assert!(is_missing(cell), "{cell:?}");
        }
    }

    #[test]
    fn test_nat_only_missing_for_times() {
        assert!(!is_missing("NaT"));
        assert!(is_missing_time("NaT"));
        assert!(is_missing_time("n/a"));
        assert!(!is_missing_time("2024-01-01 08:00"));
    }

    #[test]
    fn test_values_are_not_missing() {
        for cell in ["0", "none", "na", "Null", "inf"] {
            assert!(!is_missing(cell), "{cell:?}");
        }
    }
}
