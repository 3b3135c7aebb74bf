//! Statistics over daily weather series
//!
//! Small pure functions used by the report: medians across historical years,
//! forecast accuracy, and "when did / when will it happen" searches over
//! daily records.

use std::fmt;

/// Returned by [`days_since_last_match`] when nothing in the series matched
pub const BEYOND_RANGE_LABEL: &str = "30d+";

/// Median of a set of values.
///
/// Returns `None` for an empty slice. Even-length input yields the mean of
/// the two middle values.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let middle = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[middle - 1] + sorted[middle]) / 2.0)
    } else {
        Some(sorted[middle])
    }
}

/// How close a reference reading came to the actual one, in percent.
///
/// Computed as `100 - |(actual - reference) / actual| * 100`; may go
/// negative for large misses. Returns `None` when `actual` is zero or the
/// result is not finite.
pub fn accuracy_percent(actual: f64, reference: f64) -> Option<f64> {
    if actual == 0.0 {
        return None;
    }

    let accuracy = 100.0 - ((actual - reference) / actual).abs() * 100.0;
    accuracy.is_finite().then_some(accuracy)
}

/// How long ago a condition was last seen in a series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastSeen {
    /// Days counted back from the most recent element (0 = most recent)
    DaysAgo(usize),
    /// No element of the series matched
    BeyondRange,
}

impl fmt::Display for LastSeen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastSeen::DaysAgo(0) => write!(f, "Today"),
            LastSeen::DaysAgo(1) => write!(f, "1d ago"),
            LastSeen::DaysAgo(n) => write!(f, "{}d ago", n),
            LastSeen::BeyondRange => write!(f, "{}", BEYOND_RANGE_LABEL),
        }
    }
}

/// Scan a series from its most recent (last) element backwards and report
/// how many steps back the predicate last held.
pub fn days_since_last_match<T, P>(series: &[T], predicate: P) -> LastSeen
where
    P: Fn(&T) -> bool,
{
    series
        .iter()
        .rev()
        .position(predicate)
        .map_or(LastSeen::BeyondRange, LastSeen::DaysAgo)
}

/// Number of elements in the series satisfying the predicate
pub fn count_matches<T, P>(series: &[T], predicate: P) -> usize
where
    P: Fn(&T) -> bool,
{
    series.iter().filter(|item| predicate(item)).count()
}

/// Most probable upcoming day for a condition, from historical years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextOccurrence {
    /// Zero-based day offset with the highest match count
    pub offset: usize,
    /// How many years matched at that offset
    pub years_matched: usize,
}

impl NextOccurrence {
    /// Whether any historical year matched at all.
    ///
    /// With no matches the offset still reads as "+1d"; renderers use this
    /// to tell that apart from a genuine single-year hit at offset 0.
    pub fn has_history(&self) -> bool {
        self.years_matched > 0
    }
}

impl fmt::Display for NextOccurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}d", self.offset + 1)
    }
}

/// Find the day offset where the most historical years match the predicate.
///
/// Looks at the first `window_length` days of every year. Ties go to the
/// earliest offset, and when no year matches anywhere the result is offset 0.
pub fn next_likely_offset<Y, T, P>(years: &[Y], window_length: usize, predicate: P) -> NextOccurrence
where
    Y: AsRef<[T]>,
    P: Fn(&T) -> bool,
{
    let mut counts = vec![0usize; window_length];

    for year in years {
        for (offset, day) in year.as_ref().iter().take(window_length).enumerate() {
            if predicate(day) {
                counts[offset] += 1;
            }
        }
    }

    let mut best = NextOccurrence {
        offset: 0,
        years_matched: 0,
    };
    for (offset, &count) in counts.iter().enumerate() {
        if count > best.years_matched {
            best = NextOccurrence {
                offset,
                years_matched: count,
            };
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rained(mm: &f64) -> bool {
        *mm > 0.0
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[5.0]), Some(5.0));
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
        assert_eq!(median(&[4.0, -2.0]), Some(1.0));
    }

    #[test]
    fn test_median_empty_is_none() {
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_median_does_not_reorder_input() {
        let values = [9.0, 1.0, 5.0];
        assert_eq!(median(&values), Some(5.0));
        assert_eq!(values, [9.0, 1.0, 5.0]);
    }

    #[test]
    fn test_accuracy_exact_match_is_100() {
        assert_eq!(accuracy_percent(10.0, 10.0), Some(100.0));
    }

    #[test]
    fn test_accuracy_partial_and_negative() {
        let accuracy = accuracy_percent(10.0, 8.0).unwrap();
        assert!((accuracy - 80.0).abs() < 0.001);

        // A miss bigger than the reading itself goes below zero
        let accuracy = accuracy_percent(2.0, 8.0).unwrap();
        assert!((accuracy - (-200.0)).abs() < 0.001);

        // Sign of the actual reading doesn't matter
        let accuracy = accuracy_percent(-10.0, -9.0).unwrap();
        assert!((accuracy - 90.0).abs() < 0.001);
    }

    #[test]
    fn test_accuracy_zero_actual_is_none() {
        assert_eq!(accuracy_percent(0.0, 5.0), None);
        assert_eq!(accuracy_percent(0.0, 0.0), None);
    }

    #[test]
    fn test_accuracy_non_finite_is_none() {
        assert_eq!(accuracy_percent(f64::NAN, 5.0), None);
        assert_eq!(accuracy_percent(1e-320, 1e300), None);
    }

    #[test]
    fn test_days_since_last_match_counts_steps_from_end() {
        // Index 0 from the end reads "Today", so one rainy step back is "1d ago"
        let series = [0.0, 0.0, 1.0, 0.0];
        let last = days_since_last_match(&series, rained);
        assert_eq!(last, LastSeen::DaysAgo(1));
        assert_eq!(last.to_string(), "1d ago");

        let series = [0.0, 3.0, 0.0, 0.0];
        assert_eq!(days_since_last_match(&series, rained).to_string(), "2d ago");

        let series = [1.0, 0.0, 0.0, 2.0];
        assert_eq!(days_since_last_match(&series, rained).to_string(), "Today");
    }

    #[test]
    fn test_days_since_last_match_most_recent_last() {
        // The series is oldest-first; index 2 of 4 is one step back from
        // the end, index 1 two steps
        let series = [0.0, 1.0, 0.0, 0.0];
        assert_eq!(days_since_last_match(&series, rained), LastSeen::DaysAgo(2));
    }

    #[test]
    fn test_days_since_last_match_beyond_range() {
        let series = [0.0, 0.0, 0.0, 0.0];
        let last = days_since_last_match(&series, rained);
        assert_eq!(last, LastSeen::BeyondRange);
        assert_eq!(last.to_string(), "30d+");

        let empty: [f64; 0] = [];
        assert_eq!(days_since_last_match(&empty, rained), LastSeen::BeyondRange);
    }

    #[test]
    fn test_count_matches() {
        assert_eq!(count_matches(&[0.0, 0.2, 0.0, 4.0, 1.0], rained), 3);
        assert_eq!(count_matches(&[0.0, 0.0], rained), 0);
        assert_eq!(count_matches(&[95u8, 3, 99, 100], |c| (95..=99).contains(c)), 2);
    }

    #[test]
    fn test_next_likely_offset_all_years_agree() {
        let years = vec![vec![0.0, 0.0, 1.0]; 5];
        let next = next_likely_offset(&years, 7, rained);
        assert_eq!(next.offset, 2);
        assert_eq!(next.years_matched, 5);
        assert_eq!(next.to_string(), "+3d");
    }

    #[test]
    fn test_next_likely_offset_ties_go_to_earliest() {
        let years = vec![
            vec![0.0, 1.0, 1.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ];
        let next = next_likely_offset(&years, 3, rained);
        assert_eq!(next.offset, 1);
        assert_eq!(next.years_matched, 2);
    }

    #[test]
    fn test_next_likely_offset_without_history_reads_plus_one() {
        let years = vec![vec![0.0, 0.0, 0.0]; 5];
        let next = next_likely_offset(&years, 7, rained);
        assert_eq!(next.to_string(), "+1d");
        assert!(!next.has_history());

        // A single hit at offset 0 reads the same but carries history
        let mut years = years;
        years[3][0] = 2.5;
        let next = next_likely_offset(&years, 7, rained);
        assert_eq!(next.to_string(), "+1d");
        assert!(next.has_history());
    }

    #[test]
    fn test_next_likely_offset_respects_window_length() {
        let years = vec![vec![0.0, 0.0, 1.0]; 2];
        let next = next_likely_offset(&years, 2, rained);
        assert_eq!(next.offset, 0);
        assert_eq!(next.years_matched, 0);

        let none: Vec<Vec<f64>> = Vec::new();
        assert_eq!(next_likely_offset(&none, 7, rained).to_string(), "+1d");
    }
}
