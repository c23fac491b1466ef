//! Unit tests for top-N selection

use super::ranker::*;
use super::*;

fn row(name: &str, tourists: u64, duration: f64) -> AggregatedRow {
    AggregatedRow {
        key: GroupValue::Country(name.to_string()),
        tourist_count: tourists,
        overnight_stays: tourists * 2,
        avg_stay_duration: duration,
        record_count: 1,
        region: None,
        precoded_iso3: None,
    }
}

fn names(rows: &[AggregatedRow]) -> Vec<String> {
    rows.iter().map(|r| r.name()).collect()
}

#[test]
fn test_top_n_descending() {
    let rows = vec![row("A", 10, 1.0), row("B", 30, 2.0), row("C", 20, 3.0)];
    let top = top_n(&rows, Metric::TouristCount, 2, SortOrder::Descending);
    assert_eq!(names(&top), vec!["B", "C"]);
}

#[test]
fn test_top_n_larger_than_input() {
    let rows = vec![row("A", 10, 1.0), row("B", 30, 2.0)];
    let top = top_n(&rows, Metric::TouristCount, 50, SortOrder::Descending);
    assert_eq!(names(&top), vec!["B", "A"]);
    assert!(top_n(&rows, Metric::TouristCount, 0, SortOrder::Descending).is_empty());
}

#[test]
fn test_top_n_ties_keep_input_order() {
    let rows = vec![row("Z", 10, 1.0), row("A", 10, 1.0), row("M", 20, 1.0)];
    let top = top_n(&rows, Metric::TouristCount, 3, SortOrder::Descending);
    assert_eq!(names(&top), vec!["M", "Z", "A"]);
}

#[test]
fn test_bottom_n() {
    let rows = vec![row("A", 10, 5.0), row("B", 30, 2.0), row("C", 20, 3.0)];
    let bottom = bottom_n(&rows, Metric::AvgStayDuration, 2);
    assert_eq!(names(&bottom), vec!["B", "C"]);
}

#[test]
fn test_rank_wraps_parameters() {
    let rows = vec![row("A", 10, 5.0)];
    let ranking = rank(&rows, Metric::EconomicIntensity, 20, SortOrder::Descending);
    assert_eq!(ranking.requested, 20);
    assert_eq!(ranking.metric, Metric::EconomicIntensity);
    assert_eq!(ranking.rows.len(), 1);
}

#[test]
fn test_top_n_empty_input() {
    assert!(top_n(&[], Metric::TouristCount, 5, SortOrder::Ascending).is_empty());
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_rows() -> impl Strategy<Value = Vec<AggregatedRow>> {
        prop::collection::vec(0u64..20, 0..30).prop_map(|counts| {
            counts
                .into_iter()
                .enumerate()
                .map(|(i, c)| row(&format!("P{:02}", i), c, 1.0))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn top_n_length_is_bounded(rows in arb_rows(), n in 0usize..40) {
            let top = top_n(&rows, Metric::TouristCount, n, SortOrder::Descending);
            prop_assert_eq!(top.len(), n.min(rows.len()));
        }

        #[test]
        fn top_n_selects_largest_stably(rows in arb_rows(), n in 0usize..40) {
            let top = top_n(&rows, Metric::TouristCount, n, SortOrder::Descending);

            // Reference: stable sort of (value desc, input index asc)
            let mut expected: Vec<(usize, &AggregatedRow)> = rows.iter().enumerate().collect();
            expected.sort_by(|(ia, a), (ib, b)| {
                b.tourist_count.cmp(&a.tourist_count).then(ia.cmp(ib))
            });
            let expected: Vec<String> = expected
                .into_iter()
                .take(n)
                .map(|(_, r)| r.name())
                .collect();

            prop_assert_eq!(names(&top), expected);
        }
    }
}
