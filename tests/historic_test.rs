use chrono::NaiveDate;

use camcogni_dashboard::historic::{HistoricAggregator, HistoricRange};
use camcogni_dashboard::random::StdRandom;

fn end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, 21).unwrap()
}

fn aggregator(seed: u64) -> HistoricAggregator {
    HistoricAggregator::new(Box::new(StdRandom::seeded(seed)), end())
}

#[test]
fn test_default_range_is_seven_days() {
    let agg = aggregator(1);
    assert_eq!(agg.range(), HistoricRange::SevenDays);
    assert_eq!(agg.series().len(), 7);
}

#[test]
fn test_every_range_yields_seven_points() {
    let mut agg = aggregator(2);
    for range in HistoricRange::ALL {
        let len = agg.select_range(range).len();
        assert_eq!(len, 7, "range {} should still emit 7 points", range);
        assert_eq!(agg.range(), range);
    }
}

#[test]
fn test_window_days_reflect_requested_range() {
    let days: Vec<u32> = HistoricRange::ALL.iter().map(|r| r.window_days()).collect();
    assert_eq!(days, vec![7, 30, 90]);
}

#[test]
fn test_summary_recomputed_on_range_change() {
    let mut agg = aggregator(3);
    let before = agg.summary().unwrap();
    agg.select_range(HistoricRange::NinetyDays);
    let after = agg.summary().unwrap();

    let total: i64 = agg.series().iter().map(|p| p.output).sum();
    assert_eq!(after.total_output.value, total as f64);
    assert_ne!(before, after);
}

#[test]
fn test_series_ends_on_configured_day() {
    let mut agg = aggregator(4);
    agg.select_range(HistoricRange::ThirtyDays);
    assert_eq!(agg.series().last().unwrap().date, end());
    assert_eq!(
        agg.series().first().unwrap().date,
        NaiveDate::from_ymd_opt(2025, 2, 15).unwrap()
    );
}

#[test]
fn test_range_serializes_as_short_code() {
    assert_eq!(
        serde_json::to_string(&HistoricRange::ThirtyDays).unwrap(),
        "\"30d\""
    );
    let parsed: HistoricRange = serde_json::from_str("\"90d\"").unwrap();
    assert_eq!(parsed, HistoricRange::NinetyDays);
}
