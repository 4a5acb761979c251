//! Historic summary screen: a look-back range selector and a bounded-random
//! daily series with summary cards derived from it.
//!
//! The series is always `HISTORIC_SERIES_LEN` days long. The selected range is
//! carried as the requested window for a server-backed aggregation; it does
//! not change the local series shape.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::HISTORIC_SERIES_LEN;
use crate::random::{round_to, RandomSource};
use crate::telemetry::Trend;

pub const HISTORIC_EFFICIENCY_RANGE: (f64, f64) = (70.0, 90.0);
pub const HISTORIC_LABOR_UTILIZATION_RANGE: (f64, f64) = (65.0, 85.0);
pub const HISTORIC_OUTPUT_RANGE: (i64, i64) = (80, 120);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HistoricRange {
    #[default]
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "90d")]
    NinetyDays,
}

impl HistoricRange {
    pub const ALL: [HistoricRange; 3] = [
        HistoricRange::SevenDays,
        HistoricRange::ThirtyDays,
        HistoricRange::NinetyDays,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HistoricRange::SevenDays => "7d",
            HistoricRange::ThirtyDays => "30d",
            HistoricRange::NinetyDays => "90d",
        }
    }

    /// Look-back window this range asks for.
    pub fn window_days(self) -> u32 {
        match self {
            HistoricRange::SevenDays => 7,
            HistoricRange::ThirtyDays => 30,
            HistoricRange::NinetyDays => 90,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HistoricRange::SevenDays => "Last 7 days",
            HistoricRange::ThirtyDays => "Last 30 days",
            HistoricRange::NinetyDays => "Last 90 days",
        }
    }
}

impl fmt::Display for HistoricRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoricRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        HistoricRange::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricPoint {
    pub date: NaiveDate,
    pub efficiency: f64,
    pub labor_utilization: f64,
    pub output: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCard {
    pub value: f64,
    /// Last day minus first day.
    pub change: f64,
    pub trend: Trend,
}

impl SummaryCard {
    fn new(value: f64, change: f64) -> Self {
        let change = round_to(change, 1);
        Self {
            value,
            change,
            trend: Trend::from_change(change),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricSummary {
    pub avg_efficiency: SummaryCard,
    pub avg_labor_utilization: SummaryCard,
    pub total_output: SummaryCard,
    pub best_output_day: Option<NaiveDate>,
}

/// Summary cards for a series. `None` for an empty series.
pub fn summarize(points: &[HistoricPoint]) -> Option<HistoricSummary> {
    let first = points.first()?;
    let last = points.last()?;
    let n = points.len() as f64;

    let avg_eff = points.iter().map(|p| p.efficiency).sum::<f64>() / n;
    let avg_labor = points.iter().map(|p| p.labor_utilization).sum::<f64>() / n;
    let total_output: i64 = points.iter().map(|p| p.output).sum();
    let best_output_day = points.iter().max_by_key(|p| p.output).map(|p| p.date);

    Some(HistoricSummary {
        avg_efficiency: SummaryCard::new(
            round_to(avg_eff, 1),
            last.efficiency - first.efficiency,
        ),
        avg_labor_utilization: SummaryCard::new(
            round_to(avg_labor, 1),
            last.labor_utilization - first.labor_utilization,
        ),
        total_output: SummaryCard::new(total_output as f64, (last.output - first.output) as f64),
        best_output_day,
    })
}

/// `HISTORIC_SERIES_LEN` consecutive days ending at `end_date`.
pub fn generate_series<R: RandomSource + ?Sized>(
    rng: &mut R,
    _range: HistoricRange,
    end_date: NaiveDate,
) -> Vec<HistoricPoint> {
    let start = end_date - Duration::days(HISTORIC_SERIES_LEN as i64 - 1);
    (0..HISTORIC_SERIES_LEN)
        .map(|offset| HistoricPoint {
            date: start + Duration::days(offset as i64),
            efficiency: rng.uniform_float(
                HISTORIC_EFFICIENCY_RANGE.0,
                HISTORIC_EFFICIENCY_RANGE.1,
                1,
            ),
            labor_utilization: rng.uniform_float(
                HISTORIC_LABOR_UTILIZATION_RANGE.0,
                HISTORIC_LABOR_UTILIZATION_RANGE.1,
                1,
            ),
            output: rng.uniform_int(HISTORIC_OUTPUT_RANGE.0, HISTORIC_OUTPUT_RANGE.1),
        })
        .collect()
}

/// State of the historic screen. Independent of the dashboard snapshot.
pub struct HistoricAggregator {
    range: HistoricRange,
    end_date: NaiveDate,
    series: Vec<HistoricPoint>,
    rng: Box<dyn RandomSource>,
}

impl HistoricAggregator {
    pub fn new(mut rng: Box<dyn RandomSource>, end_date: NaiveDate) -> Self {
        let range = HistoricRange::default();
        let series = generate_series(rng.as_mut(), range, end_date);
        Self {
            range,
            end_date,
            series,
            rng,
        }
    }

    pub fn range(&self) -> HistoricRange {
        self.range
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn series(&self) -> &[HistoricPoint] {
        &self.series
    }

    pub fn summary(&self) -> Option<HistoricSummary> {
        summarize(&self.series)
    }

    /// Every selection re-draws the series, including re-selecting the active range.
    pub fn select_range(&mut self, range: HistoricRange) -> &[HistoricPoint] {
        self.range = range;
        self.series = generate_series(self.rng.as_mut(), range, self.end_date);
        &self.series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::StdRandom;

    fn end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 21).unwrap()
    }

    fn point(day: u32, efficiency: f64, labor: f64, output: i64) -> HistoricPoint {
        HistoricPoint {
            date: NaiveDate::from_ymd_opt(2025, 2, day).unwrap(),
            efficiency,
            labor_utilization: labor,
            output,
        }
    }

    #[test]
    fn test_range_parsing_and_window() {
        assert_eq!("30d".parse::<HistoricRange>(), Ok(HistoricRange::ThirtyDays));
        assert_eq!("90D".parse::<HistoricRange>(), Ok(HistoricRange::NinetyDays));
        assert!("1y".parse::<HistoricRange>().is_err());
        assert_eq!(HistoricRange::default(), HistoricRange::SevenDays);
        assert_eq!(HistoricRange::NinetyDays.window_days(), 90);
    }

    #[test]
    fn test_series_dates_are_consecutive() {
        let mut rng = StdRandom::seeded(4);
        let series = generate_series(&mut rng, HistoricRange::SevenDays, end());
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2025, 2, 15).unwrap());
        assert_eq!(series[6].date, end());
        for pair in series.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
        }
    }

    #[test]
    fn test_series_values_in_bounds() {
        let mut rng = StdRandom::seeded(21);
        for _ in 0..300 {
            for p in generate_series(&mut rng, HistoricRange::ThirtyDays, end()) {
                assert!(p.efficiency >= 70.0 && p.efficiency <= 90.0);
                assert!(p.labor_utilization >= 65.0 && p.labor_utilization <= 85.0);
                assert!(p.output >= 80 && p.output <= 120);
            }
        }
    }

    #[test]
    fn test_summary_derivation() {
        let points = vec![
            point(15, 80.0, 70.0, 100),
            point(16, 84.0, 72.0, 110),
            point(17, 77.0, 68.0, 90),
        ];
        let s = summarize(&points).unwrap();
        assert_eq!(s.avg_efficiency.value, 80.3);
        assert_eq!(s.avg_efficiency.change, -3.0);
        assert_eq!(s.avg_efficiency.trend, Trend::Down);
        assert_eq!(s.avg_labor_utilization.value, 70.0);
        assert_eq!(s.avg_labor_utilization.trend, Trend::Down);
        assert_eq!(s.total_output.value, 300.0);
        assert_eq!(s.total_output.change, -10.0);
        assert_eq!(s.best_output_day, NaiveDate::from_ymd_opt(2025, 2, 16));
    }

    #[test]
    fn test_summary_of_empty_series() {
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn test_select_range_redraws() {
        let mut agg = HistoricAggregator::new(Box::new(StdRandom::seeded(13)), end());
        let before = agg.series().to_vec();
        agg.select_range(HistoricRange::SevenDays);
        assert_eq!(agg.range(), HistoricRange::SevenDays);
        assert_ne!(before, agg.series().to_vec());
        assert_eq!(agg.series().len(), 7);
    }
}
