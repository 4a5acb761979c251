//! Synthetic facility telemetry.
//!
//! A `MetricSnapshot` is drawn once when a dashboard session starts and is
//! never mutated afterwards; regeneration replaces it wholesale. Every field
//! is a uniform draw from a fixed design range (see the `*_RANGE` constants).

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::config::{
    BOTTLENECK_MESSAGES, EQUIPMENT_POOL, EQUIPMENT_SAMPLE_SIZE, EQUIPMENT_ZONE_LETTERS,
    HIGH_DENSITY_MESSAGE, HOURS_PER_DAY, LOW_ACTIVITY_MESSAGE, WEATHER_OPTIONS,
};
use crate::error::GenerationError;
use crate::random::{choose, sample_without_replacement, RandomSource};

// --- Bounds (inclusive) ---

pub const EFFICIENCY_RANGE: (i64, i64) = (80, 90);
pub const LABOR_UTILIZATION_RANGE: (i64, i64) = (85, 95);
pub const TASK_COMPLETION_RANGE: (i64, i64) = (75, 90);
pub const QUALITY_SCORE_RANGE: (i64, i64) = (90, 98);
pub const KPI_CHANGE_RANGE: (f64, f64) = (-3.0, 3.0);

pub const ACTIVE_TIME_RANGE: (i64, i64) = (400, 480);
pub const BREAK_TIME_RANGE: (i64, i64) = (30, 60);
pub const DOWNTIME_RANGE: (i64, i64) = (20, 50);
pub const TASKS_COMPLETED_RANGE: (i64, i64) = (40, 60);
pub const TASKS_TOTAL_MAX: i64 = 65;
pub const AVG_COMPLETION_TIME_RANGE: (i64, i64) = (30, 60);
pub const QUALITY_COMPLIANCE_RANGE: (i64, i64) = (85, 99);
pub const REWORK_RATE_RANGE: (f64, f64) = (2.0, 6.0);

pub const ZONE_ACTIVITY_RANGE: (f64, f64) = (0.3, 0.9);
pub const ALERT_COUNT_RANGE: (i64, i64) = (1, 2);
pub const EQUIPMENT_UTILIZATION_RANGE: (f64, f64) = (75.0, 95.0);

pub const SERIES_EFFICIENCY_RANGE: (f64, f64) = (75.0, 95.0);
pub const SERIES_WORKERS_RANGE: (i64, i64) = (15, 30);
pub const SERIES_EQUIPMENT_RANGE: (i64, i64) = (8, 16);
pub const SERIES_PREDICTED_RANGE: (f64, f64) = (80.0, 95.0);
pub const SERIES_WORK_COMPLETION_RANGE: (f64, f64) = (85.0, 100.0);
pub const SERIES_LABOR_UTILIZATION_RANGE: (f64, f64) = (70.0, 95.0);

pub const PEAK_EFFICIENCY_RANGE: (i64, i64) = (85, 99);
pub const PEAK_HOUR_RANGE: (i64, i64) = (10, 17);
pub const STAFFING_WORKERS_RANGE: (i64, i64) = (2, 5);
pub const ZONE_RISK_RANGE: (i64, i64) = (30, 45);
pub const RECOMMENDED_SHIFTS_RANGE: (i64, i64) = (1, 3);
pub const EQUIPMENT_RELOCATION_RANGE: (i64, i64) = (1, 5);
pub const EXPECTED_GAIN_RANGE: (i64, i64) = (10, 20);
pub const WEATHER_PROBABILITY_RANGE: (i64, i64) = (40, 90);
pub const WEATHER_IMPACT_RANGE: (i64, i64) = (5, 15);

const ONE_DECIMAL: u32 = 1;
const TWO_DECIMALS: u32 = 2;

// --- Zones ---

/// One of the three monitored floor areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ZoneId {
    #[serde(rename = "Zone A")]
    A,
    #[serde(rename = "Zone B")]
    B,
    #[serde(rename = "Zone C")]
    C,
}

impl ZoneId {
    pub const ALL: [ZoneId; 3] = [ZoneId::A, ZoneId::B, ZoneId::C];

    pub fn number(self) -> u8 {
        match self {
            ZoneId::A => 1,
            ZoneId::B => 2,
            ZoneId::C => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ZoneId::A => "Zone A",
            ZoneId::B => "Zone B",
            ZoneId::C => "Zone C",
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        ZoneId::ALL.into_iter().find(|z| z.number() == n)
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts `"Zone B"`, `"B"`, `"b"` or `"2"`.
impl FromStr for ZoneId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let key = trimmed
            .strip_prefix("Zone ")
            .or_else(|| trimmed.strip_prefix("zone "))
            .unwrap_or(trimmed);
        match key {
            "A" | "a" | "1" => Ok(ZoneId::A),
            "B" | "b" | "2" => Ok(ZoneId::B),
            "C" | "c" | "3" => Ok(ZoneId::C),
            _ => Err(s.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Zone {
    pub id: u8,
    pub name: ZoneId,
    /// Fraction of the zone's capacity in use, `0.0..=1.0`.
    pub activity: f64,
}

impl Zone {
    /// Heat-map hue: green (120) when idle, red (0) at full activity.
    pub fn heat_hue(&self) -> f64 {
        (1.0 - self.activity.clamp(0.0, 1.0)) * 120.0
    }

    pub fn heat_color(&self) -> String {
        format!("hsl({}, 70%, 50%)", self.heat_hue().round())
    }

    pub fn activity_percent(&self) -> f64 {
        (self.activity * 100.0).round()
    }
}

// --- Alerts ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertType {
    #[serde(rename = "Low Activity")]
    LowActivity,
    #[serde(rename = "High Density")]
    HighDensity,
}

impl AlertType {
    /// Even generation indices raise low-activity alerts, odd ones high-density.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            AlertType::LowActivity
        } else {
            AlertType::HighDensity
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            AlertType::LowActivity => LOW_ACTIVITY_MESSAGE,
            AlertType::HighDensity => HIGH_DENSITY_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub id: u32,
    pub zone: ZoneId,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub message: String,
}

// --- KPIs ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// A zero change counts as up.
    pub fn from_change(change: f64) -> Self {
        if change >= 0.0 {
            Trend::Up
        } else {
            Trend::Down
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Kpi {
    pub value: i64,
    pub change: f64,
    pub trend: Trend,
}

impl Kpi {
    pub fn new(value: i64, change: f64) -> Self {
        Self {
            value,
            change,
            trend: Trend::from_change(change),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSet {
    pub overall_efficiency: Kpi,
    pub labor_utilization: Kpi,
    pub task_completion: Kpi,
    pub quality_score: Kpi,
}

// --- Analytics detail panels ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeDistribution {
    /// Minutes.
    pub active_time: i64,
    pub break_time: i64,
    pub downtime: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMetrics {
    pub tasks_completed: i64,
    pub tasks_total: i64,
    /// Minutes.
    pub avg_completion_time: i64,
    pub quality_compliance: i64,
    pub rework_rate: f64,
}

// --- Equipment ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentUnit {
    pub name: String,
    pub utilization: f64,
    pub zone: char,
}

// --- Hourly series ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    /// Zero-padded hour of day, `"00"`..`"23"`.
    pub hour: String,
    /// Chart axis label, `"HH:00"`.
    pub time: String,
    pub efficiency: f64,
    pub workers: i64,
    pub equipment: i64,
    pub predicted: f64,
    pub work_completion: f64,
    pub labor_utilization: f64,
}

// --- Predictions ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneRisk {
    pub zone: ZoneId,
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionSet {
    pub peak_efficiency: i64,
    pub peak_hour: i64,
    pub bottleneck_zone: ZoneId,
    pub bottleneck_message: String,
    pub staffing_workers: i64,
    pub staffing_zone: ZoneId,
    pub staffing_recommendation: String,
    pub risk_by_zone: Vec<ZoneRisk>,
    pub recommended_shifts: i64,
    pub equipment_relocation: i64,
    pub expected_gain: i64,
    pub weather: String,
    pub weather_probability: i64,
    /// Always negative: percentage points of efficiency lost.
    pub weather_impact: i64,
}

fn staffing_recommendation(workers: i64, zone: ZoneId) -> String {
    format!("+{} workers recommended for {}", workers, zone)
}

// --- Snapshot ---

/// Header strip above the tabs, derived from the rest of the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderMetrics {
    pub active_workers: i64,
    pub equipment_utilization: i64,
    pub alert_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSnapshot {
    pub kpis: KpiSet,
    pub time_distribution: TimeDistribution,
    pub tasks: TaskMetrics,
    pub zones: Vec<Zone>,
    pub alerts: Vec<Alert>,
    pub equipment: Vec<EquipmentUnit>,
    pub time_series: Vec<TimeSeriesPoint>,
    pub predictions: PredictionSet,
}

impl MetricSnapshot {
    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|z| z.name == id)
    }

    pub fn alerts_for(&self, id: ZoneId) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(move |a| a.zone == id)
    }

    pub fn header_metrics(&self) -> HeaderMetrics {
        // Workers on shift during the most efficient hour.
        let active_workers = self
            .time_series
            .iter()
            .max_by(|a, b| a.efficiency.total_cmp(&b.efficiency))
            .map(|p| p.workers)
            .unwrap_or(0);

        let equipment_utilization = if self.equipment.is_empty() {
            0
        } else {
            let sum: f64 = self.equipment.iter().map(|e| e.utilization).sum();
            (sum / self.equipment.len() as f64).round() as i64
        };

        HeaderMetrics {
            active_workers,
            equipment_utilization,
            alert_count: self.alerts.len(),
        }
    }
}

// --- Generation ---

fn int_in<R: RandomSource + ?Sized>(rng: &mut R, range: (i64, i64)) -> i64 {
    rng.uniform_int(range.0, range.1)
}

fn float_in<R: RandomSource + ?Sized>(rng: &mut R, range: (f64, f64), decimals: u32) -> f64 {
    rng.uniform_float(range.0, range.1, decimals)
}

fn kpi<R: RandomSource + ?Sized>(rng: &mut R, range: (i64, i64)) -> Kpi {
    let value = int_in(rng, range);
    let change = float_in(rng, KPI_CHANGE_RANGE, ONE_DECIMAL);
    Kpi::new(value, change)
}

pub fn generate_kpis<R: RandomSource + ?Sized>(rng: &mut R) -> KpiSet {
    KpiSet {
        overall_efficiency: kpi(rng, EFFICIENCY_RANGE),
        labor_utilization: kpi(rng, LABOR_UTILIZATION_RANGE),
        task_completion: kpi(rng, TASK_COMPLETION_RANGE),
        quality_score: kpi(rng, QUALITY_SCORE_RANGE),
    }
}

pub fn generate_time_distribution<R: RandomSource + ?Sized>(rng: &mut R) -> TimeDistribution {
    TimeDistribution {
        active_time: int_in(rng, ACTIVE_TIME_RANGE),
        break_time: int_in(rng, BREAK_TIME_RANGE),
        downtime: int_in(rng, DOWNTIME_RANGE),
    }
}

pub fn generate_task_metrics<R: RandomSource + ?Sized>(rng: &mut R) -> TaskMetrics {
    let tasks_completed = int_in(rng, TASKS_COMPLETED_RANGE);
    // Lower bound is the completed count, so total >= completed holds without retries.
    let tasks_total = rng.uniform_int(tasks_completed, TASKS_TOTAL_MAX);

    TaskMetrics {
        tasks_completed,
        tasks_total,
        avg_completion_time: int_in(rng, AVG_COMPLETION_TIME_RANGE),
        quality_compliance: int_in(rng, QUALITY_COMPLIANCE_RANGE),
        rework_rate: float_in(rng, REWORK_RATE_RANGE, ONE_DECIMAL),
    }
}

pub fn generate_zones<R: RandomSource + ?Sized>(rng: &mut R) -> Vec<Zone> {
    ZoneId::ALL
        .into_iter()
        .map(|id| Zone {
            id: id.number(),
            name: id,
            activity: float_in(rng, ZONE_ACTIVITY_RANGE, TWO_DECIMALS),
        })
        .collect()
}

pub fn generate_alerts<R: RandomSource + ?Sized>(rng: &mut R) -> Vec<Alert> {
    let count = int_in(rng, ALERT_COUNT_RANGE) as usize;
    (0..count)
        .map(|index| {
            let alert_type = AlertType::for_index(index);
            Alert {
                id: index as u32 + 1,
                zone: *choose(rng, &ZoneId::ALL),
                alert_type,
                message: alert_type.message().to_string(),
            }
        })
        .collect()
}

/// Roster of `EQUIPMENT_SAMPLE_SIZE` units from `EQUIPMENT_POOL`.
pub fn generate_equipment<R: RandomSource + ?Sized>(
    rng: &mut R,
) -> Result<Vec<EquipmentUnit>, GenerationError> {
    generate_equipment_from(rng, EQUIPMENT_POOL, EQUIPMENT_SAMPLE_SIZE)
}

/// Roster of `size` distinct names from `pool`. Fails when the pool is too small.
pub fn generate_equipment_from<R: RandomSource + ?Sized>(
    rng: &mut R,
    pool: &[&str],
    size: usize,
) -> Result<Vec<EquipmentUnit>, GenerationError> {
    let names = sample_without_replacement(rng, pool, size)?;
    Ok(names
        .into_iter()
        .map(|name| EquipmentUnit {
            name: name.to_string(),
            utilization: float_in(rng, EQUIPMENT_UTILIZATION_RANGE, ONE_DECIMAL),
            zone: *choose(rng, EQUIPMENT_ZONE_LETTERS),
        })
        .collect())
}

pub fn generate_time_series<R: RandomSource + ?Sized>(rng: &mut R) -> Vec<TimeSeriesPoint> {
    (0..HOURS_PER_DAY)
        .map(|hour| TimeSeriesPoint {
            hour: format!("{:02}", hour),
            time: format!("{:02}:00", hour),
            efficiency: float_in(rng, SERIES_EFFICIENCY_RANGE, ONE_DECIMAL),
            workers: int_in(rng, SERIES_WORKERS_RANGE),
            equipment: int_in(rng, SERIES_EQUIPMENT_RANGE),
            predicted: float_in(rng, SERIES_PREDICTED_RANGE, ONE_DECIMAL),
            work_completion: float_in(rng, SERIES_WORK_COMPLETION_RANGE, ONE_DECIMAL),
            labor_utilization: float_in(rng, SERIES_LABOR_UTILIZATION_RANGE, ONE_DECIMAL),
        })
        .collect()
}

pub fn generate_predictions<R: RandomSource + ?Sized>(rng: &mut R) -> PredictionSet {
    let peak_efficiency = int_in(rng, PEAK_EFFICIENCY_RANGE);
    let peak_hour = int_in(rng, PEAK_HOUR_RANGE);
    let bottleneck_zone = *choose(rng, &ZoneId::ALL);
    let bottleneck_message = choose(rng, BOTTLENECK_MESSAGES).to_string();
    let staffing_workers = int_in(rng, STAFFING_WORKERS_RANGE);
    let staffing_zone = *choose(rng, &ZoneId::ALL);
    let risk_by_zone = ZoneId::ALL
        .into_iter()
        .map(|zone| ZoneRisk {
            zone,
            score: int_in(rng, ZONE_RISK_RANGE),
        })
        .collect();

    PredictionSet {
        peak_efficiency,
        peak_hour,
        bottleneck_zone,
        bottleneck_message,
        staffing_workers,
        staffing_zone,
        staffing_recommendation: staffing_recommendation(staffing_workers, staffing_zone),
        risk_by_zone,
        recommended_shifts: int_in(rng, RECOMMENDED_SHIFTS_RANGE),
        equipment_relocation: int_in(rng, EQUIPMENT_RELOCATION_RANGE),
        expected_gain: int_in(rng, EXPECTED_GAIN_RANGE),
        weather: choose(rng, WEATHER_OPTIONS).to_string(),
        weather_probability: int_in(rng, WEATHER_PROBABILITY_RANGE),
        weather_impact: -int_in(rng, WEATHER_IMPACT_RANGE),
    }
}

/// Draw a complete snapshot. Synchronous; no suspension points.
pub fn generate_snapshot<R: RandomSource + ?Sized>(
    rng: &mut R,
) -> Result<MetricSnapshot, GenerationError> {
    generate_snapshot_from_pool(rng, EQUIPMENT_POOL, EQUIPMENT_SAMPLE_SIZE)
}

/// As `generate_snapshot`, with the equipment roster drawn from `pool`.
pub fn generate_snapshot_from_pool<R: RandomSource + ?Sized>(
    rng: &mut R,
    pool: &[&str],
    roster_size: usize,
) -> Result<MetricSnapshot, GenerationError> {
    let kpis = generate_kpis(rng);
    let time_distribution = generate_time_distribution(rng);
    let tasks = generate_task_metrics(rng);
    let zones = generate_zones(rng);
    let alerts = generate_alerts(rng);
    let equipment = generate_equipment_from(rng, pool, roster_size)?;
    let time_series = generate_time_series(rng);
    let predictions = generate_predictions(rng);

    Ok(MetricSnapshot {
        kpis,
        time_distribution,
        tasks,
        zones,
        alerts,
        equipment,
        time_series,
        predictions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::StdRandom;

    fn in_range(v: i64, range: (i64, i64)) -> bool {
        v >= range.0 && v <= range.1
    }

    fn in_frange(v: f64, range: (f64, f64)) -> bool {
        v >= range.0 && v <= range.1
    }

    // --- Zone parsing ---

    #[test]
    fn test_zone_id_parses_all_spellings() {
        assert_eq!("Zone B".parse::<ZoneId>(), Ok(ZoneId::B));
        assert_eq!("b".parse::<ZoneId>(), Ok(ZoneId::B));
        assert_eq!("2".parse::<ZoneId>(), Ok(ZoneId::B));
        assert_eq!(" zone c ".parse::<ZoneId>(), Ok(ZoneId::C));
        assert!("Zone D".parse::<ZoneId>().is_err());
        assert!("".parse::<ZoneId>().is_err());
    }

    #[test]
    fn test_zone_id_numbering() {
        for id in ZoneId::ALL {
            assert_eq!(ZoneId::from_number(id.number()), Some(id));
        }
        assert_eq!(ZoneId::from_number(4), None);
    }

    #[test]
    fn test_heat_color_extremes() {
        let idle = Zone {
            id: 1,
            name: ZoneId::A,
            activity: 0.0,
        };
        let busy = Zone {
            id: 1,
            name: ZoneId::A,
            activity: 1.0,
        };
        assert_eq!(idle.heat_color(), "hsl(120, 70%, 50%)");
        assert_eq!(busy.heat_color(), "hsl(0, 70%, 50%)");
    }

    // --- KPIs ---

    #[test]
    fn test_trend_zero_change_is_up() {
        assert_eq!(Trend::from_change(0.0), Trend::Up);
        assert_eq!(Trend::from_change(-0.1), Trend::Down);
        assert_eq!(Trend::from_change(2.4), Trend::Up);
    }

    #[test]
    fn test_rounded_near_zero_change_serializes_unsigned() {
        let kpi = Kpi::new(85, crate::random::round_to(-0.01, 1));
        let json = serde_json::to_string(&kpi).expect("should serialize");
        assert_eq!(json, r#"{"value":85,"change":0.0,"trend":"up"}"#);
    }

    #[test]
    fn test_kpis_within_bounds() {
        let mut rng = StdRandom::seeded(100);
        for _ in 0..1000 {
            let kpis = generate_kpis(&mut rng);
            assert!(in_range(kpis.overall_efficiency.value, EFFICIENCY_RANGE));
            assert!(in_range(kpis.labor_utilization.value, LABOR_UTILIZATION_RANGE));
            assert!(in_range(kpis.task_completion.value, TASK_COMPLETION_RANGE));
            assert!(in_range(kpis.quality_score.value, QUALITY_SCORE_RANGE));
            for k in [
                kpis.overall_efficiency,
                kpis.labor_utilization,
                kpis.task_completion,
                kpis.quality_score,
            ] {
                assert!(in_frange(k.change, KPI_CHANGE_RANGE));
                assert_eq!(k.trend == Trend::Up, k.change >= 0.0);
            }
        }
    }

    // --- Tasks ---

    #[test]
    fn test_tasks_total_never_below_completed() {
        let mut rng = StdRandom::seeded(2024);
        for _ in 0..10_000 {
            let tasks = generate_task_metrics(&mut rng);
            assert!(tasks.tasks_total >= tasks.tasks_completed);
            assert!(tasks.tasks_total <= TASKS_TOTAL_MAX);
            assert!(in_range(tasks.tasks_completed, TASKS_COMPLETED_RANGE));
            assert!(in_frange(tasks.rework_rate, REWORK_RATE_RANGE));
        }
    }

    // --- Alerts ---

    #[test]
    fn test_alert_types_alternate() {
        let mut rng = StdRandom::seeded(8);
        let mut saw_two = false;
        for _ in 0..200 {
            let alerts = generate_alerts(&mut rng);
            assert!(matches!(alerts.len(), 1 | 2));
            assert_eq!(alerts[0].alert_type, AlertType::LowActivity);
            assert_eq!(alerts[0].message, LOW_ACTIVITY_MESSAGE);
            if let Some(second) = alerts.get(1) {
                saw_two = true;
                assert_eq!(second.alert_type, AlertType::HighDensity);
                assert_eq!(second.message, HIGH_DENSITY_MESSAGE);
                assert_eq!(second.id, 2);
            }
        }
        assert!(saw_two);
    }

    // --- Equipment ---

    #[test]
    fn test_equipment_zone_letters() {
        let mut rng = StdRandom::seeded(77);
        for _ in 0..200 {
            for unit in generate_equipment(&mut rng).unwrap() {
                assert!(EQUIPMENT_ZONE_LETTERS.contains(&unit.zone));
                assert!(in_frange(unit.utilization, EQUIPMENT_UTILIZATION_RANGE));
            }
        }
    }

    // --- Predictions ---

    #[test]
    fn test_predictions_bounds() {
        let mut rng = StdRandom::seeded(55);
        for _ in 0..500 {
            let p = generate_predictions(&mut rng);
            assert!(in_range(p.peak_efficiency, PEAK_EFFICIENCY_RANGE));
            assert!(in_range(p.peak_hour, PEAK_HOUR_RANGE));
            assert!(BOTTLENECK_MESSAGES.contains(&p.bottleneck_message.as_str()));
            assert!(WEATHER_OPTIONS.contains(&p.weather.as_str()));
            assert!(p.weather_impact <= -WEATHER_IMPACT_RANGE.0);
            assert!(p.weather_impact >= -WEATHER_IMPACT_RANGE.1);
            assert_eq!(p.risk_by_zone.len(), 3);
            let zones: Vec<ZoneId> = p.risk_by_zone.iter().map(|r| r.zone).collect();
            assert_eq!(zones, ZoneId::ALL.to_vec());
            assert!(p.risk_by_zone.iter().all(|r| in_range(r.score, ZONE_RISK_RANGE)));
        }
    }

    #[test]
    fn test_staffing_recommendation_text() {
        let mut rng = StdRandom::seeded(3);
        let p = generate_predictions(&mut rng);
        let text = &p.staffing_recommendation;
        assert!(text.starts_with(&format!("+{} workers", p.staffing_workers)));
        assert!(text.ends_with(p.staffing_zone.name()));
    }

    #[test]
    fn test_equipment_from_small_pool_fails() {
        let mut rng = StdRandom::seeded(4);
        let err = generate_equipment_from(&mut rng, &["Forklift FL-01", "Pallet Jack PJ-02"], 3)
            .unwrap_err();
        assert!(matches!(
            err,
            GenerationError::EquipmentPool(crate::error::SampleError::InvalidSampleSize {
                requested: 3,
                available: 2
            })
        ));
    }

    // --- Snapshot ---

    #[test]
    fn test_header_metrics_follow_snapshot() {
        let mut rng = StdRandom::seeded(12);
        let snapshot = generate_snapshot(&mut rng).unwrap();
        let header = snapshot.header_metrics();
        assert_eq!(header.alert_count, snapshot.alerts.len());
        assert!(in_range(header.active_workers, SERIES_WORKERS_RANGE));
        assert!(header.equipment_utilization >= 75 && header.equipment_utilization <= 95);
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let mut rng = StdRandom::seeded(1);
        let snapshot = generate_snapshot(&mut rng).unwrap();
        let json = serde_json::to_value(&snapshot).expect("should serialize");
        assert!(json["kpis"]["overallEfficiency"]["value"].is_i64());
        assert!(json["timeSeries"].as_array().is_some());
        assert_eq!(json["zones"][0]["name"], "Zone A");
        assert_eq!(json["timeSeries"][9]["time"], "09:00");
        assert!(json["predictions"]["staffingRecommendation"]
            .as_str()
            .unwrap()
            .contains("workers recommended for Zone"));
        let trend = json["kpis"]["qualityScore"]["trend"].as_str().unwrap();
        assert!(trend == "up" || trend == "down");
    }
}
