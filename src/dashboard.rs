use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::config::{EQUIPMENT_POOL, EQUIPMENT_SAMPLE_SIZE};
use crate::error::GenerationError;
use crate::random::RandomSource;
use crate::telemetry::{self, Alert, HeaderMetrics, MetricSnapshot, Zone, ZoneId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Blueprint,
    Analytics,
    Equipment,
    Predictions,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Blueprint, Tab::Analytics, Tab::Equipment, Tab::Predictions];

    pub fn as_str(self) -> &'static str {
        match self {
            Tab::Blueprint => "blueprint",
            Tab::Analytics => "analytics",
            Tab::Equipment => "equipment",
            Tab::Predictions => "predictions",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Tab::ALL
            .into_iter()
            .find(|t| t.as_str() == lowered)
            .ok_or_else(|| s.to_string())
    }
}

/// The two independent navigation axes of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardView {
    pub active_tab: Tab,
    pub selected_zone: Option<ZoneId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    SelectTab(Tab),
    SelectZone(ZoneId),
}

impl DashboardView {
    /// Pure transition. Switching tabs keeps the zone selection; re-selecting
    /// the current zone leaves it selected.
    pub fn apply(self, action: DashboardAction) -> Self {
        match action {
            DashboardAction::SelectTab(tab) => Self {
                active_tab: tab,
                ..self
            },
            DashboardAction::SelectZone(zone) => Self {
                selected_zone: Some(zone),
                ..self
            },
        }
    }
}

/// Detail panel for the selected zone.
#[derive(Debug, Clone, Serialize)]
pub struct ZoneDetail {
    pub zone: Zone,
    pub activity_percent: f64,
    pub heat_color: String,
    pub alerts: Vec<Alert>,
}

/// One dashboard session: its snapshot, its view state and the random source it draws from.
pub struct DashboardSession {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    view: DashboardView,
    snapshot: MetricSnapshot,
    rng: Box<dyn RandomSource>,
}

impl DashboardSession {
    /// Generate the session's snapshot. Fails only if equipment sampling is impossible.
    pub fn start(rng: Box<dyn RandomSource>) -> Result<Self, GenerationError> {
        Self::start_with_pool(rng, EQUIPMENT_POOL, EQUIPMENT_SAMPLE_SIZE)
    }

    /// As `start`, sampling the equipment roster from `pool`. No session exists
    /// unless the first snapshot could be drawn.
    pub fn start_with_pool(
        mut rng: Box<dyn RandomSource>,
        pool: &[&str],
        roster_size: usize,
    ) -> Result<Self, GenerationError> {
        let snapshot = telemetry::generate_snapshot_from_pool(rng.as_mut(), pool, roster_size)?;
        Ok(Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            view: DashboardView::default(),
            snapshot,
            rng,
        })
    }

    pub fn view(&self) -> DashboardView {
        self.view
    }

    pub fn snapshot(&self) -> &MetricSnapshot {
        &self.snapshot
    }

    pub fn header_metrics(&self) -> HeaderMetrics {
        self.snapshot.header_metrics()
    }

    pub fn dispatch(&mut self, action: DashboardAction) -> DashboardView {
        self.view = self.view.apply(action);
        self.view
    }

    pub fn select_tab(&mut self, tab: Tab) -> DashboardView {
        self.dispatch(DashboardAction::SelectTab(tab))
    }

    pub fn select_zone(&mut self, zone: ZoneId) -> DashboardView {
        self.dispatch(DashboardAction::SelectZone(zone))
    }

    pub fn selected_zone_detail(&self) -> Option<ZoneDetail> {
        let id = self.view.selected_zone?;
        let zone = self.snapshot.zone(id)?.clone();
        Some(ZoneDetail {
            activity_percent: zone.activity_percent(),
            heat_color: zone.heat_color(),
            alerts: self.snapshot.alerts_for(id).cloned().collect(),
            zone,
        })
    }

    /// Replace the snapshot with a fresh draw. View axes are preserved.
    /// On failure the previous snapshot stays in place.
    pub fn regenerate(&mut self) -> Result<&MetricSnapshot, GenerationError> {
        let snapshot = telemetry::generate_snapshot(self.rng.as_mut())?;
        self.snapshot = snapshot;
        self.generated_at = Utc::now();
        Ok(&self.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::StdRandom;

    fn session() -> DashboardSession {
        DashboardSession::start(Box::new(StdRandom::seeded(9))).unwrap()
    }

    #[test]
    fn test_initial_view() {
        let view = DashboardView::default();
        assert_eq!(view.active_tab, Tab::Blueprint);
        assert!(view.selected_zone.is_none());
    }

    #[test]
    fn test_tab_parsing() {
        assert_eq!("analytics".parse::<Tab>(), Ok(Tab::Analytics));
        assert_eq!("Predictions".parse::<Tab>(), Ok(Tab::Predictions));
        assert!("settings".parse::<Tab>().is_err());
    }

    #[test]
    fn test_tab_switch_keeps_zone() {
        let view = DashboardView::default()
            .apply(DashboardAction::SelectZone(ZoneId::C))
            .apply(DashboardAction::SelectTab(Tab::Equipment));
        assert_eq!(view.active_tab, Tab::Equipment);
        assert_eq!(view.selected_zone, Some(ZoneId::C));
    }

    #[test]
    fn test_zone_change_keeps_tab() {
        let view = DashboardView::default()
            .apply(DashboardAction::SelectTab(Tab::Analytics))
            .apply(DashboardAction::SelectZone(ZoneId::A))
            .apply(DashboardAction::SelectZone(ZoneId::B));
        assert_eq!(view.active_tab, Tab::Analytics);
        assert_eq!(view.selected_zone, Some(ZoneId::B));
    }

    #[test]
    fn test_zone_detail_matches_snapshot() {
        let mut s = session();
        assert!(s.selected_zone_detail().is_none());
        s.select_zone(ZoneId::B);
        let detail = s.selected_zone_detail().unwrap();
        assert_eq!(detail.zone.name, ZoneId::B);
        assert_eq!(detail.zone.id, 2);
        assert!(detail.alerts.iter().all(|a| a.zone == ZoneId::B));
    }

    #[test]
    fn test_regenerate_preserves_view() {
        let mut s = session();
        s.select_tab(Tab::Predictions);
        s.select_zone(ZoneId::A);
        let before = s.snapshot().clone();
        s.regenerate().unwrap();
        assert_eq!(s.view().active_tab, Tab::Predictions);
        assert_eq!(s.view().selected_zone, Some(ZoneId::A));
        assert_ne!(&before, s.snapshot());
    }
}
