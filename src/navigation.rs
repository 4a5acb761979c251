use serde::Serialize;

/// Views the core can hand control to. Routing itself lives outside the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationTarget {
    Landing,
    Blueprint,
    HistoricSummary,
}

impl NavigationTarget {
    pub fn path(self) -> &'static str {
        match self {
            NavigationTarget::Landing => "/",
            NavigationTarget::Blueprint => "/blueprint",
            NavigationTarget::HistoricSummary => "/historic-summary",
        }
    }
}
