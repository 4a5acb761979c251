use clap::Parser;
use std::time::Duration;
use url::Url;

/// CAMcogni dashboard: synthetic facility telemetry and report workflow service.
#[derive(Parser, Debug, Clone)]
#[command(name = "camcogni-dashboard")]
pub struct CliArgs {
    /// Dashboard HTTP port
    #[arg(long = "port", default_value_t = DEFAULT_DASHBOARD_PORT)]
    pub port: u16,

    /// Base URL of the remote analysis service (`/run-analysis`, `/reports`)
    #[arg(short = 'u', long = "analysis-url", default_value = DEFAULT_ANALYSIS_URL)]
    pub analysis_url: String,

    /// Seed every random source for a reproducible session
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Wait after the analysis trigger before a report counts as saved
    #[arg(long = "settle-delay-ms", default_value_t = SETTLE_DELAY_MS)]
    pub settle_delay_ms: u64,

    /// Timeout for outbound calls to the analysis service
    #[arg(long = "http-timeout-secs", default_value_t = HTTP_TIMEOUT_SECS)]
    pub http_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub port: u16,
    pub analysis_url: Url,
    pub seed: Option<u64>,
    pub settle_delay: Duration,
    pub http_timeout: Duration,
}

// Port / endpoint constants
pub const DEFAULT_DASHBOARD_PORT: u16 = 8750;
pub const DEFAULT_ANALYSIS_URL: &str = "http://127.0.0.1:8000";
pub const RUN_ANALYSIS_PATH: &str = "run-analysis";
pub const REPORTS_PATH: &str = "reports";

// Report workflow constants
pub const SETTLE_DELAY_MS: u64 = 5000;
pub const HTTP_TIMEOUT_SECS: u64 = 10;

// Log constants
pub const LOG_BUFFER_SIZE: usize = 500;

// Generation shape constants
pub const EQUIPMENT_SAMPLE_SIZE: usize = 3;
pub const HOURS_PER_DAY: usize = 24;
pub const HISTORIC_SERIES_LEN: usize = 7;

/// Fixed pool the equipment roster is sampled from.
pub const EQUIPMENT_POOL: &[&str] = &[
    "Forklift FL-01",
    "Conveyor CV-02",
    "Pallet Jack PJ-03",
    "Scissor Lift SL-04",
    "Packaging Robot PR-05",
    "Label Printer LP-06",
    "Shrink Wrapper SW-07",
    "Order Picker OP-08",
    "Reach Truck RT-09",
    "Sorting Arm SA-10",
];

/// Zone letters equipment can be assigned to. `D` is the overflow bay and has no monitored zone.
pub const EQUIPMENT_ZONE_LETTERS: &[char] = &['A', 'B', 'C', 'D'];

// Alert templates, picked by generation index parity
pub const LOW_ACTIVITY_MESSAGE: &str = "Prolonged idle time detected";
pub const HIGH_DENSITY_MESSAGE: &str = "Worker concentration above threshold";

pub const BOTTLENECK_MESSAGES: &[&str] = &[
    "Resource shortage predicted",
    "Equipment congestion expected",
    "Task backlog building up",
];

pub const WEATHER_OPTIONS: &[&str] = &["Heavy Rain", "Heat Wave", "Snowfall", "High Winds"];

pub const REPORTS_FETCH_ALERT: &str = "Error fetching AI reports. Please try again.";

impl DashboardConfig {
    pub fn from_args(args: CliArgs) -> Result<Self, url::ParseError> {
        let analysis_url = parse_base_url(&args.analysis_url)?;

        Ok(DashboardConfig {
            port: args.port,
            analysis_url,
            seed: args.seed,
            settle_delay: Duration::from_millis(args.settle_delay_ms),
            http_timeout: Duration::from_secs(args.http_timeout_secs),
        })
    }

    /// `{base}/run-analysis`
    pub fn run_analysis_url(&self) -> Url {
        endpoint(&self.analysis_url, RUN_ANALYSIS_PATH)
    }

    /// `{base}/reports`
    pub fn reports_url(&self) -> Url {
        endpoint(&self.analysis_url, REPORTS_PATH)
    }

    /// Seed for the historic screen's own random source.
    pub fn historic_seed(&self) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(1))
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            port: DEFAULT_DASHBOARD_PORT,
            analysis_url: Url::parse(DEFAULT_ANALYSIS_URL).expect("default analysis URL is valid"),
            seed: None,
            settle_delay: Duration::from_millis(SETTLE_DELAY_MS),
            http_timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
        }
    }
}

/// Parse a base URL, forcing a trailing slash so `join` appends instead of replacing the last segment.
pub fn parse_base_url(raw: &str) -> Result<Url, url::ParseError> {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("{}/", trimmed))
    }
}

fn endpoint(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    url.path_segments_mut()
        .map(|mut segments| {
            segments.pop_if_empty().push(path);
        })
        .ok();
    url
}
