use tracing::error;

use crate::activity_log::{ActivityLog, LogLevel, LogSource};
use crate::analysis_client::AnalysisTransport;
use crate::error::ReportsFetchError;

const DOCUMENT_TITLE: &str = "AI Generated Reports";

/// Standalone HTML document with the reports JSON pretty-printed inside a `<pre>`.
pub fn render_reports_document(reports: &serde_json::Value) -> String {
    let pretty = serde_json::to_string_pretty(reports).unwrap_or_else(|_| reports.to_string());
    let body = html_escape::encode_text(&pretty);

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>
      body {{ font-family: Arial, sans-serif; padding: 20px; background-color: #f5f5f5; }}
      pre {{ background-color: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); overflow-x: auto; }}
    </style>
  </head>
  <body>
    <h1>{title}</h1>
    <pre>{body}</pre>
  </body>
</html>
"#,
        title = DOCUMENT_TITLE,
        body = body,
    )
}

/// Fetch and render. Failures are logged here; the caller shows `user_message()`.
pub async fn fetch_reports_document(
    transport: &dyn AnalysisTransport,
    logs: &ActivityLog,
) -> Result<String, ReportsFetchError> {
    match transport.fetch_reports().await {
        Ok(reports) => Ok(render_reports_document(&reports)),
        Err(e) => {
            error!("Error fetching reports: {}", e);
            logs.emit(
                LogSource::Historic,
                LogLevel::Error,
                format!("Error fetching reports: {}", e),
            )
            .await;
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_contains_pretty_json() {
        let html = render_reports_document(&json!({"zone": "Zone B", "score": 42}));
        assert!(html.contains("<title>AI Generated Reports</title>"));
        assert!(html.contains("&quot;zone&quot;") || html.contains("\"zone\""));
        assert!(html.contains("42"));
        assert!(html.contains("\n  "));
    }

    #[test]
    fn test_document_escapes_markup() {
        let html = render_reports_document(&json!({"note": "<script>alert(1)</script>"}));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
