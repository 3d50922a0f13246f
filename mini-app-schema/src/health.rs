use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    /// The database answered the probe but reported a problem.
    Degraded,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseStatus {
    Connected,
    Unavailable,
}

/// Payload of `GET /healthcheck`, produced fresh for every request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
    pub database: DatabaseStatus,
    pub checked_at: DateTime<Utc>,
}

impl HealthReport {
    pub fn ok(detail: impl Into<String>) -> Self {
        Self::connected(HealthStatus::Ok, detail)
    }

    pub fn degraded(detail: impl Into<String>) -> Self {
        Self::connected(HealthStatus::Degraded, detail)
    }

    pub fn error(detail: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Error,
            detail: detail.into(),
            app_name: None,
            version: None,
            instance_type: None,
            database: DatabaseStatus::Unavailable,
            checked_at: Utc::now(),
        }
    }

    fn connected(status: HealthStatus, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
            app_name: None,
            version: None,
            instance_type: None,
            database: DatabaseStatus::Connected,
            checked_at: Utc::now(),
        }
    }

    /// Attaches application metadata to the report.
    #[must_use]
    pub fn with_app(mut self, app_name: &str, version: &str, instance_type: &str) -> Self {
        self.app_name = Some(app_name.to_string());
        self.version = Some(version.to_string());
        self.instance_type = Some(instance_type.to_string());
        self
    }

    pub fn is_healthy(&self) -> bool {
        self.status != HealthStatus::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn error_report_omits_app_metadata() {
        let report = HealthReport::error("Health check failed: boom");
        let json = serde_json::to_value(&report).expect("serialize health report");

        assert_eq!(json["status"], "error");
        assert_eq!(json["database"], "unavailable");
        assert_eq!(json["detail"], "Health check failed: boom");
        assert!(json.get("app_name").is_none());
        assert!(json.get("instance_type").is_none());
        assert!(json["checked_at"].is_string());
    }

    #[test]
    fn ok_report_carries_app_metadata() {
        let report = HealthReport::ok("database connection is healthy").with_app(
            "Mini App",
            "0.1.0",
            "R/W",
        );
        let json = serde_json::to_value(&report).expect("serialize health report");

        assert_eq!(json["status"], "ok");
        assert_eq!(json["database"], "connected");
        assert_eq!(json["app_name"], "Mini App");
        assert_eq!(json["version"], "0.1.0");
        assert_eq!(json["instance_type"], Value::String("R/W".to_string()));
        assert!(report.is_healthy());
    }

    #[test]
    fn degraded_is_still_healthy() {
        let report = HealthReport::degraded("quick_check: page 3 is never used");
        assert_eq!(report.status, HealthStatus::Degraded);
        assert!(report.is_healthy());
        assert!(!HealthReport::error("x").is_healthy());
    }
}
