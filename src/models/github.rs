use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A self-hosted runner registration as reported by the GitHub Actions API.
///
/// Snapshots are fetched fresh on every listing call and never cached; a
/// record is only as current as the request that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runner {
    pub id: i64,
    pub name: String,
    pub os: Option<String>,
    pub status: RunnerStatus,
    #[serde(default)]
    pub busy: bool,
    pub labels: Vec<RunnerLabel>,
}

impl Runner {
    pub fn is_online(&self) -> bool {
        self.status == RunnerStatus::Online
    }

    /// Explicit scan over the labels sequence comparing the `name` field.
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l.name == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunnerStatus {
    Online,
    Offline,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerLabel {
    pub id: Option<i64>,
    pub name: String,
    #[serde(rename = "type")]
    pub label_type: Option<String>,
}

/// One page of the runner listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerPage {
    pub total_count: i64,
    pub runners: Vec<Runner>,
}

/// Short-lived credential allowing a new instance to register itself as a
/// runner. Created per attempt, consumed once, never stored; `expires_at`
/// is enforced remotely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runner_deserialization() {
        let json = r#"{
            "id": 23,
            "name": "ip-10-0-1-17",
            "os": "linux",
            "status": "online",
            "busy": false,
            "labels": [
                {"id": 1, "name": "self-hosted", "type": "read-only"},
                {"id": 7, "name": "ephemeral-abc123", "type": "custom"}
            ]
        }"#;

        let runner: Runner = serde_json::from_str(json).unwrap();
        assert_eq!(runner.id, 23);
        assert!(runner.is_online());
        assert!(runner.has_label("ephemeral-abc123"));
        assert!(!runner.has_label("ephemeral-def456"));
    }

    #[test]
    fn test_runner_status_wire_format() {
        assert_eq!(
            serde_json::from_str::<RunnerStatus>("\"offline\"").unwrap(),
            RunnerStatus::Offline
        );
        assert_eq!(
            serde_json::to_string(&RunnerStatus::Online).unwrap(),
            "\"online\""
        );
    }

    #[test]
    fn test_runner_busy_defaults_to_false() {
        let json = r#"{"id": 1, "name": "r1", "os": null, "status": "offline", "labels": []}"#;
        let runner: Runner = serde_json::from_str(json).unwrap();
        assert!(!runner.busy);
    }

    #[test]
    fn test_registration_token_deserialization() {
        let json = r#"{"token": "LLBF3JGZDX3P5PMEXLND6TS6FCWO6", "expires_at": "2026-08-06T22:14:10.000Z"}"#;
        let token: RegistrationToken = serde_json::from_str(json).unwrap();
        assert_eq!(token.token, "LLBF3JGZDX3P5PMEXLND6TS6FCWO6");
    }
}
