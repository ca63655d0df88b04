use crate::api::{ErrorBody, HttpReply, PoemRequest, PoemResponse};
use chrono::{DateTime, TimeDelta, Utc};
use serde_json::Value;

pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, PartialEq)]
pub enum HealthOutcome {
    Healthy(Value),
    /// 200 whose body is not JSON.
    Malformed { body: String },
    Unhealthy { status: u16, body: String },
    Unreachable(String),
}

impl HealthOutcome {
    pub fn from_reply(reply: HttpReply) -> Self {
        if !reply.is_ok() {
            return Self::Unhealthy {
                status: reply.status,
                body: reply.body,
            };
        }

        match serde_json::from_str(&reply.body) {
            Ok(value) => Self::Healthy(value),
            Err(_) => Self::Malformed { body: reply.body },
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Healthy(_) | Self::Malformed { .. } => Some(200),
            Self::Unhealthy { status, .. } => Some(*status),
            Self::Unreachable(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FixtureOutcome {
    Success(PoemResponse),
    Transport(String),
    Http { status: u16, body: ErrorBody },
    /// 200 reply whose payload reports `success: false`.
    LogicalFailure(String),
    Unexpected(String),
}

impl FixtureOutcome {
    pub fn from_reply(reply: &HttpReply) -> Self {
        if !reply.is_ok() {
            return Self::Http {
                status: reply.status,
                body: ErrorBody::parse(&reply.body),
            };
        }

        let value: Value = match serde_json::from_str(&reply.body) {
            Ok(value) => value,
            Err(e) => return Self::Unexpected(format!("invalid JSON in response: {}", e)),
        };

        let Some(object) = value.as_object() else {
            return Self::Unexpected("response is not a JSON object".to_string());
        };

        // only a JSON `true` counts; any other `success` value is a failure
        let success = object
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        if !success {
            let message = match object.get("error") {
                Some(Value::String(s)) => s.clone(),
                None | Some(Value::Null) => UNKNOWN_ERROR.to_string(),
                Some(other) => other.to_string(),
            };
            return Self::LogicalFailure(message);
        }

        match serde_json::from_value::<PoemResponse>(value) {
            Ok(response) => Self::Success(response),
            Err(e) => Self::Unexpected(format!("malformed success response: {}", e)),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Transport(_) => "transport",
            Self::Http { .. } => "http",
            Self::LogicalFailure(_) => "logical_failure",
            Self::Unexpected(_) => "unexpected",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FixtureResult {
    /// 1-based position in the fixture list.
    pub index: usize,
    pub request: PoemRequest,
    /// Status of the HTTP reply, absent when none was received.
    pub status: Option<u16>,
    pub outcome: FixtureOutcome,
}

#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub health: HealthOutcome,
    pub results: Vec<FixtureResult>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ProbeReport {
    pub fn is_healthy(&self) -> bool {
        self.health.is_healthy()
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.is_healthy() && self.failed() == 0
    }

    pub fn duration(&self) -> TimeDelta {
        self.finished_at - self.started_at
    }

    pub fn failures(&self) -> impl Iterator<Item = &FixtureResult> {
        self.results.iter().filter(|r| !r.outcome.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn ok(body: Value) -> HttpReply {
        HttpReply::new(200, body.to_string())
    }

    #[test]
    fn test_success_reply() {
        let reply = ok(json!({
            "success": true,
            "theme": "ocean waves",
            "style": "haiku",
            "mood": "peaceful",
            "poem": "Waves fold into foam",
            "metadata": {"model": "test"}
        }));

        match FixtureOutcome::from_reply(&reply) {
            FixtureOutcome::Success(response) => {
                assert_eq!(response.theme, "ocean waves");
                assert_eq!(response.poem, "Waves fold into foam");
                assert_eq!(response.metadata.unwrap()["model"], json!("test"));
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[rstest]
    #[case(json!({"success": false, "error": "rate limited"}), "rate limited")]
    #[case(json!({"success": false}), UNKNOWN_ERROR)]
    #[case(json!({"error": "no success field"}), "no success field")]
    #[case(json!({"success": false, "error": null}), UNKNOWN_ERROR)]
    #[case(json!({"success": false, "error": {"code": 7}}), r#"{"code":7}"#)]
    #[case(json!({"success": 1, "error": "numeric flag"}), "numeric flag")]
    #[case(json!({"success": "true"}), UNKNOWN_ERROR)]
    fn test_logical_failure(#[case] body: Value, #[case] expected: &str) {
        assert_eq!(
            FixtureOutcome::from_reply(&ok(body)),
            FixtureOutcome::LogicalFailure(expected.to_string())
        );
    }

    #[test]
    fn test_http_error_keeps_structured_body() {
        let reply = HttpReply::new(500, r#"{"detail": "Internal Server Error"}"#);
        assert_eq!(
            FixtureOutcome::from_reply(&reply),
            FixtureOutcome::Http {
                status: 500,
                body: ErrorBody::Structured(json!({"detail": "Internal Server Error"})),
            }
        );
    }

    #[test]
    fn test_http_error_raw_body() {
        let reply = HttpReply::new(502, "Bad Gateway");
        assert_eq!(
            FixtureOutcome::from_reply(&reply),
            FixtureOutcome::Http {
                status: 502,
                body: ErrorBody::Raw("Bad Gateway".to_string()),
            }
        );
    }

    #[rstest]
    #[case("[1,2]")]
    #[case("\"str\"")]
    #[case("42")]
    #[case("null")]
    fn test_non_object_body_is_unexpected(#[case] body: &str) {
        assert_eq!(
            FixtureOutcome::from_reply(&HttpReply::new(200, body)),
            FixtureOutcome::Unexpected("response is not a JSON object".to_string())
        );
    }

    #[test]
    fn test_unexpected_bodies() {
        let outcome = FixtureOutcome::from_reply(&HttpReply::new(200, "not json"));
        assert_eq!(outcome.kind(), "unexpected");

        let outcome = FixtureOutcome::from_reply(&ok(json!({"success": true, "theme": "x"})));
        match outcome {
            FixtureOutcome::Unexpected(msg) => assert!(msg.contains("malformed success response")),
            other => panic!("expected unexpected, got {:?}", other),
        }
    }

    #[test]
    fn test_report_duration_and_counts() {
        let started_at = Utc::now();
        let report = ProbeReport {
            health: HealthOutcome::Healthy(json!({})),
            results: vec![FixtureResult {
                index: 1,
                request: PoemRequest::default_fixtures().remove(0),
                status: Some(200),
                outcome: FixtureOutcome::LogicalFailure("rate limited".to_string()),
            }],
            started_at,
            finished_at: started_at + TimeDelta::milliseconds(1500),
        };

        assert_eq!(report.duration(), TimeDelta::milliseconds(1500));
        assert_eq!(report.passed(), 0);
        assert_eq!(report.failed(), 1);
        assert!(!report.all_passed());
    }

    #[test]
    fn test_health_classification() {
        assert_eq!(
            HealthOutcome::from_reply(HttpReply::new(200, r#"{"message": "Hello World"}"#)),
            HealthOutcome::Healthy(json!({"message": "Hello World"}))
        );
        assert_eq!(
            HealthOutcome::from_reply(HttpReply::new(503, "down")),
            HealthOutcome::Unhealthy {
                status: 503,
                body: "down".to_string()
            }
        );
        assert_eq!(
            HealthOutcome::from_reply(HttpReply::new(200, "OK")),
            HealthOutcome::Malformed {
                body: "OK".to_string()
            }
        );
        assert_eq!(HealthOutcome::Unreachable("refused".into()).status(), None);
    }
}
