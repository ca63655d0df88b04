use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoemStyle {
    Haiku,
    Sonnet,
    FreeVerse,
    Limerick,
}

impl PoemStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Haiku => "haiku",
            Self::Sonnet => "sonnet",
            Self::FreeVerse => "free_verse",
            Self::Limerick => "limerick",
        }
    }

    /// Human-facing name used in test headers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Haiku => "Haiku",
            Self::Sonnet => "Sonnet",
            Self::FreeVerse => "Free Verse",
            Self::Limerick => "Limerick",
        }
    }
}

impl fmt::Display for PoemStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoemLength {
    Short,
    Medium,
    Long,
}

impl PoemLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

impl fmt::Display for PoemLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoemRequest {
    pub theme: String,
    pub style: PoemStyle,
    pub mood: String,
    pub length: PoemLength,
}

impl PoemRequest {
    pub fn new(
        theme: impl Into<String>,
        style: PoemStyle,
        mood: impl Into<String>,
        length: PoemLength,
    ) -> Self {
        Self {
            theme: theme.into(),
            style,
            mood: mood.into(),
            length,
        }
    }

    /// The three requests every probe run sends unless configured otherwise.
    pub fn default_fixtures() -> Vec<Self> {
        vec![
            Self::new("ocean waves", PoemStyle::Haiku, "peaceful", PoemLength::Short),
            Self::new("love", PoemStyle::Sonnet, "romantic", PoemLength::Medium),
            Self::new("friendship", PoemStyle::FreeVerse, "happy", PoemLength::Medium),
        ]
    }
}

/// A successful generation reply. Failure replies are inspected as raw JSON
/// before this type is decoded, so every field here is mandatory except
/// `metadata`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoemResponse {
    pub success: bool,
    pub theme: String,
    pub style: String,
    pub mood: String,
    pub poem: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Best-effort view of a response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    Structured(Value),
    Raw(String),
}

impl ErrorBody {
    pub fn parse(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::Structured(value),
            Err(_) => Self::Raw(body.to_string()),
        }
    }

    /// The service's `error` field, when the body is an object carrying one.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Structured(value) => value.get("error").and_then(Value::as_str),
            Self::Raw(_) => None,
        }
    }
}

/// Status and body of one completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}
