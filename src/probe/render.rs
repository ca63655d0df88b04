use super::outcome::{FixtureOutcome, FixtureResult, HealthOutcome, ProbeReport};
use crate::api::{ErrorBody, PoemResponse};
use std::io::{self, Write};

fn rule(ch: char, width: usize) -> String {
    ch.to_string().repeat(width)
}

pub fn health_header<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Testing API Health")?;
    writeln!(out, "{}", rule('=', 30))
}

pub fn health<W: Write>(out: &mut W, outcome: &HealthOutcome, base_url: &str) -> io::Result<()> {
    if let Some(status) = outcome.status() {
        writeln!(out, "Status Code: {}", status)?;
    }

    match outcome {
        HealthOutcome::Healthy(value) => writeln!(out, "✅ API is healthy: {}", value),
        HealthOutcome::Malformed { body } => {
            writeln!(out, "❌ API health check returned a non-JSON body: {}", body)
        }
        HealthOutcome::Unhealthy { body, .. } => {
            writeln!(out, "❌ API health check failed: {}", body)
        }
        HealthOutcome::Unreachable(message) => {
            writeln!(out, "❌ Failed to connect to API: {}", message)?;
            writeln!(out, "Make sure the backend server is running at {}", base_url)
        }
    }
}

pub fn generation_header<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Testing Poem Generation API")?;
    writeln!(out, "{}", rule('=', 50))
}

pub fn fixture<W: Write>(out: &mut W, result: &FixtureResult) -> io::Result<()> {
    writeln!(
        out,
        "\nTest {}: {} about '{}'",
        result.index,
        result.request.style.label(),
        result.request.theme
    )?;
    writeln!(out, "{}", rule('-', 40))?;

    if let Some(status) = result.status {
        writeln!(out, "Status Code: {}", status)?;
    }

    match &result.outcome {
        FixtureOutcome::Success(response) => poem(out, response)?,
        FixtureOutcome::Transport(message) => writeln!(out, "❌ Request failed: {}", message)?,
        FixtureOutcome::Http { status, body } => {
            writeln!(out, "❌ HTTP Error: {}", status)?;
            match body {
                ErrorBody::Structured(value) => writeln!(out, "Error details: {}", value)?,
                ErrorBody::Raw(text) => writeln!(out, "Response text: {}", text)?,
            }
        }
        FixtureOutcome::LogicalFailure(message) => {
            writeln!(out, "❌ API returned success=False")?;
            writeln!(out, "Error: {}", message)?;
        }
        FixtureOutcome::Unexpected(message) => {
            writeln!(out, "❌ Unexpected error: {}", message)?
        }
    }

    writeln!(out, "\n{}", rule('=', 50))
}

fn poem<W: Write>(out: &mut W, response: &PoemResponse) -> io::Result<()> {
    writeln!(out, "✅ SUCCESS!")?;
    writeln!(out, "Theme: {}", response.theme)?;
    writeln!(out, "Style: {}", response.style)?;
    writeln!(out, "Mood: {}", response.mood)?;
    writeln!(out, "\nGenerated Poem:")?;
    writeln!(out, "📝 {}", rule('=', 30))?;
    writeln!(out, "{}", response.poem)?;
    writeln!(out, "{}", rule('=', 34))?;

    if let Some(metadata) = response.metadata.as_ref().filter(|m| !m.is_empty()) {
        let metadata = serde_json::Value::Object(metadata.clone());
        writeln!(out, "\nMetadata: {}", metadata)?;
    }

    Ok(())
}

pub fn summary<W: Write>(out: &mut W, report: &ProbeReport) -> io::Result<()> {
    writeln!(
        out,
        "\nSummary: health check {}, {}/{} generation tests passed",
        if report.is_healthy() { "passed" } else { "failed" },
        report.passed(),
        report.results.len()
    )?;

    for failure in report.failures() {
        writeln!(
            out,
            "  - Test {} ({}): {}",
            failure.index,
            failure.request.theme,
            failure_reason(&failure.outcome)
        )?;
    }

    Ok(())
}

fn failure_reason(outcome: &FixtureOutcome) -> String {
    match outcome {
        FixtureOutcome::Success(_) => "passed".to_string(),
        FixtureOutcome::Transport(message) => format!("request failed: {}", message),
        FixtureOutcome::Http { status, body } => match body.error_message() {
            Some(message) => format!("HTTP {}: {}", status, message),
            None => format!("HTTP {}", status),
        },
        FixtureOutcome::LogicalFailure(message) => format!("API error: {}", message),
        FixtureOutcome::Unexpected(message) => format!("unexpected error: {}", message),
    }
}
