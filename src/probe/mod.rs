mod outcome;
pub mod render;

pub use outcome::{FixtureOutcome, FixtureResult, HealthOutcome, ProbeReport, UNKNOWN_ERROR};

use crate::{
    Error, Result,
    api::{PoemApi, PoemRequest},
    config::ProbeConfig,
};
use chrono::Utc;
use std::io::Write;
use tracing::{info, warn};

/// Drives the health check and the generation fixtures against a [`PoemApi`].
pub struct Probe<C: PoemApi> {
    client: C,
    base_url: String,
    fixtures: Vec<PoemRequest>,
}

impl<C: PoemApi> Probe<C> {
    pub fn new(client: C, config: &ProbeConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            fixtures: config.fixtures.clone(),
        }
    }

    pub async fn check_health(&self) -> HealthOutcome {
        match self.client.health().await {
            Ok(reply) => {
                let outcome = HealthOutcome::from_reply(reply);
                if !outcome.is_healthy() {
                    warn!("Health check failed with status {:?}", outcome.status());
                }
                outcome
            }
            Err(e) => {
                warn!("Health check could not reach {}: {}", self.base_url, e);
                HealthOutcome::Unreachable(describe(&e))
            }
        }
    }

    /// Sends one fixture. `index` is its 1-based position, used for reporting.
    pub async fn check_generation(&self, index: usize, request: &PoemRequest) -> FixtureResult {
        let (status, outcome) = match self.client.generate_poem(request).await {
            Ok(reply) => (Some(reply.status), FixtureOutcome::from_reply(&reply)),
            Err(e) if e.is_transport() => (None, FixtureOutcome::Transport(describe(&e))),
            Err(e) => (None, FixtureOutcome::Unexpected(e.to_string())),
        };

        if outcome.is_success() {
            info!("Test {} ('{}') passed", index, request.theme);
        } else {
            warn!(
                "Test {} ('{}') failed: {} ({:?})",
                index,
                request.theme,
                outcome.kind(),
                status
            );
        }

        FixtureResult {
            index,
            request: request.clone(),
            status,
            outcome,
        }
    }

    /// Runs the health check and then every fixture in order, rendering each
    /// outcome to `out` as it arrives. Only a failed write aborts the run.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<ProbeReport> {
        let started_at = Utc::now();
        info!(
            "Starting probe against {} with {} fixtures",
            self.base_url,
            self.fixtures.len()
        );

        render::health_header(out)?;
        let health = self.check_health().await;
        render::health(out, &health, &self.base_url)?;
        writeln!(out)?;

        render::generation_header(out)?;
        let mut results = Vec::with_capacity(self.fixtures.len());
        for (i, request) in self.fixtures.iter().enumerate() {
            let result = self.check_generation(i + 1, request).await;
            render::fixture(out, &result)?;
            results.push(result);
        }

        let report = ProbeReport {
            health,
            results,
            started_at,
            finished_at: Utc::now(),
        };
        render::summary(out, &report)?;
        out.flush()?;

        info!(
            "Probe finished in {} ms: {}/{} generation tests passed",
            report.duration().num_milliseconds(),
            report.passed(),
            report.results.len()
        );
        Ok(report)
    }
}

/// Flattens a transport error and its source chain into one line.
fn describe(err: &Error) -> String {
    let Error::Transport(inner) = err else {
        return err.to_string();
    };

    let mut message = inner.to_string();
    let mut source = std::error::Error::source(inner);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }

    message
}
