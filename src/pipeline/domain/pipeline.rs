//! Pipeline registry records and run outcomes.

use super::{ParsePipelineStatusError, PipelineDomainError, PipelineId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Last known status reported for a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    /// The latest run succeeded.
    Success,
    /// The latest run failed.
    Failed,
    /// A run is in progress.
    Running,
    /// No status has been reported.
    Unknown,
}

impl PipelineStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Running => "running",
            Self::Unknown => "unknown",
        }
    }

    /// Returns the run outcome for terminal statuses.
    #[must_use]
    pub const fn run_outcome(self) -> Option<RunOutcome> {
        match self {
            Self::Success => Some(RunOutcome::Success),
            Self::Failed => Some(RunOutcome::Failed),
            Self::Running | Self::Unknown => None,
        }
    }
}

impl TryFrom<&str> for PipelineStatus {
    type Error = ParsePipelineStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "success" => Ok(Self::Success),
            "failed" => Ok(Self::Failed),
            "running" => Ok(Self::Running),
            "unknown" => Ok(Self::Unknown),
            _ => Err(ParsePipelineStatusError(value.to_owned())),
        }
    }
}

/// Terminal outcome of a single pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// The run succeeded.
    Success,
    /// The run failed.
    Failed,
}

impl From<RunOutcome> for PipelineStatus {
    fn from(outcome: RunOutcome) -> Self {
        match outcome {
            RunOutcome::Success => Self::Success,
            RunOutcome::Failed => Self::Failed,
        }
    }
}

/// Fraction of successful runs, in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuccessRate(f64);

impl SuccessRate {
    /// Creates a validated success rate.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineDomainError::InvalidSuccessRate`] when the value is
    /// not a finite number in `0..=1`.
    pub fn new(value: f64) -> Result<Self, PipelineDomainError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(PipelineDomainError::InvalidSuccessRate(value));
        }
        Ok(Self(value))
    }

    /// Computes `succeeded / total`, or zero when no runs are recorded.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "success rate is a ratio of run counts"
    )]
    pub fn from_counts(succeeded: u32, total: u32) -> Self {
        if total == 0 {
            return Self(0.0);
        }
        Self(f64::from(succeeded.min(total)) / f64::from(total))
    }

    /// Returns the raw ratio.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Fields reported for a pipeline; absent fields keep their stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineUpsert {
    /// Pipeline identifier.
    pub id: PipelineId,
    /// Display name.
    pub name: Option<String>,
    /// Reported status.
    pub status: Option<PipelineStatus>,
    /// Success rate override.
    pub success_rate: Option<SuccessRate>,
}

impl PipelineUpsert {
    /// Creates an upsert that only touches `last_run`.
    #[must_use]
    pub const fn new(id: PipelineId) -> Self {
        Self {
            id,
            name: None,
            status: None,
            success_rate: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the reported status.
    #[must_use]
    pub const fn with_status(mut self, status: PipelineStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets a success rate override.
    #[must_use]
    pub const fn with_success_rate(mut self, rate: SuccessRate) -> Self {
        self.success_rate = Some(rate);
        self
    }
}

/// Registry record for one pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    id: PipelineId,
    name: String,
    status: PipelineStatus,
    last_run: DateTime<Utc>,
    success_rate: SuccessRate,
}

impl Pipeline {
    /// Creates a registry record from a first report.
    #[must_use]
    pub fn from_upsert(upsert: PipelineUpsert, clock: &impl Clock) -> Self {
        let PipelineUpsert {
            id,
            name,
            status,
            success_rate,
        } = upsert;
        let display_name = name.unwrap_or_else(|| format!("Pipeline {id}"));
        Self {
            id,
            name: display_name,
            status: status.unwrap_or(PipelineStatus::Unknown),
            last_run: clock.utc(),
            success_rate: success_rate.unwrap_or_default(),
        }
    }

    /// Applies a later report, overwriting only the provided fields.
    pub fn apply(&mut self, upsert: PipelineUpsert, clock: &impl Clock) {
        if let Some(name) = upsert.name {
            self.name = name;
        }
        if let Some(status) = upsert.status {
            self.status = status;
        }
        if let Some(rate) = upsert.success_rate {
            self.success_rate = rate;
        }
        self.last_run = clock.utc();
    }

    /// Records a finished run and its recomputed success rate.
    pub fn record_run(&mut self, outcome: RunOutcome, rate: SuccessRate, clock: &impl Clock) {
        self.status = outcome.into();
        self.success_rate = rate;
        self.last_run = clock.utc();
    }

    /// Returns the pipeline identifier.
    #[must_use]
    pub const fn id(&self) -> &PipelineId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the last known status.
    #[must_use]
    pub const fn status(&self) -> PipelineStatus {
        self.status
    }

    /// Returns the time of the latest report or run.
    #[must_use]
    pub const fn last_run(&self) -> DateTime<Utc> {
        self.last_run
    }

    /// Returns the rolling success rate.
    #[must_use]
    pub const fn success_rate(&self) -> SuccessRate {
        self.success_rate
    }
}
