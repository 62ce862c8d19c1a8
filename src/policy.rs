//! Pluggable priority policies: RMS, DMS, EDF, LLF.

use crate::error::EngineError;
use crate::model::{PeriodicJob, Tick};

pub mod prelude {
    pub use super::{PriorityPolicy, make_policy};
}

/// Strategy computing a scalar sort key per ready job at time `now`.
/// The scheduler selects the ready job with the smallest key.
pub trait PriorityPolicy: std::fmt::Debug {
    fn key(&self, job: &PeriodicJob, now: Tick) -> f64;
    fn name(&self) -> &'static str;
}

/// Rate Monotonic Scheduling: shorter period, higher priority.
#[derive(Debug)]
pub struct Rms;
impl PriorityPolicy for Rms {
    fn key(&self, job: &PeriodicJob, _now: Tick) -> f64 { job.task_period as f64 }
    fn name(&self) -> &'static str { "RMS" }
}

/// Deadline Monotonic Scheduling: shorter relative deadline, higher priority.
#[derive(Debug)]
pub struct Dms;
impl PriorityPolicy for Dms {
    fn key(&self, job: &PeriodicJob, _now: Tick) -> f64 { job.task_deadline as f64 }
    fn name(&self) -> &'static str { "DMS" }
}

/// Earliest Deadline First: earlier absolute deadline, higher priority.
#[derive(Debug)]
pub struct Edf;
impl PriorityPolicy for Edf {
    fn key(&self, job: &PeriodicJob, _now: Tick) -> f64 { job.abs_deadline as f64 }
    fn name(&self) -> &'static str { "EDF" }
}

/// Least Laxity First: smallest slack before the deadline can't be met.
#[derive(Debug)]
pub struct Llf;
impl PriorityPolicy for Llf {
    fn key(&self, job: &PeriodicJob, now: Tick) -> f64 {
        let laxity = job.abs_deadline as i64 - now as i64 - job.remaining as i64;
        laxity.max(-1_000_000) as f64
    }
    fn name(&self) -> &'static str { "LLF" }
}

/// Policy factory from a name string (case-insensitive).
pub fn make_policy(name: &str) -> Result<Box<dyn PriorityPolicy>, EngineError> {
    match name.to_uppercase().as_str() {
        "RMS" => Ok(Box::new(Rms)),
        "DMS" => Ok(Box::new(Dms)),
        "EDF" => Ok(Box::new(Edf)),
        "LLF" => Ok(Box::new(Llf)),
        other => Err(EngineError::UnknownPolicy(other.to_owned())),
    }
}
