//! Task and job types shared by every scheduler variant.

pub mod prelude {
    pub use super::{
        Tick,
        PeriodicTask,
        PeriodicJob,
        AperiodicJob,
        ServerCfg,
        SimUtils,
    };
}

/// A simulation instant: an integer tick count, never sub-divided.
pub type Tick = u64;

/// Immutable description of a periodic task, as declared in the input file.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct PeriodicTask {
    pub name: String,
    pub arrival: Tick,
    pub exec_time: u64,
    pub period: u64,
    pub deadline: u64,
}

/// A single release of a `PeriodicTask`.
///
/// Jobs copy the scalar fields of their task they need for policy keys
/// (`task_period`, `task_deadline`) instead of borrowing the task itself —
/// the task's lifetime otherwise has to dominate every `Vec<PeriodicJob>`
/// operation, which fights the borrow checker for no real benefit since
/// tasks are never mutated after construction.
#[derive(Clone, Debug)]
pub struct PeriodicJob {
    pub task_name: String,
    pub task_period: u64,
    pub task_deadline: u64,
    pub release_time: Tick,
    pub remaining: u64,
    pub abs_deadline: Tick,
    pub seq: u64,
    pub id: String,
}

impl PeriodicJob {
    pub fn new(task: &PeriodicTask, release_time: Tick, seq: u64) -> Self {
        Self {
            task_name: task.name.clone(),
            task_period: task.period,
            task_deadline: task.deadline,
            release_time,
            remaining: task.exec_time,
            abs_deadline: release_time + task.deadline,
            seq,
            id: format!("{}@{}", task.name, release_time),
        }
    }
}

/// A single aperiodic job arrival. Aperiodic jobs carry no deadline and can
/// never be reported as missed.
#[derive(Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct AperiodicJob {
    pub name: String,
    pub release_time: Tick,
    pub exec_time: u64,
    #[serde(default)]
    pub remaining: u64,
}

impl AperiodicJob {
    pub fn new(name: impl Into<String>, release_time: Tick, exec_time: u64) -> Self {
        Self { name: name.into(), release_time, exec_time, remaining: exec_time }
    }
}

/// Parameters of a bandwidth server, parsed from a `D` line.
#[derive(Clone, Copy, Debug)]
pub struct ServerCfg {
    pub q: u64,
    pub t_period: u64,
    pub d: u64,
}

impl ServerCfg {
    /// The synthetic periodic task the engine injects to make the server
    /// compete for the CPU under the active priority policy.
    pub fn as_task(&self) -> PeriodicTask {
        PeriodicTask {
            name: "S".to_owned(),
            arrival: 0,
            exec_time: self.q,
            period: self.t_period,
            deadline: self.d,
        }
    }
}

/// Free functions over a task set, mirroring the teacher's `RTUtils` pattern.
pub struct SimUtils;

impl SimUtils {
    pub fn hyperperiod(tasks: &[PeriodicTask]) -> u64 {
        tasks.iter()
            .map(|t| t.period)
            .fold(1u64, |lcm, period| num::integer::lcm(lcm, period))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(name: &str, arrival: u64, exec: u64, period: u64, deadline: u64) -> PeriodicTask {
        PeriodicTask { name: name.to_owned(), arrival, exec_time: exec, period, deadline }
    }

    #[test]
    fn job_id_and_deadline() {
        let t = task("T1", 0, 1, 3, 3);
        let job = PeriodicJob::new(&t, 6, 2);
        assert_eq!(job.id, "T1@6");
        assert_eq!(job.abs_deadline, 9);
        assert_eq!(job.remaining, 1);
        assert_eq!(job.seq, 2);
    }

    #[test]
    fn hyperperiod_is_lcm_of_periods() {
        let tasks = vec![task("T1", 0, 1, 3, 3), task("T2", 0, 1, 4, 4), task("T3", 0, 2, 6, 6)];
        assert_eq!(SimUtils::hyperperiod(&tasks), 12);
    }

    #[test]
    fn hyperperiod_of_empty_taskset_is_one() {
        assert_eq!(SimUtils::hyperperiod(&[]), 1);
    }

    #[test]
    fn server_cfg_injects_named_task() {
        let cfg = ServerCfg { q: 2, t_period: 5, d: 5 };
        let task = cfg.as_task();
        assert_eq!(task.name, "S");
        assert_eq!((task.exec_time, task.period, task.deadline), (2, 5, 5));
    }
}
