//! Bandwidth-server scheduler base: a periodic scheduler where one synthetic
//! task ("S") represents a budget-limited aperiodic-service slot, with the
//! budget bookkeeping delegated to a pluggable [`rule::ServerRule`] (§4.4).

pub mod rule;
pub mod polling;
pub mod deferrable;
pub mod sporadic;

use std::collections::VecDeque;

use crate::model::{AperiodicJob, PeriodicJob, PeriodicTask, ServerCfg, Tick};
use crate::policy::PriorityPolicy;
use rule::{ServerBudgetCtx, ServerRule};
use super::core;

const SERVER_TASK_NAME: &str = "S";

#[derive(Debug)]
pub struct ServerScheduler {
    tasks: Vec<PeriodicTask>,
    server_cfg: ServerCfg,
    sim_time: Tick,
    policy: Box<dyn PriorityPolicy>,
    rule: Box<dyn ServerRule>,

    ready: Vec<PeriodicJob>,
    finished: Vec<PeriodicJob>,
    missed: Vec<PeriodicJob>,
    timeline: Vec<String>,
    next_seq: u64,

    server_budget: i64,
    aperiodic_all: VecDeque<AperiodicJob>,
    aperiodic_ready: VecDeque<AperiodicJob>,
}

impl ServerScheduler {
    pub fn new(
        tasks: Vec<PeriodicTask>,
        aperiodic: Vec<AperiodicJob>,
        server_cfg: ServerCfg,
        sim_time: Tick,
        policy: Box<dyn PriorityPolicy>,
        rule: Box<dyn ServerRule>,
    ) -> Self {
        let mut aperiodic_all: Vec<_> = aperiodic;
        aperiodic_all.sort_by_key(|j| j.release_time);

        Self {
            tasks,
            server_cfg,
            sim_time,
            policy,
            rule,
            ready: Vec::new(),
            finished: Vec::new(),
            missed: Vec::new(),
            timeline: vec![core::IDLE.to_owned(); sim_time as usize],
            next_seq: 0,
            server_budget: server_cfg.q as i64,
            aperiodic_all: aperiodic_all.into(),
            aperiodic_ready: VecDeque::new(),
        }
    }

    fn all_tasks_with_server(&self) -> Vec<PeriodicTask> {
        let mut all = self.tasks.clone();
        all.push(self.server_cfg.as_task());
        all
    }

    fn release_aperiodic(&mut self, t: Tick) {
        while let Some(front) = self.aperiodic_all.front() {
            if front.release_time != t {
                break;
            }
            let job = self.aperiodic_all.pop_front().unwrap();
            self.aperiodic_ready.push_back(job);
        }
    }

    /// Drop any job already at `exec_time == 0` (a legal but degenerate
    /// arrival) before it's ever considered for service, so the decrement in
    /// `step` never underflows a `remaining` that was already zero.
    fn drain_completed_aperiodic(&mut self) {
        while matches!(self.aperiodic_ready.front(), Some(job) if job.remaining == 0) {
            self.aperiodic_ready.pop_front();
        }
    }

    /// Remove every ready job belonging to the synthetic server task. Its
    /// completion isn't tracked through `remaining` the way a real task's
    /// is — the server's progress lives in `server_budget` and
    /// `aperiodic_ready` instead — so a stale instance is only cleared out
    /// when a fresh one is about to replace it at the next period boundary.
    fn strip_server_jobs(&mut self) {
        self.ready.retain(|job| job.task_name != SERVER_TASK_NAME);
    }

    pub fn run(&mut self) {
        for t in 0..self.sim_time {
            self.step(t);
        }
    }

    pub fn step(&mut self, t: Tick) {
        // A fresh server job supersedes whatever instance was still sitting
        // unconsumed in `ready` from the previous period.
        if t % self.server_cfg.t_period == 0 {
            self.strip_server_jobs();
        }

        let all_tasks = self.all_tasks_with_server();
        core::release(&all_tasks, &mut self.ready, &mut self.next_seq, t);
        self.release_aperiodic(t);
        self.drain_completed_aperiodic();
        core::check_deadlines(&mut self.ready, &mut self.missed, t);

        let mut ctx = ServerBudgetCtx {
            budget: &mut self.server_budget,
            q: self.server_cfg.q,
            t_period: self.server_cfg.t_period,
            now: t,
            aperiodic_ready_nonempty: !self.aperiodic_ready.is_empty(),
        };
        self.rule.update_budget(&mut ctx);

        let Some(idx) = core::select(&self.ready, self.policy.as_ref(), t) else {
            self.timeline[t as usize] = core::IDLE.to_owned();
            return;
        };

        if self.ready[idx].task_name != SERVER_TASK_NAME {
            core::execute(&mut self.ready, &mut self.finished, &mut self.timeline, idx, t);
            return;
        }

        let can_run = self.server_budget > 0 && !self.aperiodic_ready.is_empty();
        if can_run {
            let mut ctx = ServerBudgetCtx {
                budget: &mut self.server_budget,
                q: self.server_cfg.q,
                t_period: self.server_cfg.t_period,
                now: t,
                aperiodic_ready_nonempty: true,
            };
            self.rule.consume_budget(&mut ctx);

            let job = self.aperiodic_ready.front_mut().expect("checked non-empty above");
            job.remaining -= 1;
            self.timeline[t as usize] = job.name.clone();
            if job.remaining == 0 {
                self.aperiodic_ready.pop_front();
            }
            // The server job itself stays in `ready` — it isn't "used up"
            // by one tick of work the way a real job's remaining counter
            // would retire it, and it remains eligible for later ticks in
            // the same period.
            return;
        }

        // The server can't usefully run this tick: reselect among the real
        // tasks only, without disturbing the server's own ready-queue entry.
        match self.select_excluding_server(t) {
            Some(idx) => { core::execute(&mut self.ready, &mut self.finished, &mut self.timeline, idx, t); }
            None => { self.timeline[t as usize] = core::IDLE.to_owned(); }
        }
    }

    fn select_excluding_server(&self, now: Tick) -> Option<usize> {
        self.ready.iter()
            .enumerate()
            .filter(|(_, job)| job.task_name != SERVER_TASK_NAME)
            .map(|(i, job)| (i, ordered_float::OrderedFloat(self.policy.key(job, now)), job.seq, &job.id))
            .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.2.cmp(&b.2)).then_with(|| a.3.cmp(b.3)))
            .map(|(i, ..)| i)
    }

    pub fn timeline(&self) -> &[String] { &self.timeline }
    pub fn finished(&self) -> &[PeriodicJob] { &self.finished }
    pub fn missed(&self) -> &[PeriodicJob] { &self.missed }
    pub fn remaining_aperiodic(&self) -> usize {
        self.aperiodic_all.len() + self.aperiodic_ready.len()
    }

    pub fn summary_text(&self) -> String {
        let mut out = core::summary_text(self.policy.name(), &self.timeline, &self.finished, &self.missed);
        out.push_str(&format!("Remaining aperiodic jobs: {}\n", self.remaining_aperiodic()));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::make_policy;
    use crate::server_rules::{DeferrableConfig, PollingConfig};
    use polling::PollingRule;
    use deferrable::DeferrableRule;
    use sporadic::SporadicRule;

    fn task(name: &str, arrival: u64, exec: u64, period: u64, deadline: u64) -> PeriodicTask {
        PeriodicTask { name: name.to_owned(), arrival, exec_time: exec, period, deadline }
    }

    #[test]
    fn polling_server_services_aperiodic_work_up_to_its_budget() {
        let cfg = ServerCfg { q: 2, t_period: 5, d: 5 };
        let aperiodic = vec![AperiodicJob::new("A1", 0, 2)];
        let rule = Box::new(PollingRule::new(PollingConfig::default()));
        let mut sched = ServerScheduler::new(Vec::new(), aperiodic, cfg, 5, make_policy("RMS").unwrap(), rule);
        sched.run();

        assert_eq!(sched.timeline()[0], "A1");
        assert_eq!(sched.timeline()[1], "A1");
        assert_eq!(sched.remaining_aperiodic(), 0);
    }

    #[test]
    fn polling_server_forfeits_unused_budget_at_next_boundary() {
        let cfg = ServerCfg { q: 3, t_period: 3, d: 3 };
        // No aperiodic work at all: with the default flag, budget stays 0 every period.
        let rule = Box::new(PollingRule::new(PollingConfig::default()));
        let mut sched = ServerScheduler::new(vec![task("T1", 0, 1, 3, 3)], Vec::new(), cfg, 6, make_policy("RMS").unwrap(), rule);
        sched.run();
        // T1 always wins the tie against the idle server job on every period boundary.
        assert_eq!(sched.timeline()[0], "T1");
        assert_eq!(sched.timeline()[3], "T1");
    }

    #[test]
    fn deferrable_server_preserves_budget_when_configured_to() {
        let cfg = ServerCfg { q: 2, t_period: 4, d: 4 };
        let aperiodic = vec![AperiodicJob::new("A1", 5, 1)];
        let rule = Box::new(DeferrableRule::new(DeferrableConfig { reset_budget_each_period: false }));
        let mut sched = ServerScheduler::new(Vec::new(), aperiodic, cfg, 6, make_policy("RMS").unwrap(), rule);
        sched.run();
        // Budget (q=2) survives unconsumed through t=0..4 and services A1 at t=5.
        assert_eq!(sched.timeline()[5], "A1");
    }

    #[test]
    fn real_periodic_tasks_take_priority_over_the_server_under_rms() {
        let cfg = ServerCfg { q: 5, t_period: 10, d: 10 };
        let aperiodic = vec![AperiodicJob::new("A1", 0, 1)];
        let rule = Box::new(PollingRule::new(PollingConfig::default()));
        // T1 has a much shorter period than the server -> always higher RMS priority.
        let mut sched = ServerScheduler::new(vec![task("T1", 0, 1, 2, 2)], aperiodic, cfg, 1, make_policy("RMS").unwrap(), rule);
        sched.run();
        assert_eq!(sched.timeline()[0], "T1");
    }

    /// Server (Q=2,T=5), default polling flag, no periodic load. An aperiodic
    /// job arriving after a boundary finds the budget already zeroed for
    /// that whole period and has to wait for the next one.
    #[test]
    fn polling_forfeits_aperiodic_job_that_arrives_after_the_relevant_boundary() {
        let cfg = ServerCfg { q: 2, t_period: 5, d: 5 };
        let aperiodic = vec![AperiodicJob::new("A1", 6, 1)];
        let rule = Box::new(PollingRule::new(PollingConfig::default()));
        let mut sched = ServerScheduler::new(Vec::new(), aperiodic, cfg, 10, make_policy("RMS").unwrap(), rule);
        sched.run();
        assert_eq!(sched.remaining_aperiodic(), 1);
    }

    /// Server (Q=1,T=4), deferrable with no reset, no periodic load. A1
    /// released at t=3 consumes the budget accumulated since t=0.
    #[test]
    fn deferrable_server_uses_accumulated_budget_on_midperiod_arrival() {
        let cfg = ServerCfg { q: 1, t_period: 4, d: 4 };
        let aperiodic = vec![AperiodicJob::new("A1", 3, 1)];
        let rule = Box::new(DeferrableRule::new(DeferrableConfig { reset_budget_each_period: false }));
        let mut sched = ServerScheduler::new(Vec::new(), aperiodic, cfg, 4, make_policy("RMS").unwrap(), rule);
        sched.run();
        assert_eq!(sched.timeline()[3], "A1");
    }

    /// Server (Q=2,T=5), sporadic defaults, no periodic load. A1:(0,2)
    /// consumes budget at t=0,1, scheduling replenishments at (5,1) and
    /// (6,1) which restore the budget to 1 then 2.
    #[test]
    fn sporadic_server_replenishes_one_period_after_each_consumption() {
        let cfg = ServerCfg { q: 2, t_period: 5, d: 5 };
        let aperiodic = vec![AperiodicJob::new("A1", 0, 2)];
        let rule = Box::new(SporadicRule::new(crate::server_rules::SporadicConfig::default()));
        let mut sched = ServerScheduler::new(Vec::new(), aperiodic, cfg, 7, make_policy("RMS").unwrap(), rule);
        sched.run();

        let labels: Vec<&str> = sched.timeline().iter().map(String::as_str).collect();
        assert_eq!(labels[0], "A1");
        assert_eq!(labels[1], "A1");
        assert_eq!(sched.remaining_aperiodic(), 0);
    }

    /// A zero-exec-time aperiodic arrival must never be served and must
    /// never underflow the server's job-remaining decrement.
    #[test]
    fn zero_exec_time_aperiodic_job_is_dropped_without_running() {
        let cfg = ServerCfg { q: 2, t_period: 5, d: 5 };
        let aperiodic = vec![AperiodicJob::new("A1", 0, 0), AperiodicJob::new("A2", 0, 1)];
        let rule = Box::new(PollingRule::new(PollingConfig::default()));
        let mut sched = ServerScheduler::new(Vec::new(), aperiodic, cfg, 2, make_policy("RMS").unwrap(), rule);
        sched.run();
        assert_eq!(sched.timeline()[0], "A2");
        assert_eq!(sched.remaining_aperiodic(), 0);
    }
}
