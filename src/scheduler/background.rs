//! Background-service scheduler: periodic scheduling with aperiodic jobs
//! serviced only when the processor would otherwise be idle (§4.3).

use std::collections::VecDeque;

use crate::model::{AperiodicJob, PeriodicJob, PeriodicTask, Tick};
use crate::policy::PriorityPolicy;
use super::core;

#[derive(Debug)]
pub struct BackgroundScheduler {
    tasks: Vec<PeriodicTask>,
    sim_time: Tick,
    policy: Box<dyn PriorityPolicy>,

    ready: Vec<PeriodicJob>,
    finished: Vec<PeriodicJob>,
    missed: Vec<PeriodicJob>,
    timeline: Vec<String>,
    next_seq: u64,

    aperiodic_all: VecDeque<AperiodicJob>,
    aperiodic_ready: VecDeque<AperiodicJob>,
}

impl BackgroundScheduler {
    pub fn new(
        tasks: Vec<PeriodicTask>,
        aperiodic: Vec<AperiodicJob>,
        sim_time: Tick,
        policy: Box<dyn PriorityPolicy>,
    ) -> Self {
        let mut aperiodic_all: Vec<_> = aperiodic;
        aperiodic_all.sort_by_key(|j| j.release_time);

        Self {
            tasks,
            sim_time,
            policy,
            ready: Vec::new(),
            finished: Vec::new(),
            missed: Vec::new(),
            timeline: vec![core::IDLE.to_owned(); sim_time as usize],
            next_seq: 0,
            aperiodic_all: aperiodic_all.into(),
            aperiodic_ready: VecDeque::new(),
        }
    }

    pub fn run(&mut self) {
        for t in 0..self.sim_time {
            self.step(t);
        }
    }

    /// Move every aperiodic job due at `t` from the pending queue to the
    /// ready FIFO. `aperiodic_all` is sorted by release time, so jobs not
    /// yet due are always at the front once we stop removing.
    fn release_aperiodic(&mut self, t: Tick) {
        while let Some(front) = self.aperiodic_all.front() {
            if front.release_time != t {
                break;
            }
            let job = self.aperiodic_all.pop_front().unwrap();
            self.aperiodic_ready.push_back(job);
        }
    }

    pub fn step(&mut self, t: Tick) {
        core::release(&self.tasks, &mut self.ready, &mut self.next_seq, t);
        self.release_aperiodic(t);
        self.drain_completed_aperiodic();
        core::check_deadlines(&mut self.ready, &mut self.missed, t);

        if let Some(idx) = core::select(&self.ready, self.policy.as_ref(), t) {
            core::execute(&mut self.ready, &mut self.finished, &mut self.timeline, idx, t);
            return;
        }

        if let Some(job) = self.aperiodic_ready.front_mut() {
            job.remaining -= 1;
            self.timeline[t as usize] = job.name.clone();
            if job.remaining == 0 {
                self.aperiodic_ready.pop_front();
            }
            return;
        }

        self.timeline[t as usize] = core::IDLE.to_owned();
    }

    /// Drop any job already at `exec_time == 0` (a legal but degenerate
    /// arrival) before it's ever considered for service, so the decrement in
    /// `step` never underflows a `remaining` that was already zero.
    fn drain_completed_aperiodic(&mut self) {
        while matches!(self.aperiodic_ready.front(), Some(job) if job.remaining == 0) {
            self.aperiodic_ready.pop_front();
        }
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
