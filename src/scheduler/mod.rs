//! The three scheduler variants behind one enum, so the factory and CLI have
//! a single return type to work with (§4.2-4.4, §9 Design Notes).

pub mod core;
pub mod periodic;
pub mod background;
pub mod server;

pub mod prelude {
    pub use super::Scheduler;
}

use crate::model::{PeriodicJob, Tick};
use periodic::PeriodicScheduler;
use background::BackgroundScheduler;
use server::ServerScheduler;

#[derive(Debug)]
pub enum Scheduler {
    Periodic(PeriodicScheduler),
    Background(BackgroundScheduler),
    Server(ServerScheduler),
}

impl Scheduler {
    pub fn run(&mut self) {
        match self {
            Scheduler::Periodic(s) => s.run(),
            Scheduler::Background(s) => s.run(),
            Scheduler::Server(s) => s.run(),
        }
    }

    pub fn step(&mut self, t: Tick) {
        match self {
            Scheduler::Periodic(s) => s.step(t),
            Scheduler::Background(s) => s.step(t),
            Scheduler::Server(s) => s.step(t),
        }
    }

    pub fn timeline(&self) -> &[String] {
        match self {
            Scheduler::Periodic(s) => s.timeline(),
            Scheduler::Background(s) => s.timeline(),
            Scheduler::Server(s) => s.timeline(),
        }
    }

    pub fn finished(&self) -> &[PeriodicJob] {
        match self {
            Scheduler::Periodic(s) => s.finished(),
            Scheduler::Background(s) => s.finished(),
            Scheduler::Server(s) => s.finished(),
        }
    }

    pub fn missed(&self) -> &[PeriodicJob] {
        match self {
            Scheduler::Periodic(s) => s.missed(),
            Scheduler::Background(s) => s.missed(),
            Scheduler::Server(s) => s.missed(),
        }
    }

    pub fn summary_text(&self) -> String {
        match self {
            Scheduler::Periodic(s) => s.summary_text(),
            Scheduler::Background(s) => s.summary_text(),
            Scheduler::Server(s) => s.summary_text(),
        }
    }
}
