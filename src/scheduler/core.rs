//! Phase implementations shared by every scheduler variant: release,
//! deadline-check, selection, and the summary text layout. Kept as free
//! functions over borrowed run state rather than a shared base struct, since
//! the three variants disagree on which extra fields (aperiodic queues,
//! server budget) they carry.

use crate::model::{PeriodicJob, PeriodicTask, Tick};
use crate::policy::PriorityPolicy;

pub const IDLE: &str = "IDLE";

/// Release every periodic job due at tick `t`, tagging each with the next
/// insertion sequence number so ties can be broken by "who arrived first".
pub fn release(tasks: &[PeriodicTask], ready: &mut Vec<PeriodicJob>, next_seq: &mut u64, t: Tick) {
    for task in tasks {
        if t < task.arrival {
            continue;
        }
        if (t - task.arrival) % task.period == 0 {
            ready.push(PeriodicJob::new(task, t, *next_seq));
            *next_seq += 1;
        }
    }
}

/// Move every job whose deadline has strictly passed into `missed`,
/// preserving the relative order of the jobs that remain ready.
pub fn check_deadlines(ready: &mut Vec<PeriodicJob>, missed: &mut Vec<PeriodicJob>, t: Tick) {
    let mut i = 0;
    while i < ready.len() {
        if t > ready[i].abs_deadline && ready[i].remaining > 0 {
            missed.push(ready.remove(i));
        } else {
            i += 1;
        }
    }
}

/// Index of the ready job minimizing `(policy.key, job.seq, job.id)`.
pub fn select(ready: &[PeriodicJob], policy: &dyn PriorityPolicy, now: Tick) -> Option<usize> {
    ready.iter()
        .enumerate()
        .map(|(i, job)| (i, ordered_float::OrderedFloat(policy.key(job, now)), job.seq, &job.id))
        .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.2.cmp(&b.2)).then_with(|| a.3.cmp(b.3)))
        .map(|(i, ..)| i)
}

/// Remove the job at `idx` from `ready`, execute it one tick, and record its
/// label in the timeline. Returns `true` if the job completed.
pub fn execute(ready: &mut Vec<PeriodicJob>, finished: &mut Vec<PeriodicJob>, timeline: &mut [String], idx: usize, t: Tick) -> bool {
    ready[idx].remaining -= 1;
    timeline[t as usize] = ready[idx].task_name.clone();
    if ready[idx].remaining == 0 {
        finished.push(ready.remove(idx));
        true
    } else {
        false
    }
}

/// Shared body of every `summary_text()`: header, timeline, counts, and the
/// compact gantt line (§4.9).
pub fn summary_text(policy_name: &str, timeline: &[String], finished: &[PeriodicJob], missed: &[PeriodicJob]) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== Periodic Scheduler ({policy_name}) ===\n"));
    out.push_str("Timeline (time: task):\n");
    for (t, label) in timeline.iter().enumerate() {
        out.push_str(&format!("{t} : {label}\n"));
    }

    out.push_str(&format!("\nFinished jobs: {}\n", finished.len()));
    out.push_str(&format!("Missed deadlines: {}\n", missed.len()));
    if !missed.is_empty() {
        out.push_str("Missed jobs:\n");
        for job in missed {
            out.push_str(&format!("  {} (deadline {})\n", job.id, job.abs_deadline));
        }
    }

    out.push_str("\nGantt-like:\n");
    for label in timeline {
        if label == IDLE {
            out.push('_');
        } else {
            out.push(label.chars().nth(1).or_else(|| label.chars().next()).unwrap_or('_'));
        }
    }
    out.push('\n');
    out
}
