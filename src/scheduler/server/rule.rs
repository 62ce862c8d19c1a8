//! Capability trait decoupling the three server disciplines from the shared
//! server step loop (§4.4).

use crate::model::Tick;

/// The slice of server state a `ServerRule` is allowed to touch, without
/// exposing the rest of the scheduler's run state.
pub struct ServerBudgetCtx<'a> {
    pub budget: &'a mut i64,
    pub q: u64,
    pub t_period: u64,
    pub now: Tick,
    pub aperiodic_ready_nonempty: bool,
}

/// One aperiodic-server budget discipline: Polling, Deferrable, or Sporadic.
pub trait ServerRule: std::fmt::Debug {
    /// Called once per tick, before selection, so replenishment precedes
    /// consumption within the same tick.
    fn update_budget(&mut self, ctx: &mut ServerBudgetCtx);

    /// Called when the server's job is chosen and spends one unit of budget
    /// servicing an aperiodic job.
    fn consume_budget(&mut self, ctx: &mut ServerBudgetCtx);

    fn name(&self) -> &'static str;
}
