//! Polling server: full budget at each period boundary, forfeited if unused
//! (§4.5).

use crate::server_rules::PollingConfig;
use super::rule::{ServerBudgetCtx, ServerRule};

#[derive(Debug)]
pub struct PollingRule {
    cfg: PollingConfig,
}

impl PollingRule {
    pub fn new(cfg: PollingConfig) -> Self {
        Self { cfg }
    }
}

impl ServerRule for PollingRule {
    fn update_budget(&mut self, ctx: &mut ServerBudgetCtx) {
        if ctx.now % ctx.t_period != 0 {
            return;
        }
        *ctx.budget = if self.cfg.budget_if_aperiodic_ready {
            if ctx.aperiodic_ready_nonempty { ctx.q as i64 } else { 0 }
        } else {
            ctx.q as i64
        };
    }

    fn consume_budget(&mut self, ctx: &mut ServerBudgetCtx) {
        *ctx.budget -= 1;
    }

    fn name(&self) -> &'static str { "POLLING" }
}
