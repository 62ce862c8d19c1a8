//! Deferrable server: budget can be preserved across idle periods instead of
//! being forfeited (§4.6).

use crate::server_rules::DeferrableConfig;
use super::rule::{ServerBudgetCtx, ServerRule};

#[derive(Debug)]
pub struct DeferrableRule {
    cfg: DeferrableConfig,
}

impl DeferrableRule {
    pub fn new(cfg: DeferrableConfig) -> Self {
        Self { cfg }
    }
}

impl ServerRule for DeferrableRule {
    fn update_budget(&mut self, ctx: &mut ServerBudgetCtx) {
        if ctx.now % ctx.t_period != 0 {
            return;
        }
        if self.cfg.reset_budget_each_period {
            *ctx.budget = ctx.q as i64;
        }
        // else: leave the carried-over budget as-is; it is bounded by q
        // because consumption only ever decreases it.
    }

    fn consume_budget(&mut self, ctx: &mut ServerBudgetCtx) {
        *ctx.budget -= 1;
    }

    fn name(&self) -> &'static str { "DEFERRABLE" }
}
