//! Sporadic server: budget consumption schedules a future replenishment
//! instead of refilling at fixed period boundaries (§4.7).

use std::collections::VecDeque;

use crate::model::Tick;
use crate::server_rules::SporadicConfig;
use super::rule::{ServerBudgetCtx, ServerRule};

#[derive(Debug)]
pub struct SporadicRule {
    cfg: SporadicConfig,
    replenishments: VecDeque<(Tick, u64)>,
}

impl SporadicRule {
    pub fn new(cfg: SporadicConfig) -> Self {
        Self { cfg, replenishments: VecDeque::new() }
    }
}

impl ServerRule for SporadicRule {
    fn update_budget(&mut self, ctx: &mut ServerBudgetCtx) {
        while let Some(&(fire_time, amount)) = self.replenishments.front() {
            if fire_time > ctx.now {
                break;
            }
            self.replenishments.pop_front();
            *ctx.budget = (*ctx.budget + amount as i64).min(ctx.q as i64);
        }
    }

    fn consume_budget(&mut self, ctx: &mut ServerBudgetCtx) {
        if *ctx.budget <= 0 {
            return;
        }
        *ctx.budget -= 1;
        let delay = (self.cfg.replenish_delay_factor * ctx.t_period as f64).floor() as u64;
        self.replenishments.push_back((ctx.now + delay, self.cfg.replenish_amount));
    }

    fn name(&self) -> &'static str { "SPORADIC" }
}
