//! Resolves an algorithm name plus parsed inputs into a runnable
//! [`Scheduler`] (§4.8).

use crate::error::EngineError;
use crate::model::{AperiodicJob, PeriodicTask, ServerCfg, Tick};
use crate::policy::make_policy;
use crate::scheduler::Scheduler;
use crate::scheduler::background::BackgroundScheduler;
use crate::scheduler::periodic::PeriodicScheduler;
use crate::scheduler::server::ServerScheduler;
use crate::scheduler::server::deferrable::DeferrableRule;
use crate::scheduler::server::polling::PollingRule;
use crate::scheduler::server::rule::ServerRule;
use crate::scheduler::server::sporadic::SporadicRule;
use crate::server_rules::ServerRuleConfig;

pub mod prelude {
    pub use super::build;
}

pub fn build(
    alg_name: &str,
    tasks: Vec<PeriodicTask>,
    aperiodic: Vec<AperiodicJob>,
    server_cfg: Option<ServerCfg>,
    sim_time: Tick,
    rules: ServerRuleConfig,
) -> Result<Scheduler, EngineError> {
    let name = alg_name.to_uppercase();

    match name.as_str() {
        "RMS" | "DMS" | "EDF" | "LLF" => {
            let policy = make_policy(&name)?;
            Ok(Scheduler::Periodic(PeriodicScheduler::new(tasks, sim_time, policy)))
        }
        "BACKGROUND" => {
            let policy = make_policy("RMS")?;
            Ok(Scheduler::Background(BackgroundScheduler::new(tasks, aperiodic, sim_time, policy)))
        }
        "POLLING" | "DEFERRABLE" | "SPORADIC" => {
            let cfg = server_cfg.ok_or_else(|| EngineError::MissingServerConfig(name.clone()))?;
            let policy = make_policy("RMS")?;
            let rule: Box<dyn ServerRule> = match name.as_str() {
                "POLLING" => Box::new(PollingRule::new(rules.polling)),
                "DEFERRABLE" => Box::new(DeferrableRule::new(rules.deferrable)),
                "SPORADIC" => Box::new(SporadicRule::new(rules.sporadic)),
                _ => unreachable!(),
            };
            Ok(Scheduler::Server(ServerScheduler::new(tasks, aperiodic, cfg, sim_time, policy, rule)))
        }
        other => Err(EngineError::UnknownAlgorithm(other.to_owned())),
    }
}
