//! Server-rule configuration: the flags that distinguish Polling, Deferrable
//! and Sporadic budget bookkeeping from one another, plus a permissive JSON
//! loader for them (§6).

pub mod prelude {
    pub use super::{ServerRuleConfig, PollingConfig, DeferrableConfig, SporadicConfig, load};
}

#[derive(Clone, Copy, Debug)]
#[derive(serde::Deserialize)]
pub struct PollingConfig {
    #[serde(default = "PollingConfig::default_budget_if_aperiodic_ready")]
    pub budget_if_aperiodic_ready: bool,
}

impl PollingConfig {
    fn default_budget_if_aperiodic_ready() -> bool { true }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self { budget_if_aperiodic_ready: Self::default_budget_if_aperiodic_ready() }
    }
}

#[derive(Clone, Copy, Debug)]
#[derive(serde::Deserialize)]
pub struct DeferrableConfig {
    #[serde(default = "DeferrableConfig::default_reset_budget_each_period")]
    pub reset_budget_each_period: bool,
}

impl DeferrableConfig {
    fn default_reset_budget_each_period() -> bool { true }
}

impl Default for DeferrableConfig {
    fn default() -> Self {
        Self { reset_budget_each_period: Self::default_reset_budget_each_period() }
    }
}

#[derive(Clone, Copy, Debug)]
#[derive(serde::Deserialize)]
pub struct SporadicConfig {
    #[serde(default = "SporadicConfig::default_replenish_amount")]
    pub replenish_amount: u64,
    #[serde(default = "SporadicConfig::default_replenish_delay_factor")]
    pub replenish_delay_factor: f64,
}

impl SporadicConfig {
    fn default_replenish_amount() -> u64 { 1 }
    fn default_replenish_delay_factor() -> f64 { 1.0 }
}

impl Default for SporadicConfig {
    fn default() -> Self {
        Self {
            replenish_amount: Self::default_replenish_amount(),
            replenish_delay_factor: Self::default_replenish_delay_factor(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
#[derive(serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct ServerRuleConfig {
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub deferrable: DeferrableConfig,
    #[serde(default)]
    pub sporadic: SporadicConfig,
}

#[derive(serde::Deserialize)]
struct ServerRuleFile {
    #[serde(default)]
    servers: ServerRuleConfig,
}

/// Load a `ServerRuleConfig` from the JSON file at `path`.
///
/// A missing file or malformed JSON is not fatal: it degrades to
/// [`ServerRuleConfig::default`] with a warning on the tracing diagnostic
/// channel, matching §7's "config-file problems ... never abort simulation".
pub fn load(path: &std::path::Path) -> ServerRuleConfig {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "could not read server-rule config, using defaults");
            return ServerRuleConfig::default();
        }
    };

    match serde_json::from_str::<ServerRuleFile>(&data) {
        Ok(file) => file.servers,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "malformed server-rule config, using defaults");
            ServerRuleConfig::default()
        }
    }
}
