const DEFAULT_AFTER_HELP: &str = "Refer to the crate's documentation for the input file and server-rule config formats";

pub mod prelude {
    pub use super::Args;
}

#[derive(clap::Parser, Debug)]
#[command(after_help=DEFAULT_AFTER_HELP)]
pub struct Args {
    #[command(flatten, next_help_heading = "Task Set Specification")]
    pub taskset: TasksetArgs,

    #[command(flatten, next_help_heading = "Scheduler Specification")]
    pub scheduler: SchedulerArgs,

    /// Raise logging to debug level
    #[arg(short = 'v', long, action = clap::ArgAction::SetTrue)]
    pub verbose: bool,
}

#[derive(clap::Args, Debug)]
pub struct TasksetArgs {
    /// Input task-set file (line-oriented P/A/D records)
    #[arg(short = 'i', value_name = "INPUT FILE")]
    pub input_file: String,
}

#[derive(clap::Args, Debug)]
pub struct SchedulerArgs {
    /// Scheduling algorithm: RMS, DMS, EDF, LLF, BACKGROUND, POLLING, DEFERRABLE, SPORADIC
    #[arg(short = 'a', value_name = "ALGORITHM")]
    pub algorithm: String,

    /// Simulation horizon in ticks (defaults to the task set's hyperperiod)
    #[arg(long = "sim-time", value_name = "TICKS")]
    pub sim_time: Option<u64>,

    /// Server-rule config file (JSON); defaulted when absent or malformed
    #[arg(long = "rules", value_name = "RULES FILE")]
    pub rules_file: Option<std::path::PathBuf>,
}
