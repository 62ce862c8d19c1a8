pub mod prelude {
    pub use super::args::prelude::*;
}

pub mod args;

use crate::prelude::*;
use rtsim_engine::prelude::*;

fn main() {
    let args = match <Args as clap::Parser>::try_parse() {
        Ok(args) => args,
        Err(err) => {
            use clap::error::ErrorKind::*;

            let exit_code = match err.kind() {
                DisplayHelp | DisplayHelpOnMissingArgumentOrSubcommand | DisplayVersion => 0,
                _ => 2,
            };

            err.print().unwrap();
            std::process::exit(exit_code);
        }
    };

    init_tracing(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let parsed = parse_file(std::path::Path::new(&args.taskset.input_file))?;

    let rules = match &args.scheduler.rules_file {
        Some(path) => load(path),
        None => ServerRuleConfig::default(),
    };

    let sim_time = args.scheduler.sim_time.unwrap_or_else(|| SimUtils::hyperperiod(&parsed.tasks));

    tracing::info!(
        algorithm = %args.scheduler.algorithm,
        tasks = parsed.tasks.len(),
        sim_time,
        "starting simulation"
    );

    let mut scheduler = build(
        &args.scheduler.algorithm,
        parsed.tasks,
        parsed.aperiodic,
        parsed.server_cfg,
        sim_time,
        rules,
    )?;

    scheduler.run();
    println!("{}", scheduler.summary_text());

    Ok(())
}
