// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

pub mod commands;

fn build_cli() -> Command {
    Command::new("plan-runner")
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(true)
        .about(
            "Batch executor for load-test plans: runs every discovered plan through the \
             external engine and aggregates the results into one report.",
        )
        .subcommand(
            Command::new("run")
                .about("Execute every discovered plan and write the aggregate report")
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help("Path to the batch configuration file")
                        .value_name("CONFIG")
                        .default_value("BatchConfig.toml")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("jobs")
                        .short('j')
                        .long("jobs")
                        .help("Maximum number of plans executing concurrently")
                        .value_name("JOBS")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("plans-dir")
                        .long("plans-dir")
                        .help("Override the configured plan directory")
                        .value_name("PLANS_DIR")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("init")
                .about("Create a batch configuration file")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Where to write the configuration file")
                        .value_name("OUTPUT")
                        .default_value("BatchConfig.toml")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help("Overwrite an existing configuration file")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help("Write the default configuration without launching the prompts")
                        .action(ArgAction::SetTrue),
                ),
        )
}

pub async fn run() -> Result<()> {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            let config = run_matches
                .get_one::<PathBuf>("config")
                .unwrap() // Has default
                .clone();
            let jobs = run_matches.get_one::<usize>("jobs").copied();
            let plans_dir = run_matches.get_one::<PathBuf>("plans-dir").cloned();

            commands::run::execute(config, jobs, plans_dir).await?;
        }
        Some(("init", init_matches)) => {
            let output = init_matches
                .get_one::<PathBuf>("output")
                .unwrap() // Has default
                .clone();
            let force = init_matches.get_flag("force");
            let non_interactive = init_matches.get_flag("non-interactive");

            commands::init::execute(output, force, non_interactive)?;
        }
        _ => {
            // No subcommand given; clap has already printed the help text.
        }
    }
    Ok(())
}
