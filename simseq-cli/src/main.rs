mod lenpick;
mod simulate;
mod tally;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "simseq";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Simulate paired-end RNA-seq experiments from a pool of reference sequences, and summarize the resulting read sets.")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(simulate::cli::create_simulate_cli())
        .subcommand(tally::cli::create_tally_cli())
        .subcommand(lenpick::cli::create_lenpick_cli())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // SIMULATE
        //
        Some((simulate::cli::SIMULATE_CMD, matches)) => {
            simulate::handlers::run_simulate(matches)?;
        }

        //
        // MAPPED READ TALLY
        //
        Some((tally::cli::TALLY_CMD, matches)) => {
            tally::handlers::run_tally(matches)?;
        }

        //
        // PEAK READ LENGTH
        //
        Some((lenpick::cli::LENPICK_CMD, matches)) => {
            lenpick::handlers::run_lenpick(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
