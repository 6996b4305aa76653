use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::ArgMatches;

use simseq_core::{ConfigSource, SamplingConfig};
use simseq_sim::consts::*;
use simseq_sim::{RunParams, default_tmpdir, run_experiment};

///
/// Collect the sampling configuration in the order it appeared on the
/// command line.
///
/// `--baseline` and `--config-file` occurrences are ordered by their
/// position in argv, so that a later override (from either source) wins.
/// Positional tuples come last.
///
pub fn collect_config_sources(matches: &ArgMatches) -> Vec<ConfigSource> {
    let mut ordered: Vec<(usize, ConfigSource)> = Vec::new();

    if let (Some(values), Some(indices)) = (
        matches.get_many::<String>("baseline"),
        matches.indices_of("baseline"),
    ) {
        ordered.extend(
            indices
                .zip(values)
                .map(|(index, value)| (index, ConfigSource::Baseline(value.clone()))),
        );
    }

    if let (Some(values), Some(indices)) = (
        matches.get_many::<PathBuf>("config-file"),
        matches.indices_of("config-file"),
    ) {
        ordered.extend(
            indices
                .zip(values)
                .map(|(index, value)| (index, ConfigSource::ConfigFile(value.clone()))),
        );
    }

    ordered.sort_by_key(|(index, _)| *index);

    let mut sources: Vec<ConfigSource> = ordered.into_iter().map(|(_, source)| source).collect();
    if let Some(values) = matches.get_many::<String>("sampling") {
        sources.extend(values.map(|value| ConfigSource::Sampling(value.clone())));
    }

    sources
}

pub fn run_params(matches: &ArgMatches) -> RunParams {
    let timeout = matches
        .get_one::<u64>("timeout")
        .copied()
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    RunParams {
        input: matches.get_one::<PathBuf>("input").cloned(),
        tmpdir: matches
            .get_one::<PathBuf>("tmpdir")
            .cloned()
            .unwrap_or_else(default_tmpdir),
        outdir: matches
            .get_one::<PathBuf>("outdir")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTDIR)),
        simulator: matches
            .get_one::<String>("simulator")
            .cloned()
            .unwrap_or_else(|| DEFAULT_SIMULATOR.to_string()),
        simulator_opts: matches
            .get_one::<String>("wgsim-opts")
            .cloned()
            .unwrap_or_else(|| DEFAULT_SIMULATOR_OPTS.to_string()),
        threads: matches
            .get_one::<usize>("threads")
            .copied()
            .unwrap_or(DEFAULT_THREADS)
            .max(1),
        timeout: (timeout > 0).then(|| Duration::from_secs(timeout)),
        keep_tmpdir: matches.get_flag("keep-tmpdir"),
    }
}

pub fn run_simulate(matches: &ArgMatches) -> Result<()> {
    let config = SamplingConfig::from_sources(collect_config_sources(matches))?;
    let params = run_params(matches);

    let summary = run_experiment(&config, &params)?;
    log::info!(
        "Simulated {} reads for {} samples ({} simulator runs)",
        summary.reads_requested,
        summary.samples,
        summary.invocations
    );
    for output in &summary.outputs {
        log::debug!("wrote {}", output.display());
    }

    Ok(())
}
