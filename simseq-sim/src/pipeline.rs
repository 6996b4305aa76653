use std::io::BufRead;
use std::path::PathBuf;

use simseq_core::config::SamplingConfig;
use simseq_core::errors::Result;
use simseq_core::models::SampleSet;
use simseq_core::utils::get_input_reader;
use simseq_io::{ensure_references, split_sequences};

use crate::aggregate::aggregate_samples;
use crate::orchestrate::{plan_simulations, run_simulations};
use crate::params::RunParams;
use crate::scratch::ScratchDir;
use crate::simulator::{ReadSimulator, Wgsim};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentSummary {
    pub samples: usize,
    pub invocations: usize,
    pub reads_requested: u64,
    pub outputs: Vec<PathBuf>,
}

///
/// Simulate every sample of an already built sample model.
///
/// The reference pool is split into the scratch directory, every sampled
/// sequence is checked to be present, the simulator is run once per
/// (sample, sequence) pair and finally the per-molecule reads are merged
/// into per-sample files. The scratch directory is removed on the way out,
/// whether the run succeeded or not.
///
pub fn simulate_experiment<S, R>(
    samples: &SampleSet,
    params: &RunParams,
    simulator: &S,
    input: R,
) -> Result<ExperimentSummary>
where
    S: ReadSimulator,
    R: BufRead,
{
    let scratch = ScratchDir::create(&params.tmpdir, params.keep_tmpdir)?;

    let wanted = samples.sequence_ids();
    let written = split_sequences(input, scratch.path(), &wanted)?;
    ensure_references(&wanted, &written)?;
    log::info!(
        "extracted {} reference sequences into {:?}",
        written.len(),
        scratch.path()
    );

    let jobs = plan_simulations(samples, scratch.path());
    let reads_requested = jobs
        .iter()
        .fold(0u64, |total, job| total.saturating_add(job.read_count));
    log::info!(
        "simulating {} reads over {} invocations for {} samples",
        reads_requested,
        jobs.len(),
        samples.len()
    );

    run_simulations(simulator, &jobs, params.threads)?;
    let outputs = aggregate_samples(samples, &jobs, &params.outdir)?;

    Ok(ExperimentSummary {
        samples: samples.len(),
        invocations: jobs.len(),
        reads_requested,
        outputs,
    })
}

///
/// Run a full experiment with the simulator and input named in `params`.
///
/// The sample model is built and the simulator located before anything is
/// written to disk, so configuration mistakes and a missing tool abort the
/// run without side effects.
///
pub fn run_experiment(config: &SamplingConfig, params: &RunParams) -> Result<ExperimentSummary> {
    let samples = SampleSet::from_config(config)?;
    let simulator = Wgsim::from_params(params)?;
    log::debug!("using simulator {:?}", simulator.program());

    let input = get_input_reader(params.input.as_deref())?;
    simulate_experiment(&samples, params, &simulator, input)
}
