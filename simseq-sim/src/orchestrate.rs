use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use simseq_core::errors::{Result, SimSeqError};
use simseq_core::models::SampleSet;

use crate::simulator::{ReadSimulator, SimulationJob};

///
/// Turn the sample model into a list of simulator invocations.
///
/// Jobs are ordered by sample, then by molecule registration order. A
/// sequence listed more than once for the same sample yields a single job
/// at its first position, using the abundance of its last entry: both
/// entries would write the same files, so only the last one can survive.
///
pub fn plan_simulations(samples: &SampleSet, dir: &Path) -> Vec<SimulationJob> {
    let mut jobs: Vec<SimulationJob> = Vec::new();

    for sample in samples.iter() {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for molecule in sample.molecules() {
            let read_count = sample.absolute_count(molecule);
            match positions.get(molecule.sequence_id()) {
                Some(&position) => jobs[position].read_count = read_count,
                None => {
                    positions.insert(molecule.sequence_id(), jobs.len());
                    jobs.push(SimulationJob::new(
                        dir,
                        sample.sample_id(),
                        molecule.sequence_id(),
                        read_count,
                    ));
                }
            }
        }
    }

    jobs
}

fn simulation_progress(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} simulations ({eta}) {msg}")
        .map(|style| style.progress_chars("##-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

fn run_job<S: ReadSimulator>(simulator: &S, job: &SimulationJob, pb: &ProgressBar) -> Result<()> {
    log::debug!(
        "simulating {} reads of {} for sample {}",
        job.read_count,
        job.sequence_id,
        job.sample_id
    );
    pb.set_message(format!("{}.{}", job.sample_id, job.sequence_id));
    simulator.simulate(job)?;
    pb.inc(1);
    Ok(())
}

///
/// Run every job through the simulator.
///
/// With `threads <= 1` jobs run one after the other, in order. Otherwise
/// they run on a bounded pool of `threads` workers; once any job fails no
/// further jobs are started and the failure is returned. Either way, all
/// jobs have finished (or been skipped) when this returns.
///
pub fn run_simulations<S: ReadSimulator>(
    simulator: &S,
    jobs: &[SimulationJob],
    threads: usize,
) -> Result<()> {
    let pb = simulation_progress(jobs.len());

    let res = if threads <= 1 {
        jobs.iter().try_for_each(|job| run_job(simulator, job, &pb))
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|err| SimSeqError::WorkerPool(err.to_string()))?;

        let cancelled = AtomicBool::new(false);
        pool.install(|| {
            jobs.par_iter().try_for_each(|job| {
                if cancelled.load(Ordering::Acquire) {
                    return Ok(());
                }
                let res = run_job(simulator, job, &pb);
                if res.is_err() {
                    cancelled.store(true, Ordering::Release);
                }
                res
            })
        })
    };

    match &res {
        Ok(()) => pb.finish_with_message("done"),
        Err(_) => pb.abandon_with_message("failed"),
    }

    res
}
