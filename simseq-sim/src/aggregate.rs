use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use simseq_core::errors::{FsContext, Result};
use simseq_core::models::SampleSet;

use crate::consts::{FORWARD_READS_SUFFIX, REVERSE_READS_SUFFIX};
use crate::simulator::SimulationJob;

/// `<outdir>/<sample>.1.fq` and `<outdir>/<sample>.2.fq`
pub fn sample_output_paths(outdir: &Path, sample_id: &str) -> (PathBuf, PathBuf) {
    (
        outdir.join(format!("{sample_id}.{FORWARD_READS_SUFFIX}")),
        outdir.join(format!("{sample_id}.{REVERSE_READS_SUFFIX}")),
    )
}

///
/// Concatenate `inputs`, in order, into `output`. Returns the number of
/// bytes written.
///
pub fn concatenate_files<'a, I>(inputs: I, output: &Path) -> Result<u64>
where
    I: IntoIterator<Item = &'a Path>,
{
    let file =
        File::create(output).fs_context(|| format!("failed to create output file {:?}", output))?;
    let mut writer = BufWriter::new(file);

    let mut total = 0;
    for input in inputs {
        let mut reader =
            File::open(input).fs_context(|| format!("failed to open read file {:?}", input))?;
        total += io::copy(&mut reader, &mut writer)
            .fs_context(|| format!("failed to append {:?} to {:?}", input, output))?;
    }
    writer
        .flush()
        .fs_context(|| format!("failed to write output file {:?}", output))?;

    Ok(total)
}

fn aggregate_into(
    samples: &SampleSet,
    jobs: &[SimulationJob],
    outdir: &Path,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    for sample in samples.iter() {
        let sample_jobs: Vec<&SimulationJob> = jobs
            .iter()
            .filter(|job| job.sample_id == sample.sample_id())
            .collect();
        let (forward, reverse) = sample_output_paths(outdir, sample.sample_id());

        let stage = format!("aggregating sample {}", sample.sample_id());

        written.push(forward.clone());
        concatenate_files(sample_jobs.iter().map(|job| job.forward.as_path()), &forward)
            .map_err(|err| err.in_stage(&stage))?;

        written.push(reverse.clone());
        concatenate_files(sample_jobs.iter().map(|job| job.reverse.as_path()), &reverse)
            .map_err(|err| err.in_stage(&stage))?;

        log::info!(
            "wrote {} and {} ({} molecules)",
            forward.display(),
            reverse.display(),
            sample_jobs.len()
        );
    }

    Ok(())
}

///
/// Merge the per-molecule read files of every sample into one pair of
/// per-sample files in `outdir`.
///
/// Each sample's files are concatenated in the order its molecules were
/// registered. If anything fails, every output file written by this call
/// is removed again so no partial results are left behind.
///
pub fn aggregate_samples(
    samples: &SampleSet,
    jobs: &[SimulationJob],
    outdir: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(outdir)
        .fs_context(|| format!("failed to create output directory {:?}", outdir))?;

    let mut written: Vec<PathBuf> = Vec::new();
    if let Err(err) = aggregate_into(samples, jobs, outdir, &mut written) {
        for path in &written {
            if let Err(cleanup_err) = fs::remove_file(path) {
                if cleanup_err.kind() != io::ErrorKind::NotFound {
                    log::warn!("failed to remove partial output {:?}: {}", path, cleanup_err);
                }
            }
        }
        return Err(err);
    }

    Ok(written)
}
