use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use flate2::Compression;
use flate2::write::GzEncoder;
use pretty_assertions::assert_eq;
use rstest::*;
use tempfile::TempDir;

use simseq_core::{ConfigSource, SampleSet, SamplingConfig, SimSeqError};

#[fixture]
fn config_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

fn write_config(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[rstest]
fn test_baseline_resolution_from_mixed_sources(config_dir: TempDir) {
    let cfg = write_config(
        &config_dir,
        "experiment.cfg",
        "# two samples\n--baseline=samp2,250\nsamp1,seq1,1\nsamp2,seq1,2\n",
    );

    let config = SamplingConfig::from_sources([
        ConfigSource::Baseline("samp1,1000".to_string()),
        ConfigSource::ConfigFile(cfg),
        ConfigSource::Sampling("samp3,seq2,5".to_string()),
    ])
    .unwrap();
    let samples = SampleSet::from_config(&config).unwrap();

    let baselines: Vec<(&str, u64)> = samples
        .iter()
        .map(|s| (s.sample_id(), s.baseline_abundance()))
        .collect();
    assert_eq!(
        baselines,
        vec![("samp1", 1000), ("samp2", 250), ("samp3", 100)]
    );

    let samp2 = samples.get("samp2").unwrap();
    assert_eq!(samp2.absolute_count(&samp2.molecules()[0]), 500);
}

#[rstest]
fn test_gzipped_config_file(config_dir: TempDir) {
    let path = config_dir.path().join("experiment.cfg.gz");
    let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
    encoder
        .write_all(b"--baseline=samp1,20\nsamp1,seq1,3\n")
        .unwrap();
    encoder.finish().unwrap();

    let config = SamplingConfig::from_sources([ConfigSource::ConfigFile(path)]).unwrap();
    let samples = SampleSet::from_config(&config).unwrap();
    let samp1 = samples.get("samp1").unwrap();

    assert_eq!(samp1.total_reads(), 60);
}

#[rstest]
fn test_invalid_identifier_in_config_file(config_dir: TempDir) {
    let cfg = write_config(&config_dir, "bad.cfg", "samp1,seqs/seq1,1\n");

    let config = SamplingConfig::from_sources([ConfigSource::ConfigFile(cfg)]).unwrap();
    let res = SampleSet::from_config(&config);

    assert!(matches!(res, Err(SimSeqError::InvalidIdentifier(id)) if id == "seqs/seq1"));
}
