use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use pretty_assertions::assert_eq;
use rstest::*;
use tempfile::TempDir;

use simseq_core::{ConfigSource, SampleSet, SamplingConfig, SimSeqError};
use simseq_sim::{ReadSimulator, RunParams, SimulationJob, Wgsim, run_experiment, simulate_experiment};

const POOL: &str = ">seq1 first\nACGTACGT\n>seq2 second\nGGGGCCCC\n>seq3\nTTTT\n";

/// Writes one fake read per file and remembers what it was asked to do.
struct FakeSimulator {
    calls: Mutex<Vec<(String, String, u64)>>,
    fail: bool,
}

impl FakeSimulator {
    fn new(fail: bool) -> Self {
        FakeSimulator {
            calls: Mutex::new(Vec::new()),
            fail,
        }
    }

    fn calls(&self) -> Vec<(String, String, u64)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ReadSimulator for FakeSimulator {
    fn simulate(&self, job: &SimulationJob) -> simseq_core::Result<()> {
        self.calls.lock().unwrap().push((
            job.sample_id.clone(),
            job.sequence_id.clone(),
            job.read_count,
        ));
        assert!(job.reference.exists(), "reference {:?} missing", job.reference);

        if self.fail {
            return Err(SimSeqError::SimulationTool {
                sample_id: job.sample_id.clone(),
                sequence_id: job.sequence_id.clone(),
                reason: "exit status: 1".to_string(),
            });
        }

        let name = format!("{}.{}", job.sample_id, job.sequence_id);
        fs::write(&job.forward, format!("@{name}/1 n={}\n", job.read_count)).unwrap();
        fs::write(&job.reverse, format!("@{name}/2 n={}\n", job.read_count)).unwrap();
        Ok(())
    }
}

struct Workspace {
    _root: TempDir,
    params: RunParams,
}

#[fixture]
fn workspace() -> Workspace {
    let root = tempfile::tempdir().unwrap();
    let params = RunParams {
        tmpdir: root.path().join("scratch"),
        outdir: root.path().join("out"),
        ..RunParams::default()
    };
    Workspace {
        _root: root,
        params,
    }
}

fn build(sources: Vec<ConfigSource>) -> SampleSet {
    let config = SamplingConfig::from_sources(sources).unwrap();
    SampleSet::from_config(&config).unwrap()
}

fn sampling(raw: &str) -> ConfigSource {
    ConfigSource::Sampling(raw.to_string())
}

fn output_files(outdir: &Path) -> Vec<String> {
    if !outdir.exists() {
        return Vec::new();
    }
    let mut names: Vec<String> = fs::read_dir(outdir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[rstest]
fn test_default_baseline_single_invocation(workspace: Workspace) {
    let samples = build(vec![sampling("samp1,seq1,1")]);
    let simulator = FakeSimulator::new(false);

    let summary =
        simulate_experiment(&samples, &workspace.params, &simulator, POOL.as_bytes()).unwrap();

    assert_eq!(
        simulator.calls(),
        vec![("samp1".to_string(), "seq1".to_string(), 100)]
    );
    assert_eq!(summary.invocations, 1);
    assert_eq!(summary.reads_requested, 100);
    assert_eq!(
        output_files(&workspace.params.outdir),
        vec!["samp1.1.fq", "samp1.2.fq"]
    );
    assert!(!workspace.params.tmpdir.exists());
}

#[rstest]
fn test_baseline_override_merges_molecules(workspace: Workspace) {
    let samples = build(vec![
        sampling("samp1,seq1,1"),
        sampling("samp1,seq2,4"),
        ConfigSource::Baseline("samp1,500".to_string()),
    ]);
    let simulator = FakeSimulator::new(false);

    simulate_experiment(&samples, &workspace.params, &simulator, POOL.as_bytes()).unwrap();

    let counts: Vec<u64> = simulator.calls().iter().map(|c| c.2).collect();
    assert_eq!(counts, vec![500, 2000]);
    assert_eq!(
        fs::read_to_string(workspace.params.outdir.join("samp1.1.fq")).unwrap(),
        "@samp1.seq1/1 n=500\n@samp1.seq2/1 n=2000\n"
    );
    assert_eq!(
        fs::read_to_string(workspace.params.outdir.join("samp1.2.fq")).unwrap(),
        "@samp1.seq1/2 n=500\n@samp1.seq2/2 n=2000\n"
    );
}

#[rstest]
fn test_unsafe_identifier_aborts_before_any_work(workspace: Workspace) {
    let config = SamplingConfig::from_sources([sampling("samp1,seqs/seq1,1")]).unwrap();

    let res = run_experiment(&config, &workspace.params);

    assert!(matches!(res, Err(SimSeqError::InvalidIdentifier(_))));
    assert!(!workspace.params.tmpdir.exists());
    assert!(!workspace.params.outdir.exists());
}

#[rstest]
fn test_colliding_file_names_abort_before_any_work(workspace: Workspace) {
    let config =
        SamplingConfig::from_sources([sampling("a.b,c,1"), sampling("a,b.c,1")]).unwrap();

    let res = run_experiment(&config, &workspace.params);

    assert!(matches!(res, Err(SimSeqError::ConfigFormat { .. })));
    assert!(!workspace.params.tmpdir.exists());
    assert!(!workspace.params.outdir.exists());
}

#[rstest]
fn test_dotted_ids_keep_their_own_reads(workspace: Workspace) {
    let pool = ">c\nACGT\n>b.c\nGGGG\n>d\nTTTT\n";
    let samples = build(vec![sampling("a.b,c,1"), sampling("a,d,1")]);

    simulate_experiment(&samples, &workspace.params, &FakeSimulator::new(false), pool.as_bytes())
        .unwrap();

    assert_eq!(
        fs::read_to_string(workspace.params.outdir.join("a.b.1.fq")).unwrap(),
        "@a.b.c/1 n=100\n"
    );
    assert_eq!(
        fs::read_to_string(workspace.params.outdir.join("a.1.fq")).unwrap(),
        "@a.d/1 n=100\n"
    );
}

#[rstest]
fn test_tool_failure_leaves_no_outputs(workspace: Workspace) {
    let samples = build(vec![sampling("samp1,seq1,1"), sampling("samp2,seq2,1")]);
    let simulator = FakeSimulator::new(true);

    let res = simulate_experiment(&samples, &workspace.params, &simulator, POOL.as_bytes());

    assert!(matches!(res, Err(SimSeqError::SimulationTool { .. })));
    assert_eq!(simulator.calls().len(), 1);
    assert!(output_files(&workspace.params.outdir).is_empty());
    assert!(!workspace.params.tmpdir.exists());
}

#[rstest]
fn test_missing_reference_sequence(workspace: Workspace) {
    let samples = build(vec![sampling("samp1,seq1,1"), sampling("samp1,seq9,1")]);
    let simulator = FakeSimulator::new(false);

    let res = simulate_experiment(&samples, &workspace.params, &simulator, POOL.as_bytes());

    assert!(matches!(res, Err(SimSeqError::MissingSequence(id)) if id == "seq9"));
    assert!(simulator.calls().is_empty());
    assert!(!workspace.params.tmpdir.exists());
}

#[rstest]
fn test_parallel_run_matches_sequential(workspace: Workspace) {
    let samples = build(vec![
        sampling("samp1,seq1,1"),
        sampling("samp1,seq2,2"),
        sampling("samp1,seq3,3"),
        sampling("samp2,seq3,1"),
    ]);
    let params = RunParams {
        threads: 3,
        ..workspace.params.clone()
    };
    let simulator = FakeSimulator::new(false);

    simulate_experiment(&samples, &params, &simulator, POOL.as_bytes()).unwrap();

    assert_eq!(
        fs::read_to_string(params.outdir.join("samp1.1.fq")).unwrap(),
        "@samp1.seq1/1 n=100\n@samp1.seq2/1 n=200\n@samp1.seq3/1 n=300\n"
    );
}

#[rstest]
fn test_keep_tmpdir(workspace: Workspace) {
    let samples = build(vec![sampling("samp1,seq1,2")]);
    let params = RunParams {
        keep_tmpdir: true,
        ..workspace.params.clone()
    };

    simulate_experiment(&samples, &params, &FakeSimulator::new(false), POOL.as_bytes()).unwrap();

    assert!(params.tmpdir.join("seq1.fa").exists());
    assert!(params.tmpdir.join("samp1.seq1.1.fq").exists());
}

#[rstest]
fn test_missing_tool_aborts_before_any_work(workspace: Workspace) {
    let config = SamplingConfig::from_sources([sampling("samp1,seq1,1")]).unwrap();
    let params = RunParams {
        simulator: "simseq-no-such-simulator".to_string(),
        ..workspace.params.clone()
    };

    let res = run_experiment(&config, &params);

    assert!(matches!(res, Err(SimSeqError::ToolNotFound(_))));
    assert!(!params.tmpdir.exists());
}

//
// The tests below drive a real child process. The "simulator" is a small
// POSIX shell script run through `sh`, so the script itself never needs to
// be executable.
//
#[cfg(unix)]
mod process {
    use super::*;
    use pretty_assertions::assert_eq;

    const FAKE_WGSIM: &str = r#"
n=""
while [ $# -gt 3 ]; do
    if [ "$1" = "-N" ]; then n="$2"; fi
    shift
done
name=$(basename "$1" .fa)
printf '@%s n=%s\n' "$name" "$n" > "$2"
printf '@%s n=%s\n' "$name" "$n" > "$3"
"#;

    const FAILING_WGSIM: &str = "echo 'wgsim: bad option' >&2\nexit 3\n";

    const SLOW_WGSIM: &str = "exec sleep 5\n";

    fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    fn shell_simulator(script: &Path, timeout: Option<Duration>) -> Wgsim {
        Wgsim::new("sh", &format!("{} -d 270", script.display()), timeout).unwrap()
    }

    #[rstest]
    fn test_counts_reach_the_tool(workspace: Workspace) {
        let tools = tempfile::tempdir().unwrap();
        let simulator = shell_simulator(&script(tools.path(), "wgsim.sh", FAKE_WGSIM), None);
        let samples = build(vec![
            sampling("samp1,seq1,1"),
            sampling("samp1,seq2,4"),
            ConfigSource::Baseline("samp1,500".to_string()),
        ]);

        simulate_experiment(&samples, &workspace.params, &simulator, POOL.as_bytes()).unwrap();

        assert_eq!(
            fs::read_to_string(workspace.params.outdir.join("samp1.1.fq")).unwrap(),
            "@seq1 n=500\n@seq2 n=2000\n"
        );
    }

    #[rstest]
    fn test_zero_count_still_invokes_the_tool(workspace: Workspace) {
        let tools = tempfile::tempdir().unwrap();
        let simulator = shell_simulator(&script(tools.path(), "wgsim.sh", FAKE_WGSIM), None);
        let samples = build(vec![sampling("samp1,seq1,0")]);

        simulate_experiment(&samples, &workspace.params, &simulator, POOL.as_bytes()).unwrap();

        assert_eq!(
            fs::read_to_string(workspace.params.outdir.join("samp1.2.fq")).unwrap(),
            "@seq1 n=0\n"
        );
    }

    #[rstest]
    fn test_non_zero_exit(workspace: Workspace) {
        let tools = tempfile::tempdir().unwrap();
        let simulator = shell_simulator(&script(tools.path(), "wgsim.sh", FAILING_WGSIM), None);
        let samples = build(vec![sampling("samp1,seq1,1")]);

        let res = simulate_experiment(&samples, &workspace.params, &simulator, POOL.as_bytes());

        match res {
            Err(SimSeqError::SimulationTool { reason, .. }) => {
                assert!(reason.contains("wgsim: bad option"), "{reason}");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(output_files(&workspace.params.outdir).is_empty());
        assert!(!workspace.params.tmpdir.exists());
    }

    #[rstest]
    fn test_timeout(workspace: Workspace) {
        let tools = tempfile::tempdir().unwrap();
        let simulator = shell_simulator(
            &script(tools.path(), "wgsim.sh", SLOW_WGSIM),
            Some(Duration::from_millis(200)),
        );
        let samples = build(vec![sampling("samp1,seq1,1")]);

        let res = simulate_experiment(&samples, &workspace.params, &simulator, POOL.as_bytes());

        match res {
            Err(SimSeqError::SimulationTool { reason, .. }) => {
                assert!(reason.contains("timed out"), "{reason}");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
