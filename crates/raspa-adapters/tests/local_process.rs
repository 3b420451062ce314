#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};

use raspa_adapters::executors::local_process::{RESTART_INITIAL_DIR, STDOUT_FILE};
use raspa_adapters::input_file::SIMULATION_INPUT;
use raspa_adapters::LocalProcessExecutor;
use raspa_core::{CalcOptions, CalculationExecutor, CodeRef, ConvergenceLoopWorkflow, IterationInput, Parameters,
                 StructureRef, WorkflowError, WorkflowInputs};
use serde_json::json;
use uuid::Uuid;

/// Script que imita a RASPA: escribe Output/ y Restart/ y deja constancia de
/// si recibió un RestartInitial.
const FAKE_RASPA: &str = r#"#!/bin/sh
set -e
test -f simulation.input
mkdir -p Output/System_0 Restart/System_0
if [ -d RestartInitial ]; then echo "restarted" > Output/System_0/output.data; else echo "fresh" > Output/System_0/output.data; fi
echo "state" > Restart/System_0/restart.data
echo "Simulation finished"
"#;

const SHELL: &str = "/bin/sh";

/// Los scripts se ejecutan como argumento de `/bin/sh` en lugar de marcarlos
/// ejecutables: evita ETXTBSY cuando otro test hace fork mientras el fichero
/// sigue abierto.
fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).expect("write script");
    path
}

fn executor_for(scratch: &Path, script: &Path) -> LocalProcessExecutor {
    LocalProcessExecutor::new(scratch).with_args([script.display().to_string()])
}

fn input_for(cif: &Path, options: CalcOptions) -> IterationInput {
    let mut parameters = Parameters::new();
    parameters.insert("GeneralSettings".into(), json!({"NumberOfCycles": 10}));
    IterationInput { workflow_id: Uuid::new_v4(),
                     iteration: 1,
                     code: CodeRef::new("fake-raspa", SHELL),
                     structure: StructureRef::new("IRMOF-1", cif),
                     parameters,
                     options,
                     retrieved_parent_folder: None }
}

#[tokio::test]
async fn runs_job_in_its_own_directory_and_retrieves_it() {
    let tools = tempfile::tempdir().expect("tools");
    let scratch = tempfile::tempdir().expect("scratch");
    let script = write_script(tools.path(), "simulate", FAKE_RASPA);
    let cif = tools.path().join("IRMOF-1.cif");
    fs::write(&cif, "data_IRMOF-1").expect("cif");

    let executor = executor_for(scratch.path(), &script);
    let outputs = executor.submit(&input_for(&cif, CalcOptions::default())).await.expect("job ok");
    let folder = outputs.retrieved.expect("retrieved");

    assert_eq!(folder.path, scratch.path().join(outputs.job_id.to_string()));
    assert!(folder.contains(SIMULATION_INPUT));
    assert!(folder.contains("IRMOF-1.cif"));
    assert!(folder.contains("Output/System_0/output.data"));
    assert!(folder.contains(STDOUT_FILE));
    let input_text = fs::read_to_string(folder.path.join(SIMULATION_INPUT)).expect("input");
    assert_eq!(input_text, "NumberOfCycles 10\n");
    let data = fs::read_to_string(folder.path.join("Output/System_0/output.data")).expect("data");
    assert_eq!(data.trim(), "fresh");
}

#[tokio::test]
async fn parent_restart_is_staged_as_restart_initial() {
    let tools = tempfile::tempdir().expect("tools");
    let scratch = tempfile::tempdir().expect("scratch");
    let script = write_script(tools.path(), "simulate", FAKE_RASPA);
    let cif = tools.path().join("IRMOF-1.cif");
    fs::write(&cif, "data_IRMOF-1").expect("cif");
    let executor = executor_for(scratch.path(), &script);

    let first = executor.submit(&input_for(&cif, CalcOptions::default())).await.expect("first");
    let mut second_input = input_for(&cif, CalcOptions::default());
    second_input.iteration = 2;
    second_input.retrieved_parent_folder = first.retrieved.clone();

    let second = executor.submit(&second_input).await.expect("second");
    let folder = second.retrieved.expect("retrieved");
    assert!(folder.contains(&format!("{RESTART_INITIAL_DIR}/System_0/restart.data")));
    let data = fs::read_to_string(folder.path.join("Output/System_0/output.data")).expect("data");
    assert_eq!(data.trim(), "restarted");
}

#[tokio::test]
async fn non_zero_exit_becomes_execution_error() {
    let tools = tempfile::tempdir().expect("tools");
    let scratch = tempfile::tempdir().expect("scratch");
    let script = write_script(tools.path(), "broken", "#!/bin/sh\necho 'Error: missing force field' >&2\nexit 3\n");
    let cif = tools.path().join("IRMOF-1.cif");
    fs::write(&cif, "data_IRMOF-1").expect("cif");

    let mut wf = ConvergenceLoopWorkflow::builder(executor_for(scratch.path(), &script)).build();
    let err = wf.run(WorkflowInputs::new(CodeRef::new("broken", SHELL), StructureRef::new("IRMOF-1", cif)))
                .await
                .expect_err("must fail");
    match err {
        WorkflowError::Execution(msg) => assert!(msg.contains("missing force field"), "unexpected message: {msg}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn wallclock_limit_kills_the_job() {
    let tools = tempfile::tempdir().expect("tools");
    let scratch = tempfile::tempdir().expect("scratch");
    let script = write_script(tools.path(), "slow", "#!/bin/sh\nsleep 5\n");
    let cif = tools.path().join("IRMOF-1.cif");
    fs::write(&cif, "data_IRMOF-1").expect("cif");
    let options = CalcOptions { max_wallclock_seconds: 1,
                                ..CalcOptions::default() };

    let executor = executor_for(scratch.path(), &script);
    let err = executor.submit(&input_for(&cif, options)).await.expect_err("timeout");
    assert!(err.to_string().contains("max_wallclock_seconds=1"));
}

#[tokio::test]
async fn missing_structure_file_fails_before_launch() {
    let tools = tempfile::tempdir().expect("tools");
    let scratch = tempfile::tempdir().expect("scratch");
    let script = write_script(tools.path(), "simulate", FAKE_RASPA);

    let executor = executor_for(scratch.path(), &script);
    let err = executor.submit(&input_for(&tools.path().join("absent.cif"), CalcOptions::default()))
                      .await
                      .expect_err("missing cif");
    assert!(err.to_string().contains("absent.cif"));
}

#[tokio::test]
async fn structure_name_cannot_leave_the_job_directory() {
    let tools = tempfile::tempdir().expect("tools");
    let scratch = tempfile::tempdir().expect("scratch");
    let jobs = scratch.path().join("jobs");
    let script = write_script(tools.path(), "simulate", FAKE_RASPA);
    let cif = tools.path().join("IRMOF-1.cif");
    fs::write(&cif, "data_IRMOF-1").expect("cif");

    let mut input = input_for(&cif, CalcOptions::default());
    input.structure = StructureRef::new("../../escaped", &cif);
    let err = executor_for(&jobs, &script).submit(&input).await.expect_err("unsafe name");
    assert!(err.to_string().contains("not a plain file name"), "unexpected error: {err}");
    assert!(!scratch.path().join("escaped.cif").exists());
}
