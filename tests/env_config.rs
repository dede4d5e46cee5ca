//! Environment variables are process-wide, so everything touching them
//! lives in this one test binary and runs as a single test.

use demucs_stems::{
    config::{ENV_DEVICE, ENV_OUTPUT_DIR, ENV_PYTHON, ENV_WORKSPACE},
    run_separation, AdapterConfig, AudioData, WorkspaceMode,
};
use std::{env, path::PathBuf};
use tempfile::tempdir;

fn clear_all() {
    for var in [ENV_PYTHON, ENV_DEVICE, ENV_OUTPUT_DIR, ENV_WORKSPACE] {
        env::remove_var(var);
    }
}

#[test]
fn environment_overrides_and_free_entry_point() {
    clear_all();
    let defaults = AdapterConfig::from_env().unwrap();
    assert_eq!(defaults.python, "python3");
    assert_eq!(defaults.device, "cuda");
    assert_eq!(defaults.output_root, PathBuf::from("out"));
    assert_eq!(defaults.workspace, WorkspaceMode::Shared);

    let tmp = tempdir().unwrap();
    let root = tmp.path().join("stems");
    env::set_var(ENV_PYTHON, "/nonexistent/bin/python-demucs");
    env::set_var(ENV_DEVICE, "cpu");
    env::set_var(ENV_OUTPUT_DIR, &root);
    env::set_var(ENV_WORKSPACE, "per-job");

    let cfg = AdapterConfig::from_env().unwrap();
    assert_eq!(cfg.python, "/nonexistent/bin/python-demucs");
    assert_eq!(cfg.device, "cpu");
    assert_eq!(cfg.output_root, root);
    assert_eq!(cfg.workspace, WorkspaceMode::PerJob);

    // A bad workspace value fails strict loading but spares the other fields.
    env::set_var(ENV_WORKSPACE, "scratch");
    let err = AdapterConfig::from_env().unwrap_err();
    assert!(err.to_string().contains("scratch"), "got: {err}");

    let lossy = AdapterConfig::from_env_lossy();
    assert_eq!(lossy.python, "/nonexistent/bin/python-demucs");
    assert_eq!(lossy.device, "cpu");
    assert_eq!(lossy.output_root, root);
    assert_eq!(lossy.workspace, WorkspaceMode::Shared);

    // The free function picks up the same overrides and absorbs the
    // missing interpreter.
    let audio = AudioData {
        samples: vec![0.0; 256],
        sample_rate: 44_100,
        channels: 2,
    };
    let result = run_separation(&audio, "htdemucs_6s", 1, 0.25);
    assert_eq!(result.slots().len(), 6);
    assert_eq!(result.into_vec(), vec![None; 6]);
    assert!(root.join("test.wav").is_file());

    clear_all();
}
