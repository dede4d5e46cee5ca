use crate::error::{Result, SeparationError};
use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf, str::FromStr};

pub const ENV_PYTHON: &str = "DEMUCS_PYTHON";
pub const ENV_DEVICE: &str = "DEMUCS_DEVICE";
pub const ENV_OUTPUT_DIR: &str = "DEMUCS_OUTPUT_DIR";
pub const ENV_WORKSPACE: &str = "DEMUCS_WORKSPACE";

/// Where a run stages its input and where the tool writes stems.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkspaceMode {
    /// `<root>/test.wav`, overwritten every call. Calls inside this process
    /// are serialized; other processes sharing the root still race.
    #[default]
    Shared,
    /// A fresh `<root>/job-*/` directory per call.
    PerJob,
}

impl FromStr for WorkspaceMode {
    type Err = SeparationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shared" => Ok(WorkspaceMode::Shared),
            "per-job" | "per_job" | "perjob" => Ok(WorkspaceMode::PerJob),
            other => Err(SeparationError::Config(format!(
                "unknown workspace mode `{other}` (expected `shared` or `per-job`)"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Interpreter that hosts the separation tool.
    pub python: String,
    /// Arguments placed before the tool's own flags.
    pub module_args: Vec<String>,
    /// Compute device passed through `-d`. No fallback is attempted.
    pub device: String,
    pub output_root: PathBuf,
    pub workspace: WorkspaceMode,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            python: "python3".into(),
            module_args: vec!["-m".into(), "demucs.separate".into()],
            device: "cuda".into(),
            output_root: PathBuf::from("out"),
            workspace: WorkspaceMode::Shared,
        }
    }
}

impl AdapterConfig {
    /// Defaults overridden by any `DEMUCS_*` variables that are set.
    /// Fails on the first variable that does not parse.
    pub fn from_env() -> Result<Self> {
        let (cfg, problems) = Self::read_env();
        match problems.into_iter().next() {
            Some(e) => Err(e),
            None => Ok(cfg),
        }
    }

    /// Like [`AdapterConfig::from_env`], but a bad variable only falls back
    /// to its own default; every other override is kept.
    pub fn from_env_lossy() -> Self {
        let (cfg, problems) = Self::read_env();
        for e in problems {
            tracing::warn!("ignoring environment setting: {e}");
        }
        cfg
    }

    fn read_env() -> (Self, Vec<SeparationError>) {
        let mut cfg = Self::default();
        let mut problems = Vec::new();

        if let Ok(python) = env::var(ENV_PYTHON) {
            cfg.python = python;
        }
        if let Ok(device) = env::var(ENV_DEVICE) {
            cfg.device = device;
        }
        if let Ok(dir) = env::var(ENV_OUTPUT_DIR) {
            cfg.output_root = PathBuf::from(dir);
        }
        if let Ok(mode) = env::var(ENV_WORKSPACE) {
            match mode.parse::<WorkspaceMode>() {
                Ok(mode) => cfg.workspace = mode,
                Err(e) => problems.push(e),
            }
        }

        (cfg, problems)
    }

    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    pub fn with_workspace(mut self, mode: WorkspaceMode) -> Self {
        self.workspace = mode;
        self
    }
}
