use crate::{
    config::{AdapterConfig, WorkspaceMode},
    error::Result,
};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

/// Name the staged input is written under. The tool derives its output
/// subdirectory from this file stem.
pub const INPUT_FILE_NAME: &str = "test.wav";

static SHARED_ROOT: Mutex<()> = Mutex::new(());

/// Staging area for one run. In shared mode this holds a process-wide lock
/// until dropped, so the input file and output tree are not overwritten by
/// another call mid-run.
#[derive(Debug)]
pub struct Workspace {
    dir: PathBuf,
    input: PathBuf,
    _shared: Option<MutexGuard<'static, ()>>,
}

impl Workspace {
    pub fn open(config: &AdapterConfig) -> Result<Self> {
        fs::create_dir_all(&config.output_root)?;

        match config.workspace {
            WorkspaceMode::Shared => {
                let guard = SHARED_ROOT.lock().unwrap_or_else(|p| p.into_inner());
                Ok(Self::at(config.output_root.clone(), Some(guard)))
            }
            WorkspaceMode::PerJob => {
                let dir = tempfile::Builder::new()
                    .prefix("job-")
                    .tempdir_in(&config.output_root)?
                    .keep();
                Ok(Self::at(dir, None))
            }
        }
    }

    fn at(dir: PathBuf, guard: Option<MutexGuard<'static, ()>>) -> Self {
        let input = dir.join(INPUT_FILE_NAME);
        Self {
            dir,
            input,
            _shared: guard,
        }
    }

    /// Directory passed to the tool with `-o`.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn input_path(&self) -> &Path {
        &self.input
    }
}
