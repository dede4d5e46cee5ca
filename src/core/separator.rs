use crate::{
    config::AdapterConfig,
    core::{
        audio::write_audio,
        command::DemucsCommand,
        layout::collect_stems,
        runner::{ProcessRunner, ToolRunner},
    },
    io::{
        progress::{emit_stage, JobStage},
        workspace::Workspace,
    },
    types::{AudioData, SeparateOptions, SeparationOutcome, SeparationResult},
};

/// Stages audio, runs the separation tool and gathers its stems.
///
/// Never fails: every problem ends up as a [`SeparationOutcome`] variant
/// and a log line.
pub struct Separator<R = ProcessRunner> {
    config: AdapterConfig,
    runner: R,
}

impl Separator<ProcessRunner> {
    pub fn new(config: AdapterConfig) -> Self {
        Self::with_runner(config, ProcessRunner)
    }
}

impl<R: ToolRunner> Separator<R> {
    pub fn with_runner(config: AdapterConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Six slots in vocals, bass, drums, other, piano, guitar order.
    pub fn run_separation(&self, audio: &AudioData, opts: &SeparateOptions) -> SeparationResult {
        self.separate(audio, opts).into_result()
    }

    pub fn separate(&self, audio: &AudioData, opts: &SeparateOptions) -> SeparationOutcome {
        tracing::info!(
            model = %opts.model_name,
            shifts = opts.shifts,
            overlap = opts.overlap,
            frames = audio.frames(),
            sample_rate = audio.sample_rate,
            "starting separation"
        );

        let outcome = self.run_job(audio, opts);

        emit_stage(JobStage::Finished {
            success: outcome.is_success(),
        });
        outcome
    }

    fn run_job(&self, audio: &AudioData, opts: &SeparateOptions) -> SeparationOutcome {
        emit_stage(JobStage::Staging);

        let workspace = match Workspace::open(&self.config) {
            Ok(ws) => ws,
            Err(e) => return launch_failed(format!("cannot prepare output directory: {e}")),
        };

        if let Err(e) = write_audio(workspace.input_path(), audio) {
            return launch_failed(format!(
                "cannot write {}: {e}",
                workspace.input_path().display()
            ));
        }

        let cmd = DemucsCommand::build(&self.config, opts, workspace.input_path(), workspace.dir());
        tracing::debug!(command = %cmd, "invoking separation tool");

        emit_stage(JobStage::Running);
        let output = match self.runner.run(&cmd) {
            Ok(output) => output,
            Err(e) => {
                return launch_failed(format!(
                    "cannot run `{}`: {e}",
                    cmd.program.to_string_lossy()
                ))
            }
        };

        if !output.success() {
            let stderr = output.stderr_lossy();
            tracing::error!(code = ?output.code, "Error in separation tool: {stderr}");
            return SeparationOutcome::ToolFailed {
                code: output.code,
                stderr,
            };
        }

        tracing::debug!(stdout = %output.stdout_lossy(), "separation tool output");

        emit_stage(JobStage::Collecting);
        let collected = collect_stems(workspace.dir(), &opts.model_name, workspace.input_path());

        if collected.result.is_empty() {
            tracing::warn!(
                dir = %workspace.dir().display(),
                model = %opts.model_name,
                "No output files found."
            );
            return SeparationOutcome::NoOutput {
                expected: collected.expected,
            };
        }

        if collected.missing.is_empty() {
            tracing::info!(stems = collected.result.present_count(), "separation finished");
            SeparationOutcome::Complete(collected.result)
        } else {
            tracing::warn!(missing = ?collected.missing, "separation finished with missing stems");
            SeparationOutcome::Partial {
                result: collected.result,
                missing: collected.missing,
            }
        }
    }
}

fn launch_failed(reason: String) -> SeparationOutcome {
    tracing::error!("{reason}");
    SeparationOutcome::LaunchFailed { reason }
}

/// One-shot separation with configuration taken from the environment.
///
/// Returns exactly six slots; any failure yields six absence markers.
pub fn run_separation(
    audio: &AudioData,
    model: &str,
    shifts: u32,
    overlap: f64,
) -> SeparationResult {
    let config = AdapterConfig::from_env_lossy();

    let opts = SeparateOptions {
        model_name: model.to_string(),
        shifts,
        overlap,
    };

    Separator::new(config).run_separation(audio, &opts)
}
