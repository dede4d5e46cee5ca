//! # demucs-stems
//!
//! Runs the Demucs separation tool as a child process on an in-memory
//! waveform and reports which stem files it produced, as six fixed slots
//! (vocals, bass, drums, other, piano, guitar).

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod model;
pub mod types;

pub use crate::{
    config::{AdapterConfig, WorkspaceMode},
    core::{
        audio::{read_audio, write_audio},
        command::DemucsCommand,
        runner::{ProcessRunner, ToolOutput, ToolRunner},
        separator::{run_separation, Separator},
    },
    error::{Result, SeparationError},
    io::{
        logging::init_logging,
        progress::{clear_stage_callback, set_stage_callback, JobStage},
    },
    model::registry::{expected_stems, is_known_model, registry, ModelInfo},
    types::{
        AudioData, SeparateOptions, SeparationOutcome, SeparationResult, Stem, PCM16_SCALE,
        SLOT_COUNT,
    },
};
