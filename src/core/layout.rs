//! Where the separation tool leaves its stems.
//!
//! The tool writes `<output_dir>/<model>/<input file stem>/<stem>.wav`.
//! Only the stems the model is registered for are probed, so a stray
//! `piano.wav` next to a four-stem model's output is never reported.

use crate::{
    model::registry::expected_stems,
    types::{SeparationResult, Stem},
};
use std::path::{Path, PathBuf};

/// Directory holding the stems for `input` separated by `model`.
pub fn stem_dir(output_dir: &Path, model: &str, input: &Path) -> PathBuf {
    let name = input
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "output".into());
    output_dir.join(model).join(name)
}

/// Expected stem files in slot order.
pub fn expected_paths(output_dir: &Path, model: &str, input: &Path) -> Vec<(Stem, PathBuf)> {
    let dir = stem_dir(output_dir, model, input);
    expected_stems(model)
        .iter()
        .map(|&stem| (stem, dir.join(stem.file_name())))
        .collect()
}

/// Probe result for one run's output directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collected {
    pub result: SeparationResult,
    pub missing: Vec<Stem>,
    pub expected: Vec<PathBuf>,
}

/// Fills a slot for every expected path that is a regular file.
pub fn collect_stems(output_dir: &Path, model: &str, input: &Path) -> Collected {
    let mut result = SeparationResult::absent();
    let mut missing = Vec::new();
    let mut expected = Vec::new();

    for (stem, path) in expected_paths(output_dir, model, input) {
        expected.push(path.clone());
        if path.is_file() {
            result.set(stem, path);
        } else {
            missing.push(stem);
        }
    }

    Collected {
        result,
        missing,
        expected,
    }
}
