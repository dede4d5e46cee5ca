use serde::{Deserialize, Serialize};
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Full-scale magnitude of 16-bit PCM. `i16::MIN` maps to exactly -1.0.
pub const PCM16_SCALE: f32 = 32768.0;

/// Interleaved PCM waveform handed to the adapter by its caller.
#[derive(Clone, Debug)]
pub struct AudioData {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl AudioData {
    /// Builds from native 16-bit frames, as delivered by most upload widgets.
    pub fn from_i16(samples: &[i16], sample_rate: u32, channels: u16) -> Self {
        Self {
            samples: samples
                .iter()
                .map(|&s| s as f32 / PCM16_SCALE)
                .collect(),
            sample_rate,
            channels,
        }
    }

    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }
}

/// Number of result slots. Fixed regardless of model.
pub const SLOT_COUNT: usize = 6;

/// One separated source, declared in result slot order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stem {
    Vocals,
    Bass,
    Drums,
    Other,
    Piano,
    Guitar,
}

impl Stem {
    pub const ALL: [Stem; SLOT_COUNT] = [
        Stem::Vocals,
        Stem::Bass,
        Stem::Drums,
        Stem::Other,
        Stem::Piano,
        Stem::Guitar,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stem::Vocals => "vocals",
            Stem::Bass => "bass",
            Stem::Drums => "drums",
            Stem::Other => "other",
            Stem::Piano => "piano",
            Stem::Guitar => "guitar",
        }
    }

    pub fn slot(self) -> usize {
        self as usize
    }

    /// File name the separation tool gives this stem.
    pub fn file_name(self) -> String {
        format!("{}.wav", self.as_str())
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stem::ALL
            .into_iter()
            .find(|stem| stem.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown stem `{s}`"))
    }
}

/// Caller-supplied tuning for one separation run.
///
/// Nothing here is range-checked; values go to the tool verbatim.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeparateOptions {
    pub model_name: String,
    pub shifts: u32,
    pub overlap: f64,
}

impl Default for SeparateOptions {
    fn default() -> Self {
        Self {
            model_name: "mdx_extra_q".into(),
            shifts: 1,
            overlap: 0.25,
        }
    }
}

/// Six fixed slots: vocals, bass, drums, other, piano, guitar.
/// `None` marks a stem that was not produced.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SeparationResult {
    slots: [Option<PathBuf>; SLOT_COUNT],
}

impl SeparationResult {
    pub fn absent() -> Self {
        Self::default()
    }

    pub(crate) fn set(&mut self, stem: Stem, path: PathBuf) {
        self.slots[stem.slot()] = Some(path);
    }

    pub fn get(&self, stem: Stem) -> Option<&Path> {
        self.slots[stem.slot()].as_deref()
    }

    pub fn slots(&self) -> &[Option<PathBuf>; SLOT_COUNT] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stem, Option<&Path>)> + '_ {
        Stem::ALL.into_iter().map(move |stem| (stem, self.get(stem)))
    }

    pub fn present_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.present_count() == 0
    }

    pub fn into_vec(self) -> Vec<Option<PathBuf>> {
        self.slots.into()
    }
}

/// What actually happened during a run, for callers that want more than
/// the slot pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeparationOutcome {
    /// Every stem the model is expected to produce was found.
    Complete(SeparationResult),
    /// The tool succeeded but some expected stems are missing.
    Partial {
        result: SeparationResult,
        missing: Vec<Stem>,
    },
    /// The tool succeeded but none of the expected files exist.
    NoOutput { expected: Vec<PathBuf> },
    /// The tool exited non-zero or was killed by a signal.
    ToolFailed { code: Option<i32>, stderr: String },
    /// Staging the input or spawning the tool failed.
    LaunchFailed { reason: String },
}

impl SeparationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            SeparationOutcome::Complete(_) | SeparationOutcome::Partial { .. }
        )
    }

    pub fn result(&self) -> Option<&SeparationResult> {
        match self {
            SeparationOutcome::Complete(result) | SeparationOutcome::Partial { result, .. } => {
                Some(result)
            }
            _ => None,
        }
    }

    /// Collapses to the fixed six-slot shape; failures become all-absent.
    pub fn into_result(self) -> SeparationResult {
        match self {
            SeparationOutcome::Complete(result) | SeparationOutcome::Partial { result, .. } => {
                result
            }
            _ => SeparationResult::absent(),
        }
    }
}
