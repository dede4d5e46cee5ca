use std::sync::{Mutex, OnceLock};

/// Lifecycle of one separation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobStage {
    Staging,
    Running,
    Collecting,
    Finished { success: bool },
}

type StageCallback = Box<dyn Fn(JobStage) + Send + 'static>;

static STAGE_CB: OnceLock<Mutex<Option<StageCallback>>> = OnceLock::new();

/// Registers the process-wide stage hook, replacing any previous one.
pub fn set_stage_callback(cb: impl Fn(JobStage) + Send + 'static) {
    let slot = STAGE_CB.get_or_init(|| Mutex::new(None));
    if let Ok(mut g) = slot.lock() {
        *g = Some(Box::new(cb));
    }
}

pub fn clear_stage_callback() {
    if let Some(m) = STAGE_CB.get() {
        if let Ok(mut g) = m.lock() {
            *g = None;
        }
    }
}

pub fn emit_stage(stage: JobStage) {
    if let Some(m) = STAGE_CB.get() {
        if let Ok(g) = m.lock() {
            if let Some(cb) = &*g {
                cb(stage);
            }
        }
    }
}
