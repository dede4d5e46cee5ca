use crate::{
    error::{Result, SeparationError},
    types::Stem,
};
use serde::Deserialize;
use std::sync::OnceLock;

#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub description: String,
    pub stems: Vec<Stem>,
}

#[derive(Debug, Deserialize)]
pub struct Registry {
    pub default: String,
    pub models: Vec<ModelInfo>,
}

const REGISTRY_JSON: &str = include_str!("../../models/registry.json");

/// Stems every model without its own entry is assumed to write.
pub const STANDARD_STEMS: [Stem; 4] = [Stem::Vocals, Stem::Bass, Stem::Drums, Stem::Other];

static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn parse_registry(json: &str) -> Result<Registry> {
    let reg: Registry = serde_json::from_str(json)?;
    if reg.find(&reg.default).is_none() {
        return Err(SeparationError::Registry(format!(
            "Default model `{}` not found in registry",
            reg.default
        )));
    }
    Ok(reg)
}

/// The embedded model registry, parsed on first use.
pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| match parse_registry(REGISTRY_JSON) {
        Ok(reg) => reg,
        Err(e) => panic!("embedded models/registry.json is invalid: {e}"),
    })
}

impl Registry {
    pub fn find(&self, name: &str) -> Option<&ModelInfo> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn default_model(&self) -> &str {
        &self.default
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.name.as_str())
    }
}

/// Stems the tool writes for `model`, in slot order.
///
/// Unrecognized names fall back to the four standard stems; the tool itself
/// decides whether the name is valid.
pub fn expected_stems(model: &str) -> &'static [Stem] {
    registry()
        .find(model)
        .map(|m| m.stems.as_slice())
        .unwrap_or(&STANDARD_STEMS)
}

pub fn is_known_model(model: &str) -> bool {
    registry().find(model).is_some()
}
