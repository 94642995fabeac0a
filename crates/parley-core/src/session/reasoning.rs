//! Reasoning-mode selection from the requested model name.

/// Model-name suffix that requests extended reasoning.
pub const REASONING_SUFFIX: &str = "-think";

/// Account-level reasoning mode. Absent (`None`) means "unknown, leave alone".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasoningMode {
    Off,
    Extended,
}

/// A requested model split into the backend model id and the reasoning
/// mode it implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSelection<'a> {
    pub model: &'a str,
    pub reasoning: ReasoningMode,
}

impl<'a> ModelSelection<'a> {
    pub fn parse(requested: &'a str) -> Self {
        match requested.strip_suffix(REASONING_SUFFIX) {
            Some(model) => Self {
                model,
                reasoning: ReasoningMode::Extended,
            },
            None => Self {
                model: requested,
                reasoning: ReasoningMode::Off,
            },
        }
    }

    /// Whether the account setting must be changed, given the current mode.
    pub fn needs_update(&self, current: Option<ReasoningMode>) -> bool {
        current != Some(self.reasoning)
    }
}
