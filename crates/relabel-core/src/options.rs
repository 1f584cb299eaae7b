//! Batch configuration.

use serde::{Deserialize, Serialize};

/// Default separator between a name and its temporary-name counter.
pub const DEFAULT_TEMP_SENTINEL: &str = "$";

/// Default number of temporary-name candidates tried per cycle member.
pub const DEFAULT_MAX_TEMP_ATTEMPTS: usize = 1000;

/// What to check on the final text before returning it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyMode {
    /// No check.
    None,
    /// The final text must still parse.
    #[default]
    Syntax,
}

/// Options for one rename batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameOptions {
    /// Inserted between a name and a counter to form temporary names.
    pub temp_sentinel: String,
    /// Candidates tried before giving up with `TargetCollisionUnresolvable`.
    pub max_temp_attempts: usize,
    /// Final-text verification.
    pub verify: VerifyMode,
}

impl Default for RenameOptions {
    fn default() -> Self {
        RenameOptions {
            temp_sentinel: DEFAULT_TEMP_SENTINEL.to_string(),
            max_temp_attempts: DEFAULT_MAX_TEMP_ATTEMPTS,
            verify: VerifyMode::default(),
        }
    }
}

impl RenameOptions {
    pub fn with_temp_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.temp_sentinel = sentinel.into();
        self
    }

    pub fn with_max_temp_attempts(mut self, attempts: usize) -> Self {
        self.max_temp_attempts = attempts;
        self
    }

    pub fn with_verify(mut self, verify: VerifyMode) -> Self {
        self.verify = verify;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = RenameOptions::default();
        assert_eq!(options.temp_sentinel, "$");
        assert_eq!(options.max_temp_attempts, 1000);
        assert_eq!(options.verify, VerifyMode::Syntax);
    }

    #[test]
    fn builders_override() {
        let options = RenameOptions::default()
            .with_temp_sentinel("_t")
            .with_max_temp_attempts(5)
            .with_verify(VerifyMode::None);
        assert_eq!(options.temp_sentinel, "_t");
        assert_eq!(options.max_temp_attempts, 5);
        assert_eq!(options.verify, VerifyMode::None);
    }
}
