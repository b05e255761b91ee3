// src/types.rs

use std::str::FromStr;

use serde::Deserialize;

/// What the supervisor does after a pre or run command fails.
///
/// - `Continue`: log the failure and keep going (default). One bad command
///   never stops the others.
/// - `Abort`: the first failing pre command skips the rest of the pre group
///   and the whole run group; the first failing run command stops the drain
///   early. Post commands run completely either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    Continue,
    Abort,
}

impl Default for FailurePolicy {
    fn default() -> Self {
        FailurePolicy::Continue
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "continue" => Ok(FailurePolicy::Continue),
            "abort" => Ok(FailurePolicy::Abort),
            other => Err(format!(
                "invalid on_failure: {other} (expected \"continue\" or \"abort\")"
            )),
        }
    }
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailurePolicy::Continue => f.write_str("continue"),
            FailurePolicy::Abort => f.write_str("abort"),
        }
    }
}
