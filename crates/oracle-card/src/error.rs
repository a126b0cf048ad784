use std::fmt;

/// Errors from decoding harness inputs. Parsing itself never fails.
#[derive(Debug)]
pub enum HarnessError {
    /// Card list is not valid JSON or not a list of card records.
    Cards(serde_json::Error),
    /// Test case file could not be decoded.
    Cases(serde_json::Error),
    /// Baseline file could not be decoded or encoded.
    Baseline(serde_json::Error),
    /// Two test cases share a name.
    DuplicateCase(String),
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarnessError::Cards(e) => write!(f, "invalid card list: {}", e),
            HarnessError::Cases(e) => write!(f, "invalid test cases: {}", e),
            HarnessError::Baseline(e) => write!(f, "invalid baseline: {}", e),
            HarnessError::DuplicateCase(name) => write!(f, "duplicate test case name '{}'", name),
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HarnessError::Cards(e) | HarnessError::Cases(e) | HarnessError::Baseline(e) => Some(e),
            HarnessError::DuplicateCase(_) => None,
        }
    }
}
