//! Baseline-relative regression checks over named test cases.
//!
//! A run records pass or fail per case. Comparing a run against a stored
//! baseline only flags cases that used to pass and no longer do; cases
//! that have never passed are stable failures and do not fail the check.

use crate::batch::parse_batch;
use crate::card::ParseResult;
use crate::error::HarnessError;
use crate::input::CardInput;
use oracle_parse::ParseOptions;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};

/// One named case. Without `expected` a case passes when the card parses
/// without errors; with it, the card's AST must equal `expected` as JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub card: CardInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<serde_json::Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Pass,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub status: CaseStatus,
    /// `sha256:<hex>` of the case's AST as compact JSON.
    pub digest: String,
}

/// Outcomes of a run, keyed by case name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Baseline {
    pub cases: BTreeMap<String, CaseRecord>,
}

impl Baseline {
    pub fn from_json(json: &str) -> Result<Self, HarnessError> {
        serde_json::from_str(json).map_err(HarnessError::Baseline)
    }

    pub fn to_json(&self) -> Result<String, HarnessError> {
        serde_json::to_string_pretty(self).map_err(HarnessError::Baseline)
    }

    pub fn passing(&self) -> usize {
        self.cases
            .values()
            .filter(|c| c.status == CaseStatus::Pass)
            .count()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatchetReport {
    /// Passed in the baseline, fail now.
    pub regressions: Vec<String>,
    /// Failed in the baseline, pass now.
    pub fixes: Vec<String>,
    pub stable_failures: Vec<String>,
    pub stable_passes: Vec<String>,
    /// Not in the baseline.
    pub new_cases: Vec<String>,
    /// In the baseline, not in the current run.
    pub removed_cases: Vec<String>,
    /// Same status in both runs, different output digest.
    pub changed_outputs: Vec<String>,
}

impl RatchetReport {
    pub fn is_regression_free(&self) -> bool {
        self.regressions.is_empty()
    }
}

/// Decode a JSON list of test cases. Names must be unique.
pub fn load_cases(json: &str) -> Result<Vec<TestCase>, HarnessError> {
    let cases: Vec<TestCase> = serde_json::from_str(json).map_err(HarnessError::Cases)?;
    let mut seen = HashSet::new();
    for case in &cases {
        if !seen.insert(case.name.as_str()) {
            return Err(HarnessError::DuplicateCase(case.name.clone()));
        }
    }
    Ok(cases)
}

/// Parse every case and record its outcome.
#[tracing::instrument(level = "debug", skip_all, fields(cases = cases.len()))]
pub fn run_cases(cases: &[TestCase], opts: &ParseOptions) -> Baseline {
    let cards: Vec<CardInput> = cases.iter().map(|c| c.card.clone()).collect();
    let results = parse_batch(&cards, opts);
    let cases = cases
        .iter()
        .zip(&results)
        .map(|(case, result)| (case.name.clone(), record(case, result)))
        .collect();
    Baseline { cases }
}

fn record(case: &TestCase, result: &ParseResult) -> CaseRecord {
    let passed = match &case.expected {
        Some(expected) => serde_json::to_value(&result.ast).is_ok_and(|actual| actual == *expected),
        None => result.succeeded,
    };
    CaseRecord {
        status: if passed {
            CaseStatus::Pass
        } else {
            CaseStatus::Fail
        },
        digest: digest(result),
    }
}

/// SHA-256 of the AST's canonical JSON encoding.
pub fn digest(result: &ParseResult) -> String {
    let canonical = serde_json::to_string(&result.ast).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("sha256:{:x}", hasher.finalize())
}

/// Classify every case of `current` against `baseline`. Pure; both sides
/// are supplied by the caller.
pub fn compare(baseline: &Baseline, current: &Baseline) -> RatchetReport {
    let mut report = RatchetReport::default();
    for (name, now) in &current.cases {
        let Some(before) = baseline.cases.get(name) else {
            report.new_cases.push(name.clone());
            continue;
        };
        let bucket = match (before.status, now.status) {
            (CaseStatus::Pass, CaseStatus::Fail) => &mut report.regressions,
            (CaseStatus::Fail, CaseStatus::Pass) => &mut report.fixes,
            (CaseStatus::Fail, CaseStatus::Fail) => &mut report.stable_failures,
            (CaseStatus::Pass, CaseStatus::Pass) => &mut report.stable_passes,
        };
        bucket.push(name.clone());
        if before.status == now.status && before.digest != now.digest {
            report.changed_outputs.push(name.clone());
        }
    }
    report.removed_cases = baseline
        .cases
        .keys()
        .filter(|name| !current.cases.contains_key(*name))
        .cloned()
        .collect();
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(entries: &[(&str, CaseStatus)]) -> Baseline {
        Baseline {
            cases: entries
                .iter()
                .map(|(name, status)| {
                    (
                        name.to_string(),
                        CaseRecord {
                            status: *status,
                            digest: "sha256:00".into(),
                        },
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn only_newly_broken_cases_regress() {
        use CaseStatus::*;
        let baseline = run(&[("a", Pass), ("b", Fail), ("c", Pass), ("d", Fail), ("gone", Pass)]);
        let current = run(&[("a", Fail), ("b", Fail), ("c", Pass), ("d", Pass), ("new", Fail)]);
        let report = compare(&baseline, &current);
        assert_eq!(report.regressions, vec!["a"]);
        assert_eq!(report.stable_failures, vec!["b"]);
        assert_eq!(report.stable_passes, vec!["c"]);
        assert_eq!(report.fixes, vec!["d"]);
        assert_eq!(report.new_cases, vec!["new"]);
        assert_eq!(report.removed_cases, vec!["gone"]);
        assert!(!report.is_regression_free());
    }

    #[test]
    fn stable_failures_do_not_fail_the_check() {
        let baseline = run(&[("x", CaseStatus::Fail)]);
        assert!(compare(&baseline, &baseline).is_regression_free());
    }

    #[test]
    fn duplicate_case_names_are_rejected() {
        let json = r#"[{"name": "a", "card": {"name": "A"}}, {"name": "a", "card": {"name": "B"}}]"#;
        assert!(matches!(load_cases(json), Err(HarnessError::DuplicateCase(n)) if n == "a"));
    }
}
