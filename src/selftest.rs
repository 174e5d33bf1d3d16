//! Built-in classification fixtures.
//!
//! Each fixture is classified through the shortcut path and cross-checked
//! against the full partition count, so a run also guards the shortcuts.

use log::{error, info};

use crate::classifier::{classify, classify_exhaustive, Classification};
use crate::digits::DigitBuffer;

/// Digit strings with exactly one dotted-quad reading
pub const UNIQUE_FIXTURES: &[&str] = &[
    "0000",
    "124163241225",
    "65121242192",
    "16384255249",
    "21216324825",
    "0121242192",
    "063255249",
    "021863241",
    "022512420",
    "0192163255",
    "36494967",
    "248636485",
];

/// Digit strings with several dotted-quad readings
pub const AMBIGUOUS_FIXTURES: &[&str] = &[
    "11111",
    "12212112",
    "12481632",
    "11235813",
    "23571113",
    "14916253",
    "12345678",
    "7654321",
    "192168",
];

/// Outcome of one fixture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureOutcome {
    pub input: &'static str,
    pub expected: Classification,
    /// Result with shortcuts enabled, or the error message
    pub actual: Result<Classification, String>,
    /// Result of the full partition count, or the error message
    pub exhaustive: Result<Classification, String>,
}

impl FixtureOutcome {
    pub fn passed(&self) -> bool {
        self.actual == Ok(self.expected) && self.exhaustive == Ok(self.expected)
    }
}

/// Outcomes of every fixture
#[derive(Debug, Clone, Default)]
pub struct SelfTestReport {
    pub outcomes: Vec<FixtureOutcome>,
}

impl SelfTestReport {
    pub fn failures(&self) -> impl Iterator<Item = &FixtureOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.passed())
    }

    pub fn all_passed(&self) -> bool {
        self.failures().next().is_none()
    }
}

fn check_fixture(input: &'static str, expected: Classification) -> FixtureOutcome {
    match DigitBuffer::decode(input) {
        Ok(digits) => FixtureOutcome {
            input,
            expected,
            actual: classify(&digits).map_err(|e| e.to_string()),
            exhaustive: classify_exhaustive(&digits).map_err(|e| e.to_string()),
        },
        Err(e) => FixtureOutcome {
            input,
            expected,
            actual: Err(e.to_string()),
            exhaustive: Err(e.to_string()),
        },
    }
}

/// Run every fixture and log each outcome.
pub fn run_self_tests() -> SelfTestReport {
    let outcomes: Vec<FixtureOutcome> = UNIQUE_FIXTURES
        .iter()
        .map(|input| (*input, Classification::Unique))
        .chain(
            AMBIGUOUS_FIXTURES
                .iter()
                .map(|input| (*input, Classification::Ambiguous)),
        )
        .map(|(input, expected)| check_fixture(input, expected))
        .collect();

    for outcome in &outcomes {
        if outcome.passed() {
            info!("SUCCESS: {} is {}", outcome.input, outcome.expected);
        } else {
            error!(
                "FAIL: {} is {} but was deemed {:?} (full count: {:?})",
                outcome.input, outcome.expected, outcome.actual, outcome.exhaustive
            );
        }
    }

    SelfTestReport { outcomes }
}
