//! Input driver
//!
//! Runs a list of inputs through the acceptance driver and renders each outcome:
//!
//!     Input: 'acb'
//!     accepted
//!      S
//!     /  \
//!     ...
//!
//!     Input: 'abc'
//!     rejected
//!
//! Accepted trees are rendered with whichever [`Formatter`] the caller picks.

use crate::derivation::{Acceptance, DeriveError, Deriver, Rejection};
use crate::formats::{FormatError, Formatter};
use crate::tree::ParseTree;
use std::fmt;

/// Outcome for one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted { tree: ParseTree, rendered: String },
    Rejected(Rejection),
}

/// One input and what happened to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputReport {
    pub input: String,
    pub outcome: Outcome,
}

impl InputReport {
    pub fn is_accepted(&self) -> bool {
        matches!(self.outcome, Outcome::Accepted { .. })
    }
}

impl fmt::Display for InputReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Input: '{}'", self.input)?;
        match &self.outcome {
            Outcome::Accepted { rendered, .. } => {
                writeln!(f, "accepted")?;
                write!(f, "{}", rendered.trim_end_matches('\n'))
            }
            Outcome::Rejected(_) => write!(f, "rejected"),
        }
    }
}

/// Errors that stop a run (a rejected input does not)
#[derive(Debug, Clone, PartialEq)]
pub enum DriverError {
    Derive(DeriveError),
    Format(FormatError),
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Derive(e) => write!(f, "{e}"),
            DriverError::Format(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for DriverError {}

impl From<DeriveError> for DriverError {
    fn from(e: DeriveError) -> Self {
        DriverError::Derive(e)
    }
}

impl From<FormatError> for DriverError {
    fn from(e: FormatError) -> Self {
        DriverError::Format(e)
    }
}

/// Check one input
pub fn check(
    deriver: &Deriver<'_>,
    start: &str,
    input: &str,
    formatter: &dyn Formatter,
) -> Result<InputReport, DriverError> {
    let outcome = match deriver.accept(start, input)? {
        Acceptance::Accepted(tree) => {
            let rendered = formatter.serialize(&tree)?;
            Outcome::Accepted { tree, rendered }
        }
        Acceptance::Rejected(rejection) => Outcome::Rejected(rejection),
    };

    Ok(InputReport {
        input: input.to_string(),
        outcome,
    })
}

/// Check every input in order
pub fn run<I, S>(
    deriver: &Deriver<'_>,
    start: &str,
    inputs: I,
    formatter: &dyn Formatter,
) -> Result<Vec<InputReport>, DriverError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    inputs
        .into_iter()
        .map(|input| check(deriver, start, input.as_ref(), formatter))
        .collect()
}

/// Reports separated by blank lines
pub fn format_reports(reports: &[InputReport]) -> String {
    let mut output = String::new();
    for (index, report) in reports.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }
        output.push_str(&report.to_string());
        output.push('\n');
    }
    output
}
