//! Degradations observed while pricing
//!
//! None of these are errors. Each marks a place where a value contributed
//! zero (or was left undefined) because the catalog and the selection did
//! not line up, so hosts and tests can tell it apart from a real zero.

use serde::Serialize;
use std::fmt;

/// A non-fatal pricing degradation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The course quantity matched none of the course's tiers
    CourseTierNotFound {
        /// Course id
        course_id: String,
        /// Quantity that was looked up
        quantity: u32,
    },
    /// A tiered line's quantity matched none of its tiers
    LineTierNotFound {
        /// Owning phase id
        phase_id: String,
        /// Line id
        line_id: String,
        /// Quantity that was looked up
        quantity: u32,
    },
    /// A manual line had neither an override nor a default amount
    MissingManualAmount {
        /// Owning phase id
        phase_id: String,
        /// Line id
        line_id: String,
    },
    /// The selection references an extra feature the course does not offer
    UnknownFeatureReference {
        /// Course id
        course_id: String,
        /// Feature id from the selection
        feature_id: String,
    },
    /// The selection references a phase the catalog does not have
    UnknownPhase {
        /// Phase id from the selection
        phase_id: String,
    },
    /// An override targets a line the phase does not have
    UnknownLineReference {
        /// Phase id from the selection
        phase_id: String,
        /// Line id from the selection
        line_id: String,
    },
    /// Quantity is zero so no per-unit price exists
    UndefinedPerUnit,
    /// An amount did not fit a `Decimal` and was counted as zero
    AmountOverflow {
        /// What overflowed (e.g. "phase fase0 line planejamento")
        scope: String,
    },
}

impl Diagnostic {
    /// Log the diagnostic at debug level and append it to `sink`
    pub(crate) fn record(self, sink: &mut Vec<Self>) {
        crate::debug!("pricing: {self}");
        sink.push(self);
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CourseTierNotFound {
                course_id,
                quantity,
            } => write!(f, "course {course_id} has no tier for quantity {quantity}"),
            Self::LineTierNotFound {
                phase_id,
                line_id,
                quantity,
            } => write!(
                f,
                "line {phase_id}.{line_id} has no tier for quantity {quantity}"
            ),
            Self::MissingManualAmount { phase_id, line_id } => write!(
                f,
                "manual line {phase_id}.{line_id} has no override and no default amount"
            ),
            Self::UnknownFeatureReference {
                course_id,
                feature_id,
            } => write!(f, "course {course_id} has no extra feature '{feature_id}'"),
            Self::UnknownPhase { phase_id } => write!(f, "catalog has no phase '{phase_id}'"),
            Self::UnknownLineReference { phase_id, line_id } => {
                write!(f, "phase {phase_id} has no line '{line_id}'")
            }
            Self::UndefinedPerUnit => write!(f, "quantity is zero; per-unit price is undefined"),
            Self::AmountOverflow { scope } => {
                write!(f, "amount for {scope} is too large; counted as zero")
            }
        }
    }
}
