//! Error taxonomy for the register core.
//!
//! Two disjoint regimes, matching the structural/validation split: a
//! [`ParseError`] aborts construction of a whole entity, while a
//! [`DatapointError`] is caught at the validation-rule call site and
//! materialised as a `FAIL` [`crate::report::Report`] — it never escapes
//! [`crate::record::Record::validate`].

use thiserror::Error;

/// Structural parse error: wrong shape of a [`crate::record::Record`] or a
/// metadata DTO ([`crate::metadata::User`], [`crate::metadata::Project`],
/// [`crate::metadata::Dataset`]).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// An entity that forbids unknown fields received one it doesn't recognise.
    #[error("{entity} has unrecognized field: {field}")]
    UnknownField { entity: &'static str, field: String },

    /// A required attribute is absent from the input.
    #[error("{entity} is missing required attribute: {field}")]
    MissingRequiredAttribute { entity: &'static str, field: &'static str },

    /// The input JSON is not shaped the way this entity expects.
    #[error("{entity} has the wrong shape: {detail}")]
    WrongShape { entity: &'static str, detail: String },
}

/// Error raised by a [`crate::datapoint::Datapoint`] numeric coercion.
///
/// Always caught by the surrounding field rule and turned into a `FAIL`
/// report carrying this error's own message; never propagated further.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DatapointError {
    /// `data_value` could not be parsed as the requested numeric type.
    #[error("Value must be a number: {raw:?}")]
    NonNumeric { raw: String },

    /// `data_value` parsed as an integer but was zero, and a non-zero
    /// integer was required.
    #[error("Value must be a non-zero integer")]
    ZeroValue,
}
