//! Pharos Register Core
//!
//! The in-memory register model for a wildlife-pathogen surveillance
//! platform: recursive, versioned datapoints; per-field validation; merge
//! of divergent edit histories; release-report aggregation. Pure and
//! synchronous — no I/O, no async runtime, no background tasks. Persistent
//! storage and transport are external collaborators defined in
//! `pharos-store`.

pub mod datapoint;
pub mod error;
pub mod metadata;
pub mod record;
pub mod register;
pub mod release_report;
pub mod report;
pub mod validation;
pub mod vocab;

pub use datapoint::Datapoint;
pub use error::{DatapointError, ParseError};
pub use metadata::{
    Author, Dataset, DatasetReleaseStatus, Project, ProjectAuthorRole, ProjectPublishStatus,
    RegisterPageMeta, TableItem, User,
};
pub use record::{Record, RecordMeta};
pub use register::{Register, REQUIRED_FIELDS};
pub use release_report::ReleaseReport;
pub use report::{Report, ReportScore};
pub use vocab::{
    FieldAliasMap, StaticAliasMap, StaticVocabularyMap, VocabularyMap, Vocabularies,
    RECOGNISED_FIELDS,
};

/// Pharos register crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
