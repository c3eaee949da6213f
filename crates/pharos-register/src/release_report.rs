//! Per-register aggregate summarising release readiness.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Where a dataset sits in the release/publish lifecycle. `Releasing` and
/// `Publishing`/`Published` are set by the external publishing pipeline, not
/// by [`crate::register::Register::release_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DatasetReleaseStatus {
    #[default]
    Unreleased,
    Releasing,
    Released,
    Publishing,
    Published,
}

/// Counters and per-record field lists summarising whether a register is
/// ready to publish.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReleaseReport {
    pub release_status: DatasetReleaseStatus,
    pub success_count: u64,
    pub warning_count: u64,
    pub fail_count: u64,
    pub missing_count: u64,
    pub warning_fields: BTreeMap<String, Vec<String>>,
    pub fail_fields: BTreeMap<String, Vec<String>>,
    pub missing_fields: BTreeMap<String, Vec<String>>,
}

impl ReleaseReport {
    /// Merge two shards of the same register (e.g. paginated storage).
    /// Counters sum; field lists union per record-id, right-biased on
    /// duplicate record-ids (right replaces left); `release_status` is
    /// `Released` only if both inputs already agree it's `Released` —
    /// deliberately pessimistic even if one side was `Published`.
    pub fn merge(left: ReleaseReport, right: ReleaseReport) -> ReleaseReport {
        let release_status = if left.release_status == DatasetReleaseStatus::Released
            && right.release_status == DatasetReleaseStatus::Released
        {
            DatasetReleaseStatus::Released
        } else {
            DatasetReleaseStatus::Unreleased
        };

        ReleaseReport {
            release_status,
            success_count: left.success_count + right.success_count,
            warning_count: left.warning_count + right.warning_count,
            fail_count: left.fail_count + right.fail_count,
            missing_count: left.missing_count + right.missing_count,
            warning_fields: union_right_biased(left.warning_fields, right.warning_fields),
            fail_fields: union_right_biased(left.fail_fields, right.fail_fields),
            missing_fields: union_right_biased(left.missing_fields, right.missing_fields),
        }
    }
}

fn union_right_biased(
    mut left: BTreeMap<String, Vec<String>>,
    right: BTreeMap<String, Vec<String>>,
) -> BTreeMap<String, Vec<String>> {
    for (record_id, fields) in right {
        left.insert(record_id, fields);
    }
    left
}
