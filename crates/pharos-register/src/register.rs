//! The top-level container: every record in a dataset, keyed by record id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::release_report::ReleaseReport;
use crate::vocab::FieldAliasMap;

/// Fields that must be present and non-empty for a dataset to be releasable.
pub const REQUIRED_FIELDS: &[&str] = &[
    "collection_day",
    "collection_month",
    "collection_year",
    "latitude",
    "longitude",
    "host_species",
];

/// All records belonging to one dataset, keyed by record id. `BTreeMap` keeps
/// iteration order deterministic, which release-report consumers rely on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Register {
    pub register_data: BTreeMap<String, Record>,
}

impl Register {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record_id: impl Into<String>, record: Record) {
        self.register_data.insert(record_id.into(), record);
    }

    /// Walk every record and classify each of its datapoints exactly once:
    /// a missing-required pass followed by a per-field status
    /// classification pass, per record.
    pub fn release_report(&self, aliases: &dyn FieldAliasMap) -> ReleaseReport {
        tracing::debug!(records = self.register_data.len(), "computing release report");
        let mut report = ReleaseReport::default();

        for (record_id, record) in &self.register_data {
            let fields = record.recognised_fields();
            let by_name: BTreeMap<&str, Option<&crate::datapoint::Datapoint>> =
                fields.iter().copied().collect();

            for field in REQUIRED_FIELDS {
                let is_missing = match by_name.get(field) {
                    Some(Some(dp)) => dp.data_value.is_empty(),
                    _ => true,
                };
                if is_missing {
                    report.missing_count += 1;
                    report
                        .missing_fields
                        .entry(record_id.clone())
                        .or_default()
                        .push(aliases.ui_name(field).to_string());
                }
            }

            // Walk both the fixed, recognised fields and the extras side-map:
            // an unrecognised-column datapoint carries its own FAIL report
            // (record.rs's `from_ui_json`) and must count toward the same
            // classification pass as any other field.
            let extras_as_fields = record
                .extras
                .iter()
                .map(|(name, dp)| (name.as_str(), Some(dp)));

            for (name, datapoint) in fields.into_iter().chain(extras_as_fields) {
                let Some(dp) = datapoint else { continue };
                if dp.data_value.is_empty() {
                    continue;
                }
                let Some(verdict) = &dp.report else { continue };
                match verdict.status {
                    crate::report::ReportScore::Success => report.success_count += 1,
                    crate::report::ReportScore::Warning => {
                        report.warning_count += 1;
                        report
                            .warning_fields
                            .entry(record_id.clone())
                            .or_default()
                            .push(aliases.ui_name(name).to_string());
                    }
                    crate::report::ReportScore::Fail => {
                        report.fail_count += 1;
                        report
                            .fail_fields
                            .entry(record_id.clone())
                            .or_default()
                            .push(aliases.ui_name(name).to_string());
                    }
                }
            }
        }

        if report.missing_count == 0 && report.fail_count == 0 && report.warning_count == 0 {
            report.release_status = crate::release_report::DatasetReleaseStatus::Released;
        }

        tracing::debug!(
            success = report.success_count,
            warning = report.warning_count,
            fail = report.fail_count,
            missing = report.missing_count,
            "release report computed"
        );

        report
    }

    /// Reconcile two divergent copies of the same register, merging shared
    /// record ids field-by-field and keeping record ids unique to either
    /// side as-is.
    pub fn merge(left: Register, right: Register) -> Register {
        let mut merged = left.register_data;
        for (record_id, right_record) in right.register_data {
            let combined = match merged.remove(&record_id) {
                Some(left_record) => Record::merge(Some(left_record), Some(right_record)),
                None => Some(right_record),
            };
            if let Some(record) = combined {
                merged.insert(record_id, record);
            }
        }
        Register {
            register_data: merged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datapoint::Datapoint;
    use crate::report::Report;
    use crate::vocab::StaticAliasMap;

    fn success(value: &str) -> Datapoint {
        let mut dp = Datapoint::new(value, "u1", 1);
        dp.report = Some(Report::success("Ready to release."));
        dp
    }

    #[test]
    fn s6_all_required_success_releases() {
        let mut record = crate::record::Record::default();
        record.collection_day = Some(success("15"));
        record.collection_month = Some(success("06"));
        record.collection_year = Some(success("2023"));
        record.latitude = Some(success("1"));
        record.longitude = Some(success("1"));
        record.host_species = Some(success("Rattus rattus"));

        let mut register = Register::new();
        register.insert("rec-1", record);

        let report = register.release_report(&StaticAliasMap);
        assert_eq!(report.release_status, crate::release_report::DatasetReleaseStatus::Released);
        assert_eq!(report.missing_count, 0);
        assert_eq!(report.fail_count, 0);
        assert_eq!(report.warning_count, 0);
        assert_eq!(report.success_count, 6);
    }

    #[test]
    fn missing_required_field_lists_ui_name() {
        let record = crate::record::Record::default();
        let mut register = Register::new();
        register.insert("rec-1", record);

        let report = register.release_report(&StaticAliasMap);
        assert_eq!(report.missing_count, REQUIRED_FIELDS.len() as u64);
        assert!(report
            .missing_fields
            .get("rec-1")
            .unwrap()
            .contains(&"Latitude".to_string()));
        assert_eq!(
            report.release_status,
            crate::release_report::DatasetReleaseStatus::Unreleased
        );
    }

    #[test]
    fn fail_datapoint_is_not_also_counted_as_missing() {
        let mut record = crate::record::Record::default();
        record.host_species = Some({
            let mut dp = Datapoint::new("Homo Sapiens", "u1", 1);
            dp.report = Some(Report::fail("Please do not upload data on human infections to Pharos."));
            dp
        });
        let mut register = Register::new();
        register.insert("rec-1", record);

        let report = register.release_report(&StaticAliasMap);
        assert_eq!(report.fail_count, 1);
        assert!(report.missing_fields.get("rec-1").unwrap().contains(&"Latitude".to_string()));
        assert!(!report.missing_fields.get("rec-1").unwrap().contains(&"Host species".to_string()));
    }

    #[test]
    fn empty_value_is_missing_not_classified() {
        let mut record = crate::record::Record::default();
        record.latitude = Some(Datapoint::new("", "u1", 1));
        let mut register = Register::new();
        register.insert("rec-1", record);

        let report = register.release_report(&StaticAliasMap);
        assert_eq!(report.success_count, 0);
        assert_eq!(report.fail_count, 0);
        assert!(report.missing_fields.get("rec-1").unwrap().contains(&"Latitude".to_string()));
    }

    #[test]
    fn merge_combines_disjoint_record_ids() {
        let mut left = Register::new();
        left.insert("rec-1", crate::record::Record::default());
        let mut right = Register::new();
        right.insert("rec-2", crate::record::Record::default());

        let merged = Register::merge(left, right);
        assert_eq!(merged.register_data.len(), 2);
    }

    #[test]
    fn merge_combines_shared_record_id_field_by_field() {
        let mut left = Register::new();
        let mut left_record = crate::record::Record::default();
        left_record.host_species = Some(Datapoint::new("Rattus rattus", "u1", 2));
        left.insert("rec-1", left_record);

        let mut right = Register::new();
        let mut right_record = crate::record::Record::default();
        right_record.latitude = Some(Datapoint::new("1.0", "u2", 1));
        right.insert("rec-1", right_record);

        let merged = Register::merge(left, right);
        let record = merged.register_data.get("rec-1").unwrap();
        assert!(record.host_species.is_some());
        assert!(record.latitude.is_some());
    }
}
