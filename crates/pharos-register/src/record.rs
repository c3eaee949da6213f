//! A typed bag of named datapoints, closely approximating one row of the
//! Pharos database, plus its field-level validation pipeline and merge.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::datapoint::Datapoint;
use crate::error::ParseError;
use crate::report::Report;
use crate::validation::{
    apply_standard_rule, check_collection_date, check_dead_or_alive, check_decimal,
    check_detection_outcome, check_host_species, check_latitude, check_longitude,
    check_ncbi_tax_id, check_organism_sex,
};
use crate::vocab::{FieldAliasMap, Vocabularies};

/// Record-level metadata: UI-local display order, not merged across peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMeta {
    pub order: i64,
}

macro_rules! record_fields {
    ($($field:ident),+ $(,)?) => {
        /// One row of observations: a typed bag of named datapoints plus
        /// record-level meta and an `extras` side map for any unrecognised
        /// column names present in the input.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct Record {
            #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
            pub meta: Option<RecordMeta>,
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<Datapoint>,
            )+
            #[serde(flatten)]
            pub extras: BTreeMap<String, Datapoint>,
        }
    };
}

record_fields!(
    sample_id,
    animal_id,
    host_species,
    host_species_ncbi_tax_id,
    latitude,
    longitude,
    spatial_uncertainty,
    collection_day,
    collection_month,
    collection_year,
    collection_method_or_tissue,
    detection_method,
    primer_sequence,
    primer_citation,
    detection_target,
    detection_target_ncbi_tax_id,
    detection_outcome,
    detection_measurement,
    detection_measurement_units,
    pathogen,
    pathogen_ncbi_tax_id,
    genbank_accession,
    detection_comments,
    organism_sex,
    dead_or_alive,
    health_notes,
    life_stage,
    age,
    mass,
    length,
);

impl Record {
    /// Parse a record from UI-keyed JSON (an object whose keys are either
    /// `_meta` or a recognised field's UI display name, or an arbitrary
    /// unrecognised column name) and run the full validation pipeline.
    pub fn from_ui_json(
        value: &Value,
        aliases: &dyn FieldAliasMap,
        vocab: &Vocabularies<'_>,
    ) -> Result<Record, ParseError> {
        let object = value.as_object().ok_or_else(|| ParseError::WrongShape {
            entity: "Record",
            detail: "expected a JSON object".to_string(),
        })?;

        let mut record = Record::default();

        if let Some(meta_value) = object.get("_meta") {
            record.meta = Some(
                serde_json::from_value(meta_value.clone()).map_err(|err| ParseError::WrongShape {
                    entity: "Record",
                    detail: format!("_meta: {err}"),
                })?,
            );
        }

        for (ui_name, raw) in object {
            if ui_name == "_meta" {
                continue;
            }
            let Some(snake) = aliases.snake_name(ui_name) else {
                let mut datapoint = parse_datapoint(raw, "Record")?;
                datapoint.report = Some(Report::fail("Column is not recognized."));
                record.extras.insert(ui_name.clone(), datapoint);
                continue;
            };
            if raw.is_null() {
                continue;
            }
            let datapoint = parse_datapoint(raw, "Record")?;
            record.set_field(snake, Some(datapoint));
        }

        record.apply_default_pass_and_independent_rules(vocab);
        check_collection_date(
            &mut record.collection_day,
            &mut record.collection_month,
            &mut record.collection_year,
        );

        tracing::debug!(
            recognised_fields = record.recognised_fields().iter().filter(|(_, d)| d.is_some()).count(),
            extra_fields = record.extras.len(),
            "validated record"
        );

        Ok(record)
    }

    fn set_field(&mut self, snake: &str, value: Option<Datapoint>) {
        macro_rules! dispatch {
            ($($field:ident),+) => {
                match snake {
                    $(stringify!($field) => self.$field = value,)+
                    _ => unreachable!("snake_name only returns recognised fields"),
                }
            };
        }
        dispatch!(
            sample_id,
            animal_id,
            host_species,
            host_species_ncbi_tax_id,
            latitude,
            longitude,
            spatial_uncertainty,
            collection_day,
            collection_month,
            collection_year,
            collection_method_or_tissue,
            detection_method,
            primer_sequence,
            primer_citation,
            detection_target,
            detection_target_ncbi_tax_id,
            detection_outcome,
            detection_measurement,
            detection_measurement_units,
            pathogen,
            pathogen_ncbi_tax_id,
            genbank_accession,
            detection_comments,
            organism_sex,
            dead_or_alive,
            health_notes,
            life_stage,
            age,
            mass,
            length
        );
    }

    /// Pass 1: attach the default-pass `SUCCESS` report where the field's
    /// shape calls for it, then run every rule that only looks at its own
    /// field (everything except the date composite, which runs in pass 2).
    fn apply_default_pass_and_independent_rules(&mut self, vocab: &Vocabularies<'_>) {
        default_pass(&mut self.sample_id);
        default_pass(&mut self.animal_id);

        default_pass(&mut self.host_species);
        apply_standard_rule(&mut self.host_species, check_host_species);

        default_pass(&mut self.host_species_ncbi_tax_id);
        apply_standard_rule(&mut self.host_species_ncbi_tax_id, check_ncbi_tax_id);

        default_pass(&mut self.latitude);
        apply_standard_rule(&mut self.latitude, check_latitude);

        default_pass(&mut self.longitude);
        apply_standard_rule(&mut self.longitude, check_longitude);

        default_pass(&mut self.spatial_uncertainty);
        apply_standard_rule(&mut self.spatial_uncertainty, check_decimal);

        // collection_day / collection_month / collection_year: Plain shape,
        // no default-pass, no independent rule — handled entirely by the
        // pass-2 date composite.

        default_pass(&mut self.collection_method_or_tissue);
        default_pass(&mut self.detection_method);
        default_pass(&mut self.primer_sequence);
        default_pass(&mut self.primer_citation);
        default_pass(&mut self.detection_target);

        default_pass(&mut self.detection_target_ncbi_tax_id);
        apply_standard_rule(&mut self.detection_target_ncbi_tax_id, check_ncbi_tax_id);

        default_pass(&mut self.detection_outcome);
        if let Some(dp) = self.detection_outcome.as_mut() {
            crate::validation::skip_fail_warn(crate::validation::skip_empty_string(|dp| {
                check_detection_outcome(dp, vocab.detection_outcome)
            }))(dp);
        }

        default_pass(&mut self.detection_measurement);
        default_pass(&mut self.detection_measurement_units);
        default_pass(&mut self.pathogen);

        default_pass(&mut self.pathogen_ncbi_tax_id);
        apply_standard_rule(&mut self.pathogen_ncbi_tax_id, check_ncbi_tax_id);

        default_pass(&mut self.genbank_accession);
        default_pass(&mut self.detection_comments);

        default_pass(&mut self.organism_sex);
        if let Some(dp) = self.organism_sex.as_mut() {
            crate::validation::skip_fail_warn(crate::validation::skip_empty_string(|dp| {
                check_organism_sex(dp, vocab.organism_sex)
            }))(dp);
        }

        default_pass(&mut self.dead_or_alive);
        if let Some(dp) = self.dead_or_alive.as_mut() {
            crate::validation::skip_fail_warn(crate::validation::skip_empty_string(|dp| {
                check_dead_or_alive(dp, vocab.dead_or_alive)
            }))(dp);
        }

        default_pass(&mut self.health_notes);
        default_pass(&mut self.life_stage);

        default_pass(&mut self.age);
        apply_standard_rule(&mut self.age, check_decimal);

        default_pass(&mut self.mass);
        apply_standard_rule(&mut self.mass, check_decimal);

        default_pass(&mut self.length);
        apply_standard_rule(&mut self.length, check_decimal);
    }

    /// Merge two versions of the same record field-by-field. `meta` is
    /// UI-local and is never merged: the merged record always starts with
    /// no `meta`, regardless of what either side carried.
    pub fn merge(left: Option<Record>, right: Option<Record>) -> Option<Record> {
        let (left, right) = match (left, right) {
            (None, right) => return right,
            (left, None) => return left,
            (Some(l), Some(r)) => (l, r),
        };

        let mut merged = Record {
            meta: None,
            ..Record::default()
        };

        macro_rules! merge_field {
            ($field:ident) => {
                merged.$field = Datapoint::merge(left.$field.clone(), right.$field.clone());
            };
        }
        merge_field!(sample_id);
        merge_field!(animal_id);
        merge_field!(host_species);
        merge_field!(host_species_ncbi_tax_id);
        merge_field!(latitude);
        merge_field!(longitude);
        merge_field!(spatial_uncertainty);
        merge_field!(collection_day);
        merge_field!(collection_month);
        merge_field!(collection_year);
        merge_field!(collection_method_or_tissue);
        merge_field!(detection_method);
        merge_field!(primer_sequence);
        merge_field!(primer_citation);
        merge_field!(detection_target);
        merge_field!(detection_target_ncbi_tax_id);
        merge_field!(detection_outcome);
        merge_field!(detection_measurement);
        merge_field!(detection_measurement_units);
        merge_field!(pathogen);
        merge_field!(pathogen_ncbi_tax_id);
        merge_field!(genbank_accession);
        merge_field!(detection_comments);
        merge_field!(organism_sex);
        merge_field!(dead_or_alive);
        merge_field!(health_notes);
        merge_field!(life_stage);
        merge_field!(age);
        merge_field!(mass);
        merge_field!(length);

        let mut extras = left.extras;
        for (key, right_dp) in right.extras {
            let merged_dp = match extras.remove(&key) {
                Some(left_dp) => Datapoint::merge(Some(left_dp), Some(right_dp)),
                None => Some(right_dp),
            };
            if let Some(dp) = merged_dp {
                extras.insert(key, dp);
            }
        }
        merged.extras = extras;

        Some(merged)
    }

    /// Serialise back to UI-keyed JSON: the inverse of `from_ui_json`.
    /// Recognised fields are emitted under their display name, `extras`
    /// under their original (unrecognised) column name, unset fields are
    /// omitted entirely, and `_meta` is emitted only when present.
    pub fn to_ui_json(&self, aliases: &dyn FieldAliasMap) -> Value {
        let mut object = serde_json::Map::new();

        if let Some(meta) = &self.meta {
            object.insert(
                "_meta".to_string(),
                serde_json::to_value(meta).expect("RecordMeta always serialises"),
            );
        }

        for (snake, datapoint) in self.recognised_fields() {
            let Some(dp) = datapoint else { continue };
            let ui_name = aliases.ui_name(snake).to_string();
            object.insert(
                ui_name,
                serde_json::to_value(dp).expect("Datapoint always serialises"),
            );
        }

        for (ui_name, dp) in &self.extras {
            object.insert(
                ui_name.clone(),
                serde_json::to_value(dp).expect("Datapoint always serialises"),
            );
        }

        Value::Object(object)
    }

    /// Iterate every recognised-field datapoint slot together with its
    /// snake_case name (skips `meta`; includes empty slots as `None`).
    pub fn recognised_fields(&self) -> Vec<(&'static str, Option<&Datapoint>)> {
        vec![
            ("sample_id", self.sample_id.as_ref()),
            ("animal_id", self.animal_id.as_ref()),
            ("host_species", self.host_species.as_ref()),
            (
                "host_species_ncbi_tax_id",
                self.host_species_ncbi_tax_id.as_ref(),
            ),
            ("latitude", self.latitude.as_ref()),
            ("longitude", self.longitude.as_ref()),
            ("spatial_uncertainty", self.spatial_uncertainty.as_ref()),
            ("collection_day", self.collection_day.as_ref()),
            ("collection_month", self.collection_month.as_ref()),
            ("collection_year", self.collection_year.as_ref()),
            (
                "collection_method_or_tissue",
                self.collection_method_or_tissue.as_ref(),
            ),
            ("detection_method", self.detection_method.as_ref()),
            ("primer_sequence", self.primer_sequence.as_ref()),
            ("primer_citation", self.primer_citation.as_ref()),
            ("detection_target", self.detection_target.as_ref()),
            (
                "detection_target_ncbi_tax_id",
                self.detection_target_ncbi_tax_id.as_ref(),
            ),
            ("detection_outcome", self.detection_outcome.as_ref()),
            (
                "detection_measurement",
                self.detection_measurement.as_ref(),
            ),
            (
                "detection_measurement_units",
                self.detection_measurement_units.as_ref(),
            ),
            ("pathogen", self.pathogen.as_ref()),
            ("pathogen_ncbi_tax_id", self.pathogen_ncbi_tax_id.as_ref()),
            ("genbank_accession", self.genbank_accession.as_ref()),
            ("detection_comments", self.detection_comments.as_ref()),
            ("organism_sex", self.organism_sex.as_ref()),
            ("dead_or_alive", self.dead_or_alive.as_ref()),
            ("health_notes", self.health_notes.as_ref()),
            ("life_stage", self.life_stage.as_ref()),
            ("age", self.age.as_ref()),
            ("mass", self.mass.as_ref()),
            ("length", self.length.as_ref()),
        ]
    }
}

/// Attach the "default-pass" shape's auto-`SUCCESS` report: a non-empty
/// value with no pre-existing report is assumed ready to release until a
/// later rule says otherwise. `collection_day`/`month`/`year` use the
/// "plain" shape instead — they never call this — because their verdict is
/// composed across all three by the date rule and written only once.
fn default_pass(slot: &mut Option<Datapoint>) {
    if let Some(dp) = slot {
        if dp.report.is_none() && !dp.data_value.is_empty() {
            dp.report = Some(Report::success("Ready to release."));
        }
    }
}

fn parse_datapoint(raw: &Value, entity: &'static str) -> Result<Datapoint, ParseError> {
    serde_json::from_value(raw.clone()).map_err(|err| ParseError::WrongShape {
        entity,
        detail: err.to_string(),
    })
}
