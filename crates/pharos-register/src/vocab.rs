//! Alias and controlled-vocabulary contracts.
//!
//! `spec.md` treats the snake_case<->UI name map and the controlled
//! vocabulary tables as opaque, externally-provided lookup tables. These
//! traits define the shape the validation pipeline consumes; the `Static*`
//! implementations seed them from the recognised-field table and the
//! documented vocabulary members so the pipeline can be exercised without a
//! real deployment's richer tables.

/// Translates between a recognised snake_case field name and its UI display
/// name. Bijective over the recognised-field set.
pub trait FieldAliasMap {
    fn ui_name<'a>(&self, snake: &'a str) -> &'a str;

    /// Reverse lookup: the snake_case name for a UI display name, or `None`
    /// if `ui` does not name a recognised field.
    fn snake_name<'a>(&self, ui: &'a str) -> Option<&'a str>;
}

/// Case-insensitive controlled-vocabulary lookup: maps an already-lowercased
/// raw string to its canonical value, or `None` if unrecognised.
pub trait VocabularyMap {
    fn canonical(&self, raw_lower: &str) -> Option<&str>;
}

/// The closed set of recognised `Record` fields, snake_case paired with
/// their UI display name, per `spec.md` §6. Bijective by construction
/// (checked in tests — no UI name repeats).
pub const RECOGNISED_FIELDS: &[(&str, &str)] = &[
    ("sample_id", "Sample ID"),
    ("animal_id", "Animal ID"),
    ("host_species", "Host species"),
    ("host_species_ncbi_tax_id", "Host species NCBI tax ID"),
    ("latitude", "Latitude"),
    ("longitude", "Longitude"),
    ("spatial_uncertainty", "Spatial uncertainty"),
    ("collection_day", "Collection day"),
    ("collection_month", "Collection month"),
    ("collection_year", "Collection year"),
    ("collection_method_or_tissue", "Collection method or tissue"),
    ("detection_method", "Detection method"),
    ("primer_sequence", "Primer sequence"),
    ("primer_citation", "Primer citation"),
    ("detection_target", "Detection target"),
    ("detection_target_ncbi_tax_id", "Detection target NCBI tax ID"),
    ("detection_outcome", "Detection outcome"),
    ("detection_measurement", "Detection measurement"),
    ("detection_measurement_units", "Detection measurement units"),
    ("pathogen", "Pathogen"),
    ("pathogen_ncbi_tax_id", "Pathogen NCBI tax ID"),
    ("genbank_accession", "GenBank accession"),
    ("detection_comments", "Detection comments"),
    ("organism_sex", "Organism sex"),
    ("dead_or_alive", "Dead or alive"),
    ("health_notes", "Health notes"),
    ("life_stage", "Life stage"),
    ("age", "Age"),
    ("mass", "Mass"),
    ("length", "Length"),
];

/// `FieldAliasMap` seeded from [`RECOGNISED_FIELDS`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticAliasMap;

impl FieldAliasMap for StaticAliasMap {
    fn ui_name<'a>(&self, snake: &'a str) -> &'a str {
        RECOGNISED_FIELDS
            .iter()
            .find(|(s, _)| *s == snake)
            .map(|(_, ui)| *ui)
            .unwrap_or(snake)
    }

    fn snake_name<'a>(&self, ui: &'a str) -> Option<&'a str> {
        RECOGNISED_FIELDS
            .iter()
            .find(|(_, u)| *u == ui)
            .map(|(s, _)| *s)
    }
}

/// `VocabularyMap` backed by a fixed `(accepted, canonical)` table, matched
/// case-insensitively against an already-lowercased query.
#[derive(Debug, Clone, Copy)]
pub struct StaticVocabularyMap {
    entries: &'static [(&'static str, &'static str)],
}

impl VocabularyMap for StaticVocabularyMap {
    fn canonical(&self, raw_lower: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(accepted, _)| *accepted == raw_lower)
            .map(|(_, canonical)| *canonical)
    }
}

/// `detection_outcome` values accepted as positive/negative/inconclusive.
pub const DETECTION_OUTCOME_VALUES: StaticVocabularyMap = StaticVocabularyMap {
    entries: &[
        ("positive", "Positive"),
        ("negative", "Negative"),
        ("inconclusive", "Inconclusive"),
    ],
};

/// `organism_sex` values accepted as male/female/unknown.
pub const ORGANISM_SEX_VALUES: StaticVocabularyMap = StaticVocabularyMap {
    entries: &[
        ("male", "Male"),
        ("female", "Female"),
        ("unknown", "Unknown"),
    ],
};

/// `dead_or_alive` values accepted as dead/alive/unknown.
pub const DEAD_OR_ALIVE_VALUES: StaticVocabularyMap = StaticVocabularyMap {
    entries: &[
        ("dead", "Dead"),
        ("alive", "Alive"),
        ("unknown", "Unknown"),
    ],
};

/// The three controlled-vocabulary tables a `Record` validation pass needs,
/// bundled so callers can substitute richer tables without changing the
/// validation pipeline's signature.
#[derive(Clone, Copy)]
pub struct Vocabularies<'a> {
    pub detection_outcome: &'a dyn VocabularyMap,
    pub organism_sex: &'a dyn VocabularyMap,
    pub dead_or_alive: &'a dyn VocabularyMap,
}

impl Default for Vocabularies<'static> {
    fn default() -> Self {
        Self {
            detection_outcome: &DETECTION_OUTCOME_VALUES,
            organism_sex: &ORGANISM_SEX_VALUES,
            dead_or_alive: &DEAD_OR_ALIVE_VALUES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn recognised_fields_are_bijective() {
        let snakes: HashSet<_> = RECOGNISED_FIELDS.iter().map(|(s, _)| *s).collect();
        let uis: HashSet<_> = RECOGNISED_FIELDS.iter().map(|(_, u)| *u).collect();
        assert_eq!(snakes.len(), RECOGNISED_FIELDS.len());
        assert_eq!(uis.len(), RECOGNISED_FIELDS.len());
    }

    #[test]
    fn alias_map_translates_known_field() {
        let aliases = StaticAliasMap;
        assert_eq!(aliases.ui_name("host_species"), "Host species");
    }

    #[test]
    fn alias_map_falls_back_to_snake_for_unknown_field() {
        let aliases = StaticAliasMap;
        assert_eq!(aliases.ui_name("not_a_field"), "not_a_field");
    }

    #[test]
    fn detection_outcome_vocabulary_matches_case_insensitively() {
        assert_eq!(
            DETECTION_OUTCOME_VALUES.canonical("positive"),
            Some("Positive")
        );
        assert_eq!(DETECTION_OUTCOME_VALUES.canonical("bogus"), None);
    }
}
