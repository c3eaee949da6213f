//! Per-field validation rules and the decorator pattern that composes them.
//!
//! Every field rule is a plain `fn(&mut Datapoint)` (or, for rules that
//! consult a vocabulary table, `fn(&mut Datapoint, &dyn VocabularyMap)`).
//! Two universal decorators wrap every field-specific rule, applied in this
//! order: `skip_fail_warn` (a datapoint that already failed or warned is
//! left alone) then `skip_empty_string` (an empty value carries history
//! only and is never validated).

use crate::datapoint::Datapoint;
use crate::report::{Report, ReportScore};
use crate::vocab::VocabularyMap;

/// Skip datapoints that already carry a `FAIL` or `WARNING` report.
pub fn skip_fail_warn<F: Fn(&mut Datapoint)>(rule: F) -> impl Fn(&mut Datapoint) {
    move |dp: &mut Datapoint| {
        if let Some(report) = &dp.report {
            if matches!(report.status, ReportScore::Fail | ReportScore::Warning) {
                return;
            }
        }
        rule(dp);
    }
}

/// Clear the report and skip validation for an empty-string value.
pub fn skip_empty_string<F: Fn(&mut Datapoint)>(rule: F) -> impl Fn(&mut Datapoint) {
    move |dp: &mut Datapoint| {
        if dp.data_value.is_empty() {
            dp.report = None;
            return;
        }
        rule(dp);
    }
}

/// Apply a standard field rule (both decorators, in spec order) to an
/// optional datapoint slot. No-op if the slot is empty.
pub fn apply_standard_rule<F: Fn(&mut Datapoint)>(slot: &mut Option<Datapoint>, rule: F) {
    if let Some(dp) = slot {
        skip_fail_warn(skip_empty_string(rule))(dp);
    }
}

const HUMAN_HOST_NAMES: &[&str] = &["homo sapiens", "homo sapien", "human"];

/// `host_species`: reject human hosts.
pub fn check_host_species(dp: &mut Datapoint) {
    if HUMAN_HOST_NAMES.contains(&dp.data_value.to_lowercase().as_str()) {
        dp.report = Some(Report::fail(
            "Please do not upload data on human infections to Pharos.",
        ));
    }
}

/// `host_species_ncbi_tax_id`, `detection_target_ncbi_tax_id`,
/// `pathogen_ncbi_tax_id`: one to seven decimal digits.
pub fn check_ncbi_tax_id(dp: &mut Datapoint) {
    let fail = || Report::fail("A NCBI taxonomic identifier consists of one to seven digits.");
    match dp.as_integer() {
        Ok(_) => {
            let len = dp.value_len();
            if !(0 < len && len < 8) {
                dp.report = Some(fail());
            }
        }
        Err(_) => dp.report = Some(fail()),
    }
}

/// `detection_outcome`: must match the detection-outcome vocabulary.
pub fn check_detection_outcome(dp: &mut Datapoint, vocab: &dyn VocabularyMap) {
    if vocab.canonical(&dp.data_value.to_lowercase()).is_none() {
        dp.report = Some(Report::fail(
            "Detection outcome must be an unambiguous value such as 'positive', \
             'negative', or 'inconclusive'.",
        ));
    }
}

/// `organism_sex`: must match the organism-sex vocabulary.
pub fn check_organism_sex(dp: &mut Datapoint, vocab: &dyn VocabularyMap) {
    if vocab.canonical(&dp.data_value.to_lowercase()).is_none() {
        dp.report = Some(Report::fail(
            "Organism sex must be an unambiguous value such as male, female, or unknown.",
        ));
    }
}

/// `dead_or_alive`: must match the dead-or-alive vocabulary.
pub fn check_dead_or_alive(dp: &mut Datapoint, vocab: &dyn VocabularyMap) {
    if vocab.canonical(&dp.data_value.to_lowercase()).is_none() {
        dp.report = Some(Report::fail(
            "Dead or alive must be an unambiguous value such as dead, alive, or unknown.",
        ));
    }
}

/// `latitude`: decimal in `[-90, 90]`.
pub fn check_latitude(dp: &mut Datapoint) {
    match dp.as_decimal() {
        Ok(value) if (-90.0..=90.0).contains(&value) => {}
        _ => dp.report = Some(Report::fail("Latitude must be between -90 and 90.")),
    }
}

/// `longitude`: decimal in `[-180, 180]`.
pub fn check_longitude(dp: &mut Datapoint) {
    match dp.as_decimal() {
        Ok(value) if (-180.0..=180.0).contains(&value) => {}
        _ => dp.report = Some(Report::fail("Longitude must be between -180 and 180.")),
    }
}

/// `age`, `mass`, `length`, `spatial_uncertainty`: must be decimal.
pub fn check_decimal(dp: &mut Datapoint) {
    if dp.as_decimal().is_err() {
        dp.report = Some(Report::fail(
            "Must be a number, units can be configured in dataset settings (coming soon).",
        ));
    }
}

/// Reason a calendar date is invalid, mirroring the phrasing of a standard
/// date-library range error. `None` when `(year, month, day)` is valid.
fn invalid_date_reason(year: i64, month: i64, day: i64) -> Option<&'static str> {
    if !(1..=12).contains(&month) {
        return Some("month must be in 1..12");
    }
    let Ok(year) = i32::try_from(year) else {
        return Some("year is out of range");
    };
    let Ok(month) = u32::try_from(month) else {
        return Some("month must be in 1..12");
    };
    let Ok(day) = u32::try_from(day) else {
        return Some("day is out of range for month");
    };
    if chrono::NaiveDate::from_ymd_opt(year, month, day).is_none() {
        return Some("day is out of range for month");
    }
    None
}

/// The `collection_year`/`collection_day`/`collection_month` composite
/// cross-field rule. Runs in pass 2, after all three siblings are parsed.
///
/// Skipped entirely if either `day` or `month` is absent. If `year` is
/// empty, its report is cleared and the rule stops. Otherwise the year
/// string must be four digits; if so, a calendar date is constructed and
/// the same report (`SUCCESS` or `FAIL`) is written onto all three
/// datapoints.
pub fn check_collection_date(
    day: &mut Option<Datapoint>,
    month: &mut Option<Datapoint>,
    year: &mut Option<Datapoint>,
) {
    let (Some(day), Some(month)) = (day.as_mut(), month.as_mut()) else {
        return;
    };
    if day.data_value.is_empty() || month.data_value.is_empty() {
        return;
    }
    let Some(year) = year.as_mut() else {
        return;
    };

    if year.data_value.is_empty() {
        year.report = None;
        return;
    }

    if year.value_len() < 4 {
        year.report = Some(Report::fail("Year must be a four-digit year"));
        return;
    }

    let parsed = (day.as_integer(), month.as_integer(), year.as_integer());
    let report = match parsed {
        (Ok(d), Ok(m), Ok(y)) => match invalid_date_reason(y, m, d) {
            None => Report::success(format!("Date {y:04}-{m:02}-{d:02} is ready to release")),
            Some(reason) => Report::fail(format!("Date {y}-{m}-{d} is invalid, {reason}.")),
        },
        _ => Report::fail("All of day, month, and year must be numbers."),
    };

    day.report = Some(report.clone());
    month.report = Some(report.clone());
    year.report = Some(report);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::DETECTION_OUTCOME_VALUES;

    fn dp(value: &str) -> Datapoint {
        Datapoint::new(value, "u1", 1)
    }

    #[test]
    fn skip_fail_warn_leaves_failed_datapoint_untouched() {
        let mut d = dp("Homo Sapiens");
        d.report = Some(Report::fail("earlier failure"));
        skip_fail_warn(check_host_species)(&mut d);
        assert_eq!(d.report.unwrap().message, "earlier failure");
    }

    #[test]
    fn skip_empty_string_clears_report() {
        let mut d = dp("");
        d.report = Some(Report::success("stale"));
        skip_empty_string(check_host_species)(&mut d);
        assert!(d.report.is_none());
    }

    #[test]
    fn s1_human_host_rejected() {
        let mut slot = Some(dp("Homo Sapiens"));
        apply_standard_rule(&mut slot, check_host_species);
        assert_eq!(
            slot.unwrap().report.unwrap().message,
            "Please do not upload data on human infections to Pharos."
        );
    }

    #[test]
    fn s2_ncbi_digit_bound() {
        let mut too_long = Some(dp("12345678"));
        apply_standard_rule(&mut too_long, check_ncbi_tax_id);
        assert_eq!(too_long.unwrap().report.unwrap().status, ReportScore::Fail);

        let mut ok = Some(dp("1234567"));
        apply_standard_rule(&mut ok, check_ncbi_tax_id);
        assert_eq!(ok.unwrap().report, None);
    }

    #[test]
    fn detection_outcome_accepts_vocabulary_member() {
        let mut d = dp("positive");
        check_detection_outcome(&mut d, &DETECTION_OUTCOME_VALUES);
        assert!(d.report.is_none());
    }

    #[test]
    fn detection_outcome_rejects_unknown_value() {
        let mut d = dp("maybe");
        check_detection_outcome(&mut d, &DETECTION_OUTCOME_VALUES);
        assert_eq!(d.report.unwrap().status, ReportScore::Fail);
    }

    #[test]
    fn latitude_out_of_range_fails() {
        let mut d = dp("91");
        check_latitude(&mut d);
        assert_eq!(
            d.report.unwrap().message,
            "Latitude must be between -90 and 90."
        );
    }

    #[test]
    fn s3_invalid_date_fails_all_three() {
        let mut day = Some(dp("31"));
        let mut month = Some(dp("02"));
        let mut year = Some(dp("2023"));
        check_collection_date(&mut day, &mut month, &mut year);

        for slot in [&day, &month, &year] {
            let report = slot.as_ref().unwrap().report.as_ref().unwrap();
            assert_eq!(report.status, ReportScore::Fail);
            assert!(report.message.starts_with("Date 2023-2-31 is invalid"));
        }
    }

    #[test]
    fn s3_valid_date_succeeds_all_three() {
        let mut day = Some(dp("15"));
        let mut month = Some(dp("06"));
        let mut year = Some(dp("2023"));
        check_collection_date(&mut day, &mut month, &mut year);

        for slot in [&day, &month, &year] {
            let report = slot.as_ref().unwrap().report.as_ref().unwrap();
            assert_eq!(
                report.message,
                "Date 2023-06-15 is ready to release"
            );
        }
    }

    #[test]
    fn s4_partial_date_leaves_year_unset() {
        let mut day = None;
        let mut month = None;
        let mut year = Some(dp("2023"));
        check_collection_date(&mut day, &mut month, &mut year);
        assert!(year.unwrap().report.is_none());
    }

    #[test]
    fn empty_day_or_month_is_history_only_and_gets_no_report() {
        let mut day = Some(dp(""));
        let mut month = Some(dp("06"));
        let mut year = Some(dp("2023"));
        check_collection_date(&mut day, &mut month, &mut year);
        assert!(day.unwrap().report.is_none());
        assert!(month.unwrap().report.is_none());
        assert!(year.unwrap().report.is_none());
    }
}
