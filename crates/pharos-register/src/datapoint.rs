//! The recursive, versioned data cell and its merge algorithm.

use serde::{Deserialize, Serialize};

use crate::error::DatapointError;
use crate::report::Report;

/// A single cell: a raw value, who last touched it, a monotonic version
/// used only to order edits, an optional validation verdict, and a link to
/// the prior version of the same cell.
///
/// `previous` exclusively owns its predecessor (freed when the head is
/// dropped) — histories are expected short, so an owning linked chain is
/// preferable to an arena of shared nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datapoint {
    #[serde(rename = "dataValue")]
    pub data_value: String,
    #[serde(rename = "modifiedBy")]
    pub modified_by: String,
    pub version: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<Report>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<Box<Datapoint>>,
}

impl Datapoint {
    pub fn new(data_value: impl Into<String>, modified_by: impl Into<String>, version: i64) -> Self {
        Self {
            data_value: data_value.into(),
            modified_by: modified_by.into(),
            version,
            report: None,
            previous: None,
        }
    }

    /// Chain a new version onto this one: the returned datapoint's
    /// `previous` is `self`.
    pub fn with_previous(mut self, previous: Datapoint) -> Self {
        self.previous = Some(Box::new(previous));
        self
    }

    /// Interpret `data_value` as a decimal number.
    pub fn as_decimal(&self) -> Result<f64, DatapointError> {
        self.data_value.parse::<f64>().map_err(|_| DatapointError::NonNumeric {
            raw: self.data_value.clone(),
        })
    }

    /// Interpret `data_value` as an integer.
    pub fn as_integer(&self) -> Result<i64, DatapointError> {
        self.data_value.parse::<i64>().map_err(|_| DatapointError::NonNumeric {
            raw: self.data_value.clone(),
        })
    }

    /// Interpret `data_value` as a non-zero integer.
    pub fn as_nonzero_integer(&self) -> Result<i64, DatapointError> {
        let value = self.as_integer()?;
        if value == 0 {
            return Err(DatapointError::ZeroValue);
        }
        Ok(value)
    }

    /// Length of the raw value string.
    pub fn value_len(&self) -> usize {
        self.data_value.len()
    }

    /// Whether `data_value` consists entirely of decimal digits.
    pub fn is_numeric(&self) -> bool {
        !self.data_value.is_empty() && self.data_value.chars().all(|c| c.is_ascii_digit())
    }

    /// Reconcile two divergent histories of the same cell into one linear
    /// chain.
    ///
    /// - Either side absent: return the other.
    /// - Equal versions: prefer the side carrying a `report`; ties (both or
    ///   neither have one) are semantically equal, so either may be kept.
    /// - Unequal versions: the newer side wins at this node, recursing the
    ///   older side into its `previous`.
    ///
    /// The result contains, in strictly decreasing version order, every
    /// distinct version present on either side; equal-version nodes collapse
    /// to one.
    pub fn merge(left: Option<Datapoint>, right: Option<Datapoint>) -> Option<Datapoint> {
        let (mut left, mut right) = match (left, right) {
            (None, right) => return right,
            (left, None) => return left,
            (Some(l), Some(r)) => (l, r),
        };

        tracing::debug!(left_version = left.version, right_version = right.version, "merging datapoint histories");

        if left.version == right.version {
            let previous = Datapoint::merge(
                left.previous.take().map(|b| *b),
                right.previous.take().map(|b| *b),
            );
            let mut winner = if left.report.is_some() { left } else { right };
            winner.previous = previous.map(Box::new);
            return Some(winner);
        }

        if left.version > right.version {
            let previous = Datapoint::merge(left.previous.take().map(|b| *b), Some(right));
            let mut winner = left;
            winner.previous = previous.map(Box::new);
            return Some(winner);
        }

        let previous = Datapoint::merge(Some(left), right.previous.take().map(|b| *b));
        let mut winner = right;
        winner.previous = previous.map(Box::new);
        Some(winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportScore;

    fn dp(value: &str, version: i64) -> Datapoint {
        Datapoint::new(value, "u1", version)
    }

    #[test]
    fn merge_either_absent_returns_the_other() {
        let d = dp("1", 1);
        assert_eq!(Datapoint::merge(Some(d.clone()), None), Some(d.clone()));
        assert_eq!(Datapoint::merge(None, Some(d.clone())), Some(d));
        assert_eq!(Datapoint::merge(None, None), None);
    }

    #[test]
    fn merge_is_idempotent() {
        let d = dp("1", 1);
        let merged = Datapoint::merge(Some(d.clone()), Some(d.clone()));
        assert_eq!(merged, Some(d));
    }

    #[test]
    fn merge_tie_with_report_wins_s5() {
        let mut l = dp("1", 5);
        l.report = Some(Report::fail("bad"));
        let r = dp("1", 5);

        let merged = Datapoint::merge(Some(l), Some(r)).unwrap();
        assert_eq!(merged.version, 5);
        assert_eq!(merged.report.unwrap().status, ReportScore::Fail);
    }

    #[test]
    fn merge_tie_is_commutative_when_reports_agree() {
        let l = dp("1", 5);
        let r = dp("1", 5);
        assert_eq!(
            Datapoint::merge(Some(l.clone()), Some(r.clone())),
            Datapoint::merge(Some(r), Some(l))
        );
    }

    #[test]
    fn merge_newer_version_wins_at_the_head() {
        let l = dp("a", 10);
        let r = dp("b", 3);
        let merged = Datapoint::merge(Some(l), Some(r)).unwrap();
        assert_eq!(merged.data_value, "a");
        assert_eq!(merged.version, 10);
        assert_eq!(merged.previous.unwrap().version, 3);
    }

    #[test]
    fn merge_preserves_strictly_decreasing_versions_across_chains() {
        let l = dp("l2", 6).with_previous(dp("l1", 2));
        let r = dp("r2", 4).with_previous(dp("r1", 1));

        let merged = Datapoint::merge(Some(l), Some(r)).unwrap();
        let mut versions = vec![merged.version];
        let mut cur = merged.previous;
        while let Some(node) = cur {
            versions.push(node.version);
            cur = node.previous;
        }
        assert_eq!(versions, vec![6, 4, 2, 1]);
        assert!(versions.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn decimal_coercion_rejects_non_numeric() {
        let d = dp("not-a-number", 1);
        assert_eq!(
            d.as_decimal(),
            Err(DatapointError::NonNumeric {
                raw: "not-a-number".to_string()
            })
        );
    }

    #[test]
    fn integer_coercion_parses_valid_values() {
        let d = dp("42", 1);
        assert_eq!(d.as_integer(), Ok(42));
    }

    #[test]
    fn nonzero_integer_coercion_rejects_zero() {
        let d = dp("0", 1);
        assert_eq!(d.as_nonzero_integer(), Err(DatapointError::ZeroValue));
    }

    #[test]
    fn value_len_and_is_numeric() {
        let d = dp("1234567", 1);
        assert_eq!(d.value_len(), 7);
        assert!(d.is_numeric());

        let d2 = dp("12a", 1);
        assert!(!d2.is_numeric());
    }
}
