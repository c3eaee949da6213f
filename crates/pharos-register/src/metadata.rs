//! Identifier-carrying DTOs that round-trip through an external metadata
//! store. Pure data shapes; validation here is limited to structural shape
//! (forbidding unknown fields), never field-rule validation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::release_report::ReleaseReport;

/// A `pk`/`sk`-addressed row in the external metadata store, the shape
/// every DTO in this module round-trips through via `to_table_item` /
/// `from_table_item`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableItem {
    pub pk: String,
    pub sk: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// A researcher account. Partition key `researcher_id`, sort key `"_meta"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct User {
    pub researcher_id: String,
    pub organization: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_ids: Option<Vec<String>>,
}

impl User {
    pub fn to_table_item(&self) -> Result<TableItem, ParseError> {
        to_table_item(self, "User", &self.researcher_id, "_meta", &["researcherId"])
    }

    pub fn from_table_item(item: TableItem) -> Result<Self, ParseError> {
        from_table_item(item, "User", "researcherId")
    }
}

/// A collaborator's role on a [`Project`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectAuthorRole {
    Admin,
}

/// A project collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct Author {
    pub researcher_id: String,
    pub role: ProjectAuthorRole,
}

/// Where a project sits in the publishing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectPublishStatus {
    Unpublished,
    Publishing,
    Published,
}

/// A collection of datasets maintained by one or more researchers.
/// Partition key `project_id`, sort key `"_meta"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct Project {
    pub project_id: String,
    pub name: String,
    pub dataset_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_dataset_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surveillance_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_materials: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_publications: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub others_citing: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<Author>>,
    pub publish_status: ProjectPublishStatus,
}

impl Project {
    pub fn to_table_item(&self) -> Result<TableItem, ParseError> {
        to_table_item(self, "Project", &self.project_id, "_meta", &["projectId"])
    }

    pub fn from_table_item(item: TableItem) -> Result<Self, ParseError> {
        from_table_item(item, "Project", "projectId")
    }
}

/// Where a dataset sits in the release/publish lifecycle. Shared between
/// [`Dataset::release_status`] and [`ReleaseReport::release_status`].
pub use crate::release_report::DatasetReleaseStatus;

/// Metadata for one page of a dataset's paginated register storage.
/// Named `RegisterPageMeta` (not `RegisterPage`, which names
/// `pharos-store`'s pagination contract) to keep the two apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RegisterPageMeta {
    pub last_updated: String,
}

/// Metadata about one dataset. Partition key `project_id`, sort key
/// `dataset_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct Dataset {
    pub project_id: String,
    pub dataset_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earliest_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_status: Option<DatasetReleaseStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_report: Option<ReleaseReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub register_pages: Option<std::collections::BTreeMap<String, RegisterPageMeta>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
}

impl Dataset {
    pub fn to_table_item(&self) -> Result<TableItem, ParseError> {
        to_table_item(
            self,
            "Dataset",
            &self.project_id,
            &self.dataset_id,
            &["projectId", "datasetId"],
        )
    }

    pub fn from_table_item(item: TableItem) -> Result<Self, ParseError> {
        let mut attributes = item.attributes;
        attributes.insert("projectId".to_string(), Value::String(item.pk));
        attributes.insert("datasetId".to_string(), Value::String(item.sk));
        serde_json::from_value(Value::Object(attributes)).map_err(|err| ParseError::WrongShape {
            entity: "Dataset",
            detail: err.to_string(),
        })
    }
}

/// Serialise `entity` to its table-item shape: `pk`/`sk` are injected and
/// the logical-id keys named in `drop_keys` are removed from `attributes`
/// since they're now represented by `pk`/`sk`.
fn to_table_item<T: Serialize>(
    entity: &T,
    entity_name: &'static str,
    pk: &str,
    sk: &str,
    drop_keys: &[&str],
) -> Result<TableItem, ParseError> {
    let value = serde_json::to_value(entity).map_err(|err| ParseError::WrongShape {
        entity: entity_name,
        detail: err.to_string(),
    })?;
    let mut attributes = match value {
        Value::Object(map) => map,
        _ => {
            return Err(ParseError::WrongShape {
                entity: entity_name,
                detail: "expected a JSON object".to_string(),
            })
        }
    };
    for key in drop_keys {
        attributes.remove(*key);
    }
    Ok(TableItem {
        pk: pk.to_string(),
        sk: sk.to_string(),
        attributes,
    })
}

/// Inverse of [`to_table_item`]: reintroduce `pk` under `id_key` before
/// deserialising (the `sk` is dropped for `User`/`Project`, or handled by
/// the caller for `Dataset`, whose sort key is itself a logical field).
fn from_table_item<T: for<'de> Deserialize<'de>>(
    item: TableItem,
    entity_name: &'static str,
    id_key: &'static str,
) -> Result<T, ParseError> {
    let mut attributes = item.attributes;
    attributes.insert(id_key.to_string(), Value::String(item.pk));
    serde_json::from_value(Value::Object(attributes)).map_err(|err| ParseError::WrongShape {
        entity: entity_name,
        detail: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_round_trips_through_table_item() {
        let user = User {
            researcher_id: "u1".to_string(),
            organization: "Org".to_string(),
            email: "u1@example.com".to_string(),
            name: "User One".to_string(),
            project_ids: Some(vec!["p1".to_string()]),
            first_name: None,
            last_name: None,
            download_ids: None,
        };

        let item = user.to_table_item().unwrap();
        assert_eq!(item.pk, "u1");
        assert_eq!(item.sk, "_meta");
        assert!(!item.attributes.contains_key("researcherId"));

        let restored = User::from_table_item(item).unwrap();
        assert_eq!(restored, user);
    }

    #[test]
    fn project_rejects_unknown_field() {
        let value = serde_json::json!({
            "projectId": "p1",
            "name": "Project One",
            "datasetIds": [],
            "publishStatus": "Unpublished",
            "bogusField": true,
        });
        let err = serde_json::from_value::<Project>(value).unwrap_err();
        assert!(err.to_string().contains("bogusField") || err.is_data());
    }

    #[test]
    fn dataset_round_trips_through_table_item() {
        let dataset = Dataset {
            project_id: "p1".to_string(),
            dataset_id: "d1".to_string(),
            name: "Dataset One".to_string(),
            last_updated: None,
            earliest_date: None,
            latest_date: None,
            release_status: Some(DatasetReleaseStatus::Unreleased),
            release_report: None,
            register_pages: None,
            age: None,
            mass: None,
            length: None,
        };

        let item = dataset.to_table_item().unwrap();
        assert_eq!(item.pk, "p1");
        assert_eq!(item.sk, "d1");

        let restored = Dataset::from_table_item(item).unwrap();
        assert_eq!(restored, dataset);
    }

    #[test]
    fn enum_fields_serialise_as_display_string() {
        assert_eq!(
            serde_json::to_string(&ProjectPublishStatus::Unpublished).unwrap(),
            "\"Unpublished\""
        );
        assert_eq!(
            serde_json::to_string(&DatasetReleaseStatus::Released).unwrap(),
            "\"Released\""
        );
        assert_eq!(
            serde_json::to_string(&ProjectAuthorRole::Admin).unwrap(),
            "\"Admin\""
        );
    }
}
