//! # Data Center Records
//!
//! The record type exchanged over the API and kept by the data-access
//! services. Client payloads carry the editable fields (plus the id on update);
//! the server owns the id and the timestamps.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

use crate::models::filters::{QueryFilters, admits};
use crate::utils::validator::{CENTER_ID_REGEX, COUNTRY_REGEX};

/// Editable attributes of a data center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DataCenterFields {
    #[validate(regex(path = "*CENTER_ID_REGEX", message = "centerId must be a short code"))]
    pub center_id: String,
    #[validate(regex(path = "*COUNTRY_REGEX", message = "country must be an ISO 3166 alpha-2 code"))]
    pub country: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "type must not be empty"))]
    pub center_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub song_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub score_url: Option<String>,
}

/// Body of `POST /data-centers` and `PUT /data-centers`.
///
/// `id` is ignored on create and required on update. It is kept as sent so a
/// malformed id is reported by the store like any other unknown id.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DataCenterPayload {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    #[validate(nested)]
    pub fields: DataCenterFields,
}

/// A stored data center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataCenter {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: DataCenterFields,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl DataCenter {
    /// Builds a new record with a fresh id.
    pub fn create(fields: DataCenterFields) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4(),
            fields,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the editable fields, keeping id and creation time.
    pub fn replaced_with(&self, fields: DataCenterFields) -> Self {
        Self {
            id: self.id,
            fields,
            created_at: self.created_at,
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn center_id(&self) -> &str {
        &self.fields.center_id
    }

    pub fn matches(&self, filters: &QueryFilters) -> bool {
        admits(&filters.country, &self.fields.country)
            && admits(&filters.name, &self.fields.name)
            && admits(&filters.center_id, &self.fields.center_id)
            && admits(&filters.center_type, &self.fields.center_type)
    }
}
