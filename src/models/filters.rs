use serde::{Deserialize, Serialize};

/// Raw `GET /data-centers` query string.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    pub country: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "centerId")]
    pub center_id: Option<String>,
    #[serde(rename = "type")]
    pub center_type: Option<String>,
}

/// Per-field value sets used by the listing operation.
///
/// An empty set places no constraint on its field; it never means
/// "match nothing".
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryFilters {
    pub country: Vec<String>,
    pub name: Vec<String>,
    pub center_id: Vec<String>,
    #[serde(rename = "type")]
    pub center_type: Vec<String>,
}

impl QueryFilters {
    pub fn is_empty(&self) -> bool {
        self.country.is_empty()
            && self.name.is_empty()
            && self.center_id.is_empty()
            && self.center_type.is_empty()
    }
}

impl From<FilterParams> for QueryFilters {
    fn from(params: FilterParams) -> Self {
        Self {
            country: split_values(params.country),
            name: split_values(params.name),
            center_id: split_values(params.center_id),
            center_type: split_values(params.center_type),
        }
    }
}

fn split_values(raw: Option<String>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Returns true when `value` satisfies a filter set.
pub fn admits(set: &[String], value: &str) -> bool {
    set.is_empty() || set.iter().any(|allowed| allowed == value)
}
