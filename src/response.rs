//! Response bodies beyond the bare entity.

use crate::model::{Horse, ListQuery};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `GET /horses/`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HorseListResponse {
    pub items: Vec<Horse>,
    /// Rows matching the filters, regardless of skip and limit.
    pub total: i64,
    /// Offset that was applied.
    pub skip: i64,
    /// Page size that was applied.
    pub limit: i64,
}

impl HorseListResponse {
    pub fn new(items: Vec<Horse>, total: i64, query: &ListQuery) -> Self {
        HorseListResponse {
            items,
            total,
            skip: query.skip,
            limit: query.limit,
        }
    }
}

#[derive(Serialize)]
pub struct HealthBody {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct ReadyBody {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<&'static str>,
}

#[derive(Serialize)]
pub struct VersionBody {
    pub name: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_echoes_applied_page() {
        let query = ListQuery {
            skip: 30,
            limit: 15,
            ..Default::default()
        };
        let body = HorseListResponse::new(Vec::new(), 42, &query);
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v, serde_json::json!({"items": [], "total": 42, "skip": 30, "limit": 15}));
    }
}
