use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;
pub const DEFAULT_SORT_FIELD: &str = "created_at";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Columns a list may be ordered by. Anything else is rejected before SQL is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Radius,
    Color,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    const ALL: [SortField; 6] = [
        SortField::Id,
        SortField::Name,
        SortField::Radius,
        SortField::Color,
        SortField::CreatedAt,
        SortField::UpdatedAt,
    ];

    pub fn column(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Radius => "radius",
            SortField::Color => "color",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|f| f.column()).collect()
    }
}

impl FromStr for SortField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.column() == s)
            .ok_or_else(|| AppError::InvalidSortField(s.to_string()))
    }
}

/// Raw query string of `GET /horses/`, before range checks.
#[derive(Clone, Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Rows to skip.
    #[serde(default)]
    #[param(minimum = 0, default = 0)]
    pub skip: i64,
    /// Page size.
    #[serde(default = "default_limit")]
    #[param(minimum = 1, maximum = 100, default = 10)]
    pub limit: i64,
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
    /// Inclusive lower bound on radius.
    #[param(exclusive_minimum = 0.0)]
    pub min_radius: Option<f64>,
    /// Inclusive upper bound on radius.
    #[param(exclusive_minimum = 0.0)]
    pub max_radius: Option<f64>,
    /// One of id, name, radius, color, created_at, updated_at.
    #[serde(default = "default_sort_by")]
    #[param(default = "created_at")]
    pub sort_by: String,
    #[serde(default)]
    #[param(inline)]
    pub sort_order: SortOrder,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

fn default_sort_by() -> String {
    DEFAULT_SORT_FIELD.to_string()
}

impl Default for ListParams {
    fn default() -> Self {
        ListParams {
            skip: 0,
            limit: DEFAULT_LIMIT,
            name: None,
            min_radius: None,
            max_radius: None,
            sort_by: default_sort_by(),
            sort_order: SortOrder::default(),
        }
    }
}

/// Conjunctive row filter. Every present condition must hold.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HorseFilter {
    pub name_contains: Option<String>,
    pub min_radius: Option<f64>,
    pub max_radius: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for Sort {
    fn default() -> Self {
        Sort {
            field: SortField::CreatedAt,
            order: SortOrder::Desc,
        }
    }
}

/// Validated list request.
#[derive(Clone, Debug, PartialEq)]
pub struct ListQuery {
    pub skip: i64,
    pub limit: i64,
    pub filter: HorseFilter,
    pub sort: Sort,
}

impl Default for ListQuery {
    fn default() -> Self {
        ListQuery {
            skip: 0,
            limit: DEFAULT_LIMIT,
            filter: HorseFilter::default(),
            sort: Sort::default(),
        }
    }
}
