//! Paginated user listing used by the admin console.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use super::role::Role;

/// Rows per page until the admin picks another size.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Coarse activity buckets the backend can filter on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityLevel {
    /// No recent contributions.
    Inactive,
    /// Occasional contributor.
    Low,
    /// Regular contributor.
    Medium,
    /// Very active contributor.
    High,
}

/// Direction of a server-side sort.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

/// Server-side sort order, encoded as `field,direction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    /// Backend field name, e.g. `points` or `createdAt`.
    pub field: String,
    /// Ascending or descending.
    pub direction: SortDirection,
}

impl SortOrder {
    /// Sort on `field` in `direction`.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// The `sort` query parameter value.
    #[must_use]
    pub fn to_param(&self) -> String {
        format!("{},{}", self.field, self.direction)
    }
}

/// Filters applied to the listing. Empty / `None` fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFilters {
    /// Users holding any of these roles.
    pub roles: Vec<Role>,
    /// Users registered on or after this date.
    pub registration_date: Option<NaiveDate>,
    /// Lower bound on points, inclusive.
    pub min_points: Option<i64>,
    /// Upper bound on points, inclusive.
    pub max_points: Option<i64>,
    /// Only enabled or only disabled accounts.
    pub enabled: Option<bool>,
    /// Activity bucket to match.
    pub activity_level: Option<ActivityLevel>,
}

impl UserFilters {
    /// Whether no filter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Full query for one page of users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserListQuery {
    /// Zero-based page index.
    pub page: u32,
    /// Rows per page.
    pub size: u32,
    /// Active filters.
    pub filters: UserFilters,
    /// Server-side sort, if any.
    pub sort: Option<SortOrder>,
}

impl Default for UserListQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            filters: UserFilters::default(),
            sort: None,
        }
    }
}

impl UserListQuery {
    /// Encodes the query as URL parameters. `roles` repeats once per role.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let filters = &self.filters;
        let mut pairs = vec![("page", self.page.to_string()), ("size", self.size.to_string())];

        pairs.extend(filters.roles.iter().map(|role| ("roles", role.to_string())));
        if let Some(date) = filters.registration_date {
            pairs.push(("registrationDate", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(min) = filters.min_points {
            pairs.push(("minPoints", min.to_string()));
        }
        if let Some(max) = filters.max_points {
            pairs.push(("maxPoints", max.to_string()));
        }
        if let Some(enabled) = filters.enabled {
            pairs.push(("enabled", enabled.to_string()));
        }
        if let Some(level) = filters.activity_level {
            pairs.push(("activityLevel", level.to_string()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.to_param()));
        }
        pairs
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Rows of this page.
    pub content: Vec<T>,
    /// Number of pages for the whole result.
    pub total_pages: u32,
    /// Number of rows for the whole result.
    pub total_elements: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_pages: 0,
            total_elements: 0,
        }
    }
}
