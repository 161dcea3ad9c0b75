//! Task list query parsing
//!
//! Translates the raw `GET /tasks` query string into a typed filter,
//! pagination window and sort order. Parsing never fails: malformed values
//! are dropped so the request falls back to the unfiltered default.

use crate::types::ListTasksParams;
use std::str::FromStr;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `"desc"` sorts descending, anything else (including nothing) ascending
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }
}

/// Task fields a list may be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    Description,
    Completed,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(Self::CreatedAt),
            "updatedAt" => Ok(Self::UpdatedAt),
            "description" => Ok(Self::Description),
            "completed" => Ok(Self::Completed),
            other => Err(format!("Unknown sort field: {}", other)),
        }
    }
}

/// A `field:direction` sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl TaskSort {
    /// Parse `sortBy`, split on `:`
    ///
    /// Returns `None` when the field is not sortable.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split(':');
        let field = parts.next()?.parse().ok()?;
        let direction = SortDirection::parse(parts.next());
        Some(Self { field, direction })
    }
}

/// Typed task list query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskListQuery {
    /// `Some(flag)` keeps only tasks whose `completed` equals `flag`
    pub completed: Option<bool>,
    /// Maximum number of tasks, `None` for all
    pub limit: Option<i64>,
    /// Number of tasks to skip
    pub skip: Option<i64>,
    /// Sort order, `None` for creation order
    pub sort: Option<TaskSort>,
}

impl TaskListQuery {
    pub fn from_params(params: &ListTasksParams) -> Self {
        Self {
            completed: params.completed.as_deref().map(|value| value == "true"),
            limit: parse_count(params.limit.as_deref()).filter(|limit| *limit > 0),
            skip: parse_count(params.skip.as_deref()),
            sort: params.sort_by.as_deref().and_then(TaskSort::parse),
        }
    }
}

fn parse_count(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|count| *count >= 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn params(
        completed: Option<&str>,
        limit: Option<&str>,
        skip: Option<&str>,
        sort_by: Option<&str>,
    ) -> ListTasksParams {
        ListTasksParams {
            completed: completed.map(String::from),
            limit: limit.map(String::from),
            skip: skip.map(String::from),
            sort_by: sort_by.map(String::from),
        }
    }

    #[test]
    fn test_empty_query_is_default() {
        let query = TaskListQuery::from_params(&ListTasksParams::default());
        assert_eq!(query, TaskListQuery::default());
    }

    #[rstest]
    #[case(Some("true"), Some(true))]
    #[case(Some("false"), Some(false))]
    #[case(Some("yes"), Some(false))]
    #[case(None, None)]
    fn test_completed_filter(#[case] raw: Option<&str>, #[case] expected: Option<bool>) {
        let query = TaskListQuery::from_params(&params(raw, None, None, None));
        assert_eq!(query.completed, expected);
    }

    #[rstest]
    #[case("createdAt:desc", SortField::CreatedAt, SortDirection::Desc)]
    #[case("createdAt:asc", SortField::CreatedAt, SortDirection::Asc)]
    #[case("createdAt", SortField::CreatedAt, SortDirection::Asc)]
    #[case("updatedAt:DESC", SortField::UpdatedAt, SortDirection::Asc)]
    #[case("description:sideways", SortField::Description, SortDirection::Asc)]
    #[case("completed:desc:extra", SortField::Completed, SortDirection::Desc)]
    fn test_sort_parsing(
        #[case] raw: &str,
        #[case] field: SortField,
        #[case] direction: SortDirection,
    ) {
        assert_eq!(TaskSort::parse(raw), Some(TaskSort { field, direction }));
    }

    #[test]
    fn test_unknown_sort_field_ignored() {
        assert_eq!(TaskSort::parse("owner:desc"), None);
        assert_eq!(TaskSort::parse(""), None);
    }

    #[test]
    fn test_pagination() {
        let query = TaskListQuery::from_params(&params(None, Some("2"), Some("4"), None));
        assert_eq!(query.limit, Some(2));
        assert_eq!(query.skip, Some(4));
    }

    #[rstest]
    #[case(Some("0"), None)]
    #[case(Some("-3"), None)]
    #[case(Some("ten"), None)]
    #[case(Some(" 5 "), Some(5))]
    fn test_limit_normalization(#[case] raw: Option<&str>, #[case] expected: Option<i64>) {
        let query = TaskListQuery::from_params(&params(None, raw, None, None));
        assert_eq!(query.limit, expected);
    }

    #[test]
    fn test_invalid_skip_ignored() {
        let query = TaskListQuery::from_params(&params(None, None, Some("-1"), None));
        assert_eq!(query.skip, None);
        let query = TaskListQuery::from_params(&params(None, None, Some("0"), None));
        assert_eq!(query.skip, Some(0));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_only_desc_sorts_descending(direction in "[a-zA-Z]{0,8}") {
            let sort = TaskSort::parse(&format!("createdAt:{}", direction)).unwrap();
            let expected = if direction == "desc" { SortDirection::Desc } else { SortDirection::Asc };
            prop_assert_eq!(sort.direction, expected);
        }

        #[test]
        fn prop_non_negative_counts_pass_through(limit in 1i64..10_000, skip in 0i64..10_000) {
            let query = TaskListQuery::from_params(&params(
                None,
                Some(&limit.to_string()),
                Some(&skip.to_string()),
                None,
            ));
            prop_assert_eq!(query.limit, Some(limit));
            prop_assert_eq!(query.skip, Some(skip));
        }
    }
}
