//! Collection query parameters: parse raw strings into a validated descriptor.
//!
//! Checks run in a fixed order (`limit`, `p`, `sort_by`, `order`) so the same
//! bad request always yields the same error, and every check happens before
//! the repository is touched.

use crate::error::AppError;
use crate::service::IdValidator;
use std::collections::HashMap;
use std::str::FromStr;

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_PAGE: i64 = 1;

/// Sortable columns of the articles collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    CreatedAt,
    Title,
    ArticleId,
    Votes,
    Author,
    Topic,
    CommentCount,
}

impl SortBy {
    pub const ALL: [SortBy; 7] = [
        SortBy::CreatedAt,
        SortBy::Title,
        SortBy::ArticleId,
        SortBy::Votes,
        SortBy::Author,
        SortBy::Topic,
        SortBy::CommentCount,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::CreatedAt => "created_at",
            SortBy::Title => "title",
            SortBy::ArticleId => "article_id",
            SortBy::Votes => "votes",
            SortBy::Author => "author",
            SortBy::Topic => "topic",
            SortBy::CommentCount => "comment_count",
        }
    }
}

impl FromStr for SortBy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortBy::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| AppError::InvalidSortBy(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    Asc,
    #[default]
    Desc,
}

impl Order {
    pub fn as_sql(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

impl FromStr for Order {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Order::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Order::Desc)
        } else {
            Err(AppError::InvalidOrder(s.to_string()))
        }
    }
}

/// `limit` rows per page, 1-based `page`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub page: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
        }
    }
}

impl Pagination {
    /// Read `limit` and `p`. `limit` must be a non-negative integer, `p` a positive one.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let limit = IdValidator::parse_count(params.get("limit").map(String::as_str), DEFAULT_LIMIT)?;
        let page = IdValidator::parse_count(params.get("p").map(String::as_str), DEFAULT_PAGE)?;
        if page < 1 {
            return Err(AppError::InvalidFormat);
        }
        Ok(Pagination { limit, page })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Validated descriptor for `GET /api/articles`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleListQuery {
    pub topic: Option<String>,
    pub sort_by: SortBy,
    pub order: Order,
    pub page: Pagination,
}

impl ArticleListQuery {
    /// Unknown keys are ignored.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let page = Pagination::from_params(params)?;
        let sort_by = params
            .get("sort_by")
            .map(|s| s.parse())
            .transpose()?
            .unwrap_or_default();
        let order = params
            .get("order")
            .map(|s| s.parse())
            .transpose()?
            .unwrap_or_default();
        Ok(ArticleListQuery {
            topic: params.get("topic").cloned(),
            sort_by,
            order,
            page,
        })
    }
}
