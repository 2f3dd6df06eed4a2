//! Builds the parameterized statements whose shape depends on the request.
//!
//! Values always travel as `$n` parameters. The only request-driven text is
//! the ORDER BY column and direction, and both come from closed enums.

use crate::model::NewArticle;
use crate::query::{ArticleListQuery, Order, Pagination, SortBy};
use crate::sql::SqlParam;

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Append a parameter and return its 1-based placeholder number.
    fn push_param(&mut self, v: impl Into<SqlParam>) -> usize {
        self.params.push(v.into());
        self.params.len()
    }
}

/// Article columns shared by the single and collection reads (no body).
const ARTICLE_HEAD: &str =
    "a.article_id, a.title, a.topic, a.author, a.created_at, a.votes, a.article_img_url";

const COMMENT_COUNT: &str = "COUNT(c.comment_id)";

fn sort_expr(sort_by: SortBy) -> &'static str {
    match sort_by {
        SortBy::CreatedAt => "a.created_at",
        SortBy::Title => "a.title",
        SortBy::ArticleId => "a.article_id",
        SortBy::Votes => "a.votes",
        SortBy::Author => "a.author",
        SortBy::Topic => "a.topic",
        SortBy::CommentCount => COMMENT_COUNT,
    }
}

fn order_clause(sort_by: SortBy, order: Order) -> String {
    let mut clause = format!(" ORDER BY {} {}", sort_expr(sort_by), order.as_sql());
    // Tie-break on the key so pages never overlap between calls.
    if sort_by != SortBy::ArticleId {
        clause.push_str(", a.article_id ASC");
    }
    clause
}

fn push_page(q: &mut QueryBuf, page: Pagination) {
    let limit = q.push_param(page.limit);
    let offset = q.push_param(page.offset());
    q.sql.push_str(&format!(" LIMIT ${} OFFSET ${}", limit, offset));
}

/// Articles collection: comment counts per article, optional topic filter,
/// whitelisted ordering, and the pre-pagination row count on every row.
pub fn select_articles(query: &ArticleListQuery) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {}, {} AS comment_count, COUNT(*) OVER () AS total_count \
         FROM articles a LEFT JOIN comments c ON c.article_id = a.article_id",
        ARTICLE_HEAD, COMMENT_COUNT
    );
    if let Some(topic) = &query.topic {
        let n = q.push_param(topic.as_str());
        q.sql.push_str(&format!(" WHERE a.topic = ${}", n));
    }
    q.sql.push_str(" GROUP BY a.article_id");
    q.sql.push_str(&order_clause(query.sort_by, query.order));
    push_page(&mut q, query.page);
    q
}

/// Single article with body and comment count.
pub fn select_article_by_id(article_id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(article_id);
    q.sql = format!(
        "SELECT {}, a.body, {} AS comment_count \
         FROM articles a LEFT JOIN comments c ON c.article_id = a.article_id \
         WHERE a.article_id = ${} GROUP BY a.article_id",
        ARTICLE_HEAD, COMMENT_COUNT, n
    );
    q
}

/// One page of an article's comments, newest first.
pub fn select_comments_by_article(article_id: i32, page: Pagination) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(article_id);
    q.sql = format!(
        "SELECT comment_id, article_id, author, body, votes, created_at \
         FROM comments WHERE article_id = ${} \
         ORDER BY created_at DESC, comment_id DESC",
        n
    );
    push_page(&mut q, page);
    q
}

/// INSERT an article. `article_img_url` is omitted when absent so the column
/// default applies. A fresh article has no comments.
pub fn insert_article(article: &NewArticle) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = vec!["author", "title", "body", "topic"];
    let mut placeholders = vec![
        q.push_param(article.author.as_str()),
        q.push_param(article.title.as_str()),
        q.push_param(article.body.as_str()),
        q.push_param(article.topic.as_str()),
    ];
    if let Some(url) = &article.article_img_url {
        cols.push("article_img_url");
        placeholders.push(q.push_param(url.as_str()));
    }
    let placeholders: Vec<String> = placeholders.iter().map(|n| format!("${}", n)).collect();
    q.sql = format!(
        "INSERT INTO articles ({}) VALUES ({}) \
         RETURNING article_id, title, topic, author, body, created_at, votes, article_img_url, \
         0::INT8 AS comment_count",
        cols.join(", "),
        placeholders.join(", ")
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listing() {
        let q = select_articles(&ArticleListQuery::default());
        assert!(q.sql.contains("LEFT JOIN comments c ON c.article_id = a.article_id"));
        assert!(q.sql.contains("COUNT(*) OVER () AS total_count"));
        assert!(q.sql.contains("GROUP BY a.article_id"));
        assert!(q.sql.contains(" ORDER BY a.created_at DESC, a.article_id ASC"));
        assert!(q.sql.ends_with(" LIMIT $1 OFFSET $2"));
        assert!(!q.sql.contains("WHERE"));
        assert!(!q.sql.contains("a.body"));
        assert_eq!(q.params, vec![SqlParam::Int(10), SqlParam::Int(0)]);
    }

    #[test]
    fn topic_filter_is_bound_not_interpolated() {
        let query = ArticleListQuery {
            topic: Some("cats' OR 1=1 --".into()),
            ..Default::default()
        };
        let q = select_articles(&query);
        assert!(q.sql.contains("WHERE a.topic = $1"));
        assert!(!q.sql.contains("cats"));
        assert_eq!(q.params[0], SqlParam::Text("cats' OR 1=1 --".into()));
        assert!(q.sql.ends_with(" LIMIT $2 OFFSET $3"));
    }

    #[test]
    fn where_precedes_group_by() {
        let query = ArticleListQuery {
            topic: Some("mitch".into()),
            ..Default::default()
        };
        let sql = select_articles(&query).sql;
        assert!(sql.find("WHERE").unwrap() < sql.find("GROUP BY").unwrap());
        assert!(sql.find("GROUP BY").unwrap() < sql.find("ORDER BY").unwrap());
    }

    #[test]
    fn offset_follows_page() {
        let query = ArticleListQuery {
            sort_by: SortBy::ArticleId,
            order: Order::Asc,
            page: Pagination { limit: 5, page: 2 },
            ..Default::default()
        };
        let q = select_articles(&query);
        assert!(q.sql.contains(" ORDER BY a.article_id ASC LIMIT"));
        assert!(!q.sql.contains("a.article_id ASC, a.article_id"));
        assert_eq!(q.params, vec![SqlParam::Int(5), SqlParam::Int(5)]);
    }

    #[test]
    fn comment_count_sorts_on_the_aggregate() {
        let query = ArticleListQuery {
            sort_by: SortBy::CommentCount,
            order: Order::Asc,
            ..Default::default()
        };
        let sql = select_articles(&query).sql;
        assert!(sql.contains(" ORDER BY COUNT(c.comment_id) ASC, a.article_id ASC"));
    }

    #[test]
    fn every_sort_column_is_qualified() {
        for col in SortBy::ALL {
            let query = ArticleListQuery {
                sort_by: col,
                ..Default::default()
            };
            let sql = select_articles(&query).sql;
            assert!(sql.contains(&format!("ORDER BY {} DESC", sort_expr(col))));
        }
    }

    #[test]
    fn comments_page() {
        let q = select_comments_by_article(1, Pagination { limit: 3, page: 3 });
        assert!(q.sql.contains("WHERE article_id = $1"));
        assert!(q.sql.contains("ORDER BY created_at DESC, comment_id DESC LIMIT $2 OFFSET $3"));
        assert_eq!(q.params, vec![SqlParam::Int(1), SqlParam::Int(3), SqlParam::Int(6)]);
    }

    #[test]
    fn single_article_includes_body() {
        let q = select_article_by_id(3);
        assert!(q.sql.contains("a.body"));
        assert!(q.sql.contains("WHERE a.article_id = $1"));
        assert_eq!(q.params, vec![SqlParam::Int(3)]);
    }

    #[test]
    fn insert_article_omits_missing_image() {
        let mut article = NewArticle {
            author: "lurker".into(),
            title: "What to do?".into(),
            body: "Not sure".into(),
            topic: "cats".into(),
            article_img_url: None,
        };
        let q = insert_article(&article);
        assert!(q.sql.starts_with("INSERT INTO articles (author, title, body, topic) VALUES ($1, $2, $3, $4)"));
        assert_eq!(q.params.len(), 4);

        article.article_img_url = Some("test".into());
        let q = insert_article(&article);
        assert!(q.sql.contains("(author, title, body, topic, article_img_url) VALUES ($1, $2, $3, $4, $5)"));
        assert_eq!(q.params[4], SqlParam::Text("test".into()));
    }
}
