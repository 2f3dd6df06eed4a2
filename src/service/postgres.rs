//! [`Repository`] over a PostgreSQL pool.

use crate::error::{AppError, Resource};
use crate::model::{
    Article, ArticleSummary, Comment, NewArticle, NewComment, NewTopic, NewUser, Topic, User,
};
use crate::query::{ArticleListQuery, Pagination};
use crate::service::Repository;
use crate::sql::{bind_all, insert_article, select_article_by_id, select_articles, select_comments_by_article, QueryBuf};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

const COMMENT_COLUMNS: &str = "comment_id, article_id, author, body, votes, created_at";

/// Holds the shared pool; every method checks a connection out for a single statement.
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        PgRepository { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_all<T>(&self, q: &QueryBuf) -> Result<Vec<T>, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_all(sqlx::query_as::<_, T>(&q.sql), &q.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn fetch_optional<T>(&self, q: &QueryBuf) -> Result<Option<T>, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_all(sqlx::query_as::<_, T>(&q.sql), &q.params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn exists(&self, sql: &str, key: KeyParam<'_>) -> Result<bool, AppError> {
        tracing::debug!(sql = %sql, key = ?key, "query");
        let query = sqlx::query_scalar::<_, bool>(sql);
        let query = match key {
            KeyParam::Int(n) => query.bind(n),
            KeyParam::Text(s) => query.bind(s),
        };
        Ok(query.fetch_one(&self.pool).await?)
    }

    async fn topic_exists(&self, slug: &str) -> Result<bool, AppError> {
        self.exists(
            "SELECT EXISTS(SELECT 1 FROM topics WHERE slug = $1)",
            KeyParam::Text(slug),
        )
        .await
    }

    async fn article_exists(&self, article_id: i32) -> Result<bool, AppError> {
        self.exists(
            "SELECT EXISTS(SELECT 1 FROM articles WHERE article_id = $1)",
            KeyParam::Int(article_id),
        )
        .await
    }

    async fn delete_by_id(&self, sql: &str, id: i32, resource: Resource) -> Result<(), AppError> {
        tracing::debug!(sql = %sql, id, "query");
        let done = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        if done.rows_affected() == 0 {
            return Err(AppError::NotFound(resource));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum KeyParam<'a> {
    Int(i32),
    Text(&'a str),
}

#[async_trait]
impl Repository for PgRepository {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn topics(&self) -> Result<Vec<Topic>, AppError> {
        let sql = "SELECT slug, description FROM topics ORDER BY slug";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Topic>(sql).fetch_all(&self.pool).await?)
    }

    async fn create_topic(&self, topic: NewTopic) -> Result<Topic, AppError> {
        let sql = "INSERT INTO topics (slug, description) VALUES ($1, $2) RETURNING slug, description";
        tracing::debug!(sql = %sql, slug = %topic.slug, "query");
        Ok(sqlx::query_as::<_, Topic>(sql)
            .bind(&topic.slug)
            .bind(&topic.description)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn article(&self, article_id: i32) -> Result<Article, AppError> {
        self.fetch_optional(&select_article_by_id(article_id))
            .await?
            .ok_or(AppError::NotFound(Resource::Article))
    }

    async fn articles(&self, query: &ArticleListQuery) -> Result<Vec<ArticleSummary>, AppError> {
        let rows: Vec<ArticleSummary> = self.fetch_all(&select_articles(query)).await?;
        if rows.is_empty() {
            if let Some(topic) = &query.topic {
                if !self.topic_exists(topic).await? {
                    return Err(AppError::NotFound(Resource::Topic));
                }
            }
        }
        Ok(rows)
    }

    async fn create_article(&self, article: NewArticle) -> Result<Article, AppError> {
        self.fetch_optional(&insert_article(&article))
            .await?
            .ok_or_else(|| AppError::Internal("insert returned no row".into()))
    }

    async fn add_article_votes(&self, article_id: i32, delta: i32) -> Result<Article, AppError> {
        let sql = "WITH updated AS ( \
                UPDATE articles SET votes = votes + $1 WHERE article_id = $2 \
                RETURNING article_id, title, topic, author, body, created_at, votes, article_img_url \
            ) \
            SELECT u.*, (SELECT COUNT(*) FROM comments c WHERE c.article_id = u.article_id) AS comment_count \
            FROM updated u";
        tracing::debug!(sql = %sql, article_id, delta, "query");
        sqlx::query_as::<_, Article>(sql)
            .bind(delta)
            .bind(article_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound(Resource::Article))
    }

    async fn delete_article(&self, article_id: i32) -> Result<(), AppError> {
        self.delete_by_id(
            "DELETE FROM articles WHERE article_id = $1",
            article_id,
            Resource::Article,
        )
        .await
    }

    async fn comments(&self, article_id: i32, page: Pagination) -> Result<Vec<Comment>, AppError> {
        let rows: Vec<Comment> = self
            .fetch_all(&select_comments_by_article(article_id, page))
            .await?;
        if rows.is_empty() && !self.article_exists(article_id).await? {
            return Err(AppError::NotFound(Resource::Article));
        }
        Ok(rows)
    }

    async fn create_comment(&self, article_id: i32, comment: NewComment) -> Result<Comment, AppError> {
        let sql = format!(
            "INSERT INTO comments (article_id, author, body) VALUES ($1, $2, $3) RETURNING {}",
            COMMENT_COLUMNS
        );
        tracing::debug!(sql = %sql, article_id, author = %comment.username, "query");
        Ok(sqlx::query_as::<_, Comment>(&sql)
            .bind(article_id)
            .bind(&comment.username)
            .bind(&comment.body)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn add_comment_votes(&self, comment_id: i32, delta: i32) -> Result<Comment, AppError> {
        let sql = format!(
            "UPDATE comments SET votes = votes + $1 WHERE comment_id = $2 RETURNING {}",
            COMMENT_COLUMNS
        );
        tracing::debug!(sql = %sql, comment_id, delta, "query");
        sqlx::query_as::<_, Comment>(&sql)
            .bind(delta)
            .bind(comment_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound(Resource::Comment))
    }

    async fn delete_comment(&self, comment_id: i32) -> Result<(), AppError> {
        self.delete_by_id(
            "DELETE FROM comments WHERE comment_id = $1",
            comment_id,
            Resource::Comment,
        )
        .await
    }

    async fn users(&self) -> Result<Vec<User>, AppError> {
        let sql = "SELECT username, name, avatar_url FROM users ORDER BY username";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, User>(sql).fetch_all(&self.pool).await?)
    }

    async fn user(&self, username: &str) -> Result<User, AppError> {
        let sql = "SELECT username, name, avatar_url FROM users WHERE username = $1";
        tracing::debug!(sql = %sql, username, "query");
        sqlx::query_as::<_, User>(sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound(Resource::User))
    }

    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        let sql = "INSERT INTO users (username, name, avatar_url) VALUES ($1, $2, $3) \
                   RETURNING username, name, avatar_url";
        tracing::debug!(sql = %sql, username = %user.username, "query");
        Ok(sqlx::query_as::<_, User>(sql)
            .bind(&user.username)
            .bind(&user.name)
            .bind(&user.avatar_url)
            .fetch_one(&self.pool)
            .await?)
    }
}
