//! Pool construction and table DDL.

use crate::config::AppConfig;
use crate::error::AppError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;

/// Default image for articles posted without `article_img_url`.
pub const DEFAULT_ARTICLE_IMG_URL: &str =
    "https://images.pexels.com/photos/97050/pexels-photo-97050.jpeg?w=700&h=700";

/// Connect the process-wide pool. Each connection carries the configured
/// `statement_timeout`, so a stuck statement surfaces as a storage error.
pub async fn connect(config: &AppConfig) -> Result<PgPool, AppError> {
    let timeout_ms = config.statement_timeout.as_millis().to_string();
    let opts = PgConnectOptions::from_str(&config.database_url)?
        .options([("statement_timeout", timeout_ms.as_str())]);
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

/// Table DDL in dependency order. Comments go with their article.
const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS topics (
        slug VARCHAR PRIMARY KEY,
        description VARCHAR NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        username VARCHAR PRIMARY KEY,
        name VARCHAR NOT NULL,
        avatar_url VARCHAR
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        article_id SERIAL PRIMARY KEY,
        title VARCHAR NOT NULL,
        topic VARCHAR NOT NULL REFERENCES topics(slug),
        author VARCHAR NOT NULL REFERENCES users(username),
        body VARCHAR NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        votes INT NOT NULL DEFAULT 0,
        article_img_url VARCHAR NOT NULL DEFAULT '{DEFAULT_IMG}'
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS comments (
        comment_id SERIAL PRIMARY KEY,
        body VARCHAR NOT NULL,
        article_id INT NOT NULL REFERENCES articles(article_id) ON DELETE CASCADE,
        author VARCHAR NOT NULL REFERENCES users(username),
        votes INT NOT NULL DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS comments_article_id_idx ON comments (article_id)",
];

/// Create the four tables when missing. Idempotent.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for ddl in TABLES {
        let ddl = ddl.replace("{DEFAULT_IMG}", &DEFAULT_ARTICLE_IMG_URL.replace('\'', "''"));
        tracing::debug!(sql = %ddl, "ddl");
        sqlx::query(&ddl).execute(pool).await?;
    }
    Ok(())
}
