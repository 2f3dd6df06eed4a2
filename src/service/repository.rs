//! Data-access contract used by the handlers.

use crate::error::AppError;
use crate::model::{
    Article, ArticleSummary, Comment, NewArticle, NewComment, NewTopic, NewUser, Topic, User,
};
use crate::query::{ArticleListQuery, Pagination};
use async_trait::async_trait;

/// Per-entity operations. Each call is one logical unit of work: it either
/// completes or fails with a tagged [`AppError`], and a missing singular row
/// is reported as [`AppError::NotFound`].
#[async_trait]
pub trait Repository: Send + Sync {
    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;

    async fn topics(&self) -> Result<Vec<Topic>, AppError>;
    async fn create_topic(&self, topic: NewTopic) -> Result<Topic, AppError>;

    async fn article(&self, article_id: i32) -> Result<Article, AppError>;
    /// Empty when nothing matches, unless the topic filter names an unknown topic.
    async fn articles(&self, query: &ArticleListQuery) -> Result<Vec<ArticleSummary>, AppError>;
    async fn create_article(&self, article: NewArticle) -> Result<Article, AppError>;
    async fn add_article_votes(&self, article_id: i32, delta: i32) -> Result<Article, AppError>;
    /// Removes the article and, in the same statement, its comments.
    async fn delete_article(&self, article_id: i32) -> Result<(), AppError>;

    /// Fails with not-found only when the article itself is missing.
    async fn comments(&self, article_id: i32, page: Pagination) -> Result<Vec<Comment>, AppError>;
    async fn create_comment(&self, article_id: i32, comment: NewComment) -> Result<Comment, AppError>;
    async fn add_comment_votes(&self, comment_id: i32, delta: i32) -> Result<Comment, AppError>;
    async fn delete_comment(&self, comment_id: i32) -> Result<(), AppError>;

    async fn users(&self) -> Result<Vec<User>, AppError>;
    async fn user(&self, username: &str) -> Result<User, AppError>;
    async fn create_user(&self, user: NewUser) -> Result<User, AppError>;
}
