//! Shared fixture for tests that need a live Postgres (`DATABASE_URL`).

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use news_api::{app, store, AppState, PgRepository};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::OnceLock;
use tokio::sync::{Mutex, MutexGuard};
use tower::ServiceExt;

/// Tests reseed the same tables, so they run one at a time.
fn db_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

pub struct TestApp {
    pub router: Router,
    pub pool: PgPool,
    _guard: MutexGuard<'static, ()>,
}

impl TestApp {
    /// Connects, creates missing tables and reseeds the fixture data.
    pub async fn seeded() -> Self {
        let guard = db_lock().lock().await;
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for api tests");
        let pool = PgPoolOptions::new()
            .max_connections(8)
            .connect(&url)
            .await
            .expect("connect");
        store::ensure_tables(&pool).await.expect("ensure tables");
        seed(&pool).await;
        let router = app(AppState::new(PgRepository::new(pool.clone())));
        TestApp {
            router,
            pool,
            _guard: guard,
        }
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.expect("oneshot");
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::delete(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn with_json(&self, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request(method, uri, &body)).await
    }

    pub async fn count(&self, sql: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(sql)
            .fetch_one(&self.pool)
            .await
            .expect("count")
    }
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub const TOPICS: &[(&str, &str)] = &[
    ("mitch", "The man, the Mitch, the legend"),
    ("cats", "Not dogs"),
    ("paper", "what books are made of"),
];

pub const USERS: &[(&str, &str)] = &[
    ("butter_bridge", "jonny"),
    ("icellusedkars", "sam"),
    ("rogersop", "paul"),
    ("lurker", "do_nothing"),
];

/// (title, topic, author, body, created_at, votes). Article ids follow this order.
pub const ARTICLES: &[(&str, &str, &str, &str, &str, i32)] = &[
    ("Living in the shadow of a great man", "mitch", "butter_bridge", "I find this existence challenging", "2020-07-09T20:11:00Z", 100),
    ("Sony Vaio; or, The Laptop", "mitch", "icellusedkars", "Call me Mitchell.", "2020-10-16T05:03:00Z", 0),
    ("Eight pug gifs that remind me of mitch", "mitch", "icellusedkars", "some gifs", "2020-11-03T09:12:00Z", 0),
    ("Student SUES Mitch!", "mitch", "rogersop", "We all love Mitch and his wonderful work.", "2020-05-06T01:14:00Z", 0),
    ("UNCOVERED: catspiracy to bring down democracy", "cats", "rogersop", "Bastet walks amongst us", "2020-08-03T13:14:00Z", 0),
    ("A", "mitch", "icellusedkars", "Delicious tin of cat food", "2020-10-18T01:00:00Z", 0),
    ("Z", "mitch", "icellusedkars", "I was hungry.", "2020-01-07T14:08:00Z", 0),
    ("Does Mitch predate civilisation?", "mitch", "icellusedkars", "Archaeologists have uncovered a gigantic statue.", "2020-04-17T01:08:00Z", 0),
    ("They're not exactly dogs, are they?", "mitch", "butter_bridge", "Well? Think about it.", "2020-06-06T09:10:00Z", 0),
    ("Seven inspirational thought leaders from Manchester UK", "mitch", "rogersop", "Who are we kidding, there is only one.", "2020-05-14T04:15:00Z", 0),
    ("Am I a cat?", "mitch", "icellusedkars", "Having run out of ideas for articles.", "2020-01-15T22:21:00Z", 0),
    ("Moustache", "mitch", "butter_bridge", "Have you seen the size of that thing?", "2020-10-11T11:24:00Z", 0),
    ("Another article about Mitch", "mitch", "butter_bridge", "There will never be enough articles about Mitch!", "2020-10-11T11:24:00Z", 0),
];

/// (article_id, author, body, created_at, votes).
pub const COMMENTS: &[(i32, &str, &str, &str, i32)] = &[
    (9, "butter_bridge", "Oh, I've got compassion running out of my nose, pal!", "2020-04-06T12:17:00Z", 16),
    (1, "butter_bridge", "The beautiful thing about treasure is that it exists.", "2020-10-31T03:03:00Z", 14),
    (1, "icellusedkars", "Replacing the quiet elegance of the dark suit and tie.", "2020-03-01T01:13:00Z", 100),
    (1, "icellusedkars", "I carry a log, yes. Is it funny to you?", "2020-02-23T12:01:00Z", -100),
    (1, "icellusedkars", "I hate streaming noses", "2020-11-03T21:00:00Z", 0),
    (1, "icellusedkars", "I hate streaming eyes even more", "2020-04-11T21:02:00Z", 0),
    (1, "icellusedkars", "Lobster pot", "2020-05-15T20:19:00Z", 0),
    (1, "icellusedkars", "Delicious crackerbreads", "2020-04-14T20:19:00Z", 0),
    (1, "icellusedkars", "Superficially charming", "2020-01-01T03:08:00Z", 0),
    (3, "icellusedkars", "git push origin master", "2020-06-20T07:24:00Z", 0),
    (3, "icellusedkars", "Ambidextrous marsupial", "2020-09-19T23:10:00Z", 0),
    (1, "icellusedkars", "Fruit pastilles", "2020-06-15T10:25:00Z", 0),
    (1, "icellusedkars", "Massive intercranial brain haemorrhage", "2020-11-22T23:36:00Z", 0),
    (5, "butter_bridge", "What do you see? I have no idea where this will lead us.", "2020-06-09T05:00:00Z", 16),
    (5, "butter_bridge", "I am 100% sure that we're not completely sure.", "2020-11-24T00:08:00Z", 1),
    (6, "butter_bridge", "This is a bad article name", "2020-10-11T15:23:00Z", 1),
    (9, "icellusedkars", "The owls are not what they seem.", "2020-03-14T17:02:00Z", 20),
    (1, "icellusedkars", "This morning, I showered for nine minutes.", "2020-07-21T00:20:00Z", 16),
];

pub async fn seed(pool: &PgPool) {
    sqlx::query("TRUNCATE comments, articles, users, topics RESTART IDENTITY CASCADE")
        .execute(pool)
        .await
        .expect("truncate");
    for (slug, description) in TOPICS {
        sqlx::query("INSERT INTO topics (slug, description) VALUES ($1, $2)")
            .bind(slug)
            .bind(description)
            .execute(pool)
            .await
            .expect("seed topic");
    }
    for (username, name) in USERS {
        sqlx::query("INSERT INTO users (username, name) VALUES ($1, $2)")
            .bind(username)
            .bind(name)
            .execute(pool)
            .await
            .expect("seed user");
    }
    for (title, topic, author, body, created_at, votes) in ARTICLES {
        sqlx::query(
            "INSERT INTO articles (title, topic, author, body, created_at, votes) \
             VALUES ($1, $2, $3, $4, $5::timestamptz, $6)",
        )
        .bind(title)
        .bind(topic)
        .bind(author)
        .bind(body)
        .bind(created_at)
        .bind(votes)
        .execute(pool)
        .await
        .expect("seed article");
    }
    for (article_id, author, body, created_at, votes) in COMMENTS {
        sqlx::query(
            "INSERT INTO comments (article_id, author, body, created_at, votes) \
             VALUES ($1, $2, $3, $4::timestamptz, $5)",
        )
        .bind(article_id)
        .bind(author)
        .bind(body)
        .bind(created_at)
        .bind(votes)
        .execute(pool)
        .await
        .expect("seed comment");
    }
}
