//! `GET /api` endpoint catalog and the unmatched-path fallback.

use crate::error::AppError;
use crate::query::SortBy;
use axum::Json;
use serde_json::{json, Value};

/// Describes every route with its accepted queries and an example response.
pub fn catalog() -> Value {
    let sort_columns: Vec<&str> = SortBy::ALL.iter().map(|c| c.as_str()).collect();
    json!({
        "GET /api": {
            "description": "serves a description of every available endpoint"
        },
        "GET /api/topics": {
            "description": "serves an array of all topics",
            "queries": [],
            "exampleResponse": {
                "topics": [{ "slug": "football", "description": "Footie!" }]
            }
        },
        "POST /api/topics": {
            "description": "creates a topic; the body must contain exactly slug and description",
            "exampleRequest": { "slug": "football", "description": "Footie!" },
            "exampleResponse": {
                "topic": { "slug": "football", "description": "Footie!" }
            }
        },
        "GET /api/articles": {
            "description": "serves a page of articles without bodies, with comment_count and total_count",
            "queries": ["topic", "sort_by", "order", "limit", "p"],
            "sort_by": sort_columns,
            "order": ["asc", "desc"],
            "defaults": { "sort_by": "created_at", "order": "desc", "limit": 10, "p": 1 },
            "exampleResponse": {
                "articles": [{
                    "article_id": 1,
                    "title": "Seafood substitutions are increasing",
                    "topic": "cooking",
                    "author": "weegembump",
                    "created_at": "2018-05-30T15:59:13Z",
                    "votes": 0,
                    "article_img_url": "https://images.pexels.com/photos/158651/news-newsletter-newspaper-information-158651.jpeg?w=700&h=700",
                    "comment_count": "6",
                    "total_count": "13"
                }]
            }
        },
        "POST /api/articles": {
            "description": "creates an article; article_img_url is optional",
            "exampleRequest": {
                "author": "lurker",
                "title": "What to do?",
                "body": "Not sure what to do? Me neither...",
                "topic": "cats",
                "article_img_url": "https://example.com/cat.jpg"
            }
        },
        "GET /api/articles/:article_id": {
            "description": "serves a single article with its body and comment_count"
        },
        "PATCH /api/articles/:article_id": {
            "description": "adds inc_votes to the article's votes and serves the updated article",
            "exampleRequest": { "inc_votes": 1 }
        },
        "DELETE /api/articles/:article_id": {
            "description": "deletes the article and all of its comments; responds 204 with no body"
        },
        "GET /api/articles/:article_id/comments": {
            "description": "serves a page of the article's comments, newest first",
            "queries": ["limit", "p"]
        },
        "POST /api/articles/:article_id/comments": {
            "description": "adds a comment to the article; the body must contain exactly username and body",
            "exampleRequest": { "username": "lurker", "body": "Wow this is incredible" }
        },
        "PATCH /api/comments/:comment_id": {
            "description": "adds inc_votes to the comment's votes and serves the updated comment",
            "exampleRequest": { "inc_votes": -1 }
        },
        "DELETE /api/comments/:comment_id": {
            "description": "deletes the comment; responds 204 with no body"
        },
        "GET /api/users": {
            "description": "serves an array of all users"
        },
        "GET /api/users/:username": {
            "description": "serves a single user"
        },
        "POST /api/users": {
            "description": "creates a user; avatar_url is optional and may be null",
            "exampleRequest": { "username": "jordan123", "name": "Jordan", "avatar_url": null }
        }
    })
}

pub async fn endpoints() -> Json<Value> {
    Json(json!({ "endpoints": catalog() }))
}

pub async fn invalid_path() -> AppError {
    AppError::InvalidPath
}
