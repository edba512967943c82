//! Data-source abstraction for social media records
//!
//! Defines the capability set a data origin must provide — users, per-user
//! posts, per-post comments — so the cached client can be wired to canned
//! tables, generated demo data, or a live upstream API without knowing which.
//! Sources return raw wire payloads; the typed transforms live alongside them
//! here.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Comment, Post, User};

/// Errors that can occur when fetching from a data source
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("API request failed: {0}")]
    Status(reqwest::StatusCode),

    /// Failed to parse the response payload
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Capability set over the social media data origin
///
/// Implementations must tolerate unknown ids: posts for an unknown user and
/// comments for an unknown post are empty lists, not errors.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetches the full user roster
    async fn fetch_users(&self) -> Result<RawUsers, SourceError>;

    /// Fetches the posts authored by a user
    async fn fetch_user_posts(&self, user_id: &str) -> Result<RawPosts, SourceError>;

    /// Fetches the comments on a post
    async fn fetch_post_comments(&self, post_id: u64) -> Result<RawComments, SourceError>;
}

/// Raw users payload as served by the upstream API
///
/// The wire shape is a map of user id to display name:
/// `{"users": {"1": "John Doe", ...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawUsers {
    pub users: BTreeMap<String, String>,
}

/// Raw posts payload: `{"posts": [{"id": n, "userid": n, "content": s}]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPosts {
    pub posts: Vec<RawPost>,
}

/// A single post as it appears on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPost {
    pub id: u64,
    pub userid: u64,
    pub content: String,
}

/// Raw comments payload: `{"comments": [{"id": n, "postid": n, "content": s}]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawComments {
    pub comments: Vec<RawComment>,
}

/// A single comment as it appears on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawComment {
    pub id: u64,
    pub postid: u64,
    pub content: String,
}

/// Sort key treating ids as numbers where possible; non-numeric ids sort last
fn numeric_id(id: &str) -> u64 {
    id.parse().unwrap_or(u64::MAX)
}

impl RawUsers {
    /// Flattens the id-to-name map into typed users ordered by numeric id,
    /// so "10" lands after "2" rather than between "1" and "2"
    pub fn into_users(self) -> Vec<User> {
        let mut users: Vec<User> = self
            .users
            .into_iter()
            .map(|(id, name)| User { id, name })
            .collect();
        users.sort_by(|a, b| {
            numeric_id(&a.id)
                .cmp(&numeric_id(&b.id))
                .then_with(|| a.id.cmp(&b.id))
        });
        users
    }
}

impl RawPosts {
    /// Maps wire posts to typed posts, renaming `userid` and stringifying it
    /// to match the user id space
    pub fn into_posts(self) -> Vec<Post> {
        self.posts
            .into_iter()
            .map(|post| Post {
                id: post.id,
                user_id: post.userid.to_string(),
                content: post.content,
            })
            .collect()
    }
}

impl RawComments {
    /// Maps wire comments to typed comments
    pub fn into_comments(self) -> Vec<Comment> {
        self.comments
            .into_iter()
            .map(|comment| Comment {
                id: comment.id,
                post_id: comment.postid,
                content: comment.content,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_users_orders_by_numeric_id() {
        let raw: RawUsers = serde_json::from_str(
            r#"{"users": {"10": "Helen Moore", "2": "Jane Doe", "1": "John Doe"}}"#,
        )
        .expect("Failed to parse users payload");

        let users = raw.into_users();

        let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "10"], "Ids should sort numerically, not lexically");
        assert_eq!(users[2].name, "Helen Moore");
    }

    #[test]
    fn test_into_users_puts_non_numeric_ids_last() {
        let mut map = BTreeMap::new();
        map.insert("user-3".to_string(), "Generated".to_string());
        map.insert("5".to_string(), "Charlie Brown".to_string());
        let raw = RawUsers { users: map };

        let users = raw.into_users();

        assert_eq!(users[0].id, "5");
        assert_eq!(users[1].id, "user-3");
    }

    #[test]
    fn test_into_posts_renames_and_stringifies_userid() {
        let raw: RawPosts = serde_json::from_str(
            r#"{"posts": [{"id": 246, "userid": 1, "content": "Post about ant"}]}"#,
        )
        .expect("Failed to parse posts payload");

        let posts = raw.into_posts();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, 246);
        assert_eq!(posts[0].user_id, "1");
        assert_eq!(posts[0].content, "Post about ant");
    }

    #[test]
    fn test_into_comments_renames_postid() {
        let raw: RawComments = serde_json::from_str(
            r#"{"comments": [{"id": 1001, "postid": 246, "content": "Great observation about ants!"}]}"#,
        )
        .expect("Failed to parse comments payload");

        let comments = raw.into_comments();

        assert_eq!(comments[0].post_id, 246);
    }

    #[test]
    fn test_empty_payloads_transform_to_empty_vecs() {
        let posts: RawPosts = serde_json::from_str(r#"{"posts": []}"#).expect("parse");
        let comments: RawComments = serde_json::from_str(r#"{"comments": []}"#).expect("parse");

        assert!(posts.into_posts().is_empty());
        assert!(comments.into_comments().is_empty());
    }
}
