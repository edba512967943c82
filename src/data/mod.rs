//! Core data models for feedscope
//!
//! This module contains the data types used throughout the application for
//! representing users, posts, and comments, plus the data-source abstraction
//! and the cached client built on top of it.

pub mod client;
pub mod mock;
pub mod remote;
pub mod source;

pub use client::{FeedSnapshot, SocialClient, TrendingPost, UserActivity};
pub use mock::MockSource;
pub use remote::RemoteSource;
pub use source::{DataSource, RawComments, RawPosts, RawUsers, SourceError};

use serde::{Deserialize, Serialize};

/// A user of the social media platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: String,
    /// Display name of the user
    pub name: String,
}

/// A post authored by a user
///
/// Serialized with camelCase field names (`userId`) to match the JSON shape
/// the HTTP endpoints expose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique identifier for the post
    pub id: u64,
    /// Identifier of the authoring user
    pub user_id: String,
    /// Body text of the post
    pub content: String,
}

/// A comment on a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique identifier for the comment
    pub id: u64,
    /// Identifier of the post being commented on
    pub post_id: u64,
    /// Body text of the comment
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_serializes_with_camel_case_user_id() {
        let post = Post {
            id: 246,
            user_id: "1".to_string(),
            content: "Post about ant".to_string(),
        };

        let json = serde_json::to_value(&post).expect("Failed to serialize Post");

        assert_eq!(json["id"], 246);
        assert_eq!(json["userId"], "1");
        assert_eq!(json["content"], "Post about ant");
    }

    #[test]
    fn test_comment_serializes_with_camel_case_post_id() {
        let comment = Comment {
            id: 1001,
            post_id: 246,
            content: "Great observation about ants!".to_string(),
        };

        let json = serde_json::to_value(&comment).expect("Failed to serialize Comment");

        assert_eq!(json["postId"], 246);
    }

    #[test]
    fn test_user_serialization_roundtrip() {
        let user = User {
            id: "14".to_string(),
            name: "Liam Jackson".to_string(),
        };

        let json = serde_json::to_string(&user).expect("Failed to serialize User");
        let deserialized: User = serde_json::from_str(&json).expect("Failed to deserialize User");

        assert_eq!(deserialized, user);
    }
}
