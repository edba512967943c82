//! HTTP microservice re-exposing the social media data
//!
//! Serves the cached client's resources as JSON over a handful of REST
//! endpoints.
//!
//! # Routes
//!
//! - `GET /health` - Liveness check
//! - `GET /api/users` - All users
//! - `GET /api/users/{user_id}/posts` - Posts authored by a user
//! - `GET /api/posts/{post_id}/comments` - Comments on a post
//! - `GET /api/posts` - All posts from all users
//!
//! Successful responses wrap the records in a `{"<resource>": [...]}`
//! envelope; failures surface as a 500 with `{"error": "<message>"}` and the
//! underlying cause logged at the routing boundary.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::data::{Comment, Post, SocialClient, User};

/// Default listen address, matching the upstream the remote source expects
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Server error types
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Bind error: {0}")]
    Bind(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared server state
struct AppState {
    client: SocialClient,
}

/// HTTP server for the social media API
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new server around a cached client
    pub fn new(client: SocialClient) -> Self {
        Self {
            state: Arc::new(AppState { client }),
        }
    }

    /// Builds the router
    fn router(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/api/users", get(get_users))
            .route("/api/users/{user_id}/posts", get(get_user_posts))
            .route("/api/posts/{post_id}/comments", get(get_post_comments))
            .route("/api/posts", get(get_all_posts))
            .with_state(state)
    }

    /// Runs the server on the given address until shutdown
    pub async fn run(self, addr: &str) -> Result<(), ServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(e.to_string()))?;

        tracing::info!(addr = addr, "social media API microservice listening");

        axum::serve(listener, Self::router(self.state))
            .await
            .map_err(ServerError::Io)
    }
}

// ============================================================================
// Request/Response types
// ============================================================================

/// Health check envelope
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
}

/// `{"users": [...]}` envelope
#[derive(Debug, Serialize)]
struct UsersResponse {
    users: Vec<User>,
}

/// `{"posts": [...]}` envelope
#[derive(Debug, Serialize)]
struct PostsResponse {
    posts: Vec<Post>,
}

/// `{"comments": [...]}` envelope
#[derive(Debug, Serialize)]
struct CommentsResponse {
    comments: Vec<Comment>,
}

/// `{"error": "..."}` envelope for failed requests
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Builds the generic 500 response with a fixed per-endpoint message
fn fetch_failure(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Social media API microservice is running",
    })
}

async fn get_users(State(state): State<Arc<AppState>>) -> Response {
    match state.client.users().await {
        Ok(users) => {
            tracing::info!(count = users.len(), "retrieved users");
            Json(UsersResponse { users }).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to fetch users");
            fetch_failure("Failed to fetch users")
        }
    }
}

async fn get_user_posts(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Response {
    match state.client.user_posts(&user_id).await {
        Ok(posts) => {
            tracing::info!(count = posts.len(), user_id = %user_id, "retrieved posts for user");
            Json(PostsResponse { posts }).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, user_id = %user_id, "failed to fetch posts");
            fetch_failure("Failed to fetch posts")
        }
    }
}

async fn get_post_comments(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<u64>,
) -> Response {
    match state.client.post_comments(post_id).await {
        Ok(comments) => {
            tracing::info!(count = comments.len(), post_id, "retrieved comments for post");
            Json(CommentsResponse { comments }).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, post_id, "failed to fetch comments");
            fetch_failure("Failed to fetch comments")
        }
    }
}

async fn get_all_posts(State(state): State<Arc<AppState>>) -> Response {
    match state.client.all_posts().await {
        Ok(posts) => {
            tracing::info!(count = posts.len(), "retrieved all posts");
            Json(PostsResponse { posts }).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to fetch all posts");
            fetch_failure("Failed to fetch posts")
        }
    }
}
