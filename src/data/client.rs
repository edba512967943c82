//! Cached client over a social media data source
//!
//! `SocialClient` owns the read-through cache and the transforms from raw wire
//! payloads to typed records. Every accessor goes through the cache: fresh
//! entries are served without touching the source, refreshes that fail fall
//! back to stale data, and only a failure with no cached value at all reaches
//! the caller. The aggregate views the dashboard renders (feed, top users,
//! trending posts) are built on the same cached accessors.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use super::source::{DataSource, SourceError};
use super::{Comment, Post, User};
use crate::cache::{MemoryCache, DEFAULT_TTL};

/// Cache key for the full user roster
const USERS_CACHE_KEY: &str = "users";

/// Number of users shown on the top users board
const TOP_USERS_LIMIT: usize = 5;

/// A user together with how many posts they have authored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserActivity {
    pub user: User,
    pub post_count: usize,
}

/// A post together with how many comments it has attracted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingPost {
    pub post: Post,
    pub comment_count: usize,
}

/// Everything the dashboard renders, fetched in one pass
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    /// Full user roster, ordered by numeric id
    pub users: Vec<User>,
    /// All posts, newest first
    pub feed: Vec<Post>,
    /// Most active users, ranked by post count
    pub top_users: Vec<UserActivity>,
    /// Posts sharing the maximum comment count
    pub trending: Vec<TrendingPost>,
    /// Comment count per post id
    pub comment_counts: HashMap<u64, usize>,
}

impl FeedSnapshot {
    /// Looks up a user's display name by id
    pub fn user_name(&self, user_id: &str) -> Option<&str> {
        self.users
            .iter()
            .find(|user| user.id == user_id)
            .map(|user| user.name.as_str())
    }

    /// Comment count for a post; posts without comments count zero
    pub fn comment_count(&self, post_id: u64) -> usize {
        self.comment_counts.get(&post_id).copied().unwrap_or(0)
    }
}

/// Read-through cached client for social media data
pub struct SocialClient {
    /// Where the data actually comes from
    source: Arc<dyn DataSource>,
    /// Per-resource cache of previously fetched values
    cache: MemoryCache,
    /// Staleness window applied to every resource
    ttl: Duration,
}

impl SocialClient {
    /// Creates a new SocialClient over the given source with the default TTL
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            cache: MemoryCache::new(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Overrides the staleness window
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Cache key for a user's posts
    fn user_posts_key(user_id: &str) -> String {
        format!("user_posts_{}", user_id)
    }

    /// Cache key for a post's comments
    fn post_comments_key(post_id: u64) -> String {
        format!("post_comments_{}", post_id)
    }

    /// Fetches the full user roster, ordered by numeric id
    pub async fn users(&self) -> Result<Vec<User>, SourceError> {
        let source = &self.source;
        self.cache
            .get_or_fetch(
                USERS_CACHE_KEY,
                self.ttl,
                || source.fetch_users(),
                |raw| Ok(raw.into_users()),
            )
            .await
    }

    /// Fetches the posts authored by a user
    pub async fn user_posts(&self, user_id: &str) -> Result<Vec<Post>, SourceError> {
        let source = &self.source;
        self.cache
            .get_or_fetch(
                &Self::user_posts_key(user_id),
                self.ttl,
                || source.fetch_user_posts(user_id),
                |raw| Ok(raw.into_posts()),
            )
            .await
    }

    /// Fetches the comments on a post
    pub async fn post_comments(&self, post_id: u64) -> Result<Vec<Comment>, SourceError> {
        let source = &self.source;
        self.cache
            .get_or_fetch(
                &Self::post_comments_key(post_id),
                self.ttl,
                || source.fetch_post_comments(post_id),
                |raw| Ok(raw.into_comments()),
            )
            .await
    }

    /// Fetches every user's posts concurrently and flattens the result
    ///
    /// Not cached under its own key: the per-user entries it reads through
    /// already are.
    pub async fn all_posts(&self) -> Result<Vec<Post>, SourceError> {
        let users = self.users().await?;

        let fetches = users.iter().map(|user| self.user_posts(&user.id));
        let results = join_all(fetches).await;

        let mut posts = Vec::new();
        for result in results {
            posts.extend(result?);
        }
        Ok(posts)
    }

    /// Fetches the comment count for each of the given posts concurrently
    pub async fn comment_counts(
        &self,
        posts: &[Post],
    ) -> Result<HashMap<u64, usize>, SourceError> {
        let fetches = posts.iter().map(|post| self.post_comments(post.id));
        let results = join_all(fetches).await;

        let mut counts = HashMap::with_capacity(posts.len());
        for (post, result) in posts.iter().zip(results) {
            counts.insert(post.id, result?.len());
        }
        Ok(counts)
    }

    /// Fetches users, feed, top users, and trending posts in one pass
    pub async fn snapshot(&self) -> Result<FeedSnapshot, SourceError> {
        let users = self.users().await?;
        let posts = self.all_posts().await?;
        let comment_counts = self.comment_counts(&posts).await?;

        let top_users = top_users(&users, &posts);
        let trending = trending_from(&posts, &comment_counts);
        let feed = newest_first(posts);

        Ok(FeedSnapshot {
            users,
            feed,
            top_users,
            trending,
            comment_counts,
        })
    }
}

/// Ranks users by how many of the given posts they authored, keeping the top 5
///
/// Ties are broken by the roster order (numeric id ascending), so the ranking
/// is stable across refreshes.
pub fn top_users(users: &[User], posts: &[Post]) -> Vec<UserActivity> {
    let mut ranked: Vec<UserActivity> = users
        .iter()
        .map(|user| UserActivity {
            user: user.clone(),
            post_count: posts.iter().filter(|post| post.user_id == user.id).count(),
        })
        .collect();

    ranked.sort_by(|a, b| b.post_count.cmp(&a.post_count));
    ranked.truncate(TOP_USERS_LIMIT);
    ranked
}

/// Orders posts newest first
///
/// The records carry no timestamps; ids increase with creation in both the
/// canned and generated data, so id order stands in for recency.
pub fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.id.cmp(&a.id));
    posts
}

/// Keeps only the posts sharing the maximum comment count
///
/// When no post has any comments the maximum is zero and every post
/// qualifies, mirroring how the dashboard's source data behaves.
pub fn trending_from(posts: &[Post], counts: &HashMap<u64, usize>) -> Vec<TrendingPost> {
    let max = posts
        .iter()
        .map(|post| counts.get(&post.id).copied().unwrap_or(0))
        .max()
        .unwrap_or(0);

    posts
        .iter()
        .filter(|post| counts.get(&post.id).copied().unwrap_or(0) == max)
        .map(|post| TrendingPost {
            post: post.clone(),
            comment_count: max,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::mock::MockSource;
    use crate::data::source::{RawComments, RawPosts, RawUsers};
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Test source that counts fetches and can be switched to fail
    struct FlakySource {
        inner: MockSource,
        failing: AtomicBool,
        fetches: AtomicUsize,
    }

    impl FlakySource {
        fn new() -> Self {
            Self {
                inner: MockSource::canned(),
                failing: AtomicBool::new(false),
                fetches: AtomicUsize::new(0),
            }
        }

        fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }

        fn record(&self) -> Result<(), SourceError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                Err(SourceError::Status(StatusCode::INTERNAL_SERVER_ERROR))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl DataSource for FlakySource {
        async fn fetch_users(&self) -> Result<RawUsers, SourceError> {
            self.record()?;
            self.inner.fetch_users().await
        }

        async fn fetch_user_posts(&self, user_id: &str) -> Result<RawPosts, SourceError> {
            self.record()?;
            self.inner.fetch_user_posts(user_id).await
        }

        async fn fetch_post_comments(&self, post_id: u64) -> Result<RawComments, SourceError> {
            self.record()?;
            self.inner.fetch_post_comments(post_id).await
        }
    }

    fn flaky_client() -> (Arc<FlakySource>, SocialClient) {
        let source = Arc::new(FlakySource::new());
        let client = SocialClient::new(source.clone());
        (source, client)
    }

    #[tokio::test]
    async fn test_users_are_fetched_once_and_ordered() {
        let (source, client) = flaky_client();

        let first = client.users().await.expect("First fetch should succeed");
        let second = client.users().await.expect("Cached read should succeed");

        assert_eq!(first, second);
        assert_eq!(source.fetch_count(), 1, "Second call must be served from cache");
        assert_eq!(first[0].id, "1");
        assert_eq!(
            first.last().map(|u| u.id.as_str()),
            Some("20"),
            "Roster should be ordered by numeric id"
        );
    }

    #[tokio::test]
    async fn test_failure_without_cached_value_propagates() {
        let (source, client) = flaky_client();
        source.set_failing(true);

        let result = client.users().await;

        assert!(matches!(result, Err(SourceError::Status(_))));
    }

    #[tokio::test]
    async fn test_failed_refresh_serves_stale_users() {
        let (source, client) = flaky_client();

        let original = client.users().await.expect("Initial fetch should succeed");

        client.cache.backdate(USERS_CACHE_KEY, DEFAULT_TTL + Duration::from_secs(1));
        source.set_failing(true);

        let stale = client
            .users()
            .await
            .expect("Stale fallback should suppress the failure");

        assert_eq!(stale, original);
    }

    #[tokio::test]
    async fn test_user_posts_are_cached_per_user() {
        let (source, client) = flaky_client();

        client.user_posts("1").await.expect("fetch");
        client.user_posts("2").await.expect("fetch");
        client.user_posts("1").await.expect("cached");

        assert_eq!(source.fetch_count(), 2, "Each user key is cached independently");
    }

    #[tokio::test]
    async fn test_all_posts_flattens_every_users_posts() {
        let (_source, client) = flaky_client();

        let posts = client.all_posts().await.expect("fetch");

        assert_eq!(posts.len(), 6);
        assert!(posts.iter().any(|p| p.id == 246));
        assert!(posts.iter().any(|p| p.id == 249));
    }

    #[tokio::test]
    async fn test_trending_keeps_only_max_comment_posts() {
        let (_source, client) = flaky_client();
        let posts = client.all_posts().await.expect("fetch");

        let counts = client.comment_counts(&posts).await.expect("fetch");
        let trending = trending_from(&posts, &counts);

        // Posts 246 and 247 both carry two comments, the canned maximum.
        let mut ids: Vec<u64> = trending.iter().map(|t| t.post.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![246, 247]);
        assert!(trending.iter().all(|t| t.comment_count == 2));
    }

    #[test]
    fn test_trending_with_no_comments_keeps_every_post() {
        let posts = vec![
            Post { id: 1, user_id: "1".into(), content: "a".into() },
            Post { id: 2, user_id: "2".into(), content: "b".into() },
        ];

        let trending = trending_from(&posts, &HashMap::new());

        assert_eq!(trending.len(), 2);
        assert!(trending.iter().all(|t| t.comment_count == 0));
    }

    #[tokio::test]
    async fn test_snapshot_composes_all_views() {
        let (_source, client) = flaky_client();

        let snapshot = client.snapshot().await.expect("fetch");

        assert_eq!(snapshot.users.len(), 16);
        assert_eq!(snapshot.feed.len(), 6);
        assert_eq!(snapshot.feed[0].id, 249, "Feed should lead with the newest post");
        assert_eq!(snapshot.top_users.len(), 5);
        assert_eq!(snapshot.user_name("1"), Some("John Doe"));
        assert_eq!(snapshot.comment_count(246), 2);
        assert_eq!(snapshot.comment_count(150), 0);
    }

    #[test]
    fn test_top_users_ranks_by_post_count() {
        let users = vec![
            User { id: "1".into(), name: "John Doe".into() },
            User { id: "2".into(), name: "Jane Doe".into() },
            User { id: "3".into(), name: "Alice Smith".into() },
        ];
        let posts = vec![
            Post { id: 1, user_id: "2".into(), content: "a".into() },
            Post { id: 2, user_id: "2".into(), content: "b".into() },
            Post { id: 3, user_id: "3".into(), content: "c".into() },
        ];

        let ranked = top_users(&users, &posts);

        assert_eq!(ranked[0].user.id, "2");
        assert_eq!(ranked[0].post_count, 2);
        assert_eq!(ranked[1].user.id, "3");
        assert_eq!(ranked[2].post_count, 0);
    }

    #[test]
    fn test_top_users_truncates_to_limit() {
        let users: Vec<User> = (1..=8)
            .map(|i| User { id: i.to_string(), name: format!("User{}", i) })
            .collect();

        let ranked = top_users(&users, &[]);

        assert_eq!(ranked.len(), 5);
    }

    #[test]
    fn test_newest_first_orders_by_id_descending() {
        let posts = vec![
            Post { id: 150, user_id: "1".into(), content: "old".into() },
            Post { id: 249, user_id: "3".into(), content: "new".into() },
            Post { id: 246, user_id: "1".into(), content: "mid".into() },
        ];

        let ordered = newest_first(posts);

        let ids: Vec<u64> = ordered.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![249, 246, 150]);
    }
}
