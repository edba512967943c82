//! Mock data source backed by in-memory tables
//!
//! Serves the canned fixture tables the microservice ships with, or a seeded
//! pseudo-random data set for demo mode. Both flavors answer every request
//! from memory and never fail; unknown user or post ids yield empty lists.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;

use super::source::{
    DataSource, RawComment, RawComments, RawPost, RawPosts, RawUsers, SourceError,
};

/// Canned user roster: (id, name)
const CANNED_USERS: &[(&str, &str)] = &[
    ("1", "John Doe"),
    ("2", "Jane Doe"),
    ("3", "Alice Smith"),
    ("4", "Bob Johnson"),
    ("5", "Charlie Brown"),
    ("10", "Helen Moore"),
    ("11", "Ivy Taylor"),
    ("12", "Jack Anderson"),
    ("13", "Kathy Thomas"),
    ("14", "Liam Jackson"),
    ("15", "Mona Harris"),
    ("16", "Nathan Clark"),
    ("17", "Olivia Lewis"),
    ("18", "Paul Walker"),
    ("19", "Quinn Scott"),
    ("20", "Rachel Young"),
];

/// Canned posts: (id, userid, content)
const CANNED_POSTS: &[(u64, u64, &str)] = &[
    (246, 1, "Post about ant"),
    (161, 1, "Post about elephant"),
    (150, 1, "Post about dinosaurs"),
    (247, 2, "My first day at work"),
    (248, 2, "The sunset was beautiful today"),
    (249, 3, "My favorite recipe"),
];

/// Canned comments: (id, postid, content)
const CANNED_COMMENTS: &[(u64, u64, &str)] = &[
    (1001, 246, "Great observation about ants!"),
    (1002, 246, "I disagree, ants are not that interesting."),
    (1003, 161, "Elephants are magnificent creatures!"),
    (1004, 247, "How was it?"),
    (1005, 247, "Congratulations on your new job!"),
];

/// Record counts for the generated demo data set
const DEMO_USER_COUNT: u64 = 10;
const DEMO_POST_COUNT: u64 = 20;
const DEMO_COMMENT_COUNT: u64 = 50;

/// Data source serving canned or generated in-memory tables
#[derive(Debug, Clone)]
pub struct MockSource {
    /// User id to display name
    users: BTreeMap<String, String>,
    /// Posts keyed by authoring user id
    posts: HashMap<String, Vec<RawPost>>,
    /// Comments keyed by post id
    comments: HashMap<u64, Vec<RawComment>>,
}

impl Default for MockSource {
    fn default() -> Self {
        Self::canned()
    }
}

impl MockSource {
    /// Creates a MockSource serving the canned fixture tables
    pub fn canned() -> Self {
        let users = CANNED_USERS
            .iter()
            .map(|(id, name)| (id.to_string(), name.to_string()))
            .collect();

        let mut posts: HashMap<String, Vec<RawPost>> = HashMap::new();
        for &(id, userid, content) in CANNED_POSTS {
            posts.entry(userid.to_string()).or_default().push(RawPost {
                id,
                userid,
                content: content.to_string(),
            });
        }

        let mut comments: HashMap<u64, Vec<RawComment>> = HashMap::new();
        for &(id, postid, content) in CANNED_COMMENTS {
            comments.entry(postid).or_default().push(RawComment {
                id,
                postid,
                content: content.to_string(),
            });
        }

        Self {
            users,
            posts,
            comments,
        }
    }

    /// Creates a MockSource with a pseudo-randomly generated data set
    ///
    /// The same seed always yields the same users, posts, and comments, so
    /// demo runs and tests are reproducible. Post and comment ids are
    /// sequential; authorship and comment targets are drawn from the
    /// generated id ranges.
    pub fn generated(seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);

        let users: BTreeMap<String, String> = (1..=DEMO_USER_COUNT)
            .map(|i| (i.to_string(), format!("User{}", i)))
            .collect();

        let mut posts: HashMap<String, Vec<RawPost>> = HashMap::new();
        for id in 1..=DEMO_POST_COUNT {
            let userid = rng.u64(1..=DEMO_USER_COUNT);
            posts.entry(userid.to_string()).or_default().push(RawPost {
                id,
                userid,
                content: format!("This is post {} content", id),
            });
        }

        let mut comments: HashMap<u64, Vec<RawComment>> = HashMap::new();
        for id in 1..=DEMO_COMMENT_COUNT {
            let postid = rng.u64(1..=DEMO_POST_COUNT);
            comments.entry(postid).or_default().push(RawComment {
                id,
                postid,
                content: format!("This is comment {}", id),
            });
        }

        Self {
            users,
            posts,
            comments,
        }
    }
}

#[async_trait]
impl DataSource for MockSource {
    async fn fetch_users(&self) -> Result<RawUsers, SourceError> {
        Ok(RawUsers {
            users: self.users.clone(),
        })
    }

    async fn fetch_user_posts(&self, user_id: &str) -> Result<RawPosts, SourceError> {
        Ok(RawPosts {
            posts: self.posts.get(user_id).cloned().unwrap_or_default(),
        })
    }

    async fn fetch_post_comments(&self, post_id: u64) -> Result<RawComments, SourceError> {
        Ok(RawComments {
            comments: self.comments.get(&post_id).cloned().unwrap_or_default(),
        })
    }
}
