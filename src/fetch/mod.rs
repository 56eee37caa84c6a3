//! Social platform post and comment retrieval.
//!
//! Providers are behind traits so the orchestrator and tests can inject
//! alternatives; the HTTP implementations degrade to empty results whenever a
//! credential is missing, so an unconfigured platform never fails a refresh.

pub mod handles;

mod comments;
mod posts;

use async_trait::async_trait;

pub use comments::HttpCommentFetcher;
pub use posts::HttpPostFetcher;

use crate::models::Comment;
use crate::models::Platform;
use crate::models::Post;
use crate::Result;

/// Retrieves recent posts for one platform handle
#[async_trait]
pub trait PostFetcher: Send + Sync {
    async fn fetch_posts(&self, platform: Platform, handle: &str) -> Result<Vec<Post>>;
}

/// Retrieves audience comments for a platform's posts
#[async_trait]
pub trait CommentFetcher: Send + Sync {
    async fn fetch_comments(&self, platform: Platform, posts: &[Post]) -> Result<Vec<Comment>>;
}
