//! Store interfaces and their backends
//!
//! The services only see the two narrow traits below. `PgStore` backs them
//! with PostgreSQL, `MemoryStore` keeps everything in process.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::domain::{Article, LikeToggle, NewArticle, User};
use crate::error::Result;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Read access to users and the directed follow graph
#[async_trait::async_trait]
pub trait UserDirectory: Send + Sync {
    /// Every known user, ordered by username then id
    async fn all_users(&self) -> Result<Vec<User>>;

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>>;

    /// Users that `user_id` follows, ordered by username then id
    async fn followings_of(&self, user_id: Uuid) -> Result<Vec<User>>;

    /// Following ids for several users at once.
    /// Every requested id is present in the result, possibly with an empty set.
    async fn followings_of_many(&self, user_ids: &[Uuid]) -> Result<HashMap<Uuid, HashSet<Uuid>>> {
        let mut result = HashMap::with_capacity(user_ids.len());
        for user_id in user_ids {
            let ids = self
                .followings_of(*user_id)
                .await?
                .into_iter()
                .map(|u| u.id)
                .collect();
            result.insert(*user_id, ids);
        }
        Ok(result)
    }
}

/// Articles with their tags and liking users
#[async_trait::async_trait]
pub trait ArticleStore: Send + Sync {
    /// Articles owned by `user_id`, oldest first
    async fn articles_owned_by(&self, user_id: Uuid) -> Result<Vec<Article>>;

    async fn find_article(&self, article_id: Uuid) -> Result<Option<Article>>;

    /// Persist the article and its tag associations in one unit
    async fn create_article(&self, owner: Uuid, article: NewArticle) -> Result<Article>;

    /// Flip `user_id` in the article's liking users.
    /// Returns `None` without touching anything when the article does not exist.
    async fn toggle_like(&self, article_id: Uuid, user_id: Uuid) -> Result<Option<LikeToggle>>;

    /// Articles carrying a tag named exactly `tag_name`, newest first, no duplicates
    async fn articles_tagged(&self, tag_name: &str) -> Result<Vec<Article>>;

    /// Cheap liveness probe of the backing storage
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
