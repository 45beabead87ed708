use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity as seen by this service (identity lives elsewhere)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Article entity - a post owned by one user, carrying tags and likes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Article {
    pub id: Uuid,
    /// Owner; never changes after creation
    pub user_id: Uuid,
    /// Owner's username, joined in by the store
    pub author: String,
    pub title: String,
    pub content: String,
    /// Tag names, sorted, each at most once
    pub tags: Vec<String>,
    /// Users who like this article, sorted, each at most once
    pub like_users: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub fn is_liked_by(&self, user_id: Uuid) -> bool {
        self.like_users.contains(&user_id)
    }

    pub fn like_count(&self) -> usize {
        self.like_users.len()
    }
}

/// Validated input for a new article. The owner is supplied separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

/// Outcome of a like toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LikeToggle {
    pub article_id: Uuid,
    /// Username of the article owner (needed for profile redirects)
    pub owner_username: String,
    /// `true` if the user now likes the article, `false` if the like was removed
    pub liked: bool,
    pub like_count: i64,
}
