//! In-process store used for development runs and tests
//!
//! All state sits behind one `RwLock`, so every trait call observes a
//! consistent snapshot. Follow edges and users are seeded through the
//! inherent methods; the service itself never writes them.

use super::{ArticleStore, UserDirectory};
use crate::domain::{Article, LikeToggle, NewArticle, User};
use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct StoredArticle {
    id: Uuid,
    user_id: Uuid,
    title: String,
    content: String,
    tags: BTreeSet<String>,
    like_users: BTreeSet<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct MemoryState {
    users: HashMap<Uuid, User>,
    follows: HashMap<Uuid, BTreeSet<Uuid>>,
    // insertion order
    articles: Vec<StoredArticle>,
}

impl MemoryState {
    fn view(&self, stored: &StoredArticle) -> Article {
        Article {
            id: stored.id,
            user_id: stored.user_id,
            author: self
                .users
                .get(&stored.user_id)
                .map(|u| u.username.clone())
                .unwrap_or_default(),
            title: stored.title.clone(),
            content: stored.content.clone(),
            tags: stored.tags.iter().cloned().collect(),
            like_users: stored.like_users.iter().copied().collect(),
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }

    fn sorted_users<'a>(&'a self, ids: impl Iterator<Item = &'a Uuid>) -> Vec<User> {
        let mut users: Vec<User> = ids.filter_map(|id| self.users.get(id).cloned()).collect();
        users.sort_by(|a, b| a.username.cmp(&b.username).then(a.id.cmp(&b.id)));
        users
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user; usernames are unique
    pub async fn add_user(&self, username: &str) -> Result<User> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.username == username) {
            return Err(AppError::Validation(format!(
                "username '{}' is already taken",
                username
            )));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            created_at: Utc::now(),
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Add a follow edge; returns `true` if it did not exist yet
    pub async fn follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        if follower_id == followee_id {
            return Err(AppError::Validation("users cannot follow themselves".into()));
        }

        let mut state = self.state.write().await;
        for id in [follower_id, followee_id] {
            if !state.users.contains_key(&id) {
                return Err(AppError::NotFound(format!("user {}", id)));
            }
        }

        Ok(state
            .follows
            .entry(follower_id)
            .or_default()
            .insert(followee_id))
    }

    /// Remove a follow edge; returns `true` if it existed
    pub async fn unfollow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        let mut state = self.state.write().await;
        Ok(state
            .follows
            .get_mut(&follower_id)
            .map(|set| set.remove(&followee_id))
            .unwrap_or(false))
    }

    /// Create an article with an explicit creation time
    pub async fn insert_article_at(
        &self,
        owner: Uuid,
        article: NewArticle,
        created_at: DateTime<Utc>,
    ) -> Result<Article> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&owner) {
            return Err(AppError::NotFound(format!("user {}", owner)));
        }

        let stored = StoredArticle {
            id: Uuid::new_v4(),
            user_id: owner,
            title: article.title,
            content: article.content,
            tags: article.tags.into_iter().collect(),
            like_users: BTreeSet::new(),
            created_at,
            updated_at: created_at,
        };
        let view = state.view(&stored);
        state.articles.push(stored);

        debug!(article_id = %view.id, owner = %owner, "article stored in memory");
        Ok(view)
    }
}

#[async_trait::async_trait]
impl UserDirectory for MemoryStore {
    async fn all_users(&self) -> Result<Vec<User>> {
        let state = self.state.read().await;
        Ok(state.sorted_users(state.users.keys()))
    }

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>> {
        Ok(self.state.read().await.users.get(&user_id).cloned())
    }

    async fn followings_of(&self, user_id: Uuid) -> Result<Vec<User>> {
        let state = self.state.read().await;
        Ok(match state.follows.get(&user_id) {
            Some(followees) => state.sorted_users(followees.iter()),
            None => Vec::new(),
        })
    }
}

#[async_trait::async_trait]
impl ArticleStore for MemoryStore {
    async fn articles_owned_by(&self, user_id: Uuid) -> Result<Vec<Article>> {
        let state = self.state.read().await;
        let mut articles: Vec<Article> = state
            .articles
            .iter()
            .filter(|a| a.user_id == user_id)
            .map(|a| state.view(a))
            .collect();
        articles.sort_by_key(|a| a.created_at);
        Ok(articles)
    }

    async fn find_article(&self, article_id: Uuid) -> Result<Option<Article>> {
        let state = self.state.read().await;
        Ok(state
            .articles
            .iter()
            .find(|a| a.id == article_id)
            .map(|a| state.view(a)))
    }

    async fn create_article(&self, owner: Uuid, article: NewArticle) -> Result<Article> {
        self.insert_article_at(owner, article, Utc::now()).await
    }

    async fn toggle_like(&self, article_id: Uuid, user_id: Uuid) -> Result<Option<LikeToggle>> {
        let mut state = self.state.write().await;
        let owner_id = match state.articles.iter().find(|a| a.id == article_id) {
            Some(article) => article.user_id,
            None => return Ok(None),
        };
        let owner_username = state
            .users
            .get(&owner_id)
            .map(|u| u.username.clone())
            .unwrap_or_default();

        let Some(article) = state.articles.iter_mut().find(|a| a.id == article_id) else {
            return Ok(None);
        };
        let liked = if article.like_users.remove(&user_id) {
            false
        } else {
            article.like_users.insert(user_id);
            true
        };

        Ok(Some(LikeToggle {
            article_id,
            owner_username,
            liked,
            like_count: article.like_users.len() as i64,
        }))
    }

    async fn articles_tagged(&self, tag_name: &str) -> Result<Vec<Article>> {
        let state = self.state.read().await;
        let mut articles: Vec<Article> = state
            .articles
            .iter()
            .filter(|a| a.tags.contains(tag_name))
            .map(|a| state.view(a))
            .collect();
        articles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(articles)
    }
}
