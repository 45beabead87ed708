/// JSON shapes returned to clients
use crate::config::RoutesConfig;
use crate::domain::{Article, User};
use crate::services::{ArticleForm, FieldErrors};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub author: String,
    pub author_url: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub like_count: usize,
    /// Whether the requesting user likes this article
    pub liked: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl ArticleResponse {
    pub fn new(article: &Article, viewer: Uuid, routes: &RoutesConfig) -> Self {
        Self {
            id: article.id,
            user_id: article.user_id,
            author: article.author.clone(),
            author_url: routes.profile_url(&article.author),
            title: article.title.clone(),
            content: article.content.clone(),
            tags: article.tags.clone(),
            like_count: article.like_count(),
            liked: article.is_liked_by(viewer),
            created_at: article.created_at.to_rfc3339(),
            updated_at: article.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub profile_url: String,
}

impl UserSummary {
    pub fn new(user: &User, routes: &RoutesConfig) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            profile_url: routes.profile_url(&user.username),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub articles: Vec<ArticleResponse>,
    pub suggestions: Vec<UserSummary>,
}

#[derive(Debug, Serialize)]
pub struct TagSearchResponse {
    pub tag_name: String,
    pub articles: Vec<ArticleResponse>,
}

/// The submission form, with field errors after a failed POST
#[derive(Debug, Serialize)]
pub struct FormResponse {
    pub form: ArticleForm,
    pub errors: FieldErrors,
}
