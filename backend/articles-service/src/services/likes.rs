/// Like toggle - one user flips their membership in an article's likes
use crate::domain::LikeToggle;
use crate::error::{AppError, Result};
use crate::repository::ArticleStore;
use uuid::Uuid;

/// Like the article if `user_id` does not like it yet, otherwise un-like it.
/// Fails with `NotFound` and mutates nothing when the article is unknown.
pub async fn toggle_like(
    store: &dyn ArticleStore,
    article_id: Uuid,
    user_id: Uuid,
) -> Result<LikeToggle> {
    let toggle = store
        .toggle_like(article_id, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("article {}", article_id)))?;

    tracing::info!(
        %article_id,
        %user_id,
        liked = toggle.liked,
        like_count = toggle.like_count,
        "like toggled"
    );

    Ok(toggle)
}
