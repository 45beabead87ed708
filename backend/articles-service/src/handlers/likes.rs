use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::error::Result;
use crate::handlers::{redirect, requester};
use crate::middleware::UserId;
use crate::services::likes;
use crate::AppState;

/// Where to send the user after toggling a like.
/// Attached to each like route as resource data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnTo {
    /// The global feed at `/`
    Feed,
    /// The profile page of the article's owner
    OwnerProfile,
}

/// GET /{article_id}/like_root/ and /{article_id}/like_profile/
pub async fn toggle_like(
    state: web::Data<AppState>,
    return_to: web::Data<ReturnTo>,
    user: UserId,
    article_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let fan = requester(&state, user).await?;
    let toggle = likes::toggle_like(state.articles.as_ref(), article_id.into_inner(), fan.id).await?;

    let location = match **return_to {
        ReturnTo::Feed => "/".to_string(),
        ReturnTo::OwnerProfile => state.routes.profile_url(&toggle.owner_username),
    };

    Ok(redirect(&location))
}
