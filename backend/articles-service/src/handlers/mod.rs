/// HTTP handlers for articles-service
///
/// Thin presentation layer: handlers pull the explicit `UserId`, call into
/// `services`, and turn the result into JSON or a redirect.
pub mod articles;
pub mod feed;
pub mod health;
pub mod likes;
pub mod responses;
pub mod tags;

use actix_web::{http::header, HttpResponse};

use crate::domain::User;
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::AppState;

pub use articles::{create_article, create_form};
pub use feed::index;
pub use health::health;
pub use likes::{toggle_like, ReturnTo};
pub use tags::tag_search;

pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Resolve the token subject to a known user. A valid token for a user the
/// directory has never seen is treated as unauthenticated.
pub(crate) async fn requester(state: &AppState, user: UserId) -> Result<User> {
    state
        .users
        .find_user(user.0)
        .await?
        .ok_or_else(|| AppError::Unauthorized(format!("unknown user {}", user.0)))
}
