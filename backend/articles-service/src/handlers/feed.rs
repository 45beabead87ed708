use actix_web::{web, HttpResponse};

use crate::error::Result;
use crate::handlers::responses::{ArticleResponse, FeedResponse, UserSummary};
use crate::middleware::UserId;
use crate::services::feed;
use crate::AppState;

/// GET / - followed users' articles, oldest first, plus follow suggestions
pub async fn index(state: web::Data<AppState>, user: UserId) -> Result<HttpResponse> {
    let feed = feed::assemble(state.users.as_ref(), state.articles.as_ref(), user.0).await?;

    Ok(HttpResponse::Ok().json(FeedResponse {
        articles: feed
            .articles
            .iter()
            .map(|a| ArticleResponse::new(a, user.0, &state.routes))
            .collect(),
        suggestions: feed
            .suggestions
            .iter()
            .map(|u| UserSummary::new(u, &state.routes))
            .collect(),
    }))
}
