use actix_web::{web, HttpResponse};

use crate::error::Result;
use crate::handlers::responses::{ArticleResponse, TagSearchResponse};
use crate::middleware::UserId;
use crate::services::tags;
use crate::AppState;

/// GET /{tag_name}/ - articles carrying exactly this tag
pub async fn tag_search(
    state: web::Data<AppState>,
    user: UserId,
    tag_name: web::Path<String>,
) -> Result<HttpResponse> {
    let tag_name = tag_name.into_inner();
    let articles = tags::search_by_tag(state.articles.as_ref(), &tag_name).await?;

    Ok(HttpResponse::Ok().json(TagSearchResponse {
        articles: articles
            .iter()
            .map(|a| ArticleResponse::new(a, user.0, &state.routes))
            .collect(),
        tag_name,
    }))
}
