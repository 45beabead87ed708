/// Article submission handlers
use actix_web::{web, HttpResponse};

use crate::error::Result;
use crate::handlers::{redirect, requester};
use crate::handlers::responses::FormResponse;
use crate::middleware::UserId;
use crate::services::{self, ArticleForm, FieldErrors, Submission};
use crate::AppState;

/// GET /create/ - an empty submission form
pub async fn create_form(_user: UserId) -> HttpResponse {
    HttpResponse::Ok().json(FormResponse {
        form: ArticleForm::default(),
        errors: FieldErrors::new(),
    })
}

/// POST /create/ - persist the article and redirect to the author's profile.
/// Invalid input comes back as the same form with field errors.
pub async fn create_article(
    state: web::Data<AppState>,
    user: UserId,
    form: web::Form<ArticleForm>,
) -> Result<HttpResponse> {
    let author = requester(&state, user).await?;

    let form = form.into_inner();
    match services::submit(state.articles.as_ref(), author.id, &form).await? {
        Submission::Created(_) => Ok(redirect(&state.routes.profile_url(&author.username))),
        Submission::Invalid(errors) => {
            Ok(HttpResponse::BadRequest().json(FormResponse { form, errors }))
        }
    }
}
