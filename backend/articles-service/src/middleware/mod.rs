/// HTTP middleware utilities for articles-service
///
/// Bearer tokens are issued by the identity provider; this service only
/// verifies them and hands the resulting identity to handlers as `UserId`.
use crate::error::AppError;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{error::ErrorUnauthorized, Error, FromRequest, HttpMessage, HttpRequest, ResponseError};
use futures::future::LocalBoxFuture;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use uuid::Uuid;

// =====================================================================
// JWT Authentication
// =====================================================================

/// Extracted user identifier stored in request extensions after auth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub Uuid);

/// Claims this service relies on; `sub` carries the user id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    #[serde(default)]
    pub iat: usize,
}

/// HS256 token verification with a secret shared with the identity provider
#[derive(Clone)]
pub struct JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Verify `token` and return the user id from its `sub` claim
    pub fn validate(&self, token: &str) -> Result<Uuid, AppError> {
        let data = decode::<Claims>(token, &self.key, &self.validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid or expired token: {}", e)))?;

        Uuid::parse_str(&data.claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid user ID".to_string()))
    }
}

fn bearer_token(req: &ServiceRequest) -> Result<&str, AppError> {
    let header = req
        .headers()
        .get("Authorization")
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

    header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Invalid Authorization scheme".to_string()))
}

/// Actix middleware that rejects requests without a valid bearer token.
pub struct JwtAuthMiddleware {
    validator: Arc<JwtValidator>,
}

impl JwtAuthMiddleware {
    pub fn new(validator: Arc<JwtValidator>) -> Self {
        Self { validator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
            validator: self.validator.clone(),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
    validator: Arc<JwtValidator>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let outcome = bearer_token(&req).and_then(|token| self.validator.validate(token));

        match outcome {
            Ok(user_id) => {
                req.extensions_mut().insert(UserId(user_id));
                let service = self.service.clone();
                Box::pin(async move {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                })
            }
            Err(err) => {
                tracing::debug!(path = %req.path(), "rejecting request: {}", err);
                let response = err.error_response();
                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
        }
    }
}

impl FromRequest for UserId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<UserId>()
                .copied()
                .ok_or_else(|| ErrorUnauthorized("User ID missing")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn token_for(sub: &str, expires_in_seconds: i64, secret: &str) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: sub.to_string(),
            exp: (now + expires_in_seconds) as usize,
            iat: now as usize,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    async fn whoami(user: UserId) -> HttpResponse {
        HttpResponse::Ok().body(user.0.to_string())
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .wrap(JwtAuthMiddleware::new(Arc::new(JwtValidator::from_secret(SECRET))))
                    .route("/me", web::get().to(whoami)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn valid_token_exposes_user_id() {
        let app = app!();
        let user_id = Uuid::new_v4();

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header((
                "Authorization",
                format!("Bearer {}", token_for(&user_id.to_string(), 3600, SECRET)),
            ))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;

        assert_eq!(body, user_id.to_string().as_bytes());
    }

    #[actix_web::test]
    async fn missing_header_is_unauthorized() {
        let app = app!();
        let resp = test::call_service(&app, test::TestRequest::get().uri("/me").to_request()).await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn expired_token_is_unauthorized() {
        let app = app!();
        let token = token_for(&Uuid::new_v4().to_string(), -3600, SECRET);
        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 401);
    }

    #[actix_web::test]
    async fn wrong_secret_is_unauthorized() {
        let app = app!();
        let token = token_for(&Uuid::new_v4().to_string(), 3600, "other-secret");
        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 401);
    }

    #[actix_web::test]
    async fn non_uuid_subject_is_unauthorized() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header((
                "Authorization",
                format!("Bearer {}", token_for("user-123", 3600, SECRET)),
            ))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 401);
    }

    #[actix_web::test]
    async fn basic_scheme_is_unauthorized() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 401);
    }
}
