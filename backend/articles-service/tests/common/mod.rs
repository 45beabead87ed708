#![allow(dead_code)]

use articles_service::domain::NewArticle;
use articles_service::middleware::Claims;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use uuid::Uuid;

pub const SECRET: &str = "integration-test-secret";

/// Token as the identity provider would issue it
pub fn token_for(user_id: Uuid) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (now + 3600) as usize,
        iat: now as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .expect("encode test token")
}

pub fn bearer(user_id: Uuid) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token_for(user_id)))
}

pub fn article(title: &str, tags: &[&str]) -> NewArticle {
    NewArticle {
        title: title.to_string(),
        content: format!("{} content", title),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}
