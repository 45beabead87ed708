pub mod models;

pub use models::{Article, LikeToggle, NewArticle, User};
