/// Business logic layer for articles-service
///
/// This module provides high-level operations:
/// - Feed: followed users' articles and follow suggestions
/// - Articles: form validation and article submission
/// - Likes: like/un-like toggle
/// - Tags: exact tag-name search
///
/// Services take the store traits and an explicit user id; they never see
/// HTTP types.
pub mod articles;
pub mod feed;
pub mod likes;
pub mod tags;

pub use articles::{parse_tags, submit, ArticleForm, FieldErrors, Submission};
pub use feed::{assemble, rank_suggestions, Feed, SUGGESTION_LIMIT};
pub use likes::toggle_like;
pub use tags::search_by_tag;
