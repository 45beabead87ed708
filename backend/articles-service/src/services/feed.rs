//! Feed assembly and follow suggestions
//!
//! The feed is every article written by the users someone follows, oldest
//! first. Suggestions are users they do not follow yet, ranked by how many
//! of their own followings they share.

use crate::domain::{Article, User};
use crate::error::Result;
use crate::repository::{ArticleStore, UserDirectory};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::debug;
use uuid::Uuid;

/// Maximum number of suggested follows once ranking kicks in
pub const SUGGESTION_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct Feed {
    pub articles: Vec<Article>,
    pub suggestions: Vec<User>,
}

/// Build the feed and the suggestion list for `user_id`. Read-only.
pub async fn assemble(
    users: &dyn UserDirectory,
    articles: &dyn ArticleStore,
    user_id: Uuid,
) -> Result<Feed> {
    let followings = users.followings_of(user_id).await?;

    let mut feed = Vec::new();
    for following in &followings {
        feed.extend(articles.articles_owned_by(following.id).await?);
    }
    // stable: equal timestamps keep read order
    feed.sort_by_key(|a| a.created_at);

    let following_ids: HashSet<Uuid> = followings.iter().map(|u| u.id).collect();
    let candidates: Vec<User> = users
        .all_users()
        .await?
        .into_iter()
        .filter(|u| u.id != user_id && !following_ids.contains(&u.id))
        .collect();

    let candidate_ids: Vec<Uuid> = candidates.iter().map(|u| u.id).collect();
    let candidate_followings = users.followings_of_many(&candidate_ids).await?;
    let suggestions = rank_suggestions(&following_ids, candidates, &candidate_followings);

    debug!(
        %user_id,
        followings = followings.len(),
        articles = feed.len(),
        suggestions = suggestions.len(),
        "feed assembled"
    );

    Ok(Feed {
        articles: feed,
        suggestions,
    })
}

/// Order `candidates` by shared followings with the requester, most first,
/// and keep at most [`SUGGESTION_LIMIT`]. Ties go to username, then id.
/// Fewer candidates than the limit are all returned.
pub fn rank_suggestions(
    requester_followings: &HashSet<Uuid>,
    mut candidates: Vec<User>,
    candidate_followings: &HashMap<Uuid, HashSet<Uuid>>,
) -> Vec<User> {
    let overlap = |user: &User| -> usize {
        candidate_followings
            .get(&user.id)
            .map(|theirs| theirs.intersection(requester_followings).count())
            .unwrap_or(0)
    };

    candidates.sort_by(|a, b| {
        overlap(b)
            .cmp(&overlap(a))
            .then_with(|| a.username.cmp(&b.username))
            .then_with(|| a.id.cmp(&b.id))
    });
    candidates.truncate(SUGGESTION_LIMIT);
    candidates
}
