/// Tag search
use crate::domain::Article;
use crate::error::Result;
use crate::repository::ArticleStore;
use std::collections::HashSet;

/// Articles tagged exactly `tag_name`, newest first, each once.
/// Matching follows the store's equality; no normalisation happens here.
pub async fn search_by_tag(store: &dyn ArticleStore, tag_name: &str) -> Result<Vec<Article>> {
    let mut articles = store.articles_tagged(tag_name).await?;
    let mut seen = HashSet::new();
    articles.retain(|a| seen.insert(a.id));

    tracing::debug!(tag = tag_name, found = articles.len(), "tag search");
    Ok(articles)
}
