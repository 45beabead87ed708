/// Article submission - form validation, tag parsing, persistence
use crate::domain::{Article, NewArticle};
use crate::error::Result;
use crate::repository::ArticleStore;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const TITLE_MAX_LEN: usize = 100;
pub const TAG_MAX_LEN: usize = 50;

/// Submitted article fields. The owner is never part of the form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ArticleForm {
    #[serde(default)]
    #[validate(custom(function = "valid_title"))]
    pub title: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub content: String,
    #[serde(default)]
    #[validate(custom(function = "valid_tags"))]
    pub tags: String,
}

/// Field name -> messages
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Result of a submission attempt
#[derive(Debug)]
pub enum Submission {
    Created(Article),
    Invalid(FieldErrors),
}

fn not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("This field is required.".into());
        return Err(err);
    }
    Ok(())
}

/// Length is checked on the trimmed title, which is what gets stored
fn valid_title(value: &str) -> std::result::Result<(), ValidationError> {
    not_blank(value)?;
    if value.trim().chars().count() > TITLE_MAX_LEN {
        let mut err = ValidationError::new("title_too_long");
        err.message = Some(
            format!("Ensure this value has at most {} characters.", TITLE_MAX_LEN).into(),
        );
        return Err(err);
    }
    Ok(())
}

fn valid_tags(value: &str) -> std::result::Result<(), ValidationError> {
    for tag in parse_tags(value) {
        if tag.chars().count() > TAG_MAX_LEN {
            let mut err = ValidationError::new("tag_too_long");
            err.message = Some(format!("Tag '{}' exceeds {} characters.", tag, TAG_MAX_LEN).into());
            return Err(err);
        }
        if tag.contains('/') {
            let mut err = ValidationError::new("tag_invalid_char");
            err.message = Some(format!("Tag '{}' must not contain '/'.", tag).into());
            return Err(err);
        }
    }
    Ok(())
}

/// Split free-text tag input into tag names.
///
/// Input containing a comma is split on commas, so multi-word tags are
/// possible; otherwise it is split on whitespace. Names are trimmed, empty
/// ones dropped, and the result is sorted without duplicates.
pub fn parse_tags(input: &str) -> Vec<String> {
    let parts: Box<dyn Iterator<Item = &str>> = if input.contains(',') {
        Box::new(input.split(','))
    } else {
        Box::new(input.split_whitespace())
    };

    parts
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

impl ArticleForm {
    /// Check the form and turn it into a `NewArticle`, or per-field messages
    pub fn clean(&self) -> std::result::Result<NewArticle, FieldErrors> {
        if let Err(errors) = self.validate() {
            return Err(field_errors(&errors));
        }

        Ok(NewArticle {
            title: self.title.trim().to_string(),
            content: self.content.clone(),
            tags: parse_tags(&self.tags),
        })
    }
}

fn field_errors(errors: &validator::ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("Invalid value ({}).", e.code),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// Validate `form` and persist it as an article owned by `owner`.
/// Nothing is written when validation fails.
pub async fn submit(store: &dyn ArticleStore, owner: Uuid, form: &ArticleForm) -> Result<Submission> {
    let new_article = match form.clean() {
        Ok(article) => article,
        Err(errors) => {
            tracing::debug!(%owner, fields = ?errors.keys().collect::<Vec<_>>(), "article form rejected");
            return Ok(Submission::Invalid(errors));
        }
    };

    let article = store.create_article(owner, new_article).await?;
    tracing::info!(article_id = %article.id, %owner, tags = ?article.tags, "article created");

    Ok(Submission::Created(article))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, content: &str, tags: &str) -> ArticleForm {
        ArticleForm {
            title: title.to_string(),
            content: content.to_string(),
            tags: tags.to_string(),
        }
    }

    #[test]
    fn tags_split_on_whitespace_without_commas() {
        assert_eq!(parse_tags("rust  python\tgo"), vec!["go", "python", "rust"]);
    }

    #[test]
    fn tags_split_on_commas_when_present() {
        assert_eq!(
            parse_tags("machine learning, rust ,, rust"),
            vec!["machine learning", "rust"]
        );
    }

    #[test]
    fn tags_keep_case() {
        assert_eq!(parse_tags("Python python"), vec!["Python", "python"]);
    }

    #[test]
    fn empty_tag_input_gives_no_tags() {
        assert!(parse_tags("   ").is_empty());
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn valid_form_cleans() {
        let cleaned = form("  Hello ", "body", "b a").clean().unwrap();
        assert_eq!(cleaned.title, "Hello");
        assert_eq!(cleaned.tags, vec!["a", "b"]);
    }

    #[test]
    fn blank_title_and_content_are_reported_per_field() {
        let errors = form("   ", "", "").clean().unwrap_err();
        assert!(errors.contains_key("title"));
        assert!(errors.contains_key("content"));
        assert!(!errors.contains_key("tags"));
    }

    #[test]
    fn overlong_title_is_rejected() {
        let errors = form(&"x".repeat(101), "body", "").clean().unwrap_err();
        assert!(errors.contains_key("title"));
    }

    #[test]
    fn title_length_counts_trimmed_characters() {
        let padded = format!("  {}  ", "x".repeat(100));
        let cleaned = form(&padded, "body", "").clean().unwrap();
        assert_eq!(cleaned.title.chars().count(), 100);

        let errors = form(&format!(" {} ", "x".repeat(101)), "body", "")
            .clean()
            .unwrap_err();
        assert!(errors.contains_key("title"));
    }

    #[test]
    fn bad_tags_are_rejected() {
        assert!(form("t", "c", "a/b").clean().unwrap_err().contains_key("tags"));
        assert!(form("t", "c", &"x".repeat(51))
            .clean()
            .unwrap_err()
            .contains_key("tags"));
    }
}
