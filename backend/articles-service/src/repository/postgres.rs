use super::{ArticleStore, UserDirectory};
use crate::domain::{Article, LikeToggle, NewArticle, User};
use crate::error::{AppError, Result};
use sqlx::PgPool;
use std::collections::{HashMap, HashSet};
use tracing::debug;
use uuid::Uuid;

/// Shared projection for article reads. Tags and likes are aggregated per row
/// so each article comes back exactly once.
const ARTICLE_SELECT: &str = r#"
    SELECT a.id, a.user_id, u.username AS author, a.title, a.content,
           COALESCE(
               (SELECT array_agg(t.name::text ORDER BY t.name)
                FROM article_tags at
                JOIN tags t ON t.id = at.tag_id
                WHERE at.article_id = a.id),
               '{}'::text[]
           ) AS tags,
           COALESCE(
               (SELECT array_agg(l.user_id ORDER BY l.user_id)
                FROM article_likes l
                WHERE l.article_id = a.id),
               '{}'::uuid[]
           ) AS like_users,
           a.created_at, a.updated_at
    FROM articles a
    JOIN users u ON u.id = a.user_id
"#;

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserDirectory for PgStore {
    async fn all_users(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, created_at
            FROM users
            ORDER BY username, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, created_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn followings_of(&self, user_id: Uuid) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.username, u.created_at
            FROM follows f
            JOIN users u ON u.id = f.followee_id
            WHERE f.follower_id = $1
            ORDER BY u.username, u.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn followings_of_many(&self, user_ids: &[Uuid]) -> Result<HashMap<Uuid, HashSet<Uuid>>> {
        let mut result: HashMap<Uuid, HashSet<Uuid>> =
            user_ids.iter().map(|id| (*id, HashSet::new())).collect();

        if user_ids.is_empty() {
            return Ok(result);
        }

        let edges = sqlx::query_as::<_, (Uuid, Uuid)>(
            r#"
            SELECT follower_id, followee_id
            FROM follows
            WHERE follower_id = ANY($1)
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await?;

        for (follower_id, followee_id) in edges {
            result.entry(follower_id).or_default().insert(followee_id);
        }

        Ok(result)
    }
}

#[async_trait::async_trait]
impl ArticleStore for PgStore {
    async fn articles_owned_by(&self, user_id: Uuid) -> Result<Vec<Article>> {
        let sql = format!("{ARTICLE_SELECT} WHERE a.user_id = $1 ORDER BY a.created_at, a.id");
        let articles = sqlx::query_as::<_, Article>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(articles)
    }

    async fn find_article(&self, article_id: Uuid) -> Result<Option<Article>> {
        let sql = format!("{ARTICLE_SELECT} WHERE a.id = $1");
        let article = sqlx::query_as::<_, Article>(&sql)
            .bind(article_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(article)
    }

    async fn create_article(&self, owner: Uuid, article: NewArticle) -> Result<Article> {
        let article_id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO articles (id, user_id, title, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            "#,
        )
        .bind(article_id)
        .bind(owner)
        .bind(&article.title)
        .bind(&article.content)
        .execute(&mut *tx)
        .await?;

        for name in &article.tags {
            // DO UPDATE so RETURNING yields the id of an existing tag as well
            let tag_id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO tags (name)
                VALUES ($1)
                ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
                RETURNING id
                "#,
            )
            .bind(name)
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query(
                r#"
                INSERT INTO article_tags (article_id, tag_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(article_id)
            .bind(tag_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        debug!(%article_id, %owner, tags = article.tags.len(), "article persisted");

        self.find_article(article_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("article {} vanished after insert", article_id)))
    }

    async fn toggle_like(&self, article_id: Uuid, user_id: Uuid) -> Result<Option<LikeToggle>> {
        let mut tx = self.pool.begin().await?;

        let owner_username: Option<String> = sqlx::query_scalar(
            r#"
            SELECT u.username
            FROM articles a
            JOIN users u ON u.id = a.user_id
            WHERE a.id = $1
            "#,
        )
        .bind(article_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(owner_username) = owner_username else {
            return Ok(None);
        };

        let removed = sqlx::query(
            r#"
            DELETE FROM article_likes
            WHERE article_id = $1 AND user_id = $2
            "#,
        )
        .bind(article_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            > 0;

        if !removed {
            sqlx::query(
                r#"
                INSERT INTO article_likes (article_id, user_id, created_at)
                VALUES ($1, $2, NOW())
                ON CONFLICT (article_id, user_id) DO NOTHING
                "#,
            )
            .bind(article_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        let like_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM article_likes WHERE article_id = $1")
                .bind(article_id)
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;

        Ok(Some(LikeToggle {
            article_id,
            owner_username,
            liked: !removed,
            like_count,
        }))
    }

    async fn articles_tagged(&self, tag_name: &str) -> Result<Vec<Article>> {
        let sql = format!(
            r#"{ARTICLE_SELECT}
            WHERE EXISTS (
                SELECT 1
                FROM article_tags at
                JOIN tags t ON t.id = at.tag_id
                WHERE at.article_id = a.id AND t.name = $1
            )
            ORDER BY a.created_at DESC, a.id"#
        );
        let articles = sqlx::query_as::<_, Article>(&sql)
            .bind(tag_name)
            .fetch_all(&self.pool)
            .await?;

        Ok(articles)
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
