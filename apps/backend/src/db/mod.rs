//! PostgreSQL database operations

use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a pool that only connects on first use
    pub fn connect_lazy(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === User Repository ===

    /// Create the user for an identity subject, or return the existing one
    pub async fn upsert_user(
        &self,
        identity_subject: &str,
        display_name: Option<&str>,
    ) -> Result<User> {
        let token = Uuid::new_v4().to_string();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (identity_subject, token, display_name)
            VALUES ($1, $2, $3)
            ON CONFLICT (identity_subject) DO UPDATE SET
                display_name = COALESCE(EXCLUDED.display_name, users.display_name),
                last_seen_at = NOW()
            RETURNING id, identity_subject, token, display_name, created_at, last_seen_at
            "#,
        )
        .bind(identity_subject)
        .bind(&token)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Get user by API token
    pub async fn get_user_by_token(&self, token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, identity_subject, token, display_name, created_at, last_seen_at
            FROM users
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update user last_seen_at timestamp
    pub async fn update_last_seen(&self, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET last_seen_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // === Word Repository ===

    /// Get catalog words, optionally restricted to one level
    pub async fn get_words(&self, level: Option<HskLevel>) -> Result<Vec<DbWord>> {
        let words = match level {
            Some(level) => {
                sqlx::query_as::<_, DbWord>(
                    r#"
                    SELECT id, chinese, pinyin, translation, hsk_level, frequency,
                           created_at, updated_at
                    FROM words
                    WHERE hsk_level = $1
                    ORDER BY id
                    "#,
                )
                .bind(i16::from(level.value()))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, DbWord>(
                    r#"
                    SELECT id, chinese, pinyin, translation, hsk_level, frequency,
                           created_at, updated_at
                    FROM words
                    ORDER BY id
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(words)
    }

    /// Get word by ID
    pub async fn get_word(&self, word_id: i64) -> Result<Option<DbWord>> {
        let word = sqlx::query_as::<_, DbWord>(
            r#"
            SELECT id, chinese, pinyin, translation, hsk_level, frequency,
                   created_at, updated_at
            FROM words
            WHERE id = $1
            "#,
        )
        .bind(word_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(word)
    }

    /// Insert or update catalog words keyed by (chinese, pinyin)
    pub async fn upsert_words(&self, words: &[WordUpsert]) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        for word in words {
            sqlx::query(
                r#"
                INSERT INTO words (chinese, pinyin, translation, hsk_level, frequency)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (chinese, pinyin) DO UPDATE SET
                    translation = EXCLUDED.translation,
                    hsk_level = EXCLUDED.hsk_level,
                    frequency = EXCLUDED.frequency,
                    updated_at = NOW()
                "#,
            )
            .bind(&word.chinese)
            .bind(&word.pinyin)
            .bind(&word.translation)
            .bind(word.hsk_level.map(|level| i16::from(level.value())))
            .bind(word.frequency)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(words.len())
    }

    // === Unlocked Card Repository ===

    /// IDs of every word the user has unlocked
    pub async fn get_unlocked_word_ids(&self, user_id: Uuid) -> Result<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT word_id
            FROM unlocked_cards
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    /// Unlocked cards with word details, most recently unlocked first
    pub async fn get_unlocked_cards(&self, user_id: Uuid) -> Result<Vec<DbUnlockedCard>> {
        let cards = sqlx::query_as::<_, DbUnlockedCard>(
            r#"
            SELECT w.id AS word_id, w.chinese, w.pinyin, w.translation, w.hsk_level, w.frequency,
                   u.copies, u.first_unlocked_at, u.last_unlocked_at
            FROM unlocked_cards u
            JOIN words w ON w.id = u.word_id
            WHERE u.user_id = $1
            ORDER BY u.last_unlocked_at DESC, w.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(cards)
    }

    // === Pack Opening Repository ===

    /// Unlock the drawn words and record the opening atomically.
    ///
    /// Returns the copy count of each word after the unlock, in draw order.
    /// A count of 1 means the word was new to the user.
    pub async fn record_pack_opening(&self, opening: &DbPackOpening) -> Result<Vec<i32>> {
        let mut tx = self.pool.begin().await?;
        let mut copies = Vec::with_capacity(opening.word_ids.len());

        for word_id in &opening.word_ids {
            let count = sqlx::query_scalar::<_, i32>(
                r#"
                INSERT INTO unlocked_cards (user_id, word_id, copies, first_unlocked_at, last_unlocked_at)
                VALUES ($1, $2, 1, $3, $3)
                ON CONFLICT (user_id, word_id) DO UPDATE SET
                    copies = unlocked_cards.copies + 1,
                    last_unlocked_at = EXCLUDED.last_unlocked_at
                RETURNING copies
                "#,
            )
            .bind(opening.user_id)
            .bind(word_id)
            .bind(opening.opened_at)
            .fetch_one(&mut *tx)
            .await?;
            copies.push(count);
        }

        sqlx::query(
            r#"
            INSERT INTO pack_openings (id, user_id, target_level, requested_count, pool_scope, word_ids, opened_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(opening.id)
        .bind(opening.user_id)
        .bind(opening.target_level)
        .bind(opening.requested_count)
        .bind(&opening.pool_scope)
        .bind(&opening.word_ids)
        .bind(opening.opened_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(copies)
    }

    /// Most recent pack openings first
    pub async fn get_pack_history(&self, user_id: Uuid, limit: i64) -> Result<Vec<DbPackOpening>> {
        let openings = sqlx::query_as::<_, DbPackOpening>(
            r#"
            SELECT id, user_id, target_level, requested_count, pool_scope, word_ids, opened_at
            FROM pack_openings
            WHERE user_id = $1
            ORDER BY opened_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(openings)
    }
}
