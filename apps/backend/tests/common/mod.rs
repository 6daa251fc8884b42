//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for setting up the router against a database
//! - Helpers for creating users and catalog words
//! - Authentication helpers
//!
//! # Requirements
//! Database-backed tests require a PostgreSQL database (set DATABASE_URL).
//! Tests built with `TestContext::without_database` never connect.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use uuid::Uuid;

use hanzi_packs_backend::build_router;
use hanzi_packs_backend::config::{PackConfig, PracticeConfig};
use hanzi_packs_backend::db::Database;
use hanzi_packs_backend::models::WordUpsert;
use hanzi_packs_backend::AppState;

/// Test context containing database handle and router.
pub struct TestContext {
    pub db: Arc<Database>,
    app: Router,
}

impl TestContext {
    /// Create a new test context connected to DATABASE_URL.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        Self::from_database(db)
    }

    /// Create a context whose pool never connects.
    ///
    /// Only routes that do not touch the database may be exercised.
    pub fn without_database() -> Self {
        let db = Database::connect_lazy("postgres://localhost/unused")
            .expect("Failed to create lazy pool");
        Self::from_database(db)
    }

    fn from_database(db: Database) -> Self {
        let db = Arc::new(db);
        let state = AppState {
            db: db.clone(),
            packs: PackConfig::default(),
            practice: PracticeConfig::default(),
        };
        let app = build_router(state);

        Self { db, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Create a test user and return its ID and token.
    pub async fn create_test_user(&self) -> (Uuid, String) {
        let subject = fixtures::unique_subject();
        let user = self
            .db
            .upsert_user(&subject, Some("Test Learner"))
            .await
            .expect("Failed to create test user");
        (user.id, user.token)
    }

    /// Insert catalog words and return their IDs in input order.
    pub async fn insert_words(&self, words: &[WordUpsert]) -> Vec<i64> {
        self.db
            .upsert_words(words)
            .await
            .expect("Failed to insert test words");

        let mut ids = Vec::with_capacity(words.len());
        for word in words {
            let id: i64 = sqlx::query_scalar("SELECT id FROM words WHERE chinese = $1 AND pinyin = $2")
                .bind(&word.chinese)
                .bind(&word.pinyin)
                .fetch_one(self.db.pool())
                .await
                .expect("Inserted word not found");
            ids.push(id);
        }
        ids
    }

    /// Format authorization header value.
    pub fn auth_header_value(token: &str) -> String {
        format!("Bearer {}", token)
    }

    /// Remove a test user; unlocked cards and pack history cascade.
    pub async fn cleanup_user(&self, user_id: Uuid) {
        let _ = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;
    }

    /// Remove test words from the catalog.
    pub async fn cleanup_words(&self, word_ids: &[i64]) {
        let _ = sqlx::query("DELETE FROM words WHERE id = ANY($1)")
            .bind(word_ids)
            .execute(self.db.pool())
            .await;
    }
}
