//! PostgreSQL credential store tests
//!
//! These need a reachable database (TEST_DATABASE_URL) and are ignored by default.

#[cfg(test)]
mod tests {
    use sqlx::PgPool;
    use uuid::Uuid;

    use authgate_server::store::{PgUserStore, StoreError, UserStore};

    /// Helper to create a migrated test database pool
    async fn setup_test_db() -> PgPool {
        let database_url = std::env::var("TEST_DATABASE_URL")
            .unwrap_or_else(|_| "postgresql://localhost/authgate_test".to_string());

        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(2)
            .connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        authgate_server::db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    fn unique_email() -> String {
        format!("user-{}@example.com", Uuid::new_v4())
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_create_and_find_user() {
        let store = PgUserStore::new(setup_test_db().await);
        let email = unique_email();

        let created = store.create(&email, "hash").await.unwrap();
        let found = store.find_by_email(&email).await.unwrap().unwrap();

        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash, "hash");
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_unique_constraint_reported_as_duplicate() {
        let store = PgUserStore::new(setup_test_db().await);
        let email = unique_email();

        store.create(&email, "first").await.unwrap();
        let err = store.create(&email, "second").await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail(_)));

        let stored = store.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "first");
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_concurrent_signups_single_winner() {
        let store = PgUserStore::new(setup_test_db().await);
        let email = unique_email();

        let (a, b) = tokio::join!(store.create(&email, "a"), store.create(&email, "b"));
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_ping() {
        let store = PgUserStore::new(setup_test_db().await);
        assert!(store.ping().await.is_ok());
    }
}
