//! Tests against a real PostgreSQL database
//!
//! Each test gets a fresh database with the embedded migrations applied.
//! They are ignored by default because they need `DATABASE_URL`.

mod conversation_repository_tests;
mod user_tests;

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use banter::domain::{User, UserRepository};
use banter::infrastructure::repositories::PgUserRepository;

/// Insert a live user with a unique username and email
pub async fn seed_user(pool: &PgPool) -> User {
    let id = Uuid::new_v4();
    let tag = &id.simple().to_string()[..12];
    let user = User {
        id,
        username: format!("user{}", tag),
        email: format!("{}@example.com", tag),
        password_hash: "not-a-real-hash".into(),
        first_name: "Test".into(),
        last_name: "User".into(),
        date_of_birth: NaiveDate::from_ymd_opt(1996, 3, 24).unwrap(),
        mobile_number: "9876543210".into(),
        ..User::default()
    };

    PgUserRepository::new(pool.clone())
        .create(&user)
        .await
        .expect("Failed to seed user")
}

pub async fn seed_users(pool: &PgPool, n: usize) -> Vec<Uuid> {
    let mut ids = Vec::with_capacity(n);
    for _ in 0..n {
        ids.push(seed_user(pool).await.id);
    }
    ids
}
