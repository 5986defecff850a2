//! PgConversationRepository tests

use pretty_assertions::assert_eq;
use sqlx::PgPool;
use uuid::Uuid;

use banter::domain::{Conversation, ConversationRepository, MemberRemoval};
use banter::infrastructure::repositories::PgConversationRepository;
use banter::shared::error::AppError;

use super::seed_users;

async fn live_membership_rows(pool: &PgPool, conversation_id: Uuid) -> i64 {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM conversation_members \
         WHERE conversation_id = $1 AND deleted_at IS NULL",
    )
    .bind(conversation_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn conversation_with(
    repo: &PgConversationRepository,
    members: &[Uuid],
) -> Conversation {
    repo.create_with_members(&Conversation::new(Some("team".into()), true), members)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_removals_stop_at_two_members(pool: PgPool) {
    let repo = PgConversationRepository::new(pool.clone());
    let users = seed_users(&pool, 3).await;
    let conversation = conversation_with(&repo, &users).await;

    let (first, second) = tokio::join!(
        repo.remove_member(conversation.id, users[0], 2),
        repo.remove_member(conversation.id, users[1], 2),
    );
    let outcomes = [first.unwrap(), second.unwrap()];

    let removed = outcomes
        .iter()
        .filter(|o| matches!(o, MemberRemoval::Removed))
        .count();
    let refused = outcomes
        .iter()
        .filter(|o| matches!(o, MemberRemoval::FloorReached { remaining: 2 }))
        .count();
    assert_eq!((removed, refused), (1, 1));
    assert_eq!(live_membership_rows(&pool, conversation.id).await, 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_remove_at_floor_keeps_both_members(pool: PgPool) {
    let repo = PgConversationRepository::new(pool.clone());
    let users = seed_users(&pool, 2).await;
    let conversation = conversation_with(&repo, &users).await;

    let outcome = repo.remove_member(conversation.id, users[0], 2).await.unwrap();

    assert!(matches!(outcome, MemberRemoval::FloorReached { remaining: 2 }));
    assert_eq!(repo.find_members(conversation.id).await.unwrap().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_remove_non_member(pool: PgPool) {
    let repo = PgConversationRepository::new(pool.clone());
    let users = seed_users(&pool, 3).await;
    let conversation = conversation_with(&repo, &users).await;

    let outcome = repo
        .remove_member(conversation.id, Uuid::new_v4(), 2)
        .await
        .unwrap();

    assert!(matches!(outcome, MemberRemoval::NotAMember));
    assert_eq!(live_membership_rows(&pool, conversation.id).await, 3);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_unknown_member_rolls_back_creation(pool: PgPool) {
    let repo = PgConversationRepository::new(pool.clone());
    let mut users = seed_users(&pool, 2).await;
    users.push(Uuid::new_v4());
    let conversation = Conversation::new(None, true);

    let err = repo
        .create_with_members(&conversation, &users)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(repo.find_by_id(conversation.id).await.unwrap().is_none());
    let orphans: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM conversations WHERE id = $1")
            .bind(conversation.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(orphans, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_adding_same_member_twice_inserts_once(pool: PgPool) {
    let repo = PgConversationRepository::new(pool.clone());
    let users = seed_users(&pool, 3).await;
    let conversation = conversation_with(&repo, &users[..2]).await;

    let first = repo.add_members(conversation.id, &[users[2]]).await.unwrap();
    let second = repo.add_members(conversation.id, &[users[2]]).await.unwrap();

    assert_eq!(first, Some(1));
    assert_eq!(second, Some(0));
    assert_eq!(live_membership_rows(&pool, conversation.id).await, 3);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_add_unknown_user_is_validation_error(pool: PgPool) {
    let repo = PgConversationRepository::new(pool.clone());
    let users = seed_users(&pool, 2).await;
    let conversation = conversation_with(&repo, &users).await;

    let err = repo
        .add_members(conversation.id, &[Uuid::new_v4()])
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_soft_delete_hides_conversation_and_memberships(pool: PgPool) {
    let repo = PgConversationRepository::new(pool.clone());
    let users = seed_users(&pool, 3).await;
    let conversation = conversation_with(&repo, &users).await;

    assert!(repo.soft_delete(conversation.id).await.unwrap());

    assert!(repo.find_by_id(conversation.id).await.unwrap().is_none());
    assert!(repo.find_members(conversation.id).await.unwrap().is_empty());
    assert_eq!(repo.count_for_member(users[0]).await.unwrap(), 0);
    assert_eq!(live_membership_rows(&pool, conversation.id).await, 0);

    assert!(!repo.soft_delete(conversation.id).await.unwrap());
    assert_eq!(
        repo.add_members(conversation.id, &[users[0]]).await.unwrap(),
        None
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_list_for_member_pages_newest_first(pool: PgPool) {
    let repo = PgConversationRepository::new(pool.clone());
    let users = seed_users(&pool, 2).await;
    let mut created = Vec::new();
    for _ in 0..3 {
        created.push(conversation_with(&repo, &users).await.id);
    }

    let page = repo.list_for_member(users[0], 2, 0).await.unwrap();

    assert_eq!(repo.count_for_member(users[0]).await.unwrap(), 3);
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].id, created[2]);
}
