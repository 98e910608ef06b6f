//! Tests for the in-memory user store.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;
use tokio::task::JoinSet;

#[fixture]
fn repo() -> InMemoryUserRepository {
    InMemoryUserRepository::new()
}

#[fixture]
fn ctx() -> RequestContext {
    RequestContext::background()
}

fn named(name: &str) -> NewUser {
    NewUser::default().with_attribute("name", name)
}

#[rstest]
#[tokio::test]
async fn empty_store_lists_nothing(repo: InMemoryUserRepository, ctx: RequestContext) {
    let users = repo.list(&ctx).await.expect("list");
    assert!(users.is_empty());
}

#[rstest]
#[tokio::test]
async fn inserts_allocate_sequential_ids_from_one(
    repo: InMemoryUserRepository,
    ctx: RequestContext,
) {
    for expected in 1..=3_i64 {
        let user = repo.insert(&ctx, named("x")).await.expect("insert");
        assert_eq!(user.id().get(), expected);
    }
    assert_eq!(repo.list(&ctx).await.expect("list").len(), 3);
}

#[rstest]
#[tokio::test]
async fn seeded_store_continues_after_seeds(ctx: RequestContext) {
    let repo = InMemoryUserRepository::with_users([named("Alice"), named("Bob")]);

    let listed = repo.list(&ctx).await.expect("list");
    let names: Vec<_> = listed
        .iter()
        .map(|user| (user.id().get(), user.attribute("name").cloned()))
        .collect();
    assert_eq!(
        names,
        vec![(1, Some(json!("Alice"))), (2, Some(json!("Bob")))]
    );

    let next = repo.insert(&ctx, named("Carol")).await.expect("insert");
    assert_eq!(next.id().get(), 3);
}

#[rstest]
#[tokio::test]
async fn deleted_ids_are_not_reused(repo: InMemoryUserRepository, ctx: RequestContext) {
    let first = repo.insert(&ctx, named("a")).await.expect("insert");
    repo.delete(&ctx, first.id()).await.expect("delete");

    let second = repo.insert(&ctx, named("b")).await.expect("insert");
    assert_eq!(second.id().get(), 2);
}

#[rstest]
#[tokio::test]
async fn find_returns_stored_attributes(repo: InMemoryUserRepository, ctx: RequestContext) {
    let created = repo.insert(&ctx, named("Alice")).await.expect("insert");

    let found = repo.find_by_id(&ctx, created.id()).await.expect("find");
    assert_eq!(found, created);
    assert_eq!(found.attribute("name"), Some(&json!("Alice")));
}

#[rstest]
#[case::find(0)]
#[case::update(1)]
#[case::delete(2)]
#[tokio::test]
async fn missing_ids_report_not_found(
    repo: InMemoryUserRepository,
    ctx: RequestContext,
    #[case] operation: u8,
) {
    let id = UserId::new(42);
    let result = match operation {
        0 => repo.find_by_id(&ctx, id).await,
        1 => repo.update(&ctx, id, named("ghost")).await,
        _ => repo.delete(&ctx, id).await,
    };
    let err = result.expect_err("missing user");
    assert_eq!(err, UserPersistenceError::not_found(id));
}

#[rstest]
#[tokio::test]
async fn update_replaces_attributes_and_keeps_id(
    repo: InMemoryUserRepository,
    ctx: RequestContext,
) {
    let created = repo
        .insert(&ctx, named("Alice").with_attribute("email", "a@example.com"))
        .await
        .expect("insert");

    let updated = repo
        .update(&ctx, created.id(), named("Alicia"))
        .await
        .expect("update");
    assert_eq!(updated.id(), created.id());
    assert_eq!(updated.attribute("name"), Some(&json!("Alicia")));
    assert!(updated.attribute("email").is_none());

    let stored = repo.find_by_id(&ctx, created.id()).await.expect("find");
    assert_eq!(stored, updated);
}

#[rstest]
#[tokio::test]
async fn delete_returns_the_removed_record(repo: InMemoryUserRepository, ctx: RequestContext) {
    let created = repo.insert(&ctx, named("Bob")).await.expect("insert");

    let removed = repo.delete(&ctx, created.id()).await.expect("delete");
    assert_eq!(removed, created);
    assert!(repo.find_by_id(&ctx, created.id()).await.is_err());
}

#[rstest]
#[tokio::test]
async fn storage_ignores_cancellation(repo: InMemoryUserRepository) {
    let ctx = RequestContext::background();
    ctx.cancel();
    let user = repo.insert(&ctx, named("late")).await.expect("insert");
    assert_eq!(user.id(), UserId::FIRST);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_inserts_receive_distinct_ids() {
    const WRITERS: i64 = 100;
    let repo = Arc::new(InMemoryUserRepository::new());
    let mut tasks = JoinSet::new();
    for n in 0..WRITERS {
        let repo = Arc::clone(&repo);
        tasks.spawn(async move {
            let ctx = RequestContext::background();
            repo.insert(&ctx, NewUser::default().with_attribute("n", n))
                .await
                .expect("insert")
                .id()
        });
    }

    let mut ids = BTreeSet::new();
    while let Some(joined) = tasks.join_next().await {
        ids.insert(joined.expect("task completes").get());
    }
    let expected: BTreeSet<i64> = (1..=WRITERS).collect();
    assert_eq!(ids, expected);
}
