use std::sync::Arc;

use super::*;
use crate::test_support::{pen_draft, record, FakeProductApi, Failure};

fn drain(rx: &mut tokio::sync::broadcast::Receiver<CatalogEvent>) -> Vec<CatalogEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[test]
fn catalog_operation_names_are_stable() {
    let names: Vec<&str> = [
        CatalogOperation::Initialize,
        CatalogOperation::Create,
        CatalogOperation::Update,
        CatalogOperation::Delete,
    ]
    .into_iter()
    .map(CatalogOperation::as_str)
    .collect();
    assert_eq!(names, ["initialize", "create", "update", "delete"]);
}

#[tokio::test]
async fn screen_lifecycle_keeps_subscribers_in_step_with_the_catalog() {
    let api = Arc::new(FakeProductApi::with_products(vec![record("1", "Pad", 3.0, 4)]));
    let store = CatalogStore::new(api.clone());
    let mut mirror = store.subscribe_events();
    let mut session = EditSession::new();

    store.initialize().await.expect("mount");

    for field in DraftField::ALL {
        session.update_field(field, pen_draft().field(field));
    }
    let pen = session.submit(&store).await.expect("create");
    assert_eq!(session.draft(), &DraftRecord::default());

    session.start_edit(&pen);
    session.update_field(DraftField::Price, "2.00");
    let repriced = session.submit(&store).await.expect("update");
    assert_eq!(repriced.price, 2.0);

    store
        .delete(&ProductId::new("1"))
        .await
        .expect("delete");

    assert_eq!(
        drain(&mut mirror),
        vec![
            CatalogEvent::Loaded { count: 1 },
            CatalogEvent::Created(pen),
            CatalogEvent::Updated(repriced.clone()),
            CatalogEvent::Deleted(ProductId::new("1")),
        ]
    );
    assert_eq!(store.products().await, vec![repriced]);
    assert_eq!(store.products().await, api.server_products().await);
}

#[tokio::test]
async fn failed_delete_is_reported_without_touching_the_catalog() {
    let api = Arc::new(FakeProductApi::with_products(vec![
        record("1", "Pen", 1.5, 10),
        record("2", "Pad", 3.0, 4),
    ]));
    let store = CatalogStore::new(api.clone());
    store.initialize().await.expect("mount");
    let before = store.products().await;
    let mut mirror = store.subscribe_events();
    api.fail_with(Failure::Status(500, "Internal Server Error".into()))
        .await;

    let result = store.delete(&ProductId::new("2")).await;

    assert!(result.is_err());
    assert_eq!(store.products().await, before);
    assert_eq!(
        drain(&mut mirror),
        vec![CatalogEvent::Failed {
            operation: CatalogOperation::Delete,
            message: "server returned 500: Internal Server Error".into(),
        }]
    );
}

#[test]
fn unauthenticated_users_never_reach_the_catalog() {
    assert_eq!(
        route_guard::guard(false),
        route_guard::Route::Redirect(route_guard::LOGIN_REDIRECT_TARGET)
    );
}
