//! Integration tests for the category, item, and stock pass-throughs.

use std::sync::Arc;

use pos_console::api::PosApi;
use pos_console::management::Management;
use pos_console::models::catalog::{CategoryForm, ItemForm, StockForm};
use pos_console::AppError;

use super::test_helpers::{settled_session, FakeApi};

async fn management(api: &Arc<FakeApi>, credential: Option<&str>) -> Management {
    let backend: Arc<dyn PosApi> = Arc::clone(api) as Arc<dyn PosApi>;
    Management::new(backend, settled_session(credential).await)
}

#[tokio::test]
async fn category_mutations_return_fresh_listing() {
    let api = FakeApi::new();
    let manage = management(&api, Some("tok")).await;

    let listed = manage
        .save_category(None, &CategoryForm { name: "Drinks".into() })
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    let id = listed[0].id;

    let listed = manage
        .save_category(Some(id), &CategoryForm { name: "Beverages".into() })
        .await
        .unwrap();
    assert_eq!(listed[0].name, "Beverages");

    let listed = manage.delete_category(id).await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn item_update_of_unknown_id_surfaces_rejection() {
    let api = FakeApi::new();
    let manage = management(&api, Some("tok")).await;
    let form = ItemForm {
        name: "Tea".into(),
        price: 120.0,
        quantity: 5,
        category_id: 1,
    };

    let created = manage.save_item(None, &form).await.unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].category_id, Some(1));

    let err = manage.save_item(Some(99), &form).await.expect_err("unknown id");
    assert!(matches!(err, AppError::Rejected(_)));
    assert_eq!(manage.items().await.unwrap().len(), 1);
}

#[tokio::test]
async fn stock_create_update_delete() {
    let api = FakeApi::new();
    let manage = management(&api, Some("tok")).await;

    let listed = manage
        .save_stock(None, &StockForm { quantity: 10, item_id: 1 })
        .await
        .unwrap();
    let id = listed[0].id;

    let listed = manage
        .save_stock(Some(id), &StockForm { quantity: 4, item_id: 1 })
        .await
        .unwrap();
    assert_eq!(listed[0].quantity, 4);

    assert!(manage.delete_stock(id).await.unwrap().is_empty());
}

#[tokio::test]
async fn management_without_session_makes_no_calls() {
    let api = FakeApi::new();
    let manage = management(&api, None).await;

    assert!(matches!(
        manage.categories().await,
        Err(AppError::AuthorizationMissing(_))
    ));
    assert!(matches!(
        manage.delete_item(1).await,
        Err(AppError::AuthorizationMissing(_))
    ));
    assert!(matches!(
        manage.save_stock(None, &StockForm { quantity: 1, item_id: 1 }).await,
        Err(AppError::AuthorizationMissing(_))
    ));
    assert_eq!(api.call_count(), 0);
}
