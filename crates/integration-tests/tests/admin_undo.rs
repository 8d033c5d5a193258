//! Integration tests for the admin action log and undo.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use boostmart_admin::AdminError;
use boostmart_admin::config::AdminConfig;
use boostmart_admin::services::{AdminAuth, AdminConsole};
use boostmart_core::{AdminAction, DeviceType, OrderStatus, PaymentStatus, ServiceId};
use boostmart_integration_tests::{TEST_ADMIN, balance, fund, signed_in_store};
use boostmart_storefront::db::{OrderRepository, PaymentRepository};
use boostmart_storefront::services::{CheckoutService, OrderRequest};

#[tokio::test]
async fn test_log_is_newest_first_and_attributed() {
    let (store, _) = signed_in_store().await.unwrap();
    let config = AdminConfig::default();
    let session = AdminAuth::new(&store, &config)
        .login("admin", "Arya123@")
        .await
        .unwrap();

    let console = AdminConsole::new(&store, session.username);
    let payment = fund(&store, Decimal::new(20, 0)).await.unwrap();
    console
        .update_payment_status(&payment.id, PaymentStatus::Rejected)
        .await
        .unwrap();

    let actions: Vec<_> = console
        .logs()
        .await
        .unwrap()
        .into_iter()
        .map(|log| log.action)
        .collect();
    assert_eq!(
        actions,
        vec![
            AdminAction::UpdatePaymentStatus,
            AdminAction::UpdatePaymentStatus,
            AdminAction::Login,
        ]
    );
}

#[tokio::test]
async fn test_undo_completed_order_returns_to_running() {
    let (store, _) = signed_in_store().await.unwrap();
    fund(&store, Decimal::new(1_000, 0)).await.unwrap();
    let order = CheckoutService::new(&store)
        .place_order(OrderRequest {
            service_id: ServiceId::new("service-4"),
            quantity: 1_000,
            device_type: DeviceType::Desktop,
            target_option: None,
            link: "https://example.com".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(order.price, Decimal::new(800, 0));

    let console = AdminConsole::new(&store, TEST_ADMIN);
    console
        .update_order_status(&order.id, OrderStatus::Running)
        .await
        .unwrap();
    console
        .update_order_status(&order.id, OrderStatus::Completed)
        .await
        .unwrap();

    let latest = console.logs().await.unwrap().remove(0);
    let undo = console.undo(&latest.id).await.unwrap();
    assert_eq!(undo.action, AdminAction::Undo);

    let order = OrderRepository::new(&store).get(&order.id).await.unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Running);

    let err = console.undo(&latest.id).await.unwrap_err();
    assert!(matches!(err, AdminError::CannotUndo(_)));

    let err = console.undo(&undo.id).await.unwrap_err();
    assert!(matches!(err, AdminError::CannotUndo(_)));
}

#[tokio::test]
async fn test_undo_approval_reverts_status_but_keeps_credit() {
    let (store, _) = signed_in_store().await.unwrap();
    let payment = fund(&store, Decimal::new(40, 0)).await.unwrap();
    let console = AdminConsole::new(&store, TEST_ADMIN);

    let approval = console.logs().await.unwrap().remove(0);
    assert_eq!(approval.payment_id.as_ref(), Some(&payment.id));
    console.undo(&approval.id).await.unwrap();

    let payment = PaymentRepository::new(&store)
        .get(&payment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(payment.status, PaymentStatus::Pending);
    assert_eq!(balance(&store).await.unwrap(), Decimal::new(40, 0));
}

#[tokio::test]
async fn test_service_changes_cannot_be_undone() {
    let store = boostmart_storefront::store::MemoryStore::new();
    let console = AdminConsole::new(&store, TEST_ADMIN);

    console
        .delete_service(&ServiceId::new("service-6"))
        .await
        .unwrap();
    let deleted = console.logs().await.unwrap().remove(0);
    assert_eq!(deleted.action, AdminAction::DeleteService);

    let err = console.undo(&deleted.id).await.unwrap_err();
    assert!(matches!(err, AdminError::CannotUndo(_)));
    assert_eq!(console.list_services().await.unwrap().len(), 5);
}
