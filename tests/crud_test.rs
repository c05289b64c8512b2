//! CRUD, referential-guard and normalization integration tests

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use serial_test::serial;
use StudioLedger::config::Settings;
use StudioLedger::database::DatabaseService;
use StudioLedger::models::{CreateClientRequest, CreateGroupRequest, OrderStatus, Sex, UpdateServiceRequest};
use StudioLedger::services::ServiceFactory;
use StudioLedger::StudioLedgerError;

async fn setup() -> (TestDatabase, DatabaseService, ServiceFactory) {
    let db = TestDatabase::new().await;
    let database = DatabaseService::new(db.pool.clone());
    let services = ServiceFactory::new(db.pool.clone(), Settings::default());
    (db, database, services)
}

#[tokio::test]
#[serial]
async fn test_group_delete_guard() {
    let (_db, database, _services) = setup().await;

    let group = database.groups.create(CreateGroupRequest { name: "Vocalists".to_string() }).await.unwrap();
    let mut request = client_request("Petrov");
    request.group_id = Some(group.id);
    database.clients.create(request).await.unwrap();

    // Referenced group cannot be deleted
    assert_matches!(
        database.groups.delete(group.id).await,
        Err(StudioLedgerError::GroupInUse { client_count: 1, .. })
    );

    // An unreferenced group can
    let empty = database.groups.create(CreateGroupRequest { name: "Bands".to_string() }).await.unwrap();
    database.groups.delete(empty.id).await.unwrap();
    assert!(database.groups.find_by_id(empty.id).await.unwrap().is_none());
}

#[tokio::test]
#[serial]
async fn test_duplicate_group_name_is_rejected() {
    let (_db, database, _services) = setup().await;

    database.groups.create(CreateGroupRequest { name: "Vocalists".to_string() }).await.unwrap();
    let result = database.groups.create(CreateGroupRequest { name: "Vocalists".to_string() }).await;
    assert_matches!(result, Err(StudioLedgerError::Database(_)));
}

#[tokio::test]
#[serial]
async fn test_initialize_group_is_idempotent() {
    let (_db, database, _services) = setup().await;

    let first = database.initialize_group("Vocalists".to_string()).await.unwrap();
    let second = database.initialize_group("Vocalists".to_string()).await.unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(database.groups.count().await.unwrap(), 1);
}

#[tokio::test]
#[serial]
async fn test_catalog_is_decoupled_from_recorded_items() {
    let (_db, database, services) = setup().await;
    let ledger = &services.ledger_service;

    let entry = database.catalog.create(service_request("Mixing", 2000)).await.unwrap();

    let client = database.clients.create(random_client_request()).await.unwrap();
    let order = database.create_order(client.id, date(2024, 9, 1), None).await.unwrap();

    let mut request = item_request(order.id, 2500, date(2024, 9, 2), 2.0);
    request.service_name = "Mixing".to_string();
    let item = ledger.add_item(request).await.unwrap();

    // Renaming the catalog entry leaves the recorded line item untouched
    database.catalog.update(entry.id, UpdateServiceRequest {
        name: Some("Mixing & Mastering".to_string()),
        ..Default::default()
    }).await.unwrap();

    let item = database.order_items.find_by_id(item.id).await.unwrap().unwrap();
    assert_eq!(item.service_name, "Mixing");

    // So does deleting it
    database.catalog.delete(entry.id).await.unwrap();
    let item = database.order_items.find_by_id(item.id).await.unwrap().unwrap();
    assert_eq!(item.service_name, "Mixing");

    // The advisory floor is not enforced against amounts
    let cheap = ledger.add_item(item_request(order.id, 1, date(2024, 9, 3), 0.25)).await.unwrap();
    assert_eq!(cheap.amount, 1);
}

#[tokio::test]
#[serial]
async fn test_client_registration_normalizes_contacts() {
    let (_db, _database, services) = setup().await;
    let clients = &services.client_service;

    let client = clients.register_client(CreateClientRequest {
        name: "  Ivanov Ivan  ".to_string(),
        sex: Sex::Male,
        phone: Some("8 (999) 123-45-67".to_string()),
        vk_id: Some("https://vk.com/id123456".to_string()),
        tg_id: Some("@ivanov_studio".to_string()),
        group_id: None,
    }).await.unwrap();

    assert_eq!(client.name, "Ivanov Ivan");
    assert_eq!(client.phone.as_deref(), Some("79991234567"));
    assert_eq!(client.vk_id.as_deref(), Some("123456"));
    assert_eq!(client.tg_id.as_deref(), Some("ivanov_studio"));

    let links = clients.contact_links(&client);
    assert_eq!(links["phone_display"], "+7 999 123-45-67");
    assert_eq!(links["phone_link"], "tel:+79991234567");
    assert_eq!(links["vk_url"], "https://vk.com/id123456");
    assert_eq!(links["tg_url"], "https://t.me/ivanov_studio");
}

#[tokio::test]
#[serial]
async fn test_client_registration_rejects_malformed_phone() {
    let (_db, database, services) = setup().await;

    let mut request = client_request("Sidorov");
    request.phone = Some("12345".to_string());

    assert_matches!(
        services.client_service.register_client(request).await,
        Err(StudioLedgerError::InvalidContact { ref field, .. }) if field == "phone"
    );
    assert_eq!(database.clients.count().await.unwrap(), 0);
}

#[tokio::test]
#[serial]
async fn test_client_delete_cascades_orders_and_items() {
    let (_db, database, services) = setup().await;
    let ledger = &services.ledger_service;

    let client = database.clients.create(random_client_request()).await.unwrap();
    let order = database.create_order(client.id, date(2024, 10, 1), None).await.unwrap();
    ledger.add_item(item_request(order.id, 700, date(2024, 10, 2), 1.0)).await.unwrap();

    services.client_service.delete_client(client.id).await.unwrap();

    assert!(database.clients.find_by_id(client.id).await.unwrap().is_none());
    assert!(database.orders.find_by_id(order.id).await.unwrap().is_none());
    assert!(database.order_items.list_by_order(order.id).await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn test_order_status_round_trip() {
    let (_db, database, _services) = setup().await;

    let client = database.clients.create(random_client_request()).await.unwrap();
    let order = database.create_order(client.id, date(2024, 11, 1), None).await.unwrap();
    assert_eq!(order.status, OrderStatus::InProgress);

    let order = database.orders.set_status(order.id, OrderStatus::AwaitingPayment).await.unwrap();
    assert_eq!(order.status, OrderStatus::AwaitingPayment);

    let awaiting = database.orders.list_by_status(OrderStatus::AwaitingPayment).await.unwrap();
    assert_eq!(awaiting.len(), 1);
    assert_eq!(awaiting[0].id, order.id);
}

#[tokio::test]
#[serial]
async fn test_create_order_for_missing_client_is_rejected() {
    let (_db, database, _services) = setup().await;

    assert_matches!(
        database.create_order(4242, date(2024, 1, 1), None).await,
        Err(StudioLedgerError::ClientNotFound { client_id: 4242 })
    );
}

#[tokio::test]
#[serial]
async fn test_client_search_and_pagination_guards() {
    let (_db, database, services) = setup().await;
    let clients = &services.client_service;

    database.clients.create(client_request("Ivanov")).await.unwrap();
    database.clients.create(client_request("Ivanova")).await.unwrap();
    database.clients.create(client_request("Petrov")).await.unwrap();

    let found = clients.search_clients("Ivan").await.unwrap();
    assert_eq!(found.len(), 2);

    assert_matches!(
        clients.search_clients("I").await,
        Err(StudioLedgerError::InvalidInput(_))
    );
    assert_matches!(
        clients.list_clients(1000, 0).await,
        Err(StudioLedgerError::InvalidInput(_))
    );

    let page = clients.list_clients(2, 0).await.unwrap();
    assert_eq!(page.len(), 2);
}

#[tokio::test]
#[serial]
async fn test_reports_aggregate_recorded_items() {
    let (_db, database, services) = setup().await;
    let ledger = &services.ledger_service;

    let ivanov = database.clients.create(client_request("Ivanov")).await.unwrap();
    let petrov = database.clients.create(client_request("Petrov")).await.unwrap();

    let first = database.create_order(ivanov.id, date(2024, 1, 10), None).await.unwrap();
    let second = database.create_order(petrov.id, date(2024, 2, 15), None).await.unwrap();
    database.orders.set_status(second.id, OrderStatus::Paid).await.unwrap();

    ledger.add_item(item_request(first.id, 5000, date(2024, 1, 12), 1.5)).await.unwrap();
    ledger.add_item(item_request(first.id, 3000, date(2024, 1, 20), 1.0)).await.unwrap();
    ledger.add_item(item_request(second.id, 2000, date(2024, 2, 16), 2.0)).await.unwrap();

    let monthly = services.report_service.revenue_by_month().await.unwrap();
    assert_eq!(monthly.len(), 2);
    // Most recent month first
    assert_eq!(monthly[0].month, "2024-02");
    assert_eq!(monthly[0].total_amount, 2000);
    assert_eq!(monthly[1].month, "2024-01");
    assert_eq!(monthly[1].total_amount, 8000);
    assert_eq!(monthly[1].item_count, 2);

    let by_client = services.report_service.revenue_by_client(10).await.unwrap();
    assert_eq!(by_client[0].client_name, "Ivanov");
    assert_eq!(by_client[0].total_amount, 8000);
    assert_eq!(by_client[1].client_name, "Petrov");
    assert_eq!(by_client[1].total_amount, 2000);

    let usage = services.report_service.service_usage().await.unwrap();
    assert_eq!(usage.len(), 1);
    assert_eq!(usage[0].service_name, "Recording session");
    assert_eq!(usage[0].total_amount, 10000);
    assert!((usage[0].total_hours - 4.5).abs() < f64::EPSILON);

    let by_status = services.report_service.orders_by_status().await.unwrap();
    assert_eq!(by_status.len(), 2);
    let in_progress = by_status.iter().find(|s| s.status == OrderStatus::InProgress).unwrap();
    assert_eq!(in_progress.order_count, 1);
}

#[tokio::test]
#[serial]
async fn test_system_stats_and_client_statistics() {
    let (_db, database, services) = setup().await;

    let group = database.initialize_group("Vocalists".to_string()).await.unwrap();
    let mut grouped = client_request("Ivanov");
    grouped.group_id = Some(group.id);
    database.clients.create(grouped).await.unwrap();
    database.clients.create(client_request("Petrov")).await.unwrap();

    let stats = services.client_service.get_client_statistics().await.unwrap();
    assert_eq!(stats["total_clients"], 2);
    assert_eq!(stats["grouped_clients"], 1);
    assert_eq!(stats["ungrouped_clients"], 1);

    let system = database.get_system_stats().await.unwrap();
    assert_eq!(system["groups"], 1);
    assert_eq!(system["clients"], 2);
}
