use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;
use drape_app::cli::{fill_cart, read_cart_file};
use drape_app::session::{
    NoticeKind, BOOKING_FAILURE_MESSAGE, BOOKING_SUCCESS_NOTICE, ORDER_FAILURE_MESSAGE,
    ORDER_SUCCESS_NOTICE,
};
use drape_app::{AppState, StorefrontSession};
use drape_catalog::{Dimensions, Product};
use drape_core::{CoreError, FormState, PersistenceError, SubmissionState, ValidationError};
use drape_order::{AddOutcome, CartError, OrderComposer, PaymentMethod, MAX_LINE_QUANTITY};
use drape_store::app_config::StorefrontConfig;
use drape_store::{FailurePlan, MemoryStore, StoreWrite};

fn product(name: &str, price_per_sqm: f64) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: "Made to measure".to_string(),
        category: "manual".to_string(),
        base_price: price_per_sqm * 6.0,
        price_per_sqm,
        image_url: "https://img.example.com/curtain.jpg".to_string(),
        is_featured: true,
        is_bestseller: false,
        stock_status: "in_stock".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
}

fn setup(products: Vec<Product>) -> (Arc<MemoryStore>, StorefrontSession) {
    let store = Arc::new(MemoryStore::with_products(products));
    let state = AppState::in_memory(store.clone(), StorefrontConfig::default());
    (store, state.session())
}

fn fill_checkout(session: &mut StorefrontSession) {
    session.set_checkout_field("customer_name", "Aisha Khan").unwrap();
    session.set_checkout_field("customer_email", "aisha@example.com").unwrap();
    session.set_checkout_field("customer_phone", "+971 50 123 4567").unwrap();
    session.set_checkout_field("delivery_address", "Villa 12, Jumeirah 1, Dubai").unwrap();
}

fn fill_booking(session: &mut StorefrontSession, date: &str) {
    session.set_booking_field("customer_name", "Omar Haddad").unwrap();
    session.set_booking_field("customer_email", "omar@example.com").unwrap();
    session.set_booking_field("customer_phone", "+971 55 765 4321").unwrap();
    session.set_booking_field("customer_address", "Apt 804, Marina Gate, Dubai").unwrap();
    session.set_booking_field("preferred_date", date).unwrap();
    session.set_booking_field("preferred_time", "2:00 PM - 4:00 PM").unwrap();
}

#[tokio::test]
async fn test_adding_merges_and_opens_cart() {
    let blackout = product("Blackout Velvet", 75.0);
    let (_store, mut session) = setup(vec![blackout.clone()]);

    assert!(!session.is_cart_open());

    let first = session.add_to_cart(blackout.clone(), Dimensions::new(2.0, 3.0).unwrap(), 1).unwrap();
    assert_eq!(first, AddOutcome::Appended { index: 0 });
    assert!(session.is_cart_open());

    session.close_cart();
    let second = session.add_to_cart(blackout.clone(), Dimensions::new(2.0, 3.0).unwrap(), 2).unwrap();
    assert_eq!(second, AddOutcome::Merged { index: 0 });
    assert!(session.is_cart_open());

    let line = session.cart().line(0).unwrap();
    assert_eq!(line.quantity(), 3);
    assert!((line.price() - 450.0).abs() < 1e-9);

    session.add_to_cart(blackout, Dimensions::new(2.5, 3.0).unwrap(), 1).unwrap();
    assert_eq!(session.cart().len(), 2);
}

#[tokio::test]
async fn test_quantity_controls_stay_positive() {
    let sheer = product("Linen Sheer", 40.0);
    let (_store, mut session) = setup(vec![sheer.clone()]);
    session.add_to_cart(sheer, Dimensions::default(), 1).unwrap();

    session.decrement_quantity(0).unwrap();
    assert_eq!(session.cart().line(0).unwrap().quantity(), 1);

    session.increment_quantity(0).unwrap();
    session.increment_quantity(0).unwrap();
    assert_eq!(session.cart().line(0).unwrap().quantity(), 3);

    assert!(session.increment_quantity(4).is_err());

    session.remove_line(0).unwrap();
    assert!(session.cart().is_empty());
    assert_eq!(session.totals().total, 0.0);
}

#[tokio::test(start_paused = true)]
async fn test_order_success_clears_cart_and_notice_expires() {
    let blackout = product("Blackout Velvet", 75.0);
    let (store, mut session) = setup(vec![blackout.clone()]);

    session.add_to_cart(blackout, Dimensions::new(2.0, 3.0).unwrap(), 1).unwrap();
    session.open_checkout();
    assert!(!session.is_cart_open());
    fill_checkout(&mut session);
    session.set_checkout_field("payment_method", "card").unwrap();

    let placed = session.place_order().await.unwrap();

    assert!((placed.order.header.subtotal - 450.0).abs() < 1e-9);
    assert!((placed.order.header.tax - 22.5).abs() < 1e-9);
    assert!((placed.order.header.total - 472.5).abs() < 1e-9);
    assert_eq!(placed.order.header.payment_method, PaymentMethod::Card);
    assert!(placed.order.header.order_number.as_str().starts_with("ORD-"));
    assert_eq!(placed.lines.len(), 1);

    assert!(session.cart().is_empty());
    assert_eq!(session.checkout_submission().state(), &SubmissionState::Success);
    assert_eq!(session.checkout_form().field(drape_order::CheckoutField::CustomerName), "");

    let notice = session.current_notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::OrderPlaced);
    assert_eq!(notice.message, ORDER_SUCCESS_NOTICE);

    assert_eq!(
        store.journal(),
        vec![
            StoreWrite::Order { order_number: placed.order.header.order_number.to_string() },
            StoreWrite::OrderLines { count: 1 },
        ]
    );

    tokio::time::sleep(Duration::from_millis(2900)).await;
    assert!(session.current_notice().is_some());

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(session.current_notice().is_none());
}

#[tokio::test]
async fn test_items_added_during_checkout_stay_in_cart() {
    let blackout = product("Blackout Velvet", 75.0);
    let sheer = product("Linen Sheer", 40.0);
    let (store, mut session) = setup(vec![blackout.clone(), sheer.clone()]);
    let composer = OrderComposer::new(store.clone());

    session.add_to_cart(blackout.clone(), Dimensions::new(2.0, 3.0).unwrap(), 1).unwrap();
    fill_checkout(&mut session);
    let pending = session.begin_checkout().unwrap();

    // The customer keeps shopping while the order is written
    session.add_to_cart(sheer.clone(), Dimensions::new(1.5, 2.0).unwrap(), 2).unwrap();
    session.add_to_cart(blackout.clone(), Dimensions::new(2.0, 3.0).unwrap(), 1).unwrap();

    let result = pending.submit(&composer).await;
    let placed = session.finish_checkout(&pending, result).unwrap();

    assert_eq!(placed.lines.len(), 1);
    assert_eq!(placed.lines[0].quantity, 1);
    assert_eq!(store.order_lines().len(), 1);

    assert_eq!(session.cart().len(), 2);
    assert_eq!(session.cart().line(0).unwrap().product().id, blackout.id);
    assert_eq!(session.cart().line(0).unwrap().quantity(), 1);
    assert_eq!(session.cart().line(1).unwrap().product().id, sheer.id);
    assert_eq!(session.cart().item_count(), 3);
}

#[tokio::test]
async fn test_second_order_after_reopening_checkout() {
    let blackout = product("Blackout Velvet", 75.0);
    let sheer = product("Linen Sheer", 40.0);
    let (store, mut session) = setup(vec![blackout.clone(), sheer.clone()]);

    session.add_to_cart(blackout, Dimensions::new(2.0, 3.0).unwrap(), 1).unwrap();
    session.open_checkout();
    fill_checkout(&mut session);
    let first = session.place_order().await.unwrap();
    assert_eq!(session.checkout_submission().state(), &SubmissionState::Success);

    session.add_to_cart(sheer, Dimensions::new(1.5, 2.0).unwrap(), 2).unwrap();
    session.open_checkout();
    assert_eq!(session.checkout_submission().state(), &SubmissionState::Idle);

    fill_checkout(&mut session);
    let second = session.place_order().await.unwrap();

    assert_ne!(first.order.header.order_number, second.order.header.order_number);
    assert_eq!(second.lines.len(), 1);
    assert_eq!(second.lines[0].quantity, 2);
    assert_eq!(store.orders().len(), 2);
    assert_eq!(store.order_lines().len(), 2);
    assert!(session.cart().is_empty());
}

#[tokio::test]
async fn test_header_failure_writes_no_lines_and_keeps_form() {
    let blackout = product("Blackout Velvet", 75.0);
    let (store, mut session) = setup(vec![blackout.clone()]);
    store.set_failures(FailurePlan { orders: true, ..FailurePlan::default() });

    session.add_to_cart(blackout, Dimensions::new(2.0, 3.0).unwrap(), 2).unwrap();
    fill_checkout(&mut session);

    let result = session.place_order().await;

    assert!(matches!(result, Err(CoreError::Persistence(_))));
    assert!(store.journal().is_empty());
    assert!(store.order_lines().is_empty());

    assert_eq!(session.checkout_submission().error_message(), Some(ORDER_FAILURE_MESSAGE));
    assert_eq!(session.cart().len(), 1);
    assert!(session.checkout_form().validate().is_ok());
    assert!(session.current_notice().is_none());

    // Resubmitting after the store recovers goes through
    store.set_failures(FailurePlan::default());
    session.place_order().await.unwrap();
    assert_eq!(store.orders().len(), 1);
}

#[tokio::test]
async fn test_line_failure_leaves_partial_order() {
    let blackout = product("Blackout Velvet", 75.0);
    let (store, mut session) = setup(vec![blackout.clone()]);
    store.set_failures(FailurePlan { order_lines: true, ..FailurePlan::default() });

    session.add_to_cart(blackout, Dimensions::new(2.0, 3.0).unwrap(), 1).unwrap();
    fill_checkout(&mut session);

    assert!(session.place_order().await.is_err());

    assert_eq!(store.orders().len(), 1);
    assert!(store.order_lines().is_empty());
    assert_eq!(session.cart().len(), 1);
}

#[tokio::test]
async fn test_checkout_rejects_duplicate_begin() {
    let blackout = product("Blackout Velvet", 75.0);
    let (_store, mut session) = setup(vec![blackout.clone()]);
    session.add_to_cart(blackout, Dimensions::default(), 1).unwrap();
    fill_checkout(&mut session);

    let pending = session.begin_checkout().unwrap();
    assert_eq!(pending.cart.len(), 1);
    assert!(session.checkout_submission().is_submitting());

    let second = session.begin_checkout();
    assert!(matches!(second, Err(CoreError::InvalidTransition { .. })));

    let failed = session.finish_checkout(&pending, Err(PersistenceError::new("timeout").into()));
    assert!(failed.is_err());
    assert!(session.begin_checkout().is_ok());
}

#[tokio::test]
async fn test_checkout_validation() {
    let (_store, mut session) = setup(Vec::new());
    fill_checkout(&mut session);

    assert_eq!(
        session.begin_checkout().unwrap_err(),
        CoreError::Validation(ValidationError::EmptyCart)
    );

    assert_eq!(
        session.set_checkout_field("coupon", "SAVE10"),
        Err(ValidationError::UnknownField("coupon".to_string()))
    );
    assert_eq!(session.checkout_submission().state(), &SubmissionState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_booking_success_and_notice() {
    let (store, mut session) = setup(Vec::new());
    fill_booking(&mut session, "2025-06-10");
    session.set_booking_field("notes", "Living room, two windows").unwrap();

    session.book_consultation(today()).await.unwrap();

    let appointments = store.appointments();
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].notes.as_deref(), Some("Living room, two windows"));
    assert_eq!(session.booking_submission().state(), &SubmissionState::Success);
    assert_eq!(session.current_notice().unwrap().message, BOOKING_SUCCESS_NOTICE);
    assert!(session.booking_form().validate(today()).is_err());

    tokio::time::sleep(Duration::from_millis(2100)).await;
    assert!(session.current_notice().is_none());

    session.open_booking();
    assert_eq!(session.booking_submission().state(), &SubmissionState::Idle);
}

#[tokio::test]
async fn test_booking_failure_keeps_form() {
    let (store, mut session) = setup(Vec::new());
    store.set_failures(FailurePlan { appointments: true, ..FailurePlan::default() });
    fill_booking(&mut session, "2025-06-12");

    assert!(session.book_consultation(today()).await.is_err());

    assert_eq!(session.booking_submission().error_message(), Some(BOOKING_FAILURE_MESSAGE));
    assert!(session.booking_form().validate(today()).is_ok());
    assert!(store.appointments().is_empty());
}

#[tokio::test]
async fn test_booking_rejects_past_date_and_unknown_slot() {
    let (store, mut session) = setup(Vec::new());
    fill_booking(&mut session, "2025-06-09");

    let err = session.book_consultation(today()).await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::Malformed { field: "preferred_date", .. })
    ));

    session.set_booking_field("preferred_date", "2025-06-11").unwrap();
    session.set_booking_field("preferred_time", "10:00 PM - 11:00 PM").unwrap();
    let err = session.book_consultation(today()).await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::Malformed { field: "preferred_time", .. })
    ));

    assert_eq!(session.booking_submission().state(), &SubmissionState::Idle);
    assert!(store.journal().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_navigate_away_cancels_notice() {
    let (_store, mut session) = setup(Vec::new());
    fill_booking(&mut session, "2025-06-10");
    session.book_consultation(today()).await.unwrap();
    assert!(session.current_notice().is_some());

    session.navigate_away();
    assert!(session.current_notice().is_none());

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(session.current_notice().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_newer_notice_outlives_replaced_timer() {
    let blackout = product("Blackout Velvet", 75.0);
    let (_store, mut session) = setup(vec![blackout.clone()]);

    session.add_to_cart(blackout, Dimensions::default(), 1).unwrap();
    fill_checkout(&mut session);
    session.place_order().await.unwrap();

    tokio::time::sleep(Duration::from_millis(1500)).await;
    fill_booking(&mut session, "2025-06-10");
    session.book_consultation(today()).await.unwrap();

    // The order notice would have expired at 3 s
    tokio::time::sleep(Duration::from_millis(1600)).await;
    assert_eq!(session.current_notice().unwrap().kind, NoticeKind::AppointmentBooked);

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(session.current_notice().is_none());
}

#[tokio::test]
async fn test_cart_file_resolves_against_catalog() {
    let blackout = product("Blackout Velvet", 75.0);
    let sheer = product("Linen Sheer", 40.0);
    let (_store, mut session) = setup(vec![blackout.clone(), sheer.clone()]);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"product_id": "{}", "width": 2.0, "height": 3.0}},
            {{"product_id": "{}", "width": 1.5, "height": 2.4, "quantity": 2}},
            {{"product_id": "{}", "width": 2.0, "height": 3.0, "quantity": 1}}
        ]"#,
        blackout.id, sheer.id, blackout.id
    )
    .unwrap();

    let entries = read_cart_file(file.path()).unwrap();
    fill_cart(&mut session, &[blackout.clone(), sheer.clone()], &entries).unwrap();

    assert_eq!(session.cart().len(), 2);
    assert_eq!(session.cart().line(0).unwrap().quantity(), 2);
    assert_eq!(session.cart().item_count(), 4);

    let unknown = vec![drape_app::cli::CartEntry {
        product_id: Uuid::new_v4(),
        width: 2.0,
        height: 3.0,
        quantity: 1,
    }];
    assert!(fill_cart(&mut session, &[blackout, sheer], &unknown).is_err());
}

#[tokio::test]
async fn test_cart_file_rejects_oversized_quantity() {
    let blackout = product("Blackout Velvet", 75.0);
    let (_store, mut session) = setup(vec![blackout.clone()]);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"product_id": "{id}", "width": 2.0, "height": 3.0, "quantity": 4000000000}},
            {{"product_id": "{id}", "width": 2.0, "height": 3.0, "quantity": 4000000000}}
        ]"#,
        id = blackout.id
    )
    .unwrap();

    let entries = read_cart_file(file.path()).unwrap();
    let err = fill_cart(&mut session, &[blackout.clone()], &entries).unwrap_err();
    assert_eq!(
        err.downcast_ref::<CartError>(),
        Some(&CartError::QuantityTooLarge { max: MAX_LINE_QUANTITY })
    );
    assert!(session.cart().is_empty());

    // Two entries that only overflow once merged
    session.add_to_cart(blackout.clone(), Dimensions::new(2.0, 3.0).unwrap(), 600).unwrap();
    let merged = session.add_to_cart(blackout, Dimensions::new(2.0, 3.0).unwrap(), 600);
    assert!(matches!(merged, Err(CartError::QuantityTooLarge { .. })));
    assert_eq!(session.cart().item_count(), 600);
}
