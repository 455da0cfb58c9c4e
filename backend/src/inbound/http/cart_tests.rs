//! Tests for cart HTTP handlers.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::NewPart;
use crate::domain::ports::CatalogueRepository;
use crate::inbound::http::test_utils::{session_cookie, test_app};
use crate::test_support::{InMemoryStore, http_state_with};

async fn store_with_parts() -> (Arc<InMemoryStore>, i32, i32) {
    let store = Arc::new(InMemoryStore::default());
    let mut ids = Vec::new();
    for number in ["BAT-48", "LED-12"] {
        let part = store
            .create_part(&NewPart {
                part_number: number.to_owned(),
                name: number.to_owned(),
                description: None,
                category: None,
                price: None,
                supplier_id: None,
                compatible_brands: Vec::new(),
                compatible_models: Vec::new(),
                in_stock: true,
                image_url: None,
                specifications: None,
            })
            .await
            .expect("part");
        ids.push(part.id);
    }
    (store, ids[0], ids[1])
}

async fn add(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    cookie: Option<&Cookie<'static>>,
    body: Value,
) -> ServiceResponse {
    let mut req = test::TestRequest::post().uri("/api/cart").set_json(body);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie.clone());
    }
    test::call_service(app, req.to_request()).await
}

async fn list(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    cookie: &Cookie<'static>,
) -> Vec<Value> {
    test::call_and_read_body_json(
        app,
        test::TestRequest::get()
            .uri("/api/cart")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await
}

#[rstest]
#[actix_web::test]
async fn carts_are_isolated_per_session() {
    let (store, battery, lamp) = store_with_parts().await;
    let app = test::init_service(test_app(http_state_with(store))).await;

    let first = add(&app, None, json!({"partId": battery, "quantity": 2})).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let alice = session_cookie(&first);
    let alice_item: Value = test::read_body_json(first).await;
    assert_eq!(alice_item["quantity"], 2);

    let second = add(&app, None, json!({"partId": lamp})).await;
    assert_eq!(second.status(), StatusCode::CREATED);
    let bob = session_cookie(&second);
    let bob_item: Value = test::read_body_json(second).await;
    assert_eq!(bob_item["quantity"], 1);
    assert_ne!(alice_item["sessionId"], bob_item["sessionId"]);

    let alice_cart = list(&app, &alice).await;
    assert_eq!(alice_cart.len(), 1);
    assert_eq!(alice_cart[0]["partId"], battery);

    let bob_cart = list(&app, &bob).await;
    assert_eq!(bob_cart.len(), 1);
    assert_eq!(bob_cart[0]["partId"], lamp);
}

#[rstest]
#[actix_web::test]
async fn foreign_rows_cannot_be_changed_or_removed() {
    let (store, battery, lamp) = store_with_parts().await;
    let app = test::init_service(test_app(http_state_with(store))).await;

    let first = add(&app, None, json!({"partId": battery})).await;
    let alice = session_cookie(&first);
    let alice_item: Value = test::read_body_json(first).await;
    let bob = session_cookie(&add(&app, None, json!({"partId": lamp})).await);
    let uri = format!("/api/cart/{}", alice_item["id"]);

    let put = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&uri)
            .cookie(bob.clone())
            .set_json(json!({"quantity": 9}))
            .to_request(),
    )
    .await;
    assert_eq!(put.status(), StatusCode::NOT_FOUND);

    let delete = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&uri)
            .cookie(bob.clone())
            .to_request(),
    )
    .await;
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);

    let cookieless = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request())
        .await;
    assert_eq!(cookieless.status(), StatusCode::NOT_FOUND);

    let alice_cart = list(&app, &alice).await;
    assert_eq!(alice_cart, vec![alice_item]);
}

#[rstest]
#[actix_web::test]
async fn owners_can_update_remove_and_clear() {
    let (store, battery, lamp) = store_with_parts().await;
    let app = test::init_service(test_app(http_state_with(store))).await;

    let first = add(&app, None, json!({"partId": battery})).await;
    let alice = session_cookie(&first);
    let item: Value = test::read_body_json(first).await;
    add(&app, Some(&alice), json!({"partId": lamp, "quantity": 3})).await;

    let updated: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/cart/{}", item["id"]))
            .cookie(alice.clone())
            .set_json(json!({"quantity": 5}))
            .to_request(),
    )
    .await;
    assert_eq!(updated["quantity"], 5);

    let removed = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/cart/{}", item["id"]))
            .cookie(alice.clone())
            .to_request(),
    )
    .await;
    assert_eq!(removed.status(), StatusCode::NO_CONTENT);
    assert_eq!(list(&app, &alice).await.len(), 1);

    let cleared = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/cart")
            .cookie(alice.clone())
            .to_request(),
    )
    .await;
    assert_eq!(cleared.status(), StatusCode::NO_CONTENT);
    assert!(list(&app, &alice).await.is_empty());
}

#[rstest]
#[case(json!({"partId": 1, "quantity": 0}), "quantity")]
#[case(json!({"partId": 1, "quantity": -2}), "quantity")]
#[actix_web::test]
async fn quantities_below_one_are_rejected(#[case] body: Value, #[case] field: &str) {
    let (store, _, _) = store_with_parts().await;
    let app = test::init_service(test_app(http_state_with(store))).await;

    let res = add(&app, None, body).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], field);
}

#[rstest]
#[actix_web::test]
async fn unknown_parts_are_rejected() {
    let (store, _, _) = store_with_parts().await;
    let app = test::init_service(test_app(http_state_with(store))).await;

    let res = add(&app, None, json!({"partId": 4040})).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn new_visitors_see_an_empty_cart() {
    let (store, _, _) = store_with_parts().await;
    let app = test::init_service(test_app(http_state_with(store))).await;

    let items: Vec<Value> =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/cart").to_request())
            .await;

    assert!(items.is_empty());
}
