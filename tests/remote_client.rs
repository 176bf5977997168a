use axum::{Json, Router, http::StatusCode, routing::get, routing::post};
use serde_json::{Value, json};

use snkrs::{
    config::HttpTimeouts,
    core::{catalogue::CatalogueStore, wishlist::WishlistStore},
    persist::{sqlite::SqliteSlotStore, wishlist::WishlistAdapter},
    remote::{
        ContentApiClient, FetchError,
        register::{GENERIC_REGISTER_FAILURE, RegisterError, RegistrationForm},
    },
    runtime::handle::{RuntimeError, spawn_storefront},
    types::CatalogueStatus,
    view::ViewState,
};

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}/api")
}

fn client(base_url: &str) -> ContentApiClient {
    ContentApiClient::new(base_url, HttpTimeouts::default()).expect("client")
}

fn content_api() -> Router {
    Router::new()
        .route(
            "/api/Products/",
            get(|| async {
                Json(json!({
                    "data": [
                        {"id": 1, "Name": "Air Max", "Brand": "Nike", "description": "Runner",
                         "Price": 120000, "Image": {"url": "/uploads/air_max.png"}},
                        {"id": 2, "Name": "Stan Smith", "Brand": "Adidas", "description": "Tennis",
                         "Price": 80000}
                    ],
                    "meta": {}
                }))
            }),
        )
        .route("/api/auth/local/register", post(register_handler))
}

async fn register_handler(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"] == "taken@example.com" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": {"status": 400, "message": "Email or Username are already taken"}})),
        );
    }
    if body["username"] == "ghost" {
        return (StatusCode::OK, Json(json!({"user": {"id": 9}})));
    }
    (
        StatusCode::OK,
        Json(json!({"jwt": "token-123", "user": {"id": 7, "username": body["username"], "email": body["email"]}})),
    )
}

fn form(username: &str, email: &str) -> RegistrationForm {
    RegistrationForm {
        username: username.to_string(),
        email: email.to_string(),
        password: "s3cret!".to_string(),
        confirm_password: "s3cret!".to_string(),
    }
}

#[tokio::test]
async fn fetch_maps_wire_fields_in_response_order() {
    let base = serve(content_api()).await;
    let products = client(&base).fetch_catalogue().await.expect("fetch");

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, 1);
    assert_eq!(products[0].name, "Air Max");
    assert_eq!(products[0].brand, "Nike");
    assert_eq!(products[0].price_minor, 120_000);
    assert_eq!(products[0].image_path.as_deref(), Some("/uploads/air_max.png"));
    assert_eq!(products[1].id, 2);
    assert_eq!(products[1].image_path, None);
}

#[tokio::test]
async fn missing_data_array_is_an_empty_catalogue() {
    let app = Router::new().route("/api/Products/", get(|| async { Json(json!({"meta": {}})) }));
    let base = serve(app).await;
    assert!(client(&base).fetch_catalogue().await.expect("fetch").is_empty());
}

#[tokio::test]
async fn unusable_price_does_not_drop_the_catalogue() {
    let app = Router::new().route(
        "/api/Products/",
        get(|| async {
            Json(json!({"data": [
                {"id": 1, "Name": "Air Max", "Brand": "Nike", "Price": null},
                {"id": 2, "Name": "Stan Smith", "Brand": "Adidas", "Price": 80000}
            ]}))
        }),
    );
    let base = serve(app).await;

    let products = client(&base).fetch_catalogue().await.expect("fetch");
    let ids: Vec<u64> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(products[0].price_minor, 0);
    assert_eq!(products[1].price_minor, 80_000);
}

#[tokio::test]
async fn server_error_is_catalogue_unavailable() {
    let app = Router::new().route(
        "/api/Products/",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = serve(app).await;

    let err = client(&base).fetch_catalogue().await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 500 }));
    assert!(err.to_string().starts_with("catalogue unavailable"));
}

#[tokio::test]
async fn garbage_body_is_catalogue_unavailable() {
    let app = Router::new().route("/api/Products/", get(|| async { "<html>maintenance</html>" }));
    let base = serve(app).await;

    let err = client(&base).fetch_catalogue().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn refused_connection_is_catalogue_unavailable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = client(&format!("http://{addr}/api"))
        .fetch_catalogue()
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
async fn runtime_load_from_settles_ready_or_unavailable() {
    let base = serve(content_api()).await;
    let slots = SqliteSlotStore::open_in_memory().expect("sqlite");
    let handle = spawn_storefront(CatalogueStore::new(), WishlistStore::open(WishlistAdapter::new(slots)));

    assert_eq!(handle.load_from(&client(&base)).await.expect("load"), 2);
    handle.set_search_term("air").await.expect("search");
    let ids: Vec<u64> = handle
        .view()
        .await
        .expect("view")
        .products()
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![1]);
    assert!(matches!(
        handle.load_from(&client(&base)).await,
        Err(RuntimeError::AlreadySettled(CatalogueStatus::Ready))
    ));
    handle.shutdown().await.expect("shutdown");

    let failing = serve(Router::new().route(
        "/api/Products/",
        get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    ))
    .await;
    let slots = SqliteSlotStore::open_in_memory().expect("sqlite");
    let handle = spawn_storefront(CatalogueStore::new(), WishlistStore::open(WishlistAdapter::new(slots)));
    assert!(matches!(
        handle.load_from(&client(&failing)).await,
        Err(RuntimeError::Fetch(FetchError::Status { status: 503 }))
    ));
    assert_eq!(handle.view().await.expect("view"), ViewState::Unavailable);
    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn register_returns_session_on_token() {
    let base = serve(content_api()).await;
    let session = client(&base)
        .register(&form("sam", "sam@example.com"))
        .await
        .expect("register");
    assert_eq!(session.jwt, "token-123");
    assert_eq!(session.user_id, Some(7));
    assert_eq!(session.username.as_deref(), Some("sam"));
}

#[tokio::test]
async fn register_surfaces_server_message() {
    let base = serve(content_api()).await;
    let err = client(&base)
        .register(&form("sam", "taken@example.com"))
        .await
        .unwrap_err();
    match err {
        RegisterError::Rejected { message } => {
            assert_eq!(message, "Email or Username are already taken");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn register_without_token_is_not_a_session() {
    let base = serve(content_api()).await;
    let err = client(&base)
        .register(&form("ghost", "ghost@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RegisterError::MissingSession));
}

#[tokio::test]
async fn unreachable_register_endpoint_shows_generic_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = client(&format!("http://{addr}/api"))
        .register(&form("sam", "sam@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RegisterError::Transport(_)));
    assert_eq!(err.to_string(), GENERIC_REGISTER_FAILURE);
}

#[tokio::test]
async fn invalid_form_never_reaches_the_server() {
    // Nothing listens here; validation must fail first.
    let c = client("http://127.0.0.1:9/api");
    let mut mismatched = form("sam", "sam@example.com");
    mismatched.confirm_password = "other".to_string();

    assert!(matches!(
        c.register(&mismatched).await,
        Err(RegisterError::PasswordMismatch)
    ));
    assert!(matches!(
        c.register(&form("", "sam@example.com")).await,
        Err(RegisterError::MissingFields)
    ));
}
