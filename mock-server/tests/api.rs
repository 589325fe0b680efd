use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, PAGE_SIZE};
use serde_json::Value;
use tower::ServiceExt;

const TOKEN: &str = "dGVzdDp0ZXN0";

async fn body_json(response: axum::response::Response) -> Value {
    let bytes: bytes::Bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn users_request(query: &str) -> Request<String> {
    Request::builder()
        .uri(format!("/wp-json/users{query}"))
        .header(http::header::AUTHORIZATION, format!("Basic {TOKEN}"))
        .body(String::new())
        .unwrap()
}

fn header(resp: &axum::response::Response, name: &str) -> String {
    resp.headers()[name].to_str().unwrap().to_string()
}

// --- auth ---

#[tokio::test]
async fn missing_auth_returns_401() {
    let resp = app(TOKEN)
        .oneshot(Request::builder().uri("/wp-json/users").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["code"], "rest_not_logged_in");
    assert_eq!(body["data"]["status"], 401);
}

#[tokio::test]
async fn wrong_token_returns_401() {
    let resp = app("another-token").oneshot(users_request("")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- list ---

#[tokio::test]
async fn first_page_defaults_to_view_context() {
    let resp = app(TOKEN).oneshot(users_request("")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(header(&resp, "content-type").contains("application/json"));
    assert_eq!(header(&resp, "x-wp-total"), "12");
    assert_eq!(header(&resp, "x-wp-totalpages"), "2");

    let users = body_json(resp).await;
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), PAGE_SIZE);
    assert_eq!(users[0]["slug"], "ada-admin");
    assert!(users[0].get("email").is_none());
}

#[tokio::test]
async fn second_page_holds_the_rest() {
    let resp = app(TOKEN).oneshot(users_request("?page=2")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let users = body_json(resp).await;
    assert_eq!(users.as_array().unwrap().len(), 2);
    assert_eq!(users[0]["id"], 11);
}

#[tokio::test]
async fn role_filter_and_edit_context() {
    let resp = app(TOKEN)
        .oneshot(users_request("?filter%5Brole%5D=editor&context=edit&page=1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header(&resp, "x-wp-total"), "2");
    let users = body_json(resp).await;
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 2);
    for user in users {
        assert_eq!(user["roles"], serde_json::json!(["editor"]));
        assert!(user["email"].as_str().unwrap().ends_with("@example.com"));
    }
}

#[tokio::test]
async fn search_filter_matches_name() {
    let resp = app(TOKEN)
        .oneshot(users_request("?filter%5Bsearch%5D=author"))
        .await
        .unwrap();

    let users = body_json(resp).await;
    assert_eq!(users.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn empty_filter_result_is_empty_array() {
    let resp = app(TOKEN)
        .oneshot(users_request("?filter%5Brole%5D=contributor"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header(&resp, "x-wp-totalpages"), "0");
    assert_eq!(body_json(resp).await, serde_json::json!([]));
}

// --- invalid params ---

#[tokio::test]
async fn unknown_context_returns_400() {
    let resp = app(TOKEN).oneshot(users_request("?context=admin")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["code"], "rest_invalid_param");
}

#[tokio::test]
async fn page_zero_returns_400() {
    let resp = app(TOKEN).oneshot(users_request("?page=0")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["code"], "rest_invalid_param");
}

#[tokio::test]
async fn page_past_the_end_returns_400() {
    let resp = app(TOKEN).oneshot(users_request("?page=3")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["code"], "rest_user_invalid_page_number");
    assert_eq!(body["data"]["status"], 400);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let resp = app(TOKEN)
        .oneshot(Request::builder().uri("/wp-json/posts").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
