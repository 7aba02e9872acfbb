use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Expense, Project};
use tower::ServiceExt;

const API_KEY: &str = "test-token";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header("api-key", API_KEY)
        .body(String::new())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("api-key", API_KEY)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_api_key_returns_401() {
    let app = app(API_KEY);
    let resp = app
        .oneshot(Request::builder().uri("/projects").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], b"invalid api key");
}

#[tokio::test]
async fn wrong_api_key_returns_401() {
    let app = app(API_KEY);
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/projects")
                .header("api-key", "other")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- list ---

#[tokio::test]
async fn list_projects_empty() {
    let app = app(API_KEY);
    let resp = app.oneshot(get_request("/projects")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let projects: Vec<Project> = body_json(resp).await;
    assert!(projects.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_project_returns_201_and_defaults_active() {
    let app = app(API_KEY);
    let resp = app
        .oneshot(json_request("POST", "/projects", r#"{"name":"Apollo"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let project: Project = body_json(resp).await;
    assert_eq!(project.name, "Apollo");
    assert!(project.active);
}

#[tokio::test]
async fn create_project_malformed_json_returns_422() {
    let app = app(API_KEY);
    let resp = app
        .oneshot(json_request("POST", "/projects", r#"{"not_name":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_project_not_found() {
    let app = app(API_KEY);
    let resp = app.oneshot(get_request("/projects/999")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_project_bad_id_returns_400() {
    let app = app(API_KEY);
    let resp = app.oneshot(get_request("/projects/not-a-number")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- full project lifecycle ---

#[tokio::test]
async fn project_lifecycle() {
    use tower::Service;

    let mut app = app(API_KEY).into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/projects", r#"{"name":"Apollo","customerId":9}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Project = body_json(resp).await;
    let id = created.id;

    // inactive sibling, filtered out below
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/projects", r#"{"name":"Mothballed","active":false}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // list with the active filter fragment
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/projects?$filter=active%20eq%20true"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let projects: Vec<Project> = body_json(resp).await;
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].id, id);

    // partial update
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PUT", &format!("/projects/{id}"), r#"{"name":"Artemis"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Project = body_json(resp).await;
    assert_eq!(updated.name, "Artemis");
    assert_eq!(updated.customer_id, Some(9)); // unchanged

    // delete — 204 with an empty body
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .method("DELETE")
                .uri(format!("/projects/{id}"))
                .header("api-key", API_KEY)
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let body = body_bytes(resp).await;
    assert!(body.is_empty());

    // get after delete — 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/projects/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- expenses ---

#[tokio::test]
async fn bulk_status_update_records_history() {
    use tower::Service;

    let mut app = app(API_KEY).into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/expenses", r#"{"userId":7,"date":"2024-03-01"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let expense: Expense = body_json(resp).await;
    assert_eq!(expense.status, "Open");
    let id = expense.id;

    let body = format!(r#"{{"message":"ok","ids":[{id}],"status":"Approved"}}"#);
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PUT", "/expenses/status", &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let result: serde_json::Value = body_json(resp).await;
    assert_eq!(result["updated"], 1);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/expenses/{id}/statusHistory")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let history: serde_json::Value = body_json(resp).await;
    assert_eq!(history[0]["status"], "Approved");
}

#[tokio::test]
async fn status_history_for_unknown_expense_returns_404() {
    let app = app(API_KEY);
    let resp = app
        .oneshot(get_request("/expenses/999/statusHistory"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
