mod common;

use dc_registry::error::ErrorBody;
use dc_registry::models::DataCenter;
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{TestApp, data_center, spawn_app};

async fn register(app: &TestApp, center_id: &str, country: &str, center_type: &str) -> DataCenter {
    let response = app
        .create(&data_center(center_id, country, center_type), None)
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
async fn create_returns_201_and_record_is_retrievable() {
    let app = spawn_app().await;

    let created = register(&app, "DCC", "CA", "PROCESSOR").await;
    assert_eq!(created.fields.center_id, "DCC");
    assert_eq!(created.fields.song_url.as_deref(), Some("https://song.example.org"));

    let response = app
        .client
        .get(app.url(&format!("/data-centers/{}", created.id)))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let fetched: DataCenter = response.json().await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn duplicate_center_id_is_a_conflict() {
    let app = spawn_app().await;
    register(&app, "DCC", "CA", "PROCESSOR").await;

    let response = app
        .create(&data_center("DCC", "US", "SUBMITTER"), None)
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "StateConflict");
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn invalid_payloads_are_bad_requests() {
    let app = spawn_app().await;

    let mut bad_country = data_center("DCC", "CA", "PROCESSOR");
    bad_country["country"] = json!("Canada");
    let response = app.create(&bad_country, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "InvalidArgument");
    assert!(body.message.contains("country"));

    let response = app.create(&json!({"centerId": "DCC"}), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .client
        .post(app.url("/data-centers"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "InvalidArgument");

    assert!(app.store.is_empty());
}

#[tokio::test]
async fn malformed_id_is_reported_as_not_found() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/data-centers/not-a-uuid"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Not found");
    assert_eq!(body.message, "Id not found");
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let app = spawn_app().await;
    let id = Uuid::new_v4();

    let response = app
        .client
        .get(app.url(&format!("/data-centers/{id}")))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Not found");
    assert_eq!(body.message, format!("data center {id} not found"));
}

#[tokio::test]
async fn listing_without_filters_returns_everything() {
    let app = spawn_app().await;
    register(&app, "UK1", "GB", "SUBMITTER").await;
    register(&app, "CA1", "CA", "PROCESSOR").await;

    let response = app.client.get(app.url("/data-centers")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let records: Vec<DataCenter> = response.json().await.unwrap();
    let ids: Vec<&str> = records.iter().map(DataCenter::center_id).collect();
    assert_eq!(ids, vec!["CA1", "UK1"]);
}

#[tokio::test]
async fn listing_on_empty_registry_is_an_empty_array() {
    let app = spawn_app().await;

    let response = app.client.get(app.url("/data-centers")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.json::<serde_json::Value>().await.unwrap(), json!([]));
}

#[tokio::test]
async fn listing_applies_comma_separated_filters() {
    let app = spawn_app().await;
    register(&app, "CA1", "CA", "PROCESSOR").await;
    register(&app, "US1", "US", "SUBMITTER").await;
    register(&app, "UK1", "GB", "SUBMITTER").await;

    let response = app
        .client
        .get(app.url("/data-centers?country=CA,US"))
        .send()
        .await
        .unwrap();
    let records: Vec<DataCenter> = response.json().await.unwrap();
    let ids: Vec<&str> = records.iter().map(DataCenter::center_id).collect();
    assert_eq!(ids, vec!["CA1", "US1"]);

    let response = app
        .client
        .get(app.url("/data-centers?country=CA,US&type=SUBMITTER"))
        .send()
        .await
        .unwrap();
    let records: Vec<DataCenter> = response.json().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].center_id(), "US1");

    let response = app
        .client
        .get(app.url("/data-centers?centerId=UK1&name=UK1%20Data%20Center"))
        .send()
        .await
        .unwrap();
    let records: Vec<DataCenter> = response.json().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].center_id(), "UK1");
}

#[tokio::test]
async fn advanced_search_matches_contained_documents() {
    let app = spawn_app().await;
    register(&app, "CA1", "CA", "PROCESSOR").await;
    register(&app, "CA2", "CA", "SUBMITTER").await;
    register(&app, "US1", "US", "SUBMITTER").await;

    let response = app
        .client
        .post(app.url("/data-centers/search"))
        .json(&json!({"country": "CA"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let records: Vec<DataCenter> = response.json().await.unwrap();
    let ids: Vec<&str> = records.iter().map(DataCenter::center_id).collect();
    assert_eq!(ids, vec!["CA1", "CA2"]);

    let response = app
        .client
        .post(app.url("/data-centers/search"))
        .json(&json!({"country": "CA", "type": "SUBMITTER"}))
        .send()
        .await
        .unwrap();
    let records: Vec<DataCenter> = response.json().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].center_id(), "CA2");
}

#[tokio::test]
async fn advanced_search_requires_an_object() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/data-centers/search"))
        .json(&json!(["CA"]))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "InvalidArgument");
}

#[tokio::test]
async fn update_replaces_the_record() {
    let app = spawn_app().await;
    let created = register(&app, "DCC", "CA", "PROCESSOR").await;

    let mut payload = data_center("DCC", "US", "SUBMITTER");
    payload["id"] = json!(created.id);
    let response = app
        .client
        .put(app.url("/data-centers"))
        .json(&payload)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated: DataCenter = response.json().await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.fields.country, "US");
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn update_of_unknown_record_is_not_found() {
    let app = spawn_app().await;

    let mut payload = data_center("DCC", "CA", "PROCESSOR");
    payload["id"] = json!(Uuid::new_v4());
    let response = app
        .client
        .put(app.url("/data-centers"))
        .json(&payload)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Not found");
}

#[tokio::test]
async fn update_without_id_is_a_bad_request() {
    let app = spawn_app().await;

    let response = app
        .client
        .put(app.url("/data-centers"))
        .json(&data_center("DCC", "CA", "PROCESSOR"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_returns_204_with_empty_body() {
    let app = spawn_app().await;
    let created = register(&app, "DCC", "CA", "PROCESSOR").await;

    let response = app
        .client
        .delete(app.url(&format!("/data-centers/{}", created.id)))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.bytes().await.unwrap().is_empty());
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn delete_of_missing_record_is_not_found_with_original_message() {
    let app = spawn_app().await;
    let id = Uuid::new_v4();

    let response = app
        .client
        .delete(app.url(&format!("/data-centers/{id}")))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Not found");
    assert_eq!(body.message, format!("data center {id} not found"));
}

#[tokio::test]
async fn delete_with_malformed_id_is_not_found() {
    let app = spawn_app().await;

    let response = app
        .client
        .delete(app.url("/data-centers/XYZ"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.message, "Id not found");
}

#[tokio::test]
async fn undecodable_id_is_not_found_with_error_body() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/data-centers/%FF"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Not found");
    assert_eq!(body.message, "Id not found");
}

#[tokio::test]
async fn update_with_malformed_id_is_not_found() {
    let app = spawn_app().await;
    register(&app, "DCC", "CA", "PROCESSOR").await;

    let mut payload = data_center("DCC", "US", "SUBMITTER");
    payload["id"] = json!("abc");
    let response = app
        .client
        .put(app.url("/data-centers"))
        .json(&payload)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Not found");
    assert_eq!(body.message, "Id not found");
}

#[tokio::test]
async fn search_path_is_not_an_id_for_other_methods() {
    let app = spawn_app().await;

    let get = app.client.get(app.url("/data-centers/search"));
    let delete = app.client.delete(app.url("/data-centers/search"));

    for request in [get, delete] {
        let response = request.send().await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: ErrorBody = response.json().await.unwrap();
        assert_eq!(body.error, "Not found");
        assert_eq!(body.message, "Id not found");
    }
}
