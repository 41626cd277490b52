//! Data API client and repository tests against a mocked endpoint.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use desk_models::ObjectId;
use desk_store::retry::RetryConfig;
use desk_store::{ApplicationRepository, JobRepository, StoreClient, StoreConfig, StoreError};

fn test_client(server: &MockServer) -> StoreClient {
    let config = StoreConfig {
        base_url: server.uri(),
        api_key: "test-key".to_string(),
        data_source: "Cluster0".to_string(),
        database: "dream_desk".to_string(),
        timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(2),
        retry: RetryConfig {
            max_retries: 2,
            base_delay_ms: 1,
            max_delay_ms: 5,
        },
    };
    StoreClient::new(config).unwrap()
}

#[tokio::test]
async fn find_sends_scoped_payload_and_normalizes_ids() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/find"))
        .and(header("api-key", "test-key"))
        .and(body_partial_json(json!({
            "dataSource": "Cluster0",
            "database": "dream_desk",
            "collection": "jobs",
            "filter": { "hr_email": "a@x.com" },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [{
                "_id": { "$oid": "674f1c2ab3d4e5f60718293a" },
                "hr_email": "a@x.com",
                "title": "Engineer",
                "company": "Acme",
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let jobs = JobRepository::new(test_client(&server));
    let listed = jobs.list(Some("a@x.com")).await.unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, "674f1c2ab3d4e5f60718293a");
    assert_eq!(listed[0].title, "Engineer");
}

#[tokio::test]
async fn find_one_null_document_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/findOne"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "document": null })))
        .mount(&server)
        .await;

    let jobs = JobRepository::new(test_client(&server));
    let id: ObjectId = "674f1c2ab3d4e5f60718293a".parse().unwrap();
    assert!(jobs.get(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn get_filters_by_wrapped_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/findOne"))
        .and(body_partial_json(json!({
            "filter": { "_id": { "$oid": "674f1c2ab3d4e5f60718293a" } },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "document": {
                "_id": { "$oid": "674f1c2ab3d4e5f60718293a" },
                "hr_email": "a@x.com",
                "title": "Engineer",
                "company": "Acme",
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let jobs = JobRepository::new(test_client(&server));
    let id: ObjectId = "674f1c2ab3d4e5f60718293a".parse().unwrap();
    let job = jobs.get(&id).await.unwrap().unwrap();
    assert_eq!(job.company, "Acme");
}

#[tokio::test]
async fn insert_returns_inserted_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/insertOne"))
        .and(body_partial_json(json!({
            "collection": "jobs-Application",
            "document": { "job_id": "674f1c2ab3d4e5f60718293a", "user_email": "dev@mail.com" },
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "insertedId": "111122223333444455556666" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let applications = ApplicationRepository::new(test_client(&server));
    let body: desk_models::NewApplication = serde_json::from_value(json!({
        "job_id": "674f1c2ab3d4e5f60718293a",
        "user_email": "dev@mail.com",
    }))
    .unwrap();

    let result = applications.create(&body).await.unwrap();
    assert_eq!(result.inserted_id, "111122223333444455556666");
}

#[tokio::test]
async fn update_status_sets_only_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/updateOne"))
        .and(body_partial_json(json!({
            "filter": { "_id": { "$oid": "111122223333444455556666" } },
            "update": { "$set": { "status": "accepted" } },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "matchedCount": 1,
            "modifiedCount": 1,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let applications = ApplicationRepository::new(test_client(&server));
    let id: ObjectId = "111122223333444455556666".parse().unwrap();
    let report = applications.update_status(&id, "accepted").await.unwrap();
    assert_eq!(report.matched_count, 1);
    assert_eq!(report.modified_count, 1);
}

#[tokio::test]
async fn update_status_of_unknown_id_matches_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/updateOne"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "matchedCount": 0,
            "modifiedCount": 0,
        })))
        .mount(&server)
        .await;

    let applications = ApplicationRepository::new(test_client(&server));
    let id: ObjectId = "aaaabbbbccccddddeeeeffff".parse().unwrap();
    let report = applications.update_status(&id, "rejected").await.unwrap();
    assert_eq!(report.matched_count, 0);
    assert_eq!(report.modified_count, 0);
}

#[tokio::test]
async fn retries_server_errors_until_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/find"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/action/find"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "documents": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let jobs = JobRepository::new(test_client(&server));
    let listed = jobs.list(None).await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn does_not_retry_auth_failures() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/find"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid session"))
        .expect(1)
        .mount(&server)
        .await;

    let jobs = JobRepository::new(test_client(&server));
    let err = jobs.list(None).await.unwrap_err();
    assert!(matches!(err, StoreError::AuthError(_)));
}

#[tokio::test]
async fn find_by_ids_batches_into_one_query() {
    let server = MockServer::start().await;

    // Malformed ids are dropped before the query is built
    Mock::given(method("POST"))
        .and(path("/action/find"))
        .and(body_partial_json(json!({
            "filter": { "_id": { "$in": [
                { "$oid": "674f1c2ab3d4e5f60718293a" },
                { "$oid": "111122223333444455556666" },
            ] } },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [{
                "_id": { "$oid": "674f1c2ab3d4e5f60718293a" },
                "hr_email": "a@x.com",
                "title": "Engineer",
                "company": "Acme",
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let jobs = JobRepository::new(test_client(&server));
    let ids = vec![
        "674f1c2ab3d4e5f60718293a".to_string(),
        "111122223333444455556666".to_string(),
        "not-a-real-id".to_string(),
    ];

    let found = jobs.find_by_ids(&ids).await.unwrap();
    assert_eq!(found.len(), 1);
    assert!(found.contains_key("674f1c2ab3d4e5f60718293a"));
}

#[tokio::test]
async fn find_by_ids_with_no_valid_ids_skips_the_query() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/find"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "documents": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let jobs = JobRepository::new(test_client(&server));
    let found = jobs.find_by_ids(&["nope".to_string()]).await.unwrap();
    assert!(found.is_empty());
}
