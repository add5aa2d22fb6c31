//! Lazy relationship resolution and download tests.
//!
//! Uses wiremock to count the requests each relationship access makes.

use serde_json::{json, Value};
use taleo::{
    Activity, Attachment, Candidate, Employee, Entity, Fetch, Related, TaleoClient, TaleoError,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn envelope(response: Value) -> Value {
    json!({
        "response": response,
        "status": { "success": true, "detail": {} }
    })
}

async fn mount_json(server: &MockServer, route: &str, response: Value, expected: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(response)))
        .expect(expected)
        .mount(server)
        .await;
}

async fn employee(server: &MockServer, client: &TaleoClient) -> Employee {
    let uri = server.uri();
    mount_json(
        server,
        "/object/employee/1",
        json!({
            "employee": {
                "employeeId": 1,
                "candidate": 1,
                "firstName": "John",
                "relationshipUrls": {
                    "candidate": format!("{uri}/object/employee/1/candidate"),
                    "packets": format!("{uri}/object/employee/1/packet"),
                    "historylog": format!("{uri}/object/employee/1/historylog")
                }
            }
        }),
        1,
    )
    .await;
    Employee::fetch(client, 1).await.unwrap()
}

// =============================================================================
// Resolution and Caching
// =============================================================================

#[tokio::test]
async fn test_to_one_relationship_is_fetched_once() {
    let server = MockServer::start().await;
    let client = TaleoClient::new(&server.uri()).unwrap();
    let mut employee = employee(&server, &client).await;

    mount_json(
        &server,
        "/object/employee/1/candidate",
        json!({ "candidate": { "candId": 1, "firstName": "John" } }),
        1,
    )
    .await;

    assert!(!employee.is_cached("candidate"));

    let first = employee.candidate().await.unwrap().id().clone();
    let second = employee.candidate().await.unwrap().id().clone();

    assert_eq!(first, json!(1));
    assert_eq!(first, second);
    assert!(employee.is_cached("candidate"));
    // Dropping the server verifies the candidate endpoint was hit exactly once
}

#[tokio::test]
async fn test_to_many_relationship_preserves_order_and_unwraps_items() {
    let server = MockServer::start().await;
    let client = TaleoClient::new(&server.uri()).unwrap();
    let mut employee = employee(&server, &client).await;

    mount_json(
        &server,
        "/object/employee/1/packet",
        json!({
            "activityPackets": [
                { "packet": { "activityPacketId": 3, "employeeId": 1 } },
                { "activityPacketId": 1, "employeeId": 1 },
                { "packet": { "activityPacketId": 2, "employeeId": 1 } }
            ]
        }),
        1,
    )
    .await;

    let ids: Vec<Value> = employee
        .packets()
        .await
        .unwrap()
        .iter()
        .map(|packet| packet.id().clone())
        .collect();

    assert_eq!(ids, vec![json!(3), json!(1), json!(2)]);

    // Second access served from cache
    assert_eq!(employee.packets().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_sibling_url_is_derived_from_history_log() {
    let server = MockServer::start().await;
    let client = TaleoClient::new(&server.uri()).unwrap();
    let mut employee = employee(&server, &client).await;

    mount_json(
        &server,
        "/object/employee/1/attachment",
        json!({
            "attachments": [
                { "attachment": { "id": 11, "downloadUrl": "x" } },
                { "attachment": { "id": 12 } }
            ]
        }),
        1,
    )
    .await;

    let attachments = employee.attachments().await.unwrap();
    assert_eq!(attachments.len(), 2);
    assert!(attachments[0].can_download());
    assert!(!attachments[1].can_download());
}

#[tokio::test]
async fn test_empty_collection_resolves_to_empty_list() {
    let server = MockServer::start().await;
    let client = TaleoClient::new(&server.uri()).unwrap();
    let mut employee = employee(&server, &client).await;

    mount_json(
        &server,
        "/object/employee/1/packet",
        json!({ "activityPackets": null }),
        1,
    )
    .await;

    assert!(employee.packets().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_relationship_is_not_cached() {
    let server = MockServer::start().await;
    let client = TaleoClient::new(&server.uri()).unwrap();
    let mut employee = employee(&server, &client).await;

    Mock::given(method("GET"))
        .and(path("/object/employee/1/candidate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {},
            "status": { "success": false, "detail": { "errormessage": "Unavailable" } }
        })))
        .expect(2)
        .mount(&server)
        .await;

    assert!(matches!(
        employee.candidate().await,
        Err(TaleoError::ApiError { .. })
    ));
    assert!(!employee.is_cached("candidate"));
    assert!(employee.candidate().await.is_err());
}

// =============================================================================
// Relationship Errors
// =============================================================================

#[tokio::test]
async fn test_missing_relationship_makes_no_request() {
    let server = MockServer::start().await;
    let client = TaleoClient::new(&server.uri()).unwrap();
    let mut employee = employee(&server, &client).await;

    Mock::given(method("GET"))
        .and(path("/object/employee/1/location"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    assert!(!employee.has_relationship("location"));

    let err = employee.location().await.unwrap_err();
    assert!(matches!(
        err,
        TaleoError::MissingRelationship { kind: "employee", name } if name == "location"
    ));
}

#[tokio::test]
async fn test_unknown_relationship_is_rejected() {
    let server = MockServer::start().await;
    let client = TaleoClient::new(&server.uri()).unwrap();
    let mut employee = employee(&server, &client).await;

    let err = employee.get("manager").await.unwrap_err();
    assert!(matches!(err, TaleoError::UnknownRelationship { .. }));
}

#[tokio::test]
async fn test_cardinality_mismatch() {
    let server = MockServer::start().await;
    let client = TaleoClient::new(&server.uri()).unwrap();
    let mut employee = employee(&server, &client).await;

    mount_json(
        &server,
        "/object/employee/1/candidate",
        json!({ "candidate": { "candId": 1 } }),
        1,
    )
    .await;

    let err = employee.many("candidate").await.unwrap_err();
    assert!(matches!(
        err,
        TaleoError::CardinalityMismatch {
            name: "candidate",
            expected: "many",
            ..
        }
    ));

    // The lookup still resolved and cached the relationship
    assert!(matches!(
        employee.get("candidate").await.unwrap(),
        Related::One(_)
    ));
}

#[tokio::test]
async fn test_related_resources_can_be_typed() {
    let server = MockServer::start().await;
    let client = TaleoClient::new(&server.uri()).unwrap();
    let mut employee = employee(&server, &client).await;

    mount_json(
        &server,
        "/object/employee/1/candidate",
        json!({ "candidate": { "candId": 1, "lastName": "Doe" } }),
        1,
    )
    .await;

    let resource = employee.candidate().await.unwrap().clone();
    let candidate = Candidate::from_resource(resource.clone()).unwrap();
    assert_eq!(candidate.last_name().unwrap(), "Doe");

    let err = Employee::from_resource(resource).unwrap_err();
    assert!(matches!(
        err,
        TaleoError::KindMismatch {
            expected: "employee",
            found: "candidate"
        }
    ));
}

// =============================================================================
// Downloads
// =============================================================================

#[tokio::test]
async fn test_download_unavailable_makes_no_request() {
    let server = MockServer::start().await;
    let client = TaleoClient::new(&server.uri()).unwrap();

    mount_json(
        &server,
        "/object/candidate/2",
        json!({ "candidate": { "candId": 2, "relationshipUrls": {} } }),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/object/candidate/2/resume"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let candidate = Candidate::fetch(&client, 2).await.unwrap();
    assert!(!candidate.has_resume());

    let err = candidate.resume().await.unwrap_err();
    assert!(matches!(
        err,
        TaleoError::DownloadUnavailable { kind: "candidate", id } if id == "2"
    ));
}

#[tokio::test]
async fn test_attachment_download_streams_content() {
    let server = MockServer::start().await;
    let client = TaleoClient::new(&server.uri()).unwrap();
    let uri = server.uri();

    mount_json(
        &server,
        "/object/attachment/5",
        json!({
            "attachment": {
                "id": 5,
                "contentType": "text/plain",
                "downloadUrl": format!("{uri}/object/candidate/1/attachment/5/download")
            }
        }),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/object/candidate/1/attachment/5/download"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/plain")
                .set_body_bytes(b"Mock attachment contents".to_vec()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let attachment = Attachment::fetch(&client, 5).await.unwrap();
    assert!(attachment.can_download());

    let download = attachment.download().await.unwrap();
    assert_eq!(download.content_type(), Some("text/plain"));

    let mut buffer = Vec::new();
    let written = download.copy_to(&mut buffer).await.unwrap();

    assert_eq!(written, 24);
    assert_eq!(buffer, b"Mock attachment contents");
}

#[tokio::test]
async fn test_activity_form_download_uses_relationship_url() {
    let server = MockServer::start().await;
    let client = TaleoClient::new(&server.uri()).unwrap();
    let uri = server.uri();

    mount_json(
        &server,
        "/object/activity/1",
        json!({
            "activity": {
                "id": 1,
                "activityDesc": "Activity",
                "relationshipUrls": {
                    "formDownloadUrl": format!("{uri}/object/activity/1/form/download")
                }
            }
        }),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/object/activity/1/form/download"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"Mock file contents".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let activity = Activity::fetch(&client, 1).await.unwrap();
    let bytes = activity.download().await.unwrap().bytes().await.unwrap();

    assert_eq!(&bytes[..], b"Mock file contents");
}

#[tokio::test]
async fn test_failed_download_surfaces_envelope_error() {
    let server = MockServer::start().await;
    let client = TaleoClient::new(&server.uri()).unwrap();

    Mock::given(method("GET"))
        .and(path("/files/1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "response": {},
            "status": { "success": false, "detail": { "errormessage": "Gone" } }
        })))
        .mount(&server)
        .await;

    let err = client
        .download(&format!("{}/files/1", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TaleoError::ApiError {
            status_code: Some(404),
            ..
        }
    ));
}

#[tokio::test]
async fn test_failed_download_keeps_server_body() {
    let server = MockServer::start().await;
    let client = TaleoClient::new(&server.uri()).unwrap();

    Mock::given(method("GET"))
        .and(path("/files/2"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "response": { "message": "Storage offline" },
            "status": { "success": true, "detail": {} }
        })))
        .mount(&server)
        .await;

    let err = client
        .download(&format!("{}/files/2", server.uri()))
        .await
        .unwrap_err();

    match err {
        TaleoError::UnexpectedStatus { status_code, body } => {
            assert_eq!(status_code, 503);
            assert!(body.contains("Storage offline"));
        }
        other => panic!("Expected UnexpectedStatus, got {other:?}"),
    }
}
