//! Client request and envelope handling tests.
//!
//! Uses wiremock to mock the Taleo API at the HTTP level.

use serde_json::{json, Value};
use taleo::{
    AuthScheme, ClientConfig, Credentials, Employee, Fetch, Search, Session, TaleoClient,
    TaleoError, EMPLOYEE,
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn envelope(response: Value) -> Value {
    json!({
        "response": response,
        "status": { "success": true, "detail": {} }
    })
}

fn failed_envelope(message: &str) -> Value {
    json!({
        "response": {},
        "status": {
            "success": false,
            "detail": { "errorcode": "500", "errormessage": message }
        }
    })
}

fn employee_json(id: u64, base: &str) -> Value {
    json!({
        "employeeId": id,
        "firstName": "John",
        "lastName": "Doe",
        "relationshipUrls": {
            "packets": format!("{base}/object/employee/{id}/packet")
        }
    })
}

async fn logged_in(server: &MockServer) -> TaleoClient {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!({ "authToken": "webapi-12345" }))),
        )
        .mount(server)
        .await;

    let client = TaleoClient::new(&server.uri()).unwrap();
    client
        .login(&Credentials::new("ORG", "user", "secret"))
        .await
        .unwrap();
    client
}

// =============================================================================
// Session Tests
// =============================================================================

#[tokio::test]
async fn test_login_posts_credentials_and_stores_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({
            "orgCode": "ORG",
            "userName": "user",
            "password": "secret"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!({ "authToken": "webapi-12345" }))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = TaleoClient::new(&server.uri()).unwrap();
    assert!(!client.is_authenticated());

    client
        .login(&Credentials::new("ORG", "user", "secret"))
        .await
        .unwrap();

    assert!(client.is_authenticated());
    assert_eq!(client.session().token(), Some("webapi-12345"));
}

#[tokio::test]
async fn test_login_rejected_is_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(500).set_body_json(failed_envelope("Bad password")))
        .mount(&server)
        .await;

    let client = TaleoClient::new(&server.uri()).unwrap();
    let err = client
        .login(&Credentials::new("ORG", "user", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, TaleoError::AuthenticationError(_)));
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_requests_carry_session_cookie() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/object/employee/42"))
        .and(header("cookie", "authToken=webapi-12345"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!({ "employee": employee_json(42, &server.uri()) }))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let employee = Employee::fetch(&client, 42).await.unwrap();
    assert_eq!(employee.id().unwrap(), 42);
}

#[tokio::test]
async fn test_custom_auth_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(json!({ "authToken": "tok" }))),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/object/employee/1"))
        .and(header("X-Auth-Token", "tok"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!({ "employee": employee_json(1, &server.uri()) }))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new(server.uri())
        .with_auth_scheme(AuthScheme::Header("X-Auth-Token".to_string()));
    let client = TaleoClient::with_config(config).unwrap();
    client
        .login(&Credentials::new("ORG", "user", "secret"))
        .await
        .unwrap();

    Employee::fetch(&client, 1).await.unwrap();
}

#[tokio::test]
async fn test_unauthorized_response_clears_session() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/object/employee/1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(failed_envelope("Session expired")))
        .mount(&server)
        .await;

    let err = Employee::fetch(&client, 1).await.unwrap_err();

    match err {
        TaleoError::AuthenticationError(message) => assert_eq!(message, "Session expired"),
        other => panic!("Expected AuthenticationError, got {other:?}"),
    }
    assert_eq!(client.session(), Session::Unauthenticated);
}

#[tokio::test]
async fn test_logout_clears_session() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("POST"))
        .and(path("/logout"))
        .and(header("cookie", "authToken=webapi-12345"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
        .expect(1)
        .mount(&server)
        .await;

    client.logout().await.unwrap();
    assert!(!client.is_authenticated());
}

// =============================================================================
// Envelope Tests
// =============================================================================

#[tokio::test]
async fn test_fetch_failed_envelope_is_api_error() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/object/employee/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(failed_envelope("No such employee")))
        .mount(&server)
        .await;

    let err = client.fetch_object(&EMPLOYEE, 7).await.unwrap_err();

    match err {
        TaleoError::ApiError {
            detail,
            status_code,
        } => {
            assert_eq!(detail["errormessage"], "No such employee");
            assert_eq!(status_code, Some(200));
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_without_identifying_field_fails() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/object/employee/7"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!({ "employee": { "firstName": "John" } }))),
        )
        .mount(&server)
        .await;

    let err = client.fetch_object(&EMPLOYEE, 7).await.unwrap_err();
    assert!(matches!(
        err,
        TaleoError::MissingField { kind: "employee", field } if field == "employeeId"
    ));
}

#[tokio::test]
async fn test_non_json_error_is_unexpected_status() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/object/employee/7"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client.fetch_object(&EMPLOYEE, 7).await.unwrap_err();
    assert!(matches!(
        err,
        TaleoError::UnexpectedStatus {
            status_code: 502,
            ..
        }
    ));
}

// =============================================================================
// Search Tests
// =============================================================================

#[tokio::test]
async fn test_search_sends_start_and_limit() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;
    let uri = server.uri();

    let results: Vec<Value> = (91..=100)
        .map(|id| json!({ "employee": employee_json(id, &uri) }))
        .collect();

    Mock::given(method("GET"))
        .and(path("/object/employee/search"))
        .and(query_param("start", "91"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "pagination": {
                "total": 100,
                "self": format!("{uri}/object/employee/search?start=91&limit=10"),
                "previous": format!("{uri}/object/employee/search?start=81&limit=10")
            },
            "searchResults": results
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let page = Employee::search_page(&client, 91, 10).await.unwrap();

    assert_eq!(page.total, 100);
    assert_eq!(page.start, 91);
    assert_eq!(page.len(), 10);
    assert!(page.has_previous());
    assert!(!page.has_next());
    assert_eq!(page.items[0].id(), &json!(91));
}

#[tokio::test]
async fn test_search_failed_envelope_is_api_error() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/object/employee/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(failed_envelope("Search failed")))
        .mount(&server)
        .await;

    let err = Employee::search_page(&client, 1, 10).await.unwrap_err();
    assert!(matches!(err, TaleoError::ApiError { .. }));
}

#[tokio::test]
async fn test_search_all_follows_next_links() {
    let server = MockServer::start().await;
    let client = logged_in(&server).await;
    let uri = server.uri();

    Mock::given(method("GET"))
        .and(path("/object/employee/search"))
        .and(query_param("start", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "pagination": {
                "total": 150,
                "next": format!("{uri}/object/employee/search?start=101&limit=100")
            },
            "searchResults": (1..=100)
                .map(|id| json!({ "employee": employee_json(id, &uri) }))
                .collect::<Vec<_>>()
        }))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/object/employee/search"))
        .and(query_param("start", "101"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "pagination": {
                "total": 150,
                "previous": format!("{uri}/object/employee/search?start=1&limit=100")
            },
            "searchResults": (101..=150)
                .map(|id| json!({ "employee": employee_json(id, &uri) }))
                .collect::<Vec<_>>()
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let employees = Employee::search_all(&client).await.unwrap();

    assert_eq!(employees.len(), 150);
    assert_eq!(employees[149].id().unwrap(), 150);
}
