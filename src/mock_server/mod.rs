//! Mock Taleo API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Taleo API
//! for integration and end-to-end testing. Unlike wiremock which mocks at the
//! HTTP level per-test, this server maintains state across requests, enabling
//! realistic workflow testing: log in, fetch an employee, follow its
//! relationships, download files.
//!
//! # Example
//!
//! ```ignore
//! use taleo::mock_server::MockServer;
//! use taleo::{Credentials, Employee, Fetch, TaleoClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = TaleoClient::new(server.url()).unwrap();
//!     client.login(&Credentials::new("ORG", "user", "pass")).await.unwrap();
//!
//!     // Server comes with default fixtures
//!     let employee = Employee::fetch(&client, 42).await.unwrap();
//!     assert_eq!(employee.first_name().unwrap(), "John");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{
    DefaultScenario, Fixtures, ATTACHMENT_CONTENTS, EMPLOYEE_COUNT, FORM_CONTENTS, PACKET_COUNT,
    RESUME_CONTENTS,
};
pub use server::MockServer;
pub use state::{MockRelation, MockState};
