//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data. URLs inside
//! fixtures are relative to the server root; the server prefixes them with
//! its own address when it serves them.

use serde_json::{json, Value};

use super::state::{MockRelation, MockState};

/// Number of employees in the default scenario.
pub const EMPLOYEE_COUNT: u64 = 100;

/// Number of packets assigned to every employee.
pub const PACKET_COUNT: u64 = 5;

pub const RESUME_CONTENTS: &str = "Mock resume contents";
pub const FORM_CONTENTS: &str = "Mock file contents";
pub const ATTACHMENT_CONTENTS: &str = "Mock attachment contents";

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Employee Fixtures
    // =========================================================================

    /// An employee hired from candidate 1, working at location 1.
    pub fn employee(id: u64) -> Value {
        json!({
            "employeeId": id,
            "candidate": 1,
            "ssn": "123456789",
            "firstName": "John",
            "lastName": "Doe",
            "location": 1,
            "relationshipUrls": {
                "candidate": format!("object/employee/{id}/candidate"),
                "packets": format!("object/employee/{id}/packet"),
                "location": format!("object/employee/{id}/location"),
                "historylog": format!("object/employee/{id}/historylog")
            }
        })
    }

    // =========================================================================
    // Candidate Fixtures
    // =========================================================================

    /// A candidate with a resume and attachments.
    pub fn candidate(id: u64, employee_id: u64) -> Value {
        json!({
            "candId": id,
            "employee": employee_id,
            "firstName": "John",
            "lastName": "Doe",
            "relationshipUrls": {
                "employee": format!("object/candidate/{id}/employee"),
                "resume": format!("object/candidate/{id}/resume"),
                "attachments": format!("object/candidate/{id}/attachment")
            }
        })
    }

    /// A candidate that never became an employee and uploaded nothing.
    pub fn bare_candidate(id: u64) -> Value {
        json!({
            "candId": id,
            "firstName": "Jane",
            "lastName": "Roe",
            "relationshipUrls": {}
        })
    }

    // =========================================================================
    // Onboarding Fixtures
    // =========================================================================

    pub fn packet(id: u64, employee_id: u64) -> Value {
        json!({
            "activityPacketId": id,
            "employeeId": employee_id,
            "activitiesCompleted": 10,
            "activitiesCount": 10,
            "relationshipUrls": {
                "employeeId": format!("object/packet/{id}/employeeId")
            }
        })
    }

    /// An activity with a downloadable form.
    pub fn activity(id: u64, employee_id: u64) -> Value {
        json!({
            "id": id,
            "activityDesc": "Activity",
            "activityEmployee": employee_id,
            "relationshipUrls": {
                "activityEmployee": format!("object/activity/{id}/activityEmployee"),
                "formDownloadUrl": format!("object/activity/{id}/form/download")
            }
        })
    }

    /// An activity without a form.
    pub fn activity_without_form(id: u64, employee_id: u64) -> Value {
        json!({
            "id": id,
            "activityDesc": "Acknowledgement",
            "activityEmployee": employee_id,
            "relationshipUrls": {
                "activityEmployee": format!("object/activity/{id}/activityEmployee")
            }
        })
    }

    // =========================================================================
    // Attachment Fixtures
    // =========================================================================

    /// A plain text attachment of `owner` (e.g. "candidate/1").
    pub fn attachment(owner: &str, id: u64) -> Value {
        json!({
            "id": id,
            "contentType": "text/plain",
            "attachmentType": "User_Attachment_Type",
            "downloadUrl": format!("object/{owner}/attachment/{id}/download")
        })
    }

    pub fn location(id: u64, name: &str) -> Value {
        json!({
            "id": id,
            "locationName": name
        })
    }

    /// Create the default scenario.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// Default scenario with a realistic set of related objects.
///
/// - Employees 1 to 100, all hired from candidate 1 and working at location 1
/// - Candidate 1 with a resume and attachments 1 to 5, candidate 2 with nothing
/// - Packets 1 to 5 assigned to every employee
/// - Activity 1 with a downloadable form, activity 2 without one
/// - Employee attachments 11 to 15
pub struct DefaultScenario {
    pub objects: Vec<(&'static str, u64, Value)>,
    pub relations: Vec<(String, MockRelation)>,
}

impl DefaultScenario {
    fn new() -> Self {
        let mut objects = Vec::new();
        let mut relations = Vec::new();

        let candidate_attachments: Vec<u64> = (1..=5).collect();
        let employee_attachments: Vec<u64> = (11..=15).collect();
        let packets: Vec<u64> = (1..=PACKET_COUNT).collect();

        for id in 1..=EMPLOYEE_COUNT {
            objects.push(("employee", id, Fixtures::employee(id)));
            relations.push((format!("employee/{id}/candidate"), object("candidate", 1)));
            relations.push((
                format!("employee/{id}/packet"),
                collection("activityPackets", "packet", &packets),
            ));
            relations.push((format!("employee/{id}/location"), object("location", 1)));
            relations.push((
                format!("employee/{id}/attachment"),
                collection("attachments", "attachment", &employee_attachments),
            ));
        }

        objects.push(("candidate", 1, Fixtures::candidate(1, 1)));
        objects.push(("candidate", 2, Fixtures::bare_candidate(2)));
        relations.push(("candidate/1/employee".to_string(), object("employee", 1)));
        relations.push((
            "candidate/1/resume".to_string(),
            content("application/msword", RESUME_CONTENTS),
        ));
        relations.push((
            "candidate/1/attachment".to_string(),
            collection("attachments", "attachment", &candidate_attachments),
        ));

        for &id in &candidate_attachments {
            objects.push(("attachment", id, Fixtures::attachment("candidate/1", id)));
            relations.push((
                format!("candidate/1/attachment/{id}"),
                object("attachment", id),
            ));
            relations.push((
                format!("candidate/1/attachment/{id}/download"),
                content("text/plain", ATTACHMENT_CONTENTS),
            ));
        }

        // Employee attachments share one download path per ID across employees.
        for &id in &employee_attachments {
            objects.push(("attachment", id, Fixtures::attachment("employee/1", id)));
            relations.push((
                format!("employee/1/attachment/{id}/download"),
                content("text/plain", ATTACHMENT_CONTENTS),
            ));
        }

        for &id in &packets {
            objects.push(("packet", id, Fixtures::packet(id, 1)));
            relations.push((format!("packet/{id}/employeeId"), object("employee", 1)));
        }

        objects.push(("activity", 1, Fixtures::activity(1, 1)));
        objects.push(("activity", 2, Fixtures::activity_without_form(2, 1)));
        for id in 1..=2 {
            relations.push((
                format!("activity/{id}/activityEmployee"),
                object("employee", 1),
            ));
        }
        relations.push((
            "activity/1/form/download".to_string(),
            content("application/pdf", FORM_CONTENTS),
        ));

        objects.push(("location", 1, Fixtures::location(1, "Mock Location")));

        Self { objects, relations }
    }

    /// Load the scenario into a state.
    pub fn into_state(self, mut state: MockState) -> MockState {
        for (kind, id, attributes) in self.objects {
            state.insert_object(kind, id, attributes);
        }
        for (path, relation) in self.relations {
            state.insert_relation(&path, relation);
        }
        state
    }
}

fn object(kind: &str, id: u64) -> MockRelation {
    MockRelation::Object {
        kind: kind.to_string(),
        id,
    }
}

fn collection(key: &str, kind: &str, ids: &[u64]) -> MockRelation {
    MockRelation::Collection {
        key: key.to_string(),
        kind: kind.to_string(),
        ids: ids.to_vec(),
    }
}

fn content(content_type: &str, body: &str) -> MockRelation {
    MockRelation::Content {
        content_type: content_type.to_string(),
        body: body.as_bytes().to_vec(),
    }
}
