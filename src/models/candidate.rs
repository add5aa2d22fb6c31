//! Candidate model.

use crate::download::Download;
use crate::error::Result;
use crate::models::{ATTACHMENT, EMPLOYEE};
use crate::relationship::{Relationship, ResourceKind};
use crate::resource::Resource;

const RESUME_KEY: &str = "resume";

static RELATIONSHIPS: [Relationship; 2] = [
    Relationship::one("employee", &EMPLOYEE),
    Relationship::many("attachments", &ATTACHMENT).singular("attachment"),
];

/// The `candidate` object type.
pub static CANDIDATE: ResourceKind =
    ResourceKind::new("candidate", "candId").with_relationships(&RELATIONSHIPS);

entity! {
    /// A Taleo candidate.
    Candidate => CANDIDATE
}

impl Candidate {
    pub fn id(&self) -> Result<u64> {
        self.0.field_as("candId")
    }

    /// ID of the employee record created when this candidate was hired.
    pub fn employee_id(&self) -> Result<u64> {
        self.0.field_as("employee")
    }

    pub fn first_name(&self) -> Result<String> {
        self.0.field_as("firstName")
    }

    pub fn last_name(&self) -> Result<String> {
        self.0.field_as("lastName")
    }

    pub async fn employee(&mut self) -> Result<&Resource> {
        self.0.one("employee").await
    }

    pub async fn attachments(&mut self) -> Result<&[Resource]> {
        self.0.many("attachments").await
    }

    /// Whether a resume is available for download. Never fetches.
    pub fn has_resume(&self) -> bool {
        self.0.has_relationship_url(RESUME_KEY)
    }

    /// Download the candidate's resume.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadUnavailable`](crate::TaleoError::DownloadUnavailable) when
    /// [`has_resume`](Candidate::has_resume) is false.
    pub async fn resume(&self) -> Result<Download> {
        self.0.download_relationship(RESUME_KEY).await
    }
}
