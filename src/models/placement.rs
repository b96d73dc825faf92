use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use validator::Validate;

/// Status of a CAF (Company Application Form) submitted by a college.
/// Corresponds to the `caf_status` SQL enum.
///
/// Transitions are constrained: a form starts `pending` and may be approved
/// or rejected exactly once; both outcomes are terminal.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "caf_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CafStatus {
    Pending,
    Approved,
    Rejected,
}

impl CafStatus {
    /// Whether a stored status may be overwritten with `next`.
    /// Writing the same status again is a permitted no-op.
    pub fn can_transition_to(&self, next: CafStatus) -> bool {
        if *self == next {
            return true;
        }
        matches!(
            (self, next),
            (CafStatus::Pending, CafStatus::Approved) | (CafStatus::Pending, CafStatus::Rejected)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CafStatus::Pending => "pending",
            CafStatus::Approved => "approved",
            CafStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for CafStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a student's application to a company.
/// Corresponds to the `application_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Applied,
    Shortlisted,
    Interview,
    Selected,
    Rejected,
}

impl ApplicationStatus {
    /// Whether a stored status may be overwritten with `next`.
    ///
    /// The pipeline only moves forward: applied → shortlisted → interview →
    /// selected/rejected. Rejection is allowed from any live stage, skipping
    /// ahead (e.g. applied → selected) is allowed, and rewriting the same
    /// status is a no-op. `selected` and `rejected` are terminal.
    pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
        use ApplicationStatus::*;
        if *self == next {
            return true;
        }
        match self {
            Applied => matches!(next, Shortlisted | Interview | Selected | Rejected),
            Shortlisted => matches!(next, Interview | Selected | Rejected),
            Interview => matches!(next, Selected | Rejected),
            Selected | Rejected => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Selected => "selected",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A college-submitted job posting request awaiting admin approval.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct CafForm {
    pub id: i32,
    pub college_id: i32,
    pub company_name: String,
    pub job_role: String,
    pub description: Option<String>,
    pub package: Option<String>,
    pub eligibility: Option<String>,
    pub drive_date: Option<NaiveDate>,
    pub status: CafStatus,
    pub created_at: DateTime<Utc>,
}

/// Input for `POST /caf-forms`.
#[derive(Debug, Deserialize, Validate)]
pub struct CafFormInput {
    pub college_id: i32,
    #[validate(length(min = 1, max = 200))]
    pub company_name: String,
    #[validate(length(min = 1, max = 200))]
    pub job_role: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(max = 100))]
    pub package: Option<String>,
    #[validate(length(max = 500))]
    pub eligibility: Option<String>,
    pub drive_date: Option<NaiveDate>,
}

/// Input for `PUT /caf-forms/{id}`. Absent fields keep their stored values.
#[derive(Debug, Deserialize, Validate)]
pub struct CafFormUpdate {
    #[validate(length(min = 1, max = 200))]
    pub company_name: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub job_role: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(max = 100))]
    pub package: Option<String>,
    #[validate(length(max = 500))]
    pub eligibility: Option<String>,
    pub drive_date: Option<NaiveDate>,
    pub status: Option<CafStatus>,
}

/// Query parameters accepted by `GET /caf-forms`.
#[derive(Debug, Deserialize)]
pub struct CafFormQuery {
    pub college_id: Option<i32>,
    pub status: Option<CafStatus>,
}

/// A company known to the platform.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: i32,
    pub name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CompanyInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 100))]
    pub industry: Option<String>,
    #[validate(length(max = 500))]
    pub website: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

/// An open job listing.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub company_name: String,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub description: Option<String>,
    pub posted_by: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct JobInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 200))]
    pub company_name: String,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(length(max = 50))]
    pub job_type: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub posted_by: Option<i32>,
}

/// A general campus event (talks, reunions, workshops).
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub created_by: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct EventInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub event_date: Option<NaiveDate>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    pub created_by: Option<i32>,
}

/// A stored document reference (resumes, brochures, offer letters).
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Document {
    pub id: i32,
    pub title: String,
    pub file_url: String,
    pub doc_type: Option<String>,
    pub uploaded_by: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DocumentInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 500))]
    pub file_url: String,
    #[validate(length(max = 50))]
    pub doc_type: Option<String>,
    pub uploaded_by: Option<i32>,
}

/// A scheduled placement drive for a specific company.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct PlacementEvent {
    pub id: i32,
    pub title: String,
    pub company_name: String,
    pub event_date: Option<NaiveDate>,
    pub venue: Option<String>,
    pub description: Option<String>,
    pub created_by: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PlacementEventInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 200))]
    pub company_name: String,
    pub event_date: Option<NaiveDate>,
    #[validate(length(max = 200))]
    pub venue: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub created_by: Option<i32>,
}

/// A student's application to a company/role.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: i32,
    pub student_id: i32,
    pub company_name: String,
    pub role: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ApplicationInput {
    pub student_id: i32,
    #[validate(length(min = 1, max = 200))]
    pub company_name: String,
    #[validate(length(min = 1, max = 200))]
    pub role: String,
}

/// Input for `PUT /applications/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct ApplicationStatusUpdate {
    pub status: ApplicationStatus,
}
