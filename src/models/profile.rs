use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use validator::Validate;

/// Role of a registered user.
/// Corresponds to the `user_role` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A current or former student; requires a pass-out year at registration.
    Student,
    /// A college placement cell account; requires a department at registration.
    College,
    /// Platform administrator.
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::College => "college",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user profile as returned by the API. Never carries the password hash.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub college: Option<String>,
    pub pass_out_year: Option<i32>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Internal row shape used during login; includes the stored bcrypt hash.
#[derive(Debug, FromRow)]
pub struct ProfileCredentials {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub college: Option<String>,
    pub pass_out_year: Option<i32>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl From<ProfileCredentials> for Profile {
    fn from(row: ProfileCredentials) -> Self {
        Profile {
            id: row.id,
            name: row.name,
            email: row.email,
            role: row.role,
            college: row.college,
            pass_out_year: row.pass_out_year,
            department: row.department,
            phone: row.phone,
            created_at: row.created_at,
        }
    }
}

/// One-to-one extension of a student profile with placement-readiness data.
/// Created on first read if absent.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct StudentProfile {
    pub id: i32,
    pub student_id: i32,
    pub resume_url: Option<String>,
    pub skills: Option<String>,
    pub course: Option<String>,
    pub completion_percentage: i32,
    pub updated_at: DateTime<Utc>,
}

/// Input for `PUT /student-profile/{student_id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct StudentProfileInput {
    #[validate(length(max = 500))]
    pub resume_url: Option<String>,
    #[validate(length(max = 1000))]
    pub skills: Option<String>,
    #[validate(length(max = 100))]
    pub course: Option<String>,
    #[validate(range(min = 0, max = 100))]
    pub completion_percentage: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Student).unwrap(), "\"student\"");
        assert_eq!(serde_json::to_string(&Role::College).unwrap(), "\"college\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result: Result<Role, _> = serde_json::from_str("\"recruiter\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_student_profile_input_validation() {
        let valid = StudentProfileInput {
            resume_url: Some("https://example.com/resume.pdf".to_string()),
            skills: Some("Rust, SQL".to_string()),
            course: Some("B.Tech CSE".to_string()),
            completion_percentage: Some(80),
        };
        assert!(valid.validate().is_ok());

        let out_of_range = StudentProfileInput {
            resume_url: None,
            skills: None,
            course: None,
            completion_percentage: Some(150),
        };
        assert!(out_of_range.validate().is_err());
    }
}
