pub mod password;
pub mod token;

use crate::models::profile::{Profile, Role};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};

lazy_static! {
    // Regex for phone validation: digits with optional +, spaces, hyphens
    static ref PHONE_REGEX: regex::Regex = regex::Regex::new(r"^\+?[0-9][0-9 \-]{6,18}$").unwrap();
}

/// Payload for a user login request.
///
/// `role` is optional; when supplied it must match the stored role (the
/// frontend uses it to keep the student/college/admin login pages separate).
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    #[validate(email)]
    pub email: String,
    /// User's password, at least 6 characters.
    #[validate(length(min = 6))]
    pub password: String,
    /// Expected role for this login page, if any.
    pub role: Option<Role>,
}

/// Payload for a new user registration request.
///
/// Role-conditional requirements (students need a pass-out year, colleges a
/// department) are checked in the handler; `Validate` covers the
/// unconditional field rules.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name, 1 to 100 characters.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Email address for the new account.
    #[validate(email)]
    pub email: String,
    /// Password for the new account, at least 6 characters.
    #[validate(length(min = 6))]
    pub password: String,
    /// Account role: student, college, or admin.
    pub role: Role,
    /// College the user belongs to.
    #[validate(length(max = 100))]
    pub college: Option<String>,
    /// Graduation year; mandatory for students.
    #[validate(range(min = 1950, max = 2100))]
    pub pass_out_year: Option<i32>,
    /// Department; mandatory for college accounts.
    #[validate(length(max = 100))]
    pub department: Option<String>,
    /// Contact phone number.
    #[validate(regex(path = "PHONE_REGEX", message = "Invalid phone number"))]
    pub phone: Option<String>,
}

/// Response body for a successful login: the session token plus the profile.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// HS256 JWT, valid for one hour.
    pub token: String,
    /// The authenticated user's profile.
    pub user: Profile,
}
