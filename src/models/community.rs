use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A community as returned by the API. The join-password hash stays in the
/// database; queries select everything but the `password` column.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Community {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub cover_image: Option<String>,
    pub created_by: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Membership row in the (community, user) join table.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct CommunityMember {
    pub id: i32,
    pub community_id: i32,
    pub user_id: i32,
    pub joined_at: DateTime<Utc>,
}

/// A post inside a community. Only current members may author one.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct CommunityPost {
    pub id: i32,
    pub community_id: i32,
    pub user_id: i32,
    pub content: String,
    pub post_type: String,
    pub created_at: DateTime<Utc>,
}

/// Input for `POST /communities`.
#[derive(Debug, Deserialize, Validate)]
pub struct CommunityInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(max = 50))]
    pub category: Option<String>,
    /// Plaintext join password; stored as a bcrypt hash.
    #[validate(length(min = 4))]
    pub password: String,
    #[validate(length(max = 500))]
    pub cover_image: Option<String>,
    pub created_by: i32,
}

/// Input for `POST /communities/{id}/join`.
#[derive(Debug, Deserialize, Validate)]
pub struct JoinCommunityInput {
    pub user_id: i32,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Input for `POST /communities/{id}/posts`.
#[derive(Debug, Deserialize, Validate)]
pub struct CommunityPostInput {
    pub user_id: i32,
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
    #[validate(length(max = 50))]
    pub post_type: Option<String>,
}

/// Body for community administration requests (delete community, remove
/// member). Identifies the acting user; privilege is checked server-side.
#[derive(Debug, Deserialize)]
pub struct CommunityAdminInput {
    pub requester_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_community_input_validation() {
        let valid = CommunityInput {
            name: "Class of 2020".to_string(),
            description: Some("Alumni batch community".to_string()),
            category: Some("batch".to_string()),
            password: "secret123".to_string(),
            cover_image: None,
            created_by: 1,
        };
        assert!(valid.validate().is_ok());

        let empty_name = CommunityInput {
            name: "".to_string(),
            description: None,
            category: None,
            password: "secret123".to_string(),
            cover_image: None,
            created_by: 1,
        };
        assert!(empty_name.validate().is_err());

        let short_password = CommunityInput {
            name: "Class of 2020".to_string(),
            description: None,
            category: None,
            password: "ab".to_string(),
            cover_image: None,
            created_by: 1,
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_post_input_validation() {
        let valid = CommunityPostInput {
            user_id: 3,
            content: "Anyone attending the reunion?".to_string(),
            post_type: None,
        };
        assert!(valid.validate().is_ok());

        let empty = CommunityPostInput {
            user_id: 3,
            content: "".to_string(),
            post_type: None,
        };
        assert!(empty.validate().is_err());
    }
}
