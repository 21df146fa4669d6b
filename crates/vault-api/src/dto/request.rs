//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use vault_core::error::AppError;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username.
    #[validate(length(min = 3, max = 100, message = "Username must be 3-100 characters"))]
    pub username: String,
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 100, message = "Folder name must be 1-100 characters"))]
    pub name: String,
    /// Parent folder ID.
    pub parent_id: Option<Uuid>,
}

/// Update folder request. Absent fields are left unchanged; an explicit
/// `"parent_id": null` detaches the folder to root.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFolderRequest {
    /// New folder name.
    pub name: Option<String>,
    /// New parent reference.
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<Uuid>>,
}

/// Update image request. Same patch semantics as folders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateImageRequest {
    /// New display name.
    pub name: Option<String>,
    /// New folder reference.
    #[serde(default, deserialize_with = "double_option")]
    pub folder_id: Option<Option<Uuid>>,
}

/// Search query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    /// Substring to match against image names.
    #[serde(default)]
    pub q: String,
}

/// Distinguishes an absent field from an explicit `null`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Runs `validator` checks and converts the first failure into a domain
/// validation error.
pub fn validate_body<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate().map_err(|errors| {
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for '{field}'"))
                })
            })
            .next()
            .unwrap_or_else(|| "Invalid request body".to_string());
        AppError::validation(message)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_null_parent_are_distinguished() {
        let absent: UpdateFolderRequest = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
        assert_eq!(absent.parent_id, None);

        let null: UpdateFolderRequest = serde_json::from_str(r#"{"parent_id":null}"#).unwrap();
        assert_eq!(null.parent_id, Some(None));

        let set: UpdateFolderRequest =
            serde_json::from_str(r#"{"parent_id":"0193e0a4-0000-7000-8000-000000000000"}"#)
                .unwrap();
        assert!(matches!(set.parent_id, Some(Some(_))));
    }

    #[test]
    fn validate_body_reports_first_violation() {
        let req = RegisterRequest {
            username: "ab".to_string(),
            email: None,
            password: "pw".to_string(),
        };
        let err = validate_body(&req).unwrap_err();
        assert!(err.message.contains("Username"));
    }
}
