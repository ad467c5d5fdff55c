//! Token lookup in submitted form fields.

use auth_driver_sdk::SubmittedFields;

use super::error::DomainError;

const TOKEN_FIELD: &str = "token";

/// Token from the `token` field, or else from the first field whose name ends
/// with `token`.
///
/// The widget posts the token under a form-specific name such as
/// `login-widget-ulogin-token`, hence the suffix match.
///
/// # Errors
///
/// `MissingToken` if no such field exists or its value is empty.
pub fn extract_token(fields: &SubmittedFields) -> Result<&str, DomainError> {
    let token = fields
        .get(TOKEN_FIELD)
        .filter(|v| !v.is_empty())
        .or_else(|| {
            fields
                .iter()
                .find(|(name, _)| name.ends_with(TOKEN_FIELD))
                .map(|(_, value)| value)
        })
        .unwrap_or_default();

    if token.is_empty() {
        return Err(DomainError::MissingToken);
    }
    Ok(token)
}
