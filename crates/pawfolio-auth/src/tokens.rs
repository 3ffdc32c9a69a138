//! Token wire types

use serde::{Deserialize, Serialize};

/// The token pair issued by the backend on login and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Bearer token attached to API requests
    pub access_token: String,
    /// Long-lived token used to obtain new access tokens
    pub refresh_token: String,
    /// Usually "Bearer"
    pub token_type: String,
}

/// Response from the refresh endpoint
///
/// Any 2xx response must carry at least a new access token. The refresh
/// token is only present when the backend rotates it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_type: Option<String>,
}

/// Body of the refresh request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshRequest {
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_pair_wire_names() {
        let pair = TokenPair {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            token_type: "Bearer".to_string(),
        };

        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(json["accessToken"], "a");
        assert_eq!(json["refreshToken"], "r");
        assert_eq!(json["tokenType"], "Bearer");
    }

    #[test]
    fn test_token_response_without_rotation() {
        let response: TokenResponse =
            serde_json::from_str(r#"{"accessToken":"new"}"#).unwrap();
        assert_eq!(response.access_token, "new");
        assert!(response.refresh_token.is_none());
        assert!(response.token_type.is_none());
    }
}
