//! Response envelope used by every proxy endpoint except `/tokenPrice`.

use serde::{Deserialize, Serialize};

/// `{success: true, data}` on success, `{success: false, error}` on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Unwrap the payload, turning a failure envelope into its message.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err("Response envelope missing data".to_string()),
            (false, _) => Err(self.error.unwrap_or_else(|| "Unknown error".to_string())),
        }
    }
}

/// Body-less failure envelope, used where the payload type is irrelevant.
pub type ErrorResponse = ApiResponse<serde_json::Value>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_envelope_shape() {
        let body = serde_json::to_value(ErrorResponse::failure("Failed to fetch tokens")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "success": false, "error": "Failed to fetch tokens" })
        );
    }

    #[test]
    fn test_success_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::ok(serde_json::json!({ "address": "0x1" }))).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "success": true, "data": { "address": "0x1" } })
        );
    }

    #[test]
    fn test_into_result() {
        let ok: ApiResponse<u8> = ApiResponse::ok(7);
        assert_eq!(ok.into_result(), Ok(7));

        let failed: ApiResponse<u8> = ApiResponse::failure("1inch API request failed");
        assert_eq!(failed.into_result(), Err("1inch API request failed".to_string()));
    }

    #[test]
    fn test_failure_envelope_decodes_without_data() {
        let failed: ApiResponse<crate::SwapData> =
            serde_json::from_str(r#"{ "success": false, "error": "1inch API request failed" }"#).unwrap();
        assert_eq!(failed.data, None);
        assert_eq!(failed.into_result(), Err("1inch API request failed".to_string()));
    }
}
