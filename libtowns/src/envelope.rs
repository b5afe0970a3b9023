//! The uniform wrapper around every response of the locations API
use serde::{Deserialize, Serialize};

/// Every API response is wrapped in an envelope whose `status` field is either
/// `"success"` or `"error"`. A successful response carries `data`, a `message`,
/// or both. An error response only carries a human-readable `message`.
///
/// ```
/// use libtowns::Envelope;
///
/// let json = serde_json::to_string(&Envelope::success(vec![1, 2])).unwrap();
/// assert_eq!(json, r#"{"status":"success","data":[1,2]}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope<T> {
    Success {
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<T>,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Error {
        message: String,
    },
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self::Success {
            data: Some(data),
            message: None,
        }
    }

    /// A successful response that only carries a message
    pub fn message<S: Into<String>>(message: S) -> Self {
        Self::Success {
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn error<S: Into<String>>(message: S) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize() {
        assert_eq!(
            serde_json::to_value(Envelope::success(json!({"id": 1}))).unwrap(),
            json!({"status": "success", "data": {"id": 1}})
        );
        assert_eq!(
            serde_json::to_value(Envelope::<()>::message("Location deleted successfully"))
                .unwrap(),
            json!({"status": "success", "message": "Location deleted successfully"})
        );
        assert_eq!(
            serde_json::to_value(Envelope::<()>::error("Location not found")).unwrap(),
            json!({"status": "error", "message": "Location not found"})
        );
    }

    #[test]
    fn test_deserialize() {
        let env: Envelope<Vec<i64>> =
            serde_json::from_str(r#"{"status":"success","data":[1,2,3]}"#).unwrap();
        assert_eq!(env, Envelope::success(vec![1, 2, 3]));

        let env: Envelope<Vec<i64>> =
            serde_json::from_str(r#"{"status":"error","message":"Error fetching locations"}"#)
                .unwrap();
        assert_eq!(env, Envelope::error("Error fetching locations"));

        let env: Envelope<Vec<i64>> =
            serde_json::from_str(r#"{"status":"success","message":"done"}"#).unwrap();
        assert_eq!(env, Envelope::message("done"));

        assert!(serde_json::from_str::<Envelope<i64>>(r#"{"status":"pending"}"#).is_err());
    }
}
