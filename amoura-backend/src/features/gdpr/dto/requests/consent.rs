// amoura-backend/src/features/gdpr/dto/requests/consent.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record a new consent statement. `dataProcessing` must be stated
/// explicitly; `marketing` and `analytics` are opt-out by default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentRequest {
    pub data_processing: bool,
    pub marketing: Option<bool>,
    pub analytics: Option<bool>,
    pub consented_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_processing_is_mandatory() {
        let result: Result<ConsentRequest, _> = serde_json::from_str(r#"{"marketing": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_optional_flags_default_to_absent() {
        let request: ConsentRequest =
            serde_json::from_str(r#"{"dataProcessing": true}"#).unwrap();
        assert!(request.data_processing);
        assert!(request.marketing.is_none());
        assert!(request.analytics.is_none());
        assert!(request.consented_at.is_none());
    }
}
