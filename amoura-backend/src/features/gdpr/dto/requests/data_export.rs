// amoura-backend/src/features/gdpr/dto/requests/data_export.rs

use crate::domain::export_request_model::ExportFormat;
use serde::{Deserialize, Serialize};

/// Create a data export request. An unknown format is rejected at
/// deserialization time, before any state is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExportRequest {
    pub format: ExportFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_formats_parse() {
        let request: CreateExportRequest = serde_json::from_str(r#"{"format": "json"}"#).unwrap();
        assert_eq!(request.format, ExportFormat::Json);

        let request: CreateExportRequest = serde_json::from_str(r#"{"format": "pdf"}"#).unwrap();
        assert_eq!(request.format, ExportFormat::Pdf);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result: Result<CreateExportRequest, _> = serde_json::from_str(r#"{"format": "xml"}"#);
        assert!(result.is_err());
    }
}
