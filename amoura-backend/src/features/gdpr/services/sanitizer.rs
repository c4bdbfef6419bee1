// amoura-backend/src/features/gdpr/services/sanitizer.rs
//
// Per-category sanitization of collected records before they leave the
// system boundary. One pure transform per exportable category, exhaustively
// matched on `DataCategory`, so adding a new category is a compile-time
// checked change. Every transform is total: partial or missing input maps
// to `None`/empty output, never an error.

use crate::domain::{
    consent_record_model, daily_selection_model, match_model, message_model, notification_model,
    profile_model, push_token_model, report_model, subscription_model, user_model,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exportable data categories. The order here is the order categories are
/// listed in the artifact's `exportMetadata`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataCategory {
    User,
    Profile,
    Matches,
    Messages,
    Subscriptions,
    DailySelections,
    Consents,
    PushTokens,
    Notifications,
    Reports,
}

impl DataCategory {
    pub const ALL: [DataCategory; 10] = [
        DataCategory::User,
        DataCategory::Profile,
        DataCategory::Matches,
        DataCategory::Messages,
        DataCategory::Subscriptions,
        DataCategory::DailySelections,
        DataCategory::Consents,
        DataCategory::PushTokens,
        DataCategory::Notifications,
        DataCategory::Reports,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataCategory::User => "user",
            DataCategory::Profile => "profile",
            DataCategory::Matches => "matches",
            DataCategory::Messages => "messages",
            DataCategory::Subscriptions => "subscriptions",
            DataCategory::DailySelections => "dailySelections",
            DataCategory::Consents => "consents",
            DataCategory::PushTokens => "pushTokens",
            DataCategory::Notifications => "notifications",
            DataCategory::Reports => "reports",
        }
    }
}

/// Account data disclosed to its owner. Credential material (password hash)
/// never appears here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedUser {
    pub id: Uuid,
    pub email: String,
    pub is_active: bool,
    pub email_verified: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<user_model::Model> for SanitizedUser {
    fn from(user: user_model::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_active: user.is_active,
            email_verified: user.email_verified,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedProfile {
    pub display_name: String,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub photo_urls: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl From<profile_model::Model> for SanitizedProfile {
    fn from(profile: profile_model::Model) -> Self {
        Self {
            display_name: profile.display_name,
            birth_date: profile.birth_date,
            gender: profile.gender,
            bio: profile.bio,
            city: profile.city,
            photo_urls: profile.photo_urls,
            created_at: profile.created_at,
        }
    }
}

/// A match as seen from the exporting user's side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedMatch {
    pub id: Uuid,
    pub other_user_id: Option<Uuid>,
    pub matched_at: DateTime<Utc>,
    pub is_active: bool,
}

pub fn sanitize_match(owner_id: Uuid, m: &match_model::Model) -> SanitizedMatch {
    SanitizedMatch {
        id: m.id,
        other_user_id: m.other_side(owner_id),
        matched_at: m.matched_at,
        is_active: m.is_active,
    }
}

/// Message content and timestamps plus the conversation it belongs to;
/// no sender-side metadata beyond that.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedMessage {
    pub id: Uuid,
    pub match_id: Uuid,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

impl From<message_model::Model> for SanitizedMessage {
    fn from(message: message_model::Model) -> Self {
        Self {
            id: message.id,
            match_id: message.match_id,
            content: message.content,
            sent_at: message.sent_at,
            read_at: message.read_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedSubscription {
    pub id: Uuid,
    pub plan: String,
    pub status: String,
    pub started_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<subscription_model::Model> for SanitizedSubscription {
    fn from(subscription: subscription_model::Model) -> Self {
        Self {
            id: subscription.id,
            plan: subscription.plan,
            status: subscription.status,
            started_at: subscription.started_at,
            expires_at: subscription.expires_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedDailySelection {
    pub id: Uuid,
    pub selection_date: NaiveDate,
    pub selected_user_ids: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl From<daily_selection_model::Model> for SanitizedDailySelection {
    fn from(selection: daily_selection_model::Model) -> Self {
        Self {
            id: selection.id,
            selection_date: selection.selection_date,
            selected_user_ids: selection.selected_user_ids,
            created_at: selection.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedConsent {
    pub id: Uuid,
    pub data_processing: bool,
    pub marketing: bool,
    pub analytics: bool,
    pub consented_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl From<consent_record_model::Model> for SanitizedConsent {
    fn from(consent: consent_record_model::Model) -> Self {
        Self {
            id: consent.id,
            data_processing: consent.data_processing,
            marketing: consent.marketing,
            analytics: consent.analytics,
            consented_at: consent.consented_at,
            revoked_at: consent.revoked_at,
            is_active: consent.is_active,
        }
    }
}

/// Raw device tokens stay server-side; only the registration itself is
/// disclosed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedPushToken {
    pub id: Uuid,
    pub platform: String,
    pub created_at: DateTime<Utc>,
}

impl From<push_token_model::Model> for SanitizedPushToken {
    fn from(token: push_token_model::Model) -> Self {
        Self {
            id: token.id,
            platform: token.platform,
            created_at: token.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedNotification {
    pub id: Uuid,
    pub kind: String,
    pub payload: serde_json::Value,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

impl From<notification_model::Model> for SanitizedNotification {
    fn from(notification: notification_model::Model) -> Self {
        Self {
            id: notification.id,
            kind: notification.kind,
            payload: notification.payload,
            sent_at: notification.sent_at,
            read_at: notification.read_at,
        }
    }
}

/// A report as seen from the exporting user's side. The reason is disclosed
/// only for reports the user authored; who reported the user is never
/// disclosed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedReport {
    pub id: Uuid,
    pub filed_by_me: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub fn sanitize_report(owner_id: Uuid, report: &report_model::Model) -> SanitizedReport {
    let filed_by_me = report.reporter_id == owner_id;
    SanitizedReport {
        id: report.id,
        filed_by_me,
        reason: filed_by_me.then(|| report.reason.clone()),
        created_at: report.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_category_list_is_stable() {
        let names: Vec<&str> = DataCategory::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "user",
                "profile",
                "matches",
                "messages",
                "subscriptions",
                "dailySelections",
                "consents",
                "pushTokens",
                "notifications",
                "reports",
            ]
        );
    }

    #[test]
    fn test_user_sanitization_drops_credentials() {
        let user = user_model::Model {
            id: Uuid::new_v4(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$v=19$...".to_string(),
            is_active: true,
            email_verified: true,
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let sanitized = SanitizedUser::from(user.clone());
        let json = serde_json::to_value(&sanitized).unwrap();

        assert_eq!(json["email"], "alice@example.com");
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_match_sanitization_keeps_other_side_only() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let m = match_model::Model {
            id: Uuid::new_v4(),
            user1_id: other,
            user2_id: owner,
            matched_at: Utc::now(),
            is_active: true,
        };

        let sanitized = sanitize_match(owner, &m);
        assert_eq!(sanitized.other_user_id, Some(other));
    }

    #[test]
    fn test_report_against_user_hides_reason() {
        let owner = Uuid::new_v4();
        let report = report_model::Model {
            id: Uuid::new_v4(),
            reporter_id: Uuid::new_v4(),
            reported_user_id: owner,
            reason: "spam".to_string(),
            created_at: Utc::now(),
        };

        let sanitized = sanitize_report(owner, &report);
        assert!(!sanitized.filed_by_me);
        assert!(sanitized.reason.is_none());

        let own_report = report_model::Model {
            reporter_id: owner,
            reported_user_id: Uuid::new_v4(),
            ..report
        };
        let sanitized = sanitize_report(owner, &own_report);
        assert!(sanitized.filed_by_me);
        assert_eq!(sanitized.reason.as_deref(), Some("spam"));
    }

    #[test]
    fn test_push_token_sanitization_drops_raw_token() {
        let token = push_token_model::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            token: "fcm:abc123".to_string(),
            platform: "ios".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(SanitizedPushToken::from(token)).unwrap();
        assert!(json.get("token").is_none());
        assert_eq!(json["platform"], "ios");
    }

    #[test]
    fn test_profile_sanitization_is_total_on_sparse_input() {
        let profile = profile_model::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            display_name: "A".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1995, 6, 1).unwrap(),
            gender: "female".to_string(),
            bio: None,
            city: None,
            photo_urls: serde_json::json!([]),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let sanitized = SanitizedProfile::from(profile);
        assert!(sanitized.bio.is_none());
        assert!(sanitized.city.is_none());
    }
}
