// amoura-backend/src/features/gdpr/services/collector.rs

use crate::features::gdpr::services::sanitizer::{
    sanitize_match, sanitize_report, DataCategory, SanitizedConsent, SanitizedDailySelection,
    SanitizedMatch, SanitizedMessage, SanitizedNotification, SanitizedProfile, SanitizedPushToken,
    SanitizedReport, SanitizedSubscription, SanitizedUser,
};
use crate::repository::{
    consent_repository::ConsentRepository, daily_selection_repository::DailySelectionRepository,
    match_repository::MatchRepository, message_repository::MessageRepository,
    notification_repository::NotificationRepository, profile_repository::ProfileRepository,
    push_token_repository::PushTokenRepository, report_repository::ReportRepository,
    subscription_repository::SubscriptionRepository, user_repository::UserRepository,
};
use crate::db::DbPool;
use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

// Per-category row caps. They bound worst-case latency and artifact size
// regardless of account age or activity.
pub const MAX_MESSAGES: u64 = 5000;
pub const MAX_MATCHES: u64 = 1000;
pub const MAX_DAILY_SELECTIONS: u64 = 365;
pub const MAX_NOTIFICATIONS: u64 = 1000;
pub const MAX_REPORTS: u64 = 500;
pub const MAX_SUBSCRIPTIONS: u64 = 100;
pub const MAX_PUSH_TOKENS: u64 = 100;

/// Export artifact header
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub exported_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub data_categories: Vec<String>,
}

/// Bounded, sanitized snapshot of everything the system holds about one
/// user. Ephemeral - it only exists on its way into an export artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub export_metadata: ExportMetadata,
    pub user: Option<SanitizedUser>,
    pub profile: Option<SanitizedProfile>,
    pub matches: Vec<SanitizedMatch>,
    pub messages: Vec<SanitizedMessage>,
    pub subscriptions: Vec<SanitizedSubscription>,
    pub daily_selections: Vec<SanitizedDailySelection>,
    pub consents: Vec<SanitizedConsent>,
    pub push_tokens: Vec<SanitizedPushToken>,
    pub notifications: Vec<SanitizedNotification>,
    pub reports: Vec<SanitizedReport>,
}

/// Gathers a user's data across all domain repositories.
pub struct DataCollector {
    user_repo: Arc<UserRepository>,
    profile_repo: Arc<ProfileRepository>,
    match_repo: Arc<MatchRepository>,
    message_repo: Arc<MessageRepository>,
    subscription_repo: Arc<SubscriptionRepository>,
    daily_selection_repo: Arc<DailySelectionRepository>,
    consent_repo: Arc<ConsentRepository>,
    push_token_repo: Arc<PushTokenRepository>,
    notification_repo: Arc<NotificationRepository>,
    report_repo: Arc<ReportRepository>,
}

impl DataCollector {
    pub fn new(db: DbPool) -> Self {
        Self {
            user_repo: Arc::new(UserRepository::new(db.clone())),
            profile_repo: Arc::new(ProfileRepository::new(db.clone())),
            match_repo: Arc::new(MatchRepository::new(db.clone())),
            message_repo: Arc::new(MessageRepository::new(db.clone())),
            subscription_repo: Arc::new(SubscriptionRepository::new(db.clone())),
            daily_selection_repo: Arc::new(DailySelectionRepository::new(db.clone())),
            consent_repo: Arc::new(ConsentRepository::new(db.clone())),
            push_token_repo: Arc::new(PushTokenRepository::new(db.clone())),
            notification_repo: Arc::new(NotificationRepository::new(db.clone())),
            report_repo: Arc::new(ReportRepository::new(db)),
        }
    }

    /// Build the snapshot for `user_id`. The user row is read first; the
    /// remaining categories are read concurrently, so total latency is
    /// bounded by the slowest category, not their sum. A user with no data
    /// in a category yields an empty array (or `null` for user/profile),
    /// never an error.
    pub async fn collect(&self, user_id: Uuid) -> Result<ExportSnapshot, DbErr> {
        let user = self.user_repo.find_by_id(user_id).await?;

        let (
            profile,
            matches,
            messages,
            subscriptions,
            daily_selections,
            consents,
            push_tokens,
            notifications,
            reports,
        ) = tokio::join!(
            self.profile_repo.find_by_user_id(user_id),
            self.match_repo.find_by_user_id(user_id, MAX_MATCHES),
            self.message_repo.find_by_sender_id(user_id, MAX_MESSAGES),
            self.subscription_repo
                .find_by_user_id(user_id, MAX_SUBSCRIPTIONS),
            self.daily_selection_repo
                .find_recent_by_user_id(user_id, MAX_DAILY_SELECTIONS),
            self.consent_repo.find_all_by_user_id(user_id),
            self.push_token_repo
                .find_by_user_id(user_id, MAX_PUSH_TOKENS),
            self.notification_repo
                .find_recent_by_user_id(user_id, MAX_NOTIFICATIONS),
            self.report_repo.find_involving_user(user_id, MAX_REPORTS),
        );

        Ok(ExportSnapshot {
            export_metadata: ExportMetadata {
                exported_at: Utc::now(),
                user_id,
                data_categories: DataCategory::ALL
                    .iter()
                    .map(|c| c.as_str().to_string())
                    .collect(),
            },
            user: user.map(SanitizedUser::from),
            profile: profile?.map(SanitizedProfile::from),
            matches: matches?
                .iter()
                .map(|m| sanitize_match(user_id, m))
                .collect(),
            messages: messages?.into_iter().map(SanitizedMessage::from).collect(),
            subscriptions: subscriptions?
                .into_iter()
                .map(SanitizedSubscription::from)
                .collect(),
            daily_selections: daily_selections?
                .into_iter()
                .map(SanitizedDailySelection::from)
                .collect(),
            consents: consents?.into_iter().map(SanitizedConsent::from).collect(),
            push_tokens: push_tokens?
                .into_iter()
                .map(SanitizedPushToken::from)
                .collect(),
            notifications: notifications?
                .into_iter()
                .map(SanitizedNotification::from)
                .collect(),
            reports: reports?
                .iter()
                .map(|r| sanitize_report(user_id, r))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user_model;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn test_user(id: Uuid) -> user_model::Model {
        user_model::Model {
            id,
            email: "alice@example.com".to_string(),
            password_hash: "hash".to_string(),
            is_active: true,
            email_verified: true,
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_collect_empty_account_yields_empty_categories() {
        let user_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // user row first, then nine empty category reads
            .append_query_results([vec![test_user(user_id)]])
            .append_query_results([Vec::<crate::domain::profile_model::Model>::new()])
            .append_query_results([Vec::<crate::domain::match_model::Model>::new()])
            .append_query_results([Vec::<crate::domain::message_model::Model>::new()])
            .append_query_results([Vec::<crate::domain::subscription_model::Model>::new()])
            .append_query_results([Vec::<crate::domain::daily_selection_model::Model>::new()])
            .append_query_results([Vec::<crate::domain::consent_record_model::Model>::new()])
            .append_query_results([Vec::<crate::domain::push_token_model::Model>::new()])
            .append_query_results([Vec::<crate::domain::notification_model::Model>::new()])
            .append_query_results([Vec::<crate::domain::report_model::Model>::new()])
            .into_connection();

        let collector = DataCollector::new(Arc::new(db));
        let snapshot = collector.collect(user_id).await.unwrap();

        assert_eq!(snapshot.export_metadata.user_id, user_id);
        assert_eq!(snapshot.export_metadata.data_categories.len(), 10);
        assert!(snapshot.user.is_some());
        assert!(snapshot.profile.is_none());
        assert!(snapshot.matches.is_empty());
        assert!(snapshot.messages.is_empty());
        assert!(snapshot.subscriptions.is_empty());
        assert!(snapshot.daily_selections.is_empty());
        assert!(snapshot.consents.is_empty());
        assert!(snapshot.push_tokens.is_empty());
        assert!(snapshot.notifications.is_empty());
        assert!(snapshot.reports.is_empty());
    }

    #[test]
    fn test_snapshot_serializes_with_camel_case_keys() {
        let user_id = Uuid::new_v4();
        let snapshot = ExportSnapshot {
            export_metadata: ExportMetadata {
                exported_at: Utc::now(),
                user_id,
                data_categories: DataCategory::ALL
                    .iter()
                    .map(|c| c.as_str().to_string())
                    .collect(),
            },
            user: None,
            profile: None,
            matches: vec![],
            messages: vec![],
            subscriptions: vec![],
            daily_selections: vec![],
            consents: vec![],
            push_tokens: vec![],
            notifications: vec![],
            reports: vec![],
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json.get("exportMetadata").is_some());
        assert!(json["exportMetadata"].get("dataCategories").is_some());
        assert!(json.get("dailySelections").is_some());
        assert!(json.get("pushTokens").is_some());
        assert!(json["user"].is_null());
    }
}
