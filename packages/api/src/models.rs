//! Typed response models, decoded at the API-client boundary.
//!
//! Every endpoint decodes into one of these structs before anything reaches
//! the UI layer; views never see raw JSON. Numeric fields the backend may
//! omit default to zero rather than failing the whole decode.
//!
//! The backend historically served the points balance under two spellings,
//! `total_lingzhi` and `totalLingzhi`. The snake_case form is canonical here;
//! the camelCase one is accepted only as a serde alias during decode.

use serde::{Deserialize, Serialize};

/// The authenticated user's profile as returned by `/api/user/me`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    /// Points balance. Canonical spelling; `totalLingzhi` accepted on decode.
    #[serde(default, alias = "totalLingzhi")]
    pub total_lingzhi: i64,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub is_merchant: bool,
    /// Set when the backend wants the user to fill in mandatory profile
    /// fields; also exposed by `/api/user/require-complete`.
    #[serde(default)]
    pub require_complete: bool,
}

/// Successful credential or token login.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginSuccess {
    pub token: String,
    pub user: UserProfile,
}

/// Today's check-in state for the dashboard card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckinStatus {
    #[serde(default)]
    pub checked_in_today: bool,
    #[serde(default)]
    pub streak: u32,
    /// Points awarded for checking in today (streak bonuses included).
    #[serde(default)]
    pub today_reward: i64,
}

/// Result of completing a check-in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckinResult {
    #[serde(default)]
    pub reward: i64,
    #[serde(default, alias = "totalLingzhi")]
    pub total_lingzhi: i64,
    #[serde(default)]
    pub streak: u32,
}

/// A page of a listing endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Paged<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

impl<T> Default for Paged<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

/// A downloadable resource in the marketplace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Price in points; 0 means free.
    #[serde(default)]
    pub price_lingzhi: i64,
    #[serde(default)]
    pub downloads: u64,
}

/// A community project looking for contributors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub reward_lingzhi: i64,
    #[serde(default)]
    pub status: Option<String>,
}

/// A merchant in the directory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

/// An entry in the news feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

/// A knowledge-base article.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeArticle {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub views: u64,
}

/// A purchasable recharge tier (real currency for points).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RechargeTier {
    pub id: i64,
    /// Points granted by this tier.
    pub lingzhi: i64,
    /// Price in yuan.
    pub price: f64,
    /// Bonus points on top of the base amount.
    #[serde(default)]
    pub bonus: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_profile_decodes_canonical_field() {
        let user: UserProfile = serde_json::from_str(
            r#"{"id": 1, "username": "mei", "total_lingzhi": 420, "level": 3}"#,
        )
        .unwrap();
        assert_eq!(user.total_lingzhi, 420);
        assert_eq!(user.level, 3);
        assert!(!user.is_merchant);
    }

    #[test]
    fn user_profile_accepts_legacy_camel_case_alias() {
        let user: UserProfile =
            serde_json::from_str(r#"{"id": 2, "username": "wu", "totalLingzhi": 7}"#).unwrap();
        assert_eq!(user.total_lingzhi, 7);
    }

    #[test]
    fn user_profile_serializes_only_canonical_spelling() {
        let user: UserProfile =
            serde_json::from_str(r#"{"id": 2, "username": "wu", "totalLingzhi": 7}"#).unwrap();
        let raw = serde_json::to_string(&user).unwrap();
        assert!(raw.contains("total_lingzhi"));
        assert!(!raw.contains("totalLingzhi"));
    }

    #[test]
    fn paged_defaults_when_fields_missing() {
        let page: Paged<Resource> = serde_json::from_str("{}").unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn checkin_status_tolerates_missing_fields() {
        let status: CheckinStatus = serde_json::from_str(r#"{"checked_in_today": true}"#).unwrap();
        assert!(status.checked_in_today);
        assert_eq!(status.streak, 0);
    }
}
