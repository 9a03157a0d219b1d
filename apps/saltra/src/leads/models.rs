use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LeadSource {
    Website,
    Linkedin,
    Conference,
    ColdEmail,
    Referral,
    /// The backend emits this one capitalized.
    #[serde(rename = "Other", alias = "other")]
    Other,
}

impl LeadSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadSource::Website => "website",
            LeadSource::Linkedin => "linkedin",
            LeadSource::Conference => "conference",
            LeadSource::ColdEmail => "cold_email",
            LeadSource::Referral => "referral",
            LeadSource::Other => "Other",
        }
    }
}

/// Pipeline stage. Any stage may move to any other; the backend owns transitions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Negotiation,
    ClosedWon,
    ClosedLost,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Negotiation => "negotiation",
            LeadStatus::ClosedWon => "closed_won",
            LeadStatus::ClosedLost => "closed_lost",
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, LeadStatus::ClosedWon | LeadStatus::ClosedLost)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionType {
    Email,
    Call,
    Meeting,
    Demo,
    FollowUp,
}

/// Score bucket. Computed by the backend; the client only displays it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LeadCategory {
    #[serde(alias = "premium")]
    Premium,
    #[serde(alias = "hot")]
    Hot,
    #[serde(alias = "warm")]
    Warm,
    #[serde(alias = "cold")]
    Cold,
}

impl LeadCategory {
    /// Same thresholds the backend scorer uses: <20 Cold, <50 Warm, <80 Hot, else Premium.
    pub fn from_score(score: f64) -> Self {
        if score < 20.0 {
            LeadCategory::Cold
        } else if score < 50.0 {
            LeadCategory::Warm
        } else if score < 80.0 {
            LeadCategory::Hot
        } else {
            LeadCategory::Premium
        }
    }

    /// Wire name, as the backend emits it.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadCategory::Premium => "Premium",
            LeadCategory::Hot => "Hot",
            LeadCategory::Warm => "Warm",
            LeadCategory::Cold => "Cold",
        }
    }
}

/// A single logged touchpoint with a lead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    #[serde(with = "timestamp")]
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub interaction_type: InteractionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
}

/// Identity and contact fields shared by every lead shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeadBase {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub company_size: u32,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub source: LeadSource,
    #[serde(default)]
    pub status: LeadStatus,
    /// Oldest first, in the order the backend recorded them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactions: Option<Vec<Interaction>>,
}

impl LeadBase {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn interactions(&self) -> &[Interaction] {
        self.interactions.as_deref().unwrap_or(&[])
    }
}

/// A persisted lead as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeadModel {
    #[serde(flatten)]
    pub base: LeadBase,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<LeadCategory>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl LeadModel {
    /// Server category, or the score bucket when the backend left it unset.
    pub fn display_category(&self) -> LeadCategory {
        self.category
            .unwrap_or_else(|| LeadCategory::from_score(self.score))
    }
}

/// Partial patch: only the fields that are set get serialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LeadUpdateSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<LeadSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<LeadStatus>,
}

impl LeadUpdateSchema {
    pub fn is_empty(&self) -> bool {
        *self == LeadUpdateSchema::default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeadListSchema {
    pub leads: Vec<LeadModel>,
}

/// Timestamps arrive as RFC 3339, as naive ISO date-times (Python `datetime`
/// without tzinfo) or as bare dates. Naive values are taken as UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{raw}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    fn sample_lead_json() -> serde_json::Value {
        json!({
            "id": "64c8e71f9b1a8f0012d4f8c9",
            "first_name": "Jane",
            "last_name": "Doe",
            "company": "TechCorp",
            "company_size": 250,
            "email": "user@techcorp.com",
            "job_title": "CTO",
            "phone": "203467546034",
            "source": "website",
            "status": "qualified",
            "interactions": [
                {
                    "date": "2024-11-25T15:30:00Z",
                    "type": "call",
                    "notes": "Reviewed the proposal and discussed next steps.",
                    "owner": "jane.doe@company.com"
                },
                {
                    "date": "2024-11-28T09:00:00",
                    "type": "follow-up",
                    "owner": null
                }
            ],
            "score": 52,
            "category": "Hot",
            "created_at": "2024-11-30T13:14:38.895Z",
            "updated_at": "2024-11-30T13:14:38.895000"
        })
    }

    #[test]
    fn test_lead_model_from_backend_json() {
        let lead: LeadModel = serde_json::from_value(sample_lead_json()).unwrap();
        assert_eq!(lead.base.id.as_deref(), Some("64c8e71f9b1a8f0012d4f8c9"));
        assert_eq!(lead.base.status, LeadStatus::Qualified);
        assert_eq!(lead.base.source, LeadSource::Website);
        assert_eq!(lead.score, 52.0);
        assert_eq!(lead.category, Some(LeadCategory::Hot));
        assert_eq!(lead.created_at, lead.updated_at);
    }

    #[test]
    fn test_interactions_keep_backend_order() {
        let lead: LeadModel = serde_json::from_value(sample_lead_json()).unwrap();
        let interactions = lead.base.interactions();
        assert_eq!(interactions.len(), 2);
        assert_eq!(interactions[0].interaction_type, InteractionType::Call);
        assert_eq!(interactions[1].interaction_type, InteractionType::FollowUp);
        assert_eq!(interactions[1].owner, None);
        assert_eq!(interactions[1].notes, None);
    }

    #[test]
    fn test_mongo_id_alias_accepted() {
        let mut value = sample_lead_json();
        let id = value.as_object_mut().unwrap().remove("id").unwrap();
        value["_id"] = id;
        let lead: LeadModel = serde_json::from_value(value).unwrap();
        assert_eq!(lead.base.id.as_deref(), Some("64c8e71f9b1a8f0012d4f8c9"));
    }

    #[test]
    fn test_missing_status_defaults_to_new() {
        let mut value = sample_lead_json();
        value.as_object_mut().unwrap().remove("status");
        let lead: LeadModel = serde_json::from_value(value).unwrap();
        assert_eq!(lead.base.status, LeadStatus::New);
    }

    #[test]
    fn test_bare_date_timestamp() {
        let ts = timestamp::parse("2024-01-01").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day(), ts.hour()), (2024, 1, 1, 0));
    }

    #[test]
    fn test_rfc3339_offset_normalized_to_utc() {
        let ts = timestamp::parse("2024-11-25T17:30:00+02:00").unwrap();
        assert_eq!(ts.hour(), 15);
    }

    #[test]
    fn test_garbage_timestamp_rejected() {
        assert!(timestamp::parse("yesterday").is_none());
        let mut value = sample_lead_json();
        value["created_at"] = json!("yesterday");
        assert!(serde_json::from_value::<LeadModel>(value).is_err());
    }

    #[test]
    fn test_other_source_casing() {
        assert_eq!(serde_json::to_value(LeadSource::Other).unwrap(), json!("Other"));
        let upper: LeadSource = serde_json::from_value(json!("Other")).unwrap();
        let lower: LeadSource = serde_json::from_value(json!("other")).unwrap();
        assert_eq!(upper, LeadSource::Other);
        assert_eq!(lower, LeadSource::Other);
        assert_eq!(
            serde_json::to_value(LeadSource::ColdEmail).unwrap(),
            json!(LeadSource::ColdEmail.as_str())
        );
    }

    #[test]
    fn test_status_wire_names() {
        for status in [
            LeadStatus::New,
            LeadStatus::Contacted,
            LeadStatus::Qualified,
            LeadStatus::Negotiation,
            LeadStatus::ClosedWon,
            LeadStatus::ClosedLost,
        ] {
            assert_eq!(serde_json::to_value(status).unwrap(), json!(status.as_str()));
        }
        assert!(LeadStatus::ClosedLost.is_closed());
        assert!(!LeadStatus::Negotiation.is_closed());
    }

    #[test]
    fn test_unknown_status_rejected() {
        let mut value = sample_lead_json();
        value["status"] = json!("archived");
        assert!(serde_json::from_value::<LeadModel>(value).is_err());
    }

    #[test]
    fn test_lowercase_category_accepted() {
        let category: LeadCategory = serde_json::from_value(json!("warm")).unwrap();
        assert_eq!(category, LeadCategory::Warm);
    }

    #[test]
    fn test_category_as_str_matches_wire_name() {
        for category in [
            LeadCategory::Premium,
            LeadCategory::Hot,
            LeadCategory::Warm,
            LeadCategory::Cold,
        ] {
            assert_eq!(serde_json::to_value(category).unwrap(), json!(category.as_str()));
        }
    }

    #[test]
    fn test_category_from_score_thresholds() {
        assert_eq!(LeadCategory::from_score(0.0), LeadCategory::Cold);
        assert_eq!(LeadCategory::from_score(19.9), LeadCategory::Cold);
        assert_eq!(LeadCategory::from_score(20.0), LeadCategory::Warm);
        assert_eq!(LeadCategory::from_score(49.0), LeadCategory::Warm);
        assert_eq!(LeadCategory::from_score(50.0), LeadCategory::Hot);
        assert_eq!(LeadCategory::from_score(80.0), LeadCategory::Premium);
        assert_eq!(LeadCategory::from_score(100.0), LeadCategory::Premium);
    }

    #[test]
    fn test_display_category_prefers_server_value() {
        let mut lead: LeadModel = serde_json::from_value(sample_lead_json()).unwrap();
        lead.category = Some(LeadCategory::Premium);
        assert_eq!(lead.display_category(), LeadCategory::Premium);
        lead.category = None;
        assert_eq!(lead.display_category(), LeadCategory::Hot);
    }

    #[test]
    fn test_update_schema_serializes_only_set_fields() {
        let patch = LeadUpdateSchema {
            status: Some(LeadStatus::Contacted),
            phone: Some("+15551234567".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"phone": "+15551234567", "status": "contacted"})
        );
        assert!(!patch.is_empty());
        assert!(LeadUpdateSchema::default().is_empty());
    }

    #[test]
    fn test_full_name() {
        let lead: LeadModel = serde_json::from_value(sample_lead_json()).unwrap();
        assert_eq!(lead.base.full_name(), "Jane Doe");
    }
}
