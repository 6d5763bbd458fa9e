use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Lead record as supplied by the CRM layer. Only identity fields are expected to be populated;
/// everything else falls back to `Unknown`/empty when missing or unrecognised.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: Company,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: LeadSource,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: LeadStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: Priority,
    #[serde(default, deserialize_with = "null_as_default")]
    pub budget: BudgetRange,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timeline: Timeline,
    #[serde(default, deserialize_with = "null_as_default")]
    pub decision_maker: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub interactions: Vec<Interaction>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl LeadRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    pub fn has_job_title(&self) -> bool {
        present(self.job_title.as_deref())
    }

    pub fn has_phone(&self) -> bool {
        present(self.phone.as_deref())
    }

    pub fn has_notes(&self) -> bool {
        present(self.notes.as_deref())
    }

    pub fn email_domain(&self) -> Option<&str> {
        self.email
            .trim()
            .rsplit_once('@')
            .map(|(_, domain)| domain)
            .filter(|domain| !domain.is_empty())
    }

    /// Identifier forwarded to the external model: the stored id, or a stable UUID derived from
    /// the normalized email so repeat submissions of the same person line up.
    pub fn lead_id(&self) -> Option<String> {
        if let Some(id) = self.id.as_deref().filter(|id| !id.trim().is_empty()) {
            return Some(id.trim().to_string());
        }

        let email = self.email.trim().to_ascii_lowercase();
        if email.is_empty() {
            return None;
        }

        Some(Uuid::new_v5(&Uuid::NAMESPACE_DNS, email.as_bytes()).to_string())
    }
}

fn present(value: Option<&str>) -> bool {
    value.map(|value| !value.trim().is_empty()).unwrap_or(false)
}

/// Firmographic block of the lead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub industry: Industry,
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: CompanySize,
    #[serde(default, deserialize_with = "null_as_default")]
    pub revenue: Revenue,
}

impl Company {
    pub fn has_name(&self) -> bool {
        present(self.name.as_deref())
    }
}

/// Logged touchpoint with the lead, stored in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: InteractionType,
    pub date: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub outcome: InteractionOutcome,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub scheduled_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadSource {
    Website,
    Referral,
    #[serde(rename = "Social Media")]
    SocialMedia,
    #[serde(rename = "Email Campaign")]
    EmailCampaign,
    #[serde(rename = "Cold Call")]
    ColdCall,
    #[serde(rename = "Trade Show")]
    TradeShow,
    Other,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Proposal,
    Negotiation,
    #[serde(rename = "Closed Won")]
    ClosedWon,
    #[serde(rename = "Closed Lost")]
    ClosedLost,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetRange {
    #[serde(rename = "<$10K")]
    Under10K,
    #[serde(rename = "$10K-$50K")]
    From10KTo50K,
    #[serde(rename = "$50K-$100K")]
    From50KTo100K,
    #[serde(rename = "$100K-$500K")]
    From100KTo500K,
    #[serde(rename = "$500K+")]
    Over500K,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeline {
    Immediate,
    #[serde(rename = "1-3 months")]
    OneToThreeMonths,
    #[serde(rename = "3-6 months")]
    ThreeToSixMonths,
    #[serde(rename = "6-12 months")]
    SixToTwelveMonths,
    #[serde(rename = "12+ months")]
    OverTwelveMonths,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanySize {
    #[serde(rename = "1-10")]
    Micro,
    #[serde(rename = "11-50")]
    Small,
    #[serde(rename = "51-200")]
    Medium,
    #[serde(rename = "201-1000")]
    Large,
    #[serde(rename = "1000+")]
    Enterprise,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Revenue {
    #[serde(rename = "<$1M")]
    Under1M,
    #[serde(rename = "$1M-$10M")]
    From1MTo10M,
    #[serde(rename = "$10M-$50M")]
    From10MTo50M,
    #[serde(rename = "$50M-$200M")]
    From50MTo200M,
    #[serde(rename = "$200M+")]
    Over200M,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    Technology,
    Healthcare,
    Finance,
    Education,
    Manufacturing,
    Retail,
    #[serde(rename = "Real Estate")]
    RealEstate,
    Consulting,
    Other,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionType {
    Email,
    Call,
    Meeting,
    Demo,
    Note,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionOutcome {
    Positive,
    Neutral,
    Negative,
    #[serde(rename = "No Response")]
    NoResponse,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Treats an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let opt = Option::<T>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}
