//! Spreadsheet lead import. Rows exported from the sales team's sheet become [`LeadRecord`]s that
//! the engine can score directly.

use crate::scoring::{Company, LeadRecord};
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read lead export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid lead CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid lead JSON data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses a JSON document holding either one lead or an array of leads.
pub fn leads_from_json(raw: &str) -> Result<Vec<LeadRecord>, ImportError> {
    let value: Value = serde_json::from_str(raw)?;
    let leads: Vec<LeadRecord> = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };

    Ok(leads)
}

pub struct LeadCsvImporter;

impl LeadCsvImporter {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<LeadRecord>, ImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<LeadRecord>, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut leads = Vec::new();
        for record in csv_reader.deserialize::<LeadRow>() {
            let row: LeadRow = record?;
            leads.push(row.into_lead());
        }

        Ok(leads)
    }
}

#[derive(Debug, Deserialize)]
struct LeadRow {
    #[serde(rename = "Email", default)]
    email: String,
    #[serde(rename = "First Name", default)]
    first_name: String,
    #[serde(rename = "Last Name", default)]
    last_name: String,
    #[serde(rename = "Phone", default, deserialize_with = "empty_string_as_none")]
    phone: Option<String>,
    #[serde(rename = "Job Title", default, deserialize_with = "empty_string_as_none")]
    job_title: Option<String>,
    #[serde(rename = "Company", default, deserialize_with = "empty_string_as_none")]
    company: Option<String>,
    #[serde(rename = "Industry", default, deserialize_with = "empty_string_as_none")]
    industry: Option<String>,
    #[serde(
        rename = "Company Size",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    company_size: Option<String>,
    #[serde(rename = "Revenue", default, deserialize_with = "empty_string_as_none")]
    revenue: Option<String>,
    #[serde(rename = "Source", default, deserialize_with = "empty_string_as_none")]
    source: Option<String>,
    #[serde(rename = "Status", default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(rename = "Priority", default, deserialize_with = "empty_string_as_none")]
    priority: Option<String>,
    #[serde(rename = "Budget", default, deserialize_with = "empty_string_as_none")]
    budget: Option<String>,
    #[serde(rename = "Timeline", default, deserialize_with = "empty_string_as_none")]
    timeline: Option<String>,
    #[serde(
        rename = "Decision Maker",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    decision_maker: Option<String>,
    #[serde(rename = "Tags", default, deserialize_with = "empty_string_as_none")]
    tags: Option<String>,
    #[serde(rename = "Notes", default, deserialize_with = "empty_string_as_none")]
    notes: Option<String>,
    #[serde(
        rename = "Created At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    created_at: Option<String>,
}

impl LeadRow {
    fn into_lead(self) -> LeadRecord {
        LeadRecord {
            id: None,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            job_title: self.job_title,
            company: Company {
                name: self.company,
                industry: category(self.industry),
                size: category(self.company_size),
                revenue: category(self.revenue),
            },
            source: category(self.source),
            status: category(self.status),
            priority: category(self.priority),
            budget: category(self.budget),
            timeline: category(self.timeline),
            decision_maker: self.decision_maker.as_deref().map(truthy).unwrap_or(false),
            interactions: Vec::new(),
            notes: self.notes,
            tags: self.tags.as_deref().map(split_tags).unwrap_or_default(),
            created_at: self.created_at.as_deref().and_then(parse_datetime),
        }
    }
}

/// Maps a sheet label onto the same enum the JSON API uses, so both paths agree on spellings.
fn category<T: DeserializeOwned + Default>(label: Option<String>) -> T {
    label
        .and_then(|label| serde_json::from_value(Value::String(label)).ok())
        .unwrap_or_default()
}

fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "yes" | "y" | "true" | "1"
    )
}

fn split_tags(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
