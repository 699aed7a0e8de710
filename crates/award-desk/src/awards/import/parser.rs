use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::awards::domain::{Award, AwardCategory, AwardId};

/// Row-level rejection carrying the 1-based CSV line.
#[derive(Debug)]
pub(crate) struct RowError {
    pub(crate) line: u64,
    pub(crate) reason: String,
}

pub(crate) enum ParseFailure {
    Csv(csv::Error),
    Row(RowError),
}

impl From<csv::Error> for ParseFailure {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub(crate) fn parse_awards<R: Read>(reader: R) -> Result<Vec<Award>, ParseFailure> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut awards = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        let row: AwardRow = record.deserialize(Some(&headers))?;
        let award = row.into_award(line).map_err(ParseFailure::Row)?;
        awards.push(award);
    }

    Ok(awards)
}

#[derive(Debug, Deserialize)]
struct AwardRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Value", default)]
    value: Option<u32>,
    #[serde(rename = "Deadline")]
    deadline: String,
    #[serde(rename = "Active", default, deserialize_with = "empty_string_as_none")]
    active: Option<String>,
    #[serde(rename = "Citizenship", default, deserialize_with = "empty_string_as_none")]
    citizenship: Option<String>,
    #[serde(rename = "Created At", default, deserialize_with = "empty_string_as_none")]
    created_at: Option<String>,
}

impl AwardRow {
    fn into_award(self, line: u64) -> Result<Award, RowError> {
        let reject = |reason: String| RowError { line, reason };

        if self.id.trim().is_empty() {
            return Err(reject("missing award ID".to_string()));
        }

        let category = AwardCategory::parse(&self.category)
            .ok_or_else(|| reject(format!("unknown category '{}'", self.category)))?;

        let deadline = NaiveDate::parse_from_str(self.deadline.trim(), "%Y-%m-%d")
            .map_err(|_| reject(format!("deadline '{}' is not YYYY-MM-DD", self.deadline)))?;

        let is_active = match self.active.as_deref() {
            Some(raw) => Some(
                parse_flag(raw)
                    .ok_or_else(|| reject(format!("active flag '{raw}' is not a boolean")))?,
            ),
            None => None,
        };

        let citizenship = self
            .citizenship
            .as_deref()
            .map(split_citizenship)
            .unwrap_or_default();

        let created_at = match self.created_at.as_deref() {
            Some(raw) => parse_datetime(raw)
                .ok_or_else(|| {
                    reject(format!("created at '{raw}' is not RFC 3339 or YYYY-MM-DD"))
                })?
                .and_utc(),
            None => Default::default(),
        };

        Ok(Award {
            id: AwardId(self.id),
            title: self.title,
            description: self.description,
            category,
            value: self.value.unwrap_or_default(),
            deadline,
            is_active,
            citizenship,
            created_at,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn split_citizenship(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}

#[cfg(test)]
pub(crate) fn parse_datetime_for_tests(value: &str) -> Option<NaiveDateTime> {
    parse_datetime(value)
}

#[cfg(test)]
pub(crate) fn parse_flag_for_tests(value: &str) -> Option<bool> {
    parse_flag(value)
}
