use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::domain::{Award, AwardCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Deadline,
    Value,
    Title,
    CreatedAt,
}

impl SortField {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "deadline" => Some(Self::Deadline),
            "value" => Some(Self::Value),
            "title" => Some(Self::Title),
            "created_at" | "created" => Some(Self::CreatedAt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Asc),
            "desc" | "descending" => Some(Self::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl AwardSort {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    fn compare(&self, left: &Award, right: &Award) -> Ordering {
        let ordering = match self.field {
            SortField::Deadline => left.deadline.cmp(&right.deadline),
            SortField::Value => left.value.cmp(&right.value),
            SortField::Title => left
                .title
                .to_lowercase()
                .cmp(&right.title.to_lowercase()),
            SortField::CreatedAt => left.created_at.cmp(&right.created_at),
        };

        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Browse filter applied to the award store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwardQuery {
    /// `Some(true)` keeps active awards (the default), `None` keeps everything.
    pub active: Option<bool>,
    pub search: Option<String>,
    pub category: Option<AwardCategory>,
    /// Every listed citizenship must appear on the award.
    pub citizenship: Vec<String>,
    pub sort: Option<AwardSort>,
}

impl Default for AwardQuery {
    fn default() -> Self {
        Self {
            active: Some(true),
            search: None,
            category: None,
            citizenship: Vec::new(),
            sort: None,
        }
    }
}

impl AwardQuery {
    pub fn all() -> Self {
        Self {
            active: None,
            ..Self::default()
        }
    }

    pub fn matches(&self, award: &Award) -> bool {
        if let Some(active) = self.active {
            if award.window().is_active() != active {
                return false;
            }
        }

        if let Some(category) = self.category {
            if award.category != category {
                return false;
            }
        }

        if let Some(needle) = self.search_term() {
            let haystacks = [&award.title, &award.description];
            if !haystacks
                .iter()
                .any(|text| text.to_lowercase().contains(&needle))
            {
                return false;
            }
        }

        self.citizenship.iter().all(|wanted| {
            award
                .citizenship
                .iter()
                .any(|offered| offered.trim().eq_ignore_ascii_case(wanted.trim()))
        })
    }

    /// Filter then sort. The sort is stable so ties keep store order.
    pub fn apply<I>(&self, awards: I) -> Vec<Award>
    where
        I: IntoIterator<Item = Award>,
    {
        let mut selected: Vec<Award> = awards
            .into_iter()
            .filter(|award| self.matches(award))
            .collect();

        if let Some(sort) = &self.sort {
            selected.sort_by(|left, right| sort.compare(left, right));
        }

        selected
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }
}
