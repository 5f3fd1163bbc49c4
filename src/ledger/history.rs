use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::str::FromStr;

use super::types::EmissionRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Date,
    Emission,
    Cost,
    Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Search, filter and sort settings for browsing ledger records.
///
/// The default query keeps everything, newest date first.
#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    /// Case-insensitive substring matched against item and category
    pub search: Option<String>,
    /// Category label to keep; "all" disables the filter
    pub category: Option<String>,
    /// Keep only records dated on or after this day
    pub since: Option<NaiveDate>,
    pub sort_by: SortKey,
    pub order: SortOrder,
}

/// Totals over a filtered set of records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySummary {
    pub count: usize,
    pub total_emission: f64,
    pub total_cost: f64,
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(SortKey::Date),
            "emission" => Ok(SortKey::Emission),
            "cost" => Ok(SortKey::Cost),
            "category" => Ok(SortKey::Category),
            other => bail!(
                "Invalid sort key '{}' (expected date, emission, cost or category)",
                other
            ),
        }
    }
}

impl HistoryQuery {
    /// Set `since` to `today` minus a human-readable duration such as "7d" or "2weeks".
    pub fn since_duration(mut self, today: NaiveDate, window: &str) -> Result<Self> {
        let duration = humantime::parse_duration(window.trim())
            .with_context(|| format!("Invalid time window '{}'", window))?;
        let duration = chrono::Duration::from_std(duration)
            .with_context(|| format!("Time window '{}' is too large", window))?;
        let since = today
            .checked_sub_signed(duration)
            .with_context(|| format!("Time window '{}' is too large", window))?;
        self.since = Some(since);
        Ok(self)
    }

    /// Filtered and sorted view of `records`
    pub fn apply<'a>(&self, records: &'a [EmissionRecord]) -> Vec<&'a EmissionRecord> {
        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"));

        let mut matched: Vec<&EmissionRecord> = records
            .iter()
            .filter(|r| match &search {
                Some(term) => {
                    r.item.to_lowercase().contains(term)
                        || r.category.to_lowercase().contains(term)
                }
                None => true,
            })
            .filter(|r| match category {
                Some(c) => r.category.eq_ignore_ascii_case(c),
                None => true,
            })
            .filter(|r| match self.since {
                Some(since) => r.date >= since,
                None => true,
            })
            .collect();

        matched.sort_by(|a, b| {
            let ordering = compare(a, b, self.sort_by);
            match self.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        matched
    }
}

fn compare(a: &EmissionRecord, b: &EmissionRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.date.cmp(&b.date),
        SortKey::Emission => a
            .emission
            .partial_cmp(&b.emission)
            .unwrap_or(Ordering::Equal),
        SortKey::Cost => a
            .cost_or_zero()
            .partial_cmp(&b.cost_or_zero())
            .unwrap_or(Ordering::Equal),
        SortKey::Category => a.category.cmp(&b.category),
    }
}

/// Count and sum a set of records
pub fn summarize(records: &[&EmissionRecord]) -> HistorySummary {
    HistorySummary {
        count: records.len(),
        total_emission: records.iter().map(|r| r.emission).sum(),
        total_cost: records.iter().map(|r| r.cost_or_zero()).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        id: u64,
        day: u32,
        category: &str,
        item: &str,
        emission: f64,
        cost: Option<f64>,
    ) -> EmissionRecord {
        EmissionRecord {
            id,
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            category: category.to_string(),
            item: item.to_string(),
            emission,
            cost,
        }
    }

    fn sample_records() -> Vec<EmissionRecord> {
        vec![
            record(1, 14, "Transport", "Car Journey - 15km", 3.2, Some(5.5)),
            record(2, 14, "Electricity", "Home Usage - 12kWh", 5.4, Some(15.2)),
            record(3, 13, "Food", "Beef Meal", 8.1, Some(12.0)),
            record(4, 10, "Shopping", "Online Purchase", 2.3, None),
        ]
    }

    fn ids(records: &[&EmissionRecord]) -> Vec<u64> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_default_query_sorts_newest_first() {
        let records = sample_records();
        let result = HistoryQuery::default().apply(&records);
        assert_eq!(result.len(), 4);
        assert_eq!(result[3].id, 4);
        // Same-day records keep their relative order under a stable sort
        assert_eq!(ids(&result[..2]), vec![1, 2]);
    }

    #[test]
    fn test_search_matches_item_and_category() {
        let records = sample_records();
        let query = HistoryQuery {
            search: Some("BEEF".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&records)), vec![3]);

        let query = HistoryQuery {
            search: Some("electric".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&records)), vec![2]);
    }

    #[test]
    fn test_category_filter() {
        let records = sample_records();
        let query = HistoryQuery {
            category: Some("food".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&records)), vec![3]);

        let query = HistoryQuery {
            category: Some("all".to_string()),
            ..Default::default()
        };
        assert_eq!(query.apply(&records).len(), 4);
    }

    #[test]
    fn test_sort_by_emission_ascending() {
        let records = sample_records();
        let query = HistoryQuery {
            sort_by: SortKey::Emission,
            order: SortOrder::Asc,
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&records)), vec![4, 1, 2, 3]);
    }

    #[test]
    fn test_sort_by_cost_treats_missing_as_zero() {
        let records = sample_records();
        let query = HistoryQuery {
            sort_by: SortKey::Cost,
            order: SortOrder::Desc,
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&records)), vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_sort_by_category() {
        let records = sample_records();
        let query = HistoryQuery {
            sort_by: SortKey::Category,
            order: SortOrder::Asc,
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&records)), vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_since_duration() {
        let records = sample_records();
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let query = HistoryQuery::default().since_duration(today, "2d").unwrap();
        assert_eq!(query.since, NaiveDate::from_ymd_opt(2025, 1, 13));
        assert_eq!(ids(&query.apply(&records)), vec![1, 2, 3]);
    }

    #[test]
    fn test_since_duration_invalid() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert!(HistoryQuery::default().since_duration(today, "soon").is_err());
    }

    #[test]
    fn test_summarize() {
        let records = sample_records();
        let query = HistoryQuery {
            search: Some("o".to_string()),
            ..Default::default()
        };
        let matched = query.apply(&records);
        let summary = summarize(&matched);
        assert_eq!(summary.count, matched.len());

        let all: Vec<&EmissionRecord> = records.iter().collect();
        let summary = summarize(&all);
        assert_eq!(summary.count, 4);
        assert!((summary.total_emission - 19.0).abs() < 1e-9);
        assert!((summary.total_cost - 32.7).abs() < 1e-9);
    }

    #[test]
    fn test_parse_sort_key() {
        assert_eq!("Emission".parse::<SortKey>().unwrap(), SortKey::Emission);
        assert!("size".parse::<SortKey>().is_err());
    }
}
