//! Read-side helpers over [`AppState`]: lookups, aggregation and the
//! groupings the views render (donut chart, grouped history, calendar).
//!
//! Everything here is a pure function of one snapshot. Theme references held
//! by records and plans are weak, so every lookup treats a missing theme as
//! a normal case and the aggregations substitute a fallback label and color.

use chrono::{Datelike, NaiveDate};

use crate::study_model::{AppState, LearningItem, StudyPlan, StudyRecord, Theme};

/// Label shown for records whose theme has been deleted.
pub const UNKNOWN_THEME_LABEL: &str = "Unknown";
/// Swatch color for records whose theme has been deleted.
pub const UNKNOWN_THEME_COLOR: &str = "#ccc";

/// One slice of the study-time distribution, labelled for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeShare {
    pub theme_id: String,
    pub label: String,
    pub color: String,
    pub minutes: i64,
}

/// Records of one calendar month, newest first, as rendered by the history
/// list. `month` is `YYYY-MM`.
#[derive(Debug)]
pub struct MonthGroup<'a> {
    pub month: String,
    pub records: Vec<&'a StudyRecord>,
}

/// Per-day counts for one calendar cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayActivity {
    pub date: NaiveDate,
    pub record_count: usize,
    pub plan_count: usize,
}

impl AppState {
    pub fn theme(&self, id: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.id == id)
    }

    pub fn item(&self, id: &str) -> Option<&LearningItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn record(&self, id: &str) -> Option<&StudyRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn plan(&self, id: &str) -> Option<&StudyPlan> {
        self.plans.iter().find(|p| p.id == id)
    }

    /// Sum of `duration_minutes` across all records.
    pub fn total_minutes(&self) -> i64 {
        self.records.iter().map(|r| r.duration_minutes).sum()
    }

    /// Study time per theme, largest share first.
    ///
    /// Shares of equal size keep the order their theme first appears in the
    /// records. A deleted theme still gets a share, labelled with
    /// [`UNKNOWN_THEME_LABEL`] and [`UNKNOWN_THEME_COLOR`].
    pub fn theme_distribution(&self) -> Vec<ThemeShare> {
        let mut shares: Vec<ThemeShare> = Vec::new();
        for record in &self.records {
            if let Some(share) = shares.iter_mut().find(|s| s.theme_id == record.theme_id) {
                share.minutes += record.duration_minutes;
                continue;
            }
            let (label, color) = match self.theme(&record.theme_id) {
                Some(theme) => (theme.title.clone(), theme.color.clone()),
                None => (
                    UNKNOWN_THEME_LABEL.to_string(),
                    UNKNOWN_THEME_COLOR.to_string(),
                ),
            };
            shares.push(ThemeShare {
                theme_id: record.theme_id.clone(),
                label,
                color,
                minutes: record.duration_minutes,
            });
        }
        shares.sort_by(|a, b| b.minutes.cmp(&a.minutes));
        shares
    }

    /// The most recently created records, newest first, at most `limit`.
    pub fn recent_records(&self, limit: usize) -> Vec<&StudyRecord> {
        let mut records: Vec<&StudyRecord> = self.records.iter().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit);
        records
    }

    /// All records grouped by calendar month, newest month and newest record
    /// first. Within a day, later-created records come first.
    ///
    /// `theme_filter` restricts the listing to one theme.
    pub fn history(&self, theme_filter: Option<&str>) -> Vec<MonthGroup<'_>> {
        let mut records: Vec<&StudyRecord> = match theme_filter {
            Some(theme_id) => self
                .records
                .iter()
                .filter(|r| r.theme_id == theme_id)
                .collect(),
            None => self.records.iter().collect(),
        };
        records.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.created_at.cmp(&a.created_at)));

        let mut groups: Vec<MonthGroup<'_>> = Vec::new();
        for record in records {
            let month = record.date.format("%Y-%m").to_string();
            match groups.last_mut() {
                Some(group) if group.month == month => group.records.push(record),
                _ => groups.push(MonthGroup {
                    month,
                    records: vec![record],
                }),
            }
        }
        groups
    }

    pub fn records_on(&self, date: NaiveDate) -> Vec<&StudyRecord> {
        self.records.iter().filter(|r| r.date == date).collect()
    }

    pub fn plans_on(&self, date: NaiveDate) -> Vec<&StudyPlan> {
        self.plans.iter().filter(|p| p.date == date).collect()
    }

    /// One entry per day of the given month, in order. An out-of-range month
    /// yields an empty vec.
    pub fn month_activity(&self, year: i32, month: u32) -> Vec<DayActivity> {
        let mut day = match NaiveDate::from_ymd_opt(year, month, 1) {
            Some(day) => day,
            None => return Vec::new(),
        };
        let mut days = Vec::new();
        while day.year() == year && day.month() == month {
            days.push(DayActivity {
                date: day,
                record_count: self.records.iter().filter(|r| r.date == day).count(),
                plan_count: self.plans.iter().filter(|p| p.date == day).count(),
            });
            day = match day.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }
        days
    }

    /// Items belonging to one theme, in insertion order.
    pub fn items_for_theme(&self, theme_id: &str) -> Vec<&LearningItem> {
        self.items.iter().filter(|i| i.theme_id == theme_id).collect()
    }

    pub fn item_count_for_theme(&self, theme_id: &str) -> usize {
        self.items.iter().filter(|i| i.theme_id == theme_id).count()
    }
}
