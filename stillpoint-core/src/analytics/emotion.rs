//! Emotion calendar
//!
//! One row per calendar date with at least one journal entry: average
//! mood and focus for the day plus a representative entry for the client
//! to link to.

use super::aggregate::round1;
use crate::types::JournalEntry;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One emotion-calendar row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionDay {
    /// The calendar date
    pub date: NaiveDate,
    /// Average mood rounded to 1 decimal
    pub avg_mood: f64,
    /// Average focus rounded to 1 decimal
    pub avg_focus: f64,
    /// Earliest-created journal entry for the date; arbitrary but
    /// deterministic when several share a day
    pub representative_journal_id: String,
}

/// Build the emotion calendar from a pre-fetched set of journal entries.
///
/// Dates with no entries produce no row; callers render gaps themselves.
pub fn build_emotion_calendar(journals: &[JournalEntry]) -> Vec<EmotionDay> {
    struct DayAcc<'a> {
        mood_sum: i64,
        focus_sum: i64,
        count: i64,
        representative: &'a JournalEntry,
    }

    let mut days: BTreeMap<NaiveDate, DayAcc> = BTreeMap::new();
    for entry in journals {
        days.entry(entry.date)
            .and_modify(|acc| {
                acc.mood_sum += entry.mood;
                acc.focus_sum += entry.focus;
                acc.count += 1;
                // Earliest created_at wins; id breaks exact timestamp ties.
                let rep = acc.representative;
                if (entry.created_at, &entry.id) < (rep.created_at, &rep.id) {
                    acc.representative = entry;
                }
            })
            .or_insert(DayAcc {
                mood_sum: entry.mood,
                focus_sum: entry.focus,
                count: 1,
                representative: entry,
            });
    }

    days.into_iter()
        .map(|(date, acc)| EmotionDay {
            date,
            avg_mood: round1(acc.mood_sum as f64 / acc.count as f64),
            avg_focus: round1(acc.focus_sum as f64 / acc.count as f64),
            representative_journal_id: acc.representative.id.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn journal(id: &str, date: &str, mood: i64, focus: i64, created_offset_secs: i64) -> JournalEntry {
        let mut entry = JournalEntry::new("u1", d(date), mood, focus);
        entry.id = id.to_string();
        entry.created_at = Utc::now() + Duration::seconds(created_offset_secs);
        entry
    }

    #[test]
    fn test_one_row_per_journaled_date() {
        let journals = vec![
            journal("a", "2026-03-02", 4, 3, 0),
            journal("b", "2026-03-02", 2, 5, 10),
            journal("c", "2026-03-05", 5, 5, 20),
        ];
        let calendar = build_emotion_calendar(&journals);

        assert_eq!(calendar.len(), 2);
        assert_eq!(calendar[0].date, d("2026-03-02"));
        assert_eq!(calendar[0].avg_mood, 3.0);
        assert_eq!(calendar[0].avg_focus, 4.0);
        assert_eq!(calendar[1].date, d("2026-03-05"));
        assert_eq!(calendar[1].avg_mood, 5.0);
    }

    #[test]
    fn test_representative_is_earliest_created() {
        let journals = vec![
            journal("later", "2026-03-02", 4, 3, 100),
            journal("earlier", "2026-03-02", 2, 5, -100),
        ];
        let calendar = build_emotion_calendar(&journals);
        assert_eq!(calendar[0].representative_journal_id, "earlier");
    }

    #[test]
    fn test_averages_round_to_one_decimal() {
        // mood 4, 5, 4 -> 4.333... -> 4.3
        let journals = vec![
            journal("a", "2026-03-02", 4, 1, 0),
            journal("b", "2026-03-02", 5, 2, 1),
            journal("c", "2026-03-02", 4, 2, 2),
        ];
        let calendar = build_emotion_calendar(&journals);
        assert_eq!(calendar[0].avg_mood, 4.3);
        assert_eq!(calendar[0].avg_focus, 1.7);
    }

    #[test]
    fn test_empty_input_yields_empty_calendar() {
        assert!(build_emotion_calendar(&[]).is_empty());
    }
}
