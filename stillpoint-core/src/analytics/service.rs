//! Engine-facing analytics service
//!
//! The facade a controller layer calls: validated time windows, a TTL
//! cache in front of the computation, and the fetch-aggregate-compose
//! pipeline behind it. The engine is stateless with respect to its
//! inputs; each request is independently computable.

use super::aggregate::{aggregate, Metric};
use super::datemath::{month_bounds, RequestClock};
use super::emotion::{build_emotion_calendar, EmotionDay};
use super::grid::{generate_year_grid, HeatmapCell};
use super::overview::{summarize, OverviewStats};
use crate::cache::{CacheKey, ViewCache};
use crate::config::AnalyticsConfig;
use crate::db::Database;
use crate::error::{Error, Result};
use crate::types::{DateRange, ViewMode};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;

/// Sane bounds for requested years; anything outside is a client error.
pub const YEAR_MIN: i32 = 2000;
/// Upper bound for requested years.
pub const YEAR_MAX: i32 = 2100;

/// A validated time window for analytics requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Full calendar year
    Year(i32),
    /// Specific month (year, month 1-12)
    Month(i32, u32),
}

impl Window {
    /// Validate a year request.
    pub fn year(year: i32) -> Result<Self> {
        if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
            return Err(Error::InvalidInput(format!(
                "year must be between {} and {}, got {}",
                YEAR_MIN, YEAR_MAX, year
            )));
        }
        Ok(Window::Year(year))
    }

    /// Parse and validate a `YYYY-MM` month request.
    pub fn parse_month(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidInput(format!("month must match YYYY-MM, got {:?}", s));

        let (year_str, month_str) = s.split_once('-').ok_or_else(invalid)?;
        // Digits only; integer parsing alone would admit signs like "2026-+1".
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if year_str.len() != 4
            || month_str.len() != 2
            || !all_digits(year_str)
            || !all_digits(month_str)
        {
            return Err(invalid());
        }
        let year: i32 = year_str.parse().map_err(|_| invalid())?;
        let month: u32 = month_str.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
            return Err(Error::InvalidInput(format!(
                "year must be between {} and {}, got {}",
                YEAR_MIN, YEAR_MAX, year
            )));
        }
        Ok(Window::Month(year, month))
    }

    /// The inclusive date range this window covers.
    ///
    /// Windows only exist with validated fields, so the bounds always
    /// resolve; a malformed window degrades to an empty range instead
    /// of panicking.
    pub fn range(&self) -> DateRange {
        let (year, first, last) = match *self {
            Window::Year(year) => (year, 1, 12),
            Window::Month(year, month) => (year, month, month),
        };
        debug_assert!((YEAR_MIN..=YEAR_MAX).contains(&year));
        match (month_bounds(year, first), month_bounds(year, last)) {
            (Some((start, _)), Some((_, end))) => DateRange::new(start, end),
            _ => DateRange::new(NaiveDate::MAX, NaiveDate::MIN),
        }
    }

    /// Canonical string form, used as the cache-key window component.
    pub fn cache_token(&self) -> String {
        match *self {
            Window::Year(year) => format!("{}", year),
            Window::Month(year, month) => format!("{:04}-{:02}", year, month),
        }
    }
}

/// Cached view payloads, one variant per API surface.
#[derive(Debug, Clone)]
enum CachedView {
    Heatmap(Vec<HeatmapCell>),
    Emotion(Vec<EmotionDay>),
    Overview(OverviewStats),
}

/// The practice analytics engine.
///
/// Read-only over the store; a cache hit short-circuits all computation,
/// a miss computes synchronously and populates the cache before
/// returning. A store error propagates and caches nothing.
pub struct AnalyticsService {
    db: Arc<Database>,
    config: AnalyticsConfig,
    cache: ViewCache<CachedView>,
}

impl AnalyticsService {
    /// Build a service over an open database.
    pub fn new(db: Arc<Database>, config: AnalyticsConfig) -> Self {
        let cache = ViewCache::new(Duration::from_secs(config.cache_ttl_secs));
        Self { db, config, cache }
    }

    /// Year heatmap for one user: the full 53x7 grid per the grid
    /// generator's contract.
    pub fn get_heatmap(
        &self,
        user_id: &str,
        year: i32,
        view: ViewMode,
    ) -> Result<Vec<HeatmapCell>> {
        self.heatmap_at(user_id, year, view, RequestClock::capture())
    }

    pub(crate) fn heatmap_at(
        &self,
        user_id: &str,
        year: i32,
        view: ViewMode,
        clock: RequestClock,
    ) -> Result<Vec<HeatmapCell>> {
        let window = Window::year(year)?;
        let key = CacheKey::new(user_id, &window.cache_token(), view.as_str());

        if let Some(CachedView::Heatmap(cells)) = self.cache.get(&key) {
            tracing::debug!(user_id, year, view = %view, "Heatmap cache hit");
            return Ok(cells);
        }

        let range = window.range();
        let points = match view {
            ViewMode::Duration => {
                let sessions = self.db.fetch_sessions(user_id, Some(range))?;
                aggregate(Metric::DurationSum, &sessions, &[], range)
            }
            ViewMode::Sessions => {
                let sessions = self.db.fetch_sessions(user_id, Some(range))?;
                aggregate(Metric::SessionCount, &sessions, &[], range)
            }
            ViewMode::Mood => {
                let journals = self.db.fetch_journals(user_id, Some(range))?;
                aggregate(Metric::MoodAvg, &[], &journals, range)
            }
        };

        let cells = generate_year_grid(year, &points, clock);
        tracing::info!(
            user_id,
            year,
            view = %view,
            points = points.len(),
            "Computed heatmap"
        );

        self.cache.set(key, CachedView::Heatmap(cells.clone()));
        Ok(cells)
    }

    /// Emotion calendar for a `YYYY-MM` month: one row per journaled date.
    pub fn get_emotion_calendar(&self, user_id: &str, month: &str) -> Result<Vec<EmotionDay>> {
        let window = Window::parse_month(month)?;
        let key = CacheKey::new(user_id, &window.cache_token(), "emotion");

        if let Some(CachedView::Emotion(days)) = self.cache.get(&key) {
            tracing::debug!(user_id, month, "Emotion calendar cache hit");
            return Ok(days);
        }

        let journals = self.db.fetch_journals(user_id, Some(window.range()))?;
        let days = build_emotion_calendar(&journals);
        tracing::info!(user_id, month, rows = days.len(), "Computed emotion calendar");

        self.cache.set(key, CachedView::Emotion(days.clone()));
        Ok(days)
    }

    /// All-time overview stats for one user.
    pub fn get_overview(&self, user_id: &str) -> Result<OverviewStats> {
        self.overview_at(user_id, RequestClock::capture())
    }

    pub(crate) fn overview_at(&self, user_id: &str, clock: RequestClock) -> Result<OverviewStats> {
        let key = CacheKey::new(user_id, "all", "overview");

        if let Some(CachedView::Overview(stats)) = self.cache.get(&key) {
            tracing::debug!(user_id, "Overview cache hit");
            return Ok(stats);
        }

        let sessions = self.db.fetch_sessions(user_id, None)?;
        let journals = self.db.fetch_journals(user_id, None)?;
        let stats = summarize(&sessions, &journals, clock, self.config.top_tools_count);
        tracing::info!(
            user_id,
            sessions = sessions.len(),
            journals = journals.len(),
            "Computed overview"
        );

        self.cache.set(key, CachedView::Overview(stats.clone()));
        Ok(stats)
    }

    /// Drop all cached views (e.g. after a bulk import).
    pub fn invalidate_cache(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{JournalEntry, PracticeSession};
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn service() -> AnalyticsService {
        crate::logging::init_test();
        let db = Database::open_in_memory().unwrap();
        db.migrate().unwrap();
        AnalyticsService::new(Arc::new(db), AnalyticsConfig::default())
    }

    fn seed_session(svc: &AnalyticsService, date: &str, tool: &str, secs: i64) {
        svc.db
            .insert_session(&PracticeSession::new("u1", d(date), tool, secs))
            .unwrap();
    }

    fn seed_journal(svc: &AnalyticsService, date: &str, mood: i64, focus: i64) {
        svc.db
            .insert_journal(&JournalEntry::new("u1", d(date), mood, focus))
            .unwrap();
    }

    #[test]
    fn test_window_year_validation() {
        assert!(Window::year(2026).is_ok());
        assert!(matches!(Window::year(1999), Err(Error::InvalidInput(_))));
        assert!(matches!(Window::year(2101), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_window_month_parsing() {
        assert_eq!(Window::parse_month("2026-03").unwrap(), Window::Month(2026, 3));
        assert_eq!(Window::parse_month("2026-12").unwrap(), Window::Month(2026, 12));
        for bad in [
            "2026-13", "2026-00", "202603", "26-03", "2026-3", "abcd-ef", "2026-+1", "+026-03",
            "2026- 3",
        ] {
            assert!(
                matches!(Window::parse_month(bad), Err(Error::InvalidInput(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_window_ranges() {
        assert_eq!(
            Window::year(2026).unwrap().range(),
            DateRange::new(d("2026-01-01"), d("2026-12-31"))
        );
        assert_eq!(
            Window::parse_month("2024-02").unwrap().range(),
            DateRange::new(d("2024-02-01"), d("2024-02-29"))
        );
    }

    #[test]
    fn test_window_range_covers_boundary_years() {
        assert_eq!(
            Window::year(YEAR_MIN).unwrap().range(),
            DateRange::new(d("2000-01-01"), d("2000-12-31"))
        );
        assert_eq!(
            Window::year(YEAR_MAX).unwrap().range(),
            DateRange::new(d("2100-01-01"), d("2100-12-31"))
        );
    }

    #[test]
    fn test_heatmap_single_mood_journal() {
        let svc = service();
        seed_journal(&svc, "2026-03-15", 4, 3);

        let clock = RequestClock::fixed(d("2026-06-01"));
        let cells = svc.heatmap_at("u1", 2026, ViewMode::Mood, clock).unwrap();

        assert_eq!(cells.len(), 371);
        let hit = cells.iter().find(|c| c.date == d("2026-03-15")).unwrap();
        assert_eq!(hit.value, 4.0);
        assert!(!hit.is_empty);
        assert!(cells
            .iter()
            .filter(|c| !c.is_empty && c.date != d("2026-03-15"))
            .all(|c| c.value == 0.0));
    }

    #[test]
    fn test_heatmap_duration_view_ignores_journals() {
        let svc = service();
        seed_session(&svc, "2026-02-01", "timer", 600);
        seed_journal(&svc, "2026-02-01", 5, 5);

        let clock = RequestClock::fixed(d("2026-06-01"));
        let cells = svc.heatmap_at("u1", 2026, ViewMode::Duration, clock).unwrap();
        let cell = cells.iter().find(|c| c.date == d("2026-02-01")).unwrap();
        assert_eq!(cell.value, 600.0);
    }

    #[test]
    fn test_heatmap_cache_hit_short_circuits() {
        let svc = service();
        seed_session(&svc, "2026-02-01", "timer", 600);

        let clock = RequestClock::fixed(d("2026-06-01"));
        let first = svc.heatmap_at("u1", 2026, ViewMode::Duration, clock).unwrap();

        // A write after the first read is invisible until the TTL lapses.
        seed_session(&svc, "2026-02-02", "timer", 300);
        let second = svc.heatmap_at("u1", 2026, ViewMode::Duration, clock).unwrap();
        assert_eq!(first, second);

        svc.invalidate_cache();
        let third = svc.heatmap_at("u1", 2026, ViewMode::Duration, clock).unwrap();
        assert_ne!(first, third);
    }

    #[test]
    fn test_cache_keys_distinguish_view_modes() {
        let svc = service();
        seed_session(&svc, "2026-02-01", "timer", 600);

        let clock = RequestClock::fixed(d("2026-06-01"));
        let duration = svc.heatmap_at("u1", 2026, ViewMode::Duration, clock).unwrap();
        let sessions = svc.heatmap_at("u1", 2026, ViewMode::Sessions, clock).unwrap();

        let day = |cells: &[HeatmapCell]| {
            cells
                .iter()
                .find(|c| c.date == d("2026-02-01"))
                .unwrap()
                .value
        };
        assert_eq!(day(&duration), 600.0);
        assert_eq!(day(&sessions), 1.0);
    }

    #[test]
    fn test_emotion_calendar_scoped_to_month() {
        let svc = service();
        seed_journal(&svc, "2026-03-15", 4, 3);
        seed_journal(&svc, "2026-04-01", 1, 1);

        let days = svc.get_emotion_calendar("u1", "2026-03").unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, d("2026-03-15"));
        assert_eq!(days[0].avg_mood, 4.0);
    }

    #[test]
    fn test_emotion_calendar_rejects_bad_month() {
        let svc = service();
        assert!(matches!(
            svc.get_emotion_calendar("u1", "2026-13"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_overview_round_trip_on_empty_data() {
        let svc = service();
        let stats = svc.get_overview("u1").unwrap();
        assert_eq!(stats, OverviewStats::default());
    }

    #[test]
    fn test_overview_streak_scenario() {
        // Sessions Jan 1-10 except Jan 5; today is Jan 10.
        let svc = service();
        for day in 1..=10 {
            if day == 5 {
                continue;
            }
            seed_session(&svc, &format!("2026-01-{:02}", day), "timer", 60);
        }

        let stats = svc
            .overview_at("u1", RequestClock::fixed(d("2026-01-10")))
            .unwrap();
        assert_eq!(stats.longest_streak_days, 5);
        assert_eq!(stats.current_streak_days, 5);
        assert_eq!(stats.practice_days, 9);
    }

    #[test]
    fn test_overview_users_are_isolated() {
        let svc = service();
        seed_session(&svc, "2026-01-01", "timer", 600);

        let other = svc
            .overview_at("someone-else", RequestClock::fixed(d("2026-01-01")))
            .unwrap();
        assert_eq!(other.total_sessions, 0);
    }
}
