//! Calendar heatmap grid generation
//!
//! Produces the fixed-shape year grid (53 week-columns by 7 day-rows,
//! Sunday-aligned) so presentation layers never need their own date math.
//! Years that start on a Sunday still get 53 weeks; trailing over-allocated
//! cells are simply empty.

use super::aggregate::AggregatedPoint;
use super::datemath::{start_of_week_aligned, RequestClock};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of week columns in a year grid.
pub const GRID_WEEKS: u32 = 53;
/// Number of day rows in a week column.
pub const GRID_DAYS: u32 = 7;

/// One (week, day-of-week) grid position for a single calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    /// The date this cell represents
    pub date: NaiveDate,
    /// Week column, 0-52
    pub week_index: u32,
    /// Day row, 0-6, 0 = Sunday
    pub day_of_week: u32,
    /// Aggregated value; forced to 0 for empty cells
    pub value: f64,
    /// True when the cell falls outside the requested year or in the future
    pub is_empty: bool,
}

/// Generate the full 371-cell grid for `year`.
///
/// A cell is empty when its date lies outside `year` or after
/// `clock.today`; empty cells never carry a value, so the grid cannot
/// display a day not yet lived or bleed into adjacent years' data.
/// Non-empty cells with no matching point default to 0 explicitly.
pub fn generate_year_grid(
    year: i32,
    points: &[AggregatedPoint],
    clock: RequestClock,
) -> Vec<HeatmapCell> {
    let origin = start_of_week_aligned(year);
    let by_date: HashMap<NaiveDate, f64> = points.iter().map(|p| (p.date, p.value)).collect();

    let mut cells = Vec::with_capacity((GRID_WEEKS * GRID_DAYS) as usize);
    for week in 0..GRID_WEEKS {
        for day in 0..GRID_DAYS {
            let date = origin + Duration::days((week * GRID_DAYS + day) as i64);
            let is_empty = date.year() != year || date > clock.today;
            let value = if is_empty {
                0.0
            } else {
                by_date.get(&date).copied().unwrap_or(0.0)
            };
            cells.push(HeatmapCell {
                date,
                week_index: week,
                day_of_week: day,
                value,
                is_empty,
            });
        }
    }
    cells
}

/// Maximum value across non-empty cells, for intensity scaling.
pub fn grid_max(cells: &[HeatmapCell]) -> f64 {
    cells
        .iter()
        .filter(|c| !c.is_empty)
        .map(|c| c.value)
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn point(date: &str, value: f64) -> AggregatedPoint {
        AggregatedPoint {
            date: d(date),
            value,
            secondary_count: 1,
        }
    }

    #[test]
    fn test_grid_is_always_371_cells() {
        let clock = RequestClock::fixed(d("2026-12-31"));
        for year in [2023, 2024, 2025, 2026] {
            let cells = generate_year_grid(year, &[], clock);
            assert_eq!(cells.len(), 371, "year {} grid shape", year);
        }
    }

    #[test]
    fn test_cells_indexable_by_week_and_day() {
        let clock = RequestClock::fixed(d("2026-12-31"));
        let cells = generate_year_grid(2026, &[], clock);
        for (i, cell) in cells.iter().enumerate() {
            assert_eq!(cell.week_index, i as u32 / 7);
            assert_eq!(cell.day_of_week, i as u32 % 7);
        }
    }

    #[test]
    fn test_non_empty_exactly_in_year_and_not_future() {
        let clock = RequestClock::fixed(d("2026-06-15"));
        let cells = generate_year_grid(2026, &[], clock);

        for cell in &cells {
            let in_year = cell.date.year() == 2026;
            let lived = cell.date <= clock.today;
            assert_eq!(cell.is_empty, !(in_year && lived), "cell {}", cell.date);
        }

        // Jan 1 through Jun 15 inclusive have been lived in 2026.
        let non_empty = cells.iter().filter(|c| !c.is_empty).count();
        assert_eq!(non_empty, 31 + 28 + 31 + 30 + 31 + 15);
    }

    #[test]
    fn test_values_looked_up_with_zero_default() {
        let clock = RequestClock::fixed(d("2026-12-31"));
        let points = vec![point("2026-03-15", 4.0)];
        let cells = generate_year_grid(2026, &points, clock);

        let hit = cells.iter().find(|c| c.date == d("2026-03-15")).unwrap();
        assert!(!hit.is_empty);
        assert_eq!(hit.value, 4.0);

        let miss = cells.iter().find(|c| c.date == d("2026-03-16")).unwrap();
        assert!(!miss.is_empty);
        assert_eq!(miss.value, 0.0);
    }

    #[test]
    fn test_future_cell_value_forced_to_zero() {
        let clock = RequestClock::fixed(d("2026-03-01"));
        let points = vec![point("2026-03-15", 4.0)];
        let cells = generate_year_grid(2026, &points, clock);

        let cell = cells.iter().find(|c| c.date == d("2026-03-15")).unwrap();
        assert!(cell.is_empty);
        assert_eq!(cell.value, 0.0);
    }

    #[test]
    fn test_adjacent_year_data_never_bleeds() {
        let clock = RequestClock::fixed(d("2026-12-31"));
        // 2025-12-28..31 fall inside the 2026 grid's first week column.
        let points = vec![point("2025-12-30", 9.0)];
        let cells = generate_year_grid(2026, &points, clock);

        let cell = cells.iter().find(|c| c.date == d("2025-12-30")).unwrap();
        assert!(cell.is_empty);
        assert_eq!(cell.value, 0.0);
    }

    #[test]
    fn test_sunday_start_year_keeps_full_grid() {
        // 2023 starts on a Sunday; the grid still over-allocates to 53 weeks.
        let clock = RequestClock::fixed(d("2023-12-31"));
        let cells = generate_year_grid(2023, &[], clock);
        assert_eq!(cells.len(), 371);
        assert_eq!(cells[0].date, d("2023-01-01"));
        // Trailing cells spill into 2024 and stay empty.
        assert!(cells.last().unwrap().is_empty);
    }

    #[test]
    fn test_grid_max_ignores_empty_cells() {
        let clock = RequestClock::fixed(d("2026-03-01"));
        let points = vec![point("2026-02-10", 3.0), point("2026-03-15", 9.0)];
        let cells = generate_year_grid(2026, &points, clock);
        // The 9.0 falls on a future (empty) cell and must not win.
        assert_eq!(grid_max(&cells), 3.0);
    }
}
