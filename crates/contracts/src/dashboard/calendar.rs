use chrono::{Datelike, Days, NaiveDate};

/// Cells of a month view
pub const GRID_CELLS: u64 = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for the leading/trailing days of the neighbouring months
    pub in_month: bool,
    pub is_today: bool,
}

/// Six-week grid starting on the Sunday on or before the 1st of the month
pub fn month_grid(year: i32, month: u32, today: NaiveDate) -> Option<Vec<CalendarDay>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let lead = u64::from(first.weekday().num_days_from_sunday());
    let start = first.checked_sub_days(Days::new(lead))?;

    (0..GRID_CELLS)
        .map(|offset| {
            let date = start.checked_add_days(Days::new(offset))?;
            Some(CalendarDay {
                date,
                in_month: date.month() == month,
                is_today: date == today,
            })
        })
        .collect()
}

/// Move `delta` months from (year, month)
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// "October 2026"
pub fn month_title(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn grid_starts_on_sunday_before_the_first() {
        let grid = month_grid(2026, 10, date(2026, 10, 19)).unwrap();
        assert_eq!(grid.len(), 42);
        assert_eq!(grid[0].date, date(2026, 9, 27));
        assert!(!grid[0].in_month);
        assert_eq!(grid[4].date, date(2026, 10, 1));
        assert!(grid[4].in_month);
        assert_eq!(grid.iter().filter(|d| d.in_month).count(), 31);
    }

    #[test]
    fn marks_only_today() {
        let today = date(2026, 10, 19);
        let grid = month_grid(2026, 10, today).unwrap();
        let marked: Vec<_> = grid.iter().filter(|d| d.is_today).collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].date, today);
    }

    #[test]
    fn invalid_month_has_no_grid() {
        assert!(month_grid(2026, 13, date(2026, 1, 1)).is_none());
    }

    #[test]
    fn month_shift_crosses_years() {
        assert_eq!(shift_month(2026, 12, 1), (2027, 1));
        assert_eq!(shift_month(2026, 1, -1), (2025, 12));
        assert_eq!(shift_month(2026, 10, 0), (2026, 10));
    }

    #[test]
    fn title_uses_full_month_name() {
        assert_eq!(month_title(2026, 10), "October 2026");
    }
}
