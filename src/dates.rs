use chrono::{Datelike, Days, Local, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Textual forms a calendar day may take inside a daily-reader book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePatterns {
    pub month: &'static str,
    pub day: u32,
    variants: [String; 4],
}

impl DatePatterns {
    fn new(month: &'static str, day: u32) -> Self {
        let variants = [
            format!("{month} {day}{}", ordinal_suffix(day)),
            format!("{month} {day}"),
            format!("{} {day}", month.to_uppercase()),
            format!("{day} {month}"),
        ];
        Self {
            month,
            day,
            variants,
        }
    }

    /// Variants in match priority order: ordinal, plain, upper-case month, day-first.
    pub fn variants(&self) -> &[String] {
        &self.variants
    }
}

pub fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Maps a 1-based day-of-year onto `year`. Days past the end of the year roll
/// into the next one.
pub fn calendar_date(day_of_year: u32, year: i32) -> Option<NaiveDate> {
    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    match day_of_year {
        0 => jan_first.checked_sub_days(Days::new(1)),
        n => jan_first.checked_add_days(Days::new(u64::from(n - 1))),
    }
}

pub fn month_name(date: NaiveDate) -> &'static str {
    MONTH_NAMES[date.month0() as usize]
}

pub fn date_patterns_in_year(day_of_year: u32, year: i32) -> Option<DatePatterns> {
    let date = calendar_date(day_of_year, year)?;
    Some(DatePatterns::new(month_name(date), date.day()))
}

/// Patterns for `day_of_year` in the current local year.
pub fn date_patterns(day_of_year: u32) -> Option<DatePatterns> {
    date_patterns_in_year(day_of_year, current_year())
}

/// Patterns for the day after `day_of_year`, used as the end marker of a slice.
pub fn next_day_patterns(day_of_year: u32, year: i32) -> Option<DatePatterns> {
    date_patterns_in_year(day_of_year.checked_add(1)?, year)
}

pub fn current_year() -> i32 {
    Local::now().year()
}

pub fn today_ordinal() -> u32 {
    Local::now().ordinal()
}
