use crate::scanner::DayMatcher;

/// Carves one day's entry out of its containing fragment.
///
/// The entry runs from `start` up to the next day's marker when that marker
/// appears later in the same fragment, otherwise to the end of the fragment.
/// Entries are assumed to appear in calendar order.
pub fn slice_day<'a>(html: &'a str, start: usize, next_day: &DayMatcher) -> &'a str {
    let Some(tail) = html.get(start..) else {
        return "";
    };
    match next_day.first_match(html, Some(start)) {
        Some(end) => {
            tracing::debug!(start, end, next = next_day.label(), "sliced up to next day");
            &html[start..end]
        }
        None => tail,
    }
}
