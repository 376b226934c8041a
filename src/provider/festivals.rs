use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Known festival/holiday dates, keyed by (month, day). A day in any year
/// matching one of these pairs is flagged as a festival day. Tunable —
/// not process configuration, just a fixed lookup table.
static FESTIVAL_DAYS: Lazy<HashSet<(u32, u32)>> = Lazy::new(|| {
    [
        (1, 1),   // New Year's Day
        (1, 2),
        (1, 3),
        (2, 3),   // Setsubun
        (2, 11),  // National Foundation Day
        (2, 14),  // Valentine's Day
        (3, 3),   // Hinamatsuri
        (3, 20),  // Vernal Equinox (approximate)
        (4, 29),  // Showa Day
        (5, 3),
        (5, 4),
        (5, 5),   // Golden Week / Children's Day
        (6, 21),  // Summer Solstice (approximate)
        (7, 7),   // Tanabata
        (8, 13),
        (8, 14),
        (8, 15),  // Obon
        (9, 23),  // Autumnal Equinox (approximate)
        (10, 31), // Halloween
        (11, 3),  // Culture Day
        (11, 15), // Shichi-Go-San
        (11, 23), // Labor Thanksgiving Day
        (12, 24),
        (12, 25), // Christmas
        (12, 31), // New Year's Eve
    ]
    .into_iter()
    .collect()
});

/// Per-day festival flags for every date in `[start, end]`, inclusive.
pub fn festivals_in_range(start: NaiveDate, end: NaiveDate) -> Vec<(NaiveDate, bool)> {
    let mut out = Vec::new();
    let mut date = start;
    while date <= end {
        let is_festival = FESTIVAL_DAYS.contains(&(date.month(), date.day()));
        out.push((date, is_festival));
        date = date.succ_opt().expect("date overflow");
    }
    out
}
