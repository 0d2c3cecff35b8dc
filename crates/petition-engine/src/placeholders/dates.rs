//! Long-form Portuguese dates for the `[[data atual]]` placeholder

use chrono::{Datelike, Local, NaiveDate};

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Format a date as written in petitions: "19 de outubro de 2026"
pub fn format_long_date(date: NaiveDate) -> String {
    let month = MONTHS[date.month0() as usize];
    format!("{} de {} de {}", date.day(), month, date.year())
}

/// Today's date in long form, local time
pub fn today_long() -> String {
    format_long_date(Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_long_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(format_long_date(date), "19 de outubro de 2026");
    }

    #[test]
    fn test_format_first_of_march() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(format_long_date(date), "1 de março de 2025");
    }
}
