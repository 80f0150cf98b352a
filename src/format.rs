use chrono::{Datelike, NaiveDate};

use crate::model::BillStatus;

/// Форматирует ISO дату для отображения в таблице: `2004-04-04` -> `4 Avr. 04`.
pub fn format_date(date: &str) -> Result {
    let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| Error::InvalidDate(date.to_owned(), e))?;

    Ok(format!(
        "{} {}. {:02}",
        parsed.day(),
        month(parsed.month0()),
        parsed.year().rem_euclid(100)
    ))
}

fn month(month0: u32) -> &'static str {
    match month0 {
        0 => "Jan",
        1 => "Fév",
        2 => "Mar",
        3 => "Avr",
        4 => "Mai",
        5 => "Jui",
        6 => "Jui",
        7 => "Aoû",
        8 => "Sep",
        9 => "Oct",
        10 => "Nov",
        11 => "Déc",
        _ => unreachable!("unknown month"),
    }
}

/// Человекочитаемый статус.
pub fn format_status(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "En attente",
        BillStatus::Accepted => "Accepté",
        BillStatus::Refused => "Refusé",
    }
}

pub type Result = std::result::Result<String, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid date \"{0}\": {1}")]
    InvalidDate(String, #[source] chrono::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_short_french_date() {
        assert_eq!(format_date("2004-04-04").unwrap(), "4 Avr. 04");
        assert_eq!(format_date("2022-12-25").unwrap(), "25 Déc. 22");
        assert_eq!(format_date("2001-01-01").unwrap(), "1 Jan. 01");
        assert_eq!(format_date("2020-08-15").unwrap(), "15 Aoû. 20");
    }

    #[test]
    fn rejects_corrupted_date() {
        assert!(format_date("2004-13-45").is_err());
        assert!(format_date("").is_err());
        assert!(format_date("04/04/2004").is_err());
    }

    #[test]
    fn status_labels() {
        assert_eq!(format_status(BillStatus::Pending), "En attente");
        assert_eq!(format_status(BillStatus::Accepted), "Accepté");
        assert_eq!(format_status(BillStatus::Refused), "Refusé");
    }
}
