/// Validates a YYYY-MM-DD string and returns its parts. Used to check
/// user-entered dates from the chat flows before they reach the store.
pub fn is_valid_date(datestr: &str) -> anyhow::Result<(i32, u32, u32)> {
    let datestr = String::from(datestr);
    let dates = datestr.split('-').collect::<Vec<_>>();
    if dates.len() != 3 {
        return Err(anyhow::Error::msg(datestr));
    }
    let year = dates[0].parse();
    let month = dates[1].parse();
    let day = dates[2].parse();

    if year.is_err() || month.is_err() || day.is_err() {
        return Err(anyhow::Error::msg(datestr));
    }

    let year = year.unwrap();
    let month = month.unwrap();
    let day = day.unwrap();
    if !(1970..=2100).contains(&year) || month < 1 || month > 12 {
        return Err(anyhow::Error::msg(datestr));
    }

    let month_length = get_month_length(year, month);

    if day < 1 || day > month_length {
        return Err(anyhow::Error::msg(datestr));
    }

    Ok((year, month, day))
}

pub fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 100 != 0 && year % 4 == 0)
}

// month: January -> 1
pub fn get_month_length(year: i32, month: u32) -> u32 {
    match month - 1 {
        0 => 31,
        1 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        2 => 31,
        3 => 30,
        4 => 31,
        5 => 30,
        6 => 31,
        7 => 31,
        8 => 30,
        9 => 31,
        10 => 30,
        11 => 31,
        _ => panic!("Invalid month"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_calendar_dates() {
        assert!(is_valid_date("2024-06-10").is_ok());
        assert!(is_valid_date("2024-02-29").is_ok());
        assert!(is_valid_date("2100-12-31").is_ok());
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(is_valid_date("2023-02-29").is_err());
        assert!(is_valid_date("2024-13-01").is_err());
        assert!(is_valid_date("2024-04-31").is_err());
        assert!(is_valid_date("1969-01-01").is_err());
    }

    #[test]
    fn rejects_malformed_strings() {
        assert!(is_valid_date("").is_err());
        assert!(is_valid_date("2024-06").is_err());
        assert!(is_valid_date("10.06.2024").is_err());
        assert!(is_valid_date("year-06-10").is_err());
    }

    #[test]
    fn knows_leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }
}
