//! Daily → monthly reduction.

use chrono::{Datelike, Months, NaiveDate};

use crate::domain::PricePoint;

/// Keep the last observation of each calendar month, dated at month end.
///
/// Input must be sorted by date.
pub fn month_end_last(points: &[PricePoint]) -> Vec<PricePoint> {
    let mut out: Vec<PricePoint> = Vec::new();
    for p in points {
        let date = month_end(p.date);
        match out.last_mut() {
            Some(last) if last.date == date => last.price = p.price,
            _ => out.push(PricePoint::new(date, p.price)),
        }
    }
    out
}

/// Last calendar day of `date`'s month.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(y: i32, m: u32, d: u32, price: f64) -> PricePoint {
        PricePoint::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), price)
    }

    #[test]
    fn month_end_handles_leap_and_december() {
        assert_eq!(
            month_end(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(
            month_end(NaiveDate::from_ymd_opt(2023, 12, 1).unwrap()),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );
    }

    #[test]
    fn keeps_last_close_per_month() {
        let daily = vec![
            p(2020, 1, 2, 10.0),
            p(2020, 1, 30, 11.0),
            p(2020, 2, 3, 12.0),
            p(2020, 2, 28, 13.0),
            p(2020, 4, 1, 14.0),
        ];
        let monthly = month_end_last(&daily);
        assert_eq!(
            monthly,
            vec![p(2020, 1, 31, 11.0), p(2020, 2, 29, 13.0), p(2020, 4, 30, 14.0)]
        );
    }

    #[test]
    fn empty_stays_empty() {
        assert!(month_end_last(&[]).is_empty());
    }
}
