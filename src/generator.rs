use crate::errors::SeriesError;
use crate::models::Record;
use crate::series::Series;
use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const STARTING_USERS: f64 = 100.0;

/// Generates `days + 1` consecutive records ending today.
pub fn generate_series(days: u32, seed: Option<u64>) -> Result<Series, SeriesError> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generate_series_at(Local::now().date_naive(), days, &mut rng)
}

/// Random-walk users with weekend-dampened sessions derived from them.
pub fn generate_series_at<R: Rng>(
    end: NaiveDate,
    days: u32,
    rng: &mut R,
) -> Result<Series, SeriesError> {
    let start = end
        .checked_sub_signed(Duration::days(i64::from(days)))
        .ok_or(SeriesError::DateOutOfRange { end, days })?;

    let mut users = STARTING_USERS;
    let mut records = Vec::with_capacity(days as usize + 1);

    for offset in 0..=days {
        let date = start + Duration::days(i64::from(offset));

        let growth = 1.0 + rng.gen_range(-0.03..0.07);
        users = (users * growth).floor();
        let sessions = (users * rng.gen_range(1.5..3.5) * weekend_factor(date)).floor();

        records.push(Record::new(date, users.max(0.0) as u64, sessions.max(0.0) as u64));
    }

    Series::new(records)
}

fn weekend_factor(date: NaiveDate) -> f64 {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => 0.7,
        _ => 1.1,
    }
}
