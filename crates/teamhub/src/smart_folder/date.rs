//! Date relations evaluated in local time

use crate::models::DateConditionValue;
use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeZone, Utc};

/// Midnight at the start of `date` in `tz`, as an instant.
///
/// When midnight does not exist in `tz` (a DST gap) the day starts at the
/// first whole hour that does.
pub fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&naive).earliest() {
        Some(local) => local.with_timezone(&Utc),
        // Midnight skipped by a DST change: the day starts at the end of the gap
        None => (1..=3)
            .filter_map(|hour| date.and_hms_opt(hour, 0, 0))
            .find_map(|t| tz.from_local_datetime(&t).earliest())
            .map(|local| local.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive)),
    }
}

/// Truncate a timestamp to local midnight of the day it falls on in `tz`
pub fn localize_date<Tz: TimeZone>(ts: &DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    local_midnight(ts.with_timezone(tz).date_naive(), tz)
}

/// Shift a timestamp by whole calendar days in `tz`, keeping its wall time
pub fn add_local_days<Tz: TimeZone>(ts: &DateTime<Utc>, days: i64, tz: &Tz) -> DateTime<Utc> {
    let local = ts.with_timezone(tz).naive_local();
    let shifted = if days >= 0 {
        local.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        local.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    let Some(shifted) = shifted else {
        return *ts;
    };
    match tz.from_local_datetime(&shifted).earliest() {
        Some(local) => local.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&shifted),
    }
}

/// Whether `target` satisfies `relation`, anchored on `now`.
///
/// Both `now` and `target` are localized to midnight first. Dates carried by
/// the relation itself are compared as given.
pub fn date_relation_holds<Tz: TimeZone>(
    target: &DateTime<Utc>,
    relation: &DateConditionValue,
    now: &DateTime<Tz>,
) -> bool {
    let tz = now.timezone();
    let today_date = now.date_naive();
    let today = local_midnight(today_date, &tz);
    let tomorrow = today_date
        .succ_opt()
        .map(|d| local_midnight(d, &tz))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    let target = localize_date(target, &tz);

    let days_ago = |days: u64| {
        today_date
            .checked_sub_days(Days::new(days))
            .map(|d| local_midnight(d, &tz))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    };

    match relation {
        DateConditionValue::Today => target >= today && target < tomorrow,
        DateConditionValue::Last7Days => target >= days_ago(7) && target < tomorrow,
        DateConditionValue::Last30Days => target >= days_ago(30) && target < tomorrow,
        DateConditionValue::After { date } => target >= *date,
        DateConditionValue::Before { date } => target < *date,
        DateConditionValue::Specific { date } => {
            target >= *date && target < add_local_days(date, 1, &tz)
        }
        DateConditionValue::Between { from, to } => target >= *from && target <= *to,
        DateConditionValue::Unknown => false,
    }
}
