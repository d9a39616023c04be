use crate::domain::CompetitionResult;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};
use tracing::{debug, warn};

// Upstream records drifted over time; keys are tried in this order.
const COMPETITION_ID_KEYS: [&str; 2] = ["id", "competitionId"];
const IDENTITY_KEYS: [&str; 3] = ["userId", "uid", "id"];
const POSITION_KEYS: [&str; 3] = ["position", "rank", "place"];
const ENDED_AT_KEYS: [&str; 3] = ["completedAt", "endDate", "endedAt"];

const RANKINGS_KEY: &str = "rankings";
const PARTICIPANTS_KEY: &str = "participants";
const FALLBACK_FIELD_SIZE: u32 = 2;

/// Extracts `user_id`'s results from raw competition records, using the
/// current time for records without a usable end timestamp.
pub fn transform_competition_data(records: &[Value], user_id: &str) -> Vec<CompetitionResult> {
    transform_competition_data_at(records, user_id, Utc::now())
}

/// Same as [`transform_competition_data`] with an explicit fallback clock.
///
/// Never fails: records without an entry for the user, without a resolvable
/// position, or with a position outside the field are skipped.
pub fn transform_competition_data_at(
    records: &[Value],
    user_id: &str,
    now: DateTime<Utc>,
) -> Vec<CompetitionResult> {
    records
        .iter()
        .filter_map(|record| normalize_record(record, user_id, now))
        .collect()
}

fn normalize_record(
    record: &Value,
    user_id: &str,
    now: DateTime<Utc>,
) -> Option<CompetitionResult> {
    let record = record.as_object()?;
    let competition_id = COMPETITION_ID_KEYS
        .iter()
        .find_map(|key| record.get(*key).and_then(Value::as_str))
        .unwrap_or_default()
        .to_string();

    let Some(entry) = find_user_entry(record, user_id) else {
        debug!("No entry for {} in competition '{}'", user_id, competition_id);
        return None;
    };

    let Some(finish_rank) = POSITION_KEYS
        .iter()
        .find_map(|key| entry.get(*key).and_then(positive_integer))
    else {
        debug!("No position for {} in competition '{}'", user_id, competition_id);
        return None;
    };

    let ended_at = ENDED_AT_KEYS
        .iter()
        .find_map(|key| record.get(*key).and_then(parse_timestamp))
        .unwrap_or_else(|| {
            warn!(
                "Competition '{}' has no end timestamp, using current time",
                competition_id
            );
            now
        });

    let points = entry.get("points").and_then(Value::as_f64).unwrap_or(0.0);

    match CompetitionResult::new(
        competition_id,
        finish_rank,
        field_size(record),
        ended_at,
        points,
    ) {
        Ok(result) => Some(result),
        Err(e) => {
            debug!("Dropping record: {}", e);
            None
        }
    }
}

fn find_user_entry<'a>(
    record: &'a Map<String, Value>,
    user_id: &str,
) -> Option<&'a Map<String, Value>> {
    record
        .get(RANKINGS_KEY)?
        .as_array()?
        .iter()
        .filter_map(Value::as_object)
        .find(|entry| entry_identity(entry).is_some_and(|id| id == user_id))
}

/// The first identity key present on an entry decides who it belongs to.
fn entry_identity(entry: &Map<String, Value>) -> Option<String> {
    let value = IDENTITY_KEYS
        .iter()
        .find_map(|key| entry.get(*key).filter(|v| !v.is_null()))?;

    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn positive_integer(value: &Value) -> Option<u32> {
    let parsed = match value {
        Value::Number(n) => match n.as_u64() {
            Some(v) => Some(v),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f <= u32::MAX as f64)
                .map(|f| f as u64),
        },
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;

    u32::try_from(parsed).ok().filter(|v| *v >= 1)
}

fn field_size(record: &Map<String, Value>) -> u32 {
    [RANKINGS_KEY, PARTICIPANTS_KEY]
        .iter()
        .find_map(|key| {
            record
                .get(*key)
                .and_then(Value::as_array)
                .filter(|list| !list.is_empty())
                .map(|list| list.len())
        })
        .and_then(|len| u32::try_from(len).ok())
        .unwrap_or(FALLBACK_FIELD_SIZE)
}

/// Accepts RFC 3339 strings, bare `YYYY-MM-DD` dates, epoch milliseconds and
/// Firestore timestamp objects.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
                    .map(|naive| naive.and_utc())
            }),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        Value::Object(obj) => {
            let seconds = ["_seconds", "seconds"]
                .iter()
                .find_map(|key| obj.get(*key).and_then(Value::as_i64))?;
            let nanos = ["_nanoseconds", "nanoseconds"]
                .iter()
                .find_map(|key| obj.get(*key).and_then(Value::as_u64))
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0);
            DateTime::<Utc>::from_timestamp(seconds, nanos)
        }
        _ => None,
    }
}
