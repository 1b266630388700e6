//! Age and timestamp formatting, following kubectl's conventions.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

/// Parse an RFC 3339 timestamp field, e.g. `metadata.creationTimestamp`.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
}

/// kubectl's short human duration: `45s`, `5m30s`, `3h20m`, `3d5h`, `2y40d`.
pub fn human_duration(d: Duration) -> String {
    let seconds = d.num_seconds();
    if seconds < -1 {
        return "<invalid>".to_string();
    } else if seconds < 0 {
        return "0s".to_string();
    } else if seconds < 60 * 2 {
        return format!("{seconds}s");
    }
    let minutes = seconds / 60;
    if minutes < 10 {
        let s = seconds % 60;
        if s == 0 {
            return format!("{minutes}m");
        }
        return format!("{minutes}m{s}s");
    } else if minutes < 60 * 3 {
        return format!("{minutes}m");
    }
    let hours = minutes / 60;
    if hours < 8 {
        let m = minutes % 60;
        if m == 0 {
            return format!("{hours}h");
        }
        return format!("{hours}h{m}m");
    } else if hours < 48 {
        return format!("{hours}h");
    } else if hours < 24 * 8 {
        let h = hours % 24;
        if h == 0 {
            return format!("{}d", hours / 24);
        }
        return format!("{}d{h}h", hours / 24);
    } else if hours < 24 * 365 * 2 {
        return format!("{}d", hours / 24);
    } else if hours < 24 * 365 * 8 {
        let dy = (hours / 24) % 365;
        if dy == 0 {
            return format!("{}y", hours / 24 / 365);
        }
        return format!("{}y{dy}d", hours / 24 / 365);
    }
    format!("{}y", hours / 24 / 365)
}

/// Age of the timestamp at `value`, or `<unknown>` when it is missing.
pub fn age(value: &Value, now: DateTime<Utc>) -> String {
    match parse_timestamp(value) {
        Some(t) => human_duration(now - t),
        None => "<unknown>".to_string(),
    }
}

/// RFC 1123 style rendering used by describe output.
pub fn rfc1123(value: &Value) -> Option<String> {
    parse_timestamp(value).map(|t| t.format("%a, %d %b %Y %H:%M:%S %z").to_string())
}
