//! 时间格式与时间窗口。
//!
//! 存储中的 `measure_time` 为 UTC、秒精度、`Z` 后缀的 RFC3339 文本，
//! 查询边界必须使用相同格式才能按字符串比较。

use crate::error::ServiceError;
use chrono::{DateTime, Duration, FixedOffset, Months, SecondsFormat, TimeZone, Utc};

/// 房间历史查询窗口（5 周）。
pub const ROOM_HISTORY_DAYS: i64 = 35;

/// 格式化为存储使用的时间文本。
pub fn to_wire(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// 当前时间的存储文本。
pub fn now_wire() -> String {
    to_wire(Utc::now())
}

/// 解析 RFC3339 时间，保留原始时区偏移。
pub fn parse_rfc3339(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok()
}

/// 计算 `date` 所在自然日（按其自身偏移）的 `[开始, 开始 + 24h)`，并转换为 UTC 文本。
pub fn day_window(date: &DateTime<FixedOffset>) -> Result<(String, String), ServiceError> {
    let midnight = date
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| ServiceError::validation("Invalid date"))?;
    let start = date
        .offset()
        .from_local_datetime(&midnight)
        .single()
        .ok_or_else(|| ServiceError::validation("Invalid date"))?;
    let end = start + Duration::hours(24);
    Ok((
        to_wire(start.with_timezone(&Utc)),
        to_wire(end.with_timezone(&Utc)),
    ))
}

/// 房间历史查询起点：`now - 35 天`。
pub fn room_history_since(now: DateTime<Utc>) -> String {
    to_wire(now - Duration::days(ROOM_HISTORY_DAYS))
}

/// 数据保留截止点：`now - months` 个自然月。
pub fn retention_cutoff(now: DateTime<Utc>, months: u32) -> Result<String, ServiceError> {
    now.checked_sub_months(Months::new(months))
        .map(to_wire)
        .ok_or_else(|| ServiceError::internal("retention cutoff out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(value: &str) -> DateTime<Utc> {
        parse_rfc3339(value).expect("date").with_timezone(&Utc)
    }

    #[test]
    fn day_window_in_utc() {
        let date = parse_rfc3339("2025-11-07T15:30:00Z").expect("date");
        let (start, end) = day_window(&date).expect("window");
        assert_eq!(start, "2025-11-07T00:00:00Z");
        assert_eq!(end, "2025-11-08T00:00:00Z");
    }

    #[test]
    fn day_window_uses_date_offset() {
        let date = parse_rfc3339("2025-11-07T01:00:00+02:00").expect("date");
        let (start, end) = day_window(&date).expect("window");
        assert_eq!(start, "2025-11-06T22:00:00Z");
        assert_eq!(end, "2025-11-07T22:00:00Z");
    }

    #[test]
    fn room_history_is_five_weeks() {
        let since = room_history_since(utc("2025-11-07T12:00:00Z"));
        assert_eq!(since, "2025-10-03T12:00:00Z");
    }

    #[test]
    fn retention_uses_calendar_months() {
        let cutoff = retention_cutoff(utc("2025-08-31T08:00:00Z"), 6).expect("cutoff");
        assert_eq!(cutoff, "2025-02-28T08:00:00Z");
    }

    #[test]
    fn wire_format_is_second_precision_utc() {
        let wire = to_wire(utc("2025-11-07T12:00:00.123456+00:00"));
        assert_eq!(wire, "2025-11-07T12:00:00Z");
        assert!(parse_rfc3339("2025-11-07").is_none());
    }
}
