//! 路径与查询参数解析
//!
//! 解析失败直接返回带文案的 400 响应，handler 中 `match` 后提前返回。

use crate::utils::response::bad_request_error;
use axum::response::Response;

/// GET /data 未指定 rowsPerPage 时的每页行数
pub const DEFAULT_ROWS_PER_PAGE: i64 = 10;

/// 解析数字 id；非数字返回 None
pub fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// 解析数字 id，失败时返回 400
pub fn require_id(raw: &str, message: &str) -> Result<i64, Response> {
    parse_id(raw).ok_or_else(|| bad_request_error(message))
}

/// 解析可选整数参数：缺省或空串取默认值
pub fn parse_optional_i64(raw: Option<&str>, default: i64, message: &str) -> Result<i64, Response> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value.parse::<i64>().map_err(|_| bad_request_error(message)),
    }
}

/// 解析可选浮点参数：缺省或空串为 None
pub fn parse_optional_f64(raw: Option<&str>, message: &str) -> Result<Option<f64>, Response> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<f64>()
            .map(Some)
            .map_err(|_| bad_request_error(message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn id_must_be_numeric() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("-3"), Some(-3));
        assert_eq!(parse_id("arduino_001"), None);
        let response = require_id("abc", "bad id").expect_err("rejected");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn optional_integer_defaults() {
        assert_eq!(parse_optional_i64(None, 10, "bad").ok(), Some(10));
        assert_eq!(parse_optional_i64(Some(""), 10, "bad").ok(), Some(10));
        assert_eq!(parse_optional_i64(Some("3"), 10, "bad").ok(), Some(3));
        assert!(parse_optional_i64(Some("x"), 10, "bad").is_err());
    }

    #[test]
    fn optional_float() {
        assert_eq!(parse_optional_f64(None, "bad").ok(), Some(None));
        assert_eq!(parse_optional_f64(Some("65.5"), "bad").ok(), Some(Some(65.5)));
        assert!(parse_optional_f64(Some("abc"), "bad").is_err());
    }
}
