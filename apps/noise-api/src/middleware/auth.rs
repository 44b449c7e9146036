//! 请求上下文与认证中间件
//!
//! - request_context：在所有请求前注入 request_id/trace_id
//! - require_basic_auth：配置了用户名口令时校验 `Authorization: Basic`
//!
//! 认证失败返回 401 与 `WWW-Authenticate` 质询头；/health 不经过认证。

use api_contract::messages::UNAUTHORIZED;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::Response,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use noise_config::BasicAuthConfig;
use noise_telemetry::new_request_ids;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::{Instrument, info_span, warn};

use crate::utils::error_response;

const BASIC_CHALLENGE: &str = "Basic realm=\"noise-api\"";

/// 请求上下文中间件：注入 request_id/trace_id
pub async fn request_context(mut req: Request<Body>, next: Next) -> Response {
    let ids = new_request_ids();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    req.extensions_mut().insert(ids.clone());

    let span = info_span!(
        "request",
        request_id = %ids.request_id,
        trace_id = %ids.trace_id,
        method = %method,
        path = %path
    );

    let mut response = next.run(req).instrument(span).await;
    response.headers_mut().insert(
        "x-request-id",
        HeaderValue::from_str(&ids.request_id).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    response.headers_mut().insert(
        "x-trace-id",
        HeaderValue::from_str(&ids.trace_id).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    response
}

/// Basic 认证凭据
#[derive(Debug, Clone)]
pub struct BasicCredentials {
    username: String,
    password: String,
}

impl BasicCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// 常量时间比较用户名和口令
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let pass_ok = self.password.as_bytes().ct_eq(password.as_bytes());
        (user_ok & pass_ok).into()
    }

    /// 校验请求头中的 Basic 凭据
    pub fn verify_headers(&self, headers: &HeaderMap) -> bool {
        match basic_credentials(headers) {
            Some((username, password)) => self.verify(&username, &password),
            None => false,
        }
    }
}

impl From<&BasicAuthConfig> for BasicCredentials {
    fn from(config: &BasicAuthConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }
}

/// 从请求头中提取 Basic 用户名和口令
pub fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let header_value = headers.get(header::AUTHORIZATION)?;
    let auth_str = header_value.to_str().ok()?;
    let encoded = auth_str.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Basic 认证中间件
pub async fn require_basic_auth(
    State(credentials): State<Arc<BasicCredentials>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if credentials.verify_headers(req.headers()) {
        return next.run(req).await;
    }
    warn!(target: "noise.api", path = %req.uri().path(), "basic_auth_rejected");
    let mut response = error_response(StatusCode::UNAUTHORIZED, UNAUTHORIZED);
    response.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static(BASIC_CHALLENGE),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn basic_credentials_extracts() {
        // admin:s3cret
        let headers = headers_with("Basic YWRtaW46czNjcmV0");
        assert_eq!(
            basic_credentials(&headers),
            Some(("admin".to_string(), "s3cret".to_string()))
        );
    }

    #[test]
    fn password_may_contain_colon() {
        // admin:a:b
        let headers = headers_with("Basic YWRtaW46YTpi");
        assert_eq!(
            basic_credentials(&headers),
            Some(("admin".to_string(), "a:b".to_string()))
        );
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        assert_eq!(basic_credentials(&headers_with("Bearer token-1")), None);
        assert_eq!(basic_credentials(&headers_with("Basic !!!")), None);
        assert_eq!(basic_credentials(&HeaderMap::new()), None);
    }

    #[test]
    fn verify_requires_both_fields() {
        let credentials = BasicCredentials::new("admin", "s3cret");
        assert!(credentials.verify("admin", "s3cret"));
        assert!(!credentials.verify("admin", "s3cre"));
        assert!(!credentials.verify("root", "s3cret"));
        assert!(credentials.verify_headers(&headers_with("Basic YWRtaW46czNjcmV0")));
    }
}
