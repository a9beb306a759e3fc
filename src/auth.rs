use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

use crate::response::json_error;

pub const OPEN_ID_HEADER: &str = "x-open-id";

/// Durable platform identity resolved from an ephemeral login code.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformIdentity {
    pub openid: String,
    pub unionid: Option<String>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("登录凭证不能为空")]
    EmptyCode,
    #[error("无法获取用户身份信息，请检查配置")]
    Unresolvable,
}

/// The external authentication primitive: exchanges a short-lived opaque
/// code for a durable `(openid, unionid?)` pair.
pub trait CredentialExchanger: Send + Sync {
    fn exchange(&self, code: &str) -> Result<PlatformIdentity, AuthError>;
}

/// Default exchanger: derives a stable identity from the code with
/// HMAC-SHA256 over the app secret. The same code always resolves to the
/// same openid, which is all the rest of the system relies on.
pub struct HmacCredentialExchanger {
    secret: String,
}

impl HmacCredentialExchanger {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl CredentialExchanger for HmacCredentialExchanger {
    fn exchange(&self, code: &str) -> Result<PlatformIdentity, AuthError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AuthError::EmptyCode);
        }

        type HmacSha256 = Hmac<Sha256>;
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|_| AuthError::Unresolvable)?;
        mac.update(code.as_bytes());
        let digest = hex::encode(mac.finalize().into_bytes());

        // Platform openids are 28 characters starting with "o".
        Ok(PlatformIdentity {
            openid: format!("o{}", &digest[..27]),
            unionid: None,
        })
    }
}

/// Per-call identity context. The platform injects the caller's openid into
/// every function invocation; here it arrives as a trusted request header.
#[derive(Debug, Clone)]
pub struct AmbientIdentity {
    pub openid: String,
}

pub fn extract_openid(headers: &HeaderMap) -> Option<String> {
    headers
        .get(OPEN_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub async fn require_identity(mut req: Request<Body>, next: Next) -> Response {
    let Some(openid) = extract_openid(req.headers()) else {
        return json_error(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "请先登录").into_response();
    };

    req.extensions_mut().insert(AmbientIdentity { openid });
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exchange_is_deterministic() {
        let exchanger = HmacCredentialExchanger::new("secret");
        let a = exchanger.exchange("code-1").unwrap();
        let b = exchanger.exchange("code-1").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_codes_resolve_distinct_identities() {
        let exchanger = HmacCredentialExchanger::new("secret");
        let a = exchanger.exchange("code-1").unwrap();
        let b = exchanger.exchange("code-2").unwrap();
        assert_ne!(a.openid, b.openid);
    }

    #[test]
    fn openid_has_platform_shape() {
        let exchanger = HmacCredentialExchanger::new("secret");
        let identity = exchanger.exchange("abc").unwrap();
        assert_eq!(identity.openid.len(), 28);
        assert!(identity.openid.starts_with('o'));
    }

    #[test]
    fn empty_code_is_rejected() {
        let exchanger = HmacCredentialExchanger::new("secret");
        assert!(matches!(
            exchanger.exchange("   "),
            Err(AuthError::EmptyCode)
        ));
    }
}
