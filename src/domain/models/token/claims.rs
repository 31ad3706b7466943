//! JWT 클레임(Payload) 구조체
//!
//! RFC 7519 표준 클레임과 토큰 용도(`type`), 범위(`scope`), 권한 비트마스크,
//! 그리고 확장 필드 맵을 포함합니다. 0 또는 빈 값인 필드는 직렬화 시 생략됩니다.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 토큰 용도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// 인증 토큰
    Auth,
    /// 접근 토큰
    Access,
}

fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// JWT 토큰의 클레임
///
/// ## 클레임 구성
///
/// - `aud`: 토큰 대상
/// - `exp` / `iat` / `nbf`: UNIX 초 단위 시각. 0이면 미설정(검증하지 않음)
/// - `jti`: 토큰 고유 ID
/// - `iss`: 발급자
/// - `sub`: 토큰의 주체 (사용자 ID)
/// - `type`: 토큰 용도 (`auth` | `access`)
/// - `scope`: 토큰 범위
/// - `permissions`: 비트 OR로 결합한 권한
/// - `fields`: 확장 필드
///
/// 서명 입력이 계산된 뒤에는 변경하지 않아야 합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "aud", default, skip_serializing_if = "String::is_empty")]
    pub audience: String,
    #[serde(rename = "exp", default, skip_serializing_if = "is_zero")]
    pub expires_at: i64,
    #[serde(rename = "jti", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "iat", default, skip_serializing_if = "is_zero")]
    pub issued_at: i64,
    #[serde(rename = "iss", default, skip_serializing_if = "String::is_empty")]
    pub issuer: String,
    #[serde(rename = "nbf", default, skip_serializing_if = "is_zero")]
    pub not_before: i64,
    #[serde(rename = "sub", default, skip_serializing_if = "String::is_empty")]
    pub subject: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<TokenType>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scope: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub permissions: i32,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub fields: Map<String, Value>,
}

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    /// `now` 시각에 발급되어 `ttl` 후 만료되는 클레임을 생성합니다.
    ///
    /// 만료 시각이 표현 범위를 벗어나면 `DateTime<Utc>`의 최대/최소값으로 고정됩니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let claims = Claims::issued_now(Utc::now(), Duration::hours(JwtConfig::expiration_hours()))
    ///     .with_subject(user_id)
    ///     .with_type(TokenType::Access);
    /// ```
    pub fn issued_now(now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            issued_at: now.timestamp(),
            expires_at: now
                .checked_add_signed(ttl)
                .unwrap_or(if ttl < Duration::zero() {
                    DateTime::<Utc>::MIN_UTC
                } else {
                    DateTime::<Utc>::MAX_UTC
                })
                .timestamp(),
            ..Self::default()
        }
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    pub fn with_expires_at(mut self, expires_at: i64) -> Self {
        self.expires_at = expires_at;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_issued_at(mut self, issued_at: i64) -> Self {
        self.issued_at = issued_at;
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_not_before(mut self, not_before: i64) -> Self {
        self.not_before = not_before;
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_type(mut self, token_type: TokenType) -> Self {
        self.token_type = Some(token_type);
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn with_permissions(mut self, permissions: i32) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// 요청한 권한 비트가 모두 부여되어 있는지 확인합니다.
    ///
    /// `permissions & mask == mask`
    pub fn has_permission(&self, mask: i32) -> bool {
        self.permissions & mask == mask
    }

    /// 권한 비트를 추가합니다 (비트 OR).
    pub fn grant_permissions(&mut self, mask: i32) {
        self.permissions |= mask;
    }

    /// 만료 시각 (`exp`가 0이면 `None`)
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        if self.expires_at == 0 {
            return None;
        }
        DateTime::from_timestamp(self.expires_at, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const READ: i32 = 0b001;
    const WRITE: i32 = 0b010;
    const ADMIN: i32 = 0b100;

    #[test]
    fn test_zero_values_are_omitted() {
        assert_eq!(serde_json::to_string(&Claims::new()).unwrap(), "{}");

        let claims = Claims::new().with_subject("user-1").with_expires_at(1_700_000_000);
        assert_eq!(
            serde_json::to_string(&claims).unwrap(),
            r#"{"exp":1700000000,"sub":"user-1"}"#
        );
    }

    #[test]
    fn test_wire_field_names() {
        let claims = Claims::new()
            .with_audience("trading-platform")
            .with_expires_at(3)
            .with_id("jti-1")
            .with_issued_at(1)
            .with_issuer("auth-service")
            .with_not_before(2)
            .with_subject("user-1")
            .with_type(TokenType::Access)
            .with_scope("read")
            .with_permissions(READ | WRITE)
            .with_field("tenant", "acme");
        let value = serde_json::to_value(&claims).unwrap();
        for key in [
            "aud", "exp", "jti", "iat", "iss", "nbf", "sub", "type", "scope", "permissions", "fields",
        ] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(value["type"], "access");
        assert_eq!(value["fields"]["tenant"], "acme");

        let parsed: Claims = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, claims);
    }

    #[test]
    fn test_permissions_bitmask() {
        let mut claims = Claims::new().with_permissions(READ);
        assert!(claims.has_permission(READ));
        assert!(!claims.has_permission(READ | WRITE));

        claims.grant_permissions(WRITE);
        assert!(claims.has_permission(READ | WRITE));
        assert!(!claims.has_permission(ADMIN));
        assert!(claims.has_permission(0));
    }

    #[test]
    fn test_issued_now() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = Claims::issued_now(now, Duration::hours(1));
        assert_eq!(claims.issued_at, 1_700_000_000);
        assert_eq!(claims.expires_at, 1_700_003_600);
        assert_eq!(claims.expires_at_utc(), DateTime::from_timestamp(1_700_003_600, 0));
        assert_eq!(Claims::new().expires_at_utc(), None);
    }

    #[test]
    fn test_high_permission_bit_is_negative_on_the_wire() {
        let claims: Claims = serde_json::from_str(r#"{"permissions":-2147483647}"#).unwrap();
        assert!(claims.has_permission(i32::MIN));
        assert!(claims.has_permission(READ));
        assert!(!claims.has_permission(WRITE));

        let mut claims = Claims::new();
        claims.grant_permissions(i32::MIN);
        assert_eq!(serde_json::to_string(&claims).unwrap(), r#"{"permissions":-2147483648}"#);
    }

    #[test]
    fn test_issued_now_saturates_on_overflow() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = Claims::issued_now(now, Duration::MAX);
        assert_eq!(claims.expires_at, DateTime::<Utc>::MAX_UTC.timestamp());

        let claims = Claims::issued_now(now, Duration::MIN);
        assert_eq!(claims.expires_at, DateTime::<Utc>::MIN_UTC.timestamp());
        assert_eq!(claims.issued_at, 1_700_000_000);
    }

    #[test]
    fn test_unknown_payload_fields_ignored() {
        let claims: Claims =
            serde_json::from_str(r#"{"sub":"user-1","roles":["Admin"],"type":"auth"}"#).unwrap();
        assert_eq!(claims.subject, "user-1");
        assert_eq!(claims.token_type, Some(TokenType::Auth));
    }

    #[test]
    fn test_unknown_token_type_rejected() {
        assert!(serde_json::from_str::<Claims>(r#"{"type":"refresh"}"#).is_err());
    }
}
