use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::token::{Claims, TokenType};

/// 발급된 토큰 응답 DTO
///
/// 클레임 전체가 아니라 토큰 문자열과 만료 시각만 필요한 호출자에게 반환합니다.
///
/// ```json
/// {"token": "eyJ...", "expiresAt": "2025-01-01T00:00:00Z", "type": "access"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenGrant {
    pub token: String,
    /// 만료 시각 (ISO-8601, `exp`가 없으면 생략)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<TokenType>,
}

impl TokenGrant {
    pub fn new(token: String, claims: &Claims) -> Self {
        Self {
            token,
            expires_at: claims.expires_at_utc(),
            token_type: claims.token_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_serialization() {
        let claims = Claims::new()
            .with_expires_at(1_735_689_600)
            .with_type(TokenType::Access);
        let grant = TokenGrant::new("a.b.c".to_string(), &claims);

        let json = serde_json::to_string(&grant).unwrap();
        assert_eq!(
            json,
            r#"{"token":"a.b.c","expiresAt":"2025-01-01T00:00:00Z","type":"access"}"#
        );
        assert_eq!(serde_json::from_str::<TokenGrant>(&json).unwrap(), grant);
    }

    #[test]
    fn test_grant_without_expiry() {
        let grant = TokenGrant::new("a.b.c".to_string(), &Claims::new());
        assert_eq!(grant.expires_at, None);
        assert_eq!(serde_json::to_string(&grant).unwrap(), r#"{"token":"a.b.c"}"#);
    }
}
