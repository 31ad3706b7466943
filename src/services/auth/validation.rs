//! 클레임 검증 엔진
//!
//! 현재 시각을 인자로 받는 순수 함수입니다. 시계를 직접 읽지 않으므로
//! 경계값(`exp == now` 등)을 정확히 테스트할 수 있습니다.
//!
//! | 클레임 | 실패 조건 | 에러 |
//! |--------|-----------|------|
//! | `exp` | `exp != 0 && exp < now` | `TokenExpired` |
//! | `iat` | `iat != 0 && iat > now` | `UsedBeforeIssued` |
//! | `nbf` | `nbf != 0 && nbf > now` | `NotYetValid` |
//! | `iss` | 기대값이 있고 다름 | `WrongIssuer` |
//! | `aud` | 기대값이 있고 다름 | `WrongAudience` |

use chrono::{DateTime, Utc};

use crate::config::JwtConfig;
use crate::core::errors::{JwtError, JwtResult};
use crate::domain::models::token::Claims;

/// 발급자/대상 기대값
///
/// 빈 문자열은 "지정하지 않음"으로 취급합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// `JWT_ISSUER` / `JWT_AUDIENCE` 환경 변수에서 기대값을 읽습니다.
    pub fn from_env() -> Self {
        Self {
            issuer: JwtConfig::issuer(),
            audience: JwtConfig::audience(),
        }
    }

    fn expected_issuer(&self) -> Option<&str> {
        self.issuer.as_deref().filter(|s| !s.is_empty())
    }

    fn expected_audience(&self) -> Option<&str> {
        self.audience.as_deref().filter(|s| !s.is_empty())
    }
}

/// 클레임을 `now` 기준으로 검증합니다.
///
/// 만료, 발급 시각, 유효 시작 시각, 발급자, 대상 순서로 확인하며 첫 실패에서 멈춥니다.
pub fn validate_claims(
    claims: &Claims,
    now: DateTime<Utc>,
    options: &ValidationOptions,
) -> JwtResult<()> {
    let now = now.timestamp();
    verify_expires_at(claims.expires_at, now)?;
    verify_issued_at(claims.issued_at, now)?;
    verify_not_before(claims.not_before, now)?;
    if let Some(expected) = options.expected_issuer() {
        verify_issuer(&claims.issuer, expected)?;
    }
    if let Some(expected) = options.expected_audience() {
        verify_audience(&claims.audience, expected)?;
    }
    Ok(())
}

/// `exp == now`은 유효합니다.
pub fn verify_expires_at(expires_at: i64, now: i64) -> JwtResult<()> {
    if expires_at != 0 && expires_at < now {
        return Err(JwtError::TokenExpired {
            expired_for: now.saturating_sub(expires_at),
        });
    }
    Ok(())
}

pub fn verify_issued_at(issued_at: i64, now: i64) -> JwtResult<()> {
    if issued_at != 0 && issued_at > now {
        return Err(JwtError::UsedBeforeIssued {
            early_by: issued_at.saturating_sub(now),
        });
    }
    Ok(())
}

pub fn verify_not_before(not_before: i64, now: i64) -> JwtResult<()> {
    if not_before != 0 && not_before > now {
        return Err(JwtError::NotYetValid {
            valid_in: not_before.saturating_sub(now),
        });
    }
    Ok(())
}

pub fn verify_issuer(actual: &str, expected: &str) -> JwtResult<()> {
    if actual != expected {
        return Err(JwtError::WrongIssuer {
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

pub fn verify_audience(actual: &str, expected: &str) -> JwtResult<()> {
    if actual != expected {
        return Err(JwtError::WrongAudience {
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}
