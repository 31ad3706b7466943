//! # Token Error Handling System
//!
//! 토큰 발급/파싱/검증 전 과정에서 사용하는 단일 에러 체계입니다.
//! `thiserror`로 `Error` trait을 구현하며, 호출자는 메시지 문자열이 아니라
//! [`ErrorKind`]로 실패 원인을 분기할 수 있습니다.
//!
//! ## 에러 분류
//!
//! | JwtError | 발생 시점 |
//! |----------|-----------|
//! | `NilToken` | 빈 토큰 문자열 |
//! | `InvalidKey` | 알고리즘과 키 종류 불일치 |
//! | `UnsupportedAlgorithm` | 알 수 없는 알고리즘 식별자 |
//! | `MalformedToken` | 세그먼트 개수 오류, base64url/JSON 디코딩 실패 |
//! | `SignatureMismatch` | 서명 검증 실패 |
//! | `TokenExpired` | `exp` < 현재 시각 |
//! | `UsedBeforeIssued` | `iat` > 현재 시각 |
//! | `NotYetValid` | `nbf` > 현재 시각 |
//! | `WrongIssuer` | 기대한 발급자와 불일치 |
//! | `WrongAudience` | 기대한 대상과 불일치 |
//!
//! 라이브러리 코드는 실패 시 로그를 남기지 않습니다. 에러를 사용자에게 어떻게
//! 보여줄지는 전적으로 호출자의 책임입니다.
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use auth_token::core::errors::{ErrorKind, JwtError};
//!
//! match service.validate_token(&token, &key, Utc::now(), &options) {
//!     Ok(data) => println!("subject: {}", data.claims().subject),
//!     Err(e) if e.kind() == ErrorKind::TokenExpired => refresh(),
//!     Err(e) => return Err(e),
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// 토큰 문자열의 세 세그먼트
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Header,
    Payload,
    Signature,
}

impl Segment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Header => "header",
            Segment::Payload => "payload",
            Segment::Signature => "signature",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 토큰 처리 전역 에러 타입
///
/// 모든 변형은 입력에 대해 결정적인 결과입니다. 일시적 장애가 아니므로
/// 재시도 대상이 아닙니다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JwtError {
    /// 토큰 문자열이 비어 있음
    #[error("token is nil")]
    NilToken,

    /// 키 종류가 알고리즘과 맞지 않음
    ///
    /// 암호 연산을 시도하기 전에 반환됩니다.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// 알 수 없는 알고리즘 식별자 또는 등록된 서명기가 없음
    #[error("signing algorithm '{0}' is not supported")]
    UnsupportedAlgorithm(String),

    /// 세그먼트 개수가 3이 아니거나 세그먼트 디코딩 실패
    #[error("malformed token {segment}: {reason}")]
    MalformedToken { segment: Segment, reason: String },

    /// 서명이 서명 입력과 일치하지 않음
    #[error("token signature mismatch")]
    SignatureMismatch,

    /// 만료된 토큰 (초 단위 경과 시간)
    #[error("token expired {expired_for}s ago")]
    TokenExpired { expired_for: i64 },

    /// 발급 시각 이전에 사용된 토큰
    #[error("token used {early_by}s before issued")]
    UsedBeforeIssued { early_by: i64 },

    /// 아직 유효 시작 시각(nbf)에 도달하지 않은 토큰
    #[error("token not valid for the next {valid_in}s")]
    NotYetValid { valid_in: i64 },

    /// 발급자 불일치
    #[error("wrong issuer '{actual}', expected '{expected}'")]
    WrongIssuer { expected: String, actual: String },

    /// 대상(audience) 불일치
    #[error("wrong audience '{actual}', expected '{expected}'")]
    WrongAudience { expected: String, actual: String },
}

/// 필드 없는 에러 종류
///
/// `JwtError`의 변형과 1:1로 대응하며, 호출자가 메시지 대신 종류로 분기할 때 사용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NilToken,
    InvalidKey,
    UnsupportedAlgorithm,
    MalformedToken,
    SignatureMismatch,
    TokenExpired,
    UsedBeforeIssued,
    NotYetValid,
    WrongIssuer,
    WrongAudience,
}

impl ErrorKind {
    /// 주어진 에러가 이 종류인지 확인합니다.
    pub fn is_type(&self, err: &JwtError) -> bool {
        err.kind() == *self
    }
}

impl JwtError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            JwtError::NilToken => ErrorKind::NilToken,
            JwtError::InvalidKey(_) => ErrorKind::InvalidKey,
            JwtError::UnsupportedAlgorithm(_) => ErrorKind::UnsupportedAlgorithm,
            JwtError::MalformedToken { .. } => ErrorKind::MalformedToken,
            JwtError::SignatureMismatch => ErrorKind::SignatureMismatch,
            JwtError::TokenExpired { .. } => ErrorKind::TokenExpired,
            JwtError::UsedBeforeIssued { .. } => ErrorKind::UsedBeforeIssued,
            JwtError::NotYetValid { .. } => ErrorKind::NotYetValid,
            JwtError::WrongIssuer { .. } => ErrorKind::WrongIssuer,
            JwtError::WrongAudience { .. } => ErrorKind::WrongAudience,
        }
    }

    /// `MalformedToken` 에러를 생성합니다.
    pub fn malformed(segment: Segment, reason: impl fmt::Display) -> Self {
        JwtError::MalformedToken {
            segment,
            reason: reason.to_string(),
        }
    }

    /// 실패한 세그먼트 (MalformedToken인 경우)
    pub fn segment(&self) -> Option<Segment> {
        match self {
            JwtError::MalformedToken { segment, .. } => Some(*segment),
            _ => None,
        }
    }

    /// 시간 관련 클레임 검증 실패 여부 (exp/iat/nbf)
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            JwtError::TokenExpired { .. }
                | JwtError::UsedBeforeIssued { .. }
                | JwtError::NotYetValid { .. }
        )
    }

    /// 서명 단계의 실패 여부
    pub fn is_signature_failure(&self) -> bool {
        matches!(
            self,
            JwtError::SignatureMismatch | JwtError::InvalidKey(_) | JwtError::UnsupportedAlgorithm(_)
        ) || self.segment() == Some(Segment::Signature)
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type JwtResult<T> = Result<T, JwtError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(JwtError::NilToken.kind(), ErrorKind::NilToken);
        assert_eq!(JwtError::SignatureMismatch.kind(), ErrorKind::SignatureMismatch);
        assert_eq!(
            JwtError::TokenExpired { expired_for: 1 }.kind(),
            ErrorKind::TokenExpired
        );
        assert_eq!(
            JwtError::malformed(Segment::Payload, "bad json").kind(),
            ErrorKind::MalformedToken
        );
    }

    #[test]
    fn test_is_type() {
        let err = JwtError::WrongIssuer {
            expected: "auth-service".to_string(),
            actual: "other".to_string(),
        };
        assert!(ErrorKind::WrongIssuer.is_type(&err));
        assert!(!ErrorKind::WrongAudience.is_type(&err));
    }

    #[test]
    fn test_malformed_names_segment() {
        let err = JwtError::malformed(Segment::Signature, "missing segment");
        assert_eq!(err.segment(), Some(Segment::Signature));
        assert!(err.to_string().contains("signature"));
        assert!(err.is_signature_failure());
    }

    #[test]
    fn test_temporal_predicate() {
        assert!(JwtError::NotYetValid { valid_in: 3 }.is_temporal());
        assert!(JwtError::UsedBeforeIssued { early_by: 3 }.is_temporal());
        assert!(!JwtError::SignatureMismatch.is_temporal());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(JwtError::TokenExpired { expired_for: 5 }.to_string(), "token expired 5s ago");
        assert_eq!(
            JwtError::UnsupportedAlgorithm("none".to_string()).to_string(),
            "signing algorithm 'none' is not supported"
        );
    }
}
