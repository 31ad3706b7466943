//! 토큰 헤더
//!
//! `{"alg": "<식별자>", "typ": "JWT", ...}` 형태입니다. 알 수 없는 필드는
//! 입력 순서대로 보존되어 다시 직렬화될 때 그대로 나갑니다.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::errors::JwtResult;
use crate::services::signing::Algorithm;

/// 고정 토큰 형식 태그
pub const JWT_TYPE: &str = "JWT";

fn default_type() -> String {
    JWT_TYPE.to_string()
}

/// JWT 헤더
///
/// `alg`는 원문 문자열 그대로 보관합니다. 알 수 없는 식별자가 들어 있어도 파싱은
/// 성공하고, 서명 검증 단계에서 `UnsupportedAlgorithm`으로 실패합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// 알고리즘 식별자 (비어 있으면 서명 시 키 종류로 추론)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub alg: String,
    /// 토큰 형식 태그
    #[serde(default = "default_type")]
    pub typ: String,
    /// 그 외 헤더 필드 (kid 등)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            alg: String::new(),
            typ: default_type(),
            extra: Map::new(),
        }
    }
}

impl Header {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            alg: algorithm.to_string(),
            ..Self::default()
        }
    }

    /// 헤더에 지정된 알고리즘
    ///
    /// 비어 있으면 `Ok(None)`, 알 수 없는 식별자면 `JwtError::UnsupportedAlgorithm`
    pub fn algorithm(&self) -> JwtResult<Option<Algorithm>> {
        if self.alg.is_empty() {
            return Ok(None);
        }
        self.alg.parse().map(Some)
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.alg = algorithm.to_string();
    }

    /// `typ`이 JWT인지 확인합니다 (대소문자 무시).
    pub fn is_jwt(&self) -> bool {
        self.typ.eq_ignore_ascii_case(JWT_TYPE)
    }

    /// 추가 헤더 필드를 설정합니다.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// 키 식별자 (`kid`)
    pub fn key_id(&self) -> Option<&str> {
        self.extra.get("kid").and_then(Value::as_str)
    }
}
