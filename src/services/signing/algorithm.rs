//! 서명 알고리즘 식별자
//!
//! JWS 알고리즘 식별자(`HS256` ~ `ES512`)를 닫힌 열거형으로 표현합니다.
//! 식별자 비교는 대소문자를 구분하는 정확한 일치입니다 (`hs256`은 거부됩니다).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::core::errors::JwtError;

/// 지원하는 서명 알고리즘
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Algorithm {
    HS256,
    HS384,
    HS512,
    RS256,
    RS384,
    RS512,
    ES256,
    ES384,
    ES512,
}

/// 알고리즘 계열 (키 종류 계약을 결정)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmFamily {
    Hmac,
    Rsa,
    Ecdsa,
}

/// 서명 입력에 적용하는 해시 함수
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashFunction {
    Sha256,
    Sha384,
    Sha512,
}

impl HashFunction {
    pub fn digest(&self, input: &[u8]) -> Vec<u8> {
        match self {
            HashFunction::Sha256 => Sha256::digest(input).to_vec(),
            HashFunction::Sha384 => Sha384::digest(input).to_vec(),
            HashFunction::Sha512 => Sha512::digest(input).to_vec(),
        }
    }
}

impl Algorithm {
    pub const ALL: [Algorithm; 9] = [
        Algorithm::HS256,
        Algorithm::HS384,
        Algorithm::HS512,
        Algorithm::RS256,
        Algorithm::RS384,
        Algorithm::RS512,
        Algorithm::ES256,
        Algorithm::ES384,
        Algorithm::ES512,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::HS256 => "HS256",
            Algorithm::HS384 => "HS384",
            Algorithm::HS512 => "HS512",
            Algorithm::RS256 => "RS256",
            Algorithm::RS384 => "RS384",
            Algorithm::RS512 => "RS512",
            Algorithm::ES256 => "ES256",
            Algorithm::ES384 => "ES384",
            Algorithm::ES512 => "ES512",
        }
    }

    pub fn family(&self) -> AlgorithmFamily {
        match self {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => AlgorithmFamily::Hmac,
            Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512 => AlgorithmFamily::Rsa,
            Algorithm::ES256 | Algorithm::ES384 | Algorithm::ES512 => AlgorithmFamily::Ecdsa,
        }
    }

    pub fn hash(&self) -> HashFunction {
        match self {
            Algorithm::HS256 | Algorithm::RS256 | Algorithm::ES256 => HashFunction::Sha256,
            Algorithm::HS384 | Algorithm::RS384 | Algorithm::ES384 => HashFunction::Sha384,
            Algorithm::HS512 | Algorithm::RS512 | Algorithm::ES512 => HashFunction::Sha512,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .iter()
            .copied()
            .find(|alg| alg.as_str() == s)
            .ok_or_else(|| JwtError::UnsupportedAlgorithm(s.to_string()))
    }
}
