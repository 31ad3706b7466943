//! # JWT Configuration Module
//!
//! 토큰 서명 키, 알고리즘, 만료 시간, 발급자/대상 기대값을 환경 변수에서 읽습니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! export JWT_ALGORITHM="RS256"            # 기본값 HS256 (대소문자 구분)
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_PRIVATE_KEY_PATH="./secrets/jwt_private_key.pem"   # PKCS#1
//! export JWT_PUBLIC_KEY_PATH="./secrets/jwt_public_key.pem"     # SPKI
//! export JWT_EXPIRATION_HOURS="24"
//! export JWT_ISSUER="auth-service"
//! export JWT_AUDIENCE="trading-platform"
//! ```
//!
//! ECDSA 키는 환경 변수로 설정할 수 없고 [`PrivateKey`]/[`PublicKey`]를 직접 생성해야 합니다.

use std::env;
use std::error::Error;
use std::fs;

use crate::core::errors::JwtResult;
use crate::services::signing::{Algorithm, AlgorithmFamily, PrivateKey, PublicKey};

const DEFAULT_SECRET: &str = "your-secret-key";
const DEFAULT_EXPIRATION_HOURS: i64 = 24;

/// JSON Web Token (JWT) 관련 설정
///
/// ## 권장 설정값
///
/// - **개발**: HS256 + 임의 비밀키, 만료 24시간
/// - **프로덕션**: RS256 + 키 파일, 만료 15분 ~ 1시간
pub struct JwtConfig;

impl JwtConfig {
    /// HMAC 서명 비밀키
    ///
    /// 설정되지 않으면 기본값을 사용하며 경고 로그를 남깁니다.
    ///
    /// ```bash
    /// openssl rand -base64 32
    /// ```
    pub fn secret() -> String {
        env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, using default (not secure for production!)");
            DEFAULT_SECRET.to_string()
        })
    }

    /// 서명 알고리즘 (`JWT_ALGORITHM`, 기본값 HS256)
    ///
    /// # Errors
    ///
    /// 알 수 없는 식별자면 `JwtError::UnsupportedAlgorithm`
    pub fn algorithm() -> JwtResult<Algorithm> {
        parse_algorithm(env::var("JWT_ALGORITHM").ok().as_deref())
    }

    /// 액세스 토큰 만료 시간 (시간 단위, 기본값 24)
    ///
    /// ```rust,ignore
    /// let expires_at = Utc::now() + Duration::hours(JwtConfig::expiration_hours());
    /// ```
    pub fn expiration_hours() -> i64 {
        parse_expiration_hours(env::var("JWT_EXPIRATION_HOURS").ok().as_deref())
    }

    /// 기대 발급자. 비어 있으면 `None`
    pub fn issuer() -> Option<String> {
        non_empty(env::var("JWT_ISSUER").ok())
    }

    /// 기대 대상. 비어 있으면 `None`
    pub fn audience() -> Option<String> {
        non_empty(env::var("JWT_AUDIENCE").ok())
    }

    pub fn private_key_path() -> Option<String> {
        non_empty(env::var("JWT_PRIVATE_KEY_PATH").ok())
    }

    pub fn public_key_path() -> Option<String> {
        non_empty(env::var("JWT_PUBLIC_KEY_PATH").ok())
    }

    /// 설정된 알고리즘에 맞는 서명 키를 읽어옵니다.
    ///
    /// HMAC이면 `JWT_SECRET`, RSA이면 `JWT_PRIVATE_KEY_PATH`의 PEM 파일을 사용합니다.
    pub fn signing_key() -> Result<PrivateKey, Box<dyn Error>> {
        let algorithm = Self::algorithm()?;
        match algorithm.family() {
            AlgorithmFamily::Hmac => Ok(PrivateKey::hmac(Self::secret())),
            AlgorithmFamily::Rsa => {
                let path = Self::private_key_path()
                    .ok_or_else(|| format!("JWT_PRIVATE_KEY_PATH must be set for {}", algorithm))?;
                load_private_key_pem(&path)
            }
            AlgorithmFamily::Ecdsa => Err(unsupported_from_env(algorithm)),
        }
    }

    /// 설정된 알고리즘에 맞는 검증 키를 읽어옵니다.
    pub fn verifying_key() -> Result<PublicKey, Box<dyn Error>> {
        let algorithm = Self::algorithm()?;
        match algorithm.family() {
            AlgorithmFamily::Hmac => Ok(PublicKey::hmac(Self::secret())),
            AlgorithmFamily::Rsa => {
                let path = Self::public_key_path()
                    .ok_or_else(|| format!("JWT_PUBLIC_KEY_PATH must be set for {}", algorithm))?;
                load_public_key_pem(&path)
            }
            AlgorithmFamily::Ecdsa => Err(unsupported_from_env(algorithm)),
        }
    }
}

fn unsupported_from_env(algorithm: Algorithm) -> Box<dyn Error> {
    format!("{} keys cannot be loaded from the environment", algorithm).into()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn parse_algorithm(value: Option<&str>) -> JwtResult<Algorithm> {
    match value {
        Some(value) if !value.is_empty() => value.parse(),
        _ => Ok(Algorithm::HS256),
    }
}

fn parse_expiration_hours(value: Option<&str>) -> i64 {
    value
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_EXPIRATION_HOURS)
}

/// PKCS#1 PEM 개인키 파일을 읽습니다.
pub fn load_private_key_pem(path: &str) -> Result<PrivateKey, Box<dyn Error>> {
    let pem = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read private key file '{}': {}", path, e))?;
    Ok(PrivateKey::rsa_from_pkcs1_pem(&pem)?)
}

/// SPKI PEM 공개키 파일을 읽습니다.
pub fn load_public_key_pem(path: &str) -> Result<PublicKey, Box<dyn Error>> {
    let pem = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read public key file '{}': {}", path, e))?;
    Ok(PublicKey::rsa_from_public_key_pem(&pem)?)
}
