//! 서명/검증 키
//!
//! 알고리즘 계열별 키를 태그된 열거형으로 표현합니다. 키는 호출마다 전달되며
//! 서명기는 키를 보관하지 않습니다.
//!
//! # RSA 키 생성
//!
//! ```bash
//! # 개인키 생성 (PKCS#1)
//! openssl genrsa -out jwt_private_key.pem 2048
//! # 공개키 추출 (SPKI)
//! openssl rsa -in jwt_private_key.pem -pubout -out jwt_public_key.pem
//! ```

use std::fmt;

use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

use crate::core::errors::{JwtError, JwtResult};
use crate::services::signing::algorithm::{Algorithm, AlgorithmFamily};

/// 서명용 개인키 (HMAC의 경우 대칭 비밀키)
pub enum PrivateKey {
    /// HMAC 대칭키. 길이 제약 없음
    Hmac(Vec<u8>),
    Rsa(RsaPrivateKey),
    EcdsaP256(p256::ecdsa::SigningKey),
    EcdsaP384(p384::ecdsa::SigningKey),
    EcdsaP521(p521::ecdsa::SigningKey),
}

/// 검증용 공개키 (HMAC의 경우 대칭 비밀키)
#[derive(Clone)]
pub enum PublicKey {
    Hmac(Vec<u8>),
    Rsa(RsaPublicKey),
    EcdsaP256(p256::ecdsa::VerifyingKey),
    EcdsaP384(p384::ecdsa::VerifyingKey),
    EcdsaP521(p521::ecdsa::VerifyingKey),
}

/// 키 종류 이름 (에러 메시지용)
fn shape_name(family: AlgorithmFamily, curve: Option<&'static str>) -> String {
    match family {
        AlgorithmFamily::Hmac => "byte-string secret".to_string(),
        AlgorithmFamily::Rsa => "RSA key".to_string(),
        AlgorithmFamily::Ecdsa => format!("{} ECDSA key", curve.unwrap_or("unknown curve")),
    }
}

/// 알고리즘이 요구하는 키 종류 설명
fn expected_shape(algorithm: Algorithm) -> &'static str {
    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => "a byte-string secret",
        Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512 => "an RSA key",
        Algorithm::ES256 => "a P-256 ECDSA key",
        Algorithm::ES384 => "a P-384 ECDSA key",
        Algorithm::ES512 => "a P-521 ECDSA key",
    }
}

fn key_mismatch(algorithm: Algorithm, actual: String) -> JwtError {
    JwtError::InvalidKey(format!(
        "{} requires {}, got {}",
        algorithm,
        expected_shape(algorithm),
        actual
    ))
}

/// 키 종류로부터 기본 알고리즘을 추론합니다.
///
/// 타원곡선 키 → ES256, RSA 키 → RS256, 바이트 문자열 → HS256
fn infer_algorithm(family: AlgorithmFamily) -> Algorithm {
    let algorithm = match family {
        AlgorithmFamily::Ecdsa => Algorithm::ES256,
        AlgorithmFamily::Rsa => Algorithm::RS256,
        AlgorithmFamily::Hmac => Algorithm::HS256,
    };
    log::trace!("inferred default algorithm {} from key shape", algorithm);
    algorithm
}

impl PrivateKey {
    /// HMAC 비밀키를 생성합니다.
    pub fn hmac(secret: impl AsRef<[u8]>) -> Self {
        PrivateKey::Hmac(secret.as_ref().to_vec())
    }

    /// PKCS#1 PEM 형식의 RSA 개인키를 읽어옵니다.
    ///
    /// # Errors
    ///
    /// PEM 파싱에 실패하면 `JwtError::InvalidKey`
    pub fn rsa_from_pkcs1_pem(pem: &str) -> JwtResult<Self> {
        RsaPrivateKey::from_pkcs1_pem(pem)
            .map(PrivateKey::Rsa)
            .map_err(|e| JwtError::InvalidKey(format!("failed to parse RSA private key: {}", e)))
    }

    pub fn family(&self) -> AlgorithmFamily {
        match self {
            PrivateKey::Hmac(_) => AlgorithmFamily::Hmac,
            PrivateKey::Rsa(_) => AlgorithmFamily::Rsa,
            PrivateKey::EcdsaP256(_) | PrivateKey::EcdsaP384(_) | PrivateKey::EcdsaP521(_) => {
                AlgorithmFamily::Ecdsa
            }
        }
    }

    fn curve(&self) -> Option<&'static str> {
        match self {
            PrivateKey::EcdsaP256(_) => Some("P-256"),
            PrivateKey::EcdsaP384(_) => Some("P-384"),
            PrivateKey::EcdsaP521(_) => Some("P-521"),
            _ => None,
        }
    }

    /// 키 종류로 추론한 기본 알고리즘
    pub fn default_algorithm(&self) -> Algorithm {
        infer_algorithm(self.family())
    }

    /// 이 키로 주어진 알고리즘의 서명이 가능한지 확인합니다.
    ///
    /// 암호 연산 전에 호출되며, 불일치 시 `JwtError::InvalidKey`를 반환합니다.
    pub fn check_algorithm(&self, algorithm: Algorithm) -> JwtResult<()> {
        let compatible = matches!(
            (algorithm, self),
            (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512, PrivateKey::Hmac(_))
                | (Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512, PrivateKey::Rsa(_))
                | (Algorithm::ES256, PrivateKey::EcdsaP256(_))
                | (Algorithm::ES384, PrivateKey::EcdsaP384(_))
                | (Algorithm::ES512, PrivateKey::EcdsaP521(_))
        );
        if compatible {
            Ok(())
        } else {
            Err(self.mismatch(algorithm))
        }
    }

    pub(crate) fn mismatch(&self, algorithm: Algorithm) -> JwtError {
        key_mismatch(algorithm, shape_name(self.family(), self.curve()))
    }

    pub(crate) fn expect_hmac(&self, algorithm: Algorithm) -> JwtResult<&[u8]> {
        match self {
            PrivateKey::Hmac(secret) => Ok(secret),
            _ => Err(self.mismatch(algorithm)),
        }
    }

    pub(crate) fn expect_rsa(&self, algorithm: Algorithm) -> JwtResult<&RsaPrivateKey> {
        match self {
            PrivateKey::Rsa(key) => Ok(key),
            _ => Err(self.mismatch(algorithm)),
        }
    }

    /// 짝이 되는 검증 키를 생성합니다.
    pub fn public_key(&self) -> PublicKey {
        match self {
            PrivateKey::Hmac(secret) => PublicKey::Hmac(secret.clone()),
            PrivateKey::Rsa(key) => PublicKey::Rsa(key.to_public_key()),
            PrivateKey::EcdsaP256(key) => PublicKey::EcdsaP256(p256::ecdsa::VerifyingKey::from(key)),
            PrivateKey::EcdsaP384(key) => PublicKey::EcdsaP384(p384::ecdsa::VerifyingKey::from(key)),
            PrivateKey::EcdsaP521(key) => PublicKey::EcdsaP521(p521::ecdsa::VerifyingKey::from(key)),
        }
    }
}

impl PublicKey {
    pub fn hmac(secret: impl AsRef<[u8]>) -> Self {
        PublicKey::Hmac(secret.as_ref().to_vec())
    }

    /// SPKI(PKCS#8) PEM 형식의 RSA 공개키를 읽어옵니다.
    ///
    /// # Errors
    ///
    /// PEM 파싱에 실패하면 `JwtError::InvalidKey`
    pub fn rsa_from_public_key_pem(pem: &str) -> JwtResult<Self> {
        RsaPublicKey::from_public_key_pem(pem)
            .map(PublicKey::Rsa)
            .map_err(|e| JwtError::InvalidKey(format!("failed to parse RSA public key: {}", e)))
    }

    pub fn family(&self) -> AlgorithmFamily {
        match self {
            PublicKey::Hmac(_) => AlgorithmFamily::Hmac,
            PublicKey::Rsa(_) => AlgorithmFamily::Rsa,
            PublicKey::EcdsaP256(_) | PublicKey::EcdsaP384(_) | PublicKey::EcdsaP521(_) => {
                AlgorithmFamily::Ecdsa
            }
        }
    }

    fn curve(&self) -> Option<&'static str> {
        match self {
            PublicKey::EcdsaP256(_) => Some("P-256"),
            PublicKey::EcdsaP384(_) => Some("P-384"),
            PublicKey::EcdsaP521(_) => Some("P-521"),
            _ => None,
        }
    }

    pub fn default_algorithm(&self) -> Algorithm {
        infer_algorithm(self.family())
    }

    /// 이 키로 주어진 알고리즘의 서명을 검증할 수 있는지 확인합니다.
    pub fn check_algorithm(&self, algorithm: Algorithm) -> JwtResult<()> {
        let compatible = matches!(
            (algorithm, self),
            (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512, PublicKey::Hmac(_))
                | (Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512, PublicKey::Rsa(_))
                | (Algorithm::ES256, PublicKey::EcdsaP256(_))
                | (Algorithm::ES384, PublicKey::EcdsaP384(_))
                | (Algorithm::ES512, PublicKey::EcdsaP521(_))
        );
        if compatible {
            Ok(())
        } else {
            Err(self.mismatch(algorithm))
        }
    }

    pub(crate) fn mismatch(&self, algorithm: Algorithm) -> JwtError {
        key_mismatch(algorithm, shape_name(self.family(), self.curve()))
    }

    pub(crate) fn expect_hmac(&self, algorithm: Algorithm) -> JwtResult<&[u8]> {
        match self {
            PublicKey::Hmac(secret) => Ok(secret),
            _ => Err(self.mismatch(algorithm)),
        }
    }

    pub(crate) fn expect_rsa(&self, algorithm: Algorithm) -> JwtResult<&RsaPublicKey> {
        match self {
            PublicKey::Rsa(key) => Ok(key),
            _ => Err(self.mismatch(algorithm)),
        }
    }

    /// 키의 SHA-256 지문
    ///
    /// 같은 키 값이면 같은 지문을 가집니다. 검증 결과 캐시의 키 동일성 판단에 사용합니다.
    /// 구성: 종류 태그 1바이트 + (비밀키 바이트 | RSA n‖e | SEC1 비압축 좌표)
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        match self {
            PublicKey::Hmac(secret) => {
                hasher.update([0u8]);
                hasher.update(secret);
            }
            PublicKey::Rsa(key) => {
                hasher.update([1u8]);
                hasher.update(key.n().to_bytes_be());
                hasher.update(key.e().to_bytes_be());
            }
            PublicKey::EcdsaP256(key) => {
                hasher.update([2u8]);
                hasher.update(key.to_encoded_point(false).as_bytes());
            }
            PublicKey::EcdsaP384(key) => {
                hasher.update([3u8]);
                hasher.update(key.to_encoded_point(false).as_bytes());
            }
            PublicKey::EcdsaP521(key) => {
                hasher.update([4u8]);
                hasher.update(key.to_encoded_point(false).as_bytes());
            }
        }
        hasher.finalize().into()
    }
}

impl From<&PrivateKey> for PublicKey {
    fn from(key: &PrivateKey) -> Self {
        key.public_key()
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 키 재료는 출력하지 않음
        write!(f, "PrivateKey({})", shape_name(self.family(), self.curve()))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", shape_name(self.family(), self.curve()))
    }
}

/// 테스트용 키 쌍
///
/// RSA 키 생성은 느리므로 프로세스당 한 번만 생성합니다.
#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use once_cell::sync::Lazy;
    use rand_core::OsRng;

    static RSA_KEY: Lazy<RsaPrivateKey> =
        Lazy::new(|| RsaPrivateKey::new(&mut OsRng, 2048).expect("RSA key generation failed"));

    pub const HMAC_SECRET: &[u8] = b"test-hmac-secret-with-enough-entropy";

    /// 알고리즘에 맞는 (개인키, 공개키) 쌍
    pub fn keypair(algorithm: Algorithm) -> (PrivateKey, PublicKey) {
        let private = match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => PrivateKey::hmac(HMAC_SECRET),
            Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512 => PrivateKey::Rsa(RSA_KEY.clone()),
            Algorithm::ES256 => PrivateKey::EcdsaP256(p256::ecdsa::SigningKey::random(&mut OsRng)),
            Algorithm::ES384 => PrivateKey::EcdsaP384(p384::ecdsa::SigningKey::random(&mut OsRng)),
            Algorithm::ES512 => PrivateKey::EcdsaP521(p521::ecdsa::SigningKey::random(&mut OsRng)),
        };
        let public = private.public_key();
        (private, public)
    }
}
