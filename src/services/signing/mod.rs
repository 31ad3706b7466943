//! 서명 알고리즘 모듈
//!
//! 알고리즘 계열(HMAC, RSA-PKCS1v15, ECDSA)별 서명기와 키, 식별자를 제공합니다.
//! 서명기는 상태가 없으며 키 재료를 보관하지 않습니다. 키는 호출마다 전달됩니다.
//!
//! | 식별자 | 서명기 | 키 |
//! |--------|--------|----|
//! | `HS256` / `HS384` / `HS512` | [`HmacSigner`] | `PrivateKey::Hmac` |
//! | `RS256` / `RS384` / `RS512` | [`RsaSigner`] | `PrivateKey::Rsa` |
//! | `ES256` / `ES384` / `ES512` | [`EcdsaSigner`] | `PrivateKey::EcdsaP256` / `P384` / `P521` |

pub mod algorithm;
pub mod ecdsa_signer;
pub mod hmac_signer;
pub mod keys;
pub mod rsa_signer;

use std::sync::Arc;

pub use algorithm::*;
pub use ecdsa_signer::*;
pub use hmac_signer::*;
pub use keys::*;
pub use rsa_signer::*;

use crate::core::errors::JwtResult;

/// 서명기 공통 인터페이스
///
/// 하나의 알고리즘 식별자와 해시 함수에 묶인 무상태 객체입니다.
/// 레지스트리에서 여러 스레드가 동시에 공유하므로 `Send + Sync`여야 합니다.
pub trait Signer: Send + Sync {
    /// 이 서명기가 구현하는 알고리즘
    fn algorithm(&self) -> Algorithm;

    /// 서명 입력에 대한 서명 바이트를 생성합니다.
    ///
    /// # Errors
    ///
    /// 키 종류가 알고리즘과 맞지 않으면 암호 연산 전에 `JwtError::InvalidKey`
    fn sign(&self, signing_input: &[u8], key: &PrivateKey) -> JwtResult<Vec<u8>>;

    /// 서명 입력과 서명이 일치하는지 검증합니다.
    ///
    /// # Errors
    ///
    /// - `JwtError::InvalidKey` - 키 종류 불일치
    /// - `JwtError::MalformedToken` - 서명 형식 오류 (ECDSA 고정 길이 위반)
    /// - `JwtError::SignatureMismatch` - 서명 불일치
    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &PublicKey) -> JwtResult<()>;
}

/// 9개 기본 알고리즘의 서명기 목록
pub fn default_signers() -> Vec<Arc<dyn Signer>> {
    vec![
        Arc::new(HmacSigner::new(HashFunction::Sha256)),
        Arc::new(HmacSigner::new(HashFunction::Sha384)),
        Arc::new(HmacSigner::new(HashFunction::Sha512)),
        Arc::new(RsaSigner::new(HashFunction::Sha256)),
        Arc::new(RsaSigner::new(HashFunction::Sha384)),
        Arc::new(RsaSigner::new(HashFunction::Sha512)),
        Arc::new(EcdsaSigner::new(EcdsaCurve::P256)),
        Arc::new(EcdsaSigner::new(EcdsaCurve::P384)),
        Arc::new(EcdsaSigner::new(EcdsaCurve::P521)),
    ]
}
