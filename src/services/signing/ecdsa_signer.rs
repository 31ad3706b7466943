//! ECDSA 서명기 (ES256 / ES384 / ES512)
//!
//! 서명은 r과 s를 곡선 바이트 폭(32/48/66)으로 왼쪽 0 패딩한 고정 길이
//! 빅엔디안 `r ‖ s` 연결입니다. 길이가 폭의 두 배가 아니면 곡선 연산 없이
//! 즉시 형식 오류로 실패합니다.

use p256::ecdsa::signature::{RandomizedSigner, Verifier};
use rand_core::OsRng;

use crate::core::errors::{JwtError, JwtResult, Segment};
use crate::services::signing::{Algorithm, PrivateKey, PublicKey, Signer};

/// 지원하는 NIST 곡선
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcdsaCurve {
    P256,
    P384,
    P521,
}

impl EcdsaCurve {
    /// r, s 각각의 바이트 폭
    pub fn component_size(&self) -> usize {
        match self {
            EcdsaCurve::P256 => 32,
            EcdsaCurve::P384 => 48,
            EcdsaCurve::P521 => 66,
        }
    }

    /// 고정 길이 서명 전체 바이트 수
    pub fn signature_size(&self) -> usize {
        2 * self.component_size()
    }
}

/// ECDSA 서명기
///
/// 서명마다 새로운 난수를 섞으므로 같은 입력이라도 서명 값이 매번 다릅니다.
#[derive(Debug, Clone, Copy)]
pub struct EcdsaSigner {
    curve: EcdsaCurve,
}

fn signing_failed(e: impl std::fmt::Display) -> JwtError {
    JwtError::InvalidKey(format!("ECDSA signing failed: {}", e))
}

impl EcdsaSigner {
    pub fn new(curve: EcdsaCurve) -> Self {
        Self { curve }
    }

    pub fn curve(&self) -> EcdsaCurve {
        self.curve
    }
}

impl Signer for EcdsaSigner {
    fn algorithm(&self) -> Algorithm {
        match self.curve {
            EcdsaCurve::P256 => Algorithm::ES256,
            EcdsaCurve::P384 => Algorithm::ES384,
            EcdsaCurve::P521 => Algorithm::ES512,
        }
    }

    fn sign(&self, signing_input: &[u8], key: &PrivateKey) -> JwtResult<Vec<u8>> {
        let signature = match (self.curve, key) {
            (EcdsaCurve::P256, PrivateKey::EcdsaP256(signing_key)) => {
                let signature: p256::ecdsa::Signature = signing_key
                    .try_sign_with_rng(&mut OsRng, signing_input)
                    .map_err(signing_failed)?;
                signature.to_bytes().to_vec()
            }
            (EcdsaCurve::P384, PrivateKey::EcdsaP384(signing_key)) => {
                let signature: p384::ecdsa::Signature = signing_key
                    .try_sign_with_rng(&mut OsRng, signing_input)
                    .map_err(signing_failed)?;
                signature.to_bytes().to_vec()
            }
            (EcdsaCurve::P521, PrivateKey::EcdsaP521(signing_key)) => {
                let signature: p521::ecdsa::Signature = signing_key
                    .try_sign_with_rng(&mut OsRng, signing_input)
                    .map_err(signing_failed)?;
                signature.to_bytes().to_vec()
            }
            _ => return Err(key.mismatch(self.algorithm())),
        };
        Ok(signature)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &PublicKey) -> JwtResult<()> {
        key.check_algorithm(self.algorithm())?;

        let expected = self.curve.signature_size();
        if signature.len() != expected {
            return Err(JwtError::malformed(
                Segment::Signature,
                format!(
                    "{} signature must be {} bytes, got {}",
                    self.algorithm(),
                    expected,
                    signature.len()
                ),
            ));
        }

        let verified = match key {
            PublicKey::EcdsaP256(verifying_key) => p256::ecdsa::Signature::from_slice(signature)
                .is_ok_and(|sig| verifying_key.verify(signing_input, &sig).is_ok()),
            PublicKey::EcdsaP384(verifying_key) => p384::ecdsa::Signature::from_slice(signature)
                .is_ok_and(|sig| verifying_key.verify(signing_input, &sig).is_ok()),
            PublicKey::EcdsaP521(verifying_key) => p521::ecdsa::Signature::from_slice(signature)
                .is_ok_and(|sig| verifying_key.verify(signing_input, &sig).is_ok()),
            _ => return Err(key.mismatch(self.algorithm())),
        };

        if verified {
            Ok(())
        } else {
            Err(JwtError::SignatureMismatch)
        }
    }
}
