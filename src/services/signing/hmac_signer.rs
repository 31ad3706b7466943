//! HMAC 서명기 (HS256 / HS384 / HS512)

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

use crate::core::errors::{JwtError, JwtResult};
use crate::services::signing::{Algorithm, HashFunction, PrivateKey, PublicKey, Signer};

/// HMAC 서명기
///
/// 대칭키는 임의의 바이트 문자열이며 길이 제약이 없습니다.
/// 검증은 MAC을 다시 계산해 상수 시간으로 비교합니다.
#[derive(Debug, Clone, Copy)]
pub struct HmacSigner {
    hash: HashFunction,
}

fn compute<M: Mac + KeyInit>(secret: &[u8], input: &[u8]) -> JwtResult<Vec<u8>> {
    // HMAC은 모든 길이의 키를 허용하므로 InvalidLength는 발생하지 않음
    let mut mac = <M as KeyInit>::new_from_slice(secret)
        .map_err(|e| JwtError::InvalidKey(format!("HMAC key rejected: {}", e)))?;
    mac.update(input);
    Ok(mac.finalize().into_bytes().to_vec())
}

impl HmacSigner {
    pub fn new(hash: HashFunction) -> Self {
        Self { hash }
    }

    fn mac(&self, secret: &[u8], input: &[u8]) -> JwtResult<Vec<u8>> {
        match self.hash {
            HashFunction::Sha256 => compute::<Hmac<Sha256>>(secret, input),
            HashFunction::Sha384 => compute::<Hmac<Sha384>>(secret, input),
            HashFunction::Sha512 => compute::<Hmac<Sha512>>(secret, input),
        }
    }
}

impl Signer for HmacSigner {
    fn algorithm(&self) -> Algorithm {
        match self.hash {
            HashFunction::Sha256 => Algorithm::HS256,
            HashFunction::Sha384 => Algorithm::HS384,
            HashFunction::Sha512 => Algorithm::HS512,
        }
    }

    fn sign(&self, signing_input: &[u8], key: &PrivateKey) -> JwtResult<Vec<u8>> {
        let secret = key.expect_hmac(self.algorithm())?;
        self.mac(secret, signing_input)
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &PublicKey) -> JwtResult<()> {
        let secret = key.expect_hmac(self.algorithm())?;
        let expected = self.mac(secret, signing_input)?;
        if bool::from(expected.as_slice().ct_eq(signature)) {
            Ok(())
        } else {
            Err(JwtError::SignatureMismatch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ErrorKind;

    #[test]
    fn test_hmac_output_length() {
        let key = PrivateKey::hmac(b"secret");
        assert_eq!(HmacSigner::new(HashFunction::Sha256).sign(b"x", &key).unwrap().len(), 32);
        assert_eq!(HmacSigner::new(HashFunction::Sha384).sign(b"x", &key).unwrap().len(), 48);
        assert_eq!(HmacSigner::new(HashFunction::Sha512).sign(b"x", &key).unwrap().len(), 64);
    }

    #[test]
    fn test_hmac_rfc4231_case_2() {
        // RFC 4231 test case 2
        let key = PrivateKey::hmac(b"Jefe");
        let mac = HmacSigner::new(HashFunction::Sha256)
            .sign(b"what do ya want for nothing?", &key)
            .unwrap();
        let hex: String = mac.iter().map(|b| format!("{:02x}", b)).collect();
        assert_eq!(
            hex,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_hmac_accepts_empty_key() {
        let signer = HmacSigner::new(HashFunction::Sha256);
        let signature = signer.sign(b"input", &PrivateKey::hmac(b"")).unwrap();
        assert!(signer.verify(b"input", &signature, &PublicKey::hmac(b"")).is_ok());
    }

    #[test]
    fn test_hmac_wrong_secret_is_mismatch() {
        let signer = HmacSigner::new(HashFunction::Sha512);
        let signature = signer.sign(b"input", &PrivateKey::hmac(b"one")).unwrap();
        let err = signer.verify(b"input", &signature, &PublicKey::hmac(b"two")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SignatureMismatch);
    }

    #[test]
    fn test_hmac_truncated_signature_is_mismatch() {
        let signer = HmacSigner::new(HashFunction::Sha256);
        let signature = signer.sign(b"input", &PrivateKey::hmac(b"k")).unwrap();
        let err = signer
            .verify(b"input", &signature[..16], &PublicKey::hmac(b"k"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SignatureMismatch);
    }
}
