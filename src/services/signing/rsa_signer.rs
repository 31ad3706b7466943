//! RSA-PKCS1v15 서명기 (RS256 / RS384 / RS512)

use rand_core::OsRng;
use rsa::Pkcs1v15Sign;
use sha2::{Sha256, Sha384, Sha512};

use crate::core::errors::{JwtError, JwtResult};
use crate::services::signing::{Algorithm, HashFunction, PrivateKey, PublicKey, Signer};

/// RSA PKCS#1 v1.5 서명기
///
/// 서명 입력을 선택된 해시로 요약한 뒤 PKCS#1 v1.5 패딩으로 서명합니다.
/// 서명 시 블라인딩을 위해 OS 난수를 사용하지만 결과 서명은 결정적입니다.
#[derive(Debug, Clone, Copy)]
pub struct RsaSigner {
    hash: HashFunction,
}

impl RsaSigner {
    pub fn new(hash: HashFunction) -> Self {
        Self { hash }
    }

    fn scheme(&self) -> Pkcs1v15Sign {
        match self.hash {
            HashFunction::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
            HashFunction::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
            HashFunction::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
        }
    }
}

impl Signer for RsaSigner {
    fn algorithm(&self) -> Algorithm {
        match self.hash {
            HashFunction::Sha256 => Algorithm::RS256,
            HashFunction::Sha384 => Algorithm::RS384,
            HashFunction::Sha512 => Algorithm::RS512,
        }
    }

    fn sign(&self, signing_input: &[u8], key: &PrivateKey) -> JwtResult<Vec<u8>> {
        let private_key = key.expect_rsa(self.algorithm())?;
        let hashed = self.hash.digest(signing_input);
        private_key
            .sign_with_rng(&mut OsRng, self.scheme(), &hashed)
            .map_err(|e| JwtError::InvalidKey(format!("RSA signing failed: {}", e)))
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &PublicKey) -> JwtResult<()> {
        let public_key = key.expect_rsa(self.algorithm())?;
        let hashed = self.hash.digest(signing_input);
        public_key
            .verify(self.scheme(), &hashed, signature)
            .map_err(|_| JwtError::SignatureMismatch)
    }
}
