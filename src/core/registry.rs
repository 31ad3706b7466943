//! # Signer Registry - 알고리즘 식별자 → 서명기 매핑
//!
//! 프로세스 시작 시 한 번 구성되는 불변 테이블입니다. 구성 이후에는 읽기 전용이므로
//! 동기화 없이 모든 스레드에서 동시에 조회할 수 있습니다.
//!
//! ## 구성 요소
//!
//! - **SignerRegistry**: 알고리즘별 서명기 테이블 (불변)
//! - **SignerRegistryBuilder**: 사용자 정의 서명기를 등록해 새 테이블을 만드는 빌더
//! - **global()**: 9개 기본 알고리즘이 등록된 전역 기본 테이블
//!
//! 테이블을 변경하는 API는 없습니다. 서명기를 교체하려면 빌더로 새 테이블을 만듭니다.
//!
//! ```text
//! SignerRegistry::builder()
//!    ├─ with_defaults()     → HS*/RS*/ES* 기본 서명기
//!    ├─ register(signer)    → 같은 알고리즘이면 교체
//!    └─ build()             → 불변 SignerRegistry
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use auth_token::core::registry::SignerRegistry;
//!
//! let registry = SignerRegistry::global();
//! let signer = registry.resolve("HS256")?;
//! let signature = signer.sign(b"header.payload", &key)?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::core::errors::{JwtError, JwtResult};
use crate::services::signing::{default_signers, Algorithm, Signer};

/// 전역 기본 레지스트리 (최초 조회 시 한 번 구성)
static DEFAULT_REGISTRY: Lazy<Arc<SignerRegistry>> =
    Lazy::new(|| Arc::new(SignerRegistry::builder().with_defaults().build()));

/// 알고리즘 식별자별 서명기 테이블
#[derive(Clone)]
pub struct SignerRegistry {
    signers: HashMap<Algorithm, Arc<dyn Signer>>,
}

impl SignerRegistry {
    /// 기본 서명기가 등록된 전역 레지스트리를 반환합니다.
    pub fn global() -> Arc<Self> {
        DEFAULT_REGISTRY.clone()
    }

    pub fn builder() -> SignerRegistryBuilder {
        SignerRegistryBuilder::default()
    }

    /// 현재 테이블을 시작점으로 하는 빌더를 만듭니다. 원본 테이블은 변경되지 않습니다.
    pub fn to_builder(&self) -> SignerRegistryBuilder {
        SignerRegistryBuilder {
            signers: self.signers.clone(),
        }
    }

    /// 알고리즘에 등록된 서명기를 조회합니다.
    ///
    /// # Errors
    ///
    /// 등록된 서명기가 없으면 `JwtError::UnsupportedAlgorithm`
    pub fn lookup(&self, algorithm: Algorithm) -> JwtResult<&dyn Signer> {
        self.signers
            .get(&algorithm)
            .map(|signer| signer.as_ref())
            .ok_or_else(|| JwtError::UnsupportedAlgorithm(algorithm.to_string()))
    }

    /// 헤더의 `alg` 문자열로 서명기를 조회합니다. 대소문자를 구분합니다.
    ///
    /// # Errors
    ///
    /// 알 수 없는 식별자이거나 서명기가 없으면 `JwtError::UnsupportedAlgorithm`
    pub fn resolve(&self, identifier: &str) -> JwtResult<&dyn Signer> {
        let algorithm: Algorithm = identifier.parse()?;
        self.lookup(algorithm)
    }

    pub fn contains(&self, algorithm: Algorithm) -> bool {
        self.signers.contains_key(&algorithm)
    }

    /// 등록된 알고리즘 목록 (정렬됨)
    pub fn algorithms(&self) -> Vec<Algorithm> {
        let mut algorithms: Vec<Algorithm> = self.signers.keys().copied().collect();
        algorithms.sort();
        algorithms
    }

    pub fn len(&self) -> usize {
        self.signers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }
}

impl std::fmt::Debug for SignerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerRegistry")
            .field("algorithms", &self.algorithms())
            .finish()
    }
}

/// 불변 레지스트리를 만드는 빌더
#[derive(Default)]
pub struct SignerRegistryBuilder {
    signers: HashMap<Algorithm, Arc<dyn Signer>>,
}

impl SignerRegistryBuilder {
    /// 9개 기본 알고리즘 서명기를 등록합니다.
    pub fn with_defaults(mut self) -> Self {
        for signer in default_signers() {
            self.signers.insert(signer.algorithm(), signer);
        }
        self
    }

    /// 서명기를 등록합니다. 같은 알고리즘의 기존 서명기는 교체됩니다.
    pub fn register(mut self, signer: impl Signer + 'static) -> Self {
        self.signers.insert(signer.algorithm(), Arc::new(signer));
        self
    }

    /// 알고리즘 등록을 제거합니다.
    pub fn remove(mut self, algorithm: Algorithm) -> Self {
        self.signers.remove(&algorithm);
        self
    }

    pub fn build(self) -> SignerRegistry {
        log::debug!("signer registry built with {} algorithms", self.signers.len());
        SignerRegistry {
            signers: self.signers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ErrorKind;
    use crate::services::signing::{HashFunction, HmacSigner, PrivateKey, PublicKey};

    #[test]
    fn test_global_registry_has_all_algorithms() {
        let registry = SignerRegistry::global();
        assert_eq!(registry.algorithms(), Algorithm::ALL.to_vec());
        for alg in Algorithm::ALL {
            assert_eq!(registry.lookup(alg).unwrap().algorithm(), alg);
        }
    }

    #[test]
    fn test_resolve_unknown_identifier() {
        let registry = SignerRegistry::global();
        for identifier in ["none", "hs256", "HS1024", ""] {
            let err = registry.resolve(identifier).err().unwrap();
            assert_eq!(err.kind(), ErrorKind::UnsupportedAlgorithm);
        }
    }

    #[test]
    fn test_builder_produces_new_table() {
        let hmac_only = SignerRegistry::builder()
            .register(HmacSigner::new(HashFunction::Sha256))
            .build();
        assert_eq!(hmac_only.algorithms(), vec![Algorithm::HS256]);
        let err = hmac_only.lookup(Algorithm::RS256).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::UnsupportedAlgorithm);

        // 전역 테이블은 영향을 받지 않음
        assert_eq!(SignerRegistry::global().len(), 9);
    }

    #[test]
    fn test_to_builder_and_remove() {
        let registry = SignerRegistry::global().to_builder().remove(Algorithm::HS512).build();
        assert_eq!(registry.len(), 8);
        assert!(!registry.contains(Algorithm::HS512));
        assert!(SignerRegistry::global().contains(Algorithm::HS512));
    }

    /// 고정 서명을 돌려주는 사용자 정의 서명기
    struct FixedSigner;

    impl Signer for FixedSigner {
        fn algorithm(&self) -> Algorithm {
            Algorithm::HS256
        }

        fn sign(&self, _signing_input: &[u8], _key: &PrivateKey) -> JwtResult<Vec<u8>> {
            Ok(vec![7; 4])
        }

        fn verify(&self, _signing_input: &[u8], signature: &[u8], _key: &PublicKey) -> JwtResult<()> {
            if signature == [7; 4] {
                Ok(())
            } else {
                Err(JwtError::SignatureMismatch)
            }
        }
    }

    #[test]
    fn test_register_replaces_signer() {
        let registry = SignerRegistry::builder().with_defaults().register(FixedSigner).build();
        let signer = registry.lookup(Algorithm::HS256).unwrap();
        assert_eq!(signer.sign(b"x", &PrivateKey::hmac(b"k")).unwrap(), vec![7; 4]);
        assert_eq!(registry.len(), 9);
    }

    #[test]
    fn test_registry_shared_across_threads() {
        let registry = SignerRegistry::global();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    let key = PrivateKey::hmac(b"shared");
                    registry.lookup(Algorithm::HS384).unwrap().sign(b"input", &key).unwrap()
                })
            })
            .collect();
        let results: Vec<Vec<u8>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]));
    }
}
