//! 토큰 수명주기 서비스
//!
//! 코덱, 서명 레지스트리, 클레임 검증을 조합하여 서명, 파싱, 서명 검증,
//! 클레임 검증을 제공합니다.
//!
//! ```text
//! 서명:  Claims + Header → encode → 서명 입력 → registry.lookup(alg).sign → 토큰
//! 검증:  토큰 → split → 헤더 디코딩 → registry.lookup(alg).verify → 클레임 검증
//! ```
//!
//! `parse`는 서명도 클레임도 확인하지 않습니다. 호출자가 `verify_signature`와
//! `validate_claims`(또는 `validate_all`)를 명시적으로 호출해야 합니다.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;

use super::codec;
use super::validation::{self, ValidationOptions};
use crate::core::errors::{JwtError, JwtResult, Segment};
use crate::core::registry::SignerRegistry;
use crate::domain::dto::tokens::TokenGrant;
use crate::domain::models::token::{Claims, Header, JWT_TYPE, TokenData};
use crate::services::signing::{Algorithm, PrivateKey, PublicKey};

static TOKEN_SERVICE_INSTANCE: OnceCell<Arc<TokenService>> = OnceCell::new();

/// JWT 토큰 서비스
///
/// 상태는 불변 레지스트리뿐이므로 여러 스레드에서 동기화 없이 공유할 수 있습니다.
pub struct TokenService {
    registry: Arc<SignerRegistry>,
}

impl TokenService {
    /// 기본 레지스트리를 사용하는 프로세스 전역 인스턴스
    pub fn instance() -> Arc<Self> {
        TOKEN_SERVICE_INSTANCE
            .get_or_init(|| Arc::new(Self::new(SignerRegistry::global())))
            .clone()
    }

    /// 사용자 정의 레지스트리로 서비스를 생성합니다.
    pub fn new(registry: Arc<SignerRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &SignerRegistry {
        &self.registry
    }

    /// 클레임에 서명하여 토큰 문자열을 생성합니다.
    ///
    /// 알고리즘은 `algorithm` 인자, 헤더의 `alg`, 키 종류 추론 순서로 결정됩니다.
    /// 헤더의 추가 필드는 그대로 유지되고 `typ`은 `JWT`로 고정됩니다.
    ///
    /// # Errors
    ///
    /// * `JwtError::UnsupportedAlgorithm` - 헤더의 `alg`를 알 수 없거나 등록된 서명기가 없음
    /// * `JwtError::InvalidKey` - 키 종류가 알고리즘과 맞지 않음 (암호 연산 전 확인)
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let service = TokenService::instance();
    /// let key = JwtConfig::signing_key()?;
    /// let token = service.sign(&claims, None, &key, None)?;
    /// ```
    pub fn sign(
        &self,
        claims: &Claims,
        header: Option<&Header>,
        key: &PrivateKey,
        algorithm: Option<Algorithm>,
    ) -> JwtResult<String> {
        let mut header = header.cloned().unwrap_or_default();
        let algorithm = match algorithm {
            Some(algorithm) => algorithm,
            None => header.algorithm()?.unwrap_or_else(|| key.default_algorithm()),
        };

        let signer = self.registry.lookup(algorithm)?;
        key.check_algorithm(algorithm)?;

        header.set_algorithm(algorithm);
        header.typ = JWT_TYPE.to_string();

        let signing_input = codec::encode(&header, claims)?;
        let signature = signer.sign(signing_input.as_bytes(), key)?;
        Ok(codec::assemble(&signing_input, &signature))
    }

    /// 서명 후 토큰과 만료 시각을 묶은 DTO를 반환합니다.
    pub fn issue_grant(
        &self,
        claims: &Claims,
        header: Option<&Header>,
        key: &PrivateKey,
        algorithm: Option<Algorithm>,
    ) -> JwtResult<TokenGrant> {
        let token = self.sign(claims, header, key, algorithm)?;
        Ok(TokenGrant::new(token, claims))
    }

    /// 토큰 문자열을 분해하고 헤더와 클레임을 디코딩합니다.
    ///
    /// 서명과 클레임은 검증하지 않습니다.
    ///
    /// # Errors
    ///
    /// * `JwtError::NilToken` - 빈 문자열
    /// * `JwtError::MalformedToken` - 세그먼트 수, base64url, JSON 오류 또는 `typ`이 JWT가 아님
    pub fn parse(&self, token: &str) -> JwtResult<TokenData> {
        let split = codec::split(token)?;

        let header: Header = split.header()?;
        if !header.is_jwt() {
            return Err(JwtError::malformed(
                Segment::Header,
                format!("unsupported token type '{}'", header.typ),
            ));
        }
        let claims: Claims = split.payload()?;

        let signing_input_len = split.signing_input.len();
        Ok(TokenData::new(
            token.to_string(),
            header,
            claims,
            split.signature,
            signing_input_len,
        ))
    }

    /// 원문 서명 입력에 대해 서명을 검증합니다.
    ///
    /// 같은 공개키로 이미 검증된 토큰이면 암호 연산 없이 성공합니다.
    ///
    /// # Errors
    ///
    /// * `JwtError::UnsupportedAlgorithm` - 헤더의 `alg`를 알 수 없음 (대소문자 구분)
    /// * `JwtError::InvalidKey` - 공개키 종류가 알고리즘과 맞지 않음
    /// * `JwtError::MalformedToken` - ECDSA 서명 길이가 곡선 폭과 다름
    /// * `JwtError::SignatureMismatch` - 서명 불일치
    pub fn verify_signature(&self, data: &mut TokenData, key: &PublicKey) -> JwtResult<()> {
        if data.is_verified_with(key) {
            log::trace!("signature already verified with this key");
            return Ok(());
        }

        let algorithm: Algorithm = data.header().alg.parse()?;
        let signer = self.registry.lookup(algorithm)?;
        signer.verify(data.signing_input(), data.signature(), key)?;

        data.mark_verified(key.fingerprint());
        Ok(())
    }

    /// 클레임의 시간 및 발급자/대상 조건을 검증합니다.
    pub fn validate_claims(
        &self,
        data: &TokenData,
        now: DateTime<Utc>,
        options: &ValidationOptions,
    ) -> JwtResult<()> {
        validation::validate_claims(data.claims(), now, options)
    }

    /// 서명 검증 후 클레임 검증 (첫 실패에서 중단)
    pub fn validate_all(
        &self,
        data: &mut TokenData,
        key: &PublicKey,
        now: DateTime<Utc>,
        options: &ValidationOptions,
    ) -> JwtResult<()> {
        self.verify_signature(data, key)?;
        self.validate_claims(data, now, options)
    }

    /// 토큰 문자열을 파싱하고 서명과 클레임을 모두 검증합니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let data = TokenService::instance().validate_token(
    ///     token,
    ///     &JwtConfig::verifying_key()?,
    ///     Utc::now(),
    ///     &ValidationOptions::from_env(),
    /// )?;
    /// println!("User ID: {}", data.claims().subject);
    /// ```
    pub fn validate_token(
        &self,
        token: &str,
        key: &PublicKey,
        now: DateTime<Utc>,
        options: &ValidationOptions,
    ) -> JwtResult<TokenData> {
        let mut data = self.parse(token)?;
        self.validate_all(&mut data, key, now, options)?;
        Ok(data)
    }
}
