//! 파싱된 토큰
//!
//! 와이어 문자열을 분해한 결과입니다. 서명 입력은 원문 문자열의 앞부분
//! (`header.payload`)을 그대로 가리키며 다시 인코딩하지 않습니다.

use super::{Claims, Header};
use crate::services::signing::PublicKey;

/// 파싱된 토큰 데이터
///
/// [`TokenService::parse`](crate::services::auth::TokenService::parse)가 생성합니다.
/// 파싱만으로는 서명도 클레임도 검증되지 않습니다.
///
/// 검증 캐시(`verified_with`)가 유일한 가변 상태이며 `&mut self`로만 갱신됩니다.
/// 여러 스레드가 한 인스턴스를 공유하려면 외부 동기화가 필요합니다.
#[derive(Debug, Clone)]
pub struct TokenData {
    raw: String,
    header: Header,
    claims: Claims,
    signature: Vec<u8>,
    signing_input_len: usize,
    verified_with: Option<[u8; 32]>,
}

impl TokenData {
    pub(crate) fn new(
        raw: String,
        header: Header,
        claims: Claims,
        signature: Vec<u8>,
        signing_input_len: usize,
    ) -> Self {
        Self {
            raw,
            header,
            claims,
            signature,
            signing_input_len,
            verified_with: None,
        }
    }

    /// 원문 토큰 문자열
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn into_claims(self) -> Claims {
        self.claims
    }

    /// 디코딩된 서명 바이트
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// 서명 입력 (원문의 `header.payload` 부분)
    pub fn signing_input(&self) -> &[u8] {
        &self.raw.as_bytes()[..self.signing_input_len]
    }

    /// 서명 검증을 통과한 적이 있는지 여부
    pub fn is_verified(&self) -> bool {
        self.verified_with.is_some()
    }

    /// 주어진 공개키로 이미 검증되었는지 여부
    pub fn is_verified_with(&self, key: &PublicKey) -> bool {
        self.verified_with == Some(key.fingerprint())
    }

    pub(crate) fn mark_verified(&mut self, fingerprint: [u8; 32]) {
        self.verified_with = Some(fingerprint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TokenData {
        let raw = "aGVhZGVy.cGF5bG9hZA.c2ln".to_string();
        TokenData::new(raw, Header::default(), Claims::new(), b"sig".to_vec(), 19)
    }

    #[test]
    fn test_signing_input_is_raw_prefix() {
        let data = sample();
        assert_eq!(data.signing_input(), b"aGVhZGVy.cGF5bG9hZA");
        assert_eq!(data.signature(), b"sig");
    }

    #[test]
    fn test_verification_cache_is_per_key() {
        let mut data = sample();
        let key = PublicKey::hmac("first");
        let other = PublicKey::hmac("second");
        assert!(!data.is_verified());

        data.mark_verified(key.fingerprint());
        assert!(data.is_verified());
        assert!(data.is_verified_with(&key));
        assert!(!data.is_verified_with(&other));
    }
}
