//! 토큰 와이어 형식 코덱
//!
//! `header.payload.signature` 세 세그먼트를 패딩 없는 base64url로 인코딩/디코딩합니다.
//! 분해 시 서명 입력은 원문 문자열의 앞부분을 그대로 사용합니다. 파싱한 헤더와
//! 클레임을 다시 직렬화하면 필드 순서가 바뀔 수 있으므로 재인코딩하지 않습니다.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::errors::{JwtError, JwtResult, Segment};
use crate::domain::models::token::{Claims, Header};

const SEPARATOR: char = '.';

/// 바이트를 base64url(패딩 없음) 세그먼트로 인코딩합니다.
pub fn encode_segment(bytes: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// base64url 세그먼트를 디코딩합니다. 실패하면 해당 세그먼트를 지목합니다.
pub fn decode_segment(segment: Segment, encoded: &str) -> JwtResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|e| JwtError::malformed(segment, e))
}

/// 세그먼트 단위로 분해된 토큰
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitToken<'a> {
    /// 디코딩된 헤더 JSON 바이트
    pub header: Vec<u8>,
    /// 디코딩된 페이로드 JSON 바이트
    pub payload: Vec<u8>,
    /// 디코딩된 서명 바이트
    pub signature: Vec<u8>,
    /// 원문의 `header.payload` 부분
    pub signing_input: &'a str,
}

impl SplitToken<'_> {
    pub fn header<T: DeserializeOwned>(&self) -> JwtResult<T> {
        from_json(Segment::Header, &self.header)
    }

    pub fn payload<T: DeserializeOwned>(&self) -> JwtResult<T> {
        from_json(Segment::Payload, &self.payload)
    }
}

fn from_json<T: DeserializeOwned>(segment: Segment, bytes: &[u8]) -> JwtResult<T> {
    serde_json::from_slice(bytes).map_err(|e| JwtError::malformed(segment, e))
}

fn to_json<T: Serialize>(segment: Segment, value: &T) -> JwtResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| JwtError::malformed(segment, e))
}

/// 토큰 문자열을 세 세그먼트로 분해합니다.
///
/// # Errors
///
/// * `JwtError::NilToken` - 빈 문자열
/// * `JwtError::MalformedToken` - 세그먼트 수가 3이 아니거나 base64url 디코딩 실패.
///   누락된 경우 처음으로 빠진 세그먼트를, 4개 이상이면 `Signature`를 지목합니다.
pub fn split(token: &str) -> JwtResult<SplitToken<'_>> {
    if token.is_empty() {
        return Err(JwtError::NilToken);
    }

    let mut parts = token.split(SEPARATOR);
    let header = parts.next().unwrap_or_default();
    let payload = parts
        .next()
        .ok_or_else(|| JwtError::malformed(Segment::Payload, "missing segment"))?;
    let signature = parts
        .next()
        .ok_or_else(|| JwtError::malformed(Segment::Signature, "missing segment"))?;
    if parts.next().is_some() {
        return Err(JwtError::malformed(
            Segment::Signature,
            "token contains more than three segments",
        ));
    }

    let signing_input_len = header.len() + SEPARATOR.len_utf8() + payload.len();

    Ok(SplitToken {
        header: decode_segment(Segment::Header, header)?,
        payload: decode_segment(Segment::Payload, payload)?,
        signature: decode_segment(Segment::Signature, signature)?,
        signing_input: &token[..signing_input_len],
    })
}

/// 헤더와 클레임을 서명 입력 문자열(`header.payload`)로 인코딩합니다.
///
/// 0 또는 빈 값인 클레임 필드는 생략됩니다.
pub fn encode(header: &Header, claims: &Claims) -> JwtResult<String> {
    let header = to_json(Segment::Header, header)?;
    let payload = to_json(Segment::Payload, claims)?;
    Ok(format!(
        "{}{}{}",
        encode_segment(header),
        SEPARATOR,
        encode_segment(payload)
    ))
}

/// 서명 입력 뒤에 서명 세그먼트를 붙여 완성된 토큰을 만듭니다.
pub fn assemble(signing_input: &str, signature: &[u8]) -> String {
    format!("{}{}{}", signing_input, SEPARATOR, encode_segment(signature))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ErrorKind;
    use crate::services::signing::Algorithm;

    fn malformed_segment(token: &str) -> Segment {
        let err = split(token).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedToken, "{}", err);
        err.segment().unwrap()
    }

    #[test]
    fn test_segment_encoding_is_unpadded_url_safe() {
        assert_eq!(encode_segment([0xfb, 0xff]), "-_8");
        assert_eq!(decode_segment(Segment::Payload, "-_8").unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn test_padded_or_standard_alphabet_rejected() {
        assert!(decode_segment(Segment::Header, "-_8=").is_err());
        assert!(decode_segment(Segment::Header, "+/8").is_err());
    }

    #[test]
    fn test_split_keeps_literal_signing_input() {
        // 공백과 필드 순서가 표준 직렬화와 다른 헤더
        let header = encode_segment(r#"{ "typ":"JWT",  "alg":"HS256" }"#);
        let payload = encode_segment(r#"{"sub":"user-1"}"#);
        let token = format!("{}.{}.{}", header, payload, encode_segment(b"sig"));

        let split = split(&token).unwrap();
        assert_eq!(split.signing_input, format!("{}.{}", header, payload));
        assert_eq!(split.signature, b"sig");

        let parsed: Header = split.header().unwrap();
        assert_eq!(parsed.alg, "HS256");
        let claims: Claims = split.payload().unwrap();
        assert_eq!(claims.subject, "user-1");
    }

    #[test]
    fn test_empty_token_is_nil() {
        assert_eq!(split("").unwrap_err(), JwtError::NilToken);
    }

    #[test]
    fn test_missing_segments_are_named() {
        assert_eq!(malformed_segment("abc"), Segment::Payload);
        assert_eq!(malformed_segment("abc.def"), Segment::Signature);
        assert_eq!(malformed_segment("abc.def.ghi.jkl"), Segment::Signature);
    }

    #[test]
    fn test_decode_failure_names_segment() {
        let good = encode_segment("{}");
        assert_eq!(malformed_segment(&format!("!!.{}.{}", good, good)), Segment::Header);
        assert_eq!(malformed_segment(&format!("{}.!!.{}", good, good)), Segment::Payload);
        assert_eq!(malformed_segment(&format!("{}.{}.!!", good, good)), Segment::Signature);
    }

    #[test]
    fn test_invalid_json_names_segment() {
        let garbage = encode_segment("not json");
        let token = format!("{}.{}.", garbage, garbage);
        let split = split(&token).unwrap();
        assert!(split.signature.is_empty());
        assert_eq!(split.header::<Header>().unwrap_err().segment(), Some(Segment::Header));
        assert_eq!(split.payload::<Claims>().unwrap_err().segment(), Some(Segment::Payload));
    }

    #[test]
    fn test_encode_omits_zero_claims() {
        let input = encode(&Header::new(Algorithm::HS256), &Claims::new()).unwrap();
        let (header, payload) = input.split_once('.').unwrap();
        assert_eq!(
            decode_segment(Segment::Header, header).unwrap(),
            br#"{"alg":"HS256","typ":"JWT"}"#
        );
        assert_eq!(decode_segment(Segment::Payload, payload).unwrap(), b"{}");
    }

    #[test]
    fn test_assemble_then_split() {
        let input = encode(&Header::new(Algorithm::ES256), &Claims::new().with_subject("a")).unwrap();
        let token = assemble(&input, &[1, 2, 3]);
        let split = split(&token).unwrap();
        assert_eq!(split.signing_input, input);
        assert_eq!(split.signature, vec![1, 2, 3]);
    }
}
