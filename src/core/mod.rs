//! # Core Module
//!
//! 라이브러리 전역에서 사용하는 에러 타입과 서명기 레지스트리를 제공합니다.
//!
//! ## 모듈 구성
//!
//! ### [`errors`] - 통합 에러 처리
//! - **JwtError**: 모든 실패 사유를 담는 닫힌 열거형
//! - **ErrorKind**: 메시지 문자열 대신 종류로 분기하기 위한 필드 없는 복사 타입
//!
//! ### [`registry`] - 서명기 레지스트리
//! - **SignerRegistry**: 알고리즘 식별자 → 서명기 불변 테이블
//! - **SignerRegistryBuilder**: 사용자 정의 서명기를 등록한 새 테이블 생성
//!
//! ```rust,ignore
//! use crate::core::registry::SignerRegistry;
//!
//! let signer = SignerRegistry::global().lookup(Algorithm::ES256)?;
//! ```

pub mod errors;
pub mod registry;
