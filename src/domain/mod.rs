//! # Domain Layer Module
//!
//! 토큰의 데이터 구조를 담당하는 계층입니다. 서명, 인코딩, 검증 로직은
//! 서비스 계층(`services`)에 있고 이 모듈은 값 객체만 정의합니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Models  - Header, Claims, TokenData
//! └── DTOs    - TokenGrant (토큰 + 만료 시각)
//!      │
//!      ▼
//! Service Layer (codec, signing, validation)
//! ```
//!
//! ## 와이어 형식
//!
//! ```text
//! base64url(header JSON) . base64url(payload JSON) . base64url(signature)
//! ```
//!
//! 모든 세그먼트는 패딩 없는 base64url 알파벳을 사용합니다.

pub mod dto;
pub mod models;

pub use dto::*;
pub use models::*;
