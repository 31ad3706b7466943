//! # Domain Models Module
//!
//! 토큰의 값 객체를 정의합니다.
//!
//! ```text
//! models/
//! └── token/
//!     ├── header.rs   ← 헤더 (alg, typ, 추가 필드)
//!     ├── claims.rs   ← 클레임 (표준 필드 + 권한 + 확장 필드)
//!     └── token.rs    ← 파싱된 토큰 (원문, 서명 입력, 검증 캐시)
//! ```
//!
//! 클레임은 서명 입력이 계산된 뒤 변경하지 않습니다. 변경하면 이미 계산된
//! 서명이 무효가 됩니다.

pub mod token;

pub use token::*;
