//! 데이터 전송 객체
//!
//! 라이브러리 경계 밖으로 나가는 응답 형태를 정의합니다.

pub mod tokens;

pub use tokens::*;
