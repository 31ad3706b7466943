//! 토큰 도메인 모델
//!
//! 헤더, 클레임, 그리고 파싱된 토큰을 정의합니다.

pub mod claims;
pub mod header;
pub mod token;

pub use claims::*;
pub use header::*;
pub use token::*;
