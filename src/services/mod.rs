//! 서명과 토큰 처리를 담당하는 서비스 계층 모듈
//!
//! - [`signing`]: 알고리즘, 키, HMAC/RSA/ECDSA 서명기
//! - [`auth`]: 코덱, 클레임 검증, 토큰 수명주기 서비스
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::TokenService;
//!
//! let token_service = TokenService::instance();
//! ```

pub mod auth;
pub mod signing;
