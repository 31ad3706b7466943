//! 토큰 인증 서비스 모듈
//!
//! 와이어 형식 코덱, 클레임 검증, 그리고 이 둘과 서명 레지스트리를 조합하는
//! 토큰 수명주기 서비스를 제공합니다.
//!
//! # Security
//!
//! - 서명 검증은 항상 원문 서명 입력(`header.payload`)에 대해 수행
//! - 키 종류와 알고리즘 불일치는 암호 연산 전에 거부
//! - 알고리즘 식별자는 대소문자를 구분
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{TokenService, ValidationOptions};
//!
//! let service = TokenService::instance();
//! let token = service.sign(&claims, None, &private_key, None)?;
//!
//! let data = service.validate_token(&token, &public_key, Utc::now(), &ValidationOptions::from_env())?;
//! ```

pub mod codec;
pub mod token_service;
pub mod validation;

pub use token_service::*;
pub use validation::*;
