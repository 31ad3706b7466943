//! # Configuration Module
//!
//! 환경 변수 기반 설정을 제공합니다. 각 설정은 연관 함수로 노출되며 값이 없으면
//! 기본값을 사용합니다.
//!
//! ```rust,ignore
//! use crate::config::JwtConfig;
//!
//! let key = JwtConfig::signing_key()?;
//! let ttl = Duration::hours(JwtConfig::expiration_hours());
//! ```

pub mod jwt_config;

pub use jwt_config::*;
