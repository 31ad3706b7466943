//! 인센드 인증 토큰 라이브러리
//!
//! JWT 형식의 서명 토큰을 발급하고 검증합니다. 인증 후 토큰을 발급하고,
//! 이후 요청에서 제시된 토큰을 중앙 세션 저장소 없이 검증하는 데 사용합니다.
//!
//! # Features
//!
//! - **서명 알고리즘**: HS256/384/512, RS256/384/512 (PKCS#1 v1.5), ES256/384/512
//! - **코덱**: 패딩 없는 base64url 세 세그먼트, 원문 서명 입력 보존
//! - **클레임 검증**: 주입된 현재 시각 기준 exp/iat/nbf, 발급자/대상 확인
//! - **레지스트리**: 불변 서명기 테이블과 사용자 정의 서명기 빌더
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  TokenService   │ ← sign / parse / verify / validate
//! └─────────────────┘
//!     │         │
//!     ▼         ▼
//! ┌────────┐ ┌──────────────────┐
//! │ codec  │ │  SignerRegistry  │ ← HMAC / RSA / ECDSA
//! └────────┘ └──────────────────┘
//!     │
//!     ▼
//! ┌─────────────────┐
//! │ Header + Claims │ ← 도메인 모델
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use auth_token::{Claims, PrivateKey, TokenService, ValidationOptions};
//!
//! let service = TokenService::instance();
//! let key = PrivateKey::hmac(b"secret");
//!
//! let claims = Claims::issued_now(Utc::now(), Duration::hours(1)).with_subject("user-42");
//! let token = service.sign(&claims, None, &key, None)?;
//!
//! let data = service.validate_token(&token, &key.public_key(), Utc::now(), &ValidationOptions::new())?;
//! assert_eq!(data.claims().subject, "user-42");
//! ```

pub mod config;
pub mod core;
pub mod domain;
pub mod services;

pub use crate::core::errors::{ErrorKind, JwtError, JwtResult, Segment};
pub use crate::core::registry::{SignerRegistry, SignerRegistryBuilder};
pub use crate::domain::dto::tokens::TokenGrant;
pub use crate::domain::models::token::{Claims, Header, TokenData, TokenType};
pub use crate::services::auth::{TokenService, ValidationOptions};
pub use crate::services::signing::{Algorithm, PrivateKey, PublicKey, Signer};
