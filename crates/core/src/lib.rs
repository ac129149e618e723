#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod health;
pub mod metrics;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, DiscoveryFailure, MissionControlError};

// 설정
pub use config::MissionControlConfig;

// 헬스 상태
pub use health::HealthStatus;
