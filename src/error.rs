// ============================================
// src/error.rs
// アプリ全体のエラー型
// ============================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// 国・職種・文化・言語などのキーが不明
    #[error("unknown {kind} key: {key:?}")]
    InvalidKey { kind: &'static str, key: String },

    #[error("unknown resume template: {0:?}")]
    InvalidTemplate(String),

    /// 保存済み JSON が壊れている
    #[error("failed to parse stored data: {0}")]
    FatalParse(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to encode store: {0}")]
    Encode(#[from] bincode::error::EncodeError),
}

impl AppError {
    pub fn invalid_key(kind: &'static str, key: impl Into<String>) -> Self {
        Self::InvalidKey {
            kind,
            key: key.into(),
        }
    }
}
