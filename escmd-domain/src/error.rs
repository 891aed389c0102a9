//! 仓储错误
//!
//! 仓储实现产生的所有失败都以 `DomainError` 表达，分发器将其原样交给调用方。
//!
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    /// 实体在写入或读取时无法（反）序列化
    #[error("entity serialization failed: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },

    /// 仓储自身拒绝了请求
    #[error("store rejected request: {reason}")]
    Repository { reason: String },

    /// 底层存储不可用
    #[error("storage backend failure: {reason}")]
    Database { reason: String },

    /// 提交的版本不新于已存储的版本
    #[error("version conflict on entity {id}: expected version above {expected}, got {actual}")]
    VersionConflict {
        id: String,
        expected: usize,
        actual: usize,
    },
}

pub type DomainResult<T> = Result<T, DomainError>;
