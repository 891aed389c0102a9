use escmd_domain::error::DomainError;

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// 仓储（协作者）在加载或提交时返回的错误，原样透传
    #[error("store: {0}")]
    Store(#[from] DomainError),

    #[error("invalid command: {0}")]
    InvalidCommand(String),

    #[error("reserved command name: {0}")]
    ReservedCommand(String),

    #[error("handler already registered: command={command}")]
    AlreadyRegisteredCommand { command: String },

    #[error("invalid entity id: {0:?}")]
    InvalidEntityId(String),

    #[error("unable to load entity {0}")]
    EntityNotFound(String),

    #[error("invalid message: {0}")]
    InvalidMessage(String),

    #[error("serialization: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("validation: {0}")]
    Validation(String),
}

pub type AppResult<T> = Result<T, AppError>;
