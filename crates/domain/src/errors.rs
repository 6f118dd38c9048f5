use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepositoryError {
    /// 存储操作失败（连接、语句执行、事务提交）
    #[error("storage error: {message}")]
    Storage { message: String },

    /// 行数据无法映射回领域对象
    #[error("invalid data: {message}")]
    InvalidData { message: String },

    /// 参数校验失败
    #[error("invalid argument: {field}: {message}")]
    InvalidArgument { field: String, message: String },
}

impl RepositoryError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
