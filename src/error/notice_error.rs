//! Notice 统一错误类型

use super::code::ErrorCode;
use thiserror::Error;

/// 构建 notice 过程中的错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NoticeError {
    /// 缺少 API key（配置错误，构造时立即失败）
    #[error(
        "配置错误: 缺少 API key，上报错误必须提供所属项目的 API key"
    )]
    MissingApiKey,

    /// 配置内容无效
    #[error("配置错误: {0}")]
    Config(String),

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(String),
}

impl NoticeError {
    /// 创建配置错误
    pub fn config(msg: impl Into<String>) -> Self {
        NoticeError::Config(msg.into())
    }

    /// 创建 IO 错误
    pub fn io(msg: impl Into<String>) -> Self {
        NoticeError::Io(msg.into())
    }

    /// 获取错误代码
    pub fn code(&self) -> ErrorCode {
        match self {
            NoticeError::MissingApiKey => ErrorCode::MissingApiKey,
            NoticeError::Config(_) => ErrorCode::ConfigurationError,
            NoticeError::Io(_) => ErrorCode::IoError,
        }
    }

    /// 判断是否为致命的配置错误
    pub fn is_fatal(&self) -> bool {
        self.code().is_fatal()
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, NoticeError>;
