//! 错误代码和错误类别定义

use serde::{Deserialize, Serialize};
use std::fmt;

/// 错误代码枚举
///
/// 错误代码按类别分组，每个类别占用1000个代码范围：
/// - 6000-6999: 配置相关错误
/// - 7000-7999: IO 相关错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum ErrorCode {
    // ============================================================
    // 配置相关错误 (6000-6999)
    // ============================================================
    ConfigurationError = 6003,
    MissingApiKey = 6005,

    // ============================================================
    // IO 相关错误 (7000-7999)
    // ============================================================
    IoError = 7004,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ErrorCode {
    /// 获取错误代码的数字值
    #[inline]
    pub fn as_u32(&self) -> u32 {
        *self as u32
    }

    /// 从数字值创建错误代码
    pub fn from_u32(code: u32) -> Option<Self> {
        match code {
            6003 => Some(ErrorCode::ConfigurationError),
            6005 => Some(ErrorCode::MissingApiKey),
            7004 => Some(ErrorCode::IoError),
            _ => None,
        }
    }

    /// 获取错误代码的英文标识符
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigurationError => "CONFIGURATION_ERROR",
            ErrorCode::MissingApiKey => "MISSING_API_KEY",
            ErrorCode::IoError => "IO_ERROR",
        }
    }

    /// 获取错误代码的类别
    pub fn category(&self) -> ErrorCategory {
        match self.as_u32() {
            6000..=6999 => ErrorCategory::Configuration,
            _ => ErrorCategory::Io,
        }
    }

    /// 是否为致命错误（调用方无法通过重试恢复）
    pub fn is_fatal(&self) -> bool {
        matches!(self.category(), ErrorCategory::Configuration)
    }
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    Configuration,
    Io,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Configuration => write!(f, "CONFIGURATION"),
            ErrorCategory::Io => write!(f, "IO"),
        }
    }
}
