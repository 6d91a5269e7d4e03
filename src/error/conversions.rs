//! 错误类型转换实现

use super::NoticeError;
use std::io;

impl From<io::Error> for NoticeError {
    fn from(err: io::Error) -> Self {
        NoticeError::io(err.to_string())
    }
}

impl From<toml::de::Error> for NoticeError {
    fn from(err: toml::de::Error) -> Self {
        NoticeError::config(format!("TOML 解析错误: {}", err))
    }
}
