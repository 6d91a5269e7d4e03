//! Flare Notice 错误处理模块
//!
//! 构建 notice 时唯一的致命错误是缺少 API key，其余输入问题都会回落到默认值

pub mod code;
pub mod conversions;
pub mod notice_error;

// 重新导出公共类型
pub use code::{ErrorCategory, ErrorCode};
pub use notice_error::{NoticeError, Result};
