//! 错误调用栈的采集与提取

pub mod captured;
pub mod extractor;
pub mod frame;

pub use captured::CapturedError;
pub use extractor::{BacktraceExtractor, FrameExtractor, TruncatingExtractor};
pub use frame::StackFrame;

/// 从未设置过 backtrace 时使用的占位行
pub const EMPTY_BACKTRACE_PLACEHOLDER: &str = "backtrace is empty";
