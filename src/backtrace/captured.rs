//! 被上报的错误对象

use super::frame::StackFrame;
use std::backtrace::Backtrace;

/// 捕获到的错误：类型名、消息以及调用栈
///
/// Rust 的错误值本身不携带调用栈，因此在上报点把它们收集到一起。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedError {
    type_name: String,
    message: Option<String>,
    frames: Vec<StackFrame>,
}

impl CapturedError {
    /// 创建没有栈帧的错误
    pub fn new(type_name: impl Into<String>, message: Option<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message,
            frames: Vec::new(),
        }
    }

    /// 设置栈帧
    #[must_use]
    pub fn with_frames(mut self, frames: Vec<StackFrame>) -> Self {
        self.frames = frames;
        self
    }

    /// 从 `std::backtrace::Backtrace` 读取栈帧
    #[must_use]
    pub fn with_backtrace(self, backtrace: &Backtrace) -> Self {
        self.with_frames(StackFrame::parse_backtrace(&backtrace.to_string()))
    }

    /// 捕获任意错误值，并强制采集当前调用栈
    ///
    /// 类型名取自静态类型 `E`，因此只接受具体类型。
    /// 不受 `RUST_BACKTRACE` 影响。
    pub fn capture<E>(error: &E) -> Self
    where
        E: std::error::Error + 'static,
    {
        Self::capture_dyn(error, std::any::type_name::<E>())
    }

    /// 捕获类型已被擦除的错误（如 `Box<dyn Error>`），类型名由调用方给出
    pub fn capture_dyn(
        error: &(dyn std::error::Error + 'static),
        type_name: impl Into<String>,
    ) -> Self {
        Self::new(type_name, Some(error.to_string()))
            .with_backtrace(&Backtrace::force_capture())
    }

    /// 从 `anyhow::Error` 构建，使用其自带的调用栈
    ///
    /// `anyhow` 擦除了具体类型，类型名固定为 `anyhow::Error`。
    pub fn from_anyhow(error: &anyhow::Error) -> Self {
        Self::new("anyhow::Error", Some(error.to_string())).with_backtrace(error.backtrace())
    }

    /// 错误的完整类型名
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// 错误消息
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// 栈帧，最内层在前
    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }
}
