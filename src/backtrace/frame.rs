//! 栈帧与 `std::backtrace::Backtrace` 文本解析

use serde::{Deserialize, Serialize};
use std::fmt;

/// 单个栈帧
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackFrame {
    /// 函数（符号）名
    pub function: String,
    /// 源文件路径
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// 行号
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// 列号
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl StackFrame {
    /// 创建只有函数名的栈帧
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            file: None,
            line: None,
            column: None,
        }
    }

    /// 设置源码位置
    #[must_use]
    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    /// 设置列号
    #[must_use]
    pub fn with_column(mut self, column: u32) -> Self {
        self.column = Some(column);
        self
    }

    /// 解析 `std::backtrace::Backtrace` 的 Display 输出
    ///
    /// 输出形如：
    ///
    /// ```text
    ///    0: my_crate::handler
    ///              at ./src/handler.rs:42:9
    ///    1: core::ops::function::FnOnce::call_once
    /// ```
    ///
    /// 未启用或不支持的 backtrace（`disabled backtrace` / `unsupported backtrace`）
    /// 解析结果为空。
    pub fn parse_backtrace(text: &str) -> Vec<StackFrame> {
        let mut frames: Vec<StackFrame> = Vec::new();

        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(location) = line.strip_prefix("at ") {
                if let Some(frame) = frames.last_mut() {
                    apply_location(frame, location);
                }
                continue;
            }

            if let Some(function) = parse_symbol_line(line) {
                frames.push(StackFrame::new(function));
            }
        }

        frames
    }
}

/// 解析 `  12: some::function` 形式的行
fn parse_symbol_line(line: &str) -> Option<&str> {
    let (index, function) = line.split_once(": ")?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let function = function.trim();
    (!function.is_empty()).then_some(function)
}

/// 解析 `path:line:column`，路径本身可能含有 `:`
fn apply_location(frame: &mut StackFrame, location: &str) {
    let mut parts = location.rsplitn(3, ':');
    let column = parts.next();
    let line = parts.next();
    let file = parts.next();

    match (file, line, column) {
        (Some(file), Some(line), Some(column)) => {
            frame.file = Some(file.to_string());
            frame.line = line.parse().ok();
            frame.column = column.parse().ok();
        }
        _ => frame.file = Some(location.to_string()),
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "{}:{}:in `{}`", file, line, self.function),
            (Some(file), None) => write!(f, "{}:in `{}`", file, self.function),
            _ => write!(f, "{}", self.function),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "   0: flare_app::handler::checkout
             at ./src/handler.rs:42:9
   1: flare_app::main
             at C:\\work\\app\\src\\main.rs:7:5
   2: core::ops::function::FnOnce::call_once
";

    #[test]
    fn parses_frames_in_order() {
        let frames = StackFrame::parse_backtrace(SAMPLE);
        assert_eq!(frames.len(), 3);

        assert_eq!(frames[0].function, "flare_app::handler::checkout");
        assert_eq!(frames[0].file.as_deref(), Some("./src/handler.rs"));
        assert_eq!(frames[0].line, Some(42));
        assert_eq!(frames[0].column, Some(9));

        assert_eq!(frames[1].file.as_deref(), Some("C:\\work\\app\\src\\main.rs"));
        assert_eq!(frames[1].line, Some(7));

        assert_eq!(frames[2].file, None);
    }

    #[test]
    fn disabled_backtrace_has_no_frames() {
        assert!(StackFrame::parse_backtrace("disabled backtrace").is_empty());
        assert!(StackFrame::parse_backtrace("unsupported backtrace").is_empty());
        assert!(StackFrame::parse_backtrace("").is_empty());
    }

    #[test]
    fn display_includes_location_when_known() {
        let frame = StackFrame::new("app::run").with_location("src/app.rs", 10);
        assert_eq!(frame.to_string(), "src/app.rs:10:in `app::run`");
        assert_eq!(StackFrame::new("app::run").to_string(), "app::run");
    }
}
