//! 调用栈提取策略

use super::captured::CapturedError;

/// 把错误的调用栈转换为 notice 中的 backtrace 行
pub trait BacktraceExtractor: Send + Sync {
    fn extract(&self, error: &CapturedError) -> Vec<String>;
}

/// 默认策略：每个栈帧一行，保持顺序和完整深度
///
/// 没有栈帧的错误得到空列表。
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameExtractor;

impl BacktraceExtractor for FrameExtractor {
    fn extract(&self, error: &CapturedError) -> Vec<String> {
        error.frames().iter().map(ToString::to_string).collect()
    }
}

/// 只保留最内层的 N 个栈帧
#[derive(Debug, Clone, Copy)]
pub struct TruncatingExtractor {
    max_frames: usize,
}

impl TruncatingExtractor {
    pub fn new(max_frames: usize) -> Self {
        Self { max_frames }
    }

    pub fn max_frames(&self) -> usize {
        self.max_frames
    }
}

impl BacktraceExtractor for TruncatingExtractor {
    fn extract(&self, error: &CapturedError) -> Vec<String> {
        error
            .frames()
            .iter()
            .take(self.max_frames)
            .map(ToString::to_string)
            .collect()
    }
}

impl<F> BacktraceExtractor for F
where
    F: Fn(&CapturedError) -> Vec<String> + Send + Sync,
{
    fn extract(&self, error: &CapturedError) -> Vec<String> {
        self(error)
    }
}
