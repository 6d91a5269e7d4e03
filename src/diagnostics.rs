//! 诊断输出
//!
//! 提取过程中丢弃数据不是错误，只会以诊断事件的形式交给注入的 [`DiagnosticSink`]。

use std::sync::Mutex;
use tracing::trace;

/// 非致命的诊断事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// session 属性不是简单值，未写入 notice
    DroppedSessionAttribute {
        /// 属性名
        name: String,
        /// 被丢弃值的描述
        kind: String,
    },
    /// 不透明值无法安全序列化，未写入 notice
    DroppedOpaqueValue {
        /// 所在区域：environment / session / request
        section: String,
        /// key
        name: String,
    },
    /// 系统属性无法读取，已跳过
    SkippedSystemProperty {
        /// 属性名
        name: String,
        /// 失败原因
        reason: String,
    },
}

/// 诊断事件接收方
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, diagnostic: &Diagnostic);
}

/// 基于 tracing 的默认实现
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::DroppedSessionAttribute { name, kind } => {
                trace!(
                    attribute = %name,
                    kind = %kind,
                    "Unable to send session attribute as it was not a simple value"
                );
            }
            Diagnostic::DroppedOpaqueValue { section, name } => {
                trace!(
                    section = %section,
                    key = %name,
                    "Unable to send value as it cannot be safely serialized"
                );
            }
            Diagnostic::SkippedSystemProperty { name, reason } => {
                trace!(property = %name, reason = %reason, "Skipped unreadable system property");
            }
        }
    }
}

/// 丢弃所有事件
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn record(&self, _diagnostic: &Diagnostic) {}
}

/// 把事件记在内存里，便于调用方检查
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取出目前记录的全部事件
    pub fn events(&self) -> Vec<Diagnostic> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, diagnostic: &Diagnostic) {
        match self.events.lock() {
            Ok(mut events) => events.push(diagnostic.clone()),
            Err(poisoned) => poisoned.into_inner().push(diagnostic.clone()),
        }
    }
}
