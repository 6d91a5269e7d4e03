//! Flare Notice Library
//!
//! Assembles immutable error-report notices from a captured error, an incoming
//! web request, session data, environment data and system properties, with
//! pattern-based environment filters for the delivery side.
//!
//! ```
//! use flare_notice::NoticeBuilder;
//!
//! let notice = NoticeBuilder::new("key123", "boom")?.build();
//! assert_eq!(notice.error_message(), "boom");
//! assert_eq!(notice.environment_name(), "test");
//! assert_eq!(notice.backtrace(), ["backtrace is empty"]);
//! # Ok::<(), flare_notice::NoticeError>(())
//! ```

pub mod backtrace;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod filter;
pub mod notice;
pub mod request;
pub mod system;
pub mod value;

// Re-exports
pub use backtrace::{
    BacktraceExtractor, CapturedError, FrameExtractor, StackFrame, TruncatingExtractor,
};
pub use config::NoticeConfig;
pub use diagnostics::{Diagnostic, DiagnosticSink, NoopSink, RecordingSink, TracingSink};
pub use error::{ErrorCategory, ErrorCode, NoticeError, Result};
pub use notice::{Notice, NoticeBuilder};
#[cfg(feature = "http")]
pub use request::HttpRequestContext;
pub use request::{RequestContext, RequestSnapshot, SessionAttributes, SessionSnapshot};
pub use value::{NoticeValue, ParamMap};
