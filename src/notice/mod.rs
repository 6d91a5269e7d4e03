//! Notice 构建与快照

pub mod builder;
pub mod snapshot;

pub use builder::NoticeBuilder;
pub use snapshot::Notice;
