//! Web 请求上下文
//!
//! notice 只读取请求中已经物化的数据：路径、查询串、session 属性和请求参数。
//! 具体 Web 框架通过实现 [`RequestContext`] 接入。

#[cfg(feature = "http")]
pub mod http;
pub mod snapshot;
mod table;

#[cfg(feature = "http")]
pub use self::http::HttpRequestContext;
pub use snapshot::{RequestSnapshot, SessionSnapshot};

use crate::value::NoticeValue;

/// 请求所属的 session
pub trait SessionAttributes {
    /// 属性名，按枚举顺序
    fn attribute_names(&self) -> Vec<String>;

    /// 属性值，不存在时返回 `None`
    fn attribute(&self, name: &str) -> Option<NoticeValue>;
}

/// 一次 Web 请求
pub trait RequestContext {
    /// 请求 URI
    ///
    /// 可以是路径（`/shop/cart`），也可以是绝对 URI（`https://host/shop/cart?x=1`）。
    /// 写入 notice 时只保留路径：scheme、authority、查询串与片段都会被去掉。
    fn request_uri(&self) -> &str;

    /// 完整查询串
    fn query_string(&self) -> Option<&str>;

    /// 应用的部署根路径
    fn context_path(&self) -> Option<&str>;

    /// 已存在的 session；不会因为读取而创建新 session
    fn session(&self) -> Option<&dyn SessionAttributes>;

    /// 请求参数名，按枚举顺序
    fn parameter_names(&self) -> Vec<String>;

    /// 参数的全部取值
    fn parameter_values(&self, name: &str) -> Option<Vec<String>>;
}
