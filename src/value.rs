//! notice 中可传输的值
//!
//! environment / request / session 中的值都会先收敛为 [`NoticeValue`]，
//! 只有 `Text` 与 `Number` 被视为可安全序列化的标量。

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// 带标签的 notice 值
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NoticeValue {
    /// 字符串
    Text(String),
    /// 数字
    Number(serde_json::Number),
    /// 布尔值
    Bool(bool),
    /// 有序列表（多值请求参数）
    List(Vec<NoticeValue>),
    /// 无法安全序列化的复合值，只保留其描述
    Opaque(String),
}

impl NoticeValue {
    /// 创建不透明值
    pub fn opaque(description: impl Into<String>) -> Self {
        NoticeValue::Opaque(description.into())
    }

    /// 是否为可传输的标量（字符串或数字）
    #[inline]
    pub fn is_scalar(&self) -> bool {
        matches!(self, NoticeValue::Text(_) | NoticeValue::Number(_))
    }

    /// 是否可以写入 notice：不透明值以及包含不透明值的列表都不行
    pub fn is_transmittable(&self) -> bool {
        match self {
            NoticeValue::Opaque(_) => false,
            NoticeValue::List(items) => items.iter().all(NoticeValue::is_transmittable),
            _ => true,
        }
    }

    /// 值的种类，用于诊断输出
    pub fn kind(&self) -> &'static str {
        match self {
            NoticeValue::Text(_) => "text",
            NoticeValue::Number(_) => "number",
            NoticeValue::Bool(_) => "bool",
            NoticeValue::List(_) => "list",
            NoticeValue::Opaque(_) => "opaque",
        }
    }

    /// 获取字符串内容
    pub fn as_str(&self) -> Option<&str> {
        match self {
            NoticeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// 获取列表内容
    pub fn as_list(&self) -> Option<&[NoticeValue]> {
        match self {
            NoticeValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// 获取 i64 数值
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            NoticeValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }
}

impl fmt::Display for NoticeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeValue::Text(s) => write!(f, "{}", s),
            NoticeValue::Number(n) => write!(f, "{}", n),
            NoticeValue::Bool(b) => write!(f, "{}", b),
            NoticeValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            NoticeValue::Opaque(desc) => write!(f, "<{}>", desc),
        }
    }
}

impl From<String> for NoticeValue {
    fn from(value: String) -> Self {
        NoticeValue::Text(value)
    }
}

impl From<&str> for NoticeValue {
    fn from(value: &str) -> Self {
        NoticeValue::Text(value.to_string())
    }
}

impl From<bool> for NoticeValue {
    fn from(value: bool) -> Self {
        NoticeValue::Bool(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for NoticeValue {
                fn from(value: $ty) -> Self {
                    NoticeValue::Number(serde_json::Number::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for NoticeValue {
    /// 非有限浮点数（NaN / 无穷）无法作为 JSON 数字传输，降级为不透明值
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(NoticeValue::Number)
            .unwrap_or_else(|| NoticeValue::Opaque(value.to_string()))
    }
}

impl From<Vec<String>> for NoticeValue {
    fn from(values: Vec<String>) -> Self {
        NoticeValue::List(values.into_iter().map(NoticeValue::Text).collect())
    }
}

impl From<serde_json::Value> for NoticeValue {
    /// 对象与 null 不是可传输的值，转换为不透明值
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => NoticeValue::Text(s),
            serde_json::Value::Number(n) => NoticeValue::Number(n),
            serde_json::Value::Bool(b) => NoticeValue::Bool(b),
            serde_json::Value::Array(items) => {
                NoticeValue::List(items.into_iter().map(NoticeValue::from).collect())
            }
            serde_json::Value::Null => NoticeValue::opaque("null"),
            serde_json::Value::Object(_) => NoticeValue::opaque("object"),
        }
    }
}

/// 保持插入顺序、键唯一的映射
///
/// 重复插入同一个键时原位覆盖，不改变该键的位置。查找与插入经由 key 索引完成。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamMap {
    entries: Vec<(String, NoticeValue)>,
    index: HashMap<String, usize>,
}

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入或覆盖，返回旧值
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<NoticeValue>,
    ) -> Option<NoticeValue> {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&NoticeValue> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NoticeValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// 合并另一组键值，已有键原位覆盖
    pub fn extend<I, K, V>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<NoticeValue>,
    {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }

    /// 只保留满足条件的条目，保持原有顺序
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &NoticeValue) -> bool,
    {
        self.entries.retain(|(k, v)| keep(k, v));
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(pos, (k, _))| (k.clone(), pos))
            .collect();
    }
}

impl<K, V> FromIterator<(K, V)> for ParamMap
where
    K: Into<String>,
    V: Into<NoticeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ParamMap::new();
        map.extend(iter);
        map
    }
}

impl Serialize for ParamMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
