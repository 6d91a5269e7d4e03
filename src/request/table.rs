//! 请求参数表

use std::collections::HashMap;

/// 按首次出现顺序保存的参数表，同名参数经由索引定位
#[derive(Debug, Clone, Default)]
pub(crate) struct ParameterTable {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl ParameterTable {
    fn slot(&mut self, name: &str) -> &mut Vec<String> {
        let pos = match self.index.get(name) {
            Some(&pos) => pos,
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push((name.to_string(), Vec::new()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[pos].1
    }

    /// 追加一个取值
    pub(crate) fn push(&mut self, name: &str, value: String) {
        self.slot(name).push(value);
    }

    /// 整体设置取值，允许为空
    pub(crate) fn set(&mut self, name: &str, values: Vec<String>) {
        *self.slot(name) = values;
    }

    pub(crate) fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(n, _)| n.clone()).collect()
    }

    pub(crate) fn values(&self, name: &str) -> Option<Vec<String>> {
        self.index.get(name).map(|&pos| self.entries[pos].1.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_values_by_first_appearance() {
        let mut table = ParameterTable::default();
        table.push("tag", "a".to_string());
        table.push("q", "x".to_string());
        table.push("tag", "b".to_string());
        table.set("empty", Vec::new());

        assert_eq!(table.names(), vec!["tag", "q", "empty"]);
        assert_eq!(
            table.values("tag"),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(table.values("empty"), Some(Vec::new()));
        assert_eq!(table.values("missing"), None);
    }
}
