//! 进程级系统属性快照
//!
//! 包含全部环境变量（原样使用变量名）以及 `os.*`、`process.*` 运行时信息。

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::value::NoticeValue;

/// 采集系统属性，无法读取的条目交给 `sink` 后跳过
pub fn system_properties(sink: &dyn DiagnosticSink) -> Vec<(String, NoticeValue)> {
    let mut properties: Vec<(String, NoticeValue)> = Vec::new();

    for (name, value) in std::env::vars_os() {
        match (name.into_string(), value.into_string()) {
            (Ok(name), Ok(value)) => properties.push((name, NoticeValue::Text(value))),
            (Ok(name), Err(_)) => sink.record(&Diagnostic::SkippedSystemProperty {
                name,
                reason: "value is not valid unicode".to_string(),
            }),
            (Err(name), _) => sink.record(&Diagnostic::SkippedSystemProperty {
                name: name.to_string_lossy().into_owned(),
                reason: "name is not valid unicode".to_string(),
            }),
        }
    }

    properties.push(("os.name".to_string(), std::env::consts::OS.into()));
    properties.push(("os.arch".to_string(), std::env::consts::ARCH.into()));
    properties.push(("os.family".to_string(), std::env::consts::FAMILY.into()));
    properties.push(("process.id".to_string(), std::process::id().into()));

    match std::env::current_exe() {
        Ok(path) => properties.push((
            "process.executable".to_string(),
            path.display().to_string().into(),
        )),
        Err(err) => sink.record(&Diagnostic::SkippedSystemProperty {
            name: "process.executable".to_string(),
            reason: err.to_string(),
        }),
    }

    match std::env::current_dir() {
        Ok(path) => properties.push((
            "process.current_dir".to_string(),
            path.display().to_string().into(),
        )),
        Err(err) => sink.record(&Diagnostic::SkippedSystemProperty {
            name: "process.current_dir".to_string(),
            reason: err.to_string(),
        }),
    }

    for (index, arg) in std::env::args_os().enumerate() {
        properties.push((
            format!("process.args.{}", index),
            arg.to_string_lossy().into_owned().into(),
        ));
    }

    properties
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NoopSink;

    #[test]
    fn includes_runtime_properties() {
        let properties = system_properties(&NoopSink);
        let get = |key: &str| properties.iter().find(|(k, _)| k == key).map(|(_, v)| v);

        assert_eq!(get("os.name"), Some(&NoticeValue::from(std::env::consts::OS)));
        assert_eq!(
            get("process.id"),
            Some(&NoticeValue::from(std::process::id()))
        );
        assert!(get("process.args.0").is_some());
    }
}
