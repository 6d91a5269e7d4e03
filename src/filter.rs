//! environment 过滤模式匹配
//!
//! 过滤模式只有一个通配符 `*`，匹配任意长度（可为空）的字符序列，
//! 通配符以外的部分区分大小写、逐字匹配。

/// 云平台凭据相关的过滤模式
pub const CLOUD_ENVIRONMENT_FILTERS: [&str; 4] =
    ["AWS_SECRET", "EC2_PRIVATE_KEY", "AWS_ACCESS", "EC2_CERT"];

/// 运行时/工具链相关的过滤模式
///
/// 对应托管运行时里按平台划分的四类属性，映射到 Rust 进程能采集到的 key：
///
/// | 属性类别 | 模式 |
/// |---|---|
/// | 运行时厂商 | `RUSTUP_*`（工具链安装与通道） |
/// | 运行时构建信息 | `CARGO_*`（cargo 注入的包与构建变量） |
/// | 类路径 | `process.executable`（可执行文件路径） |
/// | 启动参数 | `process.args.*`（命令行参数） |
///
/// 都可能暴露本机路径或部署细节，默认不随 notice 发送。
pub const STANDARD_ENVIRONMENT_FILTERS: [&str; 4] = [
    "RUSTUP_*",
    "CARGO_*",
    "process.executable",
    "process.args.*",
];

/// 通配符
const WILDCARD: u8 = b'*';

/// 判断 key 是否匹配单个过滤模式
///
/// ```
/// use flare_notice::filter::matches;
///
/// assert!(matches("java.vendor.*", "java.vendor.url"));
/// assert!(!matches("java.vendor.*", "java.vendor"));
/// ```
pub fn matches(pattern: &str, key: &str) -> bool {
    // 按字节匹配：`*` 是 ASCII，UTF-8 多字节序列不会与之混淆
    let p = pattern.as_bytes();
    let k = key.as_bytes();

    let (mut pi, mut ki) = (0usize, 0usize);
    // 最近一次通配符的位置，以及它当前吞掉的 key 起点
    let mut backtrack: Option<(usize, usize)> = None;

    while ki < k.len() {
        if pi < p.len() && p[pi] == WILDCARD {
            backtrack = Some((pi, ki));
            pi += 1;
        } else if pi < p.len() && p[pi] == k[ki] {
            pi += 1;
            ki += 1;
        } else if let Some((star, start)) = backtrack {
            pi = star + 1;
            ki = start + 1;
            backtrack = Some((star, start + 1));
        } else {
            return false;
        }
    }

    p[pi..].iter().all(|&b| b == WILDCARD)
}

/// 判断 key 是否匹配任意一个过滤模式
pub fn matches_any<S: AsRef<str>>(key: &str, patterns: &[S]) -> bool {
    patterns.iter().any(|pattern| matches(pattern.as_ref(), key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_wildcard_requires_literal_prefix() {
        assert!(matches("java.vendor.*", "java.vendor.url"));
        assert!(matches("java.vendor.*", "java.vendor."));
        assert!(!matches("java.vendor.*", "java.vendor"));
        assert!(!matches("java.vendor.*", "java.version"));
    }

    #[test]
    fn pattern_without_wildcard_is_exact() {
        assert!(matches("AWS_SECRET", "AWS_SECRET"));
        assert!(!matches("AWS_SECRET", "AWS_SECRET_ACCESS_KEY"));
        assert!(!matches("AWS_SECRET", "aws_secret"));
    }

    #[test]
    fn leading_and_inner_wildcards() {
        assert!(matches("*_TOKEN", "GITHUB_TOKEN"));
        assert!(!matches("*_TOKEN", "GITHUB_TOKENS"));
        assert!(matches("java.*.path", "java.class.path"));
        assert!(matches("java.*.path", "java.library.extra.path"));
        assert!(!matches("java.*.path", "java.class.paths"));
        assert!(matches("a*b*c", "aXXbYYbc"));
        assert!(matches("*", ""));
        assert!(!matches("", "x"));
    }

    #[test]
    fn matches_any_checks_every_pattern() {
        let patterns = vec!["CARGO_*".to_string(), "EC2_CERT".to_string()];
        assert!(matches_any("CARGO_HOME", &patterns));
        assert!(matches_any("EC2_CERT", &patterns));
        assert!(!matches_any("HOME", &patterns));
    }
}
