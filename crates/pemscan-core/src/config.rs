//! 配置文件加载（TOML）
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// 未指定配置路径时尝试的默认位置
pub const DEFAULT_CONFIG_PATH: &str = "./pemscan.toml";

/// 配置文件原始结构
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    extensions: Vec<String>,
    #[serde(default)]
    block_types: Vec<String>,
    #[serde(default)]
    max_depth: Option<usize>,
}

/// 归一化后的扫描配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// 允许的扩展名（小写、无点）；空集表示不过滤
    pub extensions: HashSet<String>,
    /// 只输出这些类型的块；空集表示不过滤
    pub block_types: HashSet<String>,
    /// 目录遍历深度（1 = 只看直接子项）
    pub max_depth: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { extensions: HashSet::new(), block_types: HashSet::new(), max_depth: 1 }
    }
}

impl ScanConfig {
    /// 按扩展名过滤候选文件
    pub fn accepts_path(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.contains(&e.to_ascii_lowercase()))
            .unwrap_or(false)
    }

    /// 按块类型过滤输出
    pub fn accepts_block_type(&self, block_type: &str) -> bool {
        self.block_types.is_empty() || self.block_types.contains(block_type)
    }

    fn from_file(file: ConfigFile) -> Self {
        let extensions = file
            .extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        let block_types = file.block_types.into_iter().filter(|t| !t.is_empty()).collect();
        Self { extensions, block_types, max_depth: file.max_depth.unwrap_or(1).max(1) }
    }
}

/// 从 TOML 文本解析配置
pub fn parse_config(txt: &str) -> Result<ScanConfig> {
    let parsed: ConfigFile = toml::from_str(txt)?;
    Ok(ScanConfig::from_file(parsed))
}

/// 加载配置
/// - 显式路径：文件必须存在
/// - 未指定：存在 ./pemscan.toml 则读取，否则使用默认配置
pub fn load_config(path: Option<&Path>) -> Result<ScanConfig> {
    let path = match path {
        Some(p) => p,
        None => {
            let p = Path::new(DEFAULT_CONFIG_PATH);
            if !p.is_file() {
                return Ok(ScanConfig::default());
            }
            p
        }
    };
    let txt = std::fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    parse_config(&txt).with_context(|| format!("parse config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), ScanConfig::default());
    }

    #[test]
    fn normalizes_extensions() {
        let cfg = parse_config(r#"extensions = [".PEM", "crt", ""]"#).unwrap();
        assert!(cfg.accepts_path(Path::new("a/b.pem")));
        assert!(cfg.accepts_path(Path::new("b.CRT")));
        assert!(!cfg.accepts_path(Path::new("b.der")));
        assert!(!cfg.accepts_path(Path::new("noext")));
    }

    #[test]
    fn block_type_filter() {
        let cfg = parse_config(r#"block_types = ["CERTIFICATE"]"#).unwrap();
        assert!(cfg.accepts_block_type("CERTIFICATE"));
        assert!(!cfg.accepts_block_type("PRIVATE KEY"));
        assert!(ScanConfig::default().accepts_block_type("ANYTHING"));
    }

    #[test]
    fn depth_is_at_least_one() {
        assert_eq!(parse_config("max_depth = 0").unwrap().max_depth, 1);
        assert_eq!(parse_config("max_depth = 4").unwrap().max_depth, 4);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_config("rules = []").is_err());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pemscan.toml");
        std::fs::write(&path, "extensions = [\"key\"]\nmax_depth = 2\n").unwrap();
        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.max_depth, 2);
        assert!(cfg.accepts_path(Path::new("x.key")));
    }
}
