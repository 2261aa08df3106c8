//! 扫描选项与统计信息（模块）
use std::path::PathBuf;

/// 文件读取引擎
/// - Bytes：整读原始字节后扫描，跳过疑似二进制文件，不要求 UTF-8。
/// - Utf8：读成 `String` 后扫描，非法 UTF-8 视为不可读。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEngine {
    Bytes,
    Utf8,
}

/// 扫描选项
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// 最大文件大小（字节）；超过则跳过
    pub max_file_size: Option<u64>,
    /// 读取引擎
    pub engine: ScanEngine,
    /// 配置文件路径（TOML）；为空时尝试 ./pemscan.toml，不存在则用默认配置
    pub config_path: Option<PathBuf>,
    /// 线程数：None 表示自动（等于 CPU 核数）；Some(1) 走串行
    pub threads: Option<usize>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_file_size: None,
            engine: ScanEngine::Bytes,
            config_path: None,
            threads: None,
        }
    }
}

/// 扫描统计信息（便于 CLI 打印）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    /// 成功读取并扫描的文件（含格式错误的文件）
    pub files_scanned: usize,
    /// 因大小限制或疑似二进制而跳过
    pub files_skipped: usize,
    /// 读取失败（I/O 错误、非法 UTF-8）
    pub files_unreadable: usize,
    /// PEM 格式错误
    pub files_malformed: usize,
    /// 写出的块数量（已按类型过滤）
    pub blocks_found: usize,
    /// 写出的 JSON 元素数量
    pub outputs_written: usize,
}
