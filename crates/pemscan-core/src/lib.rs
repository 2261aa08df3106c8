//! PEM 块扫描库
//!
//! 设计要点：
//! - 核心是纯函数 `scan` / `scan_bytes`：输入完整的内存缓冲区，输出按出现顺序排列的块描述符。
//! - 描述符只记录类型与内容区间（偏移），从不复制块内容，私钥等敏感数据不会被额外拷贝。
//! - 任何结构错误都会终止本次扫描，不返回部分结果。
//! - 目录扫描（`scan_and_write`）在核心之上提供文件遍历、并行调度与 JSON 报告；报告同样不含内容。

mod config;
mod document;
mod engine_bytes;
mod engine_utf8;
mod error;
mod findings;
mod lines;
mod marker;
mod options;
mod scan;
mod scanner;
mod types;

pub use config::{load_config, parse_config, ScanConfig, DEFAULT_CONFIG_PATH};
pub use document::{PemBlock, PemDocument};
pub use error::PemFormatError;
pub use options::{ScanEngine, ScanOptions, ScanStats};
pub use scan::scan_and_write;
pub use scanner::{scan, scan_bytes};
pub use types::{BlockDescriptor, ContentRange, OutputItem, ScanResult};
