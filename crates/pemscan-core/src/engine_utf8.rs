//! UTF-8 字符串读取引擎
use anyhow::Result;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::engine_bytes::strip_bom;
use crate::findings::FileOutcome;
use crate::scanner::scan;

/// 按“UTF-8 字符串”方式扫描单个文件
/// 非法 UTF-8 由 `read_to_string` 报 I/O 错误，由调用方计为不可读
/// 开头的 BOM 不参与扫描；输出偏移仍相对于整个文件
pub(crate) fn scan_file_utf8(path: &Path) -> Result<FileOutcome> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;

    // BOM 为 3 字节的完整字符，切片必落在字符边界上
    let base = strip_bom(buf.as_bytes()).1;
    Ok(FileOutcome::from_scan_at(scan(&buf[base..]), base))
}
