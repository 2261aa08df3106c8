//! 字节级读取引擎
use anyhow::Result;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::findings::FileOutcome;
use crate::scanner::scan_bytes;

/// 二进制判定时抽样的前缀长度
const BINARY_SAMPLE: usize = 8192;

/// UTF-8 BOM
pub(crate) const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 去掉开头的 UTF-8 BOM，返回剩余切片及其在原缓冲区中的起始偏移
pub(crate) fn strip_bom(buf: &[u8]) -> (&[u8], usize) {
    match buf.strip_prefix(UTF8_BOM) {
        Some(rest) => (rest, UTF8_BOM.len()),
        None => (buf, 0),
    }
}

/// 按“字节级”方式扫描单个文件
/// - 直接读取所有字节，不要求 UTF-8
/// - 疑似二进制（如 DER 证书）直接跳过，不作为格式错误
/// - 开头的 BOM 不参与扫描；输出偏移仍相对于整个文件
pub(crate) fn scan_file_bytes(path: &Path) -> Result<FileOutcome> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;

    let sample_len = buf.len().min(BINARY_SAMPLE);
    if is_probably_binary(&buf[..sample_len]) {
        return Ok(FileOutcome::Skipped);
    }

    let (text, base) = strip_bom(&buf);
    Ok(FileOutcome::from_scan_at(scan_bytes(text), base))
}

/// 判定缓冲区是否“明显是二进制”
/// 策略（保守，尽量不误杀文本）：
/// - 只要包含任何 NUL 字节（0x00）即认为二进制；
/// - 否则计算可打印 ASCII 比例（包含 tab/CR/LF），低于 25% 则认为二进制。
pub(crate) fn is_probably_binary(buf: &[u8]) -> bool {
    if buf.is_empty() { return false; }
    if buf.iter().any(|&b| b == 0) { return true; }
    let printable = buf.iter().filter(|&&b| matches!(b, 0x09 | 0x0A | 0x0D) || (0x20..=0x7E).contains(&b)).count();
    let ratio = printable as f32 / (buf.len() as f32);
    ratio < 0.25
}
