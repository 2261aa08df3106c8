//! PEM 块扫描器（核心算法）
//!
//! 两遍线性扫描：
//! 1. 行切分（见 `lines`），只得到偏移对；
//! 2. 逐行驱动显式状态机，组装块描述符。
//!
//! 以 `-` 开头的行一律视为标记行：`-` 不是 Base64 字符，
//! 所以畸形标记会立即报错，而不会被当作损坏的内容行吞掉。
//! 扫描器是纯函数：不做 I/O、不打日志、不复制块内容。

use crate::error::PemFormatError;
use crate::lines::{is_blank, split_lines};
use crate::marker::{parse_begin, parse_end};
use crate::types::{BlockDescriptor, ContentRange, ScanResult};

/// 扫描器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State<'a> {
    /// 块外，等待 BEGIN
    Idle,
    /// 块内；content 为已见内容行覆盖的区间（尚无内容行时为 None）
    InBlock { block_type: &'a [u8], content: Option<ContentRange> },
}

/// 扫描字符串缓冲区
pub fn scan(buffer: &str) -> Result<ScanResult, PemFormatError> {
    scan_bytes(buffer.as_bytes())
}

/// 扫描字节缓冲区
/// 所有分界字符均为 ASCII，因此对合法 UTF-8 输入得到的偏移一定落在字符边界上
pub fn scan_bytes(buffer: &[u8]) -> Result<ScanResult, PemFormatError> {
    let mut blocks: ScanResult = Vec::new();
    let mut state = State::Idle;

    for span in split_lines(buffer) {
        let line = &buffer[span.start..span.end];
        if is_blank(line) {
            continue;
        }

        if line[0] == b'-' {
            state = match state {
                State::Idle => {
                    let block_type = parse_begin(line).ok_or(PemFormatError::ExpectedBlockBegin)?;
                    State::InBlock { block_type, content: None }
                }
                State::InBlock { block_type, content } => {
                    let end_type = parse_end(line).ok_or(PemFormatError::ExpectedBlockEnd)?;
                    if end_type != block_type {
                        return Err(PemFormatError::MismatchedBlockType);
                    }
                    let content_range = content.ok_or(PemFormatError::EmptyBlock)?;
                    blocks.push(BlockDescriptor {
                        block_type: String::from_utf8_lossy(block_type).into_owned(),
                        content_range,
                    });
                    State::Idle
                }
            };
            continue;
        }

        // 内容行
        match &mut state {
            State::Idle => return Err(PemFormatError::MissingBlockBegin),
            State::InBlock { content, .. } => match content {
                Some(range) => range.end = span.end,
                None => *content = Some(ContentRange { start: span.start, end: span.end }),
            },
        }
    }

    // 末尾未闭合的块不报错，只要已有完整块即视为成功
    if blocks.is_empty() {
        return Err(PemFormatError::NoContent);
    }
    Ok(blocks)
}
