//! 行切分（第一遍扫描）
//!
//! 只记录每行的 `(start, end)` 偏移，不分配子串。
//! - `\n` 为行终止符；若其前紧挨 `\r`，行尾不含该 `\r`（兼容 CRLF）
//! - 单独的 `\r` 不视为终止符
//! - 末尾没有终止符的残行不会被收集
use memchr::memchr_iter;

/// 一行在缓冲区中的位置（不含行终止符）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LineSpan {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

/// 按行切分缓冲区
pub(crate) fn split_lines(buf: &[u8]) -> Vec<LineSpan> {
    let mut lines = Vec::new();
    let mut start = 0usize;
    for nl in memchr_iter(b'\n', buf) {
        let end = if nl > start && buf[nl - 1] == b'\r' { nl - 1 } else { nl };
        lines.push(LineSpan { start, end });
        start = nl + 1;
    }
    lines
}

/// 空行或全空白行
/// 按 UTF-8 解码后 trim；非法 UTF-8 的行不视为空白
pub(crate) fn is_blank(line: &[u8]) -> bool {
    match std::str::from_utf8(line) {
        Ok(s) => s.trim().is_empty(),
        Err(_) => false,
    }
}
