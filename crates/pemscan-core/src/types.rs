//! 公共类型（对外暴露）
use serde::Serialize;
use std::ops::Range;

/// 块内容在原始缓冲区中的字节区间，半开 `[start, end)`
/// - start：首个内容行的起始偏移
/// - end：最后一个内容行的结束偏移（不含行终止符）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ContentRange {
    pub start: usize,
    pub end: usize,
}

impl ContentRange {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<ContentRange> for Range<usize> {
    fn from(r: ContentRange) -> Self {
        r.as_range()
    }
}

/// 单个 PEM 块的描述符
///
/// 只记录类型与区间，不持有内容本身；内容始终通过调用方的缓冲区切片取得，
/// 因此私钥等敏感数据不会被复制到调用方无法控制的内存中。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockDescriptor {
    pub block_type: String,
    pub content_range: ContentRange,
}

impl BlockDescriptor {
    /// 从原始字符串中借出内容；缓冲区不匹配时返回 None
    pub fn content<'a>(&self, buf: &'a str) -> Option<&'a str> {
        buf.get(self.content_range.as_range())
    }

    /// 从原始字节中借出内容
    pub fn content_bytes<'a>(&self, buf: &'a [u8]) -> Option<&'a [u8]> {
        buf.get(self.content_range.as_range())
    }

    /// 逐行借出内容（跳过块内空白行，去掉行终止符），便于 Base64 消费方拼接
    pub fn content_lines<'a>(&self, buf: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        content_lines(self.content(buf).unwrap_or(""))
    }
}

/// 按行拆分块内容：去掉 `\n` / `\r\n`，跳过空白行
pub(crate) fn content_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .split_inclusive('\n')
        .map(|l| match l.strip_suffix('\n') {
            Some(l) => l.strip_suffix('\r').unwrap_or(l),
            None => l,
        })
        .filter(|l| !l.trim().is_empty())
}

/// 一次扫描的结果：按出现顺序排列，成功时必不为空
pub type ScanResult = Vec<BlockDescriptor>;

/// 输出项结构（对应 result.json 的单个元素）
/// 注意：不输出块内容
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OutputItem<'a> {
    Block {
        file: &'a str,
        block_type: &'a str,
        start: usize,
        end: usize,
    },
    Error {
        file: &'a str,
        error: String,
        code: &'static str,
    },
}
