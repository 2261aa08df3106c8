//! 借用视图：把描述符与原始缓冲区的生命周期绑定
//!
//! `BlockDescriptor` 只有偏移，离开缓冲区就没有意义；`PemDocument<'a>`
//! 借用缓冲区，让编译器保证描述符不会比缓冲区活得更久。
//! `Debug` 输出只包含类型与区间，不打印内容。
use std::fmt;

use crate::error::PemFormatError;
use crate::scanner::scan;
use crate::types::{content_lines, BlockDescriptor, ContentRange};

/// 已扫描的 PEM 文本
pub struct PemDocument<'a> {
    text: &'a str,
    blocks: Vec<BlockDescriptor>,
}

/// 文档中的单个块（借用）
#[derive(Clone, Copy)]
pub struct PemBlock<'a> {
    descriptor: &'a BlockDescriptor,
    content: &'a str,
}

impl<'a> PemDocument<'a> {
    pub fn parse(text: &'a str) -> Result<Self, PemFormatError> {
        let blocks = scan(text)?;
        Ok(Self { text, blocks })
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn descriptors(&self) -> &[BlockDescriptor] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> impl Iterator<Item = PemBlock<'_>> + '_ {
        self.blocks.iter().map(move |d| PemBlock {
            descriptor: d,
            // 区间由 scan(text) 产生，必然落在 text 内
            content: &self.text[d.content_range.as_range()],
        })
    }

    /// 指定类型的全部块（按出现顺序）
    pub fn blocks_of_type<'s>(&'s self, block_type: &'s str) -> impl Iterator<Item = PemBlock<'s>> + 's {
        self.blocks().filter(move |b| b.block_type() == block_type)
    }

    /// 指定类型的第一个块
    pub fn first_of_type(&self, block_type: &str) -> Option<PemBlock<'_>> {
        self.blocks().find(|b| b.block_type() == block_type)
    }
}

impl<'a> PemBlock<'a> {
    pub fn block_type(&self) -> &'a str {
        &self.descriptor.block_type
    }

    pub fn content_range(&self) -> ContentRange {
        self.descriptor.content_range
    }

    /// 块内容（借用原始缓冲区，含块内换行）
    pub fn content(&self) -> &'a str {
        self.content
    }

    /// 去掉空白行与行终止符后的内容行
    pub fn lines(&self) -> impl Iterator<Item = &'a str> + 'a {
        content_lines(self.content)
    }

    pub fn descriptor(&self) -> &'a BlockDescriptor {
        self.descriptor
    }
}

impl fmt::Debug for PemDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PemDocument")
            .field("len", &self.text.len())
            .field("blocks", &self.blocks)
            .finish()
    }
}

impl fmt::Debug for PemBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PemBlock")
            .field("block_type", &self.descriptor.block_type)
            .field("content_range", &self.descriptor.content_range)
            .field("content", &"<redacted>")
            .finish()
    }
}
