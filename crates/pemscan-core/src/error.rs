//! PEM 格式错误（对外暴露）
use thiserror::Error;

/// 扫描失败的原因；消息固定，不携带行号/偏移
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum PemFormatError {
    /// 期望 BEGIN 标记行，但该 `-` 行不符合 BEGIN 语法
    #[error("Malformed PEM file (expected block begin).")]
    ExpectedBlockBegin,
    /// 期望 END 标记行，但该 `-` 行不符合 END 语法
    #[error("Malformed PEM file (expected block end).")]
    ExpectedBlockEnd,
    /// END 的类型与 BEGIN 不一致
    #[error("Malformed PEM file (block types don't match).")]
    MismatchedBlockType,
    /// BEGIN 与 END 之间没有内容行
    #[error("Malformed PEM file (no block contents).")]
    EmptyBlock,
    /// 内容行出现在任何块之外
    #[error("Malformed PEM file (missing block begin).")]
    MissingBlockBegin,
    /// 整个缓冲区中没有任何完整块
    #[error("Malformed PEM file (no content).")]
    NoContent,
}

impl PemFormatError {
    /// 稳定的机器可读标识（用于 JSON 报告）
    pub fn code(&self) -> &'static str {
        match self {
            Self::ExpectedBlockBegin => "expected_block_begin",
            Self::ExpectedBlockEnd => "expected_block_end",
            Self::MismatchedBlockType => "mismatched_block_type",
            Self::EmptyBlock => "empty_block",
            Self::MissingBlockBegin => "missing_block_begin",
            Self::NoContent => "no_content",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_fixed() {
        assert_eq!(PemFormatError::ExpectedBlockBegin.to_string(), "Malformed PEM file (expected block begin).");
        assert_eq!(PemFormatError::MismatchedBlockType.to_string(), "Malformed PEM file (block types don't match).");
        assert_eq!(PemFormatError::NoContent.to_string(), "Malformed PEM file (no content).");
    }

    #[test]
    fn codes_are_distinct() {
        let all = [
            PemFormatError::ExpectedBlockBegin,
            PemFormatError::ExpectedBlockEnd,
            PemFormatError::MismatchedBlockType,
            PemFormatError::EmptyBlock,
            PemFormatError::MissingBlockBegin,
            PemFormatError::NoContent,
        ];
        let codes: std::collections::HashSet<_> = all.iter().map(|e| e.code()).collect();
        assert_eq!(codes.len(), all.len());
    }
}
