//! BEGIN/END 标记行解析
//!
//! 语法：整行必须是 `-----BEGIN <text>-----` 或 `-----END <text>-----`，
//! `<text>` 至少一个字节，原样截取，不做内部校验。
//! 固定语法用前后缀判断即可，无需正则引擎。

const BEGIN_PREFIX: &[u8] = b"-----BEGIN ";
const END_PREFIX: &[u8] = b"-----END ";
const SUFFIX: &[u8] = b"-----";

/// 解析 BEGIN 行，返回块类型
pub(crate) fn parse_begin(line: &[u8]) -> Option<&[u8]> {
    parse_marker(line, BEGIN_PREFIX)
}

/// 解析 END 行，返回块类型
pub(crate) fn parse_end(line: &[u8]) -> Option<&[u8]> {
    parse_marker(line, END_PREFIX)
}

fn parse_marker<'a>(line: &'a [u8], prefix: &[u8]) -> Option<&'a [u8]> {
    let rest = line.strip_prefix(prefix)?;
    let label = rest.strip_suffix(SUFFIX)?;
    if label.is_empty() {
        return None;
    }
    Some(label)
}
