//! 单文件扫描结果与 JSON 输出（内部使用）
use anyhow::Result;
use std::io::Write;

use crate::config::ScanConfig;
use crate::error::PemFormatError;
use crate::options::ScanStats;
use crate::types::{OutputItem, ScanResult};

/// 单个文件的扫描结局
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FileOutcome {
    /// 扫描成功
    Blocks(ScanResult),
    /// PEM 格式错误
    Malformed(PemFormatError),
    /// 超过大小限制或疑似二进制
    Skipped,
    /// 读取失败（I/O 错误、非法 UTF-8）
    Unreadable,
}

impl FileOutcome {
    pub(crate) fn from_scan(res: Result<ScanResult, PemFormatError>) -> Self {
        match res {
            Ok(blocks) => Self::Blocks(blocks),
            Err(e) => Self::Malformed(e),
        }
    }

    /// 扫描的是从文件偏移 `base` 开始的切片（如去掉 BOM 后）；区间平移回整个文件
    pub(crate) fn from_scan_at(res: Result<ScanResult, PemFormatError>, base: usize) -> Self {
        Self::from_scan(res.map(|blocks| {
            blocks
                .into_iter()
                .map(|mut b| {
                    b.content_range.start += base;
                    b.content_range.end += base;
                    b
                })
                .collect()
        }))
    }
}

/// 流式 JSON 数组写出器：负责逗号分隔与统计
pub(crate) struct ReportWriter<'w> {
    out: &'w mut dyn Write,
    first: bool,
}

impl<'w> ReportWriter<'w> {
    /// 写 JSON 开始符
    pub(crate) fn begin(out: &'w mut dyn Write) -> Result<Self> {
        write!(out, "[")?;
        Ok(Self { out, first: true })
    }

    /// 写出一个文件的结果并累计统计
    pub(crate) fn write_file(&mut self, file: &str, outcome: &FileOutcome, config: &ScanConfig, stats: &mut ScanStats) -> Result<()> {
        match outcome {
            FileOutcome::Blocks(blocks) => {
                stats.files_scanned += 1;
                for b in blocks.iter().filter(|b| config.accepts_block_type(&b.block_type)) {
                    stats.blocks_found += 1;
                    self.write_item(&OutputItem::Block {
                        file,
                        block_type: &b.block_type,
                        start: b.content_range.start,
                        end: b.content_range.end,
                    }, stats)?;
                }
            }
            FileOutcome::Malformed(e) => {
                stats.files_scanned += 1;
                stats.files_malformed += 1;
                self.write_item(&OutputItem::Error { file, error: e.to_string(), code: e.code() }, stats)?;
            }
            FileOutcome::Skipped => stats.files_skipped += 1,
            FileOutcome::Unreadable => stats.files_unreadable += 1,
        }
        Ok(())
    }

    fn write_item(&mut self, item: &OutputItem<'_>, stats: &mut ScanStats) -> Result<()> {
        if !self.first { write!(self.out, ",")?; } else { self.first = false; }
        serde_json::to_writer(&mut *self.out, item)?;
        stats.outputs_written += 1;
        Ok(())
    }

    /// 写 JSON 结束符
    pub(crate) fn finish(self) -> Result<()> {
        write!(self.out, "]")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan;
    use pretty_assertions::assert_eq;

    #[test]
    fn writes_blocks_and_errors() {
        let input = "-----BEGIN A-----\nAAAA\n-----END A-----\n-----BEGIN B-----\nBBBB\n-----END B-----\n";
        let config = crate::config::parse_config(r#"block_types = ["B"]"#).unwrap();
        let mut stats = ScanStats::default();
        let mut out: Vec<u8> = Vec::new();
        let mut w = ReportWriter::begin(&mut out).unwrap();
        w.write_file("ok.pem", &FileOutcome::from_scan(scan(input)), &config, &mut stats).unwrap();
        w.write_file("bad.pem", &FileOutcome::from_scan(scan("")), &config, &mut stats).unwrap();
        w.write_file("skip.der", &FileOutcome::Skipped, &config, &mut stats).unwrap();
        w.finish().unwrap();

        let json = String::from_utf8(out).unwrap();
        assert_eq!(
            json,
            r#"[{"file":"ok.pem","block_type":"B","start":57,"end":61},{"file":"bad.pem","error":"Malformed PEM file (no content).","code":"no_content"}]"#
        );
        assert_eq!(stats.files_scanned, 2);
        assert_eq!(stats.files_malformed, 1);
        assert_eq!(stats.files_skipped, 1);
        assert_eq!(stats.blocks_found, 1);
        assert_eq!(stats.outputs_written, 2);
    }
}
