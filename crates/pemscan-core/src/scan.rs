//! 目录扫描主流程与并行调度
use anyhow::{bail, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{load_config, ScanConfig};
use crate::engine_bytes::scan_file_bytes;
use crate::engine_utf8::scan_file_utf8;
use crate::findings::{FileOutcome, ReportWriter};
use crate::options::{ScanEngine, ScanOptions, ScanStats};

/// 扫描目录（或单个文件）并将结果以 JSON 数组流式写入 `out`
/// 稳定性保证：
/// - 文件级：先收集文件并按路径排序，确保输出顺序可复现（与线程数无关）
/// - 文件内：块按在文件中出现的顺序输出
pub fn scan_and_write(input: &Path, out: &mut dyn Write, opts: &ScanOptions) -> Result<ScanStats> {
    let config = load_config(opts.config_path.as_deref())?;
    let files = collect_files(input, &config)?;
    debug!(files = files.len(), "collected candidate files");

    let mut stats = ScanStats::default();

    // 决策：线程数>1 走并行调度；否则串行扫描
    let threads = opts.threads.unwrap_or_else(num_cpus::get);
    if threads > 1 && files.len() > 1 {
        scan_and_write_parallel(&files, out, opts, &config, &mut stats, threads)?;
        return Ok(stats);
    }

    let mut writer = ReportWriter::begin(out)?;
    for path in &files {
        let outcome = scan_one(path, opts);
        writer.write_file(&display_name(path), &outcome, &config, &mut stats)?;
    }
    writer.finish()?;
    Ok(stats)
}

/// 收集候选文件：输入为文件时只扫描它本身；目录按配置深度与扩展名过滤
/// - 输入既不是文件也不是目录时报错
/// - 跟随符号链接；链接成环由 walkdir 报错并跳过
fn collect_files(input: &Path, config: &ScanConfig) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        bail!("input {} is neither a file nor a directory", input.display());
    }
    let mut files: Vec<PathBuf> = vec![];
    for entry in WalkDir::new(input).follow_links(true).min_depth(1).max_depth(config.max_depth) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => { warn!(error = %e, "walk error"); continue; }
        };
        if entry.file_type().is_file() && config.accepts_path(entry.path()) {
            files.push(entry.into_path());
        }
    }
    // 按路径排序，确保输出顺序稳定
    files.sort();
    Ok(files)
}

/// 扫描单个文件（含大小过滤）；I/O 错误转为 Unreadable，不中断整体扫描
fn scan_one(path: &Path, opts: &ScanOptions) -> FileOutcome {
    if let Some(max) = opts.max_file_size {
        if let Ok(md) = std::fs::metadata(path) {
            if md.len() > max {
                debug!(path = %path.display(), size = md.len(), "skip oversized file");
                return FileOutcome::Skipped;
            }
        }
    }
    let res = match opts.engine {
        ScanEngine::Bytes => scan_file_bytes(path),
        ScanEngine::Utf8 => scan_file_utf8(path),
    };
    match res {
        Ok(outcome) => {
            debug!(path = %path.display(), outcome = outcome_label(&outcome), "scanned file");
            outcome
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "unreadable file");
            FileOutcome::Unreadable
        }
    }
}

fn outcome_label(outcome: &FileOutcome) -> &'static str {
    match outcome {
        FileOutcome::Blocks(_) => "blocks",
        FileOutcome::Malformed(e) => e.code(),
        FileOutcome::Skipped => "skipped",
        FileOutcome::Unreadable => "unreadable",
    }
}

fn display_name(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// 并行调度：
/// - 使用 Rayon 线程池并行扫描
/// - 单线程 Writer 按 idx 重排并流式写 JSON，保证稳定顺序
fn scan_and_write_parallel(
    files: &[PathBuf],
    out: &mut dyn Write,
    opts: &ScanOptions,
    config: &ScanConfig,
    stats: &mut ScanStats,
    threads: usize,
) -> Result<()> {
    use crossbeam_channel as channel;
    use rayon::prelude::*;
    use std::collections::BTreeMap;

    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;

    // 通道用于 worker → writer 传递结果
    type Msg = (usize /*idx*/, FileOutcome);
    let (tx, rx) = channel::bounded::<Msg>(256);

    // Writer 保持在当前线程；扫描在后台线程内的 Rayon 线程池执行
    let files_vec: Vec<(usize, PathBuf)> = files.iter().cloned().enumerate().collect();
    let worker_opts = opts.clone();
    let scan_thread = std::thread::spawn(move || {
        pool.install(|| {
            files_vec.par_iter().for_each_with(tx, |tx, (idx, path)| {
                let _ = tx.send((*idx, scan_one(path, &worker_opts)));
            });
        });
        // 结束后 Sender 全部被丢弃，Receiver 将收到关闭信号
    });

    // Writer：维护 next_idx 与缓存，按序输出
    let mut writer = ReportWriter::begin(out)?;
    let mut next_idx: usize = 0;
    let mut buffer: BTreeMap<usize, FileOutcome> = BTreeMap::new();

    while let Ok((idx, outcome)) = rx.recv() {
        buffer.insert(idx, outcome);
        while let Some(outcome) = buffer.remove(&next_idx) {
            writer.write_file(&display_name(&files[next_idx]), &outcome, config, stats)?;
            next_idx += 1;
        }
    }

    if scan_thread.join().is_err() {
        bail!("scan worker panicked");
    }

    writer.finish()
}
