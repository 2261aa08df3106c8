use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pemscan_core::{scan_and_write, PemDocument, ScanEngine, ScanOptions};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "pemscan", version, about = "PEM 块扫描器")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 扫描目录（或单个文件）并生成 result.json
    Scan {
        /// 输入目录或文件
        #[arg(long)]
        input: PathBuf,

        /// 输出文件（JSON 数组）
        #[arg(long, default_value = "./result.json")]
        output: PathBuf,

        /// 线程数（"auto"=CPU 核心数；1=串行）
        #[arg(long, default_value = "auto")]
        threads: String,

        /// 最大扫描文件大小（单位字节，例如 5242880 代表 5MB）
        #[arg(long)]
        max_file_size: Option<u64>,

        /// 读取引擎：bytes 或 utf8（默认 bytes）
        #[arg(long, default_value = "bytes", value_parser = ["bytes", "utf8"])]
        engine: String,

        /// 配置文件路径（TOML），默认 ./pemscan.toml（可不存在）
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// 列出单个 PEM 文件中的块（不输出内容）
    Inspect {
        /// PEM 文件
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { input, output, threads, max_file_size, engine, config } => {
            info!(?input, ?output, "starting scan");

            // 以缓冲方式打开输出文件，按 JSON 数组流式写入
            let mut out = BufWriter::new(File::create(&output).context("create output file")?);

            let engine = match engine.as_str() {
                "utf8" => ScanEngine::Utf8,
                _ => ScanEngine::Bytes,
            };
            let opts = ScanOptions { max_file_size, engine, config_path: config, threads: parse_threads(&threads) };
            let stats = scan_and_write(&input, &mut out, &opts).context("scan and write failed")?;
            out.flush().context("flush output file")?;

            info!(
                files_scanned = stats.files_scanned,
                files_skipped = stats.files_skipped,
                files_unreadable = stats.files_unreadable,
                files_malformed = stats.files_malformed,
                blocks_found = stats.blocks_found,
                outputs_written = stats.outputs_written,
                "scan finished"
            );
        }
        Commands::Inspect { file } => {
            let text = std::fs::read_to_string(&file).with_context(|| format!("read {}", file.display()))?;
            let doc = PemDocument::parse(&text).with_context(|| format!("parse {}", file.display()))?;
            for (i, block) in doc.blocks().enumerate() {
                let range = block.content_range();
                println!("{i}\t{}\t{}..{}\t{} lines", block.block_type(), range.start, range.end, block.lines().count());
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写到 stderr；stdout 留给 inspect 输出
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(env_filter).with_writer(std::io::stderr).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// 解析线程参数
fn parse_threads(s: &str) -> Option<usize> {
    if s.eq_ignore_ascii_case("auto") { return None; }
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}
