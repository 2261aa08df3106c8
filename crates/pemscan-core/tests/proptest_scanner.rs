//! Property-based tests for the PEM block scanner

use pemscan_core::{scan, scan_bytes};
use proptest::prelude::*;

/// 生成用的块：类型、内容行（行文本, 是否 CRLF, 其后空行数）、块前空白行数
#[derive(Debug, Clone)]
struct GenBlock {
    label: String,
    lines: Vec<(String, bool, usize)>,
    blank_before: usize,
    crlf: bool,
}

fn eol(crlf: bool) -> &'static str {
    if crlf { "\r\n" } else { "\n" }
}

fn block_strategy() -> impl Strategy<Value = GenBlock> {
    (
        "[A-Z0-9]([A-Z0-9 ]{0,14}[A-Z0-9])?",
        prop::collection::vec(("[A-Za-z0-9+/]{1,64}={0,2}", any::<bool>(), 0usize..3), 1..6),
        0usize..3,
        any::<bool>(),
    )
        .prop_map(|(label, lines, blank_before, crlf)| GenBlock { label, lines, blank_before, crlf })
}

/// 拼出 PEM 文本，同时给出每个块应得的内容切片与内容行
fn render(blocks: &[GenBlock]) -> (String, Vec<String>, Vec<Vec<String>>) {
    let mut text = String::new();
    let mut contents = Vec::new();
    let mut lines = Vec::new();
    for b in blocks {
        for _ in 0..b.blank_before {
            text.push_str(" \t");
            text.push_str(eol(b.crlf));
        }
        text.push_str(&format!("-----BEGIN {}-----{}", b.label, eol(b.crlf)));

        let mut content = String::new();
        for (i, (line, crlf, blanks)) in b.lines.iter().enumerate() {
            let last = i + 1 == b.lines.len();
            text.push_str(line);
            content.push_str(line);
            for _ in 0..=*blanks {
                text.push_str(eol(*crlf));
                // 最后一行之后的终止符与空行不属于内容
                if !last {
                    content.push_str(eol(*crlf));
                }
            }
        }
        text.push_str(&format!("-----END {}-----{}", b.label, eol(b.crlf)));

        contents.push(content);
        lines.push(b.lines.iter().map(|(l, _, _)| l.clone()).collect());
    }
    (text, contents, lines)
}

proptest! {
    #[test]
    fn well_formed_input_round_trips(blocks in prop::collection::vec(block_strategy(), 1..5)) {
        let (text, contents, lines) = render(&blocks);
        let found = scan(&text).unwrap();

        // 块数等于 BEGIN/END 对数，顺序与输入一致
        prop_assert_eq!(found.len(), blocks.len());
        let types: Vec<&str> = found.iter().map(|d| d.block_type.as_str()).collect();
        let labels: Vec<&str> = blocks.iter().map(|b| b.label.as_str()).collect();
        prop_assert_eq!(types, labels);

        for (i, d) in found.iter().enumerate() {
            prop_assert_eq!(d.content(&text), Some(contents[i].as_str()));
            let got: Vec<&str> = d.content_lines(&text).collect();
            prop_assert_eq!(got, lines[i].iter().map(String::as_str).collect::<Vec<_>>());
        }
        for pair in found.windows(2) {
            prop_assert!(pair[0].content_range.end < pair[1].content_range.start);
        }
    }

    #[test]
    fn scanning_twice_is_identical(blocks in prop::collection::vec(block_strategy(), 1..5)) {
        let (text, _, _) = render(&blocks);
        let first = scan(&text).unwrap();
        prop_assert_eq!(&first, &scan(&text).unwrap());
        prop_assert_eq!(&first, &scan_bytes(text.as_bytes()).unwrap());
    }

    #[test]
    fn arbitrary_text_never_panics(text in "(-----(BEGIN|END) [A-Z]{0,4}-{0,6}|[A-Za-z0-9+/= \t]{0,12}|\r?\n){0,24}") {
        if let Ok(found) = scan(&text) {
            prop_assert!(!found.is_empty());
            for d in &found {
                prop_assert!(d.content(&text).is_some());
            }
        }
    }
}
