//! Integration tests for line classification and block extraction.

use mdpage::{classify, extract_text, parse_table, Block, LineKind, SourceLine};

#[test]
fn test_classify_is_deterministic() {
    let samples = [
        "",
        "   ",
        "# h",
        "#nospace",
        "#### deep",
        "| a | b |",
        "|---|:-:|",
        "```",
        "```python",
        "* star",
        "- dash",
        "-dash",
        "12. twelve",
        "12.nospace",
        "> quote",
        ">no space",
        "---",
        "***",
        "plain text",
        "한국어 문장",
    ];
    for line in samples {
        assert_eq!(classify(line), classify(line), "{:?}", line);
    }
}

#[test]
fn test_classify_priority() {
    assert_eq!(classify("| - | - |"), LineKind::TableSeparator);
    assert_eq!(classify("| a | - |"), LineKind::TableRow);
    assert_eq!(classify("### three"), LineKind::Heading { level: 3 });
    assert_eq!(classify("#### four"), LineKind::Paragraph);
    assert_eq!(classify("1. one"), LineKind::OrderedListItem);
    assert_eq!(classify("- item"), LineKind::UnorderedListItem);
    assert_eq!(classify("> q"), LineKind::Quote);
    assert_eq!(classify("---"), LineKind::Rule);
    assert_eq!(classify("  "), LineKind::Blank);
}

#[test]
fn test_pipe_table_example() {
    let blocks = extract_text("| a | b |\n|---|---|\n| 1 | 2 |");
    assert_eq!(blocks, vec![Block::table([["a", "b"], ["1", "2"]])]);
}

#[test]
fn test_parse_table_from_source_lines() {
    let lines = SourceLine::split("intro\n| x |\n|---|\n|  |\n| y |\nafter");
    let table = parse_table(&lines, 1);

    assert_eq!(table.rows, vec![vec!["x".to_string()], vec!["y".to_string()]]);
    assert_eq!(table.consumed, 4);
    assert_eq!(table.separators, 1);
    assert_eq!(table.empty_rows, 1);
}

#[test]
fn test_code_block_round_trip() {
    let inner = ["let x = 1;", "", "    indented", "| not | a | table |", "# not a heading"];
    let input = format!("```\n{}\n```", inner.join("\n"));

    let blocks = extract_text(&input);
    assert_eq!(blocks, vec![Block::code(inner)]);
}

#[test]
fn test_chat_export_document() {
    let input = "\
# Conversation

**User**: How do I sort a list?

> Use the built-in method.

```python
items.sort()
```

| Method | Stable |
|--------|--------|
| sort   | yes    |

---
1. First
- Second";

    let blocks = extract_text(input);
    let kinds: Vec<&str> = blocks.iter().map(Block::kind_name).collect();
    assert_eq!(
        kinds,
        vec![
            "heading",
            "blank",
            "paragraph",
            "blank",
            "quote",
            "blank",
            "code_block",
            "blank",
            "table",
            "blank",
            "rule",
            "list_item",
            "list_item",
        ]
    );

    match &blocks[6] {
        Block::CodeBlock { language, lines } => {
            assert_eq!(language.as_deref(), Some("python"));
            assert_eq!(lines, &vec!["items.sort()".to_string()]);
        }
        other => panic!("expected code block, got {:?}", other),
    }
}

#[test]
fn test_empty_document_has_no_blocks() {
    assert!(extract_text("").is_empty());
}
