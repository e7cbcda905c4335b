//! Block counts agree with a CommonMark parser on documents where the dialect
//! and CommonMark mean the same thing.

use docmark_core::{parse, Block};
use pretty_assertions::assert_eq;
use pulldown_cmark::{Event, Options, Parser as MdParser, Tag};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Counts {
    headings: u32,
    code_blocks: u32,
    tables: u32,
    lists: u32,
    list_items: u32,
    rules: u32,
}

fn count_docmark(input: &str) -> Counts {
    let mut counts = Counts::default();
    for block in parse(input) {
        match block {
            Block::Heading { .. } => counts.headings += 1,
            Block::CodeBlock { .. } => counts.code_blocks += 1,
            Block::Table { .. } => counts.tables += 1,
            Block::UnorderedList { items } | Block::OrderedList { items } => {
                counts.lists += 1;
                counts.list_items += items.len() as u32;
            }
            Block::HorizontalRule => counts.rules += 1,
            Block::Paragraph { .. } | Block::Blockquote { .. } => {}
        }
    }
    counts
}

fn count_markdown(input: &str) -> Counts {
    let mut counts = Counts::default();
    for event in MdParser::new_ext(input, Options::ENABLE_TABLES) {
        match event {
            Event::Start(Tag::Heading { .. }) => counts.headings += 1,
            Event::Start(Tag::CodeBlock(_)) => counts.code_blocks += 1,
            Event::Start(Tag::Table(_)) => counts.tables += 1,
            Event::Start(Tag::List(_)) => counts.lists += 1,
            Event::Start(Tag::Item) => counts.list_items += 1,
            Event::Rule => counts.rules += 1,
            _ => {}
        }
    }
    counts
}

const GUIDE: &str = "## Getting started

Install the client, then call **connect** with your `API_KEY`.

```
client = connect(API_KEY)
client.ping()
```

### Limits

| Plan | Requests |
|------|----------|
| Free | 100 |
| Pro | 10000 |

- Retries are automatic
- Timeouts default to 30s

1. Create a key
2. Store it in [the vault](https://vault.example)
3. Rotate monthly

---

> Keys are shown only once.
";

#[test]
fn test_guide_block_counts_match_commonmark() {
    let ours = count_docmark(GUIDE);
    assert_eq!(ours, count_markdown(GUIDE));
    assert_eq!(
        ours,
        Counts {
            headings: 2,
            code_blocks: 1,
            tables: 1,
            lists: 2,
            list_items: 5,
            rules: 1,
        }
    );
}

#[test]
fn test_code_block_content_matches_commonmark() {
    let ours: Vec<String> = parse(GUIDE)
        .iter()
        .filter_map(|b| match b {
            Block::CodeBlock { code } => Some(format!("{}\n", code)),
            _ => None,
        })
        .collect();

    let mut theirs = Vec::new();
    let mut in_code = false;
    for event in MdParser::new(GUIDE) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => {
                in_code = true;
                theirs.push(String::new());
            }
            Event::Text(text) if in_code => {
                if let Some(last) = theirs.last_mut() {
                    last.push_str(&text);
                }
            }
            Event::End(_) => in_code = false,
            _ => {}
        }
    }

    assert_eq!(ours, theirs);
}
