//! Benchmarks comparing docmark parsing vs pulldown-cmark
//!
//! Run with: cargo bench -p docmark-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use docmark_core::{format, parse, Parser};
use pulldown_cmark::{Options, Parser as MdParser};

/// A documentation page; valid input for both parsers.
const SAMPLE: &str = r#"## Introduction

This is a paragraph with **strong text**, `inline code` and a [link](https://example.com).
It demonstrates the basic capabilities of the format.

### Lists

- First item with some content
- Second item with **more** content
- Third item concluding the list

1. Step one of the process
2. Step two continues
3. Step three completes

### Code Example

```rust
fn fibonacci(n: u64) -> u64 {
    match n {
        0 => 0,
        1 => 1,
        _ => fibonacci(n - 1) + fibonacci(n - 2),
    }
}
```

### Table

| Name    | Speed   | Memory |
| ------- | ------- | ------ |
| Fast    | 100ms   | 10MB   |
| Medium  | 500ms   | 50MB   |
| Slow    | 1000ms  | 100MB  |

### Quote

> The best code is no code at all.
> Every line of code you write is a liability.

---

End of document.
"#;

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    group.throughput(Throughput::Bytes(SAMPLE.len() as u64));

    group.bench_function("docmark", |b| {
        b.iter(|| {
            let blocks = parse(black_box(SAMPLE));
            black_box(blocks.len())
        })
    });

    group.bench_function("docmark_with_spans", |b| {
        b.iter(|| {
            let blocks = parse(black_box(SAMPLE));
            let spans: usize = blocks
                .iter()
                .flat_map(|block| block.inline_texts())
                .map(|text| format(text).len())
                .sum();
            black_box(spans)
        })
    });

    group.bench_function("docmark_diagnostics", |b| {
        b.iter(|| {
            let result = Parser::new().parse_with_diagnostics(black_box(SAMPLE));
            black_box(result.document.len())
        })
    });

    group.bench_function("markdown_pulldown", |b| {
        b.iter(|| {
            let parser = MdParser::new_ext(black_box(SAMPLE), Options::ENABLE_TABLES);
            let events: Vec<_> = parser.collect();
            black_box(events.len())
        })
    });

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for size in [1, 5, 10, 20].iter() {
        let content: String = SAMPLE.repeat(*size);

        group.throughput(Throughput::Bytes(content.len() as u64));

        group.bench_with_input(BenchmarkId::new("docmark", size), &content, |b, content| {
            b.iter(|| {
                let blocks = parse(black_box(content));
                black_box(blocks.len())
            })
        });

        group.bench_with_input(BenchmarkId::new("markdown", size), &content, |b, content| {
            b.iter(|| {
                let parser = MdParser::new_ext(black_box(content), Options::ENABLE_TABLES);
                let events: Vec<_> = parser.collect();
                black_box(events.len())
            })
        });
    }

    group.finish();
}

fn bench_inline_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("inline");

    let inline = "This has **strong**, `code`, [link](https://example.com), and a stray ** marker.";

    group.bench_function("docmark_inline", |b| {
        b.iter(|| {
            let spans = format(black_box(inline));
            black_box(spans.len())
        })
    });

    group.bench_function("markdown_inline", |b| {
        b.iter(|| {
            let parser = MdParser::new_ext(black_box(inline), Options::empty());
            let events: Vec<_> = parser.collect();
            black_box(events.len())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_scaling,
    bench_inline_formatting
);
criterion_main!(benches);
