//! Benchmarks comparing mystmark parsing vs pulldown-cmark (Markdown)
//!
//! Run with: cargo bench -p mystmark-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mystmark_core::Parser;
use pulldown_cmark::{Options, Parser as MdParser};

/// Sample mystmark content exercising the whole surface
const MYSTMARK_SAMPLE: &str = r#"# Introduction

This is a paragraph with *emphasis*, **strong text**, `inline code`,
and a citation [see @knuth1984, ch. 1]. Water is H{sub}`2`O.

A bare link https://example.com/docs and a note[^perf].

## Figures

```{image} plots/throughput.png
:label: fig-throughput
:width: 70%
:align: center
Throughput across input sizes.
```

As [](#fig-throughput) shows, scanning is linear.

## Equations

$$
\label{eq:amdahl} S = \frac{1}{(1 - p) + \frac{p}{n}}
$$

Inline math works too: {math}`O(n \log n)`.

## Tables

| Name    | Speed   | Memory |
| :------ | :-----: | -----: |
| Fast    | 100ms   | 10MB   |
| Medium  | 500ms   | 50MB   |
| Slow    | 1000ms  | 100MB  |

## Quotes

> The best code is no code at all.
> Every line of code you write is a liability.
> - Someone wise

## Admonitions

```{warning} Hot path
No backtracking, no allocation per text run.
```

## Glossary

```{glossary}
Block
  A structural, line-oriented unit of document content.
Ordinal
  The auto-incremented number assigned to a labeled entity.
```

[^perf]: Parsing is a single forward pass.

---

End of document.
"#;

/// Equivalent Markdown content (as close as possible)
const MARKDOWN_SAMPLE: &str = r#"# Introduction

This is a paragraph with *emphasis*, **strong text**, `inline code`,
and a citation (Knuth 1984, ch. 1). Water is H2O.

A bare link <https://example.com/docs> and a note[^perf].

## Figures

![Throughput across input sizes](plots/throughput.png)

As figure 1 shows, scanning is linear.

## Equations

    S = 1 / ((1 - p) + p/n)

Inline math works too: `O(n log n)`.

## Tables

| Name    | Speed   | Memory |
| :------ | :-----: | -----: |
| Fast    | 100ms   | 10MB   |
| Medium  | 500ms   | 50MB   |
| Slow    | 1000ms  | 100MB  |

## Quotes

> The best code is no code at all.
> Every line of code you write is a liability.
>
> -- Someone wise

## Admonitions

> **Warning: Hot path**
>
> No backtracking, no allocation per text run.

[^perf]: Parsing is a single forward pass.

---

End of document.
"#;

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    group.throughput(Throughput::Bytes(MYSTMARK_SAMPLE.len() as u64));

    group.bench_function("mystmark", |b| {
        b.iter(|| {
            let mut parser = Parser::new();
            let result = parser.parse(black_box(MYSTMARK_SAMPLE));
            black_box(result.document.blocks.len())
        })
    });

    group.throughput(Throughput::Bytes(MARKDOWN_SAMPLE.len() as u64));

    group.bench_function("markdown_pulldown", |b| {
        b.iter(|| {
            let parser = MdParser::new_ext(black_box(MARKDOWN_SAMPLE), Options::all());
            let events: Vec<_> = parser.collect();
            black_box(events.len())
        })
    });

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for size in [1, 5, 10, 20].iter() {
        let mystmark_content: String = MYSTMARK_SAMPLE.repeat(*size);
        let markdown_content: String = MARKDOWN_SAMPLE.repeat(*size);

        group.throughput(Throughput::Bytes(mystmark_content.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("mystmark", size),
            &mystmark_content,
            |b, content| {
                b.iter(|| {
                    let mut parser = Parser::new();
                    let result = parser.parse(black_box(content));
                    black_box(result.document.blocks.len())
                })
            },
        );

        group.throughput(Throughput::Bytes(markdown_content.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("markdown", size),
            &markdown_content,
            |b, content| {
                b.iter(|| {
                    let parser = MdParser::new_ext(black_box(content), Options::all());
                    let events: Vec<_> = parser.collect();
                    black_box(events.len())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_scaling);
criterion_main!(benches);
