#![allow(clippy::expect_used)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::fmt::Write;

use minixml::serial::serialize;
use minixml::{Document, Parser};

// ---------------------------------------------------------------------------
// Document generators
// ---------------------------------------------------------------------------

/// Generates a small XML document, roughly a dozen elements.
fn make_small_xml() -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<config>\n");
    for i in 0..10 {
        let _ = writeln!(xml, "  <option name=\"opt{i}\">setting {i}</option>");
    }
    xml.push_str("</config>\n");
    xml
}

/// Generates a medium XML document, roughly a hundred elements with mixed
/// attributes and text.
fn make_medium_xml() -> String {
    let mut xml = String::from("<?xml version=\"1.0\"?>\n<feed>\n");
    for i in 0..100 {
        let _ = writeln!(
            xml,
            "  <entry id=\"e{i}\" kind=\"{}\"><title>Entry {i}</title>\
             <summary>Summary text for entry {i}</summary></entry>",
            if i % 2 == 0 { "note" } else { "post" }
        );
    }
    xml.push_str("</feed>\n");
    xml
}

/// Generates a large XML document, around a thousand elements.
fn make_large_xml() -> String {
    let mut xml = String::from("<?xml version=\"1.0\"?>\n<log>\n");
    for i in 0..1000 {
        let _ = writeln!(
            xml,
            "  <event seq=\"{i}\" severity=\"info\"><source>worker-{}</source>\
             <detail>event payload {i}</detail></event>",
            i % 7
        );
    }
    xml.push_str("</log>\n");
    xml
}

/// Generates a document nested `depth` tags deep with a single text leaf.
fn make_nested_xml(depth: usize) -> String {
    let mut xml = String::from("<?xml version=\"1.0\"?>\n");
    for i in 0..depth {
        let _ = write!(xml, "<d{i}>");
    }
    xml.push_str("leaf");
    for i in (0..depth).rev() {
        let _ = write!(xml, "</d{i}>");
    }
    xml.push('\n');
    xml
}

/// Generates a document whose elements each carry `num_attrs` attributes.
fn make_attr_heavy_xml(num_attrs: usize) -> String {
    let mut xml = String::from("<?xml version=\"1.0\"?>\n<table>\n");
    for i in 0..10 {
        let _ = write!(xml, "  <row");
        for j in 0..num_attrs {
            let _ = write!(xml, " col{j}=\"cell_{i}_{j}\"");
        }
        xml.push_str("/>\n");
    }
    xml.push_str("</table>\n");
    xml
}

/// Generates a document dense with entity escapes in text and attributes.
fn make_entity_heavy_xml() -> String {
    let mut xml = String::from("<?xml version=\"1.0\"?>\n<exprs>\n");
    for i in 0..200 {
        let _ = writeln!(
            xml,
            "  <expr cmp=\"&lt;=&gt;\">a{i} &lt; b{i} &gt; &quot;c{i}&quot;</expr>"
        );
    }
    xml.push_str("</exprs>\n");
    xml
}

// ---------------------------------------------------------------------------
// Parsing benchmarks
// ---------------------------------------------------------------------------

fn bench_parse_small(c: &mut Criterion) {
    let xml = make_small_xml();
    c.bench_function("parse_small", |b| {
        b.iter(|| Document::parse_str(black_box(&xml)));
    });
}

fn bench_parse_medium(c: &mut Criterion) {
    let xml = make_medium_xml();
    c.bench_function("parse_medium", |b| {
        b.iter(|| Document::parse_str(black_box(&xml)));
    });
}

fn bench_parse_large(c: &mut Criterion) {
    let xml = make_large_xml();
    c.bench_function("parse_large", |b| {
        b.iter(|| Document::parse_str(black_box(&xml)));
    });
}

fn bench_parse_deeply_nested(c: &mut Criterion) {
    let xml = make_nested_xml(50);
    c.bench_function("parse_deeply_nested", |b| {
        b.iter(|| Document::parse_str(black_box(&xml)));
    });
}

fn bench_parse_many_attributes(c: &mut Criterion) {
    let xml = make_attr_heavy_xml(50);
    c.bench_function("parse_many_attributes", |b| {
        b.iter(|| Document::parse_str(black_box(&xml)));
    });
}

fn bench_parse_entity_heavy(c: &mut Criterion) {
    let xml = make_entity_heavy_xml();
    c.bench_function("parse_entity_heavy", |b| {
        b.iter(|| Document::parse_str(black_box(&xml)));
    });
}

// ---------------------------------------------------------------------------
// Incremental feeding benchmark
// ---------------------------------------------------------------------------

fn bench_feed_in_chunks(c: &mut Criterion) {
    let xml = make_medium_xml();
    let bytes = xml.as_bytes();
    // ~64-byte chunks to simulate streaming input.
    let chunks: Vec<&[u8]> = bytes.chunks(64).collect();
    c.bench_function("feed_in_chunks", |b| {
        b.iter(|| {
            let mut parser = Parser::new();
            for chunk in &chunks {
                parser.feed(black_box(chunk));
            }
            parser.parse().expect("chunked parse failed")
        });
    });
}

// ---------------------------------------------------------------------------
// Serialization benchmarks
// ---------------------------------------------------------------------------

fn bench_serialize_small(c: &mut Criterion) {
    let xml = make_small_xml();
    let doc = Document::parse_str(&xml).expect("failed to parse small XML");
    c.bench_function("serialize_small", |b| {
        b.iter(|| serialize(black_box(&doc)));
    });
}

fn bench_serialize_large(c: &mut Criterion) {
    let xml = make_large_xml();
    let doc = Document::parse_str(&xml).expect("failed to parse large XML");
    c.bench_function("serialize_large", |b| {
        b.iter(|| serialize(black_box(&doc)));
    });
}

// ---------------------------------------------------------------------------
// Roundtrip benchmark: parse -> serialize -> parse
// ---------------------------------------------------------------------------

fn bench_roundtrip(c: &mut Criterion) {
    let xml = make_medium_xml();
    c.bench_function("roundtrip", |b| {
        b.iter(|| {
            let doc = Document::parse_str(black_box(&xml)).expect("parse failed");
            let serialized = serialize(&doc);
            let doc2 = Document::parse_str(&serialized).expect("re-parse failed");
            black_box(doc2);
        });
    });
}

// ---------------------------------------------------------------------------
// Criterion groups and main
// ---------------------------------------------------------------------------

criterion_group!(
    parsing,
    bench_parse_small,
    bench_parse_medium,
    bench_parse_large,
    bench_parse_deeply_nested,
    bench_parse_many_attributes,
    bench_parse_entity_heavy,
);

criterion_group!(feeding, bench_feed_in_chunks);

criterion_group!(serialization, bench_serialize_small, bench_serialize_large,);

criterion_group!(roundtrip, bench_roundtrip);

criterion_main!(parsing, feeding, serialization, roundtrip);
