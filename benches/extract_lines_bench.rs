//! Benchmarks for line extraction.
//!
//! ## Groups
//!
//! - **one_shot**: a whole window per call, by line length and terminator
//! - **chunked**: the same input fed through a small buffer, so every call
//!   ends with a remainder that has to be compacted
//! - **encodings**: one window decoded under each [`Encoding`]
//! - **reader**: `LineReader` over an in-memory source
//!
//! Throughput is reported in input bytes.

use buflines::{extract_lines, line_spans, Encoding, LineReader, ReaderConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const INPUT_SIZE: usize = 1024 * 1024;

/// Lines of `line_len` ASCII bytes, every `crlf_every`-th one CRLF terminated.
fn generate_lines(size: usize, line_len: usize, crlf_every: usize) -> Vec<u8> {
    let pattern = b"The quick brown fox jumps over the lazy dog. 0123456789";
    let mut result = Vec::with_capacity(size + line_len + 2);
    let mut index = 0;
    while result.len() < size {
        for i in 0..line_len {
            result.push(pattern[i % pattern.len()]);
        }
        if crlf_every > 0 && index % crlf_every == 0 {
            result.push(b'\r');
        }
        result.push(b'\n');
        index += 1;
    }
    result
}

/// Mixed UTF-8 lines, about 70% ASCII.
fn generate_utf8_lines(size: usize) -> Vec<u8> {
    let line = "Hello, world! Café résumé naïve über. 日本語 中文 한국어. Emoji: 🎉🚀💻\n";
    let mut result = Vec::with_capacity(size + line.len());
    while result.len() < size {
        result.extend_from_slice(line.as_bytes());
    }
    result
}

/// Feed `data` through a buffer of `capacity` bytes and return the line count.
fn run_chunked(data: &[u8], buffer: &mut [u8], encoding: Encoding) -> usize {
    let capacity = buffer.len();
    let mut lines = Vec::new();
    let mut count = 0;
    let mut remainder = 0;
    let mut rest = data;

    while !rest.is_empty() {
        let (chunk, tail) = rest.split_at((capacity - remainder).min(rest.len()));
        buffer[remainder..remainder + chunk.len()].copy_from_slice(chunk);
        remainder = extract_lines(buffer, remainder + chunk.len(), encoding, &mut lines).unwrap();
        count += lines.len();
        lines.clear();
        rest = tail;
    }
    count
}

fn bench_one_shot(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_one_shot");

    for line_len in [0, 16, 80, 1024] {
        for (name, crlf_every) in [("lf", 0), ("crlf", 1)] {
            let data = generate_lines(INPUT_SIZE, line_len, crlf_every);
            let mut buffer = data.clone();
            let mut lines = Vec::with_capacity(data.len() / (line_len + 1));

            group.throughput(Throughput::Bytes(data.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(name, format!("{}b_lines", line_len)),
                &data,
                |b, data| {
                    b.iter(|| {
                        lines.clear();
                        extract_lines(&mut buffer, data.len(), Encoding::Utf8, &mut lines).unwrap();
                        black_box(lines.len())
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_spans_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_spans");

    for line_len in [16, 80, 1024] {
        let data = generate_lines(INPUT_SIZE, line_len, 4);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}b_lines", line_len)),
            &data,
            |b, data| {
                b.iter(|| line_spans(black_box(data)).map(<[u8]>::len).sum::<usize>());
            },
        );
    }

    group.finish();
}

fn bench_chunked(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_chunked");
    let data = generate_lines(INPUT_SIZE, 80, 3);

    for capacity in [256, 4096, 64 * 1024] {
        let mut buffer = vec![0u8; capacity];
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format_size(capacity)),
            &data,
            |b, data| {
                b.iter(|| run_chunked(black_box(data), &mut buffer, Encoding::Utf8));
            },
        );
    }

    group.finish();
}

fn bench_encodings(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_encodings");
    let data = generate_utf8_lines(INPUT_SIZE);

    for encoding in [Encoding::Utf8, Encoding::Utf8Lossy, Encoding::Latin1] {
        let mut buffer = vec![0u8; 4096];
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(encoding), &data, |b, data| {
            b.iter(|| run_chunked(black_box(data), &mut buffer, encoding));
        });
    }

    group.finish();
}

fn bench_reader(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_reader");
    let data = generate_lines(INPUT_SIZE, 80, 2);

    for capacity in [256, 8 * 1024] {
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format_size(capacity)),
            &data,
            |b, data| {
                b.iter(|| {
                    let config = ReaderConfig::default().with_capacity(capacity);
                    LineReader::with_config(black_box(&data[..]), config)
                        .map(|line| line.unwrap().len())
                        .sum::<usize>()
                });
            },
        );
    }

    group.finish();
}

fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{}mb", bytes / (1024 * 1024))
    } else if bytes >= 1024 {
        format!("{}kb", bytes / 1024)
    } else {
        format!("{}b", bytes)
    }
}

criterion_group!(
    benches,
    bench_one_shot,
    bench_spans_only,
    bench_chunked,
    bench_encodings,
    bench_reader,
);

criterion_main!(benches);
