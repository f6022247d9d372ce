use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use huffcode::{unpack, HuffmanDecoder, HuffmanEncoder, HuffmanTree};

fn sample_text() -> Vec<u8> {
    // Skewed byte distribution, roughly like English prose.
    let base = b"the quick brown fox jumps over the lazy dog, then naps in the sun. ";
    base.iter().copied().cycle().take(64 * 1024).collect()
}

fn bench_build(c: &mut Criterion) {
    let text = sample_text();
    c.bench_function("tree_from_text", |b| {
        b.iter(|| HuffmanTree::from_text(&text).unwrap())
    });
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman");
    let text = sample_text();
    group.throughput(Throughput::Bytes(text.len() as u64));

    let tree = HuffmanTree::from_text(&text).unwrap();
    let encoder = HuffmanEncoder::new(&tree);

    group.bench_function("encode", |b| b.iter(|| encoder.encode_text(&text).unwrap()));

    let bits = encoder.encode_text(&text).unwrap();
    group.bench_function("decode", |b| {
        b.iter(|| HuffmanDecoder::new(&tree).decode_text(&bits).unwrap())
    });

    let packed = encoder.pack(&text).unwrap();
    group.bench_function("unpack", |b| b.iter(|| unpack(&packed).unwrap()));
    group.finish();
}

criterion_group!(benches, bench_build, bench_codec);
criterion_main!(benches);
