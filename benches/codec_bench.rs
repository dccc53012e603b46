use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rbencode::{decode, encode, serialized_size, Value};

fn sample_torrent() -> Vec<u8> {
    let files = (0..200)
        .map(|i| {
            Value::dict([
                ("length", Value::Integer(i * 16384 + 7)),
                (
                    "path",
                    Value::list([Value::string("dir"), Value::string(&format!("file{}.bin", i))]),
                ),
            ])
        })
        .collect::<Vec<_>>();
    let torrent = Value::dict([
        ("announce", Value::string("http://tracker.example.com/announce")),
        (
            "info",
            Value::dict([
                ("files", Value::List(files)),
                ("name", Value::string("bench")),
                ("piece length", Value::Integer(262144)),
                ("pieces", Value::bytes(vec![0xab; 20 * 512])),
            ]),
        ),
    ]);
    encode(&torrent)
}

fn decode_bench(c: &mut Criterion) {
    let input = sample_torrent();
    c.bench_function("decode_torrent", |b| b.iter(|| decode(black_box(&input))));
}

fn encode_bench(c: &mut Criterion) {
    let value = decode(&sample_torrent()).unwrap();
    c.bench_function("encode_torrent", |b| b.iter(|| encode(black_box(&value))));
    c.bench_function("serialized_size_torrent", |b| {
        b.iter(|| serialized_size(black_box(&value)))
    });
}

criterion_group! {
    name = codec_benches;
    config = Criterion::default();
    targets = decode_bench, encode_bench
}

criterion_main!(codec_benches);
