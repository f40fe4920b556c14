use criterion::{criterion_group, criterion_main};


criterion_group!(
    benches,
    network::application::mqtt::codec::bench_encode,
    network::application::mqtt::codec::bench_decode,
    network::application::mqtt::codec::bench_deframe,
    network::application::mqtt::codec::bench_topic_matching
);
criterion_main!(benches);
