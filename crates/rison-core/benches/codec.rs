use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rison_core::{decode, encode, quote_string, Mode, Value};
use serde_json::json;

/// A dashboard-style query state, the typical payload of a Rison URL.
fn query_state() -> Value {
    json!({
        "query": {"language": "kuery", "query": "status:500 and service:'checkout api'"},
        "filters": [
            {"field": "host.name", "negate": false, "params": ["web-01", "web-02"]},
            {"field": "http.response.bytes", "negate": true, "params": {"gte": 1024, "lt": 1.5e6}}
        ],
        "time": {"from": "now-15m", "to": "now"},
        "refreshInterval": {"pause": true, "value": 0},
        "columns": ["@timestamp", "message", "user.id"],
        "sort": [["@timestamp", "desc"]]
    })
}

fn wide_array(n: usize) -> Value {
    Value::Array(
        (0..n)
            .map(|i| json!({"id": i, "name": format!("item {i}"), "ok": i % 2 == 0}))
            .collect(),
    )
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for (name, value) in [("query_state", query_state()), ("wide_array_1000", wide_array(1000))] {
        let size = encode(&value, Mode::Full).map(|s| s.len()).unwrap_or(0);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &value, |b, v| {
            b.iter(|| encode(black_box(v), Mode::Full))
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for (name, value) in [("query_state", query_state()), ("wide_array_1000", wide_array(1000))] {
        let Ok(rison) = encode(&value, Mode::Full) else {
            continue;
        };
        group.throughput(Throughput::Bytes(rison.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &rison, |b, r| {
            b.iter(|| decode(black_box(r.as_bytes()), Mode::Full))
        });
    }
    group.finish();
}

fn bench_quote(c: &mut Criterion) {
    let rison = encode(&query_state(), Mode::ObjectOnly).unwrap_or_default();
    c.bench_function("quote/query_state", |b| {
        b.iter(|| quote_string(black_box(&rison)))
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_quote);
criterion_main!(benches);
