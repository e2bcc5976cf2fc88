use canonical::{canonicalize, split_statements};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

const STATEMENT: &str = "select o.id, c.name from orders o\n  inner join customers c on c.id=o.customer_id\n where o.total > 100.50 and c.region = 'EMEA';\n";

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split_statements");

    for count in [8usize, 64, 512].iter() {
        let script = STATEMENT.repeat(*count);
        group.throughput(Throughput::Bytes(script.len() as u64));
        group.bench_function(format!("statements_{count}"), |b| {
            b.iter(|| split_statements(black_box(&script)))
        });
    }

    group.finish();
}

fn bench_canonicalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonicalize");
    group.throughput(Throughput::Bytes(STATEMENT.len() as u64));
    group.bench_function("single_statement", |b| {
        b.iter(|| canonicalize(black_box(STATEMENT)))
    });
    group.finish();
}

criterion_group!(benches, bench_split, bench_canonicalize);
criterion_main!(benches);
