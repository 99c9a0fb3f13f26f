use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vcf_flatten::parser::{interpret, RecordParser};
use vcf_flatten::{FlagPolicy, Flattener, Table};

const PATH: &str = "resources/example.vcf";
const LINE: &str = "chr1\t100\trs1\tA\tT\t50\tPASS\tDP=10;AF=0.5,0.3;DB;MQ=60;ANN=A|missense|MODERATE\tGT:AD:DP\t0/1:35,10:45";

fn lines(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            // every 10th line brings a key no earlier line had
            let extra = if i % 10 == 0 {
                format!(";K{}={}", i, i)
            } else {
                String::new()
            };
            format!("chr1\t{}\t.\tA\tC\t.\tPASS\tDP={};AF=0.1{}", i, i, extra)
        })
        .collect()
}

fn benchmark_interpret(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpret");
    for raw in &[".", "PASS", "0.5,0.3,0.2"] {
        group.bench_with_input(BenchmarkId::from_parameter(raw), raw, |b, &raw| {
            b.iter(|| interpret(black_box(raw)))
        });
    }
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for flags in &[FlagPolicy::Drop, FlagPolicy::Retain] {
        let parser = RecordParser::new(*flags);
        group.bench_with_input(BenchmarkId::new("RECORD", flags), &LINE, |b, &line| {
            b.iter(|| parser.parse(1, black_box(line)))
        });
    }
}

fn benchmark_table(c: &mut Criterion) {
    let parser = RecordParser::default();
    let mut group = c.benchmark_group("column union");
    for n in &[100usize, 1000] {
        let input = lines(*n);
        group.bench_with_input(BenchmarkId::new("TABLE", n), &input, |b, input| {
            b.iter(|| {
                input
                    .iter()
                    .map(|line| parser.parse(1, line).unwrap())
                    .collect::<Table>()
            })
        });
    }
}

fn benchmark_flatten(c: &mut Criterion) {
    let path = PATH;
    let mut group = c.benchmark_group("flatten");
    group.bench_with_input(BenchmarkId::new("FILE", path), &path, |b, &path| {
        b.iter(|| Flattener::default().flatten_path(path).unwrap())
    });
}

criterion_group!(
    benches,
    benchmark_interpret,
    benchmark_parse,
    benchmark_table,
    benchmark_flatten
);
criterion_main!(benches);
