use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pepvar::join::{inner_join, JoinSpec};
use pepvar::pipeline::{Pipeline, PipelineConfig, PipelineInputs};
use pepvar::table::{Row, Table};
use pepvar::translate::IdentifierMap;

const RESIDUES: &[u8] = b"ACDEFGHIKLMNPQRSTVWY";

/// Deterministic pseudo-peptide for row `i`
fn peptide(i: usize) -> String {
    (0..8)
        .map(|j| RESIDUES[(i * 7 + j * 13) % RESIDUES.len()] as char)
        .collect()
}

/// Evidence rows spread over a few raw files and a few hundred proteins
fn evidence_rows(n: usize, protein_prefix: &str) -> Vec<Row> {
    (0..n)
        .map(|i| {
            vec![
                Some(format!("run{:02}", i % 8)),
                Some((1000 + i).to_string()),
                Some(peptide(i)),
                Some(format!("{}{}", protein_prefix, i % 300)),
            ]
        })
        .collect()
}

fn create_inputs(n: usize) -> PipelineInputs {
    PipelineInputs {
        dbpepvar: Table::from_rows(
            "evidence_dbpepvar",
            ["Raw file", "MS MS Scan Number", "Sequence", "Leading Razor Protein"],
            evidence_rows(n, "NP_"),
        )
        .unwrap(),
        refseq: Table::from_rows(
            "evidence_refseq",
            ["Raw file", "MS/MS Scan Number", "Sequence", "Leading Razor Protein"],
            evidence_rows(n, "GI_"),
        )
        .unwrap(),
        missense: Table::from_rows(
            "missense",
            ["PepRef", "PepMut"],
            (0..n / 4)
                .map(|i| vec![Some(peptide(i)), Some(peptide(i + 1))])
                .collect(),
        )
        .unwrap(),
    }
}

/// Benchmark the evidence self-join alone
fn bench_evidence_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("evidence_join");

    for n in [1_000, 5_000, 20_000] {
        let inputs = create_inputs(n);
        let spec = JoinSpec::on(["Raw file", "Leading Razor Protein"])
            .with_suffixes("_dbPepVar", "_refSeq");

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let joined = inner_join(
                    black_box(&inputs.refseq),
                    black_box(&inputs.refseq),
                    &spec,
                )
                .unwrap();
                black_box(joined);
            });
        });
    }

    group.finish();
}

/// Benchmark the whole pipeline, translation included
fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let map = IdentifierMap::from_pairs((0..300).map(|i| (format!("NP_{}", i), format!("GI_{}", i))))
        .unwrap();
    let pipeline = Pipeline::new(PipelineConfig::default());

    for n in [1_000, 5_000] {
        let inputs = create_inputs(n);

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let output = pipeline.run(&map, black_box(inputs.clone())).unwrap();
                black_box(output);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_evidence_join, bench_full_pipeline);
criterion_main!(benches);
