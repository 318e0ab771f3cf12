use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ot_kit::prelude::*;

/// An edit scattering roughly `edits` small changes across a document of
/// `base_len` bytes. Deterministic for a given rng state.
fn scattered_edit(rng: &mut StdRng, base_len: usize, edits: usize) -> Ops {
    let stride = (base_len / edits).max(2);
    let mut ops = Ops::new();
    let mut remaining = base_len;
    for _ in 0..edits {
        if remaining < stride {
            break;
        }
        let keep = rng.gen_range(stride / 2..stride);
        ops = ops.retain(keep);
        remaining -= keep;
        if rng.gen_bool(0.5) {
            let cut = rng.gen_range(1..8).min(remaining);
            ops = ops.delete(cut);
            remaining -= cut;
        } else {
            ops = ops.insert("edit");
        }
    }
    ops.retain(remaining)
}

fn bench_doc_apply(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let base = "lorem ipsum dolor sit amet ".repeat(2400);
    let doc = Doc::from(base.as_str());
    let edit = scattered_edit(&mut rng, doc.len(), 64);

    c.bench_function("Doc::apply 64 KiB x64 edits", |b| {
        b.iter(|| {
            let mut doc = doc.clone();
            doc.apply(black_box(&edit)).unwrap();
            black_box(doc.len())
        })
    });
}

fn bench_compose_chain(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let mut edits = Vec::new();
    let mut len = 4096usize;
    for _ in 0..100 {
        let edit = scattered_edit(&mut rng, len, 8);
        len = edit.target_len();
        edits.push(edit);
    }

    c.bench_function("Ops::compose 100-edit chain", |b| {
        b.iter(|| {
            let mut combined = edits[0].clone();
            for edit in &edits[1..] {
                combined = combined.compose(edit).unwrap();
            }
            black_box(combined.count())
        })
    });
}

fn bench_transform_pair(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let len = 64 * 1024;
    let ours = scattered_edit(&mut rng, len, 128);
    let theirs = scattered_edit(&mut rng, len, 128);

    c.bench_function("Ops::transform 64 KiB concurrent edits", |b| {
        b.iter(|| black_box(ours.transform(&theirs).unwrap()))
    });
}

fn bench_rebase_backlog(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let mut backlog = Vec::new();
    let mut len = 4096usize;
    for _ in 0..100 {
        let edit = scattered_edit(&mut rng, len, 4);
        len = edit.target_len();
        backlog.push(edit);
    }
    let stale = scattered_edit(&mut rng, 4096, 8);

    c.bench_function("Ops::transform 100-revision backlog", |b| {
        b.iter(|| {
            let mut rebased = stale.clone();
            for other in &backlog {
                rebased = rebased.transform(other).unwrap().0;
            }
            black_box(rebased.count())
        })
    });
}

fn bench_diff(c: &mut Criterion) {
    let old = "the quick brown fox jumps over the lazy dog. ".repeat(1400);
    let mut new = old.clone();
    new.replace_range(31_000..31_010, "REWRITTEN!");

    c.bench_function("diff 64 KiB documents", |b| {
        b.iter(|| black_box(diff(&old, &new)))
    });
}

fn bench_client_roundtrips(c: &mut Criterion) {
    c.bench_function("Client::apply+ack x1000", |b| {
        b.iter(|| {
            let mut client = Client::new(Box::new(|_, _| {}));
            client.apply(Ops::new().insert("seed")).unwrap();
            client.ack().unwrap();
            for _ in 0..999 {
                client
                    .apply(Ops::new().retain(client.doc().len()).insert("x"))
                    .unwrap();
                client.ack().unwrap();
            }
            black_box(client.rev())
        })
    });
}

criterion_group!(
    benches,
    bench_doc_apply,
    bench_compose_chain,
    bench_transform_pair,
    bench_rebase_backlog,
    bench_diff,
    bench_client_roundtrips,
);
criterion_main!(benches);
