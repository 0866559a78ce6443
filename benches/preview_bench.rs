use criterion::{criterion_group, criterion_main, Criterion, black_box};
use wordslot::{Location, PlacementEngine, Token};

fn engine(n: u32) -> PlacementEngine {
    let tokens = (0..n).map(|i| Token::new(i, format!("k{i}"))).collect();
    PlacementEngine::with_one_slot_per_token(tokens).unwrap()
}

fn bench_preview(c: &mut Criterion) {
    let e = engine(32);
    let pending = e.begin_move(0, Location::Pool(0)).unwrap();
    c.bench_function("preview_pool_to_slot_32", |ben| {
        ben.iter(|| {
            let p = e.preview_move(black_box(&pending), black_box(Location::Slot(7))).unwrap();
            black_box(p)
        })
    });
}

fn bench_commit(c: &mut Criterion) {
    c.bench_function("commit_pool_swap_32", |ben| {
        let mut e = engine(32);
        ben.iter(|| {
            let pending = e.begin_move(e.current_state().pool()[0].id, Location::Pool(0)).unwrap();
            let s = e.commit_move(pending, black_box(Location::Pool(31))).unwrap();
            black_box(s.pool().len())
        })
    });
}

criterion_group!(benches, bench_preview, bench_commit);
criterion_main!(benches);
