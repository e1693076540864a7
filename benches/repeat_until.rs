use std::hint::black_box;
use std::rc::Rc;

use criterion::{Criterion, criterion_group, criterion_main};
use qflow::{Error, Turns, map, repeat_until};

fn synchronous_steps(n: u64) -> u64 {
    let mut i = 0u64;
    let total = Rc::new(std::cell::Cell::new(0));
    let out = Rc::clone(&total);
    repeat_until(
        move |next| {
            i += 1;
            next.done((i >= n).then_some(i))
        },
        move |outcome| {
            out.set(outcome.unwrap_or_default());
            Ok::<(), Error>(())
        },
    )
    .unwrap();
    total.get()
}

fn deferred_steps(n: u64) -> usize {
    let turns: Rc<Turns<Error>> = Rc::new(Turns::new());
    let queue = Rc::clone(&turns);
    let mut i = 0u64;
    repeat_until(
        move |next| {
            i += 1;
            let report = (i >= n).then_some(i);
            queue.defer(move || next.done(report));
            Ok(())
        },
        |_| Ok(()),
    )
    .unwrap();
    turns.run().unwrap()
}

fn bench_repeat_until(c: &mut Criterion) {
    let mut group = c.benchmark_group("repeat_until");
    group.sample_size(20);
    group.bench_function("sync_500k", |b| {
        b.iter(|| synchronous_steps(black_box(500_000)))
    });
    group.bench_function("deferred_50k", |b| b.iter(|| deferred_steps(black_box(50_000))));
    group.finish();
}

fn bench_map(c: &mut Criterion) {
    c.bench_function("map_100k", |b| {
        b.iter(|| {
            map(
                0..black_box(100_000u32),
                |x, next| next.done(x.wrapping_mul(3)),
                |outcome| {
                    black_box(outcome.map(|v| v.len()).unwrap_or(0));
                    Ok::<(), Error>(())
                },
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, bench_repeat_until, bench_map);
criterion_main!(benches);
