use criterion::{black_box, criterion_group, criterion_main, Criterion};
use treebus::{Emitter, EventDeclaration, Flow};

fn flat_dispatch(c: &mut Criterion) {
    let emitter = Emitter::new();
    for _ in 0..8 {
        emitter.on("tick", |_, _| Flow::Continue);
    }

    c.bench_function("flat_dispatch_8_listeners", |b| {
        b.iter(|| emitter.emit(black_box("tick"), &[]))
    });
}

fn namespaced_dispatch(c: &mut Criterion) {
    let emitter = Emitter::new();
    emitter.on("job", |_, _| Flow::Continue);
    emitter.on("job.stage", |_, _| Flow::Continue);
    emitter.on("job.stage.step", |_, _| Flow::Continue);
    emitter.on("job.stage.step.detail", |_, _| Flow::Continue);
    emitter.on("job.other", |_, _| Flow::Continue);
    emitter.on(treebus::WILDCARD, |_, _| Flow::Continue);

    c.bench_function("namespaced_dispatch_with_wildcard", |b| {
        b.iter(|| emitter.emit(black_box("job"), &[]))
    });
}

fn bubbling_dispatch(c: &mut Criterion) {
    let chain: Vec<Emitter> = (0..4).map(|_| Emitter::new()).collect();
    for pair in chain.windows(2) {
        pair[0].set_parent_emitter(Some(&pair[1]));
    }
    for emitter in &chain {
        emitter.on("alarm", |_, _| Flow::Continue);
    }
    chain[0].declare_event(
        "alarm",
        EventDeclaration {
            bubbling: true,
            cancelable: true,
        },
    );

    c.bench_function("bubbling_dispatch_4_levels", |b| {
        b.iter(|| chain[0].emit(black_box("alarm"), &[]))
    });
}

criterion_group!(
    benches,
    flat_dispatch,
    namespaced_dispatch,
    bubbling_dispatch
);
criterion_main!(benches);
