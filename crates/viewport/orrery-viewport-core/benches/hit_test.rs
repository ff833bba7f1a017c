use criterion::{black_box, criterion_group, criterion_main, Criterion};
use orrery_viewport_core::{Camera, HitOrder, HitTarget, HitTester, Vec2};

fn grid(count: usize) -> Vec<HitTarget<usize>> {
    let side = (count as f32).sqrt().ceil() as usize;
    (0..count)
        .map(|i| {
            let (col, row) = (i % side, i / side);
            HitTarget::new(i, Vec2::new(col as f32 * 30.0, row as f32 * 30.0), 18.0)
                .with_z((i % 4) as i32)
        })
        .collect()
}

fn bench_hit_test(c: &mut Criterion) {
    let mut camera = Camera::new(Vec2::new(1280.0, 720.0)).expect("valid surface");
    camera.set_rotation(0.3);
    camera.set_zoom(1.7);
    let targets = grid(5_000);

    for order in [HitOrder::Topmost, HitOrder::FirstInOrder] {
        let tester = HitTester::new(order);
        c.bench_function(&format!("hit_test_5000_{order:?}"), |b| {
            b.iter(|| tester.hit_test(&camera, black_box(Vec2::new(700.0, 410.0)), &targets))
        });
    }

    let tester = HitTester::default();
    c.bench_function("query_rect_5000", |b| {
        b.iter(|| {
            tester.query_rect(
                &camera,
                black_box(Vec2::new(100.0, 100.0)),
                black_box(Vec2::new(900.0, 600.0)),
                &targets,
            )
        })
    });
}

criterion_group!(benches, bench_hit_test);
criterion_main!(benches);
