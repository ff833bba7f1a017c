use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use orrery_animation_core::{
    AnimatableValue, AnimationConfig, AnimationTime, Config, Easing, ManualClock, Scheduler,
};

fn planet_value(i: usize) -> AnimatableValue {
    AnimatableValue::mapping([
        ("x", AnimatableValue::Number(i as f32)),
        ("y", AnimatableValue::Number(-(i as f32))),
        ("scale", AnimatableValue::Number(1.0)),
        ("color", AnimatableValue::numbers(&[0.2, 0.4, 0.8, 1.0])),
    ])
}

fn loaded_scheduler(count: usize) -> Scheduler {
    let mut scheduler = Scheduler::new(Config::default()).with_clock(ManualClock::new());
    for i in 0..count {
        let config = AnimationConfig::new(planet_value(i), planet_value(i + 10), 10_000.0)
            .easing(Easing::EaseInOutCubic)
            .on_update(|v| {
                black_box(v);
                Ok(())
            });
        scheduler
            .animate(format!("planet:{i}"), config)
            .expect("valid animation");
    }
    scheduler
}

fn bench_tick(c: &mut Criterion) {
    for count in [10usize, 100, 1000] {
        c.bench_function(&format!("scheduler_tick_{count}"), |b| {
            b.iter_batched(
                || loaded_scheduler(count),
                |mut scheduler| {
                    let report = scheduler.tick_at(AnimationTime::from_nanos(16_000_000));
                    black_box(report);
                },
                BatchSize::SmallInput,
            )
        });
    }
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
