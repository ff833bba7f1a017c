use orrery_animation_core::{
    AnimationConfig, AnimationTime, Config, Easing, ManualClock, Scheduler, SpringConfig, SpringStep,
};

#[test]
fn scheduler_config_fixture_loads() {
    let json = orrery_test_fixtures::configs::json("scheduler-linear").unwrap();
    let config = Config::from_json_str(&json).unwrap();
    assert_eq!(config.default_easing, Easing::Linear);
    assert_eq!(config.spring, SpringConfig::stiff());
}

#[test]
fn configured_default_easing_drives_animations() {
    let json = orrery_test_fixtures::configs::json("scheduler-linear").unwrap();
    let clock = ManualClock::new();
    let mut scheduler =
        Scheduler::new(Config::from_json_str(&json).unwrap()).with_clock(clock.clone());
    scheduler
        .animate("glow", AnimationConfig::new(0.0, 10.0, 100.0))
        .unwrap();
    clock.set(AnimationTime::from_millis(40.0).unwrap());
    let report = scheduler.tick();
    assert_eq!(report.updated, 1);
    let value = scheduler.value("glow").unwrap().as_number().unwrap();
    assert!((value - 4.0).abs() < 1e-5, "value = {value}");
}

#[test]
fn configured_spring_parameters_reach_built_springs() {
    let json = orrery_test_fixtures::configs::json("scheduler-linear").unwrap();
    let scheduler = Scheduler::new(Config::from_json_str(&json).unwrap());
    let mut spring = scheduler.spring(0.0, 640.0).unwrap();
    assert_eq!(spring.config(), &SpringConfig::stiff());

    let settled = (0..10_000).any(|_| spring.update(1.0 / 60.0) == SpringStep::Settled);
    assert!(settled);
    assert_eq!(spring.value(), 640.0);
    assert!(scheduler.spring(0.0, f32::NAN).is_err());
}
