use orrery_animation_core::{progress_for, AnimationTime, Easing, Spring, SpringConfig, SpringStep};

#[test]
fn every_easing_hits_both_endpoints() {
    for easing in Easing::ALL {
        assert_eq!(easing.apply(0.0), 0.0, "{easing} at 0");
        assert_eq!(easing.apply(1.0), 1.0, "{easing} at 1");
    }
}

#[test]
fn non_overshooting_easings_stay_in_unit_range() {
    for easing in Easing::ALL.into_iter().filter(|e| !e.overshoots()) {
        for i in 0..=200 {
            let v = easing.apply(i as f32 / 200.0);
            assert!((0.0..=1.0).contains(&v), "{easing}({}) = {v}", i as f32 / 200.0);
        }
    }
}

#[test]
fn easing_inputs_outside_unit_range_clamp() {
    for easing in Easing::ALL {
        assert_eq!(easing.apply(-3.0), 0.0);
        assert_eq!(easing.apply(7.5), 1.0);
    }
}

#[test]
fn identifiers_round_trip_by_name() {
    for easing in Easing::ALL {
        assert_eq!(Easing::from_name(easing.name()), easing);
    }
}

#[test]
fn progress_is_clamped_ratio() {
    let duration = AnimationTime::from_millis(800.0).unwrap();
    let at = |ms: f64| progress_for(AnimationTime::from_millis(ms).unwrap(), duration);
    assert_eq!(at(0.0), 0.0);
    assert_eq!(at(200.0), 0.25);
    assert_eq!(at(800.0), 1.0);
    assert_eq!(at(5000.0), 1.0);
}

#[test]
fn spring_presets_all_settle_on_target() {
    for config in [SpringConfig::gentle(), SpringConfig::wobbly(), SpringConfig::stiff()] {
        let mut spring = Spring::new(-40.0, 12.0, config).unwrap();
        let settled = (0..20_000).any(|_| spring.update(1.0 / 60.0) == SpringStep::Settled);
        assert!(settled, "{config:?} never settled");
        assert_eq!(spring.value(), 12.0);
        assert_eq!(spring.velocity(), 0.0);
    }
}
