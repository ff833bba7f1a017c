use approx::assert_relative_eq;
use orrery_viewport_core::{Camera, CameraState, HitTarget, HitTester, Vec2};

fn camera_at(state: CameraState) -> Camera {
    let mut camera = Camera::new(Vec2::new(800.0, 600.0)).unwrap();
    camera.set_state(state);
    camera
}

fn poses() -> Vec<CameraState> {
    let mut poses = Vec::new();
    for &zoom in &[0.25f32, 1.0, 3.0] {
        for &rotation in &[0.0f32, 0.7, -2.4] {
            poses.push(CameraState {
                x: 37.0,
                y: -140.0,
                zoom,
                rotation,
            });
        }
    }
    poses
}

#[test]
fn zoom_to_point_anchors_cursor_for_many_poses() {
    let cursors = [
        Vec2::new(0.0, 0.0),
        Vec2::new(400.0, 300.0),
        Vec2::new(799.0, 12.0),
        Vec2::new(250.0, 590.0),
    ];
    for pose in poses() {
        for cursor in cursors {
            for target_zoom in [0.1f32, 0.8, 2.5, 9.0] {
                let mut camera = camera_at(pose);
                let before = camera.screen_to_world(cursor);
                camera.zoom_at(cursor, target_zoom);
                let after = camera.screen_to_world(cursor);
                assert_relative_eq!(before.x, after.x, epsilon = 1e-2);
                assert_relative_eq!(before.y, after.y, epsilon = 1e-2);
            }
        }
    }
}

#[test]
fn reference_zoom_at_center_scenario() {
    let mut camera = Camera::new(Vec2::new(800.0, 600.0)).unwrap();
    camera.zoom_at(Vec2::new(400.0, 300.0), 2.0);
    assert_eq!(camera.position(), Vec2::ZERO);
    assert_eq!(camera.zoom(), 2.0);
}

#[test]
fn entity_center_always_hits_under_any_pose() {
    let targets = vec![
        HitTarget::new(1u8, Vec2::new(-60.0, 25.0), 3.0),
        HitTarget::new(2u8, Vec2::new(120.0, -80.0), 0.5),
    ];
    let tester = HitTester::default();
    for pose in poses() {
        let camera = camera_at(pose);
        for target in &targets {
            let screen = camera.world_to_screen(target.position);
            let hit = tester.hit_test(&camera, screen, &targets);
            assert_eq!(hit.map(|t| t.id), Some(target.id), "pose {pose:?}");
        }
        let far = camera.world_to_screen(Vec2::new(5_000.0, 5_000.0));
        assert!(tester.hit_test(&camera, far, &targets).is_none());
    }
}

#[test]
fn visible_bounds_contain_every_screen_corner() {
    for pose in poses() {
        let camera = camera_at(pose);
        let (min, max) = camera.visible_world_bounds();
        for corner in [Vec2::ZERO, Vec2::new(800.0, 600.0), Vec2::new(0.0, 600.0)] {
            let world = camera.screen_to_world(corner);
            assert!(world.x >= min.x - 1e-3 && world.x <= max.x + 1e-3);
            assert!(world.y >= min.y - 1e-3 && world.y <= max.y + 1e-3);
        }
    }
}
