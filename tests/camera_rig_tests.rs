use glam::{Mat4, Vec3};
use scene_viewer::arcball::{ArcballCamera, MIN_RADIUS};
use scene_viewer::camera::Camera;
use scene_viewer::traits::camera::CameraRig;

const TOLERANCE: f32 = 1e-3;

mod free_fly_tests {
    use super::*;

    #[test]
    fn test_move_forward_reaches_old_look_at() {
        // pos (0,0,5), look_at origin, speed 5, dt 1.0
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 55.0, 0.1, 500.0);
        camera.movement_speed = 5.0;

        camera.move_forward(1.0);

        assert!(
            camera.position.distance(Vec3::ZERO) < TOLERANCE,
            "position should be ~origin, got {:?}",
            camera.position
        );
        assert!(
            camera.look_at.distance(Vec3::new(0.0, 0.0, -5.0)) < TOLERANCE,
            "look_at should be ~(0,0,-5), got {:?}",
            camera.look_at
        );
    }

    #[test]
    fn test_arbitrary_move_sequence_preserves_distance() {
        let mut camera = Camera::new(Vec3::new(1.0, 2.0, 8.0), Vec3::new(0.0, 1.0, 0.0), 55.0, 0.1, 500.0);
        let initial = (camera.look_at - camera.position).length();

        let moves: [fn(&mut Camera, f32); 4] = [
            Camera::move_forward,
            Camera::move_backward,
            Camera::move_left,
            Camera::move_right,
        ];
        for step in 0..40 {
            moves[step % moves.len()](&mut camera, 0.016);
            let distance = (camera.look_at - camera.position).length();
            assert!(
                (distance - initial).abs() < TOLERANCE,
                "distance drifted at step {}: {} vs {}",
                step,
                distance,
                initial
            );
        }
    }

    #[test]
    fn test_large_rotation_stays_clamped_and_finite() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 55.0, 0.1, 500.0);

        camera.rotate(0.0, 1e6);
        assert!(camera.pitch <= 89.0);
        assert!(camera.view_matrix().is_finite());

        camera.rotate(0.0, -1e7);
        assert!(camera.pitch >= -89.0);
        assert!(camera.view_matrix().is_finite());
    }

    #[test]
    fn test_view_matrix_round_trip_after_mutators() {
        let mut camera = Camera::new(Vec3::new(3.0, 1.0, -2.0), Vec3::ZERO, 60.0, 0.1, 100.0);

        camera.move_left(0.25);
        camera.rotate(31.0, -12.0);
        camera.move_backward(0.5);

        let expected = Mat4::look_at_rh(camera.position, camera.look_at, Vec3::Y);
        assert_eq!(camera.view_matrix(), expected);
    }
}

mod arcball_tests {
    use super::*;

    #[test]
    fn test_quarter_turn_end_to_end() {
        // theta=0, phi=0, radius=10, fov=55, aspect=1, near=0.1, far=500
        let mut camera = ArcballCamera::new(0.0, 0.0, 10.0, 55.0, 1.0, 0.1, 500.0).unwrap();

        assert!(
            camera.position().distance(Vec3::new(0.0, 0.0, 10.0)) < TOLERANCE,
            "initial position should be target + (0,0,10), got {:?}",
            camera.position()
        );

        camera.sensitivity = 1.0;
        camera.rotate(90.0, 0.0);

        assert!(
            camera.position().distance(Vec3::new(10.0, 0.0, 0.0)) < TOLERANCE,
            "after a quarter turn position should be target + (10,0,0), got {:?}",
            camera.position()
        );
    }

    #[test]
    fn test_zoom_in_converges_above_floor() {
        let mut camera = ArcballCamera::new(0.0, 0.0, 10.0, 55.0, 1.0, 0.1, 500.0).unwrap();

        let mut previous = camera.radius();
        for _ in 0..200 {
            camera.scale_radius(0.9);
            let radius = camera.radius();
            assert!(radius >= MIN_RADIUS, "radius fell below floor: {}", radius);
            assert!(radius <= previous, "radius should be non-increasing");
            previous = radius;
        }
        assert!((camera.radius() - MIN_RADIUS).abs() < TOLERANCE);
    }

    #[test]
    fn test_pole_approach_never_degenerates() {
        let mut camera = ArcballCamera::new(45.0, 0.0, 5.0, 55.0, 1.0, 0.1, 500.0).unwrap();
        camera.sensitivity = 1.0;

        for _ in 0..100 {
            camera.rotate(0.0, 5.0);
            let position = camera.position();
            assert!(position.is_finite(), "position degenerated: {:?}", position);
            assert!(camera.view_matrix().is_finite());
        }
        assert!(camera.phi() < std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_rig_contract_reports_eye_position() {
        let camera = ArcballCamera::new(30.0, 20.0, 7.0, 55.0, 1.0, 0.1, 500.0).unwrap();
        let rig: &dyn CameraRig = &camera;

        // the rig must expose the true eye, not the orbit target
        assert!((rig.position().length() - 7.0).abs() < TOLERANCE);
        assert!(rig.position().distance(camera.target) > 1.0);
    }

    #[test]
    fn test_both_rigs_share_matrix_contract() {
        let free = Camera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 55.0, 0.1, 500.0);
        let orbit = ArcballCamera::new(0.0, 0.0, 10.0, 55.0, 1.0, 0.1, 500.0).unwrap();

        let rigs: [&dyn CameraRig; 2] = [&free, &orbit];
        for rig in rigs {
            // same pose through either parameterization
            assert!(rig.position().distance(Vec3::new(0.0, 0.0, 10.0)) < TOLERANCE);
            let expected = Mat4::look_at_rh(rig.position(), Vec3::ZERO, Vec3::Y);
            let difference = (rig.view_matrix() - expected)
                .to_cols_array()
                .iter()
                .map(|v| v.abs())
                .fold(0.0f32, f32::max);
            assert!(difference < TOLERANCE);
        }
    }
}
