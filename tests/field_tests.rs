use glam::Vec2;
use puddle::{DensityField, FlowField, PointerKernel, SmoothingKernel};

#[test]
fn test_kernel_center_is_maximum() {
    let kernel = SmoothingKernel::build(5);
    let center = kernel.weight(5, 5);
    assert!(center > 0.0, "center weight should be positive");

    for ky in 0..kernel.size {
        for kx in 0..kernel.size {
            assert!(
                kernel.weight(kx, ky) <= center,
                "weight at ({kx},{ky}) exceeds center"
            );
        }
    }
}

#[test]
fn test_kernel_zero_outside_radius() {
    let kernel = SmoothingKernel::build(5);
    for ky in 0..kernel.size {
        for kx in 0..kernel.size {
            let dx = kx as f32 - 5.0;
            let dy = ky as f32 - 5.0;
            if (dx * dx + dy * dy).sqrt() > 5.0 {
                assert_eq!(
                    kernel.weight(kx, ky),
                    0.0,
                    "weight outside radius at ({kx},{ky}) must be exactly zero"
                );
            }
        }
    }
}

#[test]
fn test_kernel_rotation_symmetry() {
    let r = 6i32;
    let kernel = SmoothingKernel::build(r as usize);
    for oy in -r..=r {
        for ox in -r..=r {
            let a = kernel.weight((ox + r) as usize, (oy + r) as usize);
            // Offset rotated 90 degrees: (ox, oy) -> (-oy, ox).
            let b = kernel.weight((-oy + r) as usize, (ox + r) as usize);
            assert!(
                (a - b).abs() < 1e-6,
                "kernel not rotation symmetric at ({ox},{oy}): {a} vs {b}"
            );
        }
    }
}

#[test]
fn test_density_clear_is_idempotent() {
    let kernel = SmoothingKernel::build(6);
    let mut field = DensityField::new(50, 50);
    field.splat(Vec2::new(25.0, 25.0), &kernel);

    field.clear();
    let after_one: Vec<f32> = field.cells.clone();
    field.clear();

    assert!(after_one.iter().all(|&c| c == 0.0), "clear must zero every cell");
    assert_eq!(field.cells, after_one, "second clear must change nothing");
}

#[test]
fn test_single_splat_matches_kernel_exactly() {
    let kernel = SmoothingKernel::build(6);
    let mut field = DensityField::new(50, 50);
    field.splat(Vec2::new(25.0, 25.0), &kernel);

    for y in 0..50usize {
        for x in 0..50usize {
            let expected = if (19..=31).contains(&x) && (19..=31).contains(&y) {
                kernel.weight(x - 19, y - 19)
            } else {
                0.0
            };
            assert_eq!(
                field.get(x, y),
                expected,
                "splat mismatch at ({x},{y})"
            );
        }
    }
}

#[test]
fn test_disjoint_splats_are_a_union() {
    let kernel = SmoothingKernel::build(6);
    let mut field = DensityField::new(60, 60);
    field.splat(Vec2::new(15.0, 15.0), &kernel);
    field.splat(Vec2::new(42.0, 42.0), &kernel);

    let mut first = DensityField::new(60, 60);
    first.splat(Vec2::new(15.0, 15.0), &kernel);
    let mut second = DensityField::new(60, 60);
    second.splat(Vec2::new(42.0, 42.0), &kernel);

    for i in 0..field.cells.len() {
        assert_eq!(
            field.cells[i],
            first.cells[i] + second.cells[i],
            "disjoint splats must not interact (cell {i})"
        );
    }
}

#[test]
fn test_overlapping_splats_sum_elementwise() {
    let kernel = SmoothingKernel::build(6);
    let mut field = DensityField::new(50, 50);
    field.splat(Vec2::new(25.0, 25.0), &kernel);
    field.splat(Vec2::new(25.0, 25.0), &kernel);

    for ky in 0..kernel.size {
        for kx in 0..kernel.size {
            assert_eq!(
                field.get(19 + kx, 19 + ky),
                2.0 * kernel.weight(kx, ky),
                "overlapping splats must add elementwise"
            );
        }
    }
}

#[test]
fn test_splat_clips_at_field_edge() {
    let kernel = SmoothingKernel::build(6);
    let mut field = DensityField::new(50, 50);
    // Center sits on the corner; most of the window hangs off-field.
    field.splat(Vec2::new(0.0, 0.0), &kernel);

    assert_eq!(field.get(0, 0), kernel.weight(6, 6));
    assert_eq!(field.get(3, 2), kernel.weight(9, 8));
    assert!(field.cells.iter().all(|c| c.is_finite()));
}

#[test]
fn test_normalize_scales_to_unit_maximum() {
    let kernel = SmoothingKernel::build(6);
    let mut field = DensityField::new(50, 50);
    field.splat(Vec2::new(25.0, 25.0), &kernel);
    field.splat(Vec2::new(27.0, 25.0), &kernel);
    field.normalize();

    let max = field.cells.iter().cloned().fold(0.0f32, f32::max);
    assert!((max - 1.0).abs() < 1e-6, "normalized maximum should be 1, got {max}");
    assert!(field.cells.iter().all(|&c| c >= 0.0 && c <= 1.0 + 1e-6));
}

#[test]
fn test_normalize_on_empty_field_is_a_noop() {
    let mut field = DensityField::new(50, 50);
    field.normalize();
    assert!(
        field.cells.iter().all(|&c| c == 0.0),
        "normalizing an empty field must not produce NaN or nonzero cells"
    );
}

#[test]
fn test_flow_of_empty_field_is_zero() {
    let density = DensityField::new(40, 40);
    let mut flow = FlowField::new(40, 40);
    flow.rebuild(&density);

    assert!(flow.flow_x.iter().all(|&v| v == 0.0));
    assert!(flow.flow_y.iter().all(|&v| v == 0.0));
}

#[test]
fn test_flow_points_away_from_a_dense_peak() {
    let kernel = SmoothingKernel::build(6);
    let mut density = DensityField::new(50, 50);
    density.splat(Vec2::new(25.0, 25.0), &kernel);
    density.normalize();

    let mut flow = FlowField::new(50, 50);
    flow.rebuild(&density);

    let idx = |x: usize, y: usize| y * 50 + x;

    // Immediate neighbors of the peak flow outward along their axis.
    assert!(flow.flow_x[idx(24, 25)] < 0.0, "left neighbor should flow left");
    assert_eq!(flow.flow_y[idx(24, 25)], 0.0);

    assert!(flow.flow_x[idx(26, 25)] > 0.0, "right neighbor should flow right");
    assert_eq!(flow.flow_y[idx(26, 25)], 0.0);

    assert!(flow.flow_y[idx(25, 24)] < 0.0, "upper neighbor should flow up");
    assert_eq!(flow.flow_x[idx(25, 24)], 0.0);

    assert!(flow.flow_y[idx(25, 26)] > 0.0, "lower neighbor should flow down");
    assert_eq!(flow.flow_x[idx(25, 26)], 0.0);
}

#[test]
fn test_rebuild_is_a_pure_function_of_density() {
    let kernel = SmoothingKernel::build(6);
    let mut density = DensityField::new(50, 50);
    density.splat(Vec2::new(20.0, 20.0), &kernel);
    density.splat(Vec2::new(30.0, 28.0), &kernel);
    density.normalize();

    let mut flow = FlowField::new(50, 50);
    flow.rebuild(&density);
    let first_x = flow.flow_x.clone();
    let first_y = flow.flow_y.clone();

    flow.rebuild(&density);
    assert_eq!(flow.flow_x, first_x, "rebuild must be deterministic in x");
    assert_eq!(flow.flow_y, first_y, "rebuild must be deterministic in y");
}

#[test]
fn test_pointer_pushes_outward_and_sign_flips() {
    let kernel = PointerKernel::build(10, 4.0);
    let mut outward = FlowField::new(60, 60);
    outward.apply_pointer(&kernel, Vec2::new(30.0, 30.0), 1.0);

    let idx = |x: usize, y: usize| y * 60 + x;
    assert!(outward.flow_x[idx(35, 30)] > 0.0, "right flank should push right");
    assert!(outward.flow_x[idx(25, 30)] < 0.0, "left flank should push left");
    assert!(outward.flow_y[idx(30, 35)] > 0.0, "lower flank should push down");
    assert!(outward.flow_y[idx(30, 25)] < 0.0, "upper flank should push up");

    let mut inward = FlowField::new(60, 60);
    inward.apply_pointer(&kernel, Vec2::new(30.0, 30.0), -1.0);
    for i in 0..outward.flow_x.len() {
        assert_eq!(inward.flow_x[i], -outward.flow_x[i]);
        assert_eq!(inward.flow_y[i], -outward.flow_y[i]);
    }
}

#[test]
fn test_pointer_vertical_bias() {
    let kernel = PointerKernel::build(10, 4.0);
    let mut flow = FlowField::new(60, 60);
    flow.apply_pointer(&kernel, Vec2::new(30.0, 30.0), 1.0);

    let idx = |x: usize, y: usize| y * 60 + x;
    // Same distance from the center, but the vertical offset carries the
    // stirring bias.
    let horizontal = flow.flow_x[idx(35, 30)].abs();
    let vertical = flow.flow_y[idx(30, 35)].abs();
    assert!(
        vertical > horizontal,
        "vertical push ({vertical}) should exceed horizontal push ({horizontal})"
    );
}

#[test]
fn test_sample_reads_back_weighted_flow() {
    let sample_kernel = SmoothingKernel::build(4);
    let mut flow = FlowField::new(40, 40);
    for v in flow.flow_x.iter_mut() {
        *v = 2.0;
    }

    let sampled = flow.sample(Vec2::new(20.0, 20.0), &sample_kernel);
    let weight_sum: f32 = sample_kernel.weights.iter().sum();
    assert!((sampled.x - 2.0 * weight_sum).abs() < 1e-3);
    assert!(sampled.y.abs() < 1e-6);
}
