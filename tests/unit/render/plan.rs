use super::*;

fn camera() -> CameraState {
    CameraState {
        target: Vec3::ZERO,
        azimuth: 0.0,
        elevation: 0.0,
        distance: 3.0,
        center_x: 32.0,
        center_y: 32.0,
    }
}

fn canvas() -> Canvas {
    Canvas {
        width: 64,
        height: 64,
    }
}

/// Camera sits at z = 3 looking down -z, so camera depth is `3 - z`.
fn layered(frames: u32) -> AnimationData {
    let mut verts = Vec::new();
    for _ in 0..frames {
        verts.extend([
            // face 0 at z = -2 (depth 5)
            Vec3::new(0.0, 0.0, -2.0),
            Vec3::new(1.0, 0.0, -2.0),
            Vec3::new(0.0, 1.0, -2.0),
            // face 1 at z = 1 (depth 2)
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
        ]);
    }
    AnimationData::new(
        frames,
        6,
        30.0,
        "#ff0000",
        verts,
        vec![[0, 1, 2], [3, 4, 5], [0, 2, 1]],
    )
    .unwrap()
}

#[test]
fn faces_are_drawn_farthest_first() {
    let data = layered(1);
    let plan = compile_frame(
        Some(&data),
        FrameIndex(0),
        &camera(),
        &RenderStyle::default(),
        canvas(),
    );
    // depths {5, 2, 5}: both far faces before the near one, ties in index order
    assert_eq!(plan.face_order(), vec![0, 2, 1]);

    let depths: Vec<f32> = plan
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Triangle { depth, .. } => Some(*depth),
            _ => None,
        })
        .collect();
    assert!((depths[0] - 5.0).abs() < 1e-5);
    assert!((depths[2] - 2.0).abs() < 1e-5);
}

#[test]
fn sort_handles_given_depths() {
    let mut faces = vec![
        FaceDepth { face: 0, depth: 5.0 },
        FaceDepth { face: 1, depth: 2.0 },
        FaceDepth { face: 2, depth: 5.0 },
    ];
    sort_far_to_near(&mut faces);
    let order: Vec<u32> = faces.iter().map(|f| f.face).collect();
    assert_eq!(order, vec![0, 2, 1]);
}

#[test]
fn plan_has_background_then_grid_then_faces() {
    let data = layered(1);
    let plan = compile_frame(
        Some(&data),
        FrameIndex(0),
        &camera(),
        &RenderStyle::default(),
        canvas(),
    );
    assert!(matches!(plan.ops[0], DrawOp::Clear { .. }));
    let lines = plan
        .ops
        .iter()
        .filter(|op| matches!(op, DrawOp::Line { .. }))
        .count();
    assert_eq!(lines, 10);
    assert!(plan.ops[1..11].iter().all(|op| matches!(op, DrawOp::Line { .. })));
    assert_eq!(plan.ops.len(), 1 + 10 + 3);
}

#[test]
fn triangles_use_mesh_color_with_alpha() {
    let data = layered(1);
    let plan = compile_frame(
        Some(&data),
        FrameIndex(0),
        &camera(),
        &RenderStyle::default(),
        canvas(),
    );
    let Some(DrawOp::Triangle { color, .. }) = plan.ops.last() else {
        panic!("expected a triangle last");
    };
    assert_eq!(*color, Rgba8 { r: 255, g: 0, b: 0, a: 128 });
}

#[test]
fn missing_data_draws_only_placeholder() {
    let plan = compile_frame(
        None,
        FrameIndex(0),
        &camera(),
        &RenderStyle::default(),
        canvas(),
    );
    assert_eq!(plan.ops.len(), 2);
    assert!(matches!(plan.ops[0], DrawOp::Clear { .. }));
    match &plan.ops[1] {
        DrawOp::Status { lines, anchor, .. } => {
            assert_eq!(lines[0], "Waiting for SMPL data...");
            assert_eq!(*anchor, Point::new(32.0, 32.0));
        }
        other => panic!("expected status, got {other:?}"),
    }
}

#[test]
fn out_of_range_frame_is_a_no_op() {
    let data = layered(2);
    let plan = compile_frame(
        Some(&data),
        FrameIndex(2),
        &camera(),
        &RenderStyle::default(),
        canvas(),
    );
    assert!(plan.is_empty());
}

#[test]
fn face_free_animation_still_draws_grid() {
    let data = AnimationData::new(1, 1, 30.0, "#fff", vec![Vec3::ZERO], vec![]).unwrap();
    let plan = compile_frame(
        Some(&data),
        FrameIndex(0),
        &camera(),
        &RenderStyle::default(),
        canvas(),
    );
    assert_eq!(plan.ops.len(), 11);
    assert!(plan.face_order().is_empty());
}
