use vizij_driven_key_core::{evaluate, DrivenKeyError, Keyframe};

fn approx_vec(a: &[f32], b: &[f32], eps: f32) {
    assert_eq!(a.len(), b.len(), "left={a:?} right={b:?}");
    for (x, y) in a.iter().zip(b.iter()) {
        assert!((x - y).abs() <= eps, "left={a:?} right={b:?} eps={eps}");
    }
}

fn four_channel() -> Vec<Keyframe> {
    vec![
        Keyframe::new(10.0, vec![10.0, 20.0, 30.0, 40.0]),
        Keyframe::new(0.0, vec![0.0, 0.0, 0.0, 0.0]),
    ]
}

/// it should lerp each channel independently at the midpoint
#[test]
fn interpolation_is_exact_at_midpoint() {
    let mut keys = four_channel();
    let out = evaluate(5.0, &mut keys, 4).unwrap();
    assert_eq!(out, vec![5.0, 10.0, 15.0, 20.0]);
}

#[test]
fn interpolation_inside_inner_segment() {
    let mut keys = vec![
        Keyframe::new(0.0, vec![0.0, 1.0]),
        Keyframe::new(4.0, vec![8.0, 1.0]),
        Keyframe::new(6.0, vec![0.0, -1.0]),
    ];
    let out = evaluate(5.0, &mut keys, 2).unwrap();
    approx_vec(&out, &[4.0, 0.0], 1e-6);
    let out = evaluate(1.0, &mut keys, 2).unwrap();
    approx_vec(&out, &[2.0, 1.0], 1e-6);
}

/// it should leave keyframes sorted ascending after evaluation
#[test]
fn evaluate_sorts_in_place() {
    let mut keys = vec![
        Keyframe::new(3.0, vec![3.0]),
        Keyframe::new(-2.0, vec![-2.0]),
        Keyframe::new(8.0, vec![8.0]),
        Keyframe::new(0.5, vec![0.5]),
    ];
    evaluate(0.0, &mut keys, 1).unwrap();
    let order: Vec<f32> = keys.iter().map(|k| k.driver_value).collect();
    assert_eq!(order, vec![-2.0, 0.5, 3.0, 8.0]);
}

/// it should clamp flat to the first/last keyframe outside the authored range
#[test]
fn clamps_outside_range() {
    let mut keys = vec![
        Keyframe::new(-1.0, vec![7.0, -3.0]),
        Keyframe::new(1.0, vec![9.0, 3.0]),
        Keyframe::new(2.0, vec![11.0, 4.5]),
    ];
    assert_eq!(evaluate(-100.0, &mut keys, 2).unwrap(), vec![7.0, -3.0]);
    assert_eq!(evaluate(-1.0001, &mut keys, 2).unwrap(), vec![7.0, -3.0]);
    assert_eq!(evaluate(2.5, &mut keys, 2).unwrap(), vec![11.0, 4.5]);
    assert_eq!(evaluate(f32::INFINITY, &mut keys, 2).unwrap(), vec![11.0, 4.5]);
}

#[test]
fn endpoints_return_keyframe_values() {
    let mut keys = four_channel();
    assert_eq!(evaluate(0.0, &mut keys, 4).unwrap(), vec![0.0; 4]);
    assert_eq!(
        evaluate(10.0, &mut keys, 4).unwrap(),
        vec![10.0, 20.0, 30.0, 40.0]
    );
}

/// it should not divide by zero on duplicate driver values and pick the earlier key
#[test]
fn duplicate_driver_values_pick_first_in_authored_order() {
    let mut keys = vec![Keyframe::new(5.0, vec![1.0]), Keyframe::new(5.0, vec![9.0])];
    let out = evaluate(5.0, &mut keys, 1).unwrap();
    assert_eq!(out, vec![1.0]);
    // repeated evaluation is deterministic
    assert_eq!(evaluate(5.0, &mut keys, 1).unwrap(), vec![1.0]);

    let mut swapped = vec![Keyframe::new(5.0, vec![9.0]), Keyframe::new(5.0, vec![1.0])];
    assert_eq!(evaluate(5.0, &mut swapped, 1).unwrap(), vec![9.0]);
}

#[test]
fn duplicate_inside_curve_uses_left_segment() {
    let mut keys = vec![
        Keyframe::new(0.0, vec![0.0]),
        Keyframe::new(5.0, vec![1.0]),
        Keyframe::new(5.0, vec![9.0]),
        Keyframe::new(10.0, vec![10.0]),
    ];
    assert_eq!(evaluate(5.0, &mut keys, 1).unwrap(), vec![1.0]);
    approx_vec(&evaluate(7.5, &mut keys, 1).unwrap(), &[9.5], 1e-6);
}

#[test]
fn needs_two_keyframes() {
    let mut none: Vec<Keyframe> = Vec::new();
    assert_eq!(
        evaluate(0.0, &mut none, 1),
        Err(DrivenKeyError::InsufficientKeyframes { count: 0 })
    );
    let mut one = vec![Keyframe::new(0.0, vec![1.0])];
    assert_eq!(
        evaluate(0.0, &mut one, 1),
        Err(DrivenKeyError::InsufficientKeyframes { count: 1 })
    );
}

/// it should report short keyframes instead of indexing past the end
#[test]
fn short_keyframe_is_guarded() {
    let mut keys = vec![
        Keyframe::new(0.0, vec![0.0, 0.0]),
        Keyframe::new(1.0, vec![1.0]),
    ];
    let err = evaluate(0.5, &mut keys, 2).unwrap_err();
    assert_eq!(
        err,
        DrivenKeyError::ChannelOutOfRange {
            keyframe: 1,
            channel: 1,
            len: 1
        }
    );
    // the first channel alone is fine
    assert_eq!(evaluate(0.5, &mut keys, 1).unwrap(), vec![0.5]);
}

#[test]
fn zero_width_yields_empty_output() {
    let mut keys = four_channel();
    assert!(evaluate(3.0, &mut keys, 0).unwrap().is_empty());
}

#[test]
fn nan_values_propagate() {
    let mut keys = vec![
        Keyframe::new(0.0, vec![0.0]),
        Keyframe::new(1.0, vec![f32::NAN]),
    ];
    assert!(evaluate(0.5, &mut keys, 1).unwrap()[0].is_nan());

    // a NaN driver brackets nothing and falls through to the last keyframe
    let mut keys = four_channel();
    assert_eq!(
        evaluate(f32::NAN, &mut keys, 4).unwrap(),
        vec![10.0, 20.0, 30.0, 40.0]
    );
}
