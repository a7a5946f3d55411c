use vizij_driven_key_core::{
    inspect, ChannelConfig, Config, Curve, Diagnostic, Keyframe, PropertyType, Severity,
};

fn rotation_channels(width: usize) -> ChannelConfig {
    ChannelConfig::new(PropertyType::RotationY, vec![PropertyType::PositionX; width])
}

#[test]
fn clean_curve_has_no_diagnostics() {
    let curve = Curve::new(vec![
        Keyframe::new(-90.0, vec![0.0]),
        Keyframe::new(90.0, vec![1.0]),
    ]);
    assert!(inspect(&rotation_channels(1), &curve, &Config::default()).is_empty());
}

/// it should flag rotation keys beyond the safe range but not positional ones
#[test]
fn out_of_safe_range_only_for_rotation_drivers() {
    let curve = Curve::new(vec![
        Keyframe::new(0.0, vec![0.0]),
        Keyframe::new(120.0, vec![1.0]),
        Keyframe::new(-90.5, vec![1.0]),
    ]);
    let diags = inspect(&rotation_channels(1), &curve, &Config::default());
    assert_eq!(
        diags,
        vec![
            Diagnostic::DriverOutOfSafeRange {
                keyframe: 1,
                value: 120.0,
                limit: 90.0
            },
            Diagnostic::DriverOutOfSafeRange {
                keyframe: 2,
                value: -90.5,
                limit: 90.0
            },
        ]
    );
    assert!(diags.iter().all(|d| d.severity() == Severity::Warning));

    let positional = ChannelConfig::new(PropertyType::PositionX, vec![PropertyType::PositionX]);
    assert!(inspect(&positional, &curve, &Config::default()).is_empty());

    let relaxed = Config {
        safe_driver_range_deg: 180.0,
        ..Config::default()
    };
    assert!(inspect(&rotation_channels(1), &curve, &relaxed).is_empty());
}

#[test]
fn width_mismatch_is_repairable() {
    let mut curve = Curve::new(vec![
        Keyframe::new(0.0, vec![0.0, 0.0, 0.0, 0.0]),
        Keyframe::new(1.0, vec![1.0]),
    ]);
    let channels = ChannelConfig::new(
        PropertyType::PositionX,
        vec![PropertyType::PositionX, PropertyType::PositionY],
    );
    let diags = inspect(&channels, &curve, &Config::default());
    assert_eq!(diags.len(), 2);
    assert!(diags.iter().all(Diagnostic::is_repairable));
    assert_eq!(
        diags[0].to_string(),
        "keyframe 0 has 4 driven value(s), expected 2"
    );

    curve.repair_channel_widths(channels.width());
    assert!(inspect(&channels, &curve, &Config::default()).is_empty());
}

#[test]
fn insufficient_keyframes_and_channel_cap() {
    let curve = Curve::new(vec![Keyframe::new(0.0, vec![0.0; 5])]);
    let channels = ChannelConfig::new(PropertyType::PositionX, vec![PropertyType::PositionX; 5]);
    let diags = inspect(&channels, &curve, &Config::legacy());
    assert_eq!(
        diags,
        vec![
            Diagnostic::InsufficientKeyframes { count: 1 },
            Diagnostic::TooManyChannels { count: 5, max: 4 },
        ]
    );
    assert!(!diags.iter().any(Diagnostic::is_repairable));
}

/// it should report duplicates using authored indices
#[test]
fn duplicate_driver_values_are_informational() {
    let curve = Curve::new(vec![
        Keyframe::new(5.0, vec![9.0]),
        Keyframe::new(0.0, vec![0.0]),
        Keyframe::new(5.0, vec![1.0]),
    ]);
    let channels = ChannelConfig::new(PropertyType::PositionX, vec![PropertyType::PositionX]);
    let diags = inspect(&channels, &curve, &Config::default());
    assert_eq!(
        diags,
        vec![Diagnostic::DuplicateDriverValue {
            first: 0,
            second: 2,
            value: 5.0
        }]
    );
    assert_eq!(diags[0].severity(), Severity::Info);
    assert!(diags[0].to_string().contains("keyframe 0 wins"));
}

#[test]
fn diagnostics_serialize_with_kind_tag() {
    let d = Diagnostic::InsufficientKeyframes { count: 0 };
    let json = serde_json::to_value(&d).unwrap();
    assert_eq!(json["kind"], "insufficientKeyframes");
    assert_eq!(json["count"], 0);
}
