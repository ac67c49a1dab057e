use faceboxes::{
    scores_from_two_class, Anchor, Detection, FaceBoxesError, ImageSize, Offset, ResizePolicy,
    Variance, FACE_LABEL,
};

#[test]
fn anchors_and_offsets_build_from_rows() {
    assert_eq!(
        Anchor::from([0.1, 0.2, 0.3, 0.4]),
        Anchor::new(0.1, 0.2, 0.3, 0.4)
    );
    assert_eq!(
        Offset::from([1.0, -1.0, 0.5, -0.5]),
        Offset::new(1.0, -1.0, 0.5, -0.5)
    );
}

#[test]
fn default_variance_matches_faceboxes_head() {
    let v = Variance::default();
    assert_eq!(v.center, 0.1);
    assert_eq!(v.size, 0.2);
}

#[test]
fn detection_label_is_face() {
    let det = Detection {
        score: 0.9,
        x: 1,
        y: 2,
        width: 3,
        height: 4,
    };
    assert_eq!(det.label(), "face");
    assert_eq!(FACE_LABEL, "face");
}

#[test]
fn resize_policy_matches_shorter_side_rule() {
    let policy = ResizePolicy::default();
    assert_eq!(policy.scale_for(600, 601), 1.0);
    assert!((policy.scale_for(601, 1000) - 600.0 / 601.0).abs() < 1e-6);
    assert!((policy.scale_for(2400, 1200) - 0.5).abs() < 1e-6);
    assert_eq!(policy.resized_size(2400, 1200), ImageSize::new(600, 1200));
}

#[test]
fn two_class_rows_select_face_column() {
    let conf = [0.7, 0.3, 0.05, 0.95];
    assert_eq!(scores_from_two_class(&conf).unwrap(), vec![0.3, 0.95]);
    assert!(scores_from_two_class(&[]).unwrap().is_empty());
}

#[test]
fn errors_render_readable_messages() {
    let err = FaceBoxesError::LengthMismatch {
        anchors: 3,
        offsets: 2,
        scores: 3,
    };
    assert_eq!(
        err.to_string(),
        "length mismatch: 3 anchors, 2 offsets, 3 scores"
    );

    let err = FaceBoxesError::NonFiniteInput {
        field: "scores",
        index: 7,
    };
    assert_eq!(err.to_string(), "non-finite value in scores at index 7");

    let err = FaceBoxesError::RaggedBuffer {
        field: "offsets",
        len: 10,
        stride: 4,
    };
    assert_eq!(
        err.to_string(),
        "offsets buffer length 10 is not a multiple of 4"
    );

    let err = FaceBoxesError::PairMismatch {
        left: "boxes",
        left_len: 3,
        right: "scores",
        right_len: 2,
    };
    assert_eq!(err.to_string(), "length mismatch: 3 boxes, 2 scores");
}
