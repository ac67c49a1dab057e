use faceboxes::lowlevel::{filter_top_k, iou, nms_greedy, nms_indices};
use faceboxes::{BBox, ScoredBox};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_boxes(rng: &mut StdRng, n: usize) -> Vec<BBox> {
    (0..n)
        .map(|_| {
            let x = rng.random_range(0.0f32..300.0);
            let y = rng.random_range(0.0f32..300.0);
            let w = rng.random_range(5.0f32..80.0);
            let h = rng.random_range(5.0f32..80.0);
            BBox::new(x, y, x + w, y + h)
        })
        .collect()
}

fn random_scores(rng: &mut StdRng, n: usize) -> Vec<f32> {
    (0..n).map(|_| rng.random_range(0.0f32..1.0)).collect()
}

#[test]
fn kept_boxes_never_overlap_above_threshold() {
    let mut rng = StdRng::seed_from_u64(7);
    for &threshold in &[0.1f32, 0.3, 0.5, 0.7] {
        let boxes = random_boxes(&mut rng, 400);
        let scores = random_scores(&mut rng, 400);
        let candidates = filter_top_k(&boxes, &scores, 0.0, 5000).unwrap();
        let kept = nms_greedy(&candidates, threshold);

        assert!(!kept.is_empty());
        for (i, a) in kept.iter().enumerate() {
            for b in &kept[i + 1..] {
                assert!(iou(&a.bbox, &b.bbox) <= threshold);
            }
        }
    }
}

#[test]
fn nms_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(11);
    let boxes = random_boxes(&mut rng, 300);
    let scores = random_scores(&mut rng, 300);
    let candidates = filter_top_k(&boxes, &scores, 0.2, 5000).unwrap();

    let once = nms_greedy(&candidates, 0.3);
    let twice = nms_greedy(&once, 0.3);
    assert_eq!(once, twice);
}

#[test]
fn every_dropped_box_overlaps_a_better_kept_box() {
    let mut rng = StdRng::seed_from_u64(23);
    let boxes = random_boxes(&mut rng, 250);
    let scores = random_scores(&mut rng, 250);
    let candidates = filter_top_k(&boxes, &scores, 0.0, 5000).unwrap();
    let keep = nms_indices(&candidates, 0.3);

    for (idx, candidate) in candidates.iter().enumerate() {
        if keep.contains(&idx) {
            continue;
        }
        let suppressor = keep
            .iter()
            .take_while(|&&k| k < idx)
            .any(|&k| iou(&candidates[k].bbox, &candidate.bbox) > 0.3);
        assert!(suppressor, "box {idx} dropped without a suppressor");
    }
}

#[test]
fn raising_threshold_never_adds_candidates() {
    let mut rng = StdRng::seed_from_u64(5);
    let boxes = random_boxes(&mut rng, 500);
    let scores = random_scores(&mut rng, 500);

    let mut previous = usize::MAX;
    for step in 0..=20 {
        let threshold = step as f32 * 0.05;
        let count = filter_top_k(&boxes, &scores, threshold, 5000).unwrap().len();
        assert!(count <= previous);
        previous = count;
    }
}

#[test]
fn top_k_cap_keeps_highest_scores() {
    let mut rng = StdRng::seed_from_u64(3);
    let boxes = random_boxes(&mut rng, 200);
    let scores = random_scores(&mut rng, 200);
    let capped = filter_top_k(&boxes, &scores, 0.0, 50).unwrap();
    let full = filter_top_k(&boxes, &scores, 0.0, 5000).unwrap();

    assert_eq!(capped.len(), 50);
    assert_eq!(capped.as_slice(), &full[..50]);
}

#[test]
fn chain_of_overlaps_resolves_greedily() {
    // Each box overlaps its neighbours only; greedy keeps every other one.
    let chain: Vec<ScoredBox> = (0..6)
        .map(|i| {
            let x = i as f32 * 4.0;
            ScoredBox::new(BBox::new(x, 0.0, x + 9.0, 9.0), 0.9 - i as f32 * 0.1)
        })
        .collect();
    assert_eq!(nms_indices(&chain, 0.3), vec![0, 2, 4]);
}
