use edgealign::lowlevel::{scan_best, score_at, MaskPlan};
use edgealign::{correlate, AlignError, EdgeFrame, ImageView};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Straightforward mean-subtracted correlation in f64.
fn reference_score(
    frame: ImageView<'_, u8>,
    tpl: ImageView<'_, u8>,
    x: usize,
    y: usize,
) -> f64 {
    let n = (tpl.width() * tpl.height()) as f64;
    let mut mean_t = 0.0;
    let mut mean_i = 0.0;
    for ty in 0..tpl.height() {
        for tx in 0..tpl.width() {
            mean_t += *tpl.get(tx, ty).unwrap() as f64;
            mean_i += *frame.get(x + tx, y + ty).unwrap() as f64;
        }
    }
    mean_t /= n;
    mean_i /= n;

    let mut num = 0.0;
    let mut var_t = 0.0;
    let mut var_i = 0.0;
    for ty in 0..tpl.height() {
        for tx in 0..tpl.width() {
            let t = *tpl.get(tx, ty).unwrap() as f64 - mean_t;
            let i = *frame.get(x + tx, y + ty).unwrap() as f64 - mean_i;
            num += t * i;
            var_t += t * t;
            var_i += i * i;
        }
    }
    if var_t <= 1e-12 || var_i <= 1e-12 {
        return 0.0;
    }
    num / (var_t * var_i).sqrt()
}

fn random_image(rng: &mut StdRng, width: usize, height: usize) -> Vec<u8> {
    (0..width * height).map(|_| rng.random_range(0..=255)).collect()
}

fn random_binary(rng: &mut StdRng, width: usize, height: usize, p: f64) -> Vec<u8> {
    (0..width * height)
        .map(|_| if rng.random_bool(p) { 255 } else { 0 })
        .collect()
}

#[test]
fn scan_matches_bruteforce_on_random_images() {
    let mut rng = StdRng::seed_from_u64(123);
    let (fw, fh) = (23, 17);
    let (tw, th) = (7, 5);
    let frame_data = random_image(&mut rng, fw, fh);
    let tpl_data = random_binary(&mut rng, tw, th, 0.3);
    let frame_view = ImageView::from_slice(&frame_data, fw, fh).unwrap();
    let tpl_view = ImageView::from_slice(&tpl_data, tw, th).unwrap();

    let frame = EdgeFrame::new(frame_view);
    let plan = MaskPlan::from_view(tpl_view);

    let mut best = (0usize, 0usize, f64::NEG_INFINITY);
    for y in 0..=(fh - th) {
        for x in 0..=(fw - tw) {
            let expected = reference_score(frame_view, tpl_view, x, y);
            let got = score_at(&frame, &plan, x, y).unwrap();
            assert!((got - expected).abs() < 1e-9, "({x}, {y}): {got} vs {expected}");
            if expected > best.2 {
                best = (x, y, expected);
            }
        }
    }

    let found = scan_best(&frame, &plan).unwrap();
    assert_eq!((found.x, found.y), (best.0, best.1));
    assert!((found.score - best.2).abs() < 1e-9);
}

#[test]
fn exact_subregion_scores_one() {
    let mut rng = StdRng::seed_from_u64(99);
    let (fw, fh) = (40, 30);
    let frame_data = random_binary(&mut rng, fw, fh, 0.2);
    let (x0, y0, tw, th) = (11, 7, 13, 9);
    let mut tpl = Vec::with_capacity(tw * th);
    for y in 0..th {
        let start = (y0 + y) * fw + x0;
        tpl.extend_from_slice(&frame_data[start..start + tw]);
    }

    let frame_view = ImageView::from_slice(&frame_data, fw, fh).unwrap();
    let tpl_view = ImageView::from_slice(&tpl, tw, th).unwrap();
    let best = correlate(tpl_view, frame_view).unwrap();
    assert_eq!((best.x, best.y), (x0, y0));
    assert_eq!(best.score, 1.0);
}

#[test]
fn pasted_patches_score_exactly_one() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..25 {
        let (tw, th) = (rng.random_range(3..20), rng.random_range(3..16));
        let (fw, fh) = (tw + rng.random_range(0..30), th + rng.random_range(0..30));
        let tpl = random_binary(&mut rng, tw, th, 0.3);
        if tpl.iter().all(|&v| v == tpl[0]) {
            continue;
        }
        let (x0, y0) = (rng.random_range(0..=fw - tw), rng.random_range(0..=fh - th));
        let mut frame_data = vec![0u8; fw * fh];
        for y in 0..th {
            let start = (y0 + y) * fw + x0;
            frame_data[start..start + tw].copy_from_slice(&tpl[y * tw..(y + 1) * tw]);
        }

        let frame = EdgeFrame::new(ImageView::from_slice(&frame_data, fw, fh).unwrap());
        let plan = MaskPlan::from_view(ImageView::from_slice(&tpl, tw, th).unwrap());
        assert_eq!(score_at(&frame, &plan, x0, y0), Some(1.0));
        assert_eq!(scan_best(&frame, &plan).unwrap().score, 1.0);
    }
}

#[test]
fn scores_stay_within_unit_interval() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..20 {
        let frame_data = random_binary(&mut rng, 16, 12, 0.15);
        let tpl_data = random_binary(&mut rng, 6, 4, 0.4);
        let frame = EdgeFrame::new(ImageView::from_slice(&frame_data, 16, 12).unwrap());
        let plan = MaskPlan::from_view(ImageView::from_slice(&tpl_data, 6, 4).unwrap());
        for y in 0..=8 {
            for x in 0..=10 {
                let score = score_at(&frame, &plan, x, y).unwrap();
                assert!((-1.0..=1.0).contains(&score));
            }
        }
    }
}

#[test]
fn brightness_and_contrast_changes_do_not_move_scores() {
    let mut rng = StdRng::seed_from_u64(17);
    let (fw, fh) = (20, 14);
    let base: Vec<u8> = (0..fw * fh).map(|_| rng.random_range(0..=100)).collect();
    let stretched: Vec<u8> = base.iter().map(|&v| v * 2 + 30).collect();
    let tpl_data = random_binary(&mut rng, 5, 5, 0.5);

    let plan = MaskPlan::from_view(ImageView::from_slice(&tpl_data, 5, 5).unwrap());
    let a = EdgeFrame::new(ImageView::from_slice(&base, fw, fh).unwrap());
    let b = EdgeFrame::new(ImageView::from_slice(&stretched, fw, fh).unwrap());
    for y in 0..=(fh - 5) {
        for x in 0..=(fw - 5) {
            let sa = score_at(&a, &plan, x, y).unwrap();
            let sb = score_at(&b, &plan, x, y).unwrap();
            assert!((sa - sb).abs() < 1e-9);
        }
    }
}

#[test]
fn blank_mask_scores_zero() {
    let frame_data: Vec<u8> = (0u8..64).collect();
    let blank = [0u8; 16];
    let best = correlate(
        ImageView::from_slice(&blank, 4, 4).unwrap(),
        ImageView::from_slice(&frame_data, 8, 8).unwrap(),
    )
    .unwrap();
    assert_eq!(best.score, 0.0);
    assert_eq!((best.x, best.y), (0, 0));
}

#[test]
fn oversized_mask_is_size_mismatch() {
    let frame_data = [0u8; 12];
    let mask = [255u8; 15];
    let err = correlate(
        ImageView::from_slice(&mask, 5, 3).unwrap(),
        ImageView::from_slice(&frame_data, 4, 3).unwrap(),
    )
    .err()
    .unwrap();
    assert_eq!(
        err,
        AlignError::SizeMismatch {
            mask_width: 5,
            mask_height: 3,
            frame_width: 4,
            frame_height: 3,
        }
    );
}
