use edgealign::{
    CanvasConfig, GeometrySet, GridConfig, ImageView, MatchConfig, Matcher, OwnedImage, Shape,
    Transform,
};

const W: usize = 320;
const H: usize = 180;

fn square() -> GeometrySet {
    GeometrySet::new(vec![Shape::polygon([
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 10.0),
        (0.0, 10.0),
    ])])
}

fn scenario_config(threshold: f64) -> MatchConfig {
    MatchConfig {
        canvas: CanvasConfig {
            width: W,
            height: H,
            shrink_x: 0.25,
            shrink_y: 0.25,
        },
        grid: GridConfig {
            offset_step_px: 50,
            ..GridConfig::default()
        },
        template_threshold: threshold,
        parallel: false,
    }
}

/// Edge frame holding the outline of the axis-aligned box `[x0, x1] × [y0, y1]`.
fn box_outline(x0: usize, y0: usize, x1: usize, y1: usize, sides: [bool; 4]) -> OwnedImage {
    let mut img = OwnedImage::zeros(W, H).unwrap();
    let [top, bottom, left, right] = sides;
    for x in x0..=x1 {
        if top {
            img.put(x, y0, 255);
        }
        if bottom {
            img.put(x, y1, 255);
        }
    }
    for y in y0..=y1 {
        if left {
            img.put(x0, y, 255);
        }
        if right {
            img.put(x1, y, 255);
        }
    }
    img
}

#[test]
fn square_offset_by_fifty_pixels_is_found() {
    let matcher = Matcher::new(&square(), scenario_config(0.60)).unwrap();

    // The fitted square spans x 120..200 and y 67.5..112.5; moved by (50, 50)
    // and truncated it lands on x 170..=250, y 117..=162.
    let frame = box_outline(170, 117, 250, 162, [true; 4]);
    let result = matcher.match_frame(frame.view()).unwrap();

    assert_eq!(result.transform, Transform::new(1, 1, 0.0));
    assert_eq!(result.grid_index, 5 * 36);
    assert_eq!(result.location, (0, 0));
    assert_eq!(result.score, 1.0);
    assert!(result.accepted);
}

#[test]
fn equal_scores_keep_the_earliest_candidate() {
    let matcher = Matcher::new(&square(), scenario_config(0.60)).unwrap();
    let frame = box_outline(170, 117, 250, 162, [true; 4]);

    // A half turn maps the box onto itself, so (1, 1, 180) ties with (1, 1, 0).
    let top = matcher.match_frame_topk(frame.view(), 2).unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].transform, Transform::new(1, 1, 0.0));
    assert_eq!(top[1].transform, Transform::new(1, 1, 180.0));
    assert_eq!(top[0].score, 1.0);
    assert_eq!(top[1].score, 1.0);

    let result = matcher.match_frame(frame.view()).unwrap();
    assert_eq!(result.grid_index, top[0].grid_index);
}

#[test]
fn blank_frame_selects_first_transform() {
    let matcher = Matcher::new(&square(), MatchConfig::default()).unwrap();
    let frame = vec![0u8; W * H];
    let result = matcher
        .match_frame(ImageView::from_slice(&frame, W, H).unwrap())
        .unwrap();
    assert_eq!(result.grid_index, 0);
    assert_eq!(result.transform, Transform::IDENTITY);
    assert_eq!(result.score, 0.0);
    assert_eq!(result.location, (0, 0));
    assert!(!result.accepted);
}

#[test]
fn threshold_is_an_inclusive_bound() {
    // Only two sides of the box are present, so the best score is well below 1.
    let frame = box_outline(170, 117, 250, 162, [true, false, true, false]);
    let partial = Matcher::new(&square(), scenario_config(0.0))
        .unwrap()
        .match_frame(frame.view())
        .unwrap();
    assert!(partial.score > 0.0 && partial.score < 0.99);

    let at = Matcher::new(&square(), scenario_config(partial.score))
        .unwrap()
        .match_frame(frame.view())
        .unwrap();
    assert_eq!(at.score, partial.score);
    assert!(at.accepted);

    let above = Matcher::new(&square(), scenario_config(partial.score + 1e-6))
        .unwrap()
        .match_frame(frame.view())
        .unwrap();
    assert!(!above.accepted);
}

#[test]
fn repeated_runs_are_identical() {
    let matcher = Matcher::new(&square(), MatchConfig::default()).unwrap();
    let mut frame = OwnedImage::zeros(W, H).unwrap();
    for i in 0..W * H {
        if i.wrapping_mul(2_654_435_761) % 97 < 4 {
            frame.put(i % W, i / W, 255);
        }
    }
    let first = matcher.match_frame(frame.view()).unwrap();
    for _ in 0..3 {
        assert_eq!(matcher.match_frame(frame.view()).unwrap(), first);
    }
}

#[test]
fn smaller_canvas_slides_over_frame() {
    let cfg = MatchConfig {
        canvas: CanvasConfig {
            width: 40,
            height: 30,
            shrink_x: 0.5,
            shrink_y: 0.5,
        },
        ..MatchConfig::default()
    };
    let matcher = Matcher::new(&square(), cfg).unwrap();
    let mask = matcher.render_mask(Transform::IDENTITY).unwrap();

    let (fw, fh) = (100, 80);
    let (px, py) = (23, 17);
    let mut frame = OwnedImage::zeros(fw, fh).unwrap();
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if let Some(v) = mask.get(x, y) {
                frame.put(px + x, py + y, v);
            }
        }
    }

    let result = matcher.match_frame(frame.view()).unwrap();
    assert_eq!(result.grid_index, 0);
    assert_eq!(result.location, (px, py));
    assert_eq!(result.score, 1.0);
    assert!(result.accepted);

    // Shifted candidates whose clipped outline also fits exactly tie at 1.0
    // and rank after the identity.
    let top = matcher.match_frame_topk(frame.view(), 2).unwrap();
    assert_eq!(top[0].grid_index, 0);
    assert_eq!(top[0].score, 1.0);
    assert_eq!(top[1].score, 1.0);
    assert!(top[1].grid_index > top[0].grid_index);
}

#[test]
fn rendered_best_mask_matches_frame() {
    let matcher = Matcher::new(&square(), scenario_config(0.60)).unwrap();
    let frame = box_outline(170, 117, 250, 162, [true; 4]);
    let result = matcher.match_frame(frame.view()).unwrap();
    let mask = matcher.render_mask(result.transform).unwrap();
    assert_eq!(mask, frame);
}
