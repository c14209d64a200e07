//! Integration tests for SVG toolpath sampling

use penplot_core::PenState;
use penplot_designer::{sample_many, sample_svg, SamplerConfig, SvgDocument};

fn svg(body: &str) -> String {
    format!(r#"<svg xmlns="http://www.w3.org/2000/svg" width="210mm" height="297mm">{body}</svg>"#)
}

fn frame_count(body: &str) -> usize {
    sample_svg(&svg(body), &SamplerConfig::default()).frames.len()
}

#[test]
fn test_frame_counts_follow_arc_length() {
    // floor(L / 5) + 1 samples per shape
    assert_eq!(frame_count(r#"<rect x="10" y="10" width="30" height="20"/>"#), 21);
    assert_eq!(frame_count(r#"<circle cx="50" cy="50" r="10"/>"#), 13);
    assert_eq!(frame_count(r#"<ellipse cx="50" cy="50" rx="20" ry="10"/>"#), 20);
    assert_eq!(frame_count(r#"<polyline points="0,0 10,0 10,10"/>"#), 5);
    assert_eq!(frame_count(r#"<polygon points="0,0 10,0 10,10"/>"#), 7);
    assert_eq!(frame_count(r#"<path d="M0 0 H 30"/>"#), 7);
}

#[test]
fn test_large_curve_frame_counts_follow_arc_length() {
    // 2πr = 3141.59, 6283.19, 12566.37
    assert_eq!(frame_count(r#"<circle cx="600" cy="600" r="500"/>"#), 629);
    assert_eq!(frame_count(r#"<circle cx="1200" cy="1200" r="1000"/>"#), 1257);
    assert_eq!(frame_count(r#"<circle cx="2400" cy="2400" r="2000"/>"#), 2514);
    // Perimeter 4844.22
    assert_eq!(
        frame_count(r#"<ellipse cx="1200" cy="600" rx="1000" ry="500"/>"#),
        969
    );
    // 4 * 200 straight + 2π * 400 of corners = 3313.27
    assert_eq!(
        frame_count(r#"<rect width="1000" height="1000" rx="400"/>"#),
        663
    );
}

#[test]
fn test_large_circle_samples_lie_on_the_arc() {
    let (cx, cy, r) = (1200.0_f64, 1200.0_f64, 1000.0_f64);
    let out = sample_svg(
        &svg(r#"<circle cx="1200" cy="1200" r="1000"/>"#),
        &SamplerConfig::default(),
    );

    for (i, frame) in out.frames.iter().enumerate() {
        let radial = (frame.x - cx).hypot(frame.y - cy);
        assert!((radial - r).abs() < 0.01, "frame {i} is {radial} from centre");

        let angle = i as f64 * 5.0 / r;
        let (ex, ey) = (cx + r * angle.cos(), cy + r * angle.sin());
        let drift = (frame.x - ex).hypot(frame.y - ey);
        assert!(drift < 0.05, "frame {i} is {drift} from its arc position");
    }

    // 1256 chords of a 5 unit arc
    assert_eq!(out.summary.unwrap().distance_mm, 6280);
}

#[test]
fn test_rect_first_frame_is_pen_up_at_corner() {
    let out = sample_svg(
        &svg(r#"<rect x="10" y="15" width="30" height="20"/>"#),
        &SamplerConfig::default(),
    );
    let first = out.frames[0];
    assert_eq!(first.pen, PenState::Up);
    assert!((first.x - 10.0).abs() < 1e-4);
    assert!((first.y - 15.0).abs() < 1e-4);
    // Clockwise: second sample lies along the top edge
    assert!((out.frames[1].x - 15.0).abs() < 1e-4);
    assert!((out.frames[1].y - 15.0).abs() < 1e-4);
}

#[test]
fn test_circle_starts_right_of_centre_and_turns_clockwise() {
    let out = sample_svg(&svg(r#"<circle cx="50" cy="50" r="10"/>"#), &SamplerConfig::default());
    let first = out.frames[0];
    assert!((first.x - 60.0).abs() < 1e-3);
    assert!((first.y - 50.0).abs() < 1e-3);
    // y-down clockwise moves towards +y first
    assert!(out.frames[1].y > 50.0);
}

#[test]
fn test_document_order_and_summary() {
    let out = sample_svg(
        &svg(
            r#"<g>
                <line x1="0" y1="0" x2="20" y2="0"/>
                <line x1="100" y1="0" x2="100" y2="40"/>
            </g>
            <line x1="0" y1="0" x2="3" y2="0"/>"#,
        ),
        &SamplerConfig::default(),
    );
    assert_eq!(out.frames.len(), 5 + 9);

    let pen_ups: Vec<_> = out
        .frames
        .iter()
        .filter(|f| f.pen == PenState::Up)
        .collect();
    assert_eq!(pen_ups.len(), 2);
    assert!((pen_ups[1].x - 100.0).abs() < 1e-4);

    let summary = out.summary.unwrap();
    assert_eq!(summary.distance_mm, 60);
    assert_eq!(summary.estimated_time_s, 3);
    assert_eq!(summary.pen_lifts, 1);
}

#[test]
fn test_degenerate_only_document() {
    let out = sample_svg(
        &svg(
            r#"<circle cx="5" cy="5" r="0"/>
            <line x1="1" y1="1" x2="1" y2="1"/>
            <path d=""/>
            <rect width="0" height="10"/>
            <text x="0" y="0">not geometry</text>"#,
        ),
        &SamplerConfig::default(),
    );
    assert!(out.frames.is_empty());
    assert!(out.summary.is_none());
}

#[test]
fn test_malformed_element_does_not_abort() {
    let out = sample_svg(
        &svg(r#"<line x2="oops"/><line x1="0" y1="0" x2="10" y2="0"/>"#),
        &SamplerConfig::default(),
    );
    assert_eq!(out.frames.len(), 3);
}

#[test]
fn test_sampling_is_idempotent() {
    let text = svg(r#"<path d="M10 10 C 20 0, 40 0, 50 10 S 80 20, 90 10 Z"/><circle cx="5" cy="5" r="4"/>"#);
    let config = SamplerConfig::default();
    assert_eq!(sample_svg(&text, &config), sample_svg(&text, &config));
}

#[test]
fn test_sample_many_preserves_order() {
    let texts = vec![
        svg(r#"<line x2="20"/>"#),
        "not xml".to_string(),
        svg(r#"<line x2="40"/>"#),
    ];
    let results = sample_many(&texts, &SamplerConfig::default());
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].frames.len(), 5);
    assert!(results[1].is_empty());
    assert_eq!(results[2].frames.len(), 9);
}

#[test]
fn test_document_size_from_width_height() {
    let doc = SvgDocument::parse(&svg("")).unwrap();
    let size = doc.size().unwrap();
    assert_eq!(size.width, 210.0);
    assert_eq!(size.height, 297.0);
}
