mod common;

use astrocarto::astrocartography::{compute_chart_lines, AngleKind, Convention, Line};
use astrocarto::bodies::Body;
use astrocarto::ephemeris::PositionProvider;
use astrocarto::line_params::LineParams;
use astrocarto::zodiac::{ChartSummary, ZodiacSign};

use common::{assert_line_continuous, init_logger, paris_birth};

#[test]
fn full_chart_in_both_conventions() {
    init_logger();
    let provider = PositionProvider::default();
    let birth = paris_birth();
    let params = LineParams::default();

    for convention in [Convention::Mundo, Convention::Zodio] {
        let lines = compute_chart_lines(&provider, &Body::ALL, convention, &birth, &params);

        // every body reaches at least its two meridians
        for body in Body::ALL {
            let angles: Vec<AngleKind> = lines
                .iter()
                .filter(|l| l.body == body)
                .map(|l| l.angle)
                .collect();
            assert!(angles.contains(&AngleKind::MC), "{body} MC ({convention})");
            assert!(angles.contains(&AngleKind::IC), "{body} IC ({convention})");
        }

        for line in &lines {
            assert_eq!(line.convention, convention);
            assert!(line.points.len() >= params.min_points, "{}", line.label());
            assert_line_continuous(&line.points, 180.0);
            assert!(line.points.iter().all(|p| p.lat.abs() <= 89.0));
        }
    }
}

#[test]
fn chart_lines_keep_body_then_angle_order() {
    let provider = PositionProvider::default();
    let bodies = [Body::Venus, Body::Sun];
    let lines = compute_chart_lines(
        &provider,
        &bodies,
        Convention::Zodio,
        &paris_birth(),
        &LineParams::default(),
    );
    let labels: Vec<String> = lines.iter().map(Line::label).collect();
    assert_eq!(
        labels,
        vec![
            "Venus AC", "Venus DC", "Venus MC", "Venus IC", "Sun AC", "Sun DC", "Sun MC",
            "Sun IC"
        ]
    );
}

#[test]
fn lines_serialize_for_the_map_layer() {
    let provider = PositionProvider::default();
    let lines = compute_chart_lines(
        &provider,
        &[Body::Moon],
        Convention::Mundo,
        &paris_birth(),
        &LineParams::default(),
    );
    let json = serde_json::to_string(&lines).unwrap();
    assert!(json.contains("\"body\":\"Moon\""));
    assert!(json.contains("\"angle\":\"MC\""));

    let back: Vec<Line> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, lines);
}

#[test]
fn chart_summary_for_a_june_birth() {
    let provider = PositionProvider::default();
    let summary = ChartSummary::compute(&provider, &paris_birth());
    // 15 June: the Sun is in Gemini, about 24°
    assert_eq!(summary.sun, ZodiacSign::Gemini);
    assert!((summary.sun_longitude - 84.0).abs() < 1.0);
    assert_eq!(ZodiacSign::from_calendar(6, 15), Some(ZodiacSign::Gemini));
    assert_eq!(
        summary.rising,
        ZodiacSign::from_ecliptic_longitude(summary.ascendant)
    );
}
