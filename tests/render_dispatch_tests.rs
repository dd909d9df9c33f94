use chartjs_adapter::api::{ChartAdapter, ChartRequest, ChartType};
use chartjs_adapter::core::{ChartData, Point, Series};
use chartjs_adapter::error::ChartError;
use chartjs_adapter::render::NullRenderer;

fn request() -> ChartRequest {
    ChartRequest::new(ChartData::Series(vec![Series::new(
        "Units",
        vec![Point::new("A", 1.0), Point::new("B", 2.0)],
    )]))
}

#[test]
fn rerender_disposes_exactly_the_previous_instance() {
    let mut adapter = ChartAdapter::new(NullRenderer::default());

    let first = *adapter.render_column_chart(&request()).expect("first render");
    assert!(adapter.renderer().destroyed.is_empty());

    let second = *adapter.render_bar_chart(&request()).expect("second render");
    assert_ne!(first, second);
    assert_eq!(adapter.renderer().destroyed, vec![first]);
    assert_eq!(adapter.renderer().live_handles(), &[second]);
    assert_eq!(adapter.renderer().reset_count, 2);
    assert_eq!(adapter.current_chart(), Some(&second));

    let third = *adapter.render_pie_chart(&request()).expect("third render");
    assert_eq!(adapter.renderer().destroyed, vec![first, second]);
    assert_eq!(adapter.renderer().live_handles(), &[third]);
}

#[test]
fn failed_construction_leaves_no_live_chart() {
    let mut adapter = ChartAdapter::new(NullRenderer::default());
    let first = *adapter.render_line_chart(&request()).expect("first render");

    adapter.renderer_mut().fail_next_construct("canvas lost");
    let err = adapter
        .render_area_chart(&request())
        .expect_err("construction should fail");
    assert!(matches!(err, ChartError::Render(ref reason) if reason == "canvas lost"));

    assert!(!adapter.has_live_chart());
    assert_eq!(adapter.renderer().destroyed, vec![first]);
    assert!(adapter.renderer().live_handles().is_empty());

    adapter.render_scatter_chart(&request()).expect("recovers on next render");
    assert_eq!(adapter.renderer().live_handles().len(), 1);
}

#[test]
fn invalid_surface_width_fails_before_disposal() {
    let mut adapter = ChartAdapter::new(NullRenderer::default());
    let first = *adapter.render_column_chart(&request()).expect("first render");

    adapter.renderer_mut().set_surface_width_px(f64::INFINITY);
    let err = adapter
        .render(ChartType::Column, &request())
        .expect_err("width must be finite");
    assert!(matches!(err, ChartError::InvalidSurface { .. }));
    assert_eq!(adapter.current_chart(), Some(&first));
    assert!(adapter.renderer().destroyed.is_empty());
}

#[test]
fn every_render_entry_point_constructs_one_chart() {
    let mut adapter = ChartAdapter::new(NullRenderer::new(320.0));
    adapter.render_line_chart(&request()).expect("line");
    adapter.render_area_chart(&request()).expect("area");
    adapter.render_pie_chart(&request()).expect("pie");
    adapter.render_column_chart(&request()).expect("column");
    adapter.render_bar_chart(&request()).expect("bar");
    adapter.render_scatter_chart(&request()).expect("scatter");
    adapter.render_bubble_chart(&request()).expect("bubble");

    let renderer = adapter.into_renderer();
    let kinds: Vec<_> = renderer
        .constructed
        .iter()
        .map(|(_, config)| config.kind.as_str())
        .collect();
    assert_eq!(
        kinds,
        ["line", "line", "pie", "bar", "horizontalBar", "scatter", "bubble"]
    );
    assert_eq!(renderer.destroyed.len(), 6);
    assert_eq!(renderer.live_handles().len(), 1);
}
