use chartjs_adapter::api::{
    CHART_CONFIG_JSON_SCHEMA_V1, ChartRequest, ChartRequestJsonContractV1, ChartType, build_chart,
};
use chartjs_adapter::core::{ChartData, Point, Series};
use serde_json::{Value, json};

fn request() -> ChartRequest {
    ChartRequest::new(ChartData::Series(vec![Series::new(
        "Units",
        vec![Point::new("A", 1.0), Point::new("B", 2.0)],
    )]))
}

#[test]
fn config_contract_wraps_type_data_and_options() {
    let config = build_chart(ChartType::Column, &request(), 800.0).expect("column chart");
    let raw = config.to_json_contract_v1_pretty().expect("contract json");
    let payload: Value = serde_json::from_str(&raw).expect("valid json");

    assert_eq!(payload["schema_version"], json!(CHART_CONFIG_JSON_SCHEMA_V1));
    assert_eq!(payload["config"]["type"], json!("bar"));
    assert_eq!(payload["config"]["data"]["labels"], json!(["A", "B"]));
    assert_eq!(
        payload["config"]["options"],
        config.to_json_value().expect("plain json")["options"]
    );
}

#[test]
fn plain_json_has_exactly_three_top_level_keys() {
    let config = build_chart(ChartType::Bar, &request(), 800.0).expect("bar chart");
    let raw = config.to_json_pretty().expect("json");
    let value: Value = serde_json::from_str(&raw).expect("valid json");
    let keys: Vec<_> = value
        .as_object()
        .map(|object| object.keys().cloned().collect())
        .unwrap_or_default();
    assert_eq!(keys.len(), 3);
    for key in ["type", "data", "options"] {
        assert!(value.get(key).is_some(), "missing `{key}`");
    }
}

#[test]
fn request_envelope_round_trips_chart_type() {
    let envelope = ChartRequestJsonContractV1::new(ChartType::Bubble, request());
    let raw = serde_json::to_string(&envelope).expect("serialize");
    let parsed = ChartRequestJsonContractV1::from_json_str(&raw).expect("parse");

    assert_eq!(parsed.chart_type, ChartType::Bubble);
    assert_eq!(parsed.request.data, envelope.request.data);
}
