use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ChartError, ChartResult};

use super::{ChartConfig, ChartRequest, ChartType};

pub const CHART_CONFIG_JSON_SCHEMA_V1: u32 = 1;
pub const CHART_REQUEST_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct ChartConfigJsonContractV1<'a> {
    pub schema_version: u32,
    pub config: &'a ChartConfig,
}

/// Versioned request envelope: the request plus the chart type to build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartRequestJsonContractV1 {
    pub schema_version: u32,
    pub chart_type: ChartType,
    pub request: ChartRequest,
}

impl ChartConfig {
    /// Plain `{type, data, options}` JSON. Callbacks are not part of it.
    pub fn to_json_value(&self) -> ChartResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartConfigJsonContractV1 {
            schema_version: CHART_CONFIG_JSON_SCHEMA_V1,
            config: self,
        };
        Ok(serde_json::to_string_pretty(&payload)?)
    }
}

impl ChartRequestJsonContractV1 {
    #[must_use]
    pub fn new(chart_type: ChartType, request: ChartRequest) -> Self {
        Self {
            schema_version: CHART_REQUEST_JSON_SCHEMA_V1,
            chart_type,
            request,
        }
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let payload: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart request payload: {e}"))
        })?;
        if payload.schema_version != CHART_REQUEST_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported chart request schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload)
    }
}

impl ChartRequest {
    /// Accepts either a bare request or a v1 envelope; the envelope's chart
    /// type is returned alongside when present.
    pub fn from_json_compat_str(input: &str) -> ChartResult<(Self, Option<ChartType>)> {
        let value: Value = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart request json: {e}"))
        })?;
        if value.get("schema_version").is_some() {
            let payload = ChartRequestJsonContractV1::from_json_str(input)?;
            return Ok((payload.request, Some(payload.chart_type)));
        }
        let request = serde_json::from_value(value).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart request json: {e}"))
        })?;
        Ok((request, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ChartData;

    #[test]
    fn compat_parser_reads_bare_and_enveloped_requests() {
        let (bare, kind) = ChartRequest::from_json_compat_str(r#"{"discrete": true}"#)
            .expect("bare request");
        assert!(bare.discrete);
        assert_eq!(kind, None);

        let envelope = serde_json::to_string(&ChartRequestJsonContractV1::new(
            ChartType::Pie,
            ChartRequest::new(ChartData::default()),
        ))
        .expect("serialize");
        let (_, kind) = ChartRequest::from_json_compat_str(&envelope).expect("envelope");
        assert_eq!(kind, Some(ChartType::Pie));
    }

    #[test]
    fn unknown_schema_version_is_rejected() {
        let input = r#"{"schema_version": 9, "chart_type": "line", "request": {}}"#;
        assert!(matches!(
            ChartRequest::from_json_compat_str(input),
            Err(ChartError::InvalidData(_))
        ));
    }
}
