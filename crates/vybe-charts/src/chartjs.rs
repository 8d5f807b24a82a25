//! Chart.js configuration builder
//!
//! Translates a [`ChartSpec`] into the JSON document Chart.js-based
//! renderers accept.

use serde_json::{Value, json};
use vybe_core::{ChartKind, ChartSpec};

const BAR_COLOR: &str = "rgba(70, 130, 180, 0.85)";
const LINE_COLOR: &str = "rgb(30, 90, 200)";
const FILL_COLOR: &str = "rgba(135, 206, 235, 0.5)";

/// X-axis tick rotation in degrees
const LABEL_ROTATION: u32 = 45;

pub fn config(spec: &ChartSpec) -> Value {
    let labels: Vec<&str> = spec.labels().collect();
    let values: Vec<f64> = spec.values().collect();

    let (chart_type, dataset) = match spec.kind {
        ChartKind::Bar => (
            "bar",
            json!({
                "label": spec.y_label,
                "data": values,
                "backgroundColor": BAR_COLOR,
            }),
        ),
        ChartKind::Line { fill } => (
            "line",
            json!({
                "label": spec.y_label,
                "data": values,
                "borderColor": LINE_COLOR,
                "backgroundColor": if fill { FILL_COLOR } else { LINE_COLOR },
                "fill": fill,
                "pointRadius": if fill { 0 } else { 3 },
            }),
        ),
    };

    json!({
        "type": chart_type,
        "data": {
            "labels": labels,
            "datasets": [dataset],
        },
        "options": {
            "plugins": {
                "title": { "display": true, "text": spec.title },
                "legend": { "display": false },
            },
            "scales": {
                "x": {
                    "title": { "display": true, "text": spec.x_label },
                    "ticks": { "maxRotation": LABEL_ROTATION, "minRotation": LABEL_ROTATION },
                },
                "y": {
                    "title": { "display": true, "text": spec.y_label },
                    "beginAtZero": matches!(spec.kind, ChartKind::Bar),
                },
            },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_config() {
        let spec = ChartSpec::bar("Active Users Over 7d | Orca", "Time", "Active Users")
            .with_points(vec![("2025-01-01".into(), 10.0), ("2025-01-02".into(), 12.0)]);
        let cfg = config(&spec);

        assert_eq!(cfg["type"], "bar");
        assert_eq!(cfg["data"]["labels"], json!(["2025-01-01", "2025-01-02"]));
        assert_eq!(cfg["data"]["datasets"][0]["data"], json!([10.0, 12.0]));
        assert_eq!(cfg["options"]["plugins"]["title"]["text"], "Active Users Over 7d | Orca");
        assert_eq!(cfg["options"]["scales"]["x"]["title"]["text"], "Time");
        assert_eq!(cfg["options"]["scales"]["y"]["beginAtZero"], true);
    }

    #[test]
    fn test_filled_line_config() {
        let spec = ChartSpec::line("Transfer Volume", "Date", "Volume", true)
            .with_points(vec![("a".into(), 1.5)]);
        let cfg = config(&spec);

        assert_eq!(cfg["type"], "line");
        assert_eq!(cfg["data"]["datasets"][0]["fill"], true);
        assert_eq!(cfg["data"]["datasets"][0]["backgroundColor"], FILL_COLOR);
        assert_eq!(cfg["options"]["scales"]["y"]["title"]["text"], "Volume");
    }
}
