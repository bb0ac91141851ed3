use super::ChartSpec;
use serde_json::{Value, json};

const SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

impl ChartSpec {
    /// Vega-Lite bar chart: x = date (temporal), y = count (quantitative),
    /// tooltip with both fields.
    pub fn to_vega_lite(&self) -> Value {
        let values: Vec<Value> = self
            .bars
            .iter()
            .map(|b| {
                json!({
                    "date": b.date.format("%Y-%m-%d").to_string(),
                    "count": b.count,
                })
            })
            .collect();

        let width = if self.responsive {
            json!("container")
        } else {
            json!(self.width)
        };

        json!({
            "$schema": SCHEMA,
            "title": self.title,
            "width": width,
            "height": self.height,
            "data": { "values": values },
            "mark": "bar",
            "encoding": {
                "x": {
                    "field": "date",
                    "type": "temporal",
                    "timeUnit": "yearmonthdate",
                    "title": self.x_title,
                },
                "y": {
                    "field": "count",
                    "type": "quantitative",
                    "title": self.y_title,
                },
                "tooltip": [
                    { "field": "date", "type": "temporal", "timeUnit": "yearmonthdate", "title": self.x_title },
                    { "field": "count", "type": "quantitative", "title": self.y_title },
                ],
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DailyCount;
    use chrono::NaiveDate;

    fn spec(responsive: bool) -> ChartSpec {
        ChartSpec {
            title: "Task Completion Bar Chart".into(),
            x_title: "Date".into(),
            y_title: "Number of Completed Tasks".into(),
            width: 700,
            height: 400,
            responsive,
            bars: vec![
                DailyCount::new(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(), 2),
                DailyCount::new(NaiveDate::from_ymd_opt(2025, 2, 2).unwrap(), 1),
            ],
        }
    }

    #[test]
    fn encodes_axes_and_data() {
        let v = spec(false).to_vega_lite();
        assert_eq!(v["mark"], "bar");
        assert_eq!(v["width"], 700);
        assert_eq!(v["height"], 400);
        assert_eq!(v["encoding"]["x"]["type"], "temporal");
        assert_eq!(v["encoding"]["x"]["title"], "Date");
        assert_eq!(v["encoding"]["y"]["type"], "quantitative");
        assert_eq!(v["encoding"]["y"]["title"], "Number of Completed Tasks");
        assert_eq!(v["encoding"]["tooltip"].as_array().unwrap().len(), 2);
        assert_eq!(v["data"]["values"][0]["date"], "2025-02-01");
        assert_eq!(v["data"]["values"][0]["count"], 2);
        assert_eq!(v["data"]["values"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn responsive_chart_fills_container() {
        let v = spec(true).to_vega_lite();
        assert_eq!(v["width"], "container");
        assert_eq!(v["height"], 400);
    }
}
