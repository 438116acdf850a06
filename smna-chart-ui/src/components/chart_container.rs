//! Chart container component for one metric.

use dioxus::prelude::*;
use smna_gsi::observation::Metric;

/// DOM id D3 renders the chart of `metric` into.
pub fn chart_dom_id(metric: Metric) -> String {
    let slug = match metric {
        Metric::Nobs => "nobs",
        Metric::Jo => "jo",
        Metric::JoN => "jo-n",
    };
    format!("smna-chart-{}", slug)
}

/// Props for ChartContainer
#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// The metric drawn in this container
    pub metric: Metric,
    /// Whether no charts have been computed yet
    #[props(default = false)]
    pub loading: bool,
    /// Plot height in pixels, without axes and tick labels
    #[props(default = 250)]
    pub height: u32,
}

/// A container div for one D3.js overlay chart.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let id = chart_dom_id(props.metric);
    // Rotated date ticks and the title need room beyond the plot itself.
    let style = format!(
        "min-height: {}px; position: relative; width: 100%; margin-bottom: 16px;",
        props.height + 160
    );

    rsx! {
        div {
            style: "{style}",
            if props.loading {
                div {
                    style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); color: #666;",
                    "Loading {props.metric} chart..."
                }
            }
            div {
                id: "{id}",
                style: "width: 100%;",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_ids_are_distinct_and_selector_safe() {
        let ids: Vec<String> = Metric::ALL.iter().map(|m| chart_dom_id(*m)).collect();
        assert_eq!(ids, vec!["smna-chart-nobs", "smna-chart-jo", "smna-chart-jo-n"]);
        assert!(ids.iter().all(|id| !id.contains('/')));
    }
}
