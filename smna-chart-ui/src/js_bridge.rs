//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The D3.js chart functions live in `assets/js/*.js` and are loaded at runtime.
//! They are evaluated as globals (no ES modules) and exposed via `window.*`.
//! This module serializes [`ChartSpec`]s and calls those globals.

use smna_data::overlay::ChartSpec;
use wasm_bindgen::JsValue;

// Embed all D3 chart JS files at compile time
static TOOLTIP_JS: &str = include_str!("../assets/js/tooltip.js");
static OVERLAY_CHART_JS: &str = include_str!("../assets/js/overlay-chart.js");

/// D3 build loaded when the host page does not provide one.
const D3_URL: &str = "https://cdn.jsdelivr.net/npm/d3@7";

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('SMNA JS call failed:', e); }}",
        code
    );
    if let Err(e) = js_sys::eval(&wrapped) {
        warn(&e);
    }
}

fn warn(value: &JsValue) {
    web_sys::console::warn_2(&JsValue::from_str("SMNA eval failed:"), value);
}

/// Initialize chart scripts with a wait-for-D3 polling loop.
///
/// The chart JS files define functions like `renderOverlayChart(...)` via
/// `function` declarations. To make them globally accessible (not
/// block-scoped inside the setInterval callback) they are evaluated at
/// global scope via indirect `eval()` once D3 is ready, then promoted to
/// `window.*`. Calling this more than once is a no-op.
pub fn init_charts() {
    let all_js = [TOOLTIP_JS, OVERLAY_CHART_JS].join("\n");

    let store_js = format!(
        "if (!window.__smnaChartsReady && !window.__smnaChartScripts) {{ window.__smnaChartScripts = {}; }}",
        serde_json::to_string(&all_js).unwrap_or_default()
    );
    call_js(&store_js);

    let init_js = format!(
        r#"
        (function() {{
            if (window.__smnaChartsReady || window.__smnaChartsPolling) return;
            window.__smnaChartsPolling = true;
            if (typeof d3 === 'undefined' && !document.getElementById('smna-d3')) {{
                var script = document.createElement('script');
                script.id = 'smna-d3';
                script.src = '{D3_URL}';
                document.head.appendChild(script);
            }}
            var waitForD3 = setInterval(function() {{
                if (typeof d3 !== 'undefined') {{
                    clearInterval(waitForD3);
                    (0, eval)(window.__smnaChartScripts);
                    delete window.__smnaChartScripts;
                    if (typeof renderOverlayChart !== 'undefined') window.renderOverlayChart = renderOverlayChart;
                    if (typeof initTooltip !== 'undefined') window.initTooltip = initTooltip;
                    if (typeof showTooltip !== 'undefined') window.showTooltip = showTooltip;
                    if (typeof hideTooltip !== 'undefined') window.hideTooltip = hideTooltip;
                    window.__smnaChartsReady = true;
                    console.log('SMNA charts initialized');
                }}
            }}, 100);
        }})();
        "#,
    );
    call_js(&init_js);
}

/// Escape a JSON document so it can sit inside a single-quoted JS string.
fn escape_for_js(json: &str) -> String {
    json.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "")
}

/// Render one overlay chart (one line per experiment) into `container_id`.
///
/// Uses a polling loop to wait for D3.js to load, chart scripts to initialize,
/// and the container DOM element to exist before rendering.
pub fn render_overlay_chart(container_id: &str, chart: &ChartSpec) {
    let chart_json = match serde_json::to_string(chart) {
        Ok(json) => json,
        Err(e) => {
            log::error!("[SMNA Debug] cannot serialize chart {}: {}", chart.title, e);
            return;
        }
    };
    log::info!(
        "[SMNA Debug] renderOverlayChart({}): {} series",
        container_id,
        chart.series.len()
    );
    let escaped = escape_for_js(&chart_json);
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__smnaChartsReady &&
                    typeof window.renderOverlayChart !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.renderOverlayChart('{container_id}', '{escaped}');
                    }} catch(e) {{ console.error('[SMNA] renderOverlayChart error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}
