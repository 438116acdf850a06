//! Dropdown selector for the minimization stage ("Iteração").

use super::CAPTION_STYLE;
use crate::state::AppState;
use dioxus::prelude::*;
use smna_data::dashboard::SelectionEvent;
use smna_gsi::observation::IterationStage;

/// Stages grouped into OMF (background) and OMA (analysis) option groups.
#[component]
pub fn IterationSelector() -> Element {
    let mut state = use_context::<AppState>();
    let current = state.selection().map(|s| s.iteration_stage);
    let (oma, omf): (Vec<IterationStage>, Vec<IterationStage>) = IterationStage::ALL
        .into_iter()
        .partition(|stage| stage.is_analysis());

    let on_change = move |evt: Event<FormData>| match evt.value().parse::<IterationStage>() {
        Ok(stage) => state.dispatch(SelectionEvent::SetIterationStage(stage)),
        Err(e) => state.render_error.set(Some(e.to_string())),
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "iteration-select",
                style: "{CAPTION_STYLE}",
                "Iteração"
            }
            select {
                id: "iteration-select",
                onchange: on_change,
                for (group, stages) in [("OMF", omf), ("OMA", oma)] {
                    optgroup {
                        label: "{group}",
                        for stage in stages {
                            option {
                                value: "{stage.label()}",
                                selected: current == Some(stage),
                                "{stage.label()}"
                            }
                        }
                    }
                }
            }
        }
    }
}
