use yew::prelude::*;

use crate::api::CalculationResult;
use crate::form::ResultView;

pub const GUIDANCE: &str = "Preencha as odds de todas as vias e um stake para calcular.";
pub const FAILURE: &str = "Erro ao calcular. Tente novamente.";

pub fn money(v: f64) -> String {
    format!("R$ {v:.2}")
}

pub fn percent(v: f64) -> String {
    format!("{v:.2}%")
}

fn tone(v: f64) -> &'static str {
    if v >= 0.0 { "profit" } else { "loss" }
}

/// Display strings for the summary block.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryView {
    pub profit: String,
    pub profit_class: &'static str,
    pub roi: String,
    pub roi_class: &'static str,
    pub total_invested: String,
    pub message: Option<String>,
    pub guaranteed: bool,
    pub dynamic: bool,
}

impl SummaryView {
    pub fn from_result(res: &CalculationResult) -> Self {
        Self {
            profit: money(res.lucro),
            profit_class: tone(res.lucro),
            roi: percent(res.roi),
            roi_class: tone(res.roi),
            total_invested: money(res.total_invested),
            message: res.message.clone(),
            guaranteed: res.lucro > 0.0,
            dynamic: res.modo_dinamico,
        }
    }
}

/// Cashback amount of one outcome card.
pub fn cashback_label(value: Option<f64>) -> String {
    value.map(money).unwrap_or_else(|| "---".to_string())
}

pub fn summary_html(view: &ResultView) -> Html {
    match view {
        ResultView::Guidance => html! { <p class="muted center">{GUIDANCE}</p> },
        ResultView::Failed => html! { <p class="danger center">{FAILURE}</p> },
        ResultView::Ready(res) => {
            let s = SummaryView::from_result(res);
            html! {
                <div class="summary">
                    <h3>
                        <span class="muted">{"💰 Lucro líquido: "}</span>
                        <strong class={s.profit_class}>{s.profit}</strong>
                    </h3>
                    <h3>
                        <span class="muted">{"📈 ROI: "}</span>
                        <strong class={s.roi_class}>{s.roi}</strong>
                    </h3>
                    <div class="hint">{"Total investido: "}{s.total_invested}</div>
                    { if let Some(msg) = s.message {
                        html!{ <p class="warning">{msg}</p> }
                    } else { html!{} }}
                    { if s.guaranteed {
                        html!{ <p class="success">{"✅ Arbitragem com lucro garantido!"}</p> }
                    } else { html!{} }}
                    { if s.dynamic {
                        html!{ <p class="info">{"📝 Modo dinâmico ativo - stake fixado manualmente"}</p> }
                    } else { html!{} }}
                </div>
            }
        }
    }
}
