use gloo::console;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew::TargetCast;

use crate::api;
use crate::config::ControllerConfig;
use crate::debounce::{BrowserScheduler, Debouncer};
use crate::form::{FormAction, FormState, Insufficient, ResultView};
use crate::outcome::Letter;
use crate::render::{self, cashback_label};

fn input_value(e: &InputEvent) -> String {
    let target: HtmlInputElement = e.target_unchecked_into();
    target.value()
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| ControllerConfig::from_document());
    let form = use_reducer(FormState::default);
    let debouncer = {
        let delay = config.debounce_ms;
        use_mut_ref(move || Debouncer::new(BrowserScheduler, delay))
    };

    // Recompute whenever the sequence moves; the closure sees the state of
    // the render that bumped it.
    {
        let form = form.clone();
        let endpoint = config.endpoint.clone();
        use_effect_with(form.recompute_seq(), move |_| {
            let dispatcher = form.dispatcher();
            match form.prepare_request() {
                Ok(request) => {
                    console::log!(format!(
                        "calculando: {} vias, driver {:?}",
                        request.count.get(),
                        request.driver
                    ));
                    spawn_local(async move {
                        match api::calculate(&endpoint, &request).await {
                            Ok(result) => dispatcher.dispatch(FormAction::Calculated(result)),
                            Err(e) => {
                                console::error!(format!("erro no cálculo: {e}"));
                                dispatcher.dispatch(FormAction::Failed);
                            }
                        }
                    });
                }
                Err(reason) => {
                    if let Insufficient::MissingOdd(letter) = reason {
                        console::debug!(format!("aguardando odd {letter}"));
                    }
                    dispatcher.dispatch(FormAction::Guidance);
                }
            }
            || ()
        });
    }

    // Stake edits share one timer.
    let schedule_recompute = {
        let debouncer = debouncer.clone();
        let dispatcher = form.dispatcher();
        Callback::from(move |_: ()| {
            let dispatcher = dispatcher.clone();
            debouncer
                .borrow_mut()
                .call(move || dispatcher.dispatch(FormAction::Recompute));
        })
    };

    let on_add = {
        let form = form.clone();
        Callback::from(move |_| form.dispatch(FormAction::Increase))
    };
    let on_remove = {
        let form = form.clone();
        Callback::from(move |_| form.dispatch(FormAction::Decrease))
    };
    let on_base_stake = {
        let form = form.clone();
        let schedule = schedule_recompute.clone();
        Callback::from(move |e: InputEvent| {
            form.dispatch(FormAction::EditBaseStake(input_value(&e)));
            schedule.emit(());
        })
    };
    let on_reset = {
        let form = form.clone();
        let debouncer = debouncer.clone();
        Callback::from(move |_| {
            debouncer.borrow_mut().cancel();
            form.dispatch(FormAction::ResetToAutomatic);
        })
    };

    let count = form.count();
    let pinned = form.pin().letter();
    let result = match form.result() {
        ResultView::Ready(res) => Some(res.clone()),
        _ => None,
    };

    let slot_fields = form.letters().iter().map(|&letter| {
        let slot = form.slot(letter).cloned().unwrap_or_default();
        let on_odd = {
            let form = form.clone();
            Callback::from(move |e: InputEvent| form.dispatch(FormAction::EditOdd(letter, input_value(&e))))
        };
        let on_cb = {
            let form = form.clone();
            Callback::from(move |e: InputEvent| form.dispatch(FormAction::EditCashback(letter, input_value(&e))))
        };
        html! {
            <div class="card" key={format!("{}-{}", form.generation(), letter)}>
                <h2><span>{format!("📊 Via {letter}")}</span></h2>
                <div class="input-group">
                    <label>{format!("Odd {letter}")}</label>
                    <input type="number" step="0.01" placeholder="Ex: 2.50"
                        value={slot.odd} oninput={on_odd}
                        aria-label={format!("Odd {letter}")} />
                </div>
                <div class="input-group">
                    <label>{format!("Cashback {letter} (%)")}</label>
                    <input type="number" step="0.01" placeholder="Ex: 10"
                        value={slot.cashback} oninput={on_cb}
                        aria-label={format!("Cashback {letter}")} />
                </div>
            </div>
        }
    });

    let stake_cards = form.letters().iter().map(|&letter| {
        let on_stake = {
            let form = form.clone();
            let schedule = schedule_recompute.clone();
            Callback::from(move |e: InputEvent| {
                form.dispatch(FormAction::EditStake(letter, input_value(&e)));
                schedule.emit(());
            })
        };
        let driver = pinned == Some(letter);
        let cashback = result.as_ref().and_then(|r| r.cashback(letter));
        html! {
            <div class="metric-item" key={letter.to_string()}>
                <div class="metric-label">{format!("Via {letter}")}</div>
                <input type="number" step="0.01"
                    class={classes!("stake", if driver { "stake-driver" } else { "stake-derived" })}
                    value={form.stake_input(letter).unwrap_or_default().to_string()}
                    oninput={on_stake}
                    aria-label={format!("Stake {letter}")} />
                <div class="hint">{"Cashback: "}{cashback_label(cashback)}</div>
            </div>
        }
    });

    html! {
        <div class="container">
            <header>
                <h1>{"Calculadora de Surebet"}</h1>
                <div class="pill">{format!("{} vias ativas", count.get())}</div>
            </header>

            <div class="row">
                <button onclick={on_add} disabled={!count.can_increase()}
                    class={if count.can_increase() { "success" } else { "secondary" }}>
                    { if count.can_increase() { "➕ Adicionar Via" } else { "➕ Máximo atingido" } }
                </button>
                <button onclick={on_remove} disabled={!count.can_decrease()}
                    class={if count.can_decrease() { "danger" } else { "secondary" }}>
                    { if count.can_decrease() { "➖ Remover Via" } else { "➖ Mínimo atingido" } }
                </button>
            </div>

            <div class="grid">
                { for slot_fields }
            </div>

            <div class="card">
                <div class="input-group">
                    <label>{format!("Stake {} (base)", Letter::BASE)}</label>
                    <input type="number" step="0.01" placeholder="Ex: 1000"
                        value={form.base_stake().to_string()}
                        oninput={on_base_stake}
                        aria-label="Stake base" />
                </div>
            </div>

            <div class="card">
                <h2>
                    <span>{"Resultado"}</span>
                    { if pinned.is_some() {
                        html!{
                            <button class="secondary" onclick={on_reset}>
                                {"🔄 Resetar para Cálculo Automático"}
                            </button>
                        }
                    } else { html!{} }}
                </h2>
                <div class="metric-grid">
                    { for stake_cards }
                </div>
                <div class="section-divider"></div>
                { render::summary_html(form.result()) }
            </div>
        </div>
    }
}
