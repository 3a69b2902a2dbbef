//! Dashboard Component
//!
//! Record counts per category and machine hours per operation for one
//! month, drawn as plain proportional bars.

use leptos::prelude::*;
use leptos::task::spawn_local;

use orcamento_core::domain::{CategoryCounts, OperationHours};

use super::budget_editor::format_hours;
use crate::context::use_app;

const MONTHS: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

fn current_month() -> u32 {
    js_sys::Date::new_0().get_month() + 1
}

#[component]
pub fn Dashboard() -> impl IntoView {
    let ctx = use_app();
    let counts = RwSignal::new(CategoryCounts::new());
    let hours = RwSignal::new(Vec::<OperationHours>::new());
    let month = RwSignal::new(current_month());

    Effect::new(move |_| {
        let api = ctx.api();
        spawn_local(async move {
            match api.dashboard_counts().await {
                Ok(loaded) => counts.set(loaded),
                Err(err) => ctx.report("Erro ao carregar contagens", &err),
            }
        });
    });

    Effect::new(move |_| {
        let selected = month.get();
        let api = ctx.api();
        spawn_local(async move {
            match api.operation_hours(selected).await {
                Ok(rows) => {
                    log::debug!("{} operations with hours in month {selected}", rows.len());
                    hours.set(rows);
                }
                Err(err) => {
                    hours.set(Vec::new());
                    ctx.report("Erro ao carregar horas", &err);
                }
            }
        });
    });

    view! {
        <section class="dashboard">
            <h1>"Dashboard"</h1>
            <div class="count-cards">
                {move || counts
                    .get()
                    .into_iter()
                    .map(|(category, count)| view! {
                        <div class="count-card">
                            <span class="count-value">{count}</span>
                            <span class="count-label">{category}</span>
                        </div>
                    })
                    .collect_view()}
            </div>

            <header class="page-header">
                <h2>"Horas por operação"</h2>
                <select
                    class="field-input"
                    on:change=move |ev| {
                        if let Ok(m) = event_target_value(&ev).parse::<u32>() {
                            month.set(m);
                        }
                    }
                >
                    {MONTHS
                        .iter()
                        .enumerate()
                        .map(|(i, name)| {
                            let value = i as u32 + 1;
                            view! {
                                <option value=value.to_string() selected=move || month.get() == value>
                                    {*name}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </header>

            <ul class="hour-bars">
                {move || {
                    let rows = hours.get();
                    if rows.is_empty() {
                        return view! { <li class="list-empty">"Sem horas registradas no mês"</li> }.into_any();
                    }
                    let max = OperationHours::max_hours(&rows);
                    rows.into_iter()
                        .map(|row| {
                            let width = format!("width: {:.1}%", row.share_of(max));
                            view! {
                                <li class="hour-bar">
                                    <span class="hour-bar-label">{row.operacao}</span>
                                    <span class="hour-bar-track">
                                        <span class="hour-bar-fill" style=width></span>
                                    </span>
                                    <span class="hour-bar-value">{format_hours(row.total_horas)}</span>
                                </li>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </ul>
        </section>
    }
}
