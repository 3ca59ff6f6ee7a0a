use common::format::{analysis_facts, score_bars};
use common::{ClimateAnalysis, RiskLevel};
use session::{Slot, SlotState};
use yew::prelude::*;

use super::metric_bar::MetricBar;
use crate::common::loading::Loading;

#[derive(Properties, PartialEq)]
pub struct AnalysisCardProps {
    pub slot: Slot,
    pub state: SlotState,
}

fn risk_badge(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "badge-success",
        RiskLevel::Moderate => "badge-warning",
        RiskLevel::High | RiskLevel::VeryHigh => "badge-error",
        RiskLevel::Unknown => "badge-ghost",
    }
}

#[function_component(AnalysisCard)]
pub fn analysis_card(props: &AnalysisCardProps) -> Html {
    let body = match &props.state {
        SlotState::Idle => html! {
            <p class="text-sm text-gray-500 py-8 text-center">
                {match props.slot {
                    Slot::Current => "Select your current location to see its climate profile.",
                    Slot::Target => "Select a target location to compare.",
                }}
            </p>
        },
        SlotState::Loading => html! { <Loading text={Some("Analyzing climate data...".to_string())} /> },
        SlotState::Failed(message) => html! {
            <div class="alert alert-error text-sm">
                <i class="fas fa-exclamation-circle"></i>
                <span>{message}</span>
            </div>
        },
        SlotState::Succeeded(analysis) => render_analysis(analysis),
    };

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h3 class="card-title text-base">{props.slot.label()}</h3>
                {body}
            </div>
        </div>
    }
}

fn render_analysis(analysis: &ClimateAnalysis) -> Html {
    let risk = &analysis.risk_assessment;
    let level = risk.level();

    html! {
        <>
            <div class="flex justify-between items-start">
                <h4 class="text-lg font-bold">{analysis.heading("Unknown location")}</h4>
                <span class={classes!("badge", risk_badge(level))}>{format!("{} Risk", level)}</span>
            </div>
            if let Some(description) = &risk.description {
                <p class="text-sm text-gray-600">{description}</p>
            }

            <div class="mt-4">
                { for score_bars(analysis).into_iter().map(|bar| html! { <MetricBar {bar} /> }) }
            </div>

            <div class="grid grid-cols-2 gap-2 mt-2">
                { for analysis_facts(analysis).into_iter().map(|(label, value)| html! {
                    <div class="stat p-2">
                        <div class="stat-title text-xs">{label}</div>
                        <div class="stat-value text-base">{value}</div>
                    </div>
                }) }
            </div>

            if !risk.key_concerns.is_empty() {
                <div class="mt-4">
                    <div class="text-sm font-semibold mb-1">{"Key Concerns"}</div>
                    <div class="flex flex-wrap gap-1">
                        { for risk.key_concerns.iter().map(|concern| html! {
                            <span class="badge badge-outline badge-sm">{concern}</span>
                        }) }
                    </div>
                </div>
            }

            if !analysis.recommendations.is_empty() {
                <div class="mt-4">
                    <div class="text-sm font-semibold mb-1">{"Recommendations"}</div>
                    <ul class="list-disc list-inside text-sm space-y-1">
                        { for analysis.recommendations.iter().map(|r| html! { <li>{r}</li> }) }
                    </ul>
                </div>
            }

            if let Some(updated) = analysis.last_updated_at() {
                <div class="text-xs text-gray-400 mt-4">
                    {format!("Updated {}", updated.format("%Y-%m-%d %H:%M"))}
                </div>
            }
        </>
    }
}
