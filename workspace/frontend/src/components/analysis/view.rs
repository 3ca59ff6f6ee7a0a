use common::{LocationOption, PriorityKey};
use session::Slot;
use yew::prelude::*;

use super::analysis_card::AnalysisCard;
use crate::common::error::ErrorBanner;
use crate::components::location_search::LocationSearch;
use crate::components::priorities::PrioritySliders;
use crate::components::status::StatusBadge;
use crate::hooks::use_analysis;

#[function_component(AnalysisView)]
pub fn analysis_view() -> Html {
    let analysis = use_analysis();

    let on_current = {
        let analysis = analysis.clone();
        Callback::from(move |location: Option<LocationOption>| {
            analysis.set_location(Slot::Current, location)
        })
    };
    let on_target = {
        let analysis = analysis.clone();
        Callback::from(move |location: Option<LocationOption>| {
            analysis.set_location(Slot::Target, location)
        })
    };
    let on_priority = {
        let analysis = analysis.clone();
        Callback::from(move |(key, value): (PriorityKey, u8)| analysis.set_priority(key, value))
    };
    let on_analyze = {
        let analysis = analysis.clone();
        Callback::from(move |_: MouseEvent| {
            log::debug!("User requested analysis");
            analysis.analyze();
        })
    };
    let on_retry = {
        let analysis = analysis.clone();
        Callback::from(move |_: ()| analysis.analyze())
    };

    let state = analysis.state();
    let current_location = state.current_location().cloned();
    let target_location = state.target_location().cloned();
    let priorities = *state.priorities();
    let connectivity = state.connectivity();
    let loading = state.loading();
    let error = state.error().map(str::to_string);
    let show_comparison = state.show_comparison();
    let current_state = state.state(Slot::Current).clone();
    let target_state = state.state(Slot::Target).clone();
    drop(state);

    let can_analyze = current_location.is_some() && !loading;

    html! {
        <div class="space-y-6">
            <div class="flex justify-between items-center">
                <p class="text-sm text-gray-500">
                    {"Compare the climate outlook of where you live with where you might move."}
                </p>
                <StatusBadge {connectivity} />
            </div>

            <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                <div class="card bg-base-100 shadow lg:col-span-2">
                    <div class="card-body">
                        <LocationSearch
                            label="Current Location"
                            placeholder="Where do you live now?"
                            value={current_location}
                            on_change={on_current}
                        />
                        <LocationSearch
                            label="Target Location (optional)"
                            placeholder="Where are you thinking of moving?"
                            value={target_location}
                            on_change={on_target}
                        />
                        <div class="card-actions justify-end mt-4">
                            <button
                                class="btn btn-primary"
                                disabled={!can_analyze}
                                onclick={on_analyze}
                            >
                                if loading {
                                    <span class="loading loading-spinner loading-sm"></span>
                                    {" Analyzing..."}
                                } else {
                                    <i class="fas fa-search-location"></i>
                                    {" Analyze Climate"}
                                }
                            </button>
                        </div>
                    </div>
                </div>
                <PrioritySliders {priorities} on_change={on_priority} />
            </div>

            if let Some(message) = error {
                <ErrorBanner {message} on_retry={Some(on_retry)} />
            }

            if show_comparison {
                <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                    <AnalysisCard slot={Slot::Current} state={current_state} />
                    <AnalysisCard slot={Slot::Target} state={target_state} />
                </div>
            }
        </div>
    }
}
