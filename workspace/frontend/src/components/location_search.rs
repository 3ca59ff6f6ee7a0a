use common::LocationOption;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::{use_click_outside, use_location_search};

#[derive(Properties, PartialEq)]
pub struct LocationSearchProps {
    pub label: String,
    pub placeholder: String,
    /// Controlled value owned by the parent
    pub value: Option<LocationOption>,
    pub on_change: Callback<Option<LocationOption>>,
}

#[function_component(LocationSearch)]
pub fn location_search(props: &LocationSearchProps) -> Html {
    let container_ref = use_node_ref();
    let search = use_location_search(props.value.clone(), props.on_change.clone());
    use_click_outside(container_ref.clone(), search.on_click_outside.clone());

    let oninput = {
        let on_input = search.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_input.emit(input.value());
        })
    };

    let onfocus = {
        let on_focus = search.on_focus.clone();
        Callback::from(move |_: FocusEvent| on_focus.emit(()))
    };

    let on_clear = {
        let on_clear = search.on_clear.clone();
        Callback::from(move |_: MouseEvent| {
            log::debug!("Location search cleared");
            on_clear.emit(());
        })
    };

    let show_clear = !search.query.is_empty() || search.has_selection;

    html! {
        <div class="form-control w-full relative" ref={container_ref}>
            <label class="label">
                <span class="label-text font-medium">{&props.label}</span>
            </label>
            <div class="relative">
                <input
                    type="text"
                    class={classes!("input", "input-bordered", "w-full", "pr-16", search.has_selection.then_some("input-success"))}
                    placeholder={props.placeholder.clone()}
                    value={search.query.clone()}
                    {oninput}
                    {onfocus}
                    autocomplete="off"
                />
                <div class="absolute inset-y-0 right-2 flex items-center gap-1">
                    if search.loading {
                        <span class="loading loading-spinner loading-xs"></span>
                    }
                    if show_clear {
                        <button type="button" class="btn btn-ghost btn-xs btn-circle" onclick={on_clear} aria-label="Clear">
                            <i class="fas fa-times"></i>
                        </button>
                    }
                </div>
            </div>
            if search.open && !search.suggestions.is_empty() {
                <ul class="menu bg-base-100 rounded-box shadow-lg absolute top-full left-0 right-0 z-50 mt-1 max-h-72 overflow-y-auto flex-nowrap">
                    { for search.suggestions.iter().map(|option| {
                        let on_select = search.on_select.clone();
                        let picked = option.clone();
                        let onmousedown = Callback::from(move |e: MouseEvent| {
                            e.prevent_default();
                            on_select.emit(picked.clone());
                        });
                        html! {
                            <li>
                                <a {onmousedown} class="flex flex-col items-start gap-0">
                                    <span class="font-medium">{option.label()}</span>
                                    if let Some(population) = option.population {
                                        <span class="text-xs text-gray-500">
                                            {format!("Population {}", common::format_metric(Some(population as f64), common::MetricKind::Count))}
                                        </span>
                                    }
                                </a>
                            </li>
                        }
                    }) }
                </ul>
            }
        </div>
    }
}
