use common::{MAX_PRIORITY, MIN_PRIORITY, Priorities, PriorityKey};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PrioritySlidersProps {
    pub priorities: Priorities,
    pub on_change: Callback<(PriorityKey, u8)>,
}

/// Personal weighting sliders. Values stay on the page and are not part of any request.
#[function_component(PrioritySliders)]
pub fn priority_sliders(props: &PrioritySlidersProps) -> Html {
    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h3 class="card-title text-base">{"Your Priorities"}</h3>
                { for PriorityKey::ALL.iter().map(|key| {
                    let key = *key;
                    let value = props.priorities.get(key);
                    let on_change = props.on_change.clone();
                    let oninput = Callback::from(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        match input.value().parse::<u8>() {
                            Ok(value) => on_change.emit((key, value)),
                            Err(_) => log::warn!("Ignoring non-numeric priority input: {}", input.value()),
                        }
                    });

                    html! {
                        <div class="mb-2">
                            <div class="flex justify-between mb-1">
                                <span class="text-sm font-medium">{key.label()}</span>
                                <span class="text-sm font-bold">{format!("{}/{}", value, MAX_PRIORITY)}</span>
                            </div>
                            <input
                                type="range"
                                class="range range-primary range-sm"
                                min={MIN_PRIORITY.to_string()}
                                max={MAX_PRIORITY.to_string()}
                                value={value.to_string()}
                                {oninput}
                            />
                        </div>
                    }
                }) }
            </div>
        </div>
    }
}
