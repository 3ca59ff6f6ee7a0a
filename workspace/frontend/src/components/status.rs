use session::Connectivity;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusBadgeProps {
    pub connectivity: Connectivity,
}

#[function_component(StatusBadge)]
pub fn status_badge(props: &StatusBadgeProps) -> Html {
    let class = match props.connectivity {
        Connectivity::Connected => "badge-success",
        Connectivity::Connecting => "badge-warning",
        Connectivity::Error => "badge-error",
    };

    html! {
        <span class={classes!("badge", "gap-1", class)}>
            <i class="fas fa-circle text-[0.5rem]"></i>
            {props.connectivity.label()}
        </span>
    }
}
