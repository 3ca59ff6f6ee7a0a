use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub title: String,
}

#[function_component(Navbar)]
pub fn navbar(props: &Props) -> Html {
    html! {
        <div class="navbar bg-base-100 shadow-sm z-40 sticky top-0">
            <div class="flex-1 px-4 gap-2">
                <i class="fas fa-globe-europe text-xl text-primary"></i>
                <Link<Route> to={Route::Home} classes="text-xl font-bold">
                    {"Climate Migration Advisor"}
                </Link<Route>>
            </div>
            <div class="flex-none px-4">
                <span class="text-sm text-gray-500" id="page-title">{ &props.title }</span>
            </div>
        </div>
    }
}
