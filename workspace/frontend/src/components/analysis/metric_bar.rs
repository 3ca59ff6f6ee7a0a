use common::{ScoreBand, ScoreBar};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MetricBarProps {
    pub bar: ScoreBar,
}

fn band_class(band: Option<ScoreBand>) -> &'static str {
    match band {
        Some(ScoreBand::Excellent) => "progress-success",
        Some(ScoreBand::Good) => "progress-info",
        Some(ScoreBand::Fair) => "progress-warning",
        Some(ScoreBand::Poor) => "progress-error",
        None => "progress-neutral",
    }
}

#[function_component(MetricBar)]
pub fn metric_bar(props: &MetricBarProps) -> Html {
    let bar = &props.bar;

    html! {
        <div class="mb-3">
            <div class="flex justify-between mb-1">
                <span class="text-sm font-medium">{bar.label}</span>
                <span class="text-sm text-gray-500">{bar.display()}</span>
            </div>
            <progress
                class={classes!("progress", "w-full", band_class(bar.band()))}
                value={bar.width_percent().to_string()}
                max="100"
            ></progress>
        </div>
    }
}
