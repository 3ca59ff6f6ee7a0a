pub mod analysis_card;
pub mod metric_bar;
pub mod view;

pub use view::AnalysisView;
