//! Plain-text rendering of backend payloads for the terminal.

use std::io::{self, Write};

use common::format::{analysis_facts, format_metric, score_bars};
use common::{
    ClimateAnalysis, ComparisonInsights, ComparisonReport, LocationData, LocationOption,
    MetricKind, PLACEHOLDER, ScoreBar, Winner,
};
use session::{AnalysisOrchestrator, Slot, SlotState};

const GAUGE_CELLS: usize = 20;

/// `[##########----------]  50 (poor)`; missing scores draw an empty gauge.
pub fn gauge(bar: &ScoreBar) -> String {
    let filled = usize::from(bar.width_percent()) * GAUGE_CELLS / 100;
    let band = bar.band().map(|band| band.label()).unwrap_or("n/a");
    format!(
        "[{}{}] {:>3} ({})",
        "#".repeat(filled),
        "-".repeat(GAUGE_CELLS - filled),
        bar.display(),
        band
    )
}

pub fn write_analysis(
    out: &mut impl Write,
    analysis: &ClimateAnalysis,
    fallback: &str,
) -> io::Result<()> {
    writeln!(out, "{}", analysis.heading(fallback))?;

    if let Some(month) = &analysis.climate_variations.month_name {
        writeln!(out, "  Month: {}", month)?;
    }

    writeln!(out)?;
    for bar in score_bars(analysis) {
        writeln!(out, "  {:<20} {}", bar.label, gauge(&bar))?;
    }

    writeln!(out)?;
    for (label, value) in analysis_facts(analysis) {
        writeln!(out, "  {:<22} {}", label, value)?;
    }

    let risk = &analysis.risk_assessment;
    if let Some(description) = &risk.description {
        writeln!(out, "\n  {}", description)?;
    }
    if let Some(impact) = &risk.temperature_impact {
        writeln!(out, "  {}", impact)?;
    }
    write_list(out, "Key concerns", &risk.key_concerns)?;
    write_list(out, "Recommendations", &analysis.recommendations)?;

    if !analysis.data_sources.is_empty() {
        writeln!(out, "\n  Sources: {}", analysis.data_sources.join(", "))?;
    }
    if let Some(updated) = analysis.last_updated_at() {
        writeln!(out, "  Last updated: {}", updated.format("%Y-%m-%d %H:%M"))?;
    }
    Ok(())
}

fn write_list(out: &mut impl Write, title: &str, items: &[String]) -> io::Result<()> {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(out, "\n  {}:", title)?;
    for item in items {
        writeln!(out, "    - {}", item)?;
    }
    Ok(())
}

/// One slot of an analysis run, whatever state it ended in.
pub fn write_slot(
    out: &mut impl Write,
    orchestrator: &AnalysisOrchestrator,
    slot: Slot,
) -> io::Result<()> {
    let requested = match slot {
        Slot::Current => orchestrator.current_location(),
        Slot::Target => orchestrator.target_location(),
    };
    let fallback = requested.map(LocationOption::label).unwrap_or_default();

    writeln!(out, "== {} ==", slot.label())?;
    match orchestrator.state(slot) {
        SlotState::Idle => writeln!(out, "Not analyzed"),
        SlotState::Loading => writeln!(out, "Analyzing..."),
        SlotState::Failed(message) => writeln!(out, "Error: {}", message),
        SlotState::Succeeded(analysis) => write_analysis(out, analysis, &fallback),
    }
}

pub fn write_comparison(out: &mut impl Write, report: &ComparisonReport) -> io::Result<()> {
    writeln!(out, "== {} ==", Slot::Current.label())?;
    write_analysis(out, &report.current_location, PLACEHOLDER)?;
    writeln!(out)?;
    writeln!(out, "== {} ==", Slot::Target.label())?;
    write_analysis(out, &report.target_location, PLACEHOLDER)?;
    writeln!(out)?;
    write_insights(out, report)
}

fn write_insights(out: &mut impl Write, report: &ComparisonReport) -> io::Result<()> {
    let ComparisonInsights {
        resilience_comparison: resilience,
        temperature_comparison: temperature,
        recommendation,
    } = &report.comparison_insights;

    writeln!(out, "== Comparison ==")?;
    let winner = match resilience.winner {
        Winner::Current => report.current_location.heading("current location"),
        Winner::Target => report.target_location.heading("target location"),
        Winner::Tie => "Tie".to_string(),
    };
    writeln!(out, "  {:<22} {}", "More resilient", winner)?;
    writeln!(
        out,
        "  {:<22} {}",
        "Score difference",
        format_metric(resilience.score_difference, MetricKind::Score)
    )?;
    writeln!(
        out,
        "  {:<22} {} vs {}",
        "2050 Change",
        format_metric(temperature.current_change, MetricKind::TemperatureDelta),
        format_metric(temperature.target_change, MetricKind::TemperatureDelta)
    )?;
    if temperature.target_cooler == Some(true) {
        writeln!(out, "  Target warms less by 2050")?;
    }
    if let Some(recommendation) = recommendation {
        writeln!(out, "\n  {}", recommendation)?;
    }
    Ok(())
}

/// Numbered suggestion list, matching the `--pick` numbering.
pub fn write_locations(out: &mut impl Write, locations: &[LocationOption]) -> io::Result<()> {
    for (index, location) in locations.iter().enumerate() {
        writeln!(
            out,
            "{:>2}. {}  ({:.4}, {:.4})  pop. {}",
            index + 1,
            location.label(),
            location.latitude,
            location.longitude,
            format_metric(location.population.map(|p| p as f64), MetricKind::Count)
        )?;
    }
    Ok(())
}

pub fn write_location_data(out: &mut impl Write, location: &LocationData) -> io::Result<()> {
    writeln!(out, "{}", location.label())?;
    writeln!(out, "  {:<12} {:.4}", "Latitude", location.latitude)?;
    writeln!(out, "  {:<12} {:.4}", "Longitude", location.longitude)?;
    writeln!(
        out,
        "  {:<12} {}",
        "Population",
        format_metric(location.population.map(|p| p as f64), MetricKind::Count)
    )?;
    writeln!(
        out,
        "  {:<12} {}",
        "Timezone",
        location.timezone.as_deref().unwrap_or(PLACEHOLDER)
    )
}
