//! Interactive availability chart: one line trace with a range slider
//! and hour-stepped zoom presets, exported as a standalone html page.

use crate::{Error, TimeSeries};
use plotly::common::{Mode, Title};
use plotly::layout::{Axis, RangeSelector, RangeSlider, SelectorButton, SelectorStep, StepMode};
use plotly::{Layout, Plot, Scatter};
use std::path::Path;

/// Builds the figure for an hourly series.
///
/// The series must be non empty with strictly increasing timestamps,
/// a chart over empty or unordered data is meaningless.
pub fn availability_figure(
    series: &TimeSeries,
    title: &str,
    x_label: &str,
) -> Result<Plot, Error> {
    if series.is_empty() {
        return Err(Error::Render(String::from("empty series, nothing to chart")));
    }
    if !series.is_ordered() {
        return Err(Error::Render(String::from(
            "timestamps must be strictly increasing",
        )));
    }
    let trace = Scatter::new(series.timestamp.clone(), series.value.clone()).mode(Mode::Lines);
    let buttons = vec![
        SelectorButton::new()
            .count(24)
            .label("day")
            .step(SelectorStep::Hour)
            .step_mode(StepMode::Backward),
        SelectorButton::new()
            .count(168)
            .label("week")
            .step(SelectorStep::Hour)
            .step_mode(StepMode::Backward),
    ];
    let layout = Layout::new().title(Title::with_text(title)).x_axis(
        Axis::new()
            .title(Title::with_text(x_label))
            .range_slider(RangeSlider::new().visible(true))
            .range_selector(RangeSelector::new().buttons(buttons)),
    );
    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    Ok(plot)
}

/// Writes the figure as a standalone page, plotly.js embedded so the
/// file opens offline in any browser.
pub fn write_figure_html(plot: &Plot, fout: &Path) -> Result<(), Error> {
    std::fs::write(fout, plot.to_html())?;
    Ok(())
}

/// Opens the figure in the default browser.
pub fn show_figure(plot: &Plot) {
    plot.show();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(n: usize) -> TimeSeries {
        let mut series = TimeSeries::new(n);
        for i in 0..n {
            series.timestamp.push(i as i64);
            series.value.push(0.5 + (i as f64) / 100.);
        }
        series
    }

    #[test]
    fn empty_series_fails_to_render() {
        let err = match availability_figure(&TimeSeries::new(0), "t", "x") {
            Ok(_) => panic!("expected an error"),
            Err(e) => e,
        };
        match err {
            Error::Render(_) => {}
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn unordered_timestamps_fail_to_render() {
        let mut unordered = series(3);
        unordered.timestamp = vec![2, 1, 0];
        let err = match availability_figure(&unordered, "t", "x") {
            Ok(_) => panic!("expected an error"),
            Err(e) => e,
        };
        match err {
            Error::Render(_) => {}
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn repeated_timestamps_fail_to_render() {
        let mut repeated = series(3);
        repeated.timestamp = vec![0, 0, 1];
        assert!(availability_figure(&repeated, "t", "x").is_err());
    }

    #[test]
    fn figure_keeps_every_point() {
        let plot = availability_figure(
            &series(4),
            "availability factor over the year",
            "hour of the year",
        )
        .unwrap();
        let json: String = plot
            .to_json()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        assert!(json.contains("\"x\":[0,1,2,3]"), "missing x values: {}", json);
    }

    #[test]
    fn rendering_is_deterministic() {
        let once = availability_figure(&series(16), "t", "x").unwrap().to_json();
        let twice = availability_figure(&series(16), "t", "x").unwrap().to_json();
        assert_eq!(once, twice);
    }
}
