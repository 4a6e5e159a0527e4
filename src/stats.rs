use crate::errors::SeriesError;
use crate::models::{
    DashboardResponse, DerivedStats, Insights, InsightsPayload, KpiLabels, Measure, SeriesPoint,
    TimeRange, Trend,
};
use crate::series::{select_window, Series, Window};

/// Relative first-to-last change beyond which a window counts as trending.
pub const TREND_THRESHOLD: f64 = 0.05;

pub fn derive_stats(window: &Window<'_>, measure: Measure) -> DerivedStats {
    let contrast = measure.contrast();
    let (active_sum, contrast_sum) = window
        .records()
        .iter()
        .fold((0u64, 0u64), |(active, other), record| {
            (
                active.saturating_add(record.value(measure)),
                other.saturating_add(record.value(contrast)),
            )
        });

    // Always sessions per user, whichever measure is active.
    let engagement_ratio = match measure {
        Measure::Users => ratio_or_zero(contrast_sum, active_sum),
        Measure::Sessions => ratio_or_zero(active_sum, contrast_sum),
    };

    let first_value = window.first().value(measure);
    let latest_value = window.last().value(measure);

    DerivedStats {
        latest_value,
        contrast_total: contrast_sum,
        engagement_ratio,
        growth_rate_pct: relative_change(first_value, latest_value) * 100.0,
    }
}

pub fn derive_insights(window: &Window<'_>, measure: Measure) -> Insights {
    let mut peak = window.first();
    let mut trough = window.first();

    for record in window.records() {
        if record.value(measure) > peak.value(measure) {
            peak = record;
        }
        if record.value(measure) < trough.value(measure) {
            trough = record;
        }
    }

    let diff = relative_change(window.first().value(measure), window.last().value(measure));

    Insights {
        peak: *peak,
        trough: *trough,
        trend: classify_trend(diff),
    }
}

pub fn classify_trend(diff: f64) -> Trend {
    if diff > TREND_THRESHOLD {
        Trend::Increasing
    } else if diff < -TREND_THRESHOLD {
        Trend::Decreasing
    } else {
        Trend::Flat
    }
}

pub fn build_dashboard(
    series: &Series,
    range: TimeRange,
    measure: Measure,
) -> Result<DashboardResponse, SeriesError> {
    let window = select_window(series, range)?;
    let stats = derive_stats(&window, measure);
    let insights = derive_insights(&window, measure);

    Ok(DashboardResponse {
        range,
        measure,
        labels: KpiLabels::for_measure(measure),
        stats,
        insights: InsightsPayload::new(&insights, measure),
        points: window.records().iter().map(SeriesPoint::from).collect(),
    })
}

/// `(last - first) / first`, or 0 when the window starts at zero.
fn relative_change(first: u64, last: u64) -> f64 {
    if first == 0 {
        return 0.0;
    }
    (last as f64 - first as f64) / first as f64
}

fn ratio_or_zero(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
