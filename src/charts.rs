//! Chart derivations for the thirteen survey questions.
//!
//! Each derivation is a pure function from the survey table to one chart
//! specification plus a one-line summary computed from the same aggregation
//! snapshot. Categorical questions share a single builder driven by a
//! per-question definition; the three numeric questions share the localized
//! coercion in `stats` and a common value-count bar path.

use crate::Result;
use crate::diagnostics;
use crate::questions as q;
use crate::stats::{self, ValueCounts};
use crate::table::SurveyTable;

use serde_json::{Value, json};

/// Chart theming, threaded explicitly into every construction call instead of
/// living in process-wide state.
#[derive(Debug, Clone)]
pub struct Theme {
    pub colorway: Vec<String>,
    pub paper_bg: String,
    pub plot_bg: String,
    pub font_color: String,
    pub grid_color: String,
    pub marker_line: String,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            colorway: [
                "#2563eb", "#14b8a6", "#f59e0b", "#ef4444", "#8b5cf6", "#0ea5e9", "#22c55e",
                "#e11d48",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            paper_bg: "#111111".to_string(),
            plot_bg: "#111111".to_string(),
            font_color: "#f2f5fa".to_string(),
            grid_color: "#283442".to_string(),
            marker_line: "#ffffff".to_string(),
        }
    }
}

/// The data payload of one chart.
#[derive(Debug, Clone)]
pub enum ChartData {
    Pie {
        labels: Vec<String>,
        values: Vec<u64>,
        hole: f64,
        colors: Vec<String>,
    },
    Bar {
        labels: Vec<String>,
        values: Vec<u64>,
        colors: Vec<String>,
        horizontal: bool,
        show_text: bool,
    },
    /// Bar over distinct numeric values (x axis is numeric, not categorical).
    NumericBar {
        xs: Vec<f64>,
        counts: Vec<u64>,
        color: String,
        show_text: bool,
    },
    Histogram {
        samples: Vec<f64>,
        nbins: u32,
        color: String,
    },
    /// Empty figure carrying only a centered text annotation.
    Placeholder { note: String },
}

#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub title: String,
    pub height: u32,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
    pub show_legend: Option<bool>,
    pub data: ChartData,
}

/// A chart plus the summary line rendered directly beneath it.
#[derive(Debug, Clone)]
pub struct ChartBlock {
    pub spec: ChartSpec,
    pub summary: String,
}

impl ChartSpec {
    /// Plotly trace array for this chart.
    pub fn traces_json(&self, theme: &Theme) -> Value {
        let line = json!({ "color": theme.marker_line, "width": 1 });
        match &self.data {
            ChartData::Pie {
                labels,
                values,
                hole,
                colors,
            } => json!([{
                "type": "pie",
                "labels": labels,
                "values": values,
                "hole": hole,
                "marker": { "colors": colors },
                "textinfo": "label+value+percent",
                "textposition": "auto",
            }]),
            ChartData::Bar {
                labels,
                values,
                colors,
                horizontal,
                show_text,
            } => {
                let color = bar_color(colors);
                let mut trace = if *horizontal {
                    json!({
                        "type": "bar",
                        "x": values,
                        "y": labels,
                        "orientation": "h",
                        "marker": { "color": color, "line": line },
                    })
                } else {
                    json!({
                        "type": "bar",
                        "x": labels,
                        "y": values,
                        "marker": { "color": color, "line": line },
                    })
                };
                if *show_text {
                    trace["text"] = json!(values);
                    trace["textposition"] = json!("auto");
                }
                json!([trace])
            }
            ChartData::NumericBar {
                xs,
                counts,
                color,
                show_text,
            } => {
                let mut trace = json!({
                    "type": "bar",
                    "x": xs,
                    "y": counts,
                    "marker": { "color": color, "line": line },
                });
                if *show_text {
                    trace["text"] = json!(counts);
                    trace["textposition"] = json!("auto");
                }
                json!([trace])
            }
            ChartData::Histogram {
                samples,
                nbins,
                color,
            } => json!([{
                "type": "histogram",
                "x": samples,
                "nbinsx": nbins,
                "marker": { "color": color, "line": line },
            }]),
            ChartData::Placeholder { .. } => json!([]),
        }
    }

    /// Plotly layout for this chart, with the theme applied.
    pub fn layout_json(&self, theme: &Theme) -> Value {
        let mut layout = json!({
            "title": { "text": self.title },
            "height": self.height,
            "paper_bgcolor": theme.paper_bg,
            "plot_bgcolor": theme.plot_bg,
            "font": { "color": theme.font_color },
            "colorway": theme.colorway,
        });
        if let Some(show) = self.show_legend {
            layout["showlegend"] = json!(show);
        }
        if let Some(x) = &self.x_title {
            layout["xaxis"] = json!({ "title": { "text": x }, "gridcolor": theme.grid_color });
        }
        if let Some(y) = &self.y_title {
            layout["yaxis"] = json!({ "title": { "text": y }, "gridcolor": theme.grid_color });
        }
        if let ChartData::Placeholder { note } = &self.data {
            layout["annotations"] = json!([{
                "text": note,
                "showarrow": false,
                "x": 0.5,
                "y": 0.5,
                "xref": "paper",
                "yref": "paper",
                "font": { "size": 16 },
            }]);
        }
        layout
    }
}

/// Plotly accepts either one color or a per-bar color array.
fn bar_color(colors: &[String]) -> Value {
    if colors.len() == 1 {
        json!(colors[0])
    } else {
        json!(colors)
    }
}

#[derive(Debug, Clone, Copy)]
enum CatKind {
    Pie,
    Bar,
    HBar,
}

/// How the summary line is derived from the category counts.
#[derive(Debug, Clone, Copy)]
enum SummaryStyle {
    /// `"{prefix}: {top} ({share}%)."`, optionally followed by the number of
    /// distinct categories.
    TopShare {
        prefix: &'static str,
        with_category_total: bool,
    },
    /// Like `TopShare`, but with a fixed fallback when no categories exist.
    MajorityOrNone { empty: &'static str },
    /// `"Yes: {n} ({share}%), No: {n}."`; absent keys count as zero.
    YesNo,
    /// `"label: count"` pairs joined with commas, descending frequency.
    CountList,
}

/// Declarative configuration for one categorical question chart.
#[derive(Debug, Clone, Copy)]
struct CategoricalDef {
    column: &'static str,
    title: &'static str,
    kind: CatKind,
    height: u32,
    /// `None` means the theme colorway.
    palette: Option<&'static [&'static str]>,
    x_title: Option<&'static str>,
    y_title: Option<&'static str>,
    show_legend: Option<bool>,
    show_text: bool,
    /// Drop `"-"` and whitespace-only categories ("not applicable" answers).
    drop_not_applicable: bool,
    /// Omit the chart entirely when no categories remain.
    skip_if_empty: bool,
    /// Append `(n={total})` to the title.
    count_in_title: bool,
    summary: SummaryStyle,
}

const PIE_HOLE: f64 = 0.4;

const DEF_BASE: CategoricalDef = CategoricalDef {
    column: "",
    title: "",
    kind: CatKind::Pie,
    height: 500,
    palette: None,
    x_title: None,
    y_title: None,
    show_legend: None,
    show_text: false,
    drop_not_applicable: false,
    skip_if_empty: false,
    count_in_title: false,
    summary: SummaryStyle::CountList,
};

/// One entry per survey question, in fixed report order. The three numeric
/// questions branch on parsed values and have dedicated builders below.
#[derive(Debug, Clone, Copy)]
enum QuestionChart {
    Categorical(CategoricalDef),
    HoursHistogram,
    OutageDuration,
    BackupDuration,
}

const QUESTION_CHARTS: &[QuestionChart] = &[
    // 1. Region (donut, theme colorway, respondent count in the title).
    QuestionChart::Categorical(CategoricalDef {
        column: q::REGION,
        title: "Region distribution",
        show_legend: Some(true),
        count_in_title: true,
        summary: SummaryStyle::TopShare {
            prefix: "Top region",
            with_category_total: true,
        },
        ..DEF_BASE
    }),
    // 2. Connection type (donut).
    QuestionChart::Categorical(CategoricalDef {
        column: q::CONNECTION,
        title: "Internet connection type",
        summary: SummaryStyle::TopShare {
            prefix: "Most common connection",
            with_category_total: false,
        },
        ..DEF_BASE
    }),
    // 3. Stability rating (donut, two-color palette; emitted even when empty).
    QuestionChart::Categorical(CategoricalDef {
        column: q::STABILITY,
        title: "Connection stability rating",
        palette: Some(&["#00ff88", "#ff6b6b"]),
        summary: SummaryStyle::MajorityOrNone {
            empty: "No stability data.",
        },
        ..DEF_BASE
    }),
    // 4. Hours without internet per day.
    QuestionChart::HoursHistogram,
    // 5. Outage frequency (vertical bar).
    QuestionChart::Categorical(CategoricalDef {
        column: q::OUTAGE_FREQUENCY,
        title: "Power outage frequency",
        kind: CatKind::Bar,
        height: 400,
        palette: Some(&["#ff9f43"]),
        x_title: Some("Frequency"),
        y_title: Some("Count"),
        ..DEF_BASE
    }),
    // 6. Outage duration in hours.
    QuestionChart::OutageDuration,
    // 7. Backup power availability (donut, two-color palette).
    QuestionChart::Categorical(CategoricalDef {
        column: q::BACKUP_AVAILABLE,
        title: "Backup power availability",
        palette: Some(&["#ff6b6b", "#51cf66"]),
        summary: SummaryStyle::YesNo,
        ..DEF_BASE
    }),
    // 8. Backup power type (horizontal bar; "-" and blank answers mean
    //    "not applicable" and the chart is skipped when nothing remains).
    QuestionChart::Categorical(CategoricalDef {
        column: q::BACKUP_TYPE,
        title: "Types of backup power (actual users)",
        kind: CatKind::HBar,
        height: 400,
        palette: Some(&["#a29bfe"]),
        x_title: Some("Count"),
        y_title: Some("Type"),
        show_text: true,
        drop_not_applicable: true,
        skip_if_empty: true,
        ..DEF_BASE
    }),
    // 9. Backup power duration in hours.
    QuestionChart::BackupDuration,
    // 10. Device types (pie, theme colorway).
    QuestionChart::Categorical(CategoricalDef {
        column: q::DEVICES,
        title: "Available device type",
        ..DEF_BASE
    }),
    // 11. Separate workplace (two-color pie).
    QuestionChart::Categorical(CategoricalDef {
        column: q::WORKPLACE,
        title: "Separate workplace at home",
        palette: Some(&["#51cf66", "#ff6b6b"]),
        ..DEF_BASE
    }),
    // 12. Accessories (two-color pie).
    QuestionChart::Categorical(CategoricalDef {
        column: q::ACCESSORIES,
        title: "Accessories availability",
        palette: Some(&["#51cf66", "#ffd93d"]),
        ..DEF_BASE
    }),
    // 13. Ergonomic equipment level (three-color bar).
    QuestionChart::Categorical(CategoricalDef {
        column: q::ERGONOMICS,
        title: "Workplace ergonomics",
        kind: CatKind::Bar,
        height: 400,
        palette: Some(&["#51cf66", "#ffd93d", "#ff6b6b"]),
        x_title: Some("Level"),
        y_title: Some("Count"),
        ..DEF_BASE
    }),
];

/// Build the charts for all thirteen questions in fixed report order.
///
/// Questions 8 and 9 are omitted when no usable responses remain; everything
/// else always yields a chart (possibly a placeholder).
pub fn build_all_charts(table: &SurveyTable, theme: &Theme) -> Result<Vec<ChartBlock>> {
    let mut blocks = Vec::new();

    for question in QUESTION_CHARTS {
        let block = match question {
            QuestionChart::Categorical(def) => categorical_chart(table, theme, def)?,
            QuestionChart::HoursHistogram => Some(hours_histogram(table)?),
            QuestionChart::OutageDuration => Some(outage_duration_chart(table)?),
            QuestionChart::BackupDuration => backup_duration_chart(table)?,
        };
        if let Some(block) = block {
            blocks.push(block);
        }
    }

    Ok(blocks)
}

fn palette_colors(def: &CategoricalDef, theme: &Theme) -> Vec<String> {
    match def.palette {
        Some(p) => p.iter().map(|c| c.to_string()).collect(),
        None => theme.colorway.clone(),
    }
}

fn categorical_chart(
    table: &SurveyTable,
    theme: &Theme,
    def: &CategoricalDef,
) -> Result<Option<ChartBlock>> {
    let mut counts = ValueCounts::from_values(table.column(def.column)?.into_iter());
    if def.drop_not_applicable {
        counts.retain(|label| label != "-" && !label.trim().is_empty());
    }

    if def.skip_if_empty && counts.is_empty() {
        diagnostics::warn(format!("no usable responses for '{}', chart skipped", def.column));
        return Ok(None);
    }

    let colors = palette_colors(def, theme);
    let data = match def.kind {
        CatKind::Pie => ChartData::Pie {
            labels: counts.labels(),
            values: counts.values(),
            hole: PIE_HOLE,
            colors,
        },
        CatKind::Bar | CatKind::HBar => ChartData::Bar {
            labels: counts.labels(),
            values: counts.values(),
            colors,
            horizontal: matches!(def.kind, CatKind::HBar),
            show_text: def.show_text,
        },
    };

    let title = if def.count_in_title {
        format!("{} (n={})", def.title, counts.total())
    } else {
        def.title.to_string()
    };

    let summary = summarize(&counts, def.summary);

    Ok(Some(ChartBlock {
        spec: ChartSpec {
            title,
            height: def.height,
            x_title: def.x_title.map(str::to_string),
            y_title: def.y_title.map(str::to_string),
            show_legend: def.show_legend,
            data,
        },
        summary,
    }))
}

/// Summary text from the same counts that back the chart.
fn summarize(counts: &ValueCounts, style: SummaryStyle) -> String {
    match style {
        SummaryStyle::TopShare {
            prefix,
            with_category_total,
        } => {
            let (top, top_count) = match counts.top() {
                Some(t) => t,
                None => return format!("{}: none.", prefix),
            };
            let share = stats::share_pct(top_count, counts.total());
            if with_category_total {
                format!(
                    "{}: {} ({:.1}%). Total regions: {}.",
                    prefix,
                    top,
                    share,
                    counts.len()
                )
            } else {
                format!("{}: {} ({:.1}%).", prefix, top, share)
            }
        }
        SummaryStyle::MajorityOrNone { empty } => match counts.top() {
            Some((label, count)) => {
                let share = stats::share_pct(count, counts.total());
                format!("Majority rated: {} ({:.1}%).", label, share)
            }
            None => empty.to_string(),
        },
        SummaryStyle::YesNo => {
            let yes = counts.get("Yes");
            let no = counts.get("No");
            let total = counts.total();
            if total > 0 {
                let share = stats::share_pct(yes, total);
                format!("Yes: {} ({:.1}%), No: {}.", yes, share, no)
            } else {
                format!("Yes: {} (0%), No: {}.", yes, no)
            }
        }
        SummaryStyle::CountList => counts.join_counts(),
    }
}

/// 4. Hours without internet per day: histogram, or a placeholder when the
/// column has no parseable values or every value is zero.
fn hours_histogram(table: &SurveyTable) -> Result<ChartBlock> {
    const TITLE: &str = "Hours without internet (per day)";

    let samples = stats::numeric_series(table.column(q::HOURS_NO_INTERNET)?.into_iter());

    if samples.is_empty() {
        return Ok(placeholder_block(
            TITLE,
            400,
            "No data",
            "All responses are zero or missing.",
        ));
    }
    if samples.iter().sum::<f64>() == 0.0 {
        return Ok(placeholder_block(
            TITLE,
            400,
            "All respondents reported 0 hours per day without internet",
            "All respondents reported 0 hours without internet.",
        ));
    }

    let median = stats::median(&samples).unwrap_or(0.0);
    let mean = stats::mean(&samples).unwrap_or(0.0);
    let summary = format!(
        "Median: {} h; Mean: {} h.",
        stats::fmt_num(stats::round_to(median, 2)),
        stats::fmt_num(stats::round_to(mean, 2))
    );

    Ok(ChartBlock {
        spec: ChartSpec {
            title: TITLE.to_string(),
            height: 400,
            x_title: Some("Hours".to_string()),
            y_title: Some("Count".to_string()),
            show_legend: None,
            data: ChartData::Histogram {
                samples,
                nbins: 10,
                color: "#00d4ff".to_string(),
            },
        },
        summary,
    })
}

/// 6. Outage duration: bar over distinct positive durations (rounded to three
/// decimals, ascending). Non-positive rows are excluded from the bars but
/// still count toward the "any data at all" check that picks the placeholder.
fn outage_duration_chart(table: &SurveyTable) -> Result<ChartBlock> {
    const TITLE: &str = "Outage duration (hours)";

    let all = stats::numeric_series(table.column(q::OUTAGE_DURATION)?.into_iter());
    let positive: Vec<f64> = all.iter().copied().filter(|v| *v > 0.0).collect();

    if all.is_empty() {
        return Ok(placeholder_block(
            TITLE,
            450,
            "No data available for outage duration",
            "No outage duration data.",
        ));
    }
    if positive.is_empty() {
        return Ok(placeholder_block(
            TITLE,
            450,
            "All respondents reported 0 hours (no outages or zero-duration)",
            "All durations are zero.",
        ));
    }

    let rounded: Vec<f64> = positive.iter().map(|v| stats::round_to(*v, 3)).collect();
    let (xs, counts) = stats::numeric_value_counts(&rounded);

    let summary = format!(
        "min={}h, median={}h, max={}h",
        stats::fmt_num(stats::round_to(stats::min(&positive).unwrap_or(0.0), 3)),
        stats::fmt_num(stats::round_to(stats::median(&positive).unwrap_or(0.0), 3)),
        stats::fmt_num(stats::round_to(stats::max(&positive).unwrap_or(0.0), 3)),
    );

    Ok(ChartBlock {
        spec: ChartSpec {
            title: TITLE.to_string(),
            height: 450,
            x_title: Some("Hours".to_string()),
            y_title: Some("Count".to_string()),
            show_legend: None,
            data: ChartData::NumericBar {
                xs,
                counts,
                color: "#ee5a6f".to_string(),
                show_text: true,
            },
        },
        summary,
    })
}

/// 9. Backup power duration: bar over distinct positive durations, ascending.
/// Omitted entirely when no positive value remains.
fn backup_duration_chart(table: &SurveyTable) -> Result<Option<ChartBlock>> {
    let values = stats::numeric_series(table.column(q::BACKUP_DURATION)?.into_iter());
    let positive: Vec<f64> = values.into_iter().filter(|v| *v > 0.0).collect();

    if positive.is_empty() {
        diagnostics::warn(format!(
            "no positive durations for '{}', chart skipped",
            q::BACKUP_DURATION
        ));
        return Ok(None);
    }

    let (xs, counts) = stats::numeric_value_counts(&positive);
    let summary = xs
        .iter()
        .zip(&counts)
        .map(|(x, c)| format!("{}h: {}", stats::fmt_num(*x), c))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(Some(ChartBlock {
        spec: ChartSpec {
            title: "Backup power duration (hours) (actual users)".to_string(),
            height: 450,
            x_title: Some("Hours".to_string()),
            y_title: Some("Count".to_string()),
            show_legend: None,
            data: ChartData::NumericBar {
                xs,
                counts,
                color: "#fd79a8".to_string(),
                show_text: true,
            },
        },
        summary,
    }))
}

fn placeholder_block(title: &str, height: u32, note: &str, summary: &str) -> ChartBlock {
    ChartBlock {
        spec: ChartSpec {
            title: title.to_string(),
            height,
            x_title: None,
            y_title: None,
            show_legend: None,
            data: ChartData::Placeholder {
                note: note.to_string(),
            },
        },
        summary: summary.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a table from (column, cells) pairs; a Timestamp column is added
    /// implicitly because the loader requires one.
    fn table(cols: &[(&str, &[&str])]) -> SurveyTable {
        let n = cols.first().map(|(_, cells)| cells.len()).unwrap_or(0);
        let mut csv = String::from("Timestamp");
        for (name, _) in cols {
            csv.push(';');
            csv.push_str(name);
        }
        csv.push('\n');
        for i in 0..n {
            csv.push_str("01/01/2025");
            for (_, cells) in cols {
                csv.push(';');
                csv.push_str(cells[i]);
            }
            csv.push('\n');
        }
        SurveyTable::from_reader(csv.as_bytes()).unwrap()
    }

    fn def_for(column: &str) -> CategoricalDef {
        for qc in QUESTION_CHARTS {
            if let QuestionChart::Categorical(def) = qc {
                if def.column == column {
                    return *def;
                }
            }
        }
        panic!("no categorical definition for {column}");
    }

    fn full_fixture() -> SurveyTable {
        let region = ["North"; 6]
            .into_iter()
            .chain(["South"; 3])
            .chain(["East"; 1])
            .collect::<Vec<_>>();
        let conn: Vec<&str> = (0..10)
            .map(|i| if i % 2 == 0 { "Fiber" } else { "DSL" })
            .collect();
        let stab: Vec<&str> = (0..10)
            .map(|i| if i < 7 { "Stable" } else { "Unstable" })
            .collect();
        let hours = vec!["0,5", "1", "2", "0", "1", "3", "0,5", "2", "1", "4"];
        let freq = vec![
            "Monthly", "Weekly", "Rarely", "Monthly", "Weekly", "Rarely", "Monthly", "Weekly",
            "Rarely", "Monthly",
        ];
        let out_dur = vec!["2", "2", "2", "0", "0", "0", "1,5", "1,5", "1,5", "1,5"];
        let backup: Vec<&str> = (0..10).map(|i| if i < 6 { "Yes" } else { "No" }).collect();
        let backup_type = vec![
            "UPS", "UPS", "UPS", "UPS", "Generator", "Generator", "-", "-", "-", "-",
        ];
        let backup_dur = vec!["4", "4", "4", "2,5", "2,5", "0", "", "", "", ""];
        let devices = vec![
            "Laptop", "Laptop", "Laptop", "Laptop", "Laptop", "Desktop", "Desktop", "Desktop",
            "Tablet", "Tablet",
        ];
        let workplace: Vec<&str> = (0..10).map(|i| if i < 6 { "Yes" } else { "No" }).collect();
        let accessories: Vec<&str> = (0..10).map(|i| if i < 8 { "Yes" } else { "No" }).collect();
        let ergo = vec![
            "Full", "Full", "Full", "Full", "Full", "Partial", "Partial", "Partial", "None",
            "None",
        ];

        table(&[
            (q::REGION, &region),
            (q::CONNECTION, &conn),
            (q::STABILITY, &stab),
            (q::HOURS_NO_INTERNET, &hours),
            (q::OUTAGE_FREQUENCY, &freq),
            (q::OUTAGE_DURATION, &out_dur),
            (q::BACKUP_AVAILABLE, &backup),
            (q::BACKUP_TYPE, &backup_type),
            (q::BACKUP_DURATION, &backup_dur),
            (q::DEVICES, &devices),
            (q::WORKPLACE, &workplace),
            (q::ACCESSORIES, &accessories),
            (q::ERGONOMICS, &ergo),
        ])
    }

    fn chart_total(data: &ChartData) -> u64 {
        match data {
            ChartData::Pie { values, .. } | ChartData::Bar { values, .. } => values.iter().sum(),
            ChartData::NumericBar { counts, .. } => counts.iter().sum(),
            _ => 0,
        }
    }

    #[test]
    fn builds_all_thirteen_charts_in_order() {
        let blocks = build_all_charts(&full_fixture(), &Theme::default()).unwrap();
        assert_eq!(blocks.len(), 13);
        assert_eq!(blocks[0].spec.title, "Region distribution (n=10)");
        assert_eq!(blocks[12].spec.title, "Workplace ergonomics");
    }

    #[test]
    fn region_summary_reports_top_share() {
        let blocks = build_all_charts(&full_fixture(), &Theme::default()).unwrap();
        assert_eq!(
            blocks[0].summary,
            "Top region: North (60.0%). Total regions: 3."
        );
    }

    #[test]
    fn tied_connection_counts_keep_first_seen_majority() {
        let blocks = build_all_charts(&full_fixture(), &Theme::default()).unwrap();
        assert_eq!(blocks[1].summary, "Most common connection: Fiber (50.0%).");
    }

    #[test]
    fn backup_availability_summary_is_exact() {
        let blocks = build_all_charts(&full_fixture(), &Theme::default()).unwrap();
        assert_eq!(blocks[6].summary, "Yes: 6 (60.0%), No: 4.");
    }

    #[test]
    fn device_categories_order_by_descending_frequency() {
        let blocks = build_all_charts(&full_fixture(), &Theme::default()).unwrap();
        match &blocks[9].spec.data {
            ChartData::Pie { labels, values, .. } => {
                assert_eq!(labels, &["Laptop", "Desktop", "Tablet"]);
                assert_eq!(values, &[5, 3, 2]);
            }
            other => panic!("expected pie, got {other:?}"),
        }
        assert_eq!(blocks[9].summary, "Laptop: 5, Desktop: 3, Tablet: 2");
    }

    #[test]
    fn category_totals_match_non_missing_responses() {
        let blocks = build_all_charts(&full_fixture(), &Theme::default()).unwrap();
        // All ten rows answered these questions.
        for idx in [0, 1, 2, 4, 6, 10, 11, 12] {
            assert_eq!(chart_total(&blocks[idx].spec.data), 10, "chart {idx}");
        }
        // Backup type: four "-" placeholders excluded.
        assert_eq!(chart_total(&blocks[7].spec.data), 6);
    }

    #[test]
    fn hours_histogram_summary_uses_same_samples() {
        let blocks = build_all_charts(&full_fixture(), &Theme::default()).unwrap();
        assert!(matches!(
            blocks[3].spec.data,
            ChartData::Histogram { nbins: 10, .. }
        ));
        assert_eq!(blocks[3].summary, "Median: 1.0 h; Mean: 1.5 h.");
    }

    #[test]
    fn outage_duration_excludes_zero_rows_from_bars() {
        let blocks = build_all_charts(&full_fixture(), &Theme::default()).unwrap();
        match &blocks[5].spec.data {
            ChartData::NumericBar { xs, counts, .. } => {
                assert_eq!(xs, &[1.5, 2.0]);
                assert_eq!(counts, &[4, 3]);
            }
            other => panic!("expected numeric bar, got {other:?}"),
        }
        assert_eq!(blocks[5].summary, "min=1.5h, median=1.5h, max=2.0h");
    }

    #[test]
    fn backup_duration_coerces_decimal_commas() {
        let blocks = build_all_charts(&full_fixture(), &Theme::default()).unwrap();
        assert_eq!(blocks[8].summary, "2.5h: 2, 4.0h: 3");
    }

    #[test]
    fn hours_all_zero_yields_placeholder_not_histogram() {
        let t = table(&[(q::HOURS_NO_INTERNET, &["0", "0", "0,0", ""])]);
        let block = hours_histogram(&t).unwrap();
        match &block.spec.data {
            ChartData::Placeholder { note } => {
                assert_eq!(note, "All respondents reported 0 hours per day without internet");
            }
            other => panic!("expected placeholder, got {other:?}"),
        }
        assert_eq!(block.summary, "All respondents reported 0 hours without internet.");
    }

    #[test]
    fn hours_without_parseable_values_yields_no_data_placeholder() {
        let t = table(&[(q::HOURS_NO_INTERNET, &["", "n/a", ""])]);
        let block = hours_histogram(&t).unwrap();
        match &block.spec.data {
            ChartData::Placeholder { note } => assert_eq!(note, "No data"),
            other => panic!("expected placeholder, got {other:?}"),
        }
        assert_eq!(block.summary, "All responses are zero or missing.");
    }

    #[test]
    fn outage_duration_empty_column_yields_no_data_placeholder() {
        let t = table(&[(q::OUTAGE_DURATION, &["", "", ""])]);
        let block = outage_duration_chart(&t).unwrap();
        match &block.spec.data {
            ChartData::Placeholder { note } => {
                assert_eq!(note, "No data available for outage duration");
            }
            other => panic!("expected placeholder, got {other:?}"),
        }
        assert_eq!(block.summary, "No outage duration data.");
    }

    #[test]
    fn outage_duration_all_zero_yields_zero_placeholder() {
        // Zeros do not show as bars, but they do count as "has data".
        let t = table(&[(q::OUTAGE_DURATION, &["0", "0,0", ""])]);
        let block = outage_duration_chart(&t).unwrap();
        match &block.spec.data {
            ChartData::Placeholder { note } => {
                assert_eq!(
                    note,
                    "All respondents reported 0 hours (no outages or zero-duration)"
                );
            }
            other => panic!("expected placeholder, got {other:?}"),
        }
        assert_eq!(block.summary, "All durations are zero.");
    }

    #[test]
    fn backup_type_placeholder_answers_never_render() {
        let t = table(&[(q::BACKUP_TYPE, &["UPS", "-", "  ", "", "UPS", "Solar"])]);
        let def = def_for(q::BACKUP_TYPE);
        let block = categorical_chart(&t, &Theme::default(), &def).unwrap().unwrap();
        match &block.spec.data {
            ChartData::Bar {
                labels,
                values,
                horizontal,
                ..
            } => {
                assert!(*horizontal);
                assert_eq!(labels, &["UPS", "Solar"]);
                assert_eq!(values, &[2, 1]);
            }
            other => panic!("expected horizontal bar, got {other:?}"),
        }
        assert_eq!(block.summary, "UPS: 2, Solar: 1");
    }

    #[test]
    fn backup_type_chart_is_omitted_when_only_placeholders_remain() {
        let t = table(&[(q::BACKUP_TYPE, &["-", "-", "  ", ""])]);
        let def = def_for(q::BACKUP_TYPE);
        assert!(categorical_chart(&t, &Theme::default(), &def).unwrap().is_none());
    }

    #[test]
    fn backup_duration_chart_is_omitted_without_positive_values() {
        let t = table(&[(q::BACKUP_DURATION, &["0", "-", "", "bad"])]);
        assert!(backup_duration_chart(&t).unwrap().is_none());
    }

    #[test]
    fn empty_stability_column_keeps_chart_with_fallback_summary() {
        let t = table(&[(q::STABILITY, &["", "", ""])]);
        let def = def_for(q::STABILITY);
        let block = categorical_chart(&t, &Theme::default(), &def).unwrap().unwrap();
        match &block.spec.data {
            ChartData::Pie { labels, .. } => assert!(labels.is_empty()),
            other => panic!("expected pie, got {other:?}"),
        }
        assert_eq!(block.summary, "No stability data.");
    }

    #[test]
    fn placeholder_layout_carries_annotation_and_no_traces() {
        let block = placeholder_block("t", 400, "nothing here", "s");
        let theme = Theme::default();
        assert_eq!(block.spec.traces_json(&theme), json!([]));
        let layout = block.spec.layout_json(&theme);
        assert_eq!(layout["annotations"][0]["text"], json!("nothing here"));
    }

    #[test]
    fn pie_trace_encodes_donut_and_text_options() {
        let blocks = build_all_charts(&full_fixture(), &Theme::default()).unwrap();
        let traces = blocks[0].spec.traces_json(&Theme::default());
        assert_eq!(traces[0]["type"], json!("pie"));
        assert_eq!(traces[0]["hole"], json!(0.4));
        assert_eq!(traces[0]["textinfo"], json!("label+value+percent"));
    }
}
