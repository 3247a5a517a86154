//! Chart.js configurations for the dashboard
//!
//! Each chart validates its data on construction and produces the JSON
//! configuration handed to Chart.js together with the canvas it mounts on.

use crate::error::{ChartError, ChartResult};
use crate::format::escape_html;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Pie slice colors, reused in order when there are more slices
pub const DEPARTMENT_PALETTE: [&str; 8] = [
    "#3B82F6", "#6366F1", "#8B5CF6", "#A855F7", "#EC4899", "#F43F5E", "#F97316", "#EAB308",
];

pub const ATTENDANCE_COLOR: &str = "#3B82F6";

pub const MICRO_CHART_COLOR: &str = "#6366f1";

/// A chart that can be mounted on a canvas
pub trait Chart {
    fn container_id(&self) -> &str;

    /// Chart.js configuration object
    fn config(&self) -> Value;

    fn canvas(&self) -> String {
        format!(r#"<canvas id="{}"></canvas>"#, escape_html(self.container_id()))
    }
}

fn require_container(chart: &'static str, container_id: &str) -> ChartResult<()> {
    if container_id.trim().is_empty() {
        return Err(ChartError::MissingContainer { chart });
    }
    Ok(())
}

/// Average attendance per semester as a bar chart
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceChart {
    container_id: String,
    semesters: Vec<String>,
    percentages: Vec<f64>,
}

impl AttendanceChart {
    pub fn new(
        container_id: impl Into<String>,
        semesters: Vec<String>,
        percentages: Vec<f64>,
    ) -> ChartResult<Self> {
        let container_id = container_id.into();
        require_container("AttendanceChart", &container_id)?;

        if semesters.len() != percentages.len() {
            return Err(ChartError::LengthMismatch {
                labels: "Semesters",
                values: "attendancePercentages",
            });
        }
        if let Some((index, &value)) = percentages
            .iter()
            .enumerate()
            .find(|(_, p)| !(p.is_finite() && (0.0..=100.0).contains(*p)))
        {
            return Err(ChartError::PercentageOutOfRange { index, value });
        }

        Ok(Self {
            container_id,
            semesters,
            percentages,
        })
    }

    pub fn semesters(&self) -> &[String] {
        &self.semesters
    }

    pub fn percentages(&self) -> &[f64] {
        &self.percentages
    }

    /// Tooltip text for a bar
    pub fn tooltip_label(&self, index: usize) -> Option<String> {
        self.percentages.get(index).map(|p| format!("{p}%"))
    }
}

impl Chart for AttendanceChart {
    fn container_id(&self) -> &str {
        &self.container_id
    }

    fn config(&self) -> Value {
        json!({
            "type": "bar",
            "data": {
                "labels": self.semesters,
                "datasets": [{
                    "label": "Average Attendance %",
                    "data": self.percentages,
                    "backgroundColor": ATTENDANCE_COLOR,
                    "borderRadius": 8,
                    "borderSkipped": false,
                }],
            },
            "options": {
                "responsive": true,
                "maintainAspectRatio": true,
                "scales": {
                    "y": { "beginAtZero": true, "max": 100 },
                },
                "plugins": {
                    "legend": { "display": false },
                },
            },
        })
    }
}

/// Students per department as a pie chart
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentDistributionChart {
    container_id: String,
    departments: Vec<String>,
    counts: Vec<u64>,
}

/// 2^64, the first whole value a `u64` count cannot hold
const COUNT_LIMIT: f64 = 18_446_744_073_709_551_616.0;

impl DepartmentDistributionChart {
    /// Counts arrive as JSON numbers and must be whole and non-negative
    pub fn new(
        container_id: impl Into<String>,
        departments: Vec<String>,
        counts: Vec<f64>,
    ) -> ChartResult<Self> {
        let container_id = container_id.into();
        require_container("DepartmentDistributionChart", &container_id)?;

        if departments.len() != counts.len() {
            return Err(ChartError::LengthMismatch {
                labels: "Departments",
                values: "studentCounts",
            });
        }
        let counts = counts
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                if value.is_finite()
                    && value >= 0.0
                    && value.fract() == 0.0
                    && value < COUNT_LIMIT
                {
                    Ok(value as u64)
                } else {
                    Err(ChartError::InvalidCount { index, value })
                }
            })
            .collect::<ChartResult<Vec<u64>>>()?;

        Ok(Self {
            container_id,
            departments,
            counts,
        })
    }

    /// Build from already-typed counts
    pub fn from_counts(
        container_id: impl Into<String>,
        entries: impl IntoIterator<Item = (String, u64)>,
    ) -> ChartResult<Self> {
        let container_id = container_id.into();
        require_container("DepartmentDistributionChart", &container_id)?;
        let (departments, counts) = entries.into_iter().unzip();
        Ok(Self {
            container_id,
            departments,
            counts,
        })
    }

    /// Sum of all counts, widened so it cannot overflow
    pub fn total(&self) -> u128 {
        self.counts.iter().map(|&count| u128::from(count)).sum()
    }

    /// Slice colors, cycling through the palette
    pub fn colors(&self) -> Vec<&'static str> {
        DEPARTMENT_PALETTE
            .iter()
            .copied()
            .cycle()
            .take(self.departments.len())
            .collect()
    }

    /// Tooltip text for a slice: `Name: N (P.P%)`
    pub fn tooltip_label(&self, index: usize) -> Option<String> {
        let label = self.departments.get(index)?;
        let value = *self.counts.get(index)?;
        let total = self.total();
        let percentage = if total == 0 {
            0.0
        } else {
            value as f64 / total as f64 * 100.0
        };
        Some(format!("{label}: {value} ({percentage:.1}%)"))
    }
}

impl Chart for DepartmentDistributionChart {
    fn container_id(&self) -> &str {
        &self.container_id
    }

    fn config(&self) -> Value {
        json!({
            "type": "pie",
            "data": {
                "labels": self.departments,
                "datasets": [{
                    "data": self.counts,
                    "backgroundColor": self.colors(),
                    "borderColor": "#ffffff",
                    "borderWidth": 2,
                }],
            },
            "options": {
                "responsive": true,
                "maintainAspectRatio": true,
                "plugins": {
                    "legend": {
                        "position": "bottom",
                        "labels": { "padding": 15, "font": { "size": 12 } },
                    },
                },
            },
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MicroChartKind {
    #[default]
    Line,
    Bar,
    /// A line with a gradient fill
    Sparkline,
}

impl MicroChartKind {
    /// Chart.js chart type
    pub fn chart_type(&self) -> &'static str {
        match self {
            Self::Line | Self::Sparkline => "line",
            Self::Bar => "bar",
        }
    }
}

static MICRO_CHART_IDS: AtomicUsize = AtomicUsize::new(1);

/// Small inline trend chart without axes, legend or tooltips
#[derive(Debug, Clone, PartialEq)]
pub struct MicroChart {
    id: String,
    kind: MicroChartKind,
    data: Vec<f64>,
    color: String,
    height: u32,
    gradient: bool,
    animated: bool,
}

impl MicroChart {
    pub fn new(kind: MicroChartKind, data: Vec<f64>) -> Self {
        Self {
            id: format!("micro-chart-{}", MICRO_CHART_IDS.fetch_add(1, Ordering::Relaxed)),
            kind,
            data,
            color: MICRO_CHART_COLOR.to_string(),
            height: 40,
            gradient: kind == MicroChartKind::Sparkline,
            animated: true,
        }
    }

    pub fn line(data: Vec<f64>) -> Self {
        Self::new(MicroChartKind::Line, data)
    }

    pub fn bar(data: Vec<f64>) -> Self {
        Self::new(MicroChartKind::Bar, data)
    }

    pub fn sparkline(data: Vec<f64>) -> Self {
        Self::new(MicroChartKind::Sparkline, data)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Hex color such as `#10b981`
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn with_gradient(mut self, gradient: bool) -> Self {
        self.gradient = gradient;
        self
    }

    pub fn with_animation(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    pub fn kind(&self) -> MicroChartKind {
        self.kind
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fill for the dataset: a top-to-bottom fade of the line color
    fn background(&self) -> Value {
        if self.gradient {
            json!({
                "type": "linear-gradient",
                "height": self.height,
                "stops": [
                    [0, format!("{}40", self.color)],
                    [1, format!("{}00", self.color)],
                ],
            })
        } else {
            json!("transparent")
        }
    }

    /// Container markup holding the canvas
    pub fn render(&self) -> String {
        format!(
            r#"<div class="micro-chart-container" style="height: {h}px;"><canvas id="{id}" height="{h}"></canvas></div>"#,
            h = self.height,
            id = escape_html(&self.id),
        )
    }
}

impl Chart for MicroChart {
    fn container_id(&self) -> &str {
        &self.id
    }

    fn config(&self) -> Value {
        let labels = vec![""; self.data.len()];
        let duration = if self.animated { 750 } else { 0 };
        json!({
            "type": self.kind.chart_type(),
            "data": {
                "labels": labels,
                "datasets": [{
                    "data": self.data,
                    "borderColor": self.color,
                    "backgroundColor": self.background(),
                    "borderWidth": 2,
                    "tension": 0.4,
                    "pointRadius": 0,
                    "pointHoverRadius": 0,
                    "fill": self.gradient,
                }],
            },
            "options": {
                "responsive": true,
                "maintainAspectRatio": false,
                "animation": {
                    "duration": duration,
                    "easing": "easeInOutQuart",
                },
                "plugins": {
                    "legend": { "display": false },
                    "tooltip": { "enabled": false },
                },
                "scales": {
                    "x": { "display": false, "grid": { "display": false } },
                    "y": { "display": false, "grid": { "display": false } },
                },
                "elements": {
                    "line": { "borderWidth": 2 },
                    "bar": { "borderRadius": 4 },
                },
            },
        })
    }

    fn canvas(&self) -> String {
        self.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn semesters(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("Sem {i}")).collect()
    }

    #[test]
    fn test_attendance_config() {
        let chart =
            AttendanceChart::new("attendance", semesters(3), vec![92.5, 88.0, 100.0]).unwrap();
        let config = chart.config();

        assert_eq!(config["type"], "bar");
        assert_eq!(config["data"]["labels"][2], "Sem 3");
        assert_eq!(config["data"]["datasets"][0]["data"][0], 92.5);
        assert_eq!(config["data"]["datasets"][0]["backgroundColor"], ATTENDANCE_COLOR);
        assert_eq!(config["options"]["scales"]["y"]["max"], 100);
        assert_eq!(config["options"]["plugins"]["legend"]["display"], false);
        assert_eq!(chart.tooltip_label(1).as_deref(), Some("88%"));
        assert_eq!(chart.canvas(), r#"<canvas id="attendance"></canvas>"#);
    }

    #[test]
    fn test_attendance_length_mismatch() {
        let err = AttendanceChart::new("a", semesters(2), vec![50.0]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Semesters and attendancePercentages arrays must have the same length"
        );
    }

    #[test]
    fn test_attendance_range() {
        for bad in [-0.1, 100.5, f64::NAN, f64::INFINITY] {
            let err = AttendanceChart::new("a", semesters(2), vec![50.0, bad]).unwrap_err();
            assert!(matches!(err, ChartError::PercentageOutOfRange { index: 1, .. }));
        }
        assert!(AttendanceChart::new("a", semesters(2), vec![0.0, 100.0]).is_ok());
        assert!(AttendanceChart::new("a", vec![], vec![]).is_ok());
    }

    #[test]
    fn test_missing_container() {
        let err = AttendanceChart::new(" ", vec![], vec![]).unwrap_err();
        assert_eq!(err, ChartError::MissingContainer { chart: "AttendanceChart" });
    }

    #[test]
    fn test_department_config() {
        let chart = DepartmentDistributionChart::new(
            "departments",
            vec!["Civil".into(), "Computer".into(), "Power".into()],
            vec![50.0, 30.0, 20.0],
        )
        .unwrap();
        let config = chart.config();

        assert_eq!(config["type"], "pie");
        assert_eq!(config["data"]["datasets"][0]["data"][0], 50);
        assert_eq!(config["data"]["datasets"][0]["backgroundColor"][1], "#6366F1");
        assert_eq!(config["options"]["plugins"]["legend"]["position"], "bottom");
        assert_eq!(chart.total(), 100);
    }

    #[test]
    fn test_department_tooltip() {
        let chart = DepartmentDistributionChart::new(
            "d",
            vec!["Civil".into(), "Computer".into()],
            vec![1.0, 2.0],
        )
        .unwrap();
        assert_eq!(chart.tooltip_label(0).as_deref(), Some("Civil: 1 (33.3%)"));
        assert_eq!(chart.tooltip_label(1).as_deref(), Some("Computer: 2 (66.7%)"));
        assert_eq!(chart.tooltip_label(2), None);

        let empty = DepartmentDistributionChart::new("d", vec!["Civil".into()], vec![0.0]).unwrap();
        assert_eq!(empty.tooltip_label(0).as_deref(), Some("Civil: 0 (0.0%)"));
    }

    #[test]
    fn test_department_large_counts() {
        let chart = DepartmentDistributionChart::new(
            "d",
            vec!["A".into(), "B".into()],
            vec![1e19, 1e19],
        )
        .unwrap();
        assert_eq!(chart.total(), 20_000_000_000_000_000_000);
        assert_eq!(
            chart.tooltip_label(0).as_deref(),
            Some("A: 10000000000000000000 (50.0%)")
        );

        let full = DepartmentDistributionChart::from_counts(
            "d",
            [("A".to_string(), u64::MAX), ("B".to_string(), u64::MAX)],
        )
        .unwrap();
        assert_eq!(full.total(), 2 * u128::from(u64::MAX));
        assert_eq!(full.tooltip_label(1).as_deref(), Some(&*format!("B: {} (50.0%)", u64::MAX)));
    }

    #[test]
    fn test_department_invalid_counts() {
        let names = vec!["A".to_string(), "B".to_string()];
        for bad in [-1.0, 2.5, f64::NAN] {
            let err =
                DepartmentDistributionChart::new("d", names.clone(), vec![3.0, bad]).unwrap_err();
            assert!(matches!(err, ChartError::InvalidCount { index: 1, .. }));
        }

        let err = DepartmentDistributionChart::new("d", names.clone(), vec![3.0, 2e19])
            .unwrap_err();
        assert!(matches!(err, ChartError::InvalidCount { index: 1, .. }));

        let err = DepartmentDistributionChart::new("d", names, vec![1.0]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Departments and studentCounts arrays must have the same length"
        );
    }

    #[test]
    fn test_palette_cycles() {
        let entries = (0..10).map(|i| (format!("Dept {i}"), 1));
        let chart = DepartmentDistributionChart::from_counts("d", entries).unwrap();
        let colors = chart.colors();
        assert_eq!(colors.len(), 10);
        assert_eq!(colors[8], DEPARTMENT_PALETTE[0]);
        assert_eq!(colors[9], DEPARTMENT_PALETTE[1]);
    }

    #[test]
    fn test_micro_chart_line() {
        let chart = MicroChart::line(vec![1.0, 3.0, 2.0]).with_id("trend");
        let config = chart.config();

        assert_eq!(config["type"], "line");
        assert_eq!(config["data"]["labels"].as_array().unwrap().len(), 3);
        assert_eq!(config["data"]["datasets"][0]["borderColor"], MICRO_CHART_COLOR);
        assert_eq!(config["data"]["datasets"][0]["backgroundColor"], "transparent");
        assert_eq!(config["data"]["datasets"][0]["fill"], false);
        assert_eq!(config["options"]["animation"]["duration"], 750);
        assert_eq!(config["options"]["plugins"]["tooltip"]["enabled"], false);
        assert_eq!(
            chart.render(),
            r#"<div class="micro-chart-container" style="height: 40px;"><canvas id="trend" height="40"></canvas></div>"#
        );
    }

    #[test]
    fn test_sparkline_has_gradient() {
        let chart = MicroChart::sparkline(vec![5.0, 6.0])
            .with_color("#10b981")
            .with_animation(false);
        let config = chart.config();

        assert_eq!(config["type"], "line");
        assert_eq!(config["data"]["datasets"][0]["fill"], true);
        let stops = &config["data"]["datasets"][0]["backgroundColor"]["stops"];
        assert_eq!(stops[0][1], "#10b98140");
        assert_eq!(stops[1][1], "#10b98100");
        assert_eq!(config["options"]["animation"]["duration"], 0);
    }

    #[test]
    fn test_micro_chart_ids_unique() {
        let a = MicroChart::bar(vec![]);
        let b = MicroChart::bar(vec![]);
        assert_ne!(a.container_id(), b.container_id());
        assert_eq!(a.config()["type"], "bar");
        assert!(a.config()["data"]["datasets"][0]["data"].as_array().unwrap().is_empty());
    }
}
