//! Dashboard widgets rendered to HTML
//!
//! Every variant, size and color maps to a fixed Tailwind class set so the
//! same options always produce the same markup. Text is escaped.

use crate::charts::MicroChart;
use crate::format::escape_html;
use serde::{Deserialize, Serialize};

fn join_classes(parts: &[&str]) -> String {
    parts
        .iter()
        .copied()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn icon(name: &str, class: &str) -> String {
    format!(
        r#"<i data-lucide="{}" class="{class}"></i>"#,
        escape_html(name)
    )
}

/// Card header gradients
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gradient {
    #[default]
    Primary,
    Secondary,
    Accent,
    Success,
    Warning,
    Danger,
    Info,
}

impl Gradient {
    pub const ALL: [Gradient; 7] = [
        Self::Primary,
        Self::Secondary,
        Self::Accent,
        Self::Success,
        Self::Warning,
        Self::Danger,
        Self::Info,
    ];

    pub fn classes(&self) -> &'static str {
        match self {
            Self::Primary => "from-blue-600 to-indigo-700",
            Self::Secondary => "from-purple-600 to-pink-600",
            Self::Accent => "from-cyan-500 to-blue-500",
            Self::Success => "from-green-500 to-teal-500",
            Self::Warning => "from-amber-500 to-orange-500",
            Self::Danger => "from-red-500 to-pink-500",
            Self::Info => "from-blue-500 to-cyan-500",
        }
    }
}

/// Accent color of a card's icon and value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardColor {
    #[default]
    Blue,
    Indigo,
    Purple,
    Pink,
    Green,
    Teal,
    Cyan,
    Amber,
    Orange,
    Red,
}

/// Background and text classes for a [`CardColor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorClasses {
    pub bg: &'static str,
    pub text: &'static str,
    pub icon: &'static str,
}

impl CardColor {
    pub const ALL: [CardColor; 10] = [
        Self::Blue,
        Self::Indigo,
        Self::Purple,
        Self::Pink,
        Self::Green,
        Self::Teal,
        Self::Cyan,
        Self::Amber,
        Self::Orange,
        Self::Red,
    ];

    pub fn classes(&self) -> ColorClasses {
        let (bg, text) = match self {
            Self::Blue => ("bg-blue-100", "text-blue-600"),
            Self::Indigo => ("bg-indigo-100", "text-indigo-600"),
            Self::Purple => ("bg-purple-100", "text-purple-600"),
            Self::Pink => ("bg-pink-100", "text-pink-600"),
            Self::Green => ("bg-green-100", "text-green-600"),
            Self::Teal => ("bg-teal-100", "text-teal-600"),
            Self::Cyan => ("bg-cyan-100", "text-cyan-600"),
            Self::Amber => ("bg-amber-100", "text-amber-600"),
            Self::Orange => ("bg-orange-100", "text-orange-600"),
            Self::Red => ("bg-red-100", "text-red-600"),
        };
        ColorClasses { bg, text, icon: text }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

/// Percentage change shown next to a card's icon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub value: f64,
    pub direction: TrendDirection,
}

impl Trend {
    pub fn up(value: f64) -> Self {
        Self {
            value,
            direction: TrendDirection::Up,
        }
    }

    pub fn down(value: f64) -> Self {
        Self {
            value,
            direction: TrendDirection::Down,
        }
    }

    /// Text such as `+12.5%`
    pub fn label(&self) -> String {
        match self.direction {
            TrendDirection::Up => format!("+{}%", self.value),
            TrendDirection::Down => format!("{}%", self.value),
        }
    }

    pub fn render(&self) -> String {
        let (color, icon_name) = match self.direction {
            TrendDirection::Up => ("text-green-600", "trending-up"),
            TrendDirection::Down => ("text-red-600", "trending-down"),
        };
        format!(
            r#"<div class="flex items-center gap-1 text-sm {color} animate-fade-in">{}<span class="font-medium">{}</span></div>"#,
            icon(icon_name, "w-4 h-4"),
            self.label(),
        )
    }
}

/// A statistic card with icon, optional trend and micro chart
#[derive(Debug, Clone, PartialEq)]
pub struct PremiumCard {
    title: String,
    value: String,
    icon: String,
    gradient: Gradient,
    color: CardColor,
    trend: Option<Trend>,
    micro_chart: Option<MicroChart>,
    href: Option<String>,
}

impl PremiumCard {
    pub fn new(title: impl Into<String>, value: impl ToString) -> Self {
        Self {
            title: title.into(),
            value: value.to_string(),
            icon: "activity".to_string(),
            gradient: Gradient::default(),
            color: CardColor::default(),
            trend: None,
            micro_chart: None,
            href: None,
        }
    }

    /// Lucide icon name
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_gradient(mut self, gradient: Gradient) -> Self {
        self.gradient = gradient;
        self
    }

    pub fn with_color(mut self, color: CardColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_trend(mut self, trend: Trend) -> Self {
        self.trend = Some(trend);
        self
    }

    pub fn with_micro_chart(mut self, chart: MicroChart) -> Self {
        self.micro_chart = Some(chart);
        self
    }

    /// Make the card a link to a route, e.g. `#/students`
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn gradient(&self) -> Gradient {
        self.gradient
    }

    pub fn micro_chart(&self) -> Option<&MicroChart> {
        self.micro_chart.as_ref()
    }

    pub fn render(&self) -> String {
        let colors = self.color.classes();
        let cursor = if self.href.is_some() { "cursor-pointer" } else { "" };
        let class = join_classes(&["glass-card p-6 hover-lift", cursor, "animate-fade-in-up"]);
        let href = self
            .href
            .as_deref()
            .map(|h| format!(r#" data-href="{}""#, escape_html(h)))
            .unwrap_or_default();

        let mut html = format!(r#"<div class="{class}"{href}>"#);
        html.push_str(r#"<div class="flex items-center justify-between mb-4">"#);
        html.push_str(&format!(
            r#"<div class="w-14 h-14 {} rounded-xl flex items-center justify-center shadow-md animate-scale-in">{}</div>"#,
            colors.bg,
            icon(&self.icon, &format!("w-7 h-7 {}", colors.icon)),
        ));
        if let Some(trend) = &self.trend {
            html.push_str(&trend.render());
        }
        html.push_str("</div>");

        html.push_str(&format!(
            r#"<div class="space-y-1"><h3 class="text-3xl font-bold {} transition-all">{}</h3><p class="text-sm text-gray-600 dark:text-gray-400 font-medium">{}</p></div>"#,
            colors.text,
            escape_html(&self.value),
            escape_html(&self.title),
        ));

        if let Some(chart) = &self.micro_chart {
            html.push_str(&format!(r#"<div class="mt-4">{}</div>"#, chart.render()));
        }
        html.push_str("</div>");
        html
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Gradient,
    Success,
    Warning,
    Danger,
    Ghost,
    Outline,
}

impl ButtonVariant {
    pub const ALL: [ButtonVariant; 8] = [
        Self::Primary,
        Self::Secondary,
        Self::Gradient,
        Self::Success,
        Self::Warning,
        Self::Danger,
        Self::Ghost,
        Self::Outline,
    ];

    pub fn classes(&self) -> &'static str {
        match self {
            Self::Primary => {
                "bg-gradient-to-r from-blue-600 to-indigo-600 text-white hover:from-blue-700 hover:to-indigo-700 shadow-md hover:shadow-lg"
            }
            Self::Secondary => {
                "bg-gradient-to-r from-purple-600 to-pink-600 text-white hover:from-purple-700 hover:to-pink-700 shadow-md hover:shadow-lg"
            }
            Self::Gradient => {
                "bg-gradient-to-r from-cyan-500 to-blue-500 text-white hover:from-cyan-600 hover:to-blue-600 shadow-md hover:shadow-xl"
            }
            Self::Success => {
                "bg-gradient-to-r from-green-500 to-teal-500 text-white hover:from-green-600 hover:to-teal-600 shadow-md hover:shadow-lg"
            }
            Self::Warning => {
                "bg-gradient-to-r from-amber-500 to-orange-500 text-white hover:from-amber-600 hover:to-orange-600 shadow-md hover:shadow-lg"
            }
            Self::Danger => {
                "bg-gradient-to-r from-red-500 to-pink-500 text-white hover:from-red-600 hover:to-pink-600 shadow-md hover:shadow-lg"
            }
            Self::Ghost => {
                "bg-transparent text-gray-700 dark:text-gray-300 hover:bg-gray-100 dark:hover:bg-gray-800"
            }
            Self::Outline => {
                "bg-transparent border-2 border-blue-600 text-blue-600 hover:bg-blue-50 dark:hover:bg-blue-900/20"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl ButtonSize {
    pub fn classes(&self) -> &'static str {
        match self {
            Self::Sm => "px-4 py-2 text-sm",
            Self::Md => "px-6 py-3 text-base",
            Self::Lg => "px-8 py-4 text-lg",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconPosition {
    #[default]
    Left,
    Right,
}

/// A button with variant styling and a loading state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimatedButton {
    label: String,
    id: Option<String>,
    icon: Option<String>,
    icon_position: IconPosition,
    variant: ButtonVariant,
    size: ButtonSize,
    disabled: bool,
    loading: bool,
    full_width: bool,
    extra_class: String,
}

impl AnimatedButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn variant(label: impl Into<String>, variant: ButtonVariant) -> Self {
        Self::new(label).with_variant(variant)
    }

    pub fn with_variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>, position: IconPosition) -> Self {
        self.icon = Some(icon.into());
        self.icon_position = position;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.extra_class = class.into();
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn full_width(mut self, full_width: bool) -> Self {
        self.full_width = full_width;
        self
    }

    /// Disabled or loading buttons do not accept clicks
    pub fn is_inert(&self) -> bool {
        self.disabled || self.loading
    }

    /// Full class attribute value
    pub fn class(&self) -> String {
        let state = if self.is_inert() {
            "opacity-50 cursor-not-allowed"
        } else {
            "hover-lift cursor-pointer"
        };
        join_classes(&[
            "flex items-center justify-center gap-2",
            self.variant.classes(),
            self.size.classes(),
            if self.full_width { "w-full" } else { "" },
            state,
            &self.extra_class,
            "rounded-lg font-medium transition-all duration-200 ease-smooth",
        ])
    }

    pub fn render(&self) -> String {
        let mut html = String::from("<button");
        if let Some(id) = self.id.as_deref().filter(|id| !id.is_empty()) {
            html.push_str(&format!(r#" id="{}""#, escape_html(id)));
        }
        html.push_str(&format!(r#" class="{}""#, escape_html(&self.class())));
        if self.is_inert() {
            html.push_str(" disabled");
        }
        html.push('>');

        let icon_html = self
            .icon
            .as_deref()
            .filter(|_| !self.loading)
            .map(|name| icon(name, "w-5 h-5"));

        if self.loading {
            html.push_str(r#"<div class="loading-spinner"></div>"#);
        }
        if self.icon_position == IconPosition::Left {
            html.push_str(icon_html.as_deref().unwrap_or_default());
        }
        html.push_str(&format!("<span>{}</span>", escape_html(&self.label)));
        if self.icon_position == IconPosition::Right {
            html.push_str(icon_html.as_deref().unwrap_or_default());
        }
        html.push_str("</button>");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_button_variant_is_distinct() {
        let classes: Vec<_> = ButtonVariant::ALL.iter().map(ButtonVariant::classes).collect();
        for (i, a) in classes.iter().enumerate() {
            for b in &classes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_button_render_is_stable() {
        let button = AnimatedButton::variant("Save", ButtonVariant::Success);
        assert_eq!(button.render(), button.clone().render());
        assert_eq!(
            button.render(),
            format!(r#"<button class="{}"><span>Save</span></button>"#, button.class())
        );
    }

    #[test]
    fn test_button_class_composition() {
        let class = AnimatedButton::new("Go")
            .with_size(ButtonSize::Lg)
            .full_width(true)
            .with_class("mt-2")
            .class();
        assert!(class.starts_with("flex items-center justify-center gap-2 bg-gradient-to-r from-blue-600"));
        assert!(class.contains("px-8 py-4 text-lg w-full hover-lift cursor-pointer mt-2 rounded-lg"));
        assert!(!class.contains("  "));
    }

    #[test]
    fn test_button_loading_hides_icon() {
        let html = AnimatedButton::new("Upload")
            .with_icon("upload", IconPosition::Left)
            .loading(true)
            .render();
        assert!(html.contains("loading-spinner"));
        assert!(html.contains(" disabled>"));
        assert!(html.contains("opacity-50 cursor-not-allowed"));
        assert!(!html.contains("data-lucide"));
    }

    #[test]
    fn test_button_icon_positions() {
        let left = AnimatedButton::new("Next")
            .with_icon("arrow-right", IconPosition::Left)
            .render();
        let right = AnimatedButton::new("Next")
            .with_icon("arrow-right", IconPosition::Right)
            .render();
        assert!(left.find("data-lucide").unwrap() < left.find("<span>").unwrap());
        assert!(right.find("data-lucide").unwrap() > right.find("<span>").unwrap());
    }

    #[test]
    fn test_button_escapes_label_and_id() {
        let html = AnimatedButton::new("<script>")
            .with_id("a\"b")
            .disabled(true)
            .render();
        assert!(html.contains("<span>&lt;script&gt;</span>"));
        assert!(html.contains(r#"id="a&quot;b""#));
    }

    #[test]
    fn test_card_defaults() {
        let html = PremiumCard::new("Total Students", 1250).render();
        assert!(html.starts_with(r#"<div class="glass-card p-6 hover-lift animate-fade-in-up">"#));
        assert!(html.contains(r#"data-lucide="activity""#));
        assert!(html.contains("bg-blue-100"));
        assert!(html.contains(r#"<h3 class="text-3xl font-bold text-blue-600 transition-all">1250</h3>"#));
        assert!(html.contains("Total Students</p>"));
        assert!(!html.contains("mt-4"));
    }

    #[test]
    fn test_card_trend() {
        let up = PremiumCard::new("Alumni", 300).with_trend(Trend::up(12.5)).render();
        assert!(up.contains("text-green-600"));
        assert!(up.contains("trending-up"));
        assert!(up.contains("+12.5%"));

        let down = PremiumCard::new("Pending", 4).with_trend(Trend::down(3.0)).render();
        assert!(down.contains("text-red-600"));
        assert!(down.contains("trending-down"));
        assert!(down.contains(">3%<"));
    }

    #[test]
    fn test_card_link_and_chart() {
        let card = PremiumCard::new("Applications", 18)
            .with_color(CardColor::Amber)
            .with_icon("file-text")
            .with_href("#/applications")
            .with_micro_chart(MicroChart::sparkline(vec![1.0, 2.0]).with_id("apps-trend"));
        let html = card.render();

        assert!(html.contains("cursor-pointer"));
        assert!(html.contains(r##"data-href="#/applications""##));
        assert!(html.contains("text-amber-600"));
        assert!(html.contains(r#"<div class="mt-4"><div class="micro-chart-container""#));
        assert!(card.micro_chart().is_some());
    }

    #[test]
    fn test_color_and_gradient_tables() {
        for color in CardColor::ALL {
            let classes = color.classes();
            assert!(classes.bg.starts_with("bg-") && classes.bg.ends_with("-100"));
            assert_eq!(classes.text, classes.icon);
        }
        for gradient in Gradient::ALL {
            assert!(gradient.classes().starts_with("from-"));
        }
    }
}
