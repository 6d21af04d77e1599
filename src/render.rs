//! Terminal cards for a [`Dashboard`]

use std::fmt::Write;

use crossterm::style::Stylize;

use crate::aurora::{AuroraReport, SKY_NOTICE, VisibilityVerdict};
use crate::dashboard::Dashboard;
use crate::models::ForecastPeriod;
use crate::preferences::UserSettings;
use crate::weather::{DayCard, WeatherReport};

/// Heading style; follows the `darkmode` setting unless colours are off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
    Plain,
}

impl Theme {
    #[must_use]
    pub fn select(settings: &UserSettings, plain: bool) -> Self {
        if plain {
            Theme::Plain
        } else if settings.darkmode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    fn heading(self, text: &str) -> String {
        match self {
            Theme::Light => text.bold().to_string(),
            Theme::Dark => text.bold().cyan().to_string(),
            Theme::Plain => text.to_string(),
        }
    }

    fn alert(self, text: &str) -> String {
        let line = format!("! {text}");
        match self {
            Theme::Light => line.dark_red().to_string(),
            Theme::Dark => line.red().to_string(),
            Theme::Plain => line,
        }
    }
}

/// Styled output only goes to a terminal, and `NO_COLOR` (any non-empty value) turns it off.
#[must_use]
pub fn use_styling(stdout_is_terminal: bool, no_color: Option<&str>) -> bool {
    stdout_is_terminal && no_color.is_none_or(str::is_empty)
}

fn write_period(out: &mut String, period: &ForecastPeriod) {
    let _ = writeln!(out, "  Forecast: {}", period.short_forecast);
    let _ = writeln!(out, "  Temp: {}", period.format_temperature());
    let _ = writeln!(out, "  Precipitation Chance: {}", period.format_precipitation());
    let _ = writeln!(out, "  Wind Direction: {}", period.wind_direction);
    let _ = writeln!(out, "  Wind Speed: {}", period.wind_speed);
    if !period.icon.is_empty() {
        let _ = writeln!(out, "  Icon: {}", period.icon);
    }
}

fn write_day_card(out: &mut String, title: &str, card: &DayCard, theme: Theme) {
    let _ = writeln!(out, "{}", theme.heading(title));
    write_period(out, &card.period);
    if let Some(night) = &card.night {
        let _ = writeln!(out, "  At Night:");
        write_period(out, night);
    }
}

#[must_use]
pub fn render_weather(report: &WeatherReport, theme: Theme) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        theme.heading(&format!("Location: {}", report.location_name))
    );
    let _ = writeln!(out);
    write_day_card(&mut out, "Current Weather", &report.current, theme);

    for card in &report.forecast {
        let _ = writeln!(out);
        write_day_card(&mut out, &card.period.name, card, theme);
    }
    out
}

#[must_use]
pub fn render_aurora(report: &AuroraReport, theme: Theme) -> String {
    let mut out = String::new();
    let reading = &report.reading;
    let _ = writeln!(out, "{}", theme.heading("Current Solar Weather:"));
    let _ = writeln!(out, "  KP Index: {}", reading.kp_index);
    let _ = writeln!(out, "  Estimated KP Index: {}", reading.estimated_kp);
    let _ = writeln!(out, "  Date: {}", reading.format_date());
    let _ = writeln!(out, "  Time: {} UTC", reading.format_time());
    let _ = writeln!(
        out,
        "  Aurora Visibility: {}",
        report.verdict.as_ref().map_or("", VisibilityVerdict::message)
    );
    let _ = writeln!(out, "  {SKY_NOTICE}");
    out
}

/// Alerts first, then the weather card, then the solar card.
#[must_use]
pub fn render_dashboard(dashboard: &Dashboard, theme: Theme) -> String {
    let mut sections = Vec::new();

    if !dashboard.alerts.is_empty() {
        let alerts: Vec<String> = dashboard.alerts.iter().map(|a| theme.alert(a)).collect();
        sections.push(alerts.join("\n") + "\n");
    }
    if let Some(weather) = &dashboard.weather {
        sections.push(render_weather(weather, theme));
    }
    if let Some(aurora) = &dashboard.aurora {
        sections.push(render_aurora(aurora, theme));
    }

    sections.join("\n")
}
