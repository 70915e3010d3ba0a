use std::fmt::{self, Formatter};

use dashboard_core::dashboard::{Callout, Chart, Dashboard, InformationPanel, StatCard};

const BAR_WIDTH: usize = 30;
const RULE: &str = "----------------------------------------";

/// Lay out a dashboard as plain text for a terminal.
pub fn render_text(dashboard: &Dashboard) -> String {
    TextDashboard(dashboard).to_string()
}

struct TextDashboard<'a>(&'a Dashboard);

impl fmt::Display for TextDashboard<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let dashboard = self.0;

        panel(f, &dashboard.panel)?;
        writeln!(f, "{RULE}")?;

        writeln!(f, "{}", dashboard.title)?;
        writeln!(
            f,
            "Last Updated at: {} ({})",
            dashboard.last_updated.format("%Y-%m-%d %H:%M"),
            dashboard.timezone
        )?;
        writeln!(f)?;

        callout(f, &dashboard.summary)?;
        writeln!(f)?;

        for card in &dashboard.stat_cards {
            stat_card(f, card)?;
        }
        if let Some(warning) = &dashboard.uv_warning {
            callout(f, warning)?;
        }

        writeln!(f, "{RULE}")?;

        for c in &dashboard.charts {
            chart(f, c)?;
        }
        Ok(())
    }
}

fn panel(f: &mut Formatter<'_>, panel: &InformationPanel) -> fmt::Result {
    writeln!(f, "{}", panel.city)?;
    writeln!(f, "Long/Lat: {}, {}", panel.longitude, panel.latitude)?;

    let condition = panel.condition.map(|c| c.description()).unwrap_or("-");
    let daylight = match panel.is_day {
        Some(true) => " (day)",
        Some(false) => " (night)",
        None => "",
    };
    writeln!(f, "{}°C  {condition}{daylight}", panel.temperature)?;

    if let Some(sunrise) = panel.sunrise {
        writeln!(f, "Sunrise: {}", sunrise.format("%H:%M"))?;
    }
    if let Some(sunset) = panel.sunset {
        writeln!(f, "Sunset:  {}", sunset.format("%H:%M"))?;
    }
    writeln!(f, "Timezone: {}", panel.timezone)
}

fn callout(f: &mut Formatter<'_>, callout: &Callout) -> fmt::Result {
    let marker = if callout.warning { "[!]" } else { "[i]" };
    writeln!(f, "{marker} {}", callout.message)
}

fn stat_card(f: &mut Formatter<'_>, card: &StatCard) -> fmt::Result {
    writeln!(f, "{:<22}{}", card.title, card.metric)
}

fn chart(f: &mut Formatter<'_>, chart: &Chart) -> fmt::Result {
    writeln!(f, "{}", chart.title)?;

    for series in &chart.series {
        writeln!(f, "  {}", series.name)?;
        if series.values.is_empty() {
            writeln!(f, "    (no data)")?;
            continue;
        }

        let max = series.values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        for (idx, value) in series.values.iter().enumerate() {
            let label = chart.labels.get(idx).map(String::as_str).unwrap_or("--:--");
            writeln!(f, "    {label} {value:>6.1} {}", bar(*value, max))?;
        }
    }
    writeln!(f)
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let len = ((value.abs() / max) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(len.min(BAR_WIDTH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::{Location, WeatherReport, build_dashboard, dashboard::DashboardOptions};

    fn dashboard(uv: f64) -> Dashboard {
        let report: WeatherReport = serde_json::from_value(serde_json::json!({
            "timezone": "GMT",
            "current_weather": {
                "temperature": 35.0, "windspeed": 10.0, "winddirection": 180.0,
                "weathercode": 0, "is_day": 1, "time": "2024-05-01T13:00"
            },
            "hourly": {
                "time": ["2024-05-01T00:00", "2024-05-01T01:00"],
                "temperature_2m": [20.0, 10.0],
                "precipitation_probability": [60, 0]
            },
            "daily": {
                "temperature_2m_max": [36.2],
                "temperature_2m_min": [19.0],
                "uv_index_max": [uv]
            }
        }))
        .unwrap();

        build_dashboard(
            report,
            &Location::new("Lahore", "31.5", "74.3"),
            &DashboardOptions { timezone: "GMT".into(), greeting: None },
        )
        .unwrap()
    }

    #[test]
    fn renders_sections() {
        let text = render_text(&dashboard(7.8));

        assert!(text.starts_with("Lahore\n"));
        assert!(text.contains("35°C  Clear sky (day)"));
        assert!(text.contains("Todays Overview"));
        assert!(text.contains("Last Updated at: 2024-05-01 13:00 (GMT)"));
        assert!(text.contains("[i] The current temperature outside is 35°C"));
        assert!(text.contains("Wind Speed            10.0m/s"));
        assert!(text.contains("[!] The UV is high today, be sure to wear SPF!"));
    }

    #[test]
    fn omits_warning_when_uv_is_moderate() {
        let text = render_text(&dashboard(6.0));
        assert!(!text.contains("[!]"));
    }

    #[test]
    fn charts_scale_bars_and_mark_missing_series() {
        let text = render_text(&dashboard(3.0));

        assert!(text.contains(&format!("    00:00   20.0 {}", "#".repeat(BAR_WIDTH))));
        assert!(text.contains(&format!("    01:00   10.0 {}", "#".repeat(BAR_WIDTH / 2))));
        assert!(text.contains("  Humidity (%)\n    (no data)"));
    }

    #[test]
    fn display_writes_through_formatter() {
        let d = dashboard(7.8);
        let mut out = String::new();
        fmt::Write::write_fmt(&mut out, format_args!("{}", TextDashboard(&d))).unwrap();

        assert_eq!(out, render_text(&d));
        assert!(out.ends_with("    (no data)\n\n"));
    }

    #[test]
    fn bar_handles_zero_max() {
        assert_eq!(bar(0.0, 0.0), "");
    }
}
