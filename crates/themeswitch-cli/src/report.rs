//! Rendering of the outcome of one `themectl` run.

use std::path::PathBuf;

use console::Style;
use serde::Serialize;
use themeswitch::{ColorMode, ThemePreference};

use crate::cli::OutputMode;

/// State of the page and store after a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeReport {
    pub preference: ThemePreference,
    pub effective: ColorMode,
    /// Raw value in the store, exactly as written.
    pub stored: Option<String>,
    pub store_path: PathBuf,
    pub page_default: Option<ThemePreference>,
    pub active_options: Vec<String>,
    pub visible_icons: Vec<String>,
    /// Change events dispatched during the run.
    pub events: usize,
}

/// Renders `report` in the requested mode.
pub fn render(report: &ThemeReport, mode: OutputMode) -> serde_json::Result<String> {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(report),
        OutputMode::Term => Ok(render_text(report, true)),
        OutputMode::Text => Ok(render_text(report, false)),
        OutputMode::Auto => Ok(render_text(report, console::colors_enabled())),
    }
}

fn render_text(report: &ThemeReport, styled: bool) -> String {
    let label = Style::new().dim().force_styling(styled);
    let value = Style::new().bold().force_styling(styled);
    let mode = if report.effective.is_dark() {
        Style::new().blue().bold()
    } else {
        Style::new().yellow().bold()
    }
    .force_styling(styled);

    let selector = ThemePreference::ALL
        .iter()
        .map(|pref| {
            let name = pref.as_str();
            if report.active_options.iter().any(|o| o == name) {
                format!("[{}]", value.apply_to(name))
            } else {
                name.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    let mut lines = vec![
        format!("{} {}", label.apply_to("preference:"), value.apply_to(report.preference)),
        format!("{}  {}", label.apply_to("effective:"), mode.apply_to(report.effective)),
        format!(
            "{}     {}",
            label.apply_to("stored:"),
            report.stored.as_deref().unwrap_or("(none)")
        ),
        format!("{}      {}", label.apply_to("store:"), report.store_path.display()),
    ];
    if let Some(declared) = report.page_default {
        lines.push(format!("{}  {}", label.apply_to("declared:"), declared));
    }
    lines.push(format!("{}   {}", label.apply_to("selector:"), selector));
    lines.push(format!(
        "{}       {}",
        label.apply_to("icon:"),
        report.visible_icons.join(", ")
    ));
    lines.push(format!("{}     {}", label.apply_to("events:"), report.events));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> ThemeReport {
        ThemeReport {
            preference: ThemePreference::Auto,
            effective: ColorMode::Dark,
            stored: Some("auto".into()),
            store_path: PathBuf::from("/tmp/prefs.json"),
            page_default: None,
            active_options: vec!["auto".into()],
            visible_icons: vec!["theme-icon-auto".into()],
            events: 1,
        }
    }

    #[test]
    fn test_text_output_is_plain() {
        let out = render(&report(), OutputMode::Text).unwrap();
        assert!(!out.contains('\x1b'));
        assert!(out.contains("preference: auto"));
        assert!(out.contains("effective:  dark"));
        assert!(out.contains("light dark [auto]"));
        assert!(out.contains("theme-icon-auto"));
        assert!(!out.contains("declared:"));
    }

    #[test]
    fn test_term_output_is_styled() {
        let out = render(&report(), OutputMode::Term).unwrap();
        assert!(out.contains("\x1b["));
    }

    #[test]
    fn test_declared_default_shown() {
        let mut r = report();
        r.page_default = Some(ThemePreference::Light);
        let out = render(&r, OutputMode::Text).unwrap();
        assert!(out.contains("declared:  light"));
    }

    #[test]
    fn test_json_output() {
        let out = render(&report(), OutputMode::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["preference"], "auto");
        assert_eq!(value["effective"], "dark");
        assert_eq!(value["stored"], "auto");
        assert_eq!(value["events"], 1);
        assert!(value["page_default"].is_null());
    }
}
