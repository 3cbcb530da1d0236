//! # Form Session
//!
//! Holds the current label form and applies one user event at a time.
//!
//! ## Event Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Protocol (JSON lines)                        │
//! │                                                                         │
//! │  stdin                              stdout                              │
//! │  ─────                              ──────                              │
//! │                                     {"view":{"warning":"Por favor..."}} │
//! │  {"event":"setProvince",                                               │
//! │   "value":"Córdoba"}         ──►    {"view":{"warning":"Por favor..."}} │
//! │  {"event":"setPrice",                                                  │
//! │   "value":"$1.234,50"}       ──►    {"view":{"prices":{...},           │
//! │                                              "width":720,...}}          │
//! │  {"event":"setScale",                                                  │
//! │   "value":9}                 ──►    {"error":{"code":"INVALID_INPUT"}} │
//! │  {"event":"rate",                                                      │
//! │   "value":"Buena"}           ──►    {"view":{...,"message":"Calif.."}} │
//! │                                                                         │
//! │  Each form event = exactly one recomputation of the label.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use etiquetas_core::{ColorSlot, FormattedPrices, Rating, Rgb, TaxRate, Unit};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::feedback::submit_rating;
use super::label::{download_label, preview_label, DownloadOutcome, LabelForm, LabelOutcome};
use crate::error::ApiError;
use crate::state::{AssetState, LogState};

// =============================================================================
// Events and Views
// =============================================================================

/// New value for one colour of the label.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorChange {
    pub slot: ColorSlot,
    pub color: Rgb,
}

/// One user interaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "value", rename_all = "camelCase")]
pub enum SessionEvent {
    SetProduct(String),
    SetProvince(String),
    SetPrice(String),
    SetTaxRate(TaxRate),
    SetUnit(Unit),
    SetQuantity(Option<f64>),
    SetColor(ColorChange),
    SetScale(f64),
    /// Save the current label to a path.
    Download(PathBuf),
    Rate(Rating),
}

/// What the form shows after an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prices: Option<FormattedPrices>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SessionView {
    fn warning(message: String) -> Self {
        SessionView {
            warning: Some(message),
            ..SessionView::default()
        }
    }

    fn label(prices: FormattedPrices, width: u32, height: u32) -> Self {
        SessionView {
            prices: Some(prices),
            width: Some(width),
            height: Some(height),
            ..SessionView::default()
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum SessionReply<'a> {
    View(&'a SessionView),
    Error(&'a ApiError),
}

// =============================================================================
// Session
// =============================================================================

/// The label form and the state its events need.
pub struct FormSession<'a> {
    assets: &'a AssetState,
    logs: &'a LogState,
    form: LabelForm,
    view: SessionView,
}

impl<'a> FormSession<'a> {
    /// Starts a session with an empty form.
    pub fn new(assets: &'a AssetState, logs: &'a LogState) -> Self {
        FormSession {
            assets,
            logs,
            form: LabelForm::default(),
            view: SessionView::default(),
        }
    }

    /// Current form values.
    pub fn form(&self) -> &LabelForm {
        &self.form
    }

    /// Recomputes the label from the current form.
    pub fn refresh(&mut self) -> Result<SessionView, ApiError> {
        self.view = match preview_label(self.assets, &self.form)? {
            LabelOutcome::Warning(message) => SessionView::warning(message),
            LabelOutcome::Ready(preview) => SessionView::label(preview.prices, preview.width, preview.height),
        };
        Ok(self.view.clone())
    }

    /// Applies one event.
    ///
    /// Form edits are kept even when the recomputation fails, so the next
    /// edit can fix them.
    pub fn apply(&mut self, event: SessionEvent) -> Result<SessionView, ApiError> {
        debug!(?event, "Session event");

        match event {
            SessionEvent::SetProduct(name) => self.form.product_name = name,
            SessionEvent::SetProvince(province) => self.form.province = province,
            SessionEvent::SetPrice(price) => self.form.price.raw_price = price,
            SessionEvent::SetTaxRate(rate) => self.form.price.tax_rate = rate,
            SessionEvent::SetUnit(unit) => self.form.price.unit = unit,
            SessionEvent::SetQuantity(quantity) => self.form.price.quantity = quantity,
            SessionEvent::SetColor(change) => self.form.style.set_color(change.slot, change.color),
            SessionEvent::SetScale(scale) => self.form.style.scale = scale,
            SessionEvent::Download(path) => return self.download(path),
            SessionEvent::Rate(rating) => return Ok(self.rate(rating)),
        }

        self.refresh()
    }

    fn download(&mut self, path: PathBuf) -> Result<SessionView, ApiError> {
        self.view = match download_label(self.assets, self.logs, &self.form, &path)? {
            DownloadOutcome::Warning(message) => SessionView::warning(message),
            DownloadOutcome::Saved {
                path,
                prices,
                width,
                height,
                ..
            } => SessionView {
                message: Some(format!("Etiqueta guardada en {}", path.display())),
                ..SessionView::label(prices, width, height)
            },
        };
        Ok(self.view.clone())
    }

    fn rate(&mut self, rating: Rating) -> SessionView {
        let receipt = submit_rating(self.logs, rating);
        SessionView {
            message: receipt.message,
            ..self.view.clone()
        }
    }
}

// =============================================================================
// JSON Lines Driver
// =============================================================================

/// Runs a session over JSON lines until `input` ends.
///
/// The first line written is the view of the empty form. Every non-blank
/// input line produces exactly one output line, `{"view":..}` or
/// `{"error":..}`.
pub fn run_session<R: BufRead, W: Write>(session: &mut FormSession<'_>, input: R, mut output: W) -> io::Result<()> {
    let initial = session.refresh();
    write_reply(&mut output, &initial)?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let result = serde_json::from_str::<SessionEvent>(line)
            .map_err(|e| ApiError::invalid_input(format!("Invalid event: {}", e)))
            .and_then(|event| session.apply(event));

        if let Err(err) = &result {
            warn!(error = %err, "Session event rejected");
        }
        write_reply(&mut output, &result)?;
    }

    debug!("Session input closed");
    Ok(())
}

fn write_reply<W: Write>(output: &mut W, result: &Result<SessionView, ApiError>) -> io::Result<()> {
    let reply = match result {
        Ok(view) => SessionReply::View(view),
        Err(err) => SessionReply::Error(err),
    };
    serde_json::to_writer(&mut *output, &reply)?;
    writeln!(output)?;
    output.flush()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::commands::testing::stub_assets;
    use crate::error::ErrorCode;
    use etiquetas_core::INVALID_FORM_WARNING;

    fn event(json: &str) -> SessionEvent {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_event_deserialization() {
        assert_eq!(
            event(r#"{"event":"setProvince","value":"Jujuy"}"#),
            SessionEvent::SetProvince("Jujuy".to_string())
        );
        assert_eq!(
            event(r#"{"event":"setTaxRate","value":"10.5%"}"#),
            SessionEvent::SetTaxRate(TaxRate::Reduced)
        );
        assert_eq!(event(r#"{"event":"setQuantity","value":null}"#), SessionEvent::SetQuantity(None));
        assert_eq!(
            event(r##"{"event":"setColor","value":{"slot":"innerBorder","color":"#ff0000"}}"##),
            SessionEvent::SetColor(ColorChange {
                slot: ColorSlot::InnerBorder,
                color: Rgb::new(255, 0, 0)
            })
        );
        assert_eq!(event(r#"{"event":"rate","value":"Muy mala"}"#), SessionEvent::Rate(Rating::VeryPoor));
    }

    #[test]
    fn test_session_fills_form_step_by_step() {
        let dir = tempfile::tempdir().unwrap();
        let assets = stub_assets();
        let logs = LogState::open_in(dir.path(), Duration::ZERO).unwrap();
        let mut session = FormSession::new(&assets, &logs);

        let view = session.apply(SessionEvent::SetProduct("Aceite".to_string())).unwrap();
        assert_eq!(view.warning.as_deref(), Some(INVALID_FORM_WARNING));

        let view = session.apply(SessionEvent::SetProvince("Chaco".to_string())).unwrap();
        assert!(view.warning.is_some());

        let view = session.apply(SessionEvent::SetPrice("2.420".to_string())).unwrap();
        assert_eq!(view.warning, None);
        assert_eq!(view.prices.as_ref().unwrap().final_price, "2.420,00");
        assert_eq!(view.prices.as_ref().unwrap().price_excl_tax, "2.000,00");
        assert_eq!((view.width, view.height), (Some(720), Some(300)));

        let view = session.apply(SessionEvent::SetTaxRate(TaxRate::Exempt)).unwrap();
        assert_eq!(view.prices.unwrap().price_excl_tax, "2.420,00");
    }

    #[test]
    fn test_rejected_event_keeps_edit() {
        let dir = tempfile::tempdir().unwrap();
        let assets = stub_assets();
        let logs = LogState::open_in(dir.path(), Duration::ZERO).unwrap();
        let mut session = FormSession::new(&assets, &logs);
        session.apply(SessionEvent::SetProvince("Chaco".to_string())).unwrap();
        session.apply(SessionEvent::SetPrice("100".to_string())).unwrap();

        let err = session.apply(SessionEvent::SetScale(9.0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(session.form().style.scale, 9.0);

        let view = session.apply(SessionEvent::SetScale(2.0)).unwrap();
        assert_eq!((view.width, view.height), (Some(1440), Some(600)));
    }

    #[test]
    fn test_download_and_rate_events() {
        let dir = tempfile::tempdir().unwrap();
        let assets = stub_assets();
        let logs = LogState::open_in(dir.path(), Duration::ZERO).unwrap();
        let mut session = FormSession::new(&assets, &logs);
        let path = dir.path().join("out.png");

        let view = session.apply(SessionEvent::Download(path.clone())).unwrap();
        assert!(view.warning.is_some());
        assert!(!path.exists());

        session.apply(SessionEvent::SetProvince("Neuquén".to_string())).unwrap();
        session.apply(SessionEvent::SetPrice("500".to_string())).unwrap();
        let view = session.apply(SessionEvent::Download(path.clone())).unwrap();
        assert!(view.message.unwrap().contains("out.png"));
        assert!(path.exists());
        assert_eq!(logs.provinces().read_all().unwrap()[0].field, "Neuquén");

        let view = session.apply(SessionEvent::Rate(Rating::Good)).unwrap();
        assert_eq!(view.message.as_deref(), Some("Calificación enviada exitosamente!"));
        assert_eq!(view.prices.unwrap().final_price, "500,00");
        assert_eq!(logs.ratings().read_all().unwrap()[0].field, "Buena");
    }

    #[test]
    fn test_run_session_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let assets = stub_assets();
        let logs = LogState::open_in(dir.path(), Duration::ZERO).unwrap();
        let mut session = FormSession::new(&assets, &logs);

        let input = concat!(
            "{\"event\":\"setProvince\",\"value\":\"Misiones\"}\n",
            "\n",
            "{\"event\":\"setPrice\",\"value\":\"121\"}\n",
            "not json\n",
        );
        let mut output = Vec::new();
        run_session(&mut session, input.as_bytes(), &mut output).unwrap();

        let lines: Vec<serde_json::Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0]["view"]["warning"].is_string());
        assert!(lines[1]["view"]["warning"].is_string());
        assert_eq!(lines[2]["view"]["prices"]["priceExclTax"], "100,00");
        assert_eq!(lines[3]["error"]["code"], "INVALID_INPUT");
    }
}
