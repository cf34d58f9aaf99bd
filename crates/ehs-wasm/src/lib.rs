//! WebAssembly bindings for environmental safety recommendations.
//!
//! Exposes the evaluator to JavaScript and writes results into the page
//! through a DOM-backed [`DisplaySurface`].
//!
//! ```js
//! import init, { evaluate, render } from "./ehs_wasm.js";
//!
//! await init();
//! const rec = JSON.parse(evaluate(95, 10));
//! render(80, 45, 18.5, undefined);
//! ```

use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use ehs_core::{DisplaySurface, RenderOutcome, UiWriter, evaluate_readings};
use ehs_types::{Readings, Recommendation};

/// Initialize the WASM module (called automatically)
#[wasm_bindgen(start)]
pub fn init() {
    log("EHS WASM module initialized");
}

/// Log a message to the browser console
#[wasm_bindgen]
pub fn log(message: &str) {
    web_sys::console::log_1(&message.into());
}

fn warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

/// Evaluate readings and return the recommendation as JSON.
///
/// The object has `status`, `primaryAction`, `secondaryAction`, plus the
/// display helpers `label`, `statusClass`, and `accentColor`.
#[wasm_bindgen]
pub fn evaluate(
    noise: f64,
    exposure: f64,
    oxygen: Option<f64>,
    aqi: Option<f64>,
) -> Result<String, JsValue> {
    let recommendation = evaluate_readings(&readings(noise, exposure, oxygen, aqi));
    recommendation_json(&recommendation).map_err(|e| js_sys::Error::new(&e.to_string()).into())
}

/// Evaluate readings and write the result into the page.
///
/// Returns `false` when the recommendation panel or status element is not
/// on the page, in which case nothing is written.
#[wasm_bindgen]
pub fn render(noise: f64, exposure: f64, oxygen: Option<f64>, aqi: Option<f64>) -> bool {
    let recommendation = evaluate_readings(&readings(noise, exposure, oxygen, aqi));

    let Some(mut surface) = DomSurface::from_window() else {
        warn("No document available; skipping render");
        return false;
    };

    match UiWriter::default().render(&mut surface, &recommendation) {
        RenderOutcome::Rendered => true,
        RenderOutcome::Skipped => {
            warn("Recommendation panel or status element not found; nothing rendered");
            false
        }
    }
}

fn readings(noise: f64, exposure: f64, oxygen: Option<f64>, aqi: Option<f64>) -> Readings {
    Readings::new(noise, exposure)
        .with_oxygen(oxygen)
        .with_air_quality(aqi)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecommendationJson<'a> {
    #[serde(flatten)]
    recommendation: &'a Recommendation,
    label: String,
    status_class: &'static str,
    accent_color: &'static str,
}

fn recommendation_json(recommendation: &Recommendation) -> serde_json::Result<String> {
    let status = recommendation.status;
    serde_json::to_string(&RecommendationJson {
        recommendation,
        label: status.label(),
        status_class: status.css_class(),
        accent_color: status.accent_color(),
    })
}

/// Display surface backed by the page's `document`.
pub struct DomSurface {
    document: web_sys::Document,
}

impl DomSurface {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// Surface for the current window's document, if there is one.
    pub fn from_window() -> Option<Self> {
        web_sys::window()
            .and_then(|w| w.document())
            .map(Self::new)
    }
}

impl DisplaySurface for DomSurface {
    type Element = web_sys::Element;

    fn find(&self, id: &str) -> Option<Self::Element> {
        self.document.get_element_by_id(id)
    }

    fn set_text(&mut self, element: &Self::Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn clear_classes(&mut self, element: &Self::Element) {
        element.set_class_name("");
    }

    fn add_class(&mut self, element: &Self::Element, class: &str) {
        if element.class_list().add_1(class).is_err() {
            warn(&format!("Failed to add class '{}'", class));
        }
    }

    fn set_style(&mut self, element: &Self::Element, property: &str, value: &str) {
        let Some(html) = element.dyn_ref::<web_sys::HtmlElement>() else {
            return;
        };
        if html.style().set_property(property, value).is_err() {
            warn(&format!("Failed to set style '{}'", property));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_json_shape() {
        let rec = evaluate_readings(&readings(95.0, 10.0, None, None));
        let json: serde_json::Value =
            serde_json::from_str(&recommendation_json(&rec).unwrap()).unwrap();

        assert_eq!(json["status"], "DANGER");
        assert_eq!(json["primaryAction"], "Leave the noisy area immediately.");
        assert_eq!(json["label"], "Status: DANGER");
        assert_eq!(json["statusClass"], "danger");
        assert_eq!(json["accentColor"], "#e74c3c");
    }

    #[test]
    fn test_optional_readings_are_passed_through() {
        let rec = evaluate_readings(&readings(60.0, 5.0, Some(18.0), Some(320.0)));
        assert_eq!(rec.primary_action, "Avoid outdoor exposure.");

        let rec = evaluate_readings(&readings(60.0, 5.0, None, None));
        assert_eq!(rec, Recommendation::safe());
    }
}
