//! Writing a recommendation onto a display surface.
//!
//! A display surface is anything that can look up elements by id and set
//! their text, classes, and style properties: the browser DOM (see the
//! `ehs-wasm` crate) or the in-memory [`MemorySurface`](crate::mock::MemorySurface)
//! used in tests.
//!
//! Rendering needs the panel and the status element. If either is missing,
//! nothing at all is written.
//!
//! # Example
//!
//! ```
//! use ehs_core::display::{RenderOutcome, UiWriter};
//! use ehs_core::mock::MemorySurface;
//! use ehs_types::{Recommendation, Status};
//!
//! let mut surface = MemorySurface::with_standard_elements();
//! let writer = UiWriter::default();
//!
//! let rec = Recommendation::new(Status::Danger, "Leave now.", "Wear protection.");
//! assert_eq!(writer.render(&mut surface, &rec), RenderOutcome::Rendered);
//!
//! let status = surface.element("recommendationStatus").unwrap();
//! assert_eq!(status.text, "Status: DANGER");
//! assert_eq!(status.classes, vec!["danger".to_string()]);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use ehs_types::Recommendation;

/// Style property that carries the status accent color.
pub const ACCENT_STYLE_PROPERTY: &str = "border-left-color";

/// A target that recommendations can be written to.
///
/// Methods that write take `&mut self`; surfaces backed by shared handles
/// (like the DOM) can ignore the exclusivity.
pub trait DisplaySurface {
    /// Handle to one element on the surface.
    type Element;

    /// Look up an element by id.
    fn find(&self, id: &str) -> Option<Self::Element>;

    /// Replace the element's text content.
    fn set_text(&mut self, element: &Self::Element, text: &str);

    /// Remove every class from the element.
    fn clear_classes(&mut self, element: &Self::Element);

    /// Add one class to the element.
    fn add_class(&mut self, element: &Self::Element, class: &str);

    /// Set one inline style property.
    fn set_style(&mut self, element: &Self::Element, property: &str, value: &str);
}

/// Element ids the writer looks up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayTargets {
    /// Container panel. Must exist for anything to render.
    pub panel: String,
    /// Status text element. Must exist for anything to render.
    pub status: String,
    /// Primary action text element.
    pub primary_action: String,
    /// Secondary action text element.
    pub secondary_action: String,
}

impl Default for DisplayTargets {
    fn default() -> Self {
        Self {
            panel: "recommendationPanel".to_string(),
            status: "recommendationStatus".to_string(),
            primary_action: "primaryAction".to_string(),
            secondary_action: "secondaryAction".to_string(),
        }
    }
}

/// Result of a render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The recommendation was written.
    Rendered,
    /// The panel or status element was missing; nothing was written.
    Skipped,
}

/// Writes recommendations to a [`DisplaySurface`].
#[derive(Debug, Clone, Default)]
pub struct UiWriter {
    targets: DisplayTargets,
}

impl UiWriter {
    /// Create a writer for the given element ids.
    pub fn new(targets: DisplayTargets) -> Self {
        Self { targets }
    }

    /// The element ids this writer uses.
    pub fn targets(&self) -> &DisplayTargets {
        &self.targets
    }

    /// Write `recommendation` to `surface`.
    ///
    /// Sets the action texts verbatim, sets the status text to
    /// `Status: <STATUS>`, replaces the status element's classes with the
    /// lower-case status, and sets its accent color.
    pub fn render<S: DisplaySurface>(
        &self,
        surface: &mut S,
        recommendation: &Recommendation,
    ) -> RenderOutcome {
        let (Some(_panel), Some(status_el)) = (
            surface.find(&self.targets.panel),
            surface.find(&self.targets.status),
        ) else {
            debug!(
                panel = %self.targets.panel,
                status = %self.targets.status,
                "display target missing, skipping render"
            );
            return RenderOutcome::Skipped;
        };

        let primary = surface.find(&self.targets.primary_action);
        let secondary = surface.find(&self.targets.secondary_action);

        match primary {
            Some(el) => surface.set_text(&el, &recommendation.primary_action),
            None => debug!(id = %self.targets.primary_action, "primary action element missing"),
        }
        match secondary {
            Some(el) => surface.set_text(&el, &recommendation.secondary_action),
            None => debug!(id = %self.targets.secondary_action, "secondary action element missing"),
        }

        let status = recommendation.status;
        surface.set_text(&status_el, &status.label());
        surface.clear_classes(&status_el);
        surface.add_class(&status_el, status.css_class());
        surface.set_style(&status_el, ACCENT_STYLE_PROPERTY, status.accent_color());

        RenderOutcome::Rendered
    }
}

/// Write `recommendation` to `surface` using the default element ids.
pub fn render<S: DisplaySurface>(surface: &mut S, recommendation: &Recommendation) -> RenderOutcome {
    UiWriter::default().render(surface, recommendation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MemorySurface;
    use ehs_types::Status;

    #[test]
    fn test_render_writes_all_targets() {
        let mut surface = MemorySurface::with_standard_elements();
        let rec = Recommendation::new(Status::Caution, "Reduce noise exposure.", "Take a break.");

        assert_eq!(render(&mut surface, &rec), RenderOutcome::Rendered);

        assert_eq!(surface.element("primaryAction").unwrap().text, "Reduce noise exposure.");
        assert_eq!(surface.element("secondaryAction").unwrap().text, "Take a break.");

        let status = surface.element("recommendationStatus").unwrap();
        assert_eq!(status.text, "Status: CAUTION");
        assert_eq!(status.classes, vec!["caution".to_string()]);
        assert_eq!(
            status.styles.get(ACCENT_STYLE_PROPERTY).map(String::as_str),
            Some("#f1c40f")
        );
    }

    #[test]
    fn test_render_replaces_previous_class() {
        let mut surface = MemorySurface::with_standard_elements();
        render(&mut surface, &Recommendation::new(Status::Danger, "a", "b"));
        render(&mut surface, &Recommendation::safe());

        let status = surface.element("recommendationStatus").unwrap();
        assert_eq!(status.classes, vec!["safe".to_string()]);
        assert_eq!(
            status.styles.get(ACCENT_STYLE_PROPERTY).map(String::as_str),
            Some("#2ecc71")
        );
    }

    #[test]
    fn test_missing_panel_writes_nothing() {
        let mut surface = MemorySurface::new()
            .with_element("recommendationStatus")
            .with_element("primaryAction")
            .with_element("secondaryAction");

        let outcome = render(&mut surface, &Recommendation::new(Status::Danger, "a", "b"));

        assert_eq!(outcome, RenderOutcome::Skipped);
        assert_eq!(surface.write_count(), 0);
        assert_eq!(surface.element("primaryAction").unwrap().text, "");
    }

    #[test]
    fn test_missing_status_writes_nothing() {
        let mut surface = MemorySurface::new()
            .with_element("recommendationPanel")
            .with_element("primaryAction")
            .with_element("secondaryAction");

        let outcome = render(&mut surface, &Recommendation::safe());

        assert_eq!(outcome, RenderOutcome::Skipped);
        assert_eq!(surface.write_count(), 0);
    }

    #[test]
    fn test_missing_action_elements_still_render_status() {
        let mut surface = MemorySurface::new()
            .with_element("recommendationPanel")
            .with_element("recommendationStatus");

        let outcome = render(&mut surface, &Recommendation::new(Status::Danger, "a", "b"));

        assert_eq!(outcome, RenderOutcome::Rendered);
        assert_eq!(
            surface.element("recommendationStatus").unwrap().text,
            "Status: DANGER"
        );
    }

    #[test]
    fn test_custom_targets() {
        let targets = DisplayTargets {
            panel: "panel".into(),
            status: "status".into(),
            primary_action: "p1".into(),
            secondary_action: "p2".into(),
        };
        let writer = UiWriter::new(targets);
        let mut surface = MemorySurface::new()
            .with_element("panel")
            .with_element("status")
            .with_element("p1")
            .with_element("p2");

        assert_eq!(
            writer.render(&mut surface, &Recommendation::safe()),
            RenderOutcome::Rendered
        );
        assert_eq!(
            surface.element("p1").unwrap().text,
            "No immediate action required."
        );
    }
}
