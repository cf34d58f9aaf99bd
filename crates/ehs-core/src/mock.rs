//! In-memory display surface for testing.
//!
//! [`MemorySurface`] implements [`DisplaySurface`] over a map of element
//! states, so rendering can be checked without a browser. It counts every
//! write, which makes "nothing was written" easy to assert.

use std::collections::{BTreeMap, HashMap};

use crate::display::{DisplaySurface, DisplayTargets};

/// State of one element on a [`MemorySurface`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementState {
    pub text: String,
    pub classes: Vec<String>,
    pub styles: BTreeMap<String, String>,
}

/// A display surface that keeps elements in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    elements: HashMap<String, ElementState>,
    writes: usize,
}

impl MemorySurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface with every element the default writer targets.
    pub fn with_standard_elements() -> Self {
        let targets = DisplayTargets::default();
        Self::new()
            .with_element(&targets.panel)
            .with_element(&targets.status)
            .with_element(&targets.primary_action)
            .with_element(&targets.secondary_action)
    }

    /// Add an empty element.
    #[must_use]
    pub fn with_element(mut self, id: &str) -> Self {
        self.elements.insert(id.to_string(), ElementState::default());
        self
    }

    /// Add an element with existing classes.
    #[must_use]
    pub fn with_classes(mut self, id: &str, classes: &[&str]) -> Self {
        let state = ElementState {
            classes: classes.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        };
        self.elements.insert(id.to_string(), state);
        self
    }

    /// Current state of an element.
    pub fn element(&self, id: &str) -> Option<&ElementState> {
        self.elements.get(id)
    }

    /// Number of writes made to any element.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    fn state_mut(&mut self, id: &str) -> Option<&mut ElementState> {
        self.writes += 1;
        self.elements.get_mut(id)
    }
}

impl DisplaySurface for MemorySurface {
    type Element = String;

    fn find(&self, id: &str) -> Option<String> {
        self.elements.contains_key(id).then(|| id.to_string())
    }

    fn set_text(&mut self, element: &String, text: &str) {
        if let Some(state) = self.state_mut(element) {
            state.text = text.to_string();
        }
    }

    fn clear_classes(&mut self, element: &String) {
        if let Some(state) = self.state_mut(element) {
            state.classes.clear();
        }
    }

    fn add_class(&mut self, element: &String, class: &str) {
        if let Some(state) = self.state_mut(element)
            && !state.classes.iter().any(|c| c == class)
        {
            state.classes.push(class.to_string());
        }
    }

    fn set_style(&mut self, element: &String, property: &str, value: &str) {
        if let Some(state) = self.state_mut(element) {
            state.styles.insert(property.to_string(), value.to_string());
        }
    }
}
