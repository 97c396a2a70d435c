//! Filter panel contract.
//!
//! The panel's widgets and layout live outside this crate. What the
//! controller needs is the list of fields, a place to keep their values and
//! the props the panel renders with.

use std::fmt;
use std::sync::Arc;
use std::sync::RwLock;

use crate::model::Value;
use crate::query::Criteria;

const PREFIX_CLS: &str = "xc-components";

/// Returns a component class name under the library prefix.
///
/// ```
/// assert_eq!(
///     protable_lib::panel::prefix_cls("pro-table-filter"),
///     "xc-components-pro-table-filter"
/// );
/// ```
pub fn prefix_cls(suffix: &str) -> String {
    format!("{}-{}", PREFIX_CLS, suffix)
}

/// A single filter input.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterField {
    /// Key under which the value appears in the search criteria.
    pub name: String,
    /// Label shown next to the input.
    pub label: String,
    /// Value the field starts with and returns to on reset.
    pub initial: Value,
}

impl FilterField {
    /// Creates a field with a null initial value.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            initial: Value::Null,
        }
    }

    /// Sets the initial value.
    pub fn with_initial(mut self, initial: impl Into<Value>) -> Self {
        self.initial = initial.into();
        self
    }
}

/// Filter panel fields and labels.
#[derive(Debug, Clone)]
pub struct FilterPanelConfig {
    /// Filter inputs. An empty list suppresses the panel entirely.
    pub fields: Vec<FilterField>,
    /// Search button label.
    pub search_text: String,
    /// Reset button label.
    pub reset_text: String,
    /// Whether to render the default search/reset buttons.
    pub show_buttons: bool,
    /// Root class name of the panel.
    pub class_name: String,
}

impl Default for FilterPanelConfig {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            search_text: "Search".to_string(),
            reset_text: "Reset".to_string(),
            show_buttons: true,
            class_name: prefix_cls("pro-table-filter"),
        }
    }
}

impl FilterPanelConfig {
    /// Creates a panel config with the given fields and default labels.
    pub fn new(fields: Vec<FilterField>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    /// Sets the button labels.
    pub fn with_button_text(
        mut self,
        search_text: impl Into<String>,
        reset_text: impl Into<String>,
    ) -> Self {
        self.search_text = search_text.into();
        self.reset_text = reset_text.into();
        self
    }

    /// Hides the default buttons; the caller drives search and reset.
    pub fn without_buttons(mut self) -> Self {
        self.show_buttons = false;
        self
    }

    /// Sets the root class name.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }
}

/// Props the filter panel renders with.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPanelProps {
    /// Filter inputs, in display order.
    pub fields: Vec<FilterField>,
    /// `true` while a fetch is in flight; the search button shows a spinner.
    pub loading: bool,
    /// Search button label.
    pub search_text: String,
    /// Reset button label.
    pub reset_text: String,
    /// Whether to render the default buttons.
    pub show_buttons: bool,
    /// Root class name.
    pub class_name: String,
}

impl FilterPanelProps {
    /// Class name of the button row.
    pub fn actions_class(&self) -> String {
        format!("{}-actions", self.class_name)
    }

    /// Class name of the search button.
    pub fn submit_class(&self) -> String {
        format!("{}-submit", self.class_name)
    }

    /// Class name of the reset button.
    pub fn reset_class(&self) -> String {
        format!("{}-reset", self.class_name)
    }
}

/// Access to the filter panel's current field values.
pub trait FilterHandle: Send + Sync + fmt::Debug {
    /// Returns every field's current value, keyed by field name.
    fn values(&self) -> Criteria;

    /// Sets a field's value. Returns `false` for unknown fields.
    fn set_value(&self, field: &str, value: Value) -> bool;

    /// Restores every field to its initial value.
    fn reset_fields(&self);
}

/// In-memory field store backing a filter panel.
#[derive(Debug)]
pub struct FilterForm {
    fields: Vec<FilterField>,
    values: RwLock<Criteria>,
}

impl FilterForm {
    /// Creates a form with every field at its initial value.
    pub fn new(fields: Vec<FilterField>) -> Arc<Self> {
        let values = initial_values(&fields);
        Arc::new(Self {
            fields,
            values: RwLock::new(values),
        })
    }

    /// Returns the field descriptors.
    pub fn fields(&self) -> &[FilterField] {
        &self.fields
    }
}

fn initial_values(fields: &[FilterField]) -> Criteria {
    fields
        .iter()
        .map(|field| (field.name.clone(), field.initial.clone()))
        .collect()
}

impl FilterHandle for FilterForm {
    fn values(&self) -> Criteria {
        self.values
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn set_value(&self, field: &str, value: Value) -> bool {
        if !self.fields.iter().any(|f| f.name == field) {
            log::warn!("Ignoring value for unknown filter field {}", field);
            return false;
        }
        self.values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(field.to_string(), value);
        true
    }

    fn reset_fields(&self) {
        *self
            .values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = initial_values(&self.fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> Arc<FilterForm> {
        FilterForm::new(vec![
            FilterField::new("name", "Name"),
            FilterField::new("status", "Status").with_initial("open"),
        ])
    }

    #[test]
    fn test_values_start_at_initial() {
        let form = form();
        let values = form.values();
        assert!(values["name"].is_null());
        assert_eq!(values["status"], Value::from("open"));
    }

    #[test]
    fn test_set_and_reset() {
        let form = form();
        assert!(form.set_value("name", Value::from("Ada")));
        assert!(form.set_value("status", Value::from("closed")));
        assert_eq!(form.values()["name"], Value::from("Ada"));

        form.reset_fields();

        let values = form.values();
        assert!(values["name"].is_null());
        assert_eq!(values["status"], Value::from("open"));
    }

    #[test]
    fn test_set_value_recovers_poisoned_lock() {
        let form = form();
        let poisoner = Arc::clone(&form);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.values.write().unwrap();
            panic!("poison the field store");
        })
        .join();
        assert!(form.values.is_poisoned());

        assert!(form.set_value("name", Value::from("Ada")));
        assert_eq!(form.values()["name"], Value::from("Ada"));

        form.reset_fields();
        assert!(form.values()["name"].is_null());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let form = form();
        assert!(!form.set_value("missing", Value::from(1i64)));
        assert!(!form.values().contains_key("missing"));
    }

    #[test]
    fn test_class_names() {
        let config = FilterPanelConfig::default();
        let props = FilterPanelProps {
            fields: Vec::new(),
            loading: false,
            search_text: config.search_text,
            reset_text: config.reset_text,
            show_buttons: config.show_buttons,
            class_name: config.class_name,
        };
        assert_eq!(props.class_name, "xc-components-pro-table-filter");
        assert_eq!(props.submit_class(), "xc-components-pro-table-filter-submit");
        assert_eq!(props.reset_class(), "xc-components-pro-table-filter-reset");
        assert_eq!(props.actions_class(), "xc-components-pro-table-filter-actions");
    }
}
