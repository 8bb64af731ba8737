//! Parameter editor handlers.

use pqg_core::parameters::{field_spec, FieldValue};

use crate::app::App;

impl App {
    /// Text currently shown in a numeric editor.
    pub fn field_text(&self, key: &'static str) -> String {
        if let Some(text) = self.field_inputs.get(key) {
            return text.clone();
        }
        self.session
            .parameters()
            .field(key)
            .map(|value| value.display())
            .unwrap_or_default()
    }

    /// Keep the typed text and write it through when it parses.
    pub fn handle_field_text_changed(&mut self, key: &'static str, text: String) {
        if !self.can_edit() {
            return;
        }
        let Some(spec) = field_spec(key) else {
            tracing::warn!("No editor registered for {}", key);
            return;
        };

        let result = spec
            .kind
            .parse(key, &text)
            .map_err(|e| e.to_string())
            .and_then(|value| {
                self.session
                    .set_field(key, value)
                    .map_err(|e| e.to_string())
            });

        match result {
            Ok(()) => {
                self.field_errors.remove(key);
            }
            Err(message) => {
                self.field_errors.insert(key, message);
            }
        }
        self.field_inputs.insert(key, text);
    }

    pub fn handle_field_toggled(&mut self, key: &'static str, value: bool) {
        self.write_field(key, FieldValue::Toggle(value));
    }

    pub fn handle_field_choice_selected(&mut self, key: &'static str, value: String) {
        self.write_field(key, FieldValue::Choice(value));
    }

    fn write_field(&mut self, key: &'static str, value: FieldValue) {
        if !self.can_edit() {
            return;
        }
        if let Err(e) = self.session.set_field(key, value) {
            self.show_error(e.to_string());
        }
    }
}
