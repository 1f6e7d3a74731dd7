//! Settings panel model
//!
//! The host renders the actual controls; this is the plugin's view of them: a
//! prompt label and one numeric text field, pre-populated with the current
//! timeout. Parsing the field is where user input gets validated.

use crate::config::TimeoutSeconds;
use crate::error::ConfigError;

/// Prompt shown next to the text field
pub const PROMPT: &str = "Time in seconds:";

/// Model of the single-field settings panel
#[derive(Debug, Clone)]
pub struct SettingsPanel {
    input: String,
}

impl SettingsPanel {
    /// Build a panel pre-populated with the current timeout
    pub fn new(current: TimeoutSeconds) -> Self {
        Self {
            input: current.to_string(),
        }
    }

    /// Current text field contents
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the text field contents (host edit callback)
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Validate the field into a timeout; rejected input changes nothing
    pub fn parse(&self) -> Result<TimeoutSeconds, ConfigError> {
        self.input.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_is_populated_from_the_current_timeout() {
        let panel = SettingsPanel::new(TimeoutSeconds::default());
        assert_eq!(panel.input(), "30");
    }

    #[test]
    fn edited_input_parses_back_to_a_timeout() {
        let mut panel = SettingsPanel::new(TimeoutSeconds::default());
        panel.set_input("120");
        assert_eq!(panel.parse().unwrap().get(), 120);
    }

    #[test]
    fn invalid_input_is_rejected() {
        let mut panel = SettingsPanel::new(TimeoutSeconds::default());
        for text in ["0", "-5", "ten", ""] {
            panel.set_input(text);
            assert!(panel.parse().is_err(), "expected {:?} to be rejected", text);
        }
    }
}
