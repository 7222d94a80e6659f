//! Input field value objects used by the creation dialogs

/// Type-safe input values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputValue {
    Text(String),
    Toggle(bool),
}

impl Default for InputValue {
    fn default() -> Self {
        InputValue::Text(String::new())
    }
}

/// A single dialog input with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: InputValue,
    pub is_multiline: bool,
    /// Rendered masked (passwords)
    pub is_secret: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str, is_multiline: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: InputValue::Text(String::new()),
            is_multiline,
            is_secret: false,
        }
    }

    /// Create a masked text field
    pub fn secret(name: &str, label: &str) -> Self {
        Self {
            is_secret: true,
            ..Self::text(name, label, false)
        }
    }

    /// Create a new on/off field
    pub fn toggle(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: InputValue::Toggle(false),
            is_multiline: false,
            is_secret: false,
        }
    }

    /// Get the text value (returns empty string for toggles)
    pub fn as_text(&self) -> &str {
        match &self.value {
            InputValue::Text(s) => s,
            InputValue::Toggle(_) => "",
        }
    }

    /// Get the toggle value (returns false for text fields)
    pub fn as_bool(&self) -> bool {
        match &self.value {
            InputValue::Toggle(b) => *b,
            InputValue::Text(_) => false,
        }
    }

    /// Push a character to the field value. Space flips a toggle.
    pub fn push_char(&mut self, c: char) {
        match &mut self.value {
            InputValue::Text(s) => s.push(c),
            InputValue::Toggle(b) => {
                if c == ' ' {
                    *b = !*b;
                }
            }
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if let InputValue::Text(s) = &mut self.value {
            s.pop();
        }
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        match &mut self.value {
            InputValue::Text(s) => s.clear(),
            InputValue::Toggle(b) => *b = false,
        }
    }

    /// Whether the trimmed text is empty. Toggles are never blank.
    pub fn is_blank(&self) -> bool {
        match &self.value {
            InputValue::Text(s) => s.trim().is_empty(),
            InputValue::Toggle(_) => false,
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            InputValue::Text(s) if self.is_secret => "•".repeat(s.chars().count()),
            InputValue::Text(s) => s.clone(),
            InputValue::Toggle(true) => "[x] yes".to_string(),
            InputValue::Toggle(false) => "[ ] no".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_push_and_pop() {
        let mut field = FormField::text("name", "Name", false);
        field.push_char('a');
        field.push_char('b');
        field.pop_char();
        assert_eq!(field.as_text(), "a");
    }

    #[test]
    fn test_secret_is_masked() {
        let mut field = FormField::secret("password", "Password");
        for c in "hunter22".chars() {
            field.push_char(c);
        }
        assert_eq!(field.as_text(), "hunter22");
        assert_eq!(field.display_value(), "••••••••");
    }

    #[test]
    fn test_toggle_flips_on_space_only() {
        let mut field = FormField::toggle("is_admin", "Admin");
        field.push_char('x');
        assert!(!field.as_bool());
        field.push_char(' ');
        assert!(field.as_bool());
        assert_eq!(field.display_value(), "[x] yes");
        field.clear();
        assert!(!field.as_bool());
    }

    #[test]
    fn test_is_blank_trims() {
        let mut field = FormField::text("name", "Name", false);
        field.push_char(' ');
        assert!(field.is_blank());
        assert!(!FormField::toggle("t", "T").is_blank());
    }
}
