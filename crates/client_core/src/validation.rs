//! Contact detail validation for checkout.

use std::sync::LazyLock;

use regex::Regex;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("name pattern compiles"));
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("phone pattern compiles"));

/// Letters and whitespace only, at least one character.
pub fn is_valid_name(value: &str) -> bool {
    NAME_PATTERN.is_match(value)
}

/// ASCII digits only, at least one character.
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value)
}

/// Name and phone as entered, with the result of their last validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    name: String,
    phone: String,
    name_error: bool,
    phone_error: bool,
}

impl ContactDetails {
    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
        self.validate_name();
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.phone = value.into();
        self.validate_phone();
    }

    pub fn validate_name(&mut self) -> bool {
        self.name_error = !is_valid_name(&self.name);
        !self.name_error
    }

    pub fn validate_phone(&mut self) -> bool {
        self.phone_error = !is_valid_phone(&self.phone);
        !self.phone_error
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn name_error(&self) -> bool {
        self.name_error
    }

    pub fn phone_error(&self) -> bool {
        self.phone_error
    }

    pub fn is_checkout_valid(&self) -> bool {
        !self.name.is_empty() && !self.name_error && !self.phone.is_empty() && !self.phone_error
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_allow_letters_and_whitespace_only() {
        assert!(is_valid_name("John Doe"));
        assert!(is_valid_name("Anne\tMarie"));
        assert!(!is_valid_name("John123"));
        assert!(!is_valid_name("O'Brien"));
        assert!(!is_valid_name(""));
    }

    #[test]
    fn phones_allow_digits_only() {
        assert!(is_valid_phone("07123456789"));
        assert!(!is_valid_phone("abc"));
        assert!(!is_valid_phone("+447123456789"));
        assert!(!is_valid_phone("0712 345"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn checkout_requires_both_fields_valid() {
        let mut contact = ContactDetails::default();
        assert!(!contact.is_checkout_valid());

        contact.set_name("John Doe");
        assert!(!contact.is_checkout_valid());

        contact.set_phone("abc");
        assert!(contact.phone_error());
        assert!(!contact.is_checkout_valid());

        contact.set_phone("07123456789");
        assert!(contact.is_checkout_valid());

        contact.set_name("John123");
        assert!(contact.name_error());
        assert!(!contact.is_checkout_valid());
    }

    #[test]
    fn whitespace_only_name_passes_validation() {
        let mut contact = ContactDetails::default();
        contact.set_name("   ");
        contact.set_phone("123");
        assert!(!contact.name_error());
        assert!(contact.is_checkout_valid());
    }
}
