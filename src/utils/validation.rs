//! Field rules for contact messages.
//!
//! Each rule takes the raw field value and returns the list of problems it
//! found; an empty list means the value is acceptable. The server re-runs
//! these on every create and the form runs them on blur and on submit.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::message::CreateMessage;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;
pub const MESSAGE_MIN_CHARS: usize = 2;
pub const MESSAGE_MAX_CHARS: usize = 1000;

/// `+375` international or `80` domestic prefix, operator code, then a
/// seven digit subscriber number (3 + 2 + 2).
const PHONE_PATTERN: &str = r"^(\+375|80)(29|33|44|17)[0-9]{3}[0-9]{2}[0-9]{2}$";

fn phone_regex() -> &'static Regex {
    static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
    PHONE_REGEX.get_or_init(|| Regex::new(PHONE_PATTERN).expect("phone pattern is a valid regex"))
}

fn check_length(
    value: &str,
    min: usize,
    max: usize,
    label: &str,
    errors: &mut Vec<String>,
) {
    let len = value.chars().count();
    if len < min {
        errors.push(format!("{label} must be at least {min} characters long"));
    }
    if len > max {
        errors.push(format!("{label} must be at most {max} characters long"));
    }
}

pub fn validate_name(name: &str) -> Vec<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return vec!["Name is required".to_string()];
    }

    let mut errors = Vec::new();
    check_length(trimmed, NAME_MIN_CHARS, NAME_MAX_CHARS, "Name", &mut errors);
    errors
}

pub fn validate_phone(phone: &str) -> Vec<String> {
    let trimmed = phone.trim();
    if trimmed.is_empty() {
        return vec!["Phone is required".to_string()];
    }

    if phone_regex().is_match(trimmed) {
        Vec::new()
    } else {
        vec!["Phone must be in Belarusian format (+375XXYYYYYYY or 80XXYYYYYYY)".to_string()]
    }
}

pub fn validate_message(message: &str) -> Vec<String> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return vec!["Message is required".to_string()];
    }

    let mut errors = Vec::new();
    check_length(
        trimmed,
        MESSAGE_MIN_CHARS,
        MESSAGE_MAX_CHARS,
        "Message",
        &mut errors,
    );
    errors
}

/// Runs all three rules, keeping name, phone, message order.
pub fn validate_create_message(input: &CreateMessage) -> Vec<String> {
    let mut errors = validate_name(&input.name);
    errors.extend(validate_phone(&input.phone));
    errors.extend(validate_message(&input.message));
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_length_boundaries() {
        assert_eq!(validate_name("J").len(), 1);
        assert!(validate_name("Jo").is_empty());
        assert!(validate_name(&"a".repeat(100)).is_empty());
        assert_eq!(
            validate_name(&"a".repeat(101)),
            vec!["Name must be at most 100 characters long".to_string()]
        );
    }

    #[test]
    fn name_is_trimmed_before_counting() {
        assert_eq!(
            validate_name("  J  "),
            vec!["Name must be at least 2 characters long".to_string()]
        );
        assert_eq!(validate_name("   "), vec!["Name is required".to_string()]);
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        assert!(validate_name("Юл").is_empty());
        assert!(validate_message(&"ж".repeat(1000)).is_empty());
        assert_eq!(validate_message(&"ж".repeat(1001)).len(), 1);
    }

    #[test]
    fn phone_accepts_both_prefixes_and_all_operator_codes() {
        for phone in [
            "+375291234567",
            "+375331234567",
            "+375441234567",
            "+375171234567",
            "80291234567",
            "80441234567",
            "  80331234567 ",
        ] {
            assert!(validate_phone(phone).is_empty(), "{phone} should be valid");
        }
    }

    #[test]
    fn phone_rejects_malformed_numbers() {
        for phone in [
            "123",
            "+375251234567",
            "+37529123456",
            "+3752912345678",
            "375291234567",
            "8029123456a",
            "+375 29 123 45 67",
            "+375２９1234567",
        ] {
            assert_eq!(validate_phone(phone).len(), 1, "{phone} should be invalid");
        }
        assert_eq!(validate_phone(""), vec!["Phone is required".to_string()]);
    }

    #[test]
    fn message_length_boundaries() {
        assert_eq!(validate_message("H").len(), 1);
        assert!(validate_message("Hi").is_empty());
        assert!(validate_message(&"x".repeat(1000)).is_empty());
        assert_eq!(
            validate_message(&"x".repeat(1001)),
            vec!["Message must be at most 1000 characters long".to_string()]
        );
        assert_eq!(validate_message(""), vec!["Message is required".to_string()]);
    }

    #[test]
    fn aggregate_keeps_field_order() {
        let errors = validate_create_message(&CreateMessage::new("J", "123", ""));
        assert_eq!(
            errors,
            vec![
                "Name must be at least 2 characters long".to_string(),
                "Phone must be in Belarusian format (+375XXYYYYYYY or 80XXYYYYYYY)".to_string(),
                "Message is required".to_string(),
            ]
        );
    }

    #[test]
    fn aggregate_is_empty_for_valid_input() {
        let input = CreateMessage::new("Jo", "+375291234567", "Hi");
        assert!(validate_create_message(&input).is_empty());
        assert_eq!(validate_create_message(&input), validate_create_message(&input));
    }
}
