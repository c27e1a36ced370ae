use regex::Regex;

/// Field-level checks for the forms that never reach the network when
/// invalid. Mirrors what the server enforces, so a passing form normally
/// round-trips without a 400.
pub fn validate_email(email: &str) -> bool {
    let email_regex = Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
    email_regex.is_match(email) && email.len() <= 254
}

pub fn validate_phone(phone: &str) -> bool {
    let phone_regex = Regex::new(r"^\+?[0-9][0-9 \-]{7,14}$").unwrap();
    phone_regex.is_match(phone)
}

pub fn validate_password(password: &str) -> bool {
    password.len() >= 6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_emails() {
        assert!(validate_email("jordan@example.com"));
        assert!(validate_email("a.b+c@sub.domain.org"));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!validate_email("jordan@"));
        assert!(!validate_email("no-at-sign.com"));
        assert!(!validate_email(""));
    }

    #[test]
    fn phone_allows_digits_spaces_and_dashes() {
        assert!(validate_phone("+353 86 123-4567"));
        assert!(validate_phone("0861234567"));
        assert!(!validate_phone("not-a-phone"));
        assert!(!validate_phone("12"));
    }

    #[test]
    fn short_passwords_rejected() {
        assert!(!validate_password("12345"));
        assert!(validate_password("123456"));
    }
}
