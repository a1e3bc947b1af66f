use std::sync::LazyLock;

use regex::Regex;

const MAX_EMAIL_LENGTH: usize = 254;
const MAX_LOCAL_PART_LENGTH: usize = 64;
const MAX_DOMAIN_LABEL_LENGTH: usize = 63;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[-!#$%&'*+/0-9=?A-Z^_a-z`{|}~](\.?[-!#$%&'*+/0-9=?A-Z^_a-z`{|}~])*",
        r"@[a-zA-Z0-9](-*\.?[a-zA-Z0-9])*\.[a-zA-Z](-?[a-zA-Z0-9])+$",
    ))
    .expect("email pattern is valid")
});

/// Check that `email` is a syntactically valid address.
///
/// This is a pragmatic subset of RFC 5322: dot-atom local parts only, no
/// quoted strings or comments, and a dotted domain with an alphabetic TLD.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > MAX_EMAIL_LENGTH {
        return false;
    }

    if !EMAIL.is_match(email) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    local.len() <= MAX_LOCAL_PART_LENGTH
        && domain
            .split('.')
            .all(|label| label.len() <= MAX_DOMAIN_LABEL_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        for email in [
            "jane@example.com",
            "jane.doe@example.co.uk",
            "jane+dco@example.com",
            "49699333+jane@users.noreply.github.com",
            "o'brien@example.ie",
        ] {
            assert!(is_valid_email(email), "{email} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in [
            "",
            "jane",
            "jane@",
            "@example.com",
            "jane@example",
            "jane doe@example.com",
            "jane@exa mple.com",
            "jane..doe@example.com",
            ".jane@example.com",
            "jane@@example.com",
            "jane@example.c",
        ] {
            assert!(!is_valid_email(email), "{email:?} should be invalid");
        }
    }

    #[test]
    fn enforces_length_limits() {
        let local = "a".repeat(65);
        assert!(!is_valid_email(&format!("{local}@example.com")));

        let label = "a".repeat(64);
        assert!(!is_valid_email(&format!("jane@{label}.com")));

        let label = "a".repeat(63);
        assert!(is_valid_email(&format!("jane@{label}.com")));
    }
}
