use crate::errors::DomainError;
use crate::wire::MAX_LABEL_LEN;

fn is_alpha_digit_hyphen(text: &str) -> bool {
    text.bytes().all(|c| c.is_ascii_alphanumeric() || c == b'-')
}

/// Instance names may hold any UTF-8 except control characters below 0x1f
/// and DEL.
fn is_net_unicode(text: &str) -> bool {
    text.bytes().all(|c| c >= 0x1f && c != 0x7f)
}

pub(crate) fn validate_hostname(name: &str) -> Result<(), DomainError> {
    if name.is_empty() {
        return Err(DomainError::InvalidHostname("hostname is empty".to_string()));
    }
    if name.len() >= MAX_LABEL_LEN {
        return Err(DomainError::InvalidHostname(format!(
            "'{}' is {} bytes, limit is {}",
            name,
            name.len(),
            MAX_LABEL_LEN - 1
        )));
    }
    if !is_alpha_digit_hyphen(name) {
        return Err(DomainError::InvalidHostname(format!(
            "'{}' may only contain letters, digits and '-'",
            name
        )));
    }
    Ok(())
}

/// Protocol, service type and subtype names; they get a leading `_` on the
/// wire, hence one byte less than a plain label.
pub(crate) fn validate_service_label(what: &str, name: &str) -> Result<(), DomainError> {
    if name.is_empty() || name.len() >= MAX_LABEL_LEN - 1 || !is_alpha_digit_hyphen(name) {
        return Err(DomainError::InvalidServiceName(format!(
            "{} '{}' must be 1-{} letters, digits or '-'",
            what,
            name,
            MAX_LABEL_LEN - 2
        )));
    }
    Ok(())
}

pub(crate) fn validate_instance(name: &str) -> Result<(), DomainError> {
    if name.is_empty() || name.len() >= MAX_LABEL_LEN || !is_net_unicode(name) {
        return Err(DomainError::InvalidServiceName(format!(
            "instance '{}' must be 1-{} bytes without control characters",
            name.escape_debug(),
            MAX_LABEL_LEN - 1
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostname_rules() {
        assert!(validate_hostname("desk").is_ok());
        assert!(validate_hostname("my-desk-01").is_ok());
        assert!(validate_hostname(&"a".repeat(62)).is_ok());
        assert!(validate_hostname(&"a".repeat(63)).is_err());
        assert!(validate_hostname("").is_err());
        assert!(validate_hostname("my_desk").is_err());
        assert!(validate_hostname("desk.local").is_err());
    }

    #[test]
    fn test_service_label_rules() {
        assert!(validate_service_label("service", "http").is_ok());
        assert!(validate_service_label("service", &"h".repeat(61)).is_ok());
        assert!(validate_service_label("service", &"h".repeat(62)).is_err());
        assert!(validate_service_label("protocol", "").is_err());
        assert!(validate_service_label("protocol", "t c p").is_err());
    }

    #[test]
    fn test_instance_rules() {
        assert!(validate_instance("My Printer").is_ok());
        assert!(validate_instance("Drucker (Büro)").is_ok());
        assert!(validate_instance("tab\there").is_err());
        assert!(validate_instance("del\u{7f}").is_err());
        assert!(validate_instance("").is_err());
        assert!(validate_instance(&"i".repeat(63)).is_err());
    }
}
