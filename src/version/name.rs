//! npm package name validation
//!
//! Applies the registry's naming rules for new packages before any registry
//! query is issued for a name.

use regex::Regex;

use crate::version::error::VerifyError;

const MAX_NAME_LENGTH: usize = 214;
const BLACKLISTED_NAMES: [&str; 2] = ["node_modules", "favicon.ico"];
const SPECIAL_CHARACTERS: [char; 6] = ['~', '\'', '!', '(', ')', '*'];

/// Validator for npm package names
pub struct NameValidator {
    /// Splits `@scope/name` into scope and name
    scoped_re: Regex,
    /// Characters `encodeURIComponent` leaves untouched
    url_safe_re: Regex,
}

impl NameValidator {
    pub fn new() -> Self {
        Self {
            scoped_re: Regex::new(r"^(?:@([^/]+?)/)?([^/]+?)$").unwrap(),
            url_safe_re: Regex::new(r"^[A-Za-z0-9\-_.!~*'()]+$").unwrap(),
        }
    }

    /// Fails with [`VerifyError::InvalidName`] listing every rule the name breaks
    pub fn validate(&self, name: &str) -> Result<(), VerifyError> {
        let reasons = self.violations(name);
        if reasons.is_empty() {
            Ok(())
        } else {
            Err(VerifyError::InvalidName {
                name: name.to_string(),
                reasons,
            })
        }
    }

    fn violations(&self, name: &str) -> Vec<String> {
        let mut reasons = Vec::new();

        if name.is_empty() {
            reasons.push("name length must be greater than zero".to_string());
            return reasons;
        }
        if name.starts_with('.') {
            reasons.push("name cannot start with a period".to_string());
        }
        if name.starts_with('_') {
            reasons.push("name cannot start with an underscore".to_string());
        }
        if name.trim() != name {
            reasons.push("name cannot contain leading or trailing spaces".to_string());
        }
        if BLACKLISTED_NAMES.contains(&name.to_lowercase().as_str()) {
            reasons.push(format!("{name} is a blacklisted name"));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            reasons.push(format!(
                "name can no longer contain more than {MAX_NAME_LENGTH} characters"
            ));
        }
        if name.to_lowercase() != name {
            reasons.push("name can no longer contain capital letters".to_string());
        }
        let last_segment = name.rsplit('/').next().unwrap_or(name);
        if last_segment.contains(SPECIAL_CHARACTERS) {
            reasons.push(r#"name can no longer contain special characters ("~'!()*")"#.to_string());
        }
        if !self.is_url_safe(name) {
            reasons.push("name can only contain URL-friendly characters".to_string());
        }

        reasons
    }

    fn is_url_safe(&self, name: &str) -> bool {
        let Some(caps) = self.scoped_re.captures(name) else {
            return false;
        };
        let scope_ok = caps
            .get(1)
            .is_none_or(|scope| self.url_safe_re.is_match(scope.as_str()));
        let name_ok = caps
            .get(2)
            .is_some_and(|pkg| self.url_safe_re.is_match(pkg.as_str()));
        scope_ok && name_ok
    }
}

impl Default for NameValidator {
    fn default() -> Self {
        Self::new()
    }
}
