use std::fmt;

/// An email address with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAddress {
    pub email: String,
    pub name: Option<String>,
}

impl MailAddress {
    pub fn new<T: AsRef<str>>(email: T) -> Self {
        MailAddress {
            email: email.as_ref().to_string(),
            name: None,
        }
    }

    pub fn with_name<T: AsRef<str>>(email: T, name: T) -> Self {
        MailAddress {
            email: email.as_ref().to_string(),
            name: Some(name.as_ref().to_string()),
        }
    }

    /// Syntactic check only: a non-empty local part and domain around '@',
    /// no whitespace anywhere.
    pub fn is_valid(&self) -> bool {
        if self.email.chars().any(char::is_whitespace) {
            return false;
        }
        match self.email.rsplit_once('@') {
            Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
            None => false,
        }
    }
}

impl fmt::Display for MailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.email),
            None => write!(f, "{}", self.email),
        }
    }
}
