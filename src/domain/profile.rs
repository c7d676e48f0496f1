#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum ProfileError {
    #[error("Holder name must not be empty")]
    EmptyName,
    #[error("`{0}` is not a valid e-mail address")]
    InvalidEmail(String),
}

/// Who an account belongs to. Validated on construction so the store only
/// ever sees well-formed holder data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    name: String,
    email: String,
}

impl Profile {
    pub fn new(name: &str, email: &str) -> Result<Profile, ProfileError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProfileError::EmptyName);
        }
        let email = email.trim();
        validate_email(email)?;
        Ok(Profile {
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_email(&self) -> &str {
        &self.email
    }
}

/// Accepts `local@domain.tld` shapes; anything fancier belongs to a real
/// mail-delivery check, not this boundary.
fn validate_email(email: &str) -> Result<(), ProfileError> {
    let invalid = || ProfileError::InvalidEmail(email.to_string());

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || email.contains(char::is_whitespace)
    {
        return Err(invalid());
    }
    Ok(())
}
