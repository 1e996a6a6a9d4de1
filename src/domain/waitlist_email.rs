/// A signup address that matched `local@domain.tld`, stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistEmail(String);

impl WaitlistEmail {
    /// Returns an instance of `WaitlistEmail` if the input has the
    /// `local@domain.tld` shape: no whitespace anywhere, a non-empty local
    /// part, and a domain holding a `.` with at least one character on
    /// either side.
    pub fn parse(s: &str) -> Result<WaitlistEmail, String> {
        if !is_well_formed(s) {
            return Err(format!("{} is not a valid email address.", s));
        }
        Ok(Self(s.to_lowercase()))
    }
}

fn is_well_formed(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

impl AsRef<str> for WaitlistEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WaitlistEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
