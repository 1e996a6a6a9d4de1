use unicode_segmentation::UnicodeSegmentation;

const MIN_NAME_LENGTH: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistName(String);

impl WaitlistName {
    /// Returns an instance of `WaitlistName` if the trimmed input is at
    /// least two user-perceived characters long.
    pub fn parse(s: &str) -> Result<WaitlistName, String> {
        let trimmed = s.trim();
        // A grapheme is defined by the Unicode standard as a "user-perceived"
        // character: `å` is a single grapheme, but it is composed of two characters.
        // Counting graphemes rejects a lone emoji or a decomposed `å` that a
        // UTF-16 length check would let through.
        if trimmed.graphemes(true).count() < MIN_NAME_LENGTH {
            Err(format!("{:?} is too short to be a name.", s))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }
}

impl AsRef<str> for WaitlistName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WaitlistName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
