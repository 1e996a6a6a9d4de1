/// The wellness goal an applicant picked on the signup form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Interest {
    Sleep,
    Digestion,
    Energy,
    Stress,
    Immunity,
    General,
}

impl Interest {
    pub const ALL: [Interest; 6] = [
        Interest::Sleep,
        Interest::Digestion,
        Interest::Energy,
        Interest::Stress,
        Interest::Immunity,
        Interest::General,
    ];

    /// Matching is exact: values are case-sensitive and not trimmed.
    pub fn parse(s: &str) -> Result<Interest, String> {
        Self::ALL
            .into_iter()
            .find(|interest| interest.as_str() == s)
            .ok_or_else(|| format!("{} is not a supported interest.", s))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Interest::Sleep => "sleep",
            Interest::Digestion => "digestion",
            Interest::Energy => "energy",
            Interest::Stress => "stress",
            Interest::Immunity => "immunity",
            Interest::General => "general",
        }
    }

    /// Human-readable phrase used in email copy.
    pub fn display_label(&self) -> &'static str {
        match self {
            Interest::Sleep => "Better Sleep",
            Interest::Digestion => "Digestive Health",
            Interest::Energy => "Energy & Vitality",
            Interest::Stress => "Stress Relief",
            Interest::Immunity => "Immune Support",
            Interest::General => "General Wellness",
        }
    }
}

impl std::fmt::Display for Interest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
