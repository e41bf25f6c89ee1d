/// Tag applied to contacts whose profile code is missing or unknown.
pub const DEFAULT_TAG: &str = "quiz-entrepreneures";

/// Value of the `source` field sent to both downstream integrations.
pub const SOURCE: &str = "quiz-entrepreneures";

/// The profile a quiz taker ends up with.
///
/// The quiz page posts it as a single uppercase letter. Each profile maps to
/// exactly one CRM tag, which is what the marketing sequences segment on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileCode {
    A,
    B,
    C,
    D,
    E,
}

impl ProfileCode {
    pub const ALL: [ProfileCode; 5] = [
        ProfileCode::A,
        ProfileCode::B,
        ProfileCode::C,
        ProfileCode::D,
        ProfileCode::E,
    ];

    /// Parses the code exactly as posted. Lowercase letters are not accepted.
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "A" => Some(ProfileCode::A),
            "B" => Some(ProfileCode::B),
            "C" => Some(ProfileCode::C),
            "D" => Some(ProfileCode::D),
            "E" => Some(ProfileCode::E),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            ProfileCode::A => "femme-architecte",
            ProfileCode::B => "femme-phare",
            ProfileCode::C => "femme-alchimiste",
            ProfileCode::D => "femme-cameleon",
            ProfileCode::E => "femme-diamant",
        }
    }
}

/// Resolves the CRM tag for a posted profile, falling back to [`DEFAULT_TAG`].
pub fn tag_for_profile(profile: Option<&str>) -> &'static str {
    profile
        .and_then(ProfileCode::parse)
        .map(ProfileCode::tag)
        .unwrap_or(DEFAULT_TAG)
}
