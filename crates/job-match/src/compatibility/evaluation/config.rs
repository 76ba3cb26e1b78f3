pub const DEFAULT_HOURS_FALLOFF_SPAN: f64 = 20.0;

/// How required terms are matched against the terms on the other side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetMatching {
    /// Normalized terms must be equal.
    #[default]
    Exact,
    /// A required term matches any offered term that contains it.
    Contains,
}

impl SetMatching {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "exact" => Some(Self::Exact),
            "contains" | "substring" => Some(Self::Contains),
            _ => None,
        }
    }
}

/// Tunables for the individual factor scorers.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    hours_falloff_span: f64,
    set_matching: SetMatching,
}

impl ScoringConfig {
    /// `hours_falloff_span` is the number of hours outside the desired range at
    /// which the hours factor reaches zero. Non-positive or non-finite spans
    /// fall back to the default.
    pub fn new(hours_falloff_span: f64, set_matching: SetMatching) -> Self {
        let sanitized = if hours_falloff_span.is_finite() && hours_falloff_span > 0.0 {
            hours_falloff_span
        } else {
            DEFAULT_HOURS_FALLOFF_SPAN
        };

        Self {
            hours_falloff_span: sanitized,
            set_matching,
        }
    }

    pub fn hours_falloff_span(&self) -> f64 {
        self.hours_falloff_span
    }

    pub fn set_matching(&self) -> SetMatching {
        self.set_matching
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOURS_FALLOFF_SPAN, SetMatching::default())
    }
}
