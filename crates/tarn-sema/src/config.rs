//! Policy knobs for the full-resolution pass.

/// Candidates whose costs differ by less than this rank equally.
pub const DEFAULT_AMBIGUITY_TOLERANCE: f64 = 0.001;

/// How `switch`/`while`/`try`/`if` in expression position must supply a result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReturningPolicy {
    /// An explicit returning binding is required; a compiler-defaulted one does
    /// not count.
    #[default]
    Strict,
    /// A defaulted (typed, compiler-synthesised) returning binding satisfies
    /// expression position.
    AllowDefaulted,
}

impl ReturningPolicy {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(ReturningPolicy::Strict),
            "defaulted" | "allow-defaulted" => Some(ReturningPolicy::AllowDefaulted),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CheckConfig {
    pub returning_policy: ReturningPolicy,
    /// Report variables that are declared but never read
    pub report_unreferenced: bool,
    pub ambiguity_tolerance: f64,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            returning_policy: ReturningPolicy::default(),
            report_unreferenced: true,
            ambiguity_tolerance: DEFAULT_AMBIGUITY_TOLERANCE,
        }
    }
}

impl CheckConfig {
    /// Defaults overridden by `TARN_RETURNING_POLICY` (`strict` | `defaulted`)
    /// and `TARN_REPORT_UNREFERENCED` (`0` or `false` disables).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(value) = lookup("TARN_RETURNING_POLICY") {
            match ReturningPolicy::parse(&value) {
                Some(policy) => config.returning_policy = policy,
                None => {
                    tracing::warn!(value = %value, "unknown TARN_RETURNING_POLICY, using strict")
                }
            }
        }
        if let Some(value) = lookup("TARN_REPORT_UNREFERENCED") {
            config.report_unreferenced = !matches!(value.trim(), "0" | "false" | "no");
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_strict_and_report_everything() {
        let config = CheckConfig::default();
        assert_eq!(config.returning_policy, ReturningPolicy::Strict);
        assert!(config.report_unreferenced);
        assert_eq!(config.ambiguity_tolerance, DEFAULT_AMBIGUITY_TOLERANCE);
    }

    #[test]
    fn lookup_overrides_defaults() {
        let config = CheckConfig::from_lookup(|key| match key {
            "TARN_RETURNING_POLICY" => Some("Defaulted".to_string()),
            "TARN_REPORT_UNREFERENCED" => Some("0".to_string()),
            _ => None,
        });
        assert_eq!(config.returning_policy, ReturningPolicy::AllowDefaulted);
        assert!(!config.report_unreferenced);
    }

    #[test]
    fn unknown_policy_keeps_strict() {
        let config = CheckConfig::from_lookup(|key| {
            (key == "TARN_RETURNING_POLICY").then(|| "lenient".to_string())
        });
        assert_eq!(config.returning_policy, ReturningPolicy::Strict);
    }
}
