use crate::policy::{CautiousPolicy, ForesightPolicy, Policy, StatisticalPolicy};
use crate::risk::RiskModel;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_FORESIGHT_COOLDOWN: u32 = 2;

/// Which decision ladder a bot runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    #[default]
    Foresight,
    Statistical,
    Cautious,
}

impl PolicyKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "foresight" | "default" => Some(PolicyKind::Foresight),
            "statistical" | "combined" => Some(PolicyKind::Statistical),
            "cautious" | "naive" => Some(PolicyKind::Cautious),
            _ => None,
        }
    }

    pub const fn default_risk(self) -> RiskModel {
        match self {
            PolicyKind::Foresight | PolicyKind::Statistical => RiskModel::statistical(),
            PolicyKind::Cautious => RiskModel::Naive,
        }
    }
}

/// Bot configuration, from YAML or `KITTEN_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub kind: PolicyKind,
    /// Falls back to the kind's own model when absent.
    #[serde(default)]
    pub risk: Option<RiskModel>,
    #[serde(default = "default_cooldown")]
    pub foresight_cooldown: u32,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_cooldown() -> u32 {
    DEFAULT_FORESIGHT_COOLDOWN
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            kind: PolicyKind::default(),
            risk: None,
            foresight_cooldown: DEFAULT_FORESIGHT_COOLDOWN,
            seed: None,
        }
    }
}

impl PolicyConfig {
    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        let cfg: PolicyConfig = serde_yaml::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let kind = read("KITTEN_POLICY")
            .and_then(|raw| PolicyKind::parse(&raw))
            .unwrap_or_default();

        let threshold = read("KITTEN_RISK_THRESHOLD")
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| valid_threshold(*value));

        let risk = read("KITTEN_RISK_MODEL")
            .and_then(|raw| RiskModel::parse(&raw, threshold))
            .or_else(|| threshold.map(|threshold| RiskModel::Statistical { threshold }));

        let foresight_cooldown = read("KITTEN_FORESIGHT_COOLDOWN")
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_FORESIGHT_COOLDOWN);

        let seed = read("KITTEN_SEED").and_then(|raw| raw.trim().parse::<u64>().ok());

        Self {
            kind,
            risk,
            foresight_cooldown,
            seed,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(RiskModel::Statistical { threshold }) = self.risk {
            if !valid_threshold(threshold) {
                return Err(ValidationError::InvalidField {
                    field: "risk.threshold".into(),
                    message: format!("expected a probability in [0, 1], got {threshold}"),
                });
            }
        }
        Ok(())
    }

    pub fn risk_model(&self) -> RiskModel {
        self.risk.unwrap_or_else(|| self.kind.default_risk())
    }

    /// Build the configured policy; seeded from `seed` or from OS entropy.
    pub fn build(&self) -> Box<dyn Policy> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.build_with_rng(rng)
    }

    pub fn build_with_rng<R>(&self, rng: R) -> Box<dyn Policy>
    where
        R: Rng + Send + 'static,
    {
        let risk = self.risk_model();
        let cooldown = self.foresight_cooldown;
        match self.kind {
            PolicyKind::Foresight => Box::new(
                ForesightPolicy::with_rng(rng)
                    .with_risk(risk)
                    .with_cooldown(cooldown),
            ),
            PolicyKind::Statistical => Box::new(
                StatisticalPolicy::with_rng(rng)
                    .with_risk(risk)
                    .with_cooldown(cooldown),
            ),
            PolicyKind::Cautious => Box::new(CautiousPolicy::with_rng(rng).with_risk(risk)),
        }
    }
}

fn valid_threshold(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

/// Errors surfaced when loading a policy configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse policy config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid policy config: {0}")]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn reader(pairs: &[(&str, &str)]) -> impl FnMut(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let cfg = PolicyConfig::from_reader(reader(&[]));
        assert_eq!(cfg, PolicyConfig::default());
        assert_eq!(cfg.risk_model(), RiskModel::statistical());
    }

    #[test]
    fn env_selects_kind_and_threshold() {
        let cfg = PolicyConfig::from_reader(reader(&[
            ("KITTEN_POLICY", " Naive "),
            ("KITTEN_RISK_THRESHOLD", "0.35"),
            ("KITTEN_FORESIGHT_COOLDOWN", "4"),
            ("KITTEN_SEED", "77"),
        ]));
        assert_eq!(cfg.kind, PolicyKind::Cautious);
        assert_eq!(cfg.risk, Some(RiskModel::Statistical { threshold: 0.35 }));
        assert_eq!(cfg.foresight_cooldown, 4);
        assert_eq!(cfg.seed, Some(77));
    }

    #[test]
    fn env_rejects_out_of_range_threshold() {
        let cfg = PolicyConfig::from_reader(reader(&[
            ("KITTEN_RISK_MODEL", "statistical"),
            ("KITTEN_RISK_THRESHOLD", "1.5"),
        ]));
        assert_eq!(cfg.risk, Some(RiskModel::statistical()));
    }

    #[test]
    fn env_risk_model_ignores_case() {
        let cfg = PolicyConfig::from_reader(reader(&[("KITTEN_RISK_MODEL", " Statistical ")]));
        assert_eq!(cfg.risk, Some(RiskModel::statistical()));

        let cfg = PolicyConfig::from_reader(reader(&[
            ("KITTEN_POLICY", "foresight"),
            ("KITTEN_RISK_MODEL", "NAIVE"),
        ]));
        assert_eq!(cfg.risk_model(), RiskModel::Naive);
    }

    #[test]
    fn kind_supplies_default_risk() {
        let cfg = PolicyConfig {
            kind: PolicyKind::Cautious,
            ..PolicyConfig::default()
        };
        assert_eq!(cfg.risk_model(), RiskModel::Naive);
    }

    #[test]
    fn yaml_roundtrip_of_fields() {
        let cfg = PolicyConfig::from_yaml(
            r#"
kind: statistical
risk:
  model: statistical
  threshold: 0.25
foresight_cooldown: 3
seed: 11
"#,
        )
        .expect("valid yaml");
        assert_eq!(cfg.kind, PolicyKind::Statistical);
        assert_eq!(cfg.risk_model(), RiskModel::Statistical { threshold: 0.25 });
        assert_eq!(cfg.foresight_cooldown, 3);
        assert_eq!(cfg.seed, Some(11));
    }

    #[test]
    fn yaml_with_bad_threshold_is_invalid() {
        let err = PolicyConfig::from_yaml("risk:\n  model: statistical\n  threshold: -0.5\n")
            .expect_err("negative threshold rejected");
        assert!(matches!(
            err,
            ConfigError::Invalid(ValidationError::InvalidField { ref field, .. })
                if field == "risk.threshold"
        ));
    }

    #[test]
    fn yaml_with_unknown_kind_fails_to_parse() {
        let err = PolicyConfig::from_yaml("kind: reckless\n").expect_err("unknown kind");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn build_names_match_kind() {
        for (kind, name) in [
            (PolicyKind::Foresight, "foresight"),
            (PolicyKind::Statistical, "statistical"),
            (PolicyKind::Cautious, "cautious"),
        ] {
            let cfg = PolicyConfig {
                kind,
                seed: Some(1),
                ..PolicyConfig::default()
            };
            assert_eq!(cfg.build().name(), name);
        }
    }
}
