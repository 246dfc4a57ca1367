use serde::{Deserialize, Serialize};

/// Translation quality tier. Selects both the model and generation limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    High,
    #[default]
    Balanced,
    Fast,
}

/// Sampling parameters handed to the inference backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Quality {
    pub const ALL: [Quality; 3] = [Quality::High, Quality::Balanced, Quality::Fast];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::High => "high",
            Quality::Balanced => "balanced",
            Quality::Fast => "fast",
        }
    }

    /// Full-precision model served by the transformers backend.
    pub fn transformers_model(&self) -> &'static str {
        match self {
            Quality::High => "Qwen/Qwen3-14B",
            Quality::Balanced => "Qwen/Qwen2.5-7B-Instruct",
            Quality::Fast => "Qwen/Qwen2.5-3B-Instruct",
        }
    }

    /// 8-bit quantized model served by the MLX backend.
    pub fn mlx_model(&self) -> &'static str {
        match self {
            Quality::High => "mlx-community/Qwen2.5-14B-Instruct-8bit",
            Quality::Balanced => "mlx-community/Qwen2.5-7B-Instruct-8bit",
            Quality::Fast => "mlx-community/Qwen2.5-3B-Instruct-8bit",
        }
    }

    pub fn settings(&self) -> GenerationSettings {
        match self {
            Quality::High => GenerationSettings {
                max_tokens: 2048,
                temperature: 0.1,
                top_p: 0.95,
            },
            Quality::Balanced => GenerationSettings {
                max_tokens: 1536,
                temperature: 0.2,
                top_p: 0.9,
            },
            Quality::Fast => GenerationSettings {
                max_tokens: 512,
                temperature: 0.2,
                top_p: 0.9,
            },
        }
    }

    /// Human-readable description for the quality info endpoint.
    pub fn description(&self) -> &'static str {
        match self {
            Quality::High => "highest quality, slowest",
            Quality::Balanced => "good quality at moderate speed",
            Quality::Fast => "fastest, smallest model",
        }
    }
}

impl std::str::FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Quality::High),
            "balanced" => Ok(Quality::Balanced),
            "fast" => Ok(Quality::Fast),
            other => Err(format!(
                "invalid quality '{other}', expected 'high', 'balanced', or 'fast'"
            )),
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_tiers() {
        assert_eq!("high".parse::<Quality>().unwrap(), Quality::High);
        assert_eq!("balanced".parse::<Quality>().unwrap(), Quality::Balanced);
        assert_eq!("fast".parse::<Quality>().unwrap(), Quality::Fast);
    }

    #[test]
    fn rejects_unknown_tier() {
        assert!("ultra".parse::<Quality>().is_err());
    }

    #[test]
    fn fast_tier_uses_fewest_tokens() {
        assert_eq!(Quality::Fast.settings().max_tokens, 512);
        assert_eq!(Quality::High.settings().max_tokens, 2048);
    }

    #[test]
    fn serde_roundtrip_is_lowercase() {
        let json = serde_json::to_string(&Quality::Balanced).unwrap();
        assert_eq!(json, "\"balanced\"");
        let q: Quality = serde_json::from_str("\"fast\"").unwrap();
        assert_eq!(q, Quality::Fast);
    }
}
