//! Application settings structures.

use serde::{Deserialize, Serialize};

use crate::error::{FcgError, Result};

/// Comment generation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Google Gemini API.
    #[default]
    Gemini,
    /// OpenAI API (and OpenAI-compatible APIs).
    #[serde(rename = "openai")]
    OpenAI,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Gemini => write!(f, "gemini"),
            Provider::OpenAI => write!(f, "openai"),
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(Provider::Gemini),
            "openai" => Ok(Provider::OpenAI),
            _ => Err(format!("Unknown provider: '{}'", s)),
        }
    }
}

impl Provider {
    /// Default model id for this backend.
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini-2.5-flash",
            Provider::OpenAI => "gpt-4o",
        }
    }
}

/// How generated text refers to the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PronounMode {
    /// Prefer the student's name over pronouns.
    Name,
    /// Second person, speaking directly to the student.
    You,
    /// Third person 他/她.
    HeShe,
    /// Neutral 該生 form.
    #[default]
    Student,
}

impl std::str::FromStr for PronounMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(PronounMode::Name),
            "you" => Ok(PronounMode::You),
            "he_she" => Ok(PronounMode::HeShe),
            "student" => Ok(PronounMode::Student),
            _ => Err(format!("Unknown pronoun mode: '{}'", s)),
        }
    }
}

/// Rhetorical shape of the generated comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureMode {
    /// Unconstrained flow.
    #[default]
    Free,
    /// Praise, improvement area, encouragement ordering.
    Sandwich,
    /// Bulleted praise/performance/suggestion sections.
    Points,
}

impl std::str::FromStr for StructureMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(StructureMode::Free),
            "sandwich" => Ok(StructureMode::Sandwich),
            "points" => Ok(StructureMode::Points),
            _ => Err(format!("Unknown structure mode: '{}'", s)),
        }
    }
}

fn default_gemini_model() -> String {
    Provider::Gemini.default_model().to_string()
}

fn default_openai_model() -> String {
    Provider::OpenAI.default_model().to_string()
}

fn default_word_count() -> u32 {
    100
}

/// Built-in style labels offered by the UI.
pub fn default_styles() -> Vec<String> {
    [
        "口語人性化",
        "鼓勵型",
        "幽默",
        "溫馨",
        "分析型",
        "詩意",
        "個性化",
        "目標導向",
        "故事型",
        "十六箴言",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_selected_styles() -> Vec<String> {
    vec!["溫馨".to_string()]
}

/// Application settings.
///
/// Loaded from `~/.config/fcg/config.toml` plus `FCG__*` environment
/// overrides. The generation core never writes this structure; every
/// orchestrator call receives an immutable snapshot, so a key or model
/// change is picked up on the very next call.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppSettings {
    /// Active backend.
    pub provider: Provider,

    /// Gemini API key.
    #[serde(skip_serializing)]
    pub api_key: String,

    /// OpenAI API key.
    #[serde(skip_serializing)]
    pub openai_key: String,

    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Custom Gemini endpoint (proxies, mock servers).
    pub gemini_endpoint: Option<String>,

    /// Custom OpenAI-compatible endpoint.
    pub openai_endpoint: Option<String>,

    pub pronoun_mode: PronounMode,

    pub structure_mode: StructureMode,

    /// Target comment length in characters (advisory; passed through to
    /// the model as an instruction, never enforced here).
    #[serde(default = "default_word_count")]
    pub target_word_count: u32,

    /// Style labels available for selection.
    #[serde(default = "default_styles")]
    pub styles: Vec<String>,

    /// Styles applied to unattended generation (joined with " + ").
    #[serde(default = "default_selected_styles")]
    pub selected_styles: Vec<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            api_key: String::new(),
            openai_key: String::new(),
            gemini_model: default_gemini_model(),
            openai_model: default_openai_model(),
            gemini_endpoint: None,
            openai_endpoint: None,
            pronoun_mode: PronounMode::default(),
            structure_mode: StructureMode::default(),
            target_word_count: default_word_count(),
            styles: default_styles(),
            selected_styles: default_selected_styles(),
        }
    }
}

impl std::fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppSettings")
            .field("provider", &self.provider)
            .field("api_key", &mask_api_key(&self.api_key))
            .field("openai_key", &mask_api_key(&self.openai_key))
            .field("gemini_model", &self.gemini_model)
            .field("openai_model", &self.openai_model)
            .field("pronoun_mode", &self.pronoun_mode)
            .field("structure_mode", &self.structure_mode)
            .field("target_word_count", &self.target_word_count)
            .field("selected_styles", &self.selected_styles)
            .finish()
    }
}

/// Masks an API key for logs, keeping a short prefix.
pub fn mask_api_key(key: &str) -> String {
    if key.is_empty() {
        return "<empty>".to_string();
    }
    if key.len() <= 8 {
        return "****".to_string();
    }
    format!("{}****", &key[..4])
}

impl AppSettings {
    /// Credential for the active provider.
    pub fn active_key(&self) -> &str {
        match self.provider {
            Provider::Gemini => &self.api_key,
            Provider::OpenAI => &self.openai_key,
        }
    }

    /// Model id for the active provider.
    pub fn active_model(&self) -> &str {
        match self.provider {
            Provider::Gemini => &self.gemini_model,
            Provider::OpenAI => &self.openai_model,
        }
    }

    /// Style label for unattended generation: the selected styles joined
    /// with " + ", falling back to 溫馨 when nothing is selected.
    pub fn style_label(&self) -> String {
        if self.selected_styles.is_empty() {
            "溫馨".to_string()
        } else {
            self.selected_styles.join(" + ")
        }
    }

    /// Throwaway overlay used by key validation: only the field under
    /// test is replaced, the receiver is left untouched.
    pub fn with_candidate_key(
        &self,
        key: &str,
        provider: Provider,
        model_id: Option<&str>,
    ) -> AppSettings {
        let mut overlay = self.clone();
        overlay.provider = provider;
        match provider {
            Provider::Gemini => {
                overlay.api_key = key.to_string();
                if let Some(model) = model_id {
                    overlay.gemini_model = model.to_string();
                }
            }
            Provider::OpenAI => {
                overlay.openai_key = key.to_string();
                if let Some(model) = model_id {
                    overlay.openai_model = model.to_string();
                }
            }
        }
        overlay
    }

    /// Sanity checks on loaded settings.
    pub fn validate(&self) -> Result<()> {
        if self.active_model().trim().is_empty() {
            return Err(FcgError::Config(format!(
                "Provider '{}': model id is empty",
                self.provider
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.provider, Provider::Gemini);
        assert_eq!(settings.gemini_model, "gemini-2.5-flash");
        assert_eq!(settings.openai_model, "gpt-4o");
        assert_eq!(settings.pronoun_mode, PronounMode::Student);
        assert_eq!(settings.structure_mode, StructureMode::Free);
        assert_eq!(settings.target_word_count, 100);
        assert_eq!(settings.selected_styles, vec!["溫馨".to_string()]);
    }

    #[test]
    fn test_active_key_follows_provider() {
        let mut settings = AppSettings {
            api_key: "AIza-g".to_string(),
            openai_key: "sk-o".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.active_key(), "AIza-g");
        settings.provider = Provider::OpenAI;
        assert_eq!(settings.active_key(), "sk-o");
        assert_eq!(settings.active_model(), "gpt-4o");
    }

    #[test]
    fn test_style_label_joins_with_plus() {
        let settings = AppSettings {
            selected_styles: vec!["溫馨".to_string(), "幽默".to_string()],
            ..Default::default()
        };
        assert_eq!(settings.style_label(), "溫馨 + 幽默");
    }

    #[test]
    fn test_style_label_falls_back_when_empty() {
        let settings = AppSettings {
            selected_styles: vec![],
            ..Default::default()
        };
        assert_eq!(settings.style_label(), "溫馨");
    }

    #[test]
    fn test_with_candidate_key_replaces_only_target_fields() {
        let settings = AppSettings {
            api_key: "AIza-old".to_string(),
            openai_key: "sk-old".to_string(),
            ..Default::default()
        };

        let overlay = settings.with_candidate_key("sk-new", Provider::OpenAI, Some("gpt-4o-mini"));
        assert_eq!(overlay.provider, Provider::OpenAI);
        assert_eq!(overlay.openai_key, "sk-new");
        assert_eq!(overlay.openai_model, "gpt-4o-mini");
        // Untouched fields keep their values.
        assert_eq!(overlay.api_key, "AIza-old");
        assert_eq!(overlay.gemini_model, "gemini-2.5-flash");

        // The original snapshot is never mutated.
        assert_eq!(settings.provider, Provider::Gemini);
        assert_eq!(settings.openai_key, "sk-old");
        assert_eq!(settings.openai_model, "gpt-4o");
    }

    #[test]
    fn test_provider_round_trip() {
        for (s, p) in [("gemini", Provider::Gemini), ("openai", Provider::OpenAI)] {
            assert_eq!(s.parse::<Provider>().unwrap(), p);
            assert_eq!(p.to_string(), s);
        }
        assert!("claude".parse::<Provider>().is_err());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("he_she".parse::<PronounMode>().unwrap(), PronounMode::HeShe);
        assert_eq!(
            "sandwich".parse::<StructureMode>().unwrap(),
            StructureMode::Sandwich
        );
        assert!("bullet".parse::<StructureMode>().is_err());
    }

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key(""), "<empty>");
        assert_eq!(mask_api_key("short"), "****");
        assert_eq!(mask_api_key("AIzaSyExample"), "AIza****");
    }

    #[test]
    fn test_secrets_are_not_serialized() {
        let settings = AppSettings {
            api_key: "AIza-secret".to_string(),
            ..Default::default()
        };
        let toml = toml::to_string(&settings).unwrap();
        assert!(!toml.contains("AIza-secret"));
    }
}
