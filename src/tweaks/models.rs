use std::fmt;
use std::str::FromStr;
use clap::ValueEnum;
use anyhow::{anyhow, Result};

/// Chat models offered for the flow's OpenAI component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ChatModel {
    #[default]
    #[value(name = "gpt-4o")]
    Gpt4o,
    #[value(name = "gpt-4o-mini")]
    Gpt4oMini,
    #[value(name = "gpt-4-turbo")]
    Gpt4Turbo,
    #[value(name = "gpt-4-turbo-preview")]
    Gpt4TurboPreview,
    #[value(name = "gpt-4")]
    Gpt4,
    #[value(name = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[value(name = "gpt-3.5-turbo-125")]
    Gpt35Turbo125,
}

impl ChatModel {
    pub const ALL: [ChatModel; 7] = [
        ChatModel::Gpt4o,
        ChatModel::Gpt4oMini,
        ChatModel::Gpt4Turbo,
        ChatModel::Gpt4TurboPreview,
        ChatModel::Gpt4,
        ChatModel::Gpt35Turbo,
        ChatModel::Gpt35Turbo125,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatModel::Gpt4o => "gpt-4o",
            ChatModel::Gpt4oMini => "gpt-4o-mini",
            ChatModel::Gpt4Turbo => "gpt-4-turbo",
            ChatModel::Gpt4TurboPreview => "gpt-4-turbo-preview",
            ChatModel::Gpt4 => "gpt-4",
            ChatModel::Gpt35Turbo => "gpt-3.5-turbo",
            ChatModel::Gpt35Turbo125 => "gpt-3.5-turbo-125",
        }
    }
}

impl fmt::Display for ChatModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatModel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|model| model.as_str() == s)
            .ok_or_else(|| anyhow!("Unknown model '{}' (expected one of: {})", s, names(&Self::ALL)))
    }
}

/// Embedding models offered for the flow's OpenAI embeddings component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EmbeddingModel {
    #[default]
    #[value(name = "text-embedding-3-small")]
    TextEmbedding3Small,
    #[value(name = "text-embedding-3-large")]
    TextEmbedding3Large,
    #[value(name = "text-embedding-ada-002")]
    TextEmbeddingAda002,
}

impl EmbeddingModel {
    pub const ALL: [EmbeddingModel; 3] = [
        EmbeddingModel::TextEmbedding3Small,
        EmbeddingModel::TextEmbedding3Large,
        EmbeddingModel::TextEmbeddingAda002,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmbeddingModel::TextEmbedding3Small => "text-embedding-3-small",
            EmbeddingModel::TextEmbedding3Large => "text-embedding-3-large",
            EmbeddingModel::TextEmbeddingAda002 => "text-embedding-ada-002",
        }
    }
}

impl fmt::Display for EmbeddingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmbeddingModel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|model| model.as_str() == s)
            .ok_or_else(|| anyhow!("Unknown embedding model '{}' (expected one of: {})", s, names(&Self::ALL)))
    }
}

/// Sampling temperature, always within `0.0..=1.0` and on a 0.01 grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperature(f64);

impl Temperature {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 1.0;
    pub const DEFAULT: f64 = 0.7;
    pub const STEPS: f64 = 100.0;

    /// Rounds to the nearest 0.01 so the shown value is the one sent.
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self((value * Self::STEPS).round() / Self::STEPS))
        } else {
            Err(anyhow!("Temperature must be between {} and {}, got {}", Self::MIN, Self::MAX, value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Temperature {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Temperature {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| anyhow!("Temperature must be a number, got '{}'", s))?;
        Self::new(value)
    }
}

fn names<T: fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_models_keep_menu_order() {
        let listed: Vec<_> = ChatModel::ALL.iter().map(ChatModel::as_str).collect();
        assert_eq!(
            listed,
            [
                "gpt-4o",
                "gpt-4o-mini",
                "gpt-4-turbo",
                "gpt-4-turbo-preview",
                "gpt-4",
                "gpt-3.5-turbo",
                "gpt-3.5-turbo-125",
            ]
        );
        assert_eq!(ChatModel::default(), ChatModel::Gpt4o);
    }

    #[test]
    fn clap_names_match_display() {
        for model in ChatModel::ALL {
            let parsed = <ChatModel as ValueEnum>::from_str(model.as_str(), false).unwrap();
            assert_eq!(parsed, model);
        }
        for model in EmbeddingModel::ALL {
            let parsed = <EmbeddingModel as ValueEnum>::from_str(model.as_str(), false).unwrap();
            assert_eq!(parsed, model);
        }
    }

    #[test]
    fn unknown_model_lists_choices() {
        let err = "gpt-5".parse::<ChatModel>().unwrap_err();
        assert!(err.to_string().contains("gpt-4o-mini"));
        assert!("ada".parse::<EmbeddingModel>().is_err());
    }

    #[test]
    fn temperature_bounds_are_inclusive() {
        assert_eq!("0.0".parse::<Temperature>().unwrap().value(), 0.0);
        assert_eq!("1.0".parse::<Temperature>().unwrap().value(), 1.0);
        assert_eq!(" 0.35 ".parse::<Temperature>().unwrap().value(), 0.35);
        assert!("1.01".parse::<Temperature>().is_err());
        assert!("-0.1".parse::<Temperature>().is_err());
        assert!("NaN".parse::<Temperature>().is_err());
        assert!("warm".parse::<Temperature>().is_err());
    }

    #[test]
    fn temperature_snaps_to_hundredths() {
        let t = "0.333".parse::<Temperature>().unwrap();
        assert_eq!(t.value(), 0.33);
        assert_eq!(t.to_string(), "0.33");
        assert_eq!(Temperature::new(0.996).unwrap().value(), 1.0);
        assert_eq!(Temperature::new(0.004).unwrap().value(), 0.0);
        assert_eq!(Temperature::new(0.7).unwrap().value(), 0.7);
    }

    #[test]
    fn temperature_defaults_to_point_seven() {
        assert_eq!(Temperature::default().value(), 0.7);
        assert_eq!(Temperature::default().to_string(), "0.70");
    }
}
