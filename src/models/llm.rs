//! Language models a side can be played by.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One of the models the move service knows how to drive.
///
/// The identifier is forwarded verbatim in the `model` field of every move
/// request, so the serde names must stay in sync with the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LlmModel {
    #[default]
    #[serde(rename = "gpt-3.5-turbo-instruct")]
    Gpt35TurboInstruct,
    #[serde(rename = "gemma-7b-it")]
    Gemma7bIt,
    #[serde(rename = "openchat-7b")]
    OpenChat7b,
    #[serde(rename = "mixtral-8x7b-32768")]
    Mixtral8x7b,
    #[serde(rename = "nous-capybara-7b")]
    NousCapybara7b,
    #[serde(rename = "mistral-7b-instruct")]
    Mistral7bInstruct,
}

impl LlmModel {
    /// All selectable models, in menu order.
    pub const ALL: [LlmModel; 6] = [
        LlmModel::Gpt35TurboInstruct,
        LlmModel::Gemma7bIt,
        LlmModel::OpenChat7b,
        LlmModel::Mixtral8x7b,
        LlmModel::NousCapybara7b,
        LlmModel::Mistral7bInstruct,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            LlmModel::Gpt35TurboInstruct => "gpt-3.5-turbo-instruct",
            LlmModel::Gemma7bIt => "gemma-7b-it",
            LlmModel::OpenChat7b => "openchat-7b",
            LlmModel::Mixtral8x7b => "mixtral-8x7b-32768",
            LlmModel::NousCapybara7b => "nous-capybara-7b",
            LlmModel::Mistral7bInstruct => "mistral-7b-instruct",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LlmModel::Gpt35TurboInstruct => "GPT 3.5 Turbo",
            LlmModel::Gemma7bIt => "Google: Gemma 7B",
            LlmModel::OpenChat7b => "OpenChat 3.5",
            LlmModel::Mixtral8x7b => "Groq",
            LlmModel::NousCapybara7b => "Nous: Capybara 7B",
            LlmModel::Mistral7bInstruct => "Mistral 7B Instruct",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }

    /// Next model in menu order, wrapping around
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous model in menu order, wrapping around
    pub fn prev(&self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }
}

impl fmt::Display for LlmModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LlmModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.id() == wanted)
            .ok_or_else(|| Error::UnknownModel(wanted.to_string()))
    }
}
