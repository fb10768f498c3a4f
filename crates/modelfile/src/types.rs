//! Modelfile data model.

use serde::{Deserialize, Serialize};

/// Default upper bound on a single scanner token (64 KiB).
pub const DEFAULT_MAX_TOKEN_SIZE: usize = 64 * 1024;

//  Directive

/// One parsed instruction: a directive name plus its raw argument text.
///
/// Reserved keywords are stored lowercase (`from`, `template`, ...).
/// `PARAMETER` lines are stored under their own sub-key, so
/// `PARAMETER stop "###"` becomes `{ name: "stop", args: "###" }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Directive {
    pub name: String,
    pub args: String,
}

impl Directive {
    pub fn new(name: impl Into<String>, args: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: args.into(),
        }
    }
}

//  Keyword

/// Reserved directive keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    From,
    License,
    Template,
    System,
    Prompt,
    Adapter,
    Parameter,
}

impl Keyword {
    pub const ALL: [Keyword; 7] = [
        Self::From,
        Self::License,
        Self::Template,
        Self::System,
        Self::Prompt,
        Self::Adapter,
        Self::Parameter,
    ];

    /// Lowercase name, as stored in [`Directive::name`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::From => "from",
            Self::License => "license",
            Self::Template => "template",
            Self::System => "system",
            Self::Prompt => "prompt",
            Self::Adapter => "adapter",
            Self::Parameter => "parameter",
        }
    }

    /// Uppercase spelling used on output.
    pub fn as_upper(self) -> &'static str {
        match self {
            Self::From => "FROM",
            Self::License => "LICENSE",
            Self::Template => "TEMPLATE",
            Self::System => "SYSTEM",
            Self::Prompt => "PROMPT",
            Self::Adapter => "ADAPTER",
            Self::Parameter => "PARAMETER",
        }
    }

    /// Case-insensitive match of a keyword as written in a Modelfile.
    pub fn parse(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(word))
    }

    /// Exact match against a stored directive name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

//  Options

/// Tunables for [`crate::parse_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Largest logical line (including quoted blocks) the scanner will buffer.
    #[serde(default = "default_max_token_size")]
    pub max_token_size: usize,
}

fn default_max_token_size() -> usize {
    DEFAULT_MAX_TOKEN_SIZE
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_token_size: default_max_token_size(),
        }
    }
}
