//! Output formats and the prompt table behind them.
//!
//! Each format carries the system prompt the model is given and the
//! sampling parameters used for it. Prompts are loaded from `prompts/*.txt`
//! at compile time using `include_str!`, making them easy to edit without
//! dealing with Rust string syntax.
//!
//! The formatting rules inside the prompts (bullet characters, `i/N` thread
//! numbering, the LinkedIn hashtag footer) are instructions for the model.
//! Nothing here checks that the model followed them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Instruction and sampling parameters for one output format
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputFormatSpec {
    pub id: OutputFormat,
    pub system_prompt: &'static str,
    pub max_tokens: u32,
    pub temperature: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Summary,
    Bullets,
    Takeaways,
    Tweet,
    Thread,
    Linkedin,
}

static FORMATS: [OutputFormatSpec; 6] = [
    OutputFormatSpec {
        id: OutputFormat::Summary,
        system_prompt: include_str!("prompts/summary.txt"),
        max_tokens: 500,
        temperature: 0.7,
    },
    OutputFormatSpec {
        id: OutputFormat::Bullets,
        system_prompt: include_str!("prompts/bullets.txt"),
        max_tokens: 400,
        temperature: 0.5,
    },
    OutputFormatSpec {
        id: OutputFormat::Takeaways,
        system_prompt: include_str!("prompts/takeaways.txt"),
        max_tokens: 350,
        temperature: 0.6,
    },
    OutputFormatSpec {
        id: OutputFormat::Tweet,
        system_prompt: include_str!("prompts/tweet.txt"),
        max_tokens: 60,
        temperature: 0.8,
    },
    OutputFormatSpec {
        id: OutputFormat::Thread,
        system_prompt: include_str!("prompts/thread.txt"),
        max_tokens: 400,
        temperature: 0.7,
    },
    OutputFormatSpec {
        id: OutputFormat::Linkedin,
        system_prompt: include_str!("prompts/linkedin.txt"),
        max_tokens: 350,
        temperature: 0.7,
    },
];

impl OutputFormat {
    /// Every supported format, in menu order
    pub const ALL: [OutputFormat; 6] = [
        OutputFormat::Summary,
        OutputFormat::Bullets,
        OutputFormat::Takeaways,
        OutputFormat::Tweet,
        OutputFormat::Thread,
        OutputFormat::Linkedin,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            OutputFormat::Summary => "summary",
            OutputFormat::Bullets => "bullets",
            OutputFormat::Takeaways => "takeaways",
            OutputFormat::Tweet => "tweet",
            OutputFormat::Thread => "thread",
            OutputFormat::Linkedin => "linkedin",
        }
    }

    /// Look up the prompt and sampling parameters for this format
    pub fn spec(&self) -> &'static OutputFormatSpec {
        &FORMATS[*self as usize]
    }

    /// Registry lookup by id; `None` for unknown ids
    pub fn lookup(id: &str) -> Option<&'static OutputFormatSpec> {
        FORMATS.iter().find(|spec| spec.id.id() == id)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::lookup(s)
            .map(|spec| spec.id)
            .ok_or_else(|| format!("Unknown output format: {}", s))
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
