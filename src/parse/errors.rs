use thiserror::Error;

use crate::core::{CardParseError, MoneyParseError};
use crate::hand::HandError;

/// Problems with the text of a single hand.
#[derive(Error, Debug, PartialEq, Eq, Clone, Hash)]
pub enum ParseError {
    #[error("Game type not recognized (hand {hand_id:?})")]
    GameTypeUnrecognized { hand_id: Option<String> },
    #[error("Required field missing: {0}")]
    MissingField(&'static str),
    #[error("Unknown action line '{0}'")]
    UnknownAction(String),
    #[error("Bring-in line without a matching player: '{0}'")]
    UnmatchedBringIn(String),
    #[error("Invalid card")]
    Card(#[from] CardParseError),
    #[error("Invalid money amount")]
    Money(#[from] MoneyParseError),
    #[error("Input could not be decoded with any of {0}")]
    Undecodable(String),
    #[error("Invalid pattern: {0}")]
    Pattern(String),
    #[error("No adapter registered for site '{0}'")]
    UnknownSite(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Player patterns were not compiled before extraction")]
    PatternsNotCompiled,
}

impl From<regex::Error> for ParseError {
    fn from(err: regex::Error) -> Self {
        ParseError::Pattern(err.to_string())
    }
}

/// Why a segment of input did not produce a hand.
///
/// `Accounting` is kept apart from `Parse`: it means the hand model
/// refused the events, which points at an adapter bug rather than odd
/// input.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Segment at offset {offset} is not a hand")]
    Segmentation { offset: usize },
    #[error("Game type detection failed (hand {hand_id:?})")]
    GameType {
        hand_id: Option<String>,
        #[source]
        source: ParseError,
    },
    #[error("Parse error in hand {hand_id:?}")]
    Parse {
        hand_id: Option<String>,
        #[source]
        source: ParseError,
    },
    #[error("Money accounting violated in hand {hand_id:?}")]
    Accounting {
        hand_id: Option<String>,
        #[source]
        source: HandError,
    },
    #[error("Import aborted at offset {offset}")]
    Aborted {
        offset: usize,
        #[source]
        source: Box<ImportError>,
    },
    #[error("Reading input failed")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error("Writing records failed")]
    Json(#[from] serde_json::Error),
}

impl ImportError {
    pub fn hand_id(&self) -> Option<&str> {
        match self {
            ImportError::GameType { hand_id, .. }
            | ImportError::Parse { hand_id, .. }
            | ImportError::Accounting { hand_id, .. } => hand_id.as_deref(),
            ImportError::Aborted { source, .. } => source.hand_id(),
            _ => None,
        }
    }

    pub fn is_accounting(&self) -> bool {
        match self {
            ImportError::Accounting { .. } => true,
            ImportError::Aborted { source, .. } => source.is_accounting(),
            _ => false,
        }
    }
}
