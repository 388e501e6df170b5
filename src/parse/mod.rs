//! Turning hand history text into finished hands.
//!
//! Input is decoded ([`encoding`]), split into one segment per hand
//! ([`Segmenter`], or [`TailFollower`] for a growing file) and each segment
//! goes to the first [`SiteAdapter`] that recognizes it. Adapters only
//! extract [`HandEvent`]s. [`build_hand`] runs the extraction passes in a
//! fixed order and applies the events to a [`crate::hand::Hand`].
//!
//! The [`Importer`] drives all of that, applies the [`ErrorPolicy`],
//! drops duplicate hands and computes stats for every parsed hand.
//!
//! ```no_run
//! use rs_poker_tracker::parse::{ImportConfig, Importer};
//!
//! let mut importer = Importer::new(ImportConfig::default()).unwrap();
//! let report = importer.import_reader(std::fs::File::open("session.txt").unwrap()).unwrap();
//! for parsed in report.parsed() {
//!     println!("{} {}", parsed.hand.hand_id, parsed.stats.players_vpi);
//! }
//! ```

mod errors;
pub use self::errors::{ImportError, ParseError};

/// Input decoding with fallback.
pub mod encoding;
pub use self::encoding::{decode_with_fallback, Encoding};

/// Hand boundaries and tail following.
mod segment;
/// Export `Segment`, `Segmenter`, `TailFollower` and `StopHandle`
pub use self::segment::{Segment, Segmenter, StopHandle, TailFollower};

/// Caller supplied configuration.
mod config;
/// Export the configuration structs
pub use self::config::{ErrorPolicy, ImportConfig, SiteConfig, DEFAULT_HAND_BOUNDARY};

/// The adapter contract.
mod site;
/// Export `SiteAdapter` and the values it extracts
pub use self::site::{HandEvent, HandHeader, SeatInfo, SiteAdapter, StatedTotals, StreetSpans};

/// Site local header times.
pub mod timestamp;

mod registry;
pub use self::registry::{AdapterFactory, SiteRegistry};

/// Fixed order extraction into the hand model.
mod builder;
/// Export `build_hand` and `apply`
pub use self::builder::{apply, build_hand};

/// Sequential and parallel import driver.
mod importer;
/// Export `Importer` and its report types
pub use self::importer::{FailedHand, ImportOutcome, ImportReport, ImportSummary, Importer, ParsedHand};

pub mod sites;
