use std::collections::BTreeSet;
use std::io::Read;

use tracing::{debug, instrument, warn};

use crate::hand::{Hand, HandError, HandRecord};
use crate::stats::{self, HandStats};

use super::builder::build_hand;
use super::config::{ErrorPolicy, ImportConfig, SiteConfig};
use super::encoding::decode_with_fallback;
use super::errors::{ImportError, ParseError};
use super::registry::SiteRegistry;
use super::segment::{Segment, Segmenter, TailFollower};
use super::site::SiteAdapter;

/// A hand that made it through parsing, accounting and stats.
#[derive(Debug, Clone)]
pub struct ParsedHand {
    pub offset: usize,
    pub hand: Hand,
    pub record: HandRecord,
    pub stats: HandStats,
}

/// A segment that did not produce a hand, kept with its raw text.
#[derive(Debug)]
pub struct FailedHand {
    pub offset: usize,
    pub raw: String,
    pub hand_id: Option<String>,
    pub error: ImportError,
}

#[derive(Debug)]
pub enum ImportOutcome {
    Parsed(Box<ParsedHand>),
    /// Same site and hand id as a hand parsed earlier in this importer.
    Duplicate { hand_id: String, offset: usize },
    Failed(FailedHand),
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub parsed: usize,
    pub duplicates: usize,
    /// Segments a site recognized that then failed.
    pub failed: usize,
    /// Segments no site recognized.
    pub unrecognized: usize,
}

/// Outcomes in input order and their counts.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub outcomes: Vec<ImportOutcome>,
    pub summary: ImportSummary,
}

impl ImportReport {
    pub fn push(&mut self, outcome: ImportOutcome) {
        match &outcome {
            ImportOutcome::Parsed(_) => self.summary.parsed += 1,
            ImportOutcome::Duplicate { .. } => self.summary.duplicates += 1,
            ImportOutcome::Failed(FailedHand {
                error: ImportError::Segmentation { .. },
                ..
            }) => self.summary.unrecognized += 1,
            ImportOutcome::Failed(_) => self.summary.failed += 1,
        }
        self.outcomes.push(outcome);
    }

    pub fn parsed(&self) -> impl Iterator<Item = &ParsedHand> {
        self.outcomes.iter().filter_map(|o| match o {
            ImportOutcome::Parsed(p) => Some(p.as_ref()),
            _ => None,
        })
    }

    pub fn failed(&self) -> impl Iterator<Item = &FailedHand> {
        self.outcomes.iter().filter_map(|o| match o {
            ImportOutcome::Failed(f) => Some(f),
            _ => None,
        })
    }

    /// One JSON object per parsed hand and line, holding its record and
    /// its stats.
    #[cfg(feature = "serde")]
    pub fn write_json_lines<W: std::io::Write>(&self, mut writer: W) -> Result<(), ImportError> {
        #[derive(serde::Serialize)]
        struct Line<'a> {
            record: &'a HandRecord,
            stats: &'a HandStats,
        }
        for parsed in self.parsed() {
            serde_json::to_writer(
                &mut writer,
                &Line {
                    record: &parsed.record,
                    stats: &parsed.stats,
                },
            )?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn build_adapters(registry: &SiteRegistry, sites: &[SiteConfig]) -> Result<Vec<Box<dyn SiteAdapter>>, ParseError> {
    sites.iter().map(|site| registry.create(site)).collect()
}

/// Parse one segment with the first adapter that claims it.
fn parse_segment(
    adapters: &mut [Box<dyn SiteAdapter>],
    sites: &[SiteConfig],
    segment: &Segment,
) -> Result<ParsedHand, ImportError> {
    let Some(idx) = adapters.iter().position(|a| a.looks_like_hand(&segment.text)) else {
        return Err(ImportError::Segmentation {
            offset: segment.offset,
        });
    };
    let hand = build_hand(adapters[idx].as_mut(), &segment.text, sites[idx].hero.as_deref())?;
    let accounting = |source: HandError| ImportError::Accounting {
        hand_id: Some(hand.hand_id.clone()),
        source,
    };
    let record = HandRecord::from_hand(&hand).map_err(accounting)?;
    let stats = stats::compute(&hand).map_err(accounting)?;
    Ok(ParsedHand {
        offset: segment.offset,
        hand,
        record,
        stats,
    })
}

/// Drives segmentation, site detection, parsing and stats for a stream of
/// hand histories.
///
/// Duplicate detection spans every call on the same importer, so a
/// directory can be imported file by file.
pub struct Importer {
    config: ImportConfig,
    registry: SiteRegistry,
    adapters: Vec<Box<dyn SiteAdapter>>,
    segmenter: Segmenter,
    seen: BTreeSet<(String, String)>,
}

impl std::fmt::Debug for Importer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Importer")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("seen", &self.seen.len())
            .finish()
    }
}

impl Importer {
    /// An importer with the adapters this crate ships.
    pub fn new(config: ImportConfig) -> Result<Self, ParseError> {
        Self::with_registry(config, SiteRegistry::with_builtin_sites())
    }

    pub fn with_registry(config: ImportConfig, registry: SiteRegistry) -> Result<Self, ParseError> {
        config.validate()?;
        let adapters = build_adapters(&registry, &config.sites)?;
        let segmenter = Segmenter::new(&config.sites[0].hand_boundary)?;
        debug!(
            sites = config.sites.len(),
            policy = ?config.error_policy,
            "Created importer"
        );
        Ok(Importer {
            config,
            registry,
            adapters,
            segmenter,
            seen: BTreeSet::new(),
        })
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Decode raw bytes with the default site's encodings and import them.
    pub fn import_bytes(&mut self, bytes: &[u8]) -> Result<ImportReport, ImportError> {
        let (text, encoding) = decode_with_fallback(bytes, &self.config.sites[0].encodings)
            .map_err(|source| ImportError::Parse {
                hand_id: None,
                source,
            })?;
        debug!(%encoding, bytes = bytes.len(), "Decoded input");
        self.import_str(&text)
    }

    pub fn import_reader<R: Read>(&mut self, mut reader: R) -> Result<ImportReport, ImportError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.import_bytes(&bytes)
    }

    #[instrument(level = "debug", skip(self, text), fields(len = text.len()))]
    pub fn import_str(&mut self, text: &str) -> Result<ImportReport, ImportError> {
        let segments = self.segmenter.split(text);
        debug!(segments = segments.len(), "Split input");
        self.import(segments)
    }

    /// Import already split segments, on the rayon pool when configured.
    pub fn import(&mut self, segments: Vec<Segment>) -> Result<ImportReport, ImportError> {
        #[cfg(feature = "parallel")]
        {
            if self.config.parallel {
                return self.import_parallel(segments);
            }
        }
        self.import_sequential(segments)
    }

    pub fn import_sequential(&mut self, segments: Vec<Segment>) -> Result<ImportReport, ImportError> {
        let mut report = ImportReport::default();
        for segment in segments {
            let outcome = self.import_segment(segment)?;
            report.push(outcome);
        }
        Ok(report)
    }

    /// Parse every segment on the rayon pool. Each worker builds its own
    /// adapters. Duplicates and the error policy are applied afterwards in
    /// input order, so the report equals the sequential one.
    #[cfg(feature = "parallel")]
    pub fn import_parallel(&mut self, segments: Vec<Segment>) -> Result<ImportReport, ImportError> {
        use rayon::prelude::*;

        let registry = &self.registry;
        let sites = &self.config.sites;
        let results: Vec<Result<ParsedHand, ImportError>> = segments
            .par_iter()
            .map_init(
                || build_adapters(registry, sites),
                |adapters, segment| match adapters {
                    Ok(adapters) => parse_segment(adapters, sites, segment),
                    Err(e) => Err(ImportError::Parse {
                        hand_id: None,
                        source: e.clone(),
                    }),
                },
            )
            .collect();

        let mut report = ImportReport::default();
        for (segment, result) in segments.into_iter().zip(results) {
            let outcome = self.settle(segment, result)?;
            report.push(outcome);
        }
        Ok(report)
    }

    /// Parse a single segment, for callers that segment on their own such
    /// as a [`TailFollower`].
    pub fn import_segment(&mut self, segment: Segment) -> Result<ImportOutcome, ImportError> {
        let result = parse_segment(&mut self.adapters, &self.config.sites, &segment);
        self.settle(segment, result)
    }

    /// Follow a growing source with the default site's boundary and
    /// encodings. Feed the segments it yields to
    /// [`Importer::import_segment`].
    pub fn tail<R: Read>(&self, reader: R) -> TailFollower<R> {
        TailFollower::new(
            reader,
            self.segmenter.clone(),
            self.config.sites[0].encodings.clone(),
        )
    }

    fn settle(&mut self, segment: Segment, result: Result<ParsedHand, ImportError>) -> Result<ImportOutcome, ImportError> {
        match result {
            Ok(parsed) => {
                let key = (parsed.hand.site.clone(), parsed.hand.hand_id.clone());
                if self.seen.insert(key) {
                    Ok(ImportOutcome::Parsed(Box::new(parsed)))
                } else {
                    debug!(hand_id = %parsed.hand.hand_id, offset = segment.offset, "Skipping duplicate hand");
                    Ok(ImportOutcome::Duplicate {
                        hand_id: parsed.hand.hand_id,
                        offset: segment.offset,
                    })
                }
            }
            Err(error @ ImportError::Segmentation { .. }) => {
                warn!(offset = segment.offset, "Segment is not a hand of any configured site");
                Ok(ImportOutcome::Failed(FailedHand {
                    offset: segment.offset,
                    raw: segment.text,
                    hand_id: None,
                    error,
                }))
            }
            Err(error) => {
                if self.config.error_policy == ErrorPolicy::Abort {
                    warn!(offset = segment.offset, %error, "Aborting import");
                    return Err(ImportError::Aborted {
                        offset: segment.offset,
                        source: Box::new(error),
                    });
                }
                let hand_id = error.hand_id().map(str::to_string);
                warn!(
                    offset = segment.offset,
                    hand_id = ?hand_id,
                    accounting = error.is_accounting(),
                    %error,
                    "Rejected hand"
                );
                Ok(ImportOutcome::Failed(FailedHand {
                    offset: segment.offset,
                    raw: segment.text,
                    hand_id,
                    error,
                }))
            }
        }
    }
}
