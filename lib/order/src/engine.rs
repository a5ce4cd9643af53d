//! Ordering facade
//!
//! [`OrderingEngine`] runs the whole pipeline for one request: token
//! extraction, feature embedding and the distance matrix (only when the
//! strategy needs distances), then the selected strategy. The result is a
//! permutation of the input identifiers plus grouping diagnostics.
//!
//! The engine holds no state between calls; concurrent requests may share
//! one instance.

use crate::alphabetical::alphabetical_order;
use crate::config::OrderingConfig;
use crate::fuzzy::fuzzy_order;
use crate::greedy::greedy_order;
use crate::hierarchical::Dendrogram;
use crate::spectral::spectral_order;
use crate::strategy::Strategy;
use partsort_core::{ensure_unique_ids, DistanceMatrix, Error, PartRecord, Permutation, Result};
use partsort_similarity::{DistanceModel, EmbedderBuilder, FeatureEmbedder};
use partsort_tokens::{TokenExtractor, TokenSet};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Why the applied strategy differs from the requested one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Fallback {
    /// Fiedler vector not unique (disconnected graph or repeated eigenvalue)
    SpectralDegenerate,
    /// Batch exceeded `max_matrix_size`
    SizeCap { n: usize, limit: usize },
}

/// Result of one ordering request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderingOutcome {
    pub permutation: Permutation,
    pub requested: Strategy,
    pub applied: Strategy,
    /// Group label per output position, numbered by first appearance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<Fallback>,
    /// Fiedler coordinate per output position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiedler: Option<Vec<f64>>,
}

impl OrderingOutcome {
    fn empty(strategy: Strategy) -> Self {
        Self {
            permutation: Permutation::empty(),
            requested: strategy,
            applied: strategy,
            groups: None,
            fallback: None,
            fiedler: None,
        }
    }

    pub fn ids(&self) -> &[String] {
        self.permutation.ids()
    }

    /// Identifiers per group, in output order
    pub fn group_members(&self) -> Vec<Vec<String>> {
        let Some(groups) = &self.groups else {
            return Vec::new();
        };
        let count = groups.iter().max().map_or(0, |g| g + 1);
        let mut members = vec![Vec::new(); count];
        for (id, &group) in self.permutation.iter().zip(groups) {
            members[group].push(id.clone());
        }
        members
    }
}

/// Index order plus per-index diagnostics, before mapping to identifiers
struct Ranked {
    order: Vec<usize>,
    applied: Strategy,
    labels: Option<Vec<usize>>,
    fiedler: Option<Vec<f64>>,
    fallback: Option<Fallback>,
}

impl Ranked {
    fn plain(order: Vec<usize>, applied: Strategy) -> Self {
        Self {
            order,
            applied,
            labels: None,
            fiedler: None,
            fallback: None,
        }
    }
}

pub struct OrderingEngine {
    config: OrderingConfig,
    extractor: TokenExtractor,
    embedder: FeatureEmbedder,
    model: DistanceModel,
}

impl OrderingEngine {
    pub fn new(config: OrderingConfig) -> Result<Self> {
        config.validate()?;
        let extractor = match &config.vocabulary {
            Some(vocabulary) => TokenExtractor::with_vocabulary(vocabulary.clone())?,
            None => TokenExtractor::new()?,
        };
        let embedder = EmbedderBuilder::new()
            .weights(config.weights)
            .scaling(config.scaling)
            .fingerprint_dim(config.fingerprint_dim)
            .build();
        let model = DistanceModel::new(config.metric);
        Ok(Self {
            config,
            extractor,
            embedder,
            model,
        })
    }

    pub fn config(&self) -> &OrderingConfig {
        &self.config
    }

    pub fn extractor(&self) -> &TokenExtractor {
        &self.extractor
    }

    /// Strategy actually run for a batch of `n` parts
    fn effective_strategy(&self, n: usize) -> (Strategy, Option<Fallback>) {
        let requested = self.config.strategy;
        let limit = self.config.max_matrix_size;
        if requested.is_capped() && n > limit {
            warn!(
                n,
                limit,
                requested = requested.as_str(),
                fallback = self.config.oversize_fallback.as_str(),
                "batch exceeds matrix size cap"
            );
            return (self.config.oversize_fallback, Some(Fallback::SizeCap { n, limit }));
        }
        (requested, None)
    }

    /// Order a batch of parts
    pub fn order(&self, records: &[PartRecord]) -> Result<OrderingOutcome> {
        ensure_unique_ids(records)?;
        let requested = self.config.strategy;
        if records.is_empty() {
            return Ok(OrderingOutcome::empty(requested));
        }

        let n = records.len();
        let (strategy, cap) = self.effective_strategy(n);

        let mut ranked = if strategy.uses_distances() {
            let tokens = self.extractor.extract_all(records);
            let vectors = self.embedder.embed_batch(records, &tokens)?;
            let matrix = self.model.matrix(&vectors)?;
            self.rank_by_distance(strategy, &matrix)?
        } else if strategy == Strategy::Fuzzy {
            let tokens = self.extractor.extract_all(records);
            rank_fuzzy(records, &tokens)
        } else {
            Ranked::plain(alphabetical_order(records, self.config.sort_field), Strategy::Alphabetical)
        };
        ranked.fallback = cap.or(ranked.fallback);

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        self.finish(requested, &ids, ranked)
    }

    /// Order parts from a precomputed distance matrix. Only distance-based
    /// strategies apply.
    pub fn order_matrix<S: AsRef<str>>(&self, ids: &[S], matrix: &DistanceMatrix) -> Result<OrderingOutcome> {
        if ids.len() != matrix.len() {
            return Err(Error::InvalidDimension {
                expected: ids.len(),
                actual: matrix.len(),
            });
        }
        let requested = self.config.strategy;
        if !requested.uses_distances() {
            return Err(Error::invalid_parameter(
                "strategy",
                format!("{} needs part records, not a distance matrix", requested),
            ));
        }
        if ids.is_empty() {
            return Ok(OrderingOutcome::empty(requested));
        }

        let (strategy, cap) = self.effective_strategy(ids.len());
        let mut ranked = if strategy.uses_distances() {
            self.rank_by_distance(strategy, matrix)?
        } else {
            // alphabetical fallback on bare identifiers
            let records: Vec<PartRecord> = ids.iter().map(|id| PartRecord::bare(id.as_ref())).collect();
            Ranked::plain(alphabetical_order(&records, self.config.sort_field), Strategy::Alphabetical)
        };
        ranked.fallback = cap.or(ranked.fallback);

        let ids: Vec<&str> = ids.iter().map(|id| id.as_ref()).collect();
        self.finish(requested, &ids, ranked)
    }

    fn rank_by_distance(&self, strategy: Strategy, matrix: &DistanceMatrix) -> Result<Ranked> {
        match strategy {
            Strategy::Hierarchical => Ok(self.rank_hierarchical(matrix)),
            Strategy::Spectral => match spectral_order(matrix) {
                Some(spectral) => {
                    let labels = spectral.branches();
                    Ok(Ranked {
                        order: spectral.order,
                        applied: Strategy::Spectral,
                        labels: Some(labels),
                        fiedler: Some(spectral.fiedler),
                        fallback: None,
                    })
                }
                None => {
                    warn!(n = matrix.len(), "Fiedler vector not unique, using hierarchical order");
                    let mut ranked = self.rank_hierarchical(matrix);
                    ranked.fallback = Some(Fallback::SpectralDegenerate);
                    Ok(ranked)
                }
            },
            Strategy::Greedy => Ok(Ranked::plain(greedy_order(matrix), Strategy::Greedy)),
            other => Err(Error::invalid_parameter(
                "strategy",
                format!("{} does not use distances", other),
            )),
        }
    }

    fn rank_hierarchical(&self, matrix: &DistanceMatrix) -> Ranked {
        let dendrogram = Dendrogram::build(matrix, self.config.linkage);
        let labels = dendrogram.cut(self.config.group_cut(matrix.len()));
        debug!(
            n = matrix.len(),
            linkage = self.config.linkage.as_str(),
            groups = labels.iter().max().map_or(0, |g| g + 1),
            max_distance = matrix.max_finite(),
            "built dendrogram"
        );
        Ranked {
            order: dendrogram.leaf_order(),
            applied: Strategy::Hierarchical,
            labels: Some(labels),
            fiedler: None,
            fallback: None,
        }
    }

    fn finish(&self, requested: Strategy, ids: &[&str], ranked: Ranked) -> Result<OrderingOutcome> {
        let permutation = Permutation::from_order(ids, &ranked.order)?;
        let groups = ranked.labels.map(|labels| renumber(&labels, &ranked.order));
        let fiedler = ranked
            .fiedler
            .map(|coords| ranked.order.iter().map(|&i| coords[i]).collect());

        info!(
            n = ids.len(),
            requested = requested.as_str(),
            applied = ranked.applied.as_str(),
            fallback = ranked.fallback.is_some(),
            "ordered parts"
        );

        Ok(OrderingOutcome {
            permutation,
            requested,
            applied: ranked.applied,
            groups,
            fallback: ranked.fallback,
            fiedler,
        })
    }
}

fn rank_fuzzy(records: &[PartRecord], tokens: &[TokenSet]) -> Ranked {
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    let order = fuzzy_order(&ids, tokens);
    let labels: Vec<usize> = tokens.iter().map(|t| t.category.index()).collect();

    if tracing::enabled!(tracing::Level::DEBUG) {
        let mut counts = [0usize; partsort_tokens::Category::ALL.len()];
        for t in tokens {
            counts[t.category.index()] += 1;
        }
        for (category, count) in partsort_tokens::Category::ALL.iter().zip(counts) {
            if count > 0 {
                debug!(category = category.as_str(), count, "category group");
            }
        }
    }

    Ranked {
        order,
        applied: Strategy::Fuzzy,
        labels: Some(labels),
        fiedler: None,
        fallback: None,
    }
}

/// Labels per output position, renumbered by first appearance
fn renumber(labels: &[usize], order: &[usize]) -> Vec<usize> {
    let mut mapping = ahash::AHashMap::new();
    order
        .iter()
        .map(|&i| {
            let next = mapping.len();
            *mapping.entry(labels[i]).or_insert(next)
        })
        .collect()
}

/// Order `records` with a one-off engine built from `config`
pub fn order_parts(records: &[PartRecord], config: &OrderingConfig) -> Result<OrderingOutcome> {
    OrderingEngine::new(config.clone())?.order(records)
}
