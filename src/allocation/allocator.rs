//! Greedy cost-effectiveness allocation.
//!
//! # Algorithm
//!
//! 1. `overall = Σ weight × performance`, `cost_effectiveness =
//!    overall / max(cost, 1)`.
//! 2. Sort by cost-effectiveness descending, ties by id ascending.
//! 3. Walk that order, admitting a candidate while the budget covers it,
//!    its cost lies within the per-candidate bounds, and the portfolio is
//!    below `max_candidates`.
//! 4. If fewer than `min_candidates` were admitted, one top-up pass over
//!    the same order admits the first unselected candidate the remaining
//!    budget still covers, ignoring the per-candidate bounds.
//! 5. Diversity averages distinct locations per selected candidate and
//!    category coverage of the pool.
//! 6. Recommendations come from fixed templates keyed by utilization and
//!    diversity.
//!
//! The result is deterministic but not optimal: earlier admissions are
//! never revisited.
//!
//! # Complexity
//!
//! O(n log n) for the sort, O(n) for the passes.

use super::config::AllocatorConfig;
use super::types::{
    AllocationCandidate, AllocationConstraints, DiversityDimension, PortfolioResult,
    SelectedCandidate,
};
use crate::aggregate::{aggregate, rank_descending};
use crate::batch::score_batch;
use crate::error::{ConfigurationError, EngineError};
use crate::model::SubScores;
use crate::normalize::text::{key_set, normalize_key};
use std::collections::BTreeSet;

/// A validated candidate with its step-1 scores.
struct Scored<'a> {
    candidate: &'a AllocationCandidate,
    overall: f64,
    cost_effectiveness: f64,
    breakdown: SubScores,
}

/// Greedy budget allocator.
///
/// # Examples
///
/// ```
/// use u_fundmatch::allocation::{
///     AllocationCandidate, AllocationConstraints, AllocatorConfig, ConstrainedAllocator,
///     PerformanceScores,
/// };
///
/// let allocator = ConstrainedAllocator::new(AllocatorConfig::default()).unwrap();
/// let candidates = vec![
///     AllocationCandidate::new("1", 50_000.0, PerformanceScores::uniform(0.9)),
///     AllocationCandidate::new("2", 60_000.0, PerformanceScores::uniform(0.85)),
///     AllocationCandidate::new("3", 20_000.0, PerformanceScores::uniform(0.5)),
/// ];
/// let portfolio = allocator
///     .allocate(&candidates, &AllocationConstraints::new(100_000.0))
///     .unwrap();
/// assert_eq!(portfolio.selected_ids(), vec!["3", "1"]);
/// assert_eq!(portfolio.total_allocated, 70_000.0);
/// ```
#[derive(Debug, Clone)]
pub struct ConstrainedAllocator {
    config: AllocatorConfig,
}

impl ConstrainedAllocator {
    pub fn new(config: AllocatorConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Selects a portfolio within `constraints`.
    ///
    /// Infeasible requests return an empty selection with `reasons`
    /// populated. Only a broken configuration is an error.
    pub fn allocate(
        &self,
        candidates: &[AllocationCandidate],
        constraints: &AllocationConstraints,
    ) -> Result<PortfolioResult, ConfigurationError> {
        let outcome = score_batch(
            candidates,
            self.config.parallel,
            |c| c.id.as_str(),
            |c| self.evaluate(c),
        )?;
        let scored = outcome.scored;
        let skipped = outcome.skipped;

        let mut reasons: Vec<String> = skipped
            .iter()
            .map(|s| format!("skipped candidate at index {}: {}", s.index, s.reason))
            .collect();
        let mut infeasible = constraints.infeasibility();
        if candidates.is_empty() {
            infeasible.push("no candidates supplied".to_string());
        } else if scored.is_empty() {
            infeasible.push("no valid candidates to allocate".to_string());
        }
        if !infeasible.is_empty() {
            tracing::debug!(reasons = ?infeasible, "allocation infeasible");
            reasons.extend(infeasible);
            return Ok(PortfolioResult::infeasible(
                constraints.total_budget,
                reasons,
                skipped,
            ));
        }

        let order = rank_descending(
            &scored,
            |s| s.cost_effectiveness,
            |s| s.candidate.id.as_str(),
        );

        let budget = constraints.total_budget;
        let max_candidates = constraints.max_candidates.unwrap_or(usize::MAX);
        let mut taken = vec![false; scored.len()];
        let mut picked = Vec::new();
        let mut selected = Vec::new();
        let mut allocated = 0.0;

        for &i in &order {
            if selected.len() >= max_candidates {
                break;
            }
            let s = &scored[i];
            let cost = s.candidate.cost;
            if allocated + cost <= budget && constraints.admits_cost(cost) {
                allocated += cost;
                taken[i] = true;
                picked.push(i);
                selected.push(admit(s, false));
                tracing::debug!(
                    candidate_id = %s.candidate.id,
                    cost,
                    cost_effectiveness = s.cost_effectiveness,
                    remaining = budget - allocated,
                    "admitted"
                );
            } else {
                tracing::debug!(candidate_id = %s.candidate.id, cost, "not admitted");
            }
        }

        let short = selected.len() < constraints.min_candidates;
        if short && selected.len() < max_candidates && allocated < budget {
            let top_up = order
                .iter()
                .copied()
                .find(|&i| !taken[i] && allocated + scored[i].candidate.cost <= budget);
            if let Some(i) = top_up {
                let s = &scored[i];
                allocated += s.candidate.cost;
                picked.push(i);
                selected.push(admit(s, true));
                tracing::debug!(candidate_id = %s.candidate.id, "admitted by top-up pass");
            }
        }

        if selected.is_empty() {
            reasons.push(
                "no candidate fits within the budget and per-candidate limits".to_string(),
            );
            return Ok(PortfolioResult::infeasible(budget, reasons, skipped));
        }
        if selected.len() < constraints.min_candidates {
            reasons.push(format!(
                "only {} of the required {} candidates could be funded",
                selected.len(),
                constraints.min_candidates
            ));
        }

        let diversity_score = diversity(&scored, &picked, &constraints.required_diversity_dims);
        let mut portfolio = PortfolioResult {
            selected,
            total_allocated: allocated,
            remaining_budget: budget - allocated,
            diversity_score,
            reasons,
            recommendations: Vec::new(),
            skipped,
        };
        portfolio.recommendations = self.recommend(&portfolio, constraints);

        tracing::debug!(
            selected = portfolio.selected.len(),
            total_allocated = portfolio.total_allocated,
            diversity = portfolio.diversity_score,
            "allocation complete"
        );
        Ok(portfolio)
    }

    fn evaluate<'a>(&self, candidate: &'a AllocationCandidate) -> Result<Scored<'a>, EngineError> {
        candidate.validate()?;
        let breakdown = candidate.scores.to_sub_scores();
        let overall = aggregate(&breakdown, &self.config.weights)?;
        let cost_effectiveness = overall / candidate.cost.max(self.config.min_cost_divisor);
        Ok(Scored {
            candidate,
            overall,
            cost_effectiveness,
            breakdown,
        })
    }

    fn recommend(&self, portfolio: &PortfolioResult, constraints: &AllocationConstraints) -> Vec<String> {
        let t = &self.config.thresholds;
        let utilization = portfolio.utilization();
        let mut out = Vec::new();

        if utilization < t.low_utilization {
            out.push(format!(
                "Only {:.0}% of the budget is allocated; source more candidates or relax per-candidate limits",
                utilization * 100.0
            ));
        } else if utilization > t.high_utilization {
            out.push(
                "Budget is almost fully committed; hold back a contingency reserve for overruns"
                    .to_string(),
            );
        }

        if portfolio.diversity_score < t.low_diversity {
            out.push(
                "Portfolio is concentrated; add candidates from other locations or categories"
                    .to_string(),
            );
        } else if portfolio.diversity_score >= t.high_diversity {
            out.push("Portfolio is well diversified across locations and categories".to_string());
        }

        if portfolio.selected.len() < constraints.min_candidates {
            out.push(
                "Fewer candidates than required were funded; raise the budget or lower per-candidate costs"
                    .to_string(),
            );
        }
        if portfolio.selected.iter().any(|s| s.top_up) {
            out.push(
                "Top-up selection bypassed per-candidate limits; review it before committing"
                    .to_string(),
            );
        }
        out
    }
}

fn admit(scored: &Scored<'_>, top_up: bool) -> SelectedCandidate {
    SelectedCandidate {
        candidate_id: scored.candidate.id.clone(),
        allocated_amount: scored.candidate.cost,
        overall_score: scored.overall,
        cost_effectiveness: scored.cost_effectiveness,
        breakdown: scored.breakdown.clone(),
        top_up,
    }
}

/// Average of the requested diversity ratios, 0–1.
///
/// `chosen` indexes into `pool`.
fn diversity(pool: &[Scored<'_>], chosen: &[usize], dims: &[DiversityDimension]) -> f64 {
    if chosen.is_empty() {
        return 0.0;
    }
    let picked: Vec<&AllocationCandidate> = chosen.iter().map(|&i| pool[i].candidate).collect();

    let dims: &[DiversityDimension] = if dims.is_empty() {
        &[DiversityDimension::Location, DiversityDimension::Category]
    } else {
        dims
    };
    let unique: BTreeSet<DiversityDimension> = dims.iter().copied().collect();

    let total: f64 = unique
        .iter()
        .map(|dim| match dim {
            DiversityDimension::Location => {
                let locations: BTreeSet<String> = picked
                    .iter()
                    .filter_map(|c| c.location.as_deref())
                    .map(normalize_key)
                    .filter(|l| !l.is_empty())
                    .collect();
                locations.len() as f64 / picked.len() as f64
            }
            DiversityDimension::Category => {
                let universe = key_set(pool.iter().flat_map(|s| s.candidate.categories.iter()));
                if universe.is_empty() {
                    return 0.0;
                }
                let covered = key_set(picked.iter().flat_map(|c| c.categories.iter()));
                covered.len() as f64 / universe.len() as f64
            }
        })
        .sum();
    total / unique.len() as f64
}
