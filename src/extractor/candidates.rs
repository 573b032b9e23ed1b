//! Top candidate selection.
//!
//! Candidates are ranked by score scaled with `1 - link density`. The best
//! one is then moved up the tree when the evidence says the article root is
//! higher: several close runners-up sharing an ancestor, an ancestor scoring
//! better, or a parent that holds nothing but the candidate.

use std::collections::HashSet;

use dom_query::{NodeId, NodeRef};

use super::scoring::initialize_node;
use super::state::{CandidateList, Flags, ScoreTable};
use crate::dom;
use crate::link_density::link_density;

/// Runners-up needed before their shared ancestor is preferred.
const MINIMUM_TOP_CANDIDATES: usize = 3;

/// The element chosen as article root for one pass.
#[derive(Clone, Copy)]
pub struct TopCandidate<'a> {
    pub node: NodeRef<'a>,

    /// Set when no usable candidate existed and the body's children were
    /// moved into a new container.
    pub created: bool,
}

/// Scale each candidate's score by `1 - link density` and keep the best
/// `n_top` of them.
pub fn rank_candidates<'a>(
    candidates: &[NodeRef<'a>],
    scores: &mut ScoreTable,
    n_top: usize,
) -> CandidateList<'a> {
    let mut ranked = CandidateList::new(n_top);

    for candidate in candidates {
        let score = scores.score_or_zero(candidate) * (1.0 - link_density(candidate));
        scores.set(candidate, score);
        ranked.insert(*candidate, score);
    }

    ranked
}

/// Pick the article root for this pass.
///
/// When nothing was ranked, or the best candidate is `<body>`, every child
/// of `page` is moved into a new `<div>` appended to `page`, and that div is
/// the result.
pub fn select_top_candidate<'a>(
    ranked: &CandidateList<'a>,
    page: &NodeRef<'a>,
    scores: &mut ScoreTable,
    flags: Flags,
) -> TopCandidate<'a> {
    let Some((mut top, top_score)) = ranked.top().filter(|(node, _)| !dom::is_tag(node, "body")) else {
        let container = dom::create_element(page, "div");
        dom::move_children(page, &container);
        dom::append_child(page, &container);
        initialize_node(&container, scores, flags);
        log::debug!("no top candidate, using page contents");
        return TopCandidate { node: container, created: true };
    };

    // Ancestor chains of runners-up scoring close to the top candidate.
    let alternative_ancestors: Vec<HashSet<NodeId>> = ranked
        .rest()
        .iter()
        .filter(|(_, score)| *score >= 0.75 * top_score)
        .map(|(node, _)| dom::ancestors(node, 0).iter().map(|a| a.id).collect())
        .collect();

    if alternative_ancestors.len() >= MINIMUM_TOP_CANDIDATES {
        let mut parent = dom::parent_element(&top);
        while let Some(ancestor) = parent.filter(|p| !dom::is_tag(p, "body")) {
            let containing = alternative_ancestors
                .iter()
                .filter(|chain| chain.contains(&ancestor.id))
                .take(MINIMUM_TOP_CANDIDATES)
                .count();
            if containing >= MINIMUM_TOP_CANDIDATES {
                top = ancestor;
                break;
            }
            parent = dom::parent_element(&ancestor);
        }
    }
    if !scores.contains(&top) {
        initialize_node(&top, scores, flags);
    }

    // Climb while ancestors keep a reasonable score; a strictly higher one
    // takes over as the candidate.
    let mut last_score = scores.score_or_zero(&top);
    let score_threshold = last_score / 3.0;
    let mut parent = dom::parent_element(&top);
    while let Some(ancestor) = parent.filter(|p| !dom::is_tag(p, "body")) {
        parent = dom::parent_element(&ancestor);
        let Some(parent_score) = scores.get(&ancestor) else {
            continue;
        };
        if parent_score < score_threshold {
            break;
        }
        if parent_score > last_score {
            top = ancestor;
        }
        last_score = parent_score;
    }

    // An only child gives way to its parent, so sibling merging sees the
    // real neighbours.
    let mut parent = dom::parent_element(&top);
    while let Some(ancestor) = parent.filter(|p| !dom::is_tag(p, "body") && dom::element_children(p).len() == 1) {
        top = ancestor;
        parent = dom::parent_element(&top);
    }
    if !scores.contains(&top) {
        initialize_node(&top, scores, flags);
    }

    TopCandidate { node: top, created: false }
}
