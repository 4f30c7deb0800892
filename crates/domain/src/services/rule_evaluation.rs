//! Targeting rule engine.
//!
//! A deterministic fold over include/exclude rules: each rule is a guarded
//! set-transform over the candidate campaign set, evaluated exactly once in
//! a single pass with no backtracking. Rules are applied in ascending
//! priority order so that the highest-priority rule's transform is folded
//! last and its effect sticks; an exclude at priority 10 overrides an
//! include at priority 5 regardless of slice order.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::location::LocationType;
use crate::models::targeting_rule::{RuleAction, TargetingRule};

/// Evaluation context for one rule pass.
#[derive(Debug, Clone)]
pub struct RuleContext {
    /// The device's current location type, if reported.
    pub location_type: Option<LocationType>,
    /// Fence UUIDs matched by the geo-fence matcher for this position.
    pub matched_fence_ids: HashSet<Uuid>,
    /// The instant rules are evaluated at.
    pub now: DateTime<Utc>,
}

/// Sorts rules into application order: ascending priority so higher
/// priorities apply last and win conflicts. Ties are broken by ascending
/// rule UUID, making the order total and reproducible across processes.
fn sort_rules(rules: &mut Vec<&TargetingRule>) {
    rules.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| a.rule_id.cmp(&b.rule_id))
    });
}

/// Folds the rules over the seed candidate set.
///
/// Per rule, in application order:
/// 1. Time gate: a rule whose time window rejects `ctx.now` is skipped
///    without altering the candidates.
/// 2. Location-type gate: passes when the rule's list is empty or contains
///    the device's current location type.
/// 3. Geo-fence gate: passes when the rule's list is empty or intersects the
///    matched fence ids.
/// 4. Both content gates passing, the rule's campaigns (intersected with
///    `active_campaigns`) are unioned into or subtracted from the candidates.
///
/// Weather-condition tags and the radius override are reserved fields and
/// never gate. With no rules the seed set is returned unchanged.
pub fn evaluate_rules(
    seed: &HashSet<Uuid>,
    rules: &[TargetingRule],
    active_campaigns: &HashSet<Uuid>,
    ctx: &RuleContext,
) -> HashSet<Uuid> {
    let mut ordered: Vec<&TargetingRule> = rules.iter().collect();
    sort_rules(&mut ordered);

    let mut candidates = seed.clone();

    for rule in ordered {
        if let Some(window) = &rule.time_window {
            if !window.contains(ctx.now) {
                continue;
            }
        }

        if !location_type_gate(rule, ctx) {
            continue;
        }
        if !fence_gate(rule, ctx) {
            continue;
        }

        let rule_campaigns: HashSet<Uuid> = rule
            .campaign_ids
            .iter()
            .filter(|id| active_campaigns.contains(id))
            .copied()
            .collect();

        match rule.action {
            RuleAction::Include => candidates.extend(rule_campaigns),
            RuleAction::Exclude => candidates.retain(|id| !rule_campaigns.contains(id)),
        }
    }

    candidates
}

/// Passes when the rule's location-type list is empty or the device's
/// current location type is a member. A device without a reported location
/// type fails any non-empty list.
fn location_type_gate(rule: &TargetingRule, ctx: &RuleContext) -> bool {
    if rule.location_types.is_empty() {
        return true;
    }
    match ctx.location_type {
        Some(ty) => rule.location_types.contains(&ty),
        None => false,
    }
}

/// Passes when the rule's geo-fence list is empty or intersects the matched
/// fence set.
fn fence_gate(rule: &TargetingRule, ctx: &RuleContext) -> bool {
    if rule.geo_fence_ids.is_empty() {
        return true;
    }
    rule.geo_fence_ids
        .iter()
        .any(|id| ctx.matched_fence_ids.contains(id))
}
