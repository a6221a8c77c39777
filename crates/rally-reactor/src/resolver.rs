//! Recipient resolver - turns event context into deliverable push tokens
//!
//! Resolution never fails on absent data: a missing plan, profile, or
//! token narrows the recipient set instead of erroring. Store failures
//! do propagate.

use std::collections::HashSet;

use tracing::debug;

use rally_core::{Plan, PlanId, PushToken, UserId};
use rally_push::join_all_outcomes;

use crate::context::ReactorContext;
use crate::error::ReactorResult;

/// Resolve a plan and its owner's push token
///
/// Returns `None` when the plan itself is gone. An ownerless plan or a
/// tokenless owner comes back as `Some((plan, None))` so the caller can
/// still use the plan's fields.
pub async fn plan_owner_token(
    ctx: &ReactorContext,
    plan_id: &PlanId,
) -> ReactorResult<Option<(Plan, Option<PushToken>)>> {
    let Some(plan) = ctx.plan_repo().find_by_id(plan_id).await? else {
        debug!(plan_id = %plan_id, "plan not found, no recipient");
        return Ok(None);
    };

    let token = match &plan.owner_id {
        Some(owner_id) => ctx
            .profile_repo()
            .find_by_id(owner_id)
            .await?
            .and_then(|profile| profile.push_token),
        None => None,
    };

    Ok(Some((plan, token)))
}

/// Resolve the push tokens of every subscriber of a plan
///
/// Profile lookups run concurrently. Subscribers without a profile or
/// token are skipped; `exclude` drops one user (the event's originator)
/// before any lookup happens. The result is deduplicated in subscriber
/// order.
pub async fn subscriber_tokens(
    ctx: &ReactorContext,
    plan_id: &PlanId,
    exclude: Option<&UserId>,
) -> ReactorResult<Vec<PushToken>> {
    let subscriptions = ctx.subscription_repo().find_by_plan(plan_id).await?;

    let lookups: Vec<_> = subscriptions
        .iter()
        .filter(|s| exclude != Some(&s.user_id))
        .map(|s| {
            let user_id = s.user_id.clone();
            async move { ctx.profile_repo().find_by_id(&user_id).await }
        })
        .collect();

    let mut tokens = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for outcome in join_all_outcomes(lookups).await {
        let Some(token) = outcome?.and_then(|profile| profile.push_token) else {
            continue;
        };
        if seen.insert(token.as_str().to_string()) {
            tokens.push(token);
        }
    }

    Ok(tokens)
}
