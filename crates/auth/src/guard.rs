//! Guard evaluation: composite `all` / `any` checks against a [`PermissionContext`].
//!
//! Rendering gates and request admission both go through this module, so the
//! UI and the server answer the same question the same way. Evaluation has no
//! side effects; auditing, if wanted, wraps these calls from the outside.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use fieldops_core::ValueObject;

use crate::{Action, PermissionContext};

/// A guard was asked to evaluate an empty action set.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid guard request: action set must not be empty")]
pub struct InvalidGuardRequest;

/// How the actions of a guard combine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardMode {
    /// Every action must be held.
    All,
    /// At least one action must be held.
    Any,
}

/// A validated, non-empty set of actions plus the mode combining them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuardRequest {
    actions: Vec<Action>,
    mode: GuardMode,
}

impl GuardRequest {
    /// Build a guard; duplicates are dropped, an empty set is rejected.
    pub fn new(
        mode: GuardMode,
        actions: impl IntoIterator<Item = Action>,
    ) -> Result<Self, InvalidGuardRequest> {
        let mut deduped: Vec<Action> = Vec::new();
        for action in actions {
            if !deduped.contains(&action) {
                deduped.push(action);
            }
        }
        if deduped.is_empty() {
            return Err(InvalidGuardRequest);
        }
        Ok(Self {
            actions: deduped,
            mode,
        })
    }

    pub fn all(actions: impl IntoIterator<Item = Action>) -> Result<Self, InvalidGuardRequest> {
        Self::new(GuardMode::All, actions)
    }

    pub fn any(actions: impl IntoIterator<Item = Action>) -> Result<Self, InvalidGuardRequest> {
        Self::new(GuardMode::Any, actions)
    }

    /// Single-action guard. Both modes agree on a singleton; `All` is used.
    pub fn single(action: Action) -> Self {
        Self {
            actions: vec![action],
            mode: GuardMode::All,
        }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn mode(&self) -> GuardMode {
        self.mode
    }
}

impl ValueObject for GuardRequest {}

impl From<Action> for GuardRequest {
    fn from(action: Action) -> Self {
        Self::single(action)
    }
}

/// Conjunction of `ctx.has(a)`; stops at the first action not held.
pub fn evaluate_all(ctx: &PermissionContext, actions: &[Action]) -> Result<bool, InvalidGuardRequest> {
    if actions.is_empty() {
        return Err(InvalidGuardRequest);
    }
    Ok(actions.iter().all(|action| ctx.has(*action)))
}

/// Disjunction of `ctx.has(a)`; stops at the first action held.
pub fn evaluate_any(ctx: &PermissionContext, actions: &[Action]) -> Result<bool, InvalidGuardRequest> {
    if actions.is_empty() {
        return Err(InvalidGuardRequest);
    }
    Ok(actions.iter().any(|action| ctx.has(*action)))
}

/// Evaluate an already-validated guard. Cannot fail.
pub fn evaluate(ctx: &PermissionContext, request: &GuardRequest) -> bool {
    match request.mode {
        GuardMode::All => request.actions.iter().all(|action| ctx.has(*action)),
        GuardMode::Any => request.actions.iter().any(|action| ctx.has(*action)),
    }
}

/// Evaluate raw action keys (remote callers, query strings).
///
/// A key outside the catalog counts as an action not held: it fails an `All`
/// guard and contributes nothing to an `Any` guard.
pub fn evaluate_keys<S: AsRef<str>>(
    ctx: &PermissionContext,
    mode: GuardMode,
    keys: &[S],
) -> Result<bool, InvalidGuardRequest> {
    if keys.is_empty() {
        return Err(InvalidGuardRequest);
    }
    let held = |key: &S| {
        key.as_ref()
            .parse::<Action>()
            .is_ok_and(|action| ctx.has(action))
    };
    Ok(match mode {
        GuardMode::All => keys.iter().all(held),
        GuardMode::Any => keys.iter().any(held),
    })
}

/// Operation-side authorization contract (checked at the request boundary).
///
/// Implement this on operations that require permissions; adapters evaluate
/// the guard before dispatching.
pub trait GuardedOperation {
    fn guard(&self) -> GuardRequest;
}

impl GuardedOperation for GuardRequest {
    fn guard(&self) -> GuardRequest {
        self.clone()
    }
}
