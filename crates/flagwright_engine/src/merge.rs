//! Merge policy shared by every rule.
//!
//! Synthesis is a set union with what the declaration already has:
//! a capability or member already present is never declared again, so
//! running a rule over its own output adds nothing.

use std::collections::HashSet;

use flagwright_foundation::{Capability, CapabilitySet};
use flagwright_syntax::{Declaration, Member, MemberKey};

/// Returns the capabilities of `target` that `existing` lacks.
///
/// Unioned with `existing` this yields the full target set; when it is
/// empty no conformance block is emitted.
#[must_use]
pub fn union(existing: &CapabilitySet, target: impl IntoIterator<Item = Capability>) -> CapabilitySet {
    target
        .into_iter()
        .filter(|cap| !existing.contains(cap))
        .collect()
}

/// Drops members the declaration already declares, and repeated keys
/// within `synthesized` (first occurrence wins).
#[must_use]
pub fn fresh_members(decl: &Declaration, synthesized: Vec<Member>) -> Vec<Member> {
    let mut seen: HashSet<MemberKey> = decl.members.iter().map(Member::key).collect();
    synthesized
        .into_iter()
        .filter(|member| {
            let keep = seen.insert(member.key());
            if !keep {
                tracing::trace!(member = %member.key(), "member already present, skipped");
            }
            keep
        })
        .collect()
}
