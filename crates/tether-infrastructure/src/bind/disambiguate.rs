//! Binding disambiguation
//!
//! Reduces the declared bindings to a consistent set with at most one
//! binding per locator, except for multi bindings.

use std::collections::HashSet;

use itertools::Itertools;
use tether_domain::error::{Error, Result};
use tether_domain::lang::Type;
use tether_domain::value_objects::DeclarationType;
use tracing::debug;

use super::binding::Binding;

/// Sorts and sweeps `bindings` into their final order
///
/// Equal locators are adjacent after sorting and the strongest declaration
/// comes first. Clashing declarations fail, two auto declarations cancel
/// each other out, weaker declarations are replaced by the retained one and
/// duplicate multi constants are dropped. Required bindings stay in the
/// result so that running this again yields the same bindings. Provided
/// bindings survive only when their type is required, and every required
/// type must be bound by some surviving binding.
pub fn disambiguate(mut bindings: Vec<Binding>) -> Result<Vec<Binding>> {
    bindings.sort();

    let mut keep = vec![false; bindings.len()];
    let mut accepted: Vec<usize> = Vec::with_capacity(bindings.len());
    let mut required: HashSet<Type> = HashSet::new();
    let mut dropped: Vec<usize> = Vec::new();
    let mut last: Option<usize> = None;

    for (i, current) in bindings.iter().enumerate() {
        let current_type = current.declaration_type();
        if current_type == DeclarationType::Required {
            required.insert(current.ty().clone());
            keep[i] = true;
            continue;
        }
        let Some(l) = last else {
            accepted.push(i);
            last = Some(i);
            continue;
        };
        let retained = &bindings[l];
        let retained_type = retained.declaration_type();
        let equal_locator = retained.locator == current.locator;
        if equal_locator && retained_type.clashes_with(current_type) {
            return Err(Error::clash(retained, current));
        }
        if equal_locator && retained_type.dropped_with(current_type) {
            if !retained.is_identical_constant(current) && accepted.last() == Some(&l) {
                accepted.pop();
                dropped.push(l);
            }
            dropped.push(i);
        } else if !equal_locator || !current_type.replaced_by(retained_type) {
            if current_type == DeclarationType::Multi
                && equal_locator
                && retained.is_identical_constant(current)
            {
                dropped.push(i);
            } else {
                accepted.push(i);
                last = Some(i);
            }
        } else {
            dropped.push(i);
        }
    }

    let mut satisfied: HashSet<Type> = HashSet::new();
    for i in accepted {
        let binding = &bindings[i];
        if binding.declaration_type() != DeclarationType::Provided || required.contains(binding.ty())
        {
            keep[i] = true;
            satisfied.insert(binding.ty().clone());
        } else {
            dropped.push(i);
        }
    }

    let unsatisfied = required
        .difference(&satisfied)
        .sorted()
        .collect::<Vec<_>>();
    if !unsatisfied.is_empty() {
        return Err(Error::no_resource(
            format!("required types [{}]", unsatisfied.iter().join(", ")),
            dropped.iter().sorted().map(|&i| &bindings[i]).join("\n\t"),
        ));
    }

    for &i in &dropped {
        debug!(binding = %bindings[i], "Binding dropped");
    }

    Ok(bindings
        .into_iter()
        .zip(keep)
        .filter_map(|(binding, keep)| keep.then_some(binding))
        .collect())
}
