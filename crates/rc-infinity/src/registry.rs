//! Process-wide registry of crystals.
//!
//! At most one crystal exists per normalized Cartan type. Any spelling of a
//! type resolves to the same handle, so parents compare by pointer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use rc_cartan::{CartanError, CartanType};
use tracing::{debug, trace};

use crate::crystal::{InfinityCrystal, SimplyLacedCrystal};
use crate::error::Result;

type Registry = HashMap<CartanType, InfinityCrystal>;

static REGISTRY: OnceLock<Mutex<Registry>> = OnceLock::new();

fn registry() -> MutexGuard<'static, Registry> {
    REGISTRY
        .get_or_init(Mutex::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// The crystal for `cartan_type`, built on first request.
///
/// The lock is held while building so that concurrent callers agree on one
/// instance. Virtual crystals are attached lazily, outside the lock.
pub fn crystal_for(cartan_type: CartanType) -> Result<InfinityCrystal> {
    let mut crystals = registry();
    if let Some(crystal) = crystals.get(&cartan_type) {
        trace!(%cartan_type, "registry hit");
        return Ok(crystal.clone());
    }
    let crystal = InfinityCrystal::build(cartan_type)?;
    debug!(%cartan_type, kind = crystal.kind(), "registered crystal");
    crystals.insert(cartan_type, crystal.clone());
    Ok(crystal)
}

/// The simply-laced crystal for `cartan_type`.
pub(crate) fn simply_laced(cartan_type: CartanType) -> Result<Arc<SimplyLacedCrystal>> {
    let crystal = crystal_for(cartan_type)?;
    crystal
        .as_simply_laced()
        .cloned()
        .ok_or_else(|| CartanError::NotSimplyLaced(cartan_type).into())
}

/// Cartan types with a registered crystal, sorted.
pub fn registered_types() -> Vec<CartanType> {
    let mut types: Vec<CartanType> = registry().keys().copied().collect();
    types.sort();
    types
}

/// Drop every registered crystal.
///
/// Handles already given out stay usable, but crystals requested afterwards
/// are new instances and no longer compare equal to them.
pub fn clear_registry() {
    let mut crystals = registry();
    debug!(count = crystals.len(), "clearing crystal registry");
    crystals.clear();
}
