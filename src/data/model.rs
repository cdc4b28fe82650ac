use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::filter::{KinematicCuts, Rejection};
use crate::view::{Collection, FilteredIndexView};

// ---------------------------------------------------------------------------
// Particle – one reconstructed or generated particle
// ---------------------------------------------------------------------------

/// Kinematics of a single particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Transverse momentum (GeV/c).
    pub pt: f64,
    /// Pseudorapidity.
    pub eta: f64,
    /// Azimuth in radians.
    pub phi: f64,
    /// Charge in units of e.
    pub charge: i8,
    /// Monte Carlo label; `0` for data, negative for fakes.
    #[serde(default)]
    pub mc_label: i32,
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pt={:.3} eta={:+.3} phi={:.3} q={:+} label={}",
            self.pt, self.eta, self.phi, self.charge, self.mc_label
        )
    }
}

// ---------------------------------------------------------------------------
// ParticleContainer – slots plus the cuts that define acceptance
// ---------------------------------------------------------------------------

/// A named array of particle slots with kinematic acceptance.
///
/// Slots may be empty, as in a sparse event array; empty slots are always
/// rejected as [`Rejection::NullObject`].
#[derive(Debug, Clone)]
pub struct ParticleContainer {
    name: String,
    slots: Vec<Option<Particle>>,
    cuts: KinematicCuts,
}

impl ParticleContainer {
    pub fn new(name: impl Into<String>, slots: Vec<Option<Particle>>, cuts: KinematicCuts) -> Self {
        ParticleContainer {
            name: name.into(),
            slots,
            cuts,
        }
    }

    /// Container without empty slots.
    pub fn from_particles(
        name: impl Into<String>,
        particles: impl IntoIterator<Item = Particle>,
        cuts: KinematicCuts,
    ) -> Self {
        Self::new(name, particles.into_iter().map(Some).collect(), cuts)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of slots, empty ones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Option<Particle>] {
        &self.slots
    }

    pub fn cuts(&self) -> &KinematicCuts {
        &self.cuts
    }

    /// Replace the cuts. Views borrow the container, so none can be alive here.
    pub fn set_cuts(&mut self, cuts: KinematicCuts) {
        self.cuts = cuts;
    }

    /// View over every slot.
    pub fn all(&self) -> FilteredIndexView<'_, Self> {
        FilteredIndexView::all(self)
    }

    /// View over accepted particles only.
    pub fn accepted(&self) -> FilteredIndexView<'_, Self> {
        FilteredIndexView::accepted(self)
    }

    /// Number of rejected slots per rejection reason, keyed by [`Rejection::label`].
    pub fn rejection_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for index in 0..self.len() {
            if let Err(rejection) = self.accept_object(index) {
                *counts.entry(rejection.label()).or_insert(0) += 1;
            }
        }
        counts
    }
}

impl Collection for ParticleContainer {
    type Object = Particle;
    type Rejection = Rejection;

    fn entry_count(&self) -> usize {
        self.slots.len()
    }

    fn accepted_count(&self) -> usize {
        (0..self.len())
            .filter(|&index| self.accept_object(index).is_ok())
            .count()
    }

    fn accept_object(&self, index: usize) -> Result<(), Rejection> {
        match self.slots.get(index) {
            Some(Some(particle)) => self.cuts.check(particle),
            _ => Err(Rejection::NullObject),
        }
    }

    fn object_at(&self, index: usize) -> Option<&Particle> {
        self.slots.get(index)?.as_ref()
    }
}
