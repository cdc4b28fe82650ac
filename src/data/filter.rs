use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::Particle;

// ---------------------------------------------------------------------------
// Rejection – why a particle failed acceptance
// ---------------------------------------------------------------------------

/// Reason a container slot is not accepted.
///
/// Every variant maps to a distinct bit via [`Rejection::code`], so reasons
/// can be OR-ed into a mask by callers that aggregate them.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Rejection {
    #[error("no particle stored in this slot")]
    NullObject,
    #[error("pt {pt:.3} outside [{min:.3}, {max:.3}]")]
    PtCut { pt: f64, min: f64, max: f64 },
    #[error("(eta, phi) = ({eta:.3}, {phi:.3}) outside acceptance")]
    AcceptanceCut { eta: f64, phi: f64 },
    #[error("MC label {label} below minimum {min}")]
    McLabelCut { label: i32, min: i32 },
    #[error("charge {charge} rejected by {selection:?} selection")]
    ChargeCut {
        charge: i8,
        selection: ChargeSelection,
    },
}

impl Rejection {
    pub const NULL_OBJECT: u32 = 1 << 0;
    pub const PT_CUT: u32 = 1 << 1;
    pub const ACCEPTANCE_CUT: u32 = 1 << 2;
    pub const MC_LABEL_CUT: u32 = 1 << 3;
    pub const CHARGE_CUT: u32 = 1 << 9;

    /// Bit code of this rejection reason.
    pub fn code(&self) -> u32 {
        match self {
            Rejection::NullObject => Self::NULL_OBJECT,
            Rejection::PtCut { .. } => Self::PT_CUT,
            Rejection::AcceptanceCut { .. } => Self::ACCEPTANCE_CUT,
            Rejection::McLabelCut { .. } => Self::MC_LABEL_CUT,
            Rejection::ChargeCut { .. } => Self::CHARGE_CUT,
        }
    }

    /// Short name used in summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Rejection::NullObject => "null object",
            Rejection::PtCut { .. } => "pt cut",
            Rejection::AcceptanceCut { .. } => "acceptance cut",
            Rejection::McLabelCut { .. } => "MC label cut",
            Rejection::ChargeCut { .. } => "charge cut",
        }
    }
}

// ---------------------------------------------------------------------------
// Cuts
// ---------------------------------------------------------------------------

/// Which charges pass the charge cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargeSelection {
    #[default]
    Any,
    Charged,
    Neutral,
    Positive,
    Negative,
}

impl ChargeSelection {
    pub fn admits(self, charge: i8) -> bool {
        match self {
            ChargeSelection::Any => true,
            ChargeSelection::Charged => charge != 0,
            ChargeSelection::Neutral => charge == 0,
            ChargeSelection::Positive => charge > 0,
            ChargeSelection::Negative => charge < 0,
        }
    }
}

/// Kinematic acceptance applied by a particle container.
///
/// Ranges are inclusive. `min_mc_label = None` disables the MC label cut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KinematicCuts {
    pub min_pt: f64,
    pub max_pt: f64,
    pub min_eta: f64,
    pub max_eta: f64,
    pub min_phi: f64,
    pub max_phi: f64,
    pub charge: ChargeSelection,
    pub min_mc_label: Option<i32>,
}

impl Default for KinematicCuts {
    fn default() -> Self {
        Self {
            min_pt: 0.15,
            max_pt: 1000.0,
            min_eta: -0.9,
            max_eta: 0.9,
            min_phi: 0.0,
            max_phi: TAU,
            charge: ChargeSelection::Any,
            min_mc_label: None,
        }
    }
}

impl KinematicCuts {
    /// Cuts that accept every particle.
    pub fn open() -> Self {
        Self {
            min_pt: 0.0,
            max_pt: f64::INFINITY,
            min_eta: f64::NEG_INFINITY,
            max_eta: f64::INFINITY,
            min_phi: f64::NEG_INFINITY,
            max_phi: f64::INFINITY,
            charge: ChargeSelection::Any,
            min_mc_label: None,
        }
    }

    /// Check a particle against every cut, reporting the first that fails.
    ///
    /// Order: pt, acceptance (eta/phi), charge, MC label.
    pub fn check(&self, particle: &Particle) -> Result<(), Rejection> {
        if !(self.min_pt..=self.max_pt).contains(&particle.pt) {
            return Err(Rejection::PtCut {
                pt: particle.pt,
                min: self.min_pt,
                max: self.max_pt,
            });
        }
        if !(self.min_eta..=self.max_eta).contains(&particle.eta)
            || !(self.min_phi..=self.max_phi).contains(&particle.phi)
        {
            return Err(Rejection::AcceptanceCut {
                eta: particle.eta,
                phi: particle.phi,
            });
        }
        if !self.charge.admits(particle.charge) {
            return Err(Rejection::ChargeCut {
                charge: particle.charge,
                selection: self.charge,
            });
        }
        if let Some(min) = self.min_mc_label {
            if particle.mc_label < min {
                return Err(Rejection::McLabelCut {
                    label: particle.mc_label,
                    min,
                });
            }
        }
        Ok(())
    }
}
