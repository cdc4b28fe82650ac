//! Non-owning, optionally filtered iteration over particle containers.
//!
//! The core is [`FilteredIndexView`]: bind it to any [`Collection`] and walk
//! either every entry or only the accepted ones, forwards or backwards,
//! without copying the container's data.
//!
//! ```
//! use rusty_emcal::data::filter::KinematicCuts;
//! use rusty_emcal::data::model::{Particle, ParticleContainer};
//!
//! let track = |pt| Particle { pt, eta: 0.0, phi: 1.0, charge: 1, mc_label: 0 };
//! let tracks = ParticleContainer::from_particles(
//!     "tracks",
//!     [track(2.0), track(0.1), track(4.0)],
//!     KinematicCuts::default(),
//! );
//!
//! let accepted = tracks.accepted();
//! assert_eq!(accepted.entries(), 2);
//! let pts: Vec<f64> = accepted.objects().rev().map(|p| p.pt).collect();
//! assert_eq!(pts, [4.0, 2.0]);
//! ```

pub mod config;
pub mod data;
pub mod view;

pub use view::{Collection, Cursor, Direction, FilteredIndexView, Iter};
