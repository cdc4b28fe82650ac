/// Data layer: particles, acceptance cuts, and loading.
///
/// Architecture:
/// ```text
///  .parquet / .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<Option<Particle>>
///   └──────────┘
///        │
///        ▼
///   ┌───────────────────┐
///   │ ParticleContainer  │  slots + KinematicCuts, implements Collection
///   └───────────────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ FilteredIndexView │  all / accepted entries, no copies
///   └──────────────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
