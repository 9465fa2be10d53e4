//! Card system: definitions, instances, pools and the catalog.
//!
//! ## Key Types
//!
//! - `CardDefinition`: Static card data with a per-deck `quantity`
//! - `TraitEffect`: Closed set of named trait rules
//! - `PooledCard`: One physical copy occupying a pool slot
//! - `PinnedCard`: A copy taken out of circulation
//! - `CardPool`: Multiset operations (expand, sample, rebuild)
//! - `CardCatalog`: Definition lookup per deck

pub mod definition;
pub mod instance;
pub mod pool;
pub mod registry;
pub mod traits;

pub use definition::{CardDefinition, CardDefinitionFile, TraitMarker};
pub use instance::{PinnedCard, PooledCard};
pub use pool::{CardPool, Sample};
pub use registry::CardCatalog;
pub use traits::{CardTone, TraitEffect};
