//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter   | Implements                    | Connects to            |
//! |-----------|-------------------------------|------------------------|
//! | `sim`     | WindowMapper, RegisterBlock   | In-memory register file|
//! | `devmem`  | WindowMapper, RegisterBlock   | `/dev/mem` (mmio only) |
//! | `claims`  | —                             | Range bookkeeping      |

pub mod claims;
#[cfg(feature = "mmio")]
pub mod devmem;
pub mod sim;
