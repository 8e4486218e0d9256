// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) that define the interfaces
//! between the resolution engine and the outside world. These traits are implemented
//! by adapters in the adapters layer and by the resolver in the service layer.

pub mod lookup;
pub mod parser;
pub mod reporter;

// Re-export commonly used types
pub use lookup::CounterpartLookup;
pub use parser::ConfigParser;
pub use reporter::Reporter;
