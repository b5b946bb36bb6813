//! Acceptance tests for environment composition
//!
//! These tests drive the full registry → aggregate → composer pipeline the
//! way the host build system does, using both the builtin vocabulary and
//! synthetic ones injected through `FixedGlobals::from_mappings`.

pub mod test_warnings;
