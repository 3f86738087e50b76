//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the driver through its
//! public API against mock mappers.  All tests run on the host with no real
//! hardware required.

mod command_tests;
mod lifecycle_tests;
mod mock_hw;
