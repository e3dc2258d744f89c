// Test modules for imgur-contract crate
//
// Each source file has a corresponding test file that focuses on
// contract-checking behavior. HTTP round trips against mock servers live in
// the integration tests under tests/.

// Test helper utilities
pub mod helpers;

pub mod dto;
