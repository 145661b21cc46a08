//! # MicroBitcoin Test Suite
//!
//! Cross-crate tests that need more than one workspace member.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── genesis_vectors.rs   # every network reproduces its genesis
//!     ├── selection.rs         # profile construction and process selection
//!     ├── header_cache.rs      # concurrent work-hash caching
//!     └── mining.rs            # genesis nonce search end to end
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p mbc-tests
//! cargo test -p mbc-tests integration::genesis_vectors
//! ```

pub mod integration;
