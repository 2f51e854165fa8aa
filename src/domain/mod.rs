// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain Rust structs and traits describing a benchmark sweep.
//
// Rules for this layer:
//   - NO file I/O
//   - NO sampler or profiler code
//   - Only data types, the grid iterator, and the traits the
//     other layers implement

// Parameter values, grids and assignments
pub mod params;

// Lazy Cartesian-product expansion of a grid
pub mod grid;

// Bag-of-words corpus and vocabulary
pub mod corpus;

// Explicit trainer configuration
pub mod lda_config;

// Trainer, fitted model and memory hook abstractions
pub mod traits;
