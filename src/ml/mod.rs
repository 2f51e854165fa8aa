// ============================================================
// Layer 5 - Topic Model Backend
// ============================================================
// The concrete ModelTrainer the benchmark times and profiles.
//
//   gibbs.rs - GibbsLdaTrainer: builds an LdaModel from an
//              LdaConfig using worker-sharded Gibbs sampling
//   model.rs - LdaModel: fitted topic-word distributions
//
// The application layer only sees the ModelTrainer and
// TopicModel traits from the domain layer.

/// Worker-sharded collapsed Gibbs sampler
pub mod gibbs;

/// Fitted model and top-word extraction
pub mod model;
