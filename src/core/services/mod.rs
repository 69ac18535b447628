//! External services integration
//!
//! Service clients for the sites the pipeline acquires data from.

pub mod chosic;

pub use chosic::ChosicClient;
