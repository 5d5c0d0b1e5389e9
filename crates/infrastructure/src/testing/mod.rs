//! Testing utilities shared by the adapter tests.

mod test_fixtures;

pub use test_fixtures::TestFeatures;
