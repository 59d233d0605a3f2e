mod dependency_key;

pub use dependency_key::DependencyKeyPolicy;
