//! Core dependency graph model: parsing build tool output into an adjacency
//! graph and compacting it into a deduplicated package graph.

pub mod domain;
pub mod policies;
pub mod services;
