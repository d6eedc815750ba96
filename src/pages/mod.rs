pub mod not_found;
pub mod search;
pub mod tree;
