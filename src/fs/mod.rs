pub mod classify;
pub mod listing;
pub mod opener;
pub mod permissions;
pub mod recursive;
