pub mod listing;
pub mod recursive;
pub mod sidebar;
pub mod status_bar;
