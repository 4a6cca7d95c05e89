pub mod admin_themes;
pub mod themes;
pub mod track;
