pub mod glyphs;
pub mod timeline;
