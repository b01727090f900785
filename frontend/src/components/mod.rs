pub mod ask;
pub mod roadmap;
