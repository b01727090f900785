pub mod relay_service;
pub mod roadmap_service;
