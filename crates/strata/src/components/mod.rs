pub mod entity;
pub mod tile;
pub mod tilemap;
