pub mod broadphase;
pub mod collision;
pub mod debug;
pub mod physics;
