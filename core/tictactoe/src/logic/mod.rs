//! 核心業務邏輯（純函數，不接觸宿主環境）

pub mod geometry;
pub mod id_generator;
pub mod lines;
