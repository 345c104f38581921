//! 領域型別：別名、常數與基本值型別

pub mod alias;
pub mod constants;
pub mod core_types;
