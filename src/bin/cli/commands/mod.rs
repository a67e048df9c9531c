pub mod add;
pub mod due;
pub mod export;
pub mod list;
pub mod lookup;
pub mod review;
pub mod stats;
