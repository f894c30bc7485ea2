pub mod member;
pub mod pool;
pub mod reward;
