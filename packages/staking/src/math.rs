pub mod casting;
pub mod reward;
pub mod safe_math;
