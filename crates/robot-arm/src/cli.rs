pub mod animate;
pub mod manual;
pub mod solve;
