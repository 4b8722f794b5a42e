pub mod frame;
pub mod pipeline;
