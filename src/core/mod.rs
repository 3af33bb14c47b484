pub mod clock;
pub mod input_adapter;
