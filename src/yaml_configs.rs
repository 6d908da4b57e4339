pub mod generation_compiled_in;
pub mod generation_loader;
