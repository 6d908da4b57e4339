pub mod pp_code_fences;
