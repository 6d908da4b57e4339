// mods roughly sorted by dependency ↓

pub mod custom_error;
pub mod nicer_logs;
pub mod call_validation;
pub mod yaml_configs;

pub mod kv_store;
pub mod kv_cloudflare;
pub mod files_tools;
pub mod chat_history;

pub mod inference;
pub mod forward_to_workers_ai;
pub mod forward_to_openai_endpoint;
pub mod model_reply;
pub mod postprocessing;

pub mod generation_mode;
pub mod global_context;
pub mod dispatcher;
pub mod http;
