// src/config/mod.rs
pub mod app;

pub use app::{
    clamp_top_k, clamp_top_k_value, AppConfig, DEFAULT_API_URL, DEFAULT_DISCLAIMER, DEFAULT_TOP_K,
    ENV_API_URL, ENV_CONFIG_PATH, ENV_TOP_K,
};
