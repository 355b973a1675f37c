//! Infrastructure: persistence, blob storage, LLM API

pub mod blob;
pub mod database;
pub mod llm;
