pub mod parser;

pub use parser::parse_json;

use schemars::gen::SchemaGenerator;
use schemars::JsonSchema;

/// Generate a pretty-printed JSON schema string for embedding in LLM prompts
pub fn json_schema_string<T: JsonSchema>() -> String {
    let mut gen = SchemaGenerator::default();
    let schema = gen.root_schema_for::<T>();
    serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
}
