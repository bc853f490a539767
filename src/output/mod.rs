pub mod jsonl;

pub use jsonl::{render_jsonl, write_jsonl};
