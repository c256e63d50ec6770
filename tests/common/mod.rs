use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(dead_code)]
pub fn temp_article(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let article_path = temp_dir.path().join("article.txt");
    fs::write(&article_path, contents).expect("failed to write article file");
    (temp_dir, article_path)
}

/// The structured payload the model would put in `message.content`
#[allow(dead_code)]
pub fn cat_collection() -> Value {
    json!({
        "system_prompt": "You are an expert in writing rich and dense summaries in broad domains.",
        "prompt": "Article: The cat sat on the mat.",
        "summaries": [
            {"denser_summary": "A cat rests.", "missing_entities": ["cat", "mat"]}
        ]
    })
}

/// A `/chat/completions` success body carrying `content` as the message text
#[allow(dead_code)]
pub fn chat_completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_723_000_000,
        "model": "gpt-4o-2024-08-06",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content,
                "refusal": null
            },
            "finish_reason": "stop"
        }],
        "usage": {
            "prompt_tokens": 512,
            "completion_tokens": 64,
            "total_tokens": 576
        }
    })
}
