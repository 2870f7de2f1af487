//! Integration tests for blocknoted script replay

use blocknoted::{DaemonConfig, DaemonRuntime};
use ipc::{BlockResponse, ResponseStatus};
use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;

fn replay(config: &DaemonConfig, script: &str) -> (DaemonRuntime, Vec<BlockResponse>) {
    let mut runtime = DaemonRuntime::new(config, script).unwrap();
    let mut out = Vec::new();
    runtime.run(&mut out).unwrap();

    let responses = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    (runtime, responses)
}

#[test]
fn test_scripted_note_session() {
    let script = r#"
        create header {"level": 1}
        op $ insert_text {"pos": 0, "new_text": "Shopping"}
        create list {"type": "todo"}
        op $2 insert_text {"pos": 0, "new_text": "milk"}
        op $2 change_value {"new_value": 7}
        change_type $1 quote
        first $1
        get $2
    "#;

    let (runtime, responses) = replay(&DaemonConfig::default(), script);
    assert_eq!(responses.len(), 8);
    assert!(responses.iter().all(BlockResponse::is_ok));
    assert_eq!(runtime.created_blocks().len(), 2);

    assert_eq!(responses[6].output, Some(json!("Shopping")));

    let list = responses[7].output.as_ref().unwrap();
    assert_eq!(list["type"], json!("list"));
    assert_eq!(list["data"]["value"], json!(1));
    assert_eq!(list["is_used"], json!(false));

    let blocks = runtime.service().blocks_for_note(runtime.note_id());
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].kind.as_str(), "quote");
}

#[test]
fn test_errors_do_not_stop_replay() {
    let script = r#"
        create text {"text": [{"style": "a", "string": "abc"}]}
        op $ apply_style {"start": 3, "end": 3, "style": "b"}
        op $ change_url {"new_url": "x"}
        first $
    "#;

    let (_, responses) = replay(&DaemonConfig::default(), script);
    let codes: Vec<Value> = responses
        .iter()
        .map(|response| match &response.status {
            ResponseStatus::Ok => json!("Ok"),
            ResponseStatus::Error(err) => serde_json::to_value(err.code).unwrap(),
        })
        .collect();
    assert_eq!(
        codes,
        vec![
            json!("Ok"),
            json!("InvalidRange"),
            json!("UnsupportedType"),
            json!("Ok")
        ]
    );
    assert_eq!(responses[3].output, Some(json!("abc")));
}

#[test]
fn test_config_file_drives_runtime() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"parallel_threshold": 2, "workers": 2, "max_steps": 1}}"#
    )
    .unwrap();
    let config = DaemonConfig::load(file.path()).unwrap();

    let (runtime, responses) = replay(&config, "create text\ncreate text");
    assert_eq!(responses.len(), 1);
    assert_eq!(runtime.step_count(), 1);
}

#[test]
fn test_parallel_normalization_matches_sequential() {
    let mut script = String::from("create text\n");
    for i in 0..40 {
        let style = if i % 3 == 0 { "bold" } else { "plain" };
        script.push_str(&format!(
            "op $ insert_text {{\"pos\": {}, \"new_text\": \"ab\"}}\n",
            i * 2
        ));
        script.push_str(&format!(
            "op $ apply_style {{\"start\": {}, \"end\": {}, \"style\": \"{}\"}}\n",
            i * 2,
            i * 2 + 2,
            style
        ));
    }
    script.push_str("get $\n");

    let sequential = DaemonConfig {
        parallel_threshold: usize::MAX,
        workers: 1,
        ..DaemonConfig::default()
    };
    let parallel = DaemonConfig {
        parallel_threshold: 2,
        workers: 4,
        ..DaemonConfig::default()
    };

    let (_, a) = replay(&sequential, &script);
    let (_, b) = replay(&parallel, &script);
    let data = |responses: &[BlockResponse]| {
        responses.last().unwrap().output.as_ref().unwrap()["data"].clone()
    };
    assert_eq!(data(&a), data(&b));
}
