//! Line-oriented JSON protocol over any reader/writer pair.
//!
//! Each input line is one command object tagged by `op`; each reply is one
//! line `{"id":..,"ok":true,"result":..}` or `{"id":..,"ok":false,"error":..}`.
//! Blank lines are skipped, malformed lines get an error reply with id 0.

use crate::keygen::KeyGen;
use crate::requests::{CreateCanvas, DrawRect, FloodFill};
use crate::service::CanvasService;
use crate::store::DocumentStore;
use crate::Result;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{self, BufRead, Write};

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
enum Job {
    Create(CreateCanvas),
    Get {
        key: String,
    },
    List {
        #[serde(default)]
        cursor: u64,
        #[serde(default)]
        limit: usize,
    },
    Delete {
        key: String,
    },
    Rect {
        key: String,
        #[serde(flatten)]
        req: DrawRect,
    },
    Fill {
        key: String,
        #[serde(flatten)]
        req: FloodFill,
    },
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    id: u64,
    #[serde(flatten)]
    job: Job,
}

#[derive(Debug, Serialize)]
struct Reply {
    id: u64,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Reply {
    fn from_result(id: u64, res: Result<Value>) -> Self {
        match res {
            Ok(v) => Reply {
                id,
                ok: true,
                result: Some(v),
                error: None,
            },
            Err(e) => Reply {
                id,
                ok: false,
                result: None,
                error: Some(e.to_string()),
            },
        }
    }
}

fn to_value<T: Serialize>(v: T) -> Result<Value> {
    serde_json::to_value(v).map_err(|e| crate::Error::EncodingFailure(e.to_string()))
}

fn run_job<S: DocumentStore, K: KeyGen>(service: &CanvasService<S, K>, job: Job) -> Result<Value> {
    match job {
        Job::Create(req) => to_value(service.create_document(req)?),
        Job::Get { key } => to_value(service.get_document(&key)?),
        Job::List { cursor, limit } => to_value(service.list_documents(cursor, limit)?),
        Job::Delete { key } => {
            service.delete_document(&key)?;
            Ok(Value::Null)
        }
        Job::Rect { key, req } => to_value(service.draw_rect(&key, &req)?),
        Job::Fill { key, req } => to_value(service.flood_fill(&key, &req)?),
    }
}

/// Answer commands from `input` until it is exhausted.
pub fn serve_lines<S, K, R, W>(
    service: &CanvasService<S, K>,
    input: R,
    mut output: W,
) -> io::Result<()>
where
    S: DocumentStore,
    K: KeyGen,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let reply = match serde_json::from_str::<Envelope>(&line) {
            Ok(Envelope { id, job }) => {
                debug!("job {}: {:?}", id, job);
                Reply::from_result(id, run_job(service, job))
            }
            Err(e) => {
                warn!("ignoring malformed command: {}", e);
                Reply {
                    id: 0,
                    ok: false,
                    result: None,
                    error: Some(format!("malformed command: {}", e)),
                }
            }
        };

        let js = serde_json::to_string(&reply).unwrap_or_else(|_| {
            format!("{{\"id\":{},\"ok\":false,\"error\":\"serialization failed\"}}", reply.id)
        });
        writeln!(output, "{}", js)?;
        output.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keygen::UlidKeyGen;
    use crate::store::MemoryStore;
    use crate::ServiceConfig;

    type TestService = CanvasService<MemoryStore, UlidKeyGen>;

    fn service() -> TestService {
        CanvasService::new(
            MemoryStore::new(),
            UlidKeyGen::new(),
            ServiceConfig::default(),
        )
    }

    fn run(service: &TestService, input: &str) -> Vec<Value> {
        let mut out = Vec::new();
        serve_lines(service, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn full_session_on_one_store() {
        let svc = service();
        let replies = run(&svc, r#"{"id":1,"op":"create","name":"s","width":3,"height":2}"#);
        assert_eq!(replies[0]["ok"], true);
        let key = replies[0]["result"].as_str().unwrap().to_string();

        let rect = format!(
            r#"{{"id":2,"op":"rect","key":"{}","rect":{{"origin":{{"x":0,"y":0}},"width":2,"height":2}},"fill":"x"}}"#,
            key
        );
        let fill = format!(
            r#"{{"id":3,"op":"fill","key":"{}","origin":{{"x":2,"y":0}},"fill":"o"}}"#,
            key
        );
        let script = format!("{}\n\n{}\n{}\n", rect, fill, r#"{"id":4,"op":"list"}"#);
        let replies = run(&svc, &script);

        assert_eq!(replies.len(), 3);
        assert_eq!(replies[0]["result"]["data"], "xx-xx-");
        assert_eq!(replies[1]["id"], 3);
        assert_eq!(replies[1]["result"]["data"], "xxoxxo");
        assert_eq!(replies[2]["result"]["count"], 1);
    }

    #[test]
    fn malformed_lines_get_error_replies() {
        let replies = run(&service(), "not json\n{\"id\":9,\"op\":\"explode\"}\n");
        assert_eq!(replies.len(), 2);
        for reply in &replies {
            assert_eq!(reply["ok"], false);
            assert_eq!(reply["id"], 0);
        }
    }

    #[test]
    fn operation_errors_are_reported() {
        let svc = service();
        let replies = run(
            &svc,
            r#"{"id":5,"op":"fill","key":"x","origin":{"x":0,"y":0},"fill":"o"}"#,
        );
        assert_eq!(replies[0]["id"], 5);
        assert_eq!(replies[0]["error"], "document not found: x");

        let key = svc
            .create_document(CreateCanvas {
                name: String::new(),
                width: 2,
                height: 2,
            })
            .unwrap();
        let line = format!(
            r#"{{"id":6,"op":"fill","key":"{}","origin":{{"x":0,"y":0}},"fill":"ab"}}"#,
            key
        );
        let replies = run(&svc, &line);
        assert_eq!(replies[0]["ok"], false);
        assert_eq!(replies[0]["error"], "the drawing pattern is invalid");
    }
}
