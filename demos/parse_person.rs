//! Parse a person record, with every way it can go wrong named up front.
//!
//! Run with `RUST_LOG=trace cargo run --example parse_person` to see exits
//! being dispatched.

use futures_lite::future;
use gbye::prelude::*;
use serde_json::Value;
use std::collections::HashMap;
use std::convert::Infallible;
use tracing_subscriber::EnvFilter;

#[derive(Debug, PartialEq)]
struct Person {
    age: f64,
}

/// Every expected way parsing can stop early.
#[derive(Debug)]
enum Rejected {
    Malformed(serde_json::Error),
    AgeNotANumber(Value),
    NegativeAge(f64),
}

fn explain(rejected: Rejected) -> String {
    match rejected {
        Rejected::Malformed(e) => format!("not JSON: {e}"),
        Rejected::AgeNotANumber(age) => format!("age must be a number, got {age}"),
        Rejected::NegativeAge(age) => format!("age must be 0 or greater, got {age}"),
    }
}

fn parse_person(text: &str) -> Result<Either<Person, String>, Infallible> {
    run_either(
        |ctl: Controls<Rejected>| {
            let json: Value = ctl.trap(Rejected::Malformed, || serde_json::from_str(text))?;
            let age = match json.get("age") {
                Some(Value::Number(n)) => n.as_f64(),
                Some(other) => return ctl.exit(Rejected::AgeNotANumber(other.clone())),
                None => None,
            };
            let Some(age) = age else {
                return ctl.exit(Rejected::AgeNotANumber(Value::Null));
            };
            if age < 0.0 {
                return ctl.exit(Rejected::NegativeAge(age));
            }
            Ok(Person { age })
        },
        explain,
    )
}

/// A lookup that can fail for reasons outside this program's control.
#[derive(Debug, thiserror::Error)]
enum StoreError {
    #[error("no record named {0:?}")]
    Missing(String),
}

struct Store {
    records: HashMap<&'static str, &'static str>,
}

impl Store {
    async fn fetch(&self, name: &str) -> Result<&'static str, StoreError> {
        future::yield_now().await;
        self.records
            .get(name)
            .copied()
            .ok_or_else(|| StoreError::Missing(name.to_string()))
    }
}

enum Lookup {
    Unavailable(String, StoreError),
    Rejected(String),
}

async fn load_person(store: &Store, name: &str) -> Result<String, Infallible> {
    run_async(
        |ctl: Controls<Lookup>| async move {
            let text = ctl
                .trap_async(|e| Lookup::Unavailable(name.to_string(), e), store.fetch(name))
                .await?;
            match parse_person(text) {
                Ok(Either::Left(person)) => Ok(format!("{name} is {}", person.age)),
                Ok(Either::Right(reason)) => ctl.exit(Lookup::Rejected(reason)),
            }
        },
        |lookup| match lookup {
            Lookup::Unavailable(name, e) => format!("could not load {name}: {e}"),
            Lookup::Rejected(reason) => format!("bad record: {reason}"),
        },
    )
    .await
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    for text in [r#"{"age":10}"#, r#"{"age":"10"}"#, r#"{"age":-1}"#, r#"{"age":10"#] {
        let Ok(outcome) = parse_person(text);
        match outcome {
            Either::Left(person) => println!("{text} -> age {}", person.age),
            Either::Right(reason) => println!("{text} -> {reason}"),
        }
    }

    let store = Store {
        records: HashMap::from([("ada", r#"{"age":36}"#), ("bob", r#"{"age":-4}"#)]),
    };
    for name in ["ada", "bob", "eve"] {
        let Ok(line) = future::block_on(load_person(&store, name));
        println!("{line}");
    }
}
