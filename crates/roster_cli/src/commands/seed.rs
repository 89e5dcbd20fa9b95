//! Demo data: one person (read or created by name) with one note.

use anyhow::{anyhow, Context};
use roster_core::{Api, ApiResponse};
use serde_json::json;

const DEMO_PERSON: &str = "apw";

pub fn execute(api: &Api<'_>) -> anyhow::Result<ApiResponse> {
    let person_id = find_or_create_person(api, DEMO_PERSON)?;
    log::info!("event=seed module=cli status=ok person_id={}", person_id);

    let note = json!({ "text": "testing\nfoo", "category": "test", "person": person_id });
    let created = api.create_note(&note.to_string());
    if !created.is_success() {
        return Ok(created);
    }
    Ok(api.get_person(&person_id.to_string()))
}

fn find_or_create_person(api: &Api<'_>, name: &str) -> anyhow::Result<i64> {
    let listed = api.list_people::<&str>(&[]);
    if let Some(id) = person_id_by_name(&listed.body, name) {
        return Ok(id);
    }
    let created = api.create_person(&json!({ "name": name }).to_string());
    if !created.is_success() {
        return Err(anyhow!("creating demo person failed: {}", created.body));
    }
    created.body["person"]["id"]
        .as_i64()
        .context("create response carries no person id")
}

fn person_id_by_name(body: &serde_json::Value, name: &str) -> Option<i64> {
    body["people"]
        .as_array()?
        .iter()
        .find(|person| person["name"] == name)
        .and_then(|person| person["id"].as_i64())
}
