mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

#[tokio::test]
async fn create_then_list_shows_the_note() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let (token, _) = common::signup_shop(&client, &server.base_url, "List Shop").await?;

    let note = common::create_debt(
        &client,
        &server.base_url,
        &token,
        json!({
            "customer_name": "Ali",
            "phone": "+99890 123 45 67",
            "items": [
                { "description": "flour", "amount": "12.50" },
                { "description": "sugar", "amount": "7.25" }
            ],
            "total": "19.75"
        }),
    )
    .await?;

    assert_eq!(note["customer_name"], "Ali");
    assert_eq!(note["status"], "unpaid");
    assert_eq!(note["items"].as_array().map(Vec::len), Some(2));

    let notes = common::list_debts(&client, &server.base_url, &token, "").await?;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["id"], note["id"]);
    Ok(())
}

#[tokio::test]
async fn get_update_delete_cycle() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let (token, _) = common::signup_shop(&client, &server.base_url, "Cycle Shop").await?;

    let note = common::create_debt(
        &client,
        &server.base_url,
        &token,
        json!({
            "customer_name": "Bekzod",
            "items": [{ "description": "rice", "amount": "30.00" }],
            "total": "30.00"
        }),
    )
    .await?;
    let id = note["id"].as_str().unwrap();
    let url = format!("{}/api/debts/{}", server.base_url, id);

    let fetched: Value = client
        .get(&url)
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(fetched["customer_name"], "Bekzod");

    let updated: Value = client
        .patch(&url)
        .bearer_auth(&token)
        .json(&json!({ "status": "paid" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(updated["status"], "paid");
    // Untouched fields survive the partial update.
    assert_eq!(updated["customer_name"], "Bekzod");

    let deleted = client.delete(&url).bearer_auth(&token).send().await?;
    assert_eq!(deleted.status(), StatusCode::OK);

    let gone = client.get(&url).bearer_auth(&token).send().await?;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn missing_notes_are_not_found() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let (token, _) = common::signup_shop(&client, &server.base_url, "Missing Shop").await?;

    let url = format!("{}/api/debts/{}", server.base_url, Uuid::new_v4());

    let get = client.get(&url).bearer_auth(&token).send().await?;
    assert_eq!(get.status(), StatusCode::NOT_FOUND);

    let patch = client
        .patch(&url)
        .bearer_auth(&token)
        .json(&json!({ "status": "paid" }))
        .send()
        .await?;
    assert_eq!(patch.status(), StatusCode::NOT_FOUND);

    let delete = client.delete(&url).bearer_auth(&token).send().await?;
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn status_and_overdue_filters_narrow_the_list() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let (token, _) = common::signup_shop(&client, &server.base_url, "Filter Shop").await?;

    let past_due = (chrono::Utc::now() - chrono::Duration::days(3)).to_rfc3339();
    let future_due = (chrono::Utc::now() + chrono::Duration::days(3)).to_rfc3339();

    let overdue = common::create_debt(
        &client,
        &server.base_url,
        &token,
        json!({
            "customer_name": "Overdue Olim",
            "items": [{ "description": "oil", "amount": "9.00" }],
            "total": "9.00",
            "due_date": past_due
        }),
    )
    .await?;
    let upcoming = common::create_debt(
        &client,
        &server.base_url,
        &token,
        json!({
            "customer_name": "Upcoming Umid",
            "items": [{ "description": "tea", "amount": "4.00" }],
            "total": "4.00",
            "due_date": future_due
        }),
    )
    .await?;

    // Mark one as paid to exercise the status filter.
    let paid: Value = client
        .patch(format!(
            "{}/api/debts/{}",
            server.base_url,
            upcoming["id"].as_str().unwrap()
        ))
        .bearer_auth(&token)
        .json(&json!({ "status": "paid" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(paid["status"], "paid");

    let paid_only =
        common::list_debts(&client, &server.base_url, &token, "?status=paid").await?;
    assert_eq!(paid_only.len(), 1);
    assert_eq!(paid_only[0]["id"], upcoming["id"]);

    let unpaid_only =
        common::list_debts(&client, &server.base_url, &token, "?status=unpaid").await?;
    assert_eq!(unpaid_only.len(), 1);
    assert_eq!(unpaid_only[0]["id"], overdue["id"]);

    // Reminders view: only the unpaid, past-due note.
    let reminders =
        common::list_debts(&client, &server.base_url, &token, "?overdue=true").await?;
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0]["id"], overdue["id"]);
    Ok(())
}

#[tokio::test]
async fn newest_notes_come_first() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let (token, _) = common::signup_shop(&client, &server.base_url, "Order Shop").await?;

    for name in ["First", "Second", "Third"] {
        common::create_debt(
            &client,
            &server.base_url,
            &token,
            json!({
                "customer_name": name,
                "items": [{ "description": "misc", "amount": "1.00" }],
                "total": "1.00"
            }),
        )
        .await?;
    }

    let notes = common::list_debts(&client, &server.base_url, &token, "").await?;
    let names: Vec<&str> = notes
        .iter()
        .map(|n| n["customer_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Third", "Second", "First"]);
    Ok(())
}
