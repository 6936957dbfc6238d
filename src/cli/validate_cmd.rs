//! `placard validate` — load a feed and report the valid/invalid split
//! without rendering anything.

use anyhow::Result;
use placard::{DisclaimerWidget, WidgetOptions};

pub async fn run(options: WidgetOptions, json: bool) -> Result<()> {
    let widget = DisclaimerWidget::new(options)?;
    let loaded = widget.load_feed().await?;

    let valid_ids: Vec<&str> = loaded.feed.records().iter().map(|r| r.id.as_str()).collect();

    if json {
        println!(
            "{}",
            serde_json::json!({
                "valid": valid_ids,
                "invalid": loaded.invalid_ids,
            })
        );
    } else {
        println!("valid:   {} record(s)", valid_ids.len());
        for id in &valid_ids {
            println!("  {id}");
        }
        println!("invalid: {} record(s)", loaded.invalid_ids.len());
        for id in &loaded.invalid_ids {
            println!("  {id}");
        }
    }
    Ok(())
}
