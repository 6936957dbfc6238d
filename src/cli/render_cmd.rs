//! `placard render` — run the full pipeline for one page URL and print
//! the container markup.

use anyhow::Result;
use placard::{DisclaimerWidget, HostPage, WidgetOptions};

pub async fn run(options: WidgetOptions, page_url: &str, json: bool) -> Result<()> {
    let container_id = options.container_id.clone();
    let widget = DisclaimerWidget::new(options)?;
    let mut page = HostPage::new(page_url);

    let outcome = widget.insert_page_contents(&mut page).await?;
    let html = page.container_html(&container_id).unwrap_or_default();

    if json {
        println!(
            "{}",
            serde_json::json!({
                "success": outcome.success,
                "failed": outcome.failed,
                "containerId": container_id,
                "html": html,
            })
        );
    } else {
        println!("{html}");
        eprintln!("  rendered: {}", outcome.success.join(", "));
    }
    Ok(())
}
