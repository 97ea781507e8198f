//! Per-release catalog card markup.
//!
//! # Invariants
//! - Every record field is escaped before insertion.
//! - The cover links to the date alias; date and seq link to their aliases.

use super::html::escape_html;
use crate::model::release::ReleaseRecord;

const UNTITLED: &str = "Untitled";

/// Renders one catalog card.
pub fn render_card(record: &ReleaseRecord) -> String {
    let date = escape_html(&record.date);
    let seq = escape_html(&record.seq);
    let alt_title = if record.title.is_empty() {
        "demo"
    } else {
        record.title.as_str()
    };
    let heading_title = if record.title.is_empty() {
        UNTITLED
    } else {
        record.title.as_str()
    };

    format!(
        r#"<div class="card">
  <a href="./releases/date/{date}/" target="_blank">
    <img class="cover" src="./releases/date/{date}/cover.png" alt="open {alt}">
  </a>
  <h3>{seq}: {title}</h3>
  <div class="meta">
    Date: <a href="./releases/date/{date}/" target="_blank"><code>{date}</code></a>
    ·
    Seq: <a href="./releases/seq/{seq}/" target="_blank"><code>{seq}</code></a>
  </div>
  <p class="desc">{desc}</p>
</div>"#,
        alt = escape_html(alt_title),
        title = escape_html(heading_title),
        desc = escape_html(record.desc.trim()),
    )
}

/// Renders cards for `records` in the given order.
pub fn render_cards<'a>(records: impl IntoIterator<Item = &'a ReleaseRecord>) -> String {
    records
        .into_iter()
        .map(render_card)
        .collect::<Vec<_>>()
        .join("\n")
}
