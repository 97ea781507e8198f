//! Self-contained catalog page (`index.html`).
//!
//! # Responsibility
//! - Render the catalog shell with a pre-rendered card list.
//! - Embed the client-side ranked search that re-renders from the manifest.
//!
//! # Invariants
//! - The page script loads `./releases/manifest.json` and falls back to an
//!   empty list on any fetch or parse failure.
//! - The script ranking mirrors [`crate::search::rank::search_ranked`].
//! - The favicon is always `./latest/cover.png`.

use super::card::render_cards;
use super::html::escape_html;
use crate::atomic_write::write_atomic;
use crate::config::{CatalogConfig, SiteLayout};
use crate::model::release::ReleaseRecord;
use log::{error, info};
use std::path::PathBuf;

const TITLE_SLOT: &str = "@@SITE_TITLE@@";
const CARDS_SLOT: &str = "@@CARDS@@";

const PAGE_TEMPLATE: &str = r##"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>@@SITE_TITLE@@ — All Releases</title>
<meta name="viewport" content="width=device-width, initial-scale=1">
<link rel="icon" href="./latest/cover.png" type="image/png">
<style>
  body{font:16px/1.5 system-ui,Segoe UI,Roboto,Arial;margin:2rem;max-width:920px}
  header{display:flex;gap:1rem;align-items:center;flex-wrap:wrap}
  input{font:inherit;padding:.5rem .75rem;border:1px solid #ddd;border-radius:.5rem;min-width:280px}
  .grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(260px,1fr));gap:1rem;margin-top:1rem}
  .card{border:1px solid #e5e5e5;border-radius:.75rem;padding:1rem}
  .card h3{margin:.25rem 0;font-size:1.1rem}
  .meta{color:#666;font-size:.9rem;margin-top:.15rem}
  .meta a{color:inherit;text-decoration:underline dotted}
  .cover{width:100%;aspect-ratio:1/1;object-fit:cover;border-radius:.5rem;border:1px solid #eee;margin:.5rem 0;display:block}
  .desc{color:#555;font-size:.92rem;margin-top:.35rem}
  .muted{color:#888;font-size:.95rem}
</style>
</head>
<body>
<header>
  <h1 style="margin:0">@@SITE_TITLE@@</h1>
  <a href="./latest/" style="margin-left:auto">Latest</a>
  <input id="q" placeholder="Search by date (YYYYMMDD), year/month, #seq or text">
</header>
<p class="muted">Open a release from its cover. <b>Date</b> and <b>Seq</b> in each card are permanent links.</p>
<div id="list" class="grid">
@@CARDS@@
</div>
<script>
(function () {
  var list = document.getElementById('list');
  var input = document.getElementById('q');
  var records = [];

  function escapeHtml(value) {
    var table = { '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;' };
    return String(value == null ? '' : value).replace(/[&<>"']/g, function (ch) { return table[ch]; });
  }

  function card(rec) {
    var date = escapeHtml(rec.date);
    var seq = escapeHtml(rec.seq);
    return '<div class="card">' +
      '<a href="./releases/date/' + date + '/" target="_blank">' +
      '<img class="cover" src="./releases/date/' + date + '/cover.png" alt="open ' + escapeHtml(rec.title || 'demo') + '">' +
      '</a>' +
      '<h3>' + seq + ': ' + escapeHtml(rec.title || 'Untitled') + '</h3>' +
      '<div class="meta">Date: <a href="./releases/date/' + date + '/" target="_blank"><code>' + date + '</code></a>' +
      ' · Seq: <a href="./releases/seq/' + seq + '/" target="_blank"><code>' + seq + '</code></a></div>' +
      '<p class="desc">' + escapeHtml(String(rec.desc || '').trim()) + '</p>' +
      '</div>';
  }

  function render(items) {
    list.innerHTML = items.map(card).join('');
  }

  function fields(rec) {
    return [rec.date, rec.seq, rec.title, rec.desc].map(function (v) {
      return String(v == null ? '' : v).toLowerCase();
    });
  }

  function rank(query) {
    var q = String(query || '').trim().toLowerCase();
    if (!q) return records;
    var exact = [], starts = [], contains = [];
    records.forEach(function (rec) {
      var f = fields(rec);
      if (f[1] === q) { exact.push(rec); return; }
      if (f.some(function (v) { return v.indexOf(q) === 0; })) { starts.push(rec); return; }
      if (f.some(function (v) { return v.indexOf(q) !== -1; })) { contains.push(rec); }
    });
    return exact.concat(starts, contains);
  }

  input.addEventListener('input', function () { render(rank(input.value)); });

  fetch('./releases/manifest.json', { cache: 'no-store' })
    .then(function (res) {
      if (!res.ok) throw new Error('manifest status ' + res.status);
      return res.json();
    })
    .then(function (data) { return Array.isArray(data) ? data : []; })
    .catch(function (err) {
      console.error('manifest unavailable:', err);
      return [];
    })
    .then(function (data) {
      records = data;
      render(rank(input.value));
    });
})();
</script>
</body>
</html>
"##;

/// Renders the full catalog page for `records` (manifest order).
pub fn render_catalog_page(config: &CatalogConfig, records: &[ReleaseRecord]) -> String {
    // Slots are filled on the template only, never on already inserted text.
    let title = escape_html(&config.site_title);
    let (head, tail) = PAGE_TEMPLATE
        .split_once(CARDS_SLOT)
        .unwrap_or((PAGE_TEMPLATE, ""));
    let mut page = head.replace(TITLE_SLOT, &title);
    page.push_str(&render_cards(records));
    page.push_str(&tail.replace(TITLE_SLOT, &title));
    page
}

/// Writes `index.html` at the catalog root.
///
/// # Errors
/// - Returns the I/O error when the page cannot be written.
pub fn write_catalog(
    layout: &SiteLayout,
    config: &CatalogConfig,
    records: &[ReleaseRecord],
) -> std::io::Result<PathBuf> {
    let path = layout.index_path();
    let page = render_catalog_page(config, records);
    if let Err(err) = write_atomic(&path, page.as_bytes()) {
        error!(
            "event=catalog_render module=catalog status=error path={} error={}",
            path.display(),
            err
        );
        return Err(err);
    }
    info!(
        "event=catalog_render module=catalog status=ok records={} bytes={}",
        records.len(),
        page.len()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::{render_catalog_page, CARDS_SLOT, TITLE_SLOT};
    use crate::config::CatalogConfig;

    #[test]
    fn all_slots_are_filled() {
        let page = render_catalog_page(&CatalogConfig::default(), &[]);
        assert!(!page.contains(TITLE_SLOT));
        assert!(!page.contains(CARDS_SLOT));
        assert!(page.contains("<title>jsdemo — All Releases</title>"));
    }
}
