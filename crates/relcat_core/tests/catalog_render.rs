use relcat_core::config::{CatalogConfig, SiteLayout};
use relcat_core::{escape_html, render_card, render_catalog_page, write_catalog, ReleaseRecord};

fn record(date: &str, seq: &str, title: &str, desc: &str) -> ReleaseRecord {
    ReleaseRecord {
        date: date.to_string(),
        seq: seq.to_string(),
        title: title.to_string(),
        desc: desc.to_string(),
    }
}

#[test]
fn script_in_title_is_rendered_as_text() {
    let card = render_card(&record(
        "20250101",
        "1",
        "<script>alert('x')</script>",
        "a & b \"quoted\"",
    ));
    assert!(!card.contains("<script>"));
    assert!(card.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    assert!(card.contains("a &amp; b &quot;quoted&quot;"));
}

#[test]
fn card_links_cover_date_and_seq_aliases() {
    let card = render_card(&record("20250816", "6", "Echo", "Orbits"));
    assert!(card.contains(r#"<a href="./releases/date/20250816/" target="_blank">"#));
    assert!(card.contains(r#"src="./releases/date/20250816/cover.png""#));
    assert!(card.contains(r#"<a href="./releases/seq/6/" target="_blank"><code>6</code></a>"#));
    assert!(card.contains("<h3>6: Echo</h3>"));
    assert!(card.contains(r#"<p class="desc">Orbits</p>"#));
}

#[test]
fn page_embeds_manifest_fetch_and_favicon() {
    let page = render_catalog_page(&CatalogConfig::default(), &[]);
    assert!(page.contains("fetch('./releases/manifest.json'"));
    assert!(page.contains(r#"<link rel="icon" href="./latest/cover.png" type="image/png">"#));
    assert!(page.contains(".catch("));
    assert!(page.contains(r#"<input id="q""#));
}

#[test]
fn page_lists_cards_in_manifest_order() {
    let records = vec![
        record("20250102", "2", "Second", ""),
        record("20250101", "1", "First", ""),
    ];
    let page = render_catalog_page(&CatalogConfig::default(), &records);
    let second = page.find("<h3>2: Second</h3>").unwrap();
    let first = page.find("<h3>1: First</h3>").unwrap();
    assert!(second < first);
}

#[test]
fn site_title_is_escaped_and_not_reinterpreted() {
    let config = CatalogConfig {
        site_title: "<b>demos</b>".to_string(),
    };
    let records = vec![record("20250101", "1", "@@SITE_TITLE@@", "")];
    let page = render_catalog_page(&config, &records);
    assert!(page.contains(&format!("<h1 style=\"margin:0\">{}</h1>", escape_html("<b>demos</b>"))));
    assert!(page.contains("<h3>1: @@SITE_TITLE@@</h3>"));
}

#[test]
fn write_catalog_places_index_at_site_root() {
    let dir = tempfile::tempdir().unwrap();
    let layout = SiteLayout::new(dir.path().join("dist"), dir.path().join("site"));
    let path = write_catalog(&layout, &CatalogConfig::default(), &[]).unwrap();
    assert_eq!(path, dir.path().join("site").join("index.html"));
    assert!(std::fs::read_to_string(path).unwrap().starts_with("<!doctype html>"));
}
