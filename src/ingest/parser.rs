// src/ingest/parser.rs
//! RSS 2.0, RSS 1.0 (RDF) and Atom parsing into flat [`PaperRecord`]s.

use anyhow::{Context, Result};
use metrics::{counter, histogram};
use once_cell::sync::OnceCell;
use quick_xml::de::from_str;
use regex::{Captures, Regex};
use serde::Deserialize;
use std::borrow::Cow;

use crate::ingest::types::PaperRecord;

// The root element name is not checked, so one shape covers all three formats:
// RSS 2.0 nests items in <channel>, RDF puts them next to it, Atom uses <entry>.
#[derive(Debug, Deserialize)]
struct FeedDocument {
    channel: Option<Channel>,
    #[serde(default)]
    item: Vec<RssItem>,
    #[serde(default)]
    entry: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(default)]
    item: Vec<RssItem>,
}

// Element names are matched without their namespace prefix, so `dc:title`,
// `media:title` and `title` all land in `title`, and `atom:link` next to
// `link`. Every field is a list; the first usable value wins.
#[derive(Debug, Deserialize)]
struct RssItem {
    #[serde(default)]
    title: Vec<TextNode>,
    #[serde(default)]
    link: Vec<LinkNode>,
    #[serde(default)]
    description: Vec<TextNode>,
    #[serde(default)]
    guid: Vec<GuidNode>,
    /// `content:encoded`
    #[serde(default)]
    encoded: Vec<TextNode>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    #[serde(default)]
    title: Vec<TextNode>,
    #[serde(default)]
    summary: Vec<TextNode>,
    #[serde(default)]
    content: Vec<TextNode>,
    #[serde(default)]
    link: Vec<LinkNode>,
}

#[derive(Debug, Deserialize)]
struct TextNode {
    #[serde(rename = "$text", default)]
    text: String,
}

/// RSS `<link>url</link>` or Atom `<link href=".." rel=".."/>`.
#[derive(Debug, Deserialize)]
struct LinkNode {
    #[serde(rename = "$text", default)]
    text: String,
    #[serde(rename = "@href")]
    href: Option<String>,
    #[serde(rename = "@rel")]
    rel: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GuidNode {
    #[serde(rename = "$text", default)]
    text: String,
    #[serde(rename = "@isPermaLink")]
    is_perma_link: Option<String>,
}

fn first_text(nodes: Vec<TextNode>) -> Option<String> {
    nodes.into_iter().map(|n| n.text).find(|t| !t.trim().is_empty())
}

/// href of the first `rel="alternate"` (or rel-less) link.
fn alternate_href(links: &[LinkNode]) -> Option<String> {
    links
        .iter()
        .filter(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
        .filter_map(|l| l.href.as_deref())
        .map(str::trim)
        .find(|h| !h.is_empty())
        .map(str::to_string)
}

impl RssItem {
    fn into_record(self, source: &str) -> PaperRecord {
        // <link> text, then atom:link, then a permalink guid (the default)
        let link = self
            .link
            .iter()
            .map(|l| l.text.trim())
            .find(|t| !t.is_empty())
            .map(str::to_string)
            .or_else(|| alternate_href(&self.link))
            .or_else(|| {
                self.guid
                    .iter()
                    .filter(|g| {
                        !g.is_perma_link
                            .as_deref()
                            .is_some_and(|v| v.trim().eq_ignore_ascii_case("false"))
                    })
                    .map(|g| g.text.trim())
                    .find(|t| !t.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_default();

        PaperRecord {
            title: first_text(self.title).unwrap_or_default(),
            summary: first_text(self.description)
                .or_else(|| first_text(self.encoded))
                .unwrap_or_default(),
            link,
            source: source.to_string(),
        }
    }
}

impl AtomEntry {
    fn into_record(self, source: &str) -> PaperRecord {
        let link = alternate_href(&self.link)
            .or_else(|| {
                self.link
                    .iter()
                    .filter_map(|l| l.href.as_deref())
                    .map(|h| h.trim().to_string())
                    .find(|h| !h.is_empty())
            })
            .unwrap_or_default();
        PaperRecord {
            title: first_text(self.title).unwrap_or_default(),
            summary: first_text(self.summary)
                .or_else(|| first_text(self.content))
                .unwrap_or_default(),
            link,
            source: source.to_string(),
        }
    }
}

/// Parse a feed body and return at most `limit` records, in document order.
pub fn parse_feed(xml: &str, source: &str, limit: usize) -> Result<Vec<PaperRecord>> {
    let t0 = std::time::Instant::now();
    let xml_clean = scrub_html_entities_for_xml(xml);
    let doc: FeedDocument =
        from_str(&xml_clean).with_context(|| format!("parsing feed xml for {source}"))?;

    let rss_items = doc
        .channel
        .map(|c| c.item)
        .unwrap_or_default()
        .into_iter()
        .chain(doc.item)
        .map(|it| it.into_record(source));
    let atom_entries = doc.entry.into_iter().map(|e| e.into_record(source));
    let out: Vec<PaperRecord> = rss_items.chain(atom_entries).take(limit).collect();

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("digest_feed_parse_ms").record(ms);
    counter!("digest_feed_entries_total").increment(out.len() as u64);
    Ok(out)
}

/// XML only knows five named entities. Feeds routinely carry HTML ones
/// (`&nbsp;`, `&ndash;`, ...), which would abort parsing; turn them into
/// numeric references. Unknown names are escaped so they survive as text.
fn scrub_html_entities_for_xml(s: &str) -> Cow<'_, str> {
    static RE_ENTITY: OnceCell<Regex> = OnceCell::new();
    let re = RE_ENTITY
        .get_or_init(|| Regex::new(r"&([A-Za-z][A-Za-z0-9]{0,31});").expect("entity regex"));

    re.replace_all(s, |caps: &Captures| {
        let whole = &caps[0];
        if matches!(&caps[1], "amp" | "lt" | "gt" | "quot" | "apos") {
            return whole.to_string();
        }
        let decoded = html_escape::decode_html_entities(whole);
        if decoded == whole {
            format!("&amp;{}", &whole[1..])
        } else {
            decoded.chars().map(|c| format!("&#{};", c as u32)).collect()
        }
    })
}
