use std::{fs, path::Path};

use chrono::{DateTime, NaiveDateTime, Utc};
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{
    config::FeedConfig,
    entry::Entry,
    error::{Error, Result},
};

const RSS_DOCS: &str = "https://www.rssboard.org/rss-specification";

/// An RSS 2.0 channel ready to be written out.
#[derive(Debug, Clone)]
pub struct Feed {
    pub title: String,
    pub link: String,
    pub description: String,
    pub last_build: DateTime<Utc>,
    pub entries: Vec<Entry>,
}

impl Feed {
    pub fn new(config: &FeedConfig, entries: Vec<Entry>, last_build: DateTime<Utc>) -> Self {
        Feed {
            title: config.title.clone(),
            link: config.link.clone(),
            description: config.description.clone(),
            last_build,
            entries,
        }
    }

    pub fn to_xml(&self) -> Result<String> {
        let mut w = Writer::new_with_indent(Vec::new(), b' ', 2);
        emit(&mut w, Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        emit(&mut w, Event::Start(rss))?;
        emit(&mut w, Event::Start(BytesStart::new("channel")))?;

        text_element(&mut w, "title", &self.title)?;
        text_element(&mut w, "link", &self.link)?;
        text_element(&mut w, "description", &self.description)?;
        text_element(&mut w, "lastBuildDate", &rfc822(&self.last_build.naive_utc()))?;
        text_element(
            &mut w,
            "generator",
            concat!("pep2rss ", env!("CARGO_PKG_VERSION")),
        )?;
        text_element(&mut w, "docs", RSS_DOCS)?;

        for entry in &self.entries {
            write_item(&mut w, entry)?;
        }

        emit(&mut w, Event::End(BytesEnd::new("channel")))?;
        emit(&mut w, Event::End(BytesEnd::new("rss")))?;

        let mut bytes = w.into_inner();
        bytes.push(b'\n');
        String::from_utf8(bytes).map_err(|e| Error::Feed(e.to_string()))
    }

    /// Serialise and write to `path`, replacing any existing file.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let xml = self.to_xml()?;
        fs::write(path, xml).map_err(|e| Error::io(path, e))
    }
}

fn write_item(w: &mut Writer<Vec<u8>>, entry: &Entry) -> Result<()> {
    emit(w, Event::Start(BytesStart::new("item")))?;
    text_element(w, "title", &entry.title)?;
    text_element(w, "link", entry.link.as_str())?;
    if let Some(description) = &entry.description {
        text_element(w, "description", description)?;
    }
    if let Some(author) = &entry.author {
        text_element(w, "author", author)?;
    }

    let mut guid = BytesStart::new("guid");
    guid.push_attribute(("isPermaLink", "true"));
    emit(w, Event::Start(guid))?;
    emit(w, Event::Text(BytesText::new(&entry.guid)))?;
    emit(w, Event::End(BytesEnd::new("guid")))?;

    text_element(w, "pubDate", &rfc822(&entry.pub_date))?;
    emit(w, Event::End(BytesEnd::new("item")))
}

fn text_element(w: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    emit(w, Event::Start(BytesStart::new(name)))?;
    emit(w, Event::Text(BytesText::new(text)))?;
    emit(w, Event::End(BytesEnd::new(name)))
}

fn emit(w: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    w.write_event(event).map_err(|e| Error::Feed(e.to_string()))
}

/// RFC 822 date as RSS readers expect it. Naive times are reported as GMT.
fn rfc822(dt: &NaiveDateTime) -> String {
    dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
