//! Shared fixtures: a recording reporter, site configs and page markup

use bookshelf::config::Config;
use bookshelf::item::ItemRecord;
use bookshelf::crawler::Reporter;
use bookshelf::ArchiveError;
use std::sync::Mutex;
use url::Url;

/// Everything a run reported, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Notice(String),
    PageFailed(u32),
    ItemFailed(String),
    MetadataExtracted { id: String, genres: Vec<String> },
    ItemDegraded(String),
    ItemArchived { index: usize, total: usize, id: String },
}

#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<Event>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn failed_items(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::ItemFailed(context) => Some(context),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::Notice(_)))
            .count()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl Reporter for RecordingReporter {
    fn notice(&self, message: &str) {
        self.push(Event::Notice(message.to_string()));
    }

    fn page_failed(&self, page: u32, _url: &Url, _error: &ArchiveError) {
        self.push(Event::PageFailed(page));
    }

    fn item_failed(&self, context: &str, _error: &ArchiveError) {
        self.push(Event::ItemFailed(context.to_string()));
    }

    fn metadata_extracted(&self, record: &ItemRecord) {
        self.push(Event::MetadataExtracted {
            id: record.id.to_string(),
            genres: record.genres.clone(),
        });
    }

    fn item_degraded(&self, record: &ItemRecord, _error: &ArchiveError) {
        self.push(Event::ItemDegraded(record.id.to_string()));
    }

    fn item_archived(&self, index: usize, total: usize, record: &ItemRecord) {
        self.push(Event::ItemArchived {
            index,
            total,
            id: record.id.to_string(),
        });
    }
}

/// Config pointing every endpoint at the mock server
pub fn site_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.site.catalog_root = format!("{}/l55/", base_url);
    config.site.content_endpoint = format!("{}/txt.php", base_url);
    config.site.detail_base = format!("{}/", base_url);
    config.http.timeout_secs = 5;
    config
}

/// Detail page markup in the shape the default selectors expect
pub fn detail_page(title: &str, author: &str, cover: Option<&str>, comments: &[&str]) -> String {
    let cover = cover
        .map(|src| format!(r#"<div class="bookimage"><a href="/x"><img src="{}"></a></div>"#, src))
        .unwrap_or_default();
    let comments: String = comments
        .iter()
        .map(|c| format!(r#"<div class="texts"><b>Reader</b><br><span class="black">{}</span></div>"#, c))
        .collect();

    format!(
        r#"<html><body><div id="content">
        <h1>{} &nbsp;::&nbsp; {}</h1>
        {}
        <span class="d_book">Жанр книги: <a href="/l55/">Научная фантастика</a></span>
        {}
        </div></body></html>"#,
        title, author, cover, comments
    )
}

/// Listing page markup with one card per href and optional pagination
pub fn listing_page(hrefs: &[&str], last_page: Option<u32>) -> String {
    let cards: String = hrefs
        .iter()
        .map(|href| {
            format!(
                r#"<table class="d_book"><tr><td><a href="{0}"><img src="/images/nopic.gif"></a></td></tr>
                <tr><td><a href="{0}">Book</a></td></tr></table>"#,
                href
            )
        })
        .collect();
    let pagination = last_page
        .map(|last| {
            (2..=last)
                .map(|p| format!(r#"<a class="npage" href="/l55/{0}/">{0}</a>"#, p))
                .collect::<String>()
        })
        .unwrap_or_default();

    format!(
        r#"<html><body><div id="content">{}<p class="center">{}</p></div></body></html>"#,
        cards, pagination
    )
}
