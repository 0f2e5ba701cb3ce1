use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};

use crate::{
    domain::models::{ShortLinkRecord, StatsSnapshot},
    view::{
        locale::Locale,
        page::{ActionKind, ClickTarget, Counters, LinkRow, TableRow},
    },
};

const ELLIPSIS: &str = "...";

/// Shortens `text` to `max_len` characters followed by `...`.
pub fn truncate(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
    }
}

pub fn format_timestamp<Tz>(value: &DateTime<Utc>, locale: Locale, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    value
        .with_timezone(tz)
        .format(locale.timestamp_format())
        .to_string()
}

pub fn render_empty_state(locale: Locale) -> TableRow {
    TableRow::Placeholder(locale.messages().no_links.to_string())
}

/// Turns snapshots into table rows and counters.
#[derive(Debug, Clone)]
pub struct Projection {
    /// Dashboard origin without a trailing slash, e.g. `http://localhost:8080`.
    pub origin: String,
    pub truncate_length: usize,
    pub locale: Locale,
}

impl Projection {
    pub fn counters(snapshot: &StatsSnapshot) -> Counters {
        Counters {
            total_links: snapshot.total_links,
            total_hits: snapshot.total_hits,
        }
    }

    pub fn table_rows<Tz>(&self, links: &[ShortLinkRecord], tz: &Tz) -> Vec<TableRow>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        if links.is_empty() {
            return vec![render_empty_state(self.locale)];
        }
        links
            .iter()
            .map(|link| TableRow::Link(self.link_row(link, tz)))
            .collect()
    }

    fn link_row<Tz>(&self, link: &ShortLinkRecord, tz: &Tz) -> LinkRow
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        LinkRow {
            code: link.code.clone(),
            short_url: format!("{}/{}", self.origin, link.code),
            long_url: link.long_url.clone(),
            long_url_display: truncate(&link.long_url, self.truncate_length),
            hit_count: link.hit_count,
            created_at: format_timestamp(&link.created_at, self.locale, tz),
            delete: ClickTarget::action(ActionKind::Delete, link.code.clone()),
        }
    }
}
