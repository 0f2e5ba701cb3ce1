use crate::{domain::models::CreatedLink, view::locale::Messages};

/// Kinds of clickable controls the dispatcher knows how to route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Delete,
    Copy,
}

/// What a click lands on: an optional action marker plus the identifier
/// attribute it carries. Clicks on anything else have neither.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClickTarget {
    pub action: Option<ActionKind>,
    pub code: Option<String>,
}

impl ClickTarget {
    pub fn action(action: ActionKind, code: impl Into<String>) -> Self {
        Self {
            action: Some(action),
            code: Some(code.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    LongUrl,
    CustomCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub disabled: bool,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub long_url: String,
    pub custom_code: String,
    pub submit: SubmitButton,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Counters {
    pub total_links: u64,
    pub total_hits: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRow {
    pub code: String,
    pub short_url: String,
    pub long_url: String,
    pub long_url_display: String,
    pub hit_count: u64,
    pub created_at: String,
    pub delete: ClickTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    Link(LinkRow),
    Placeholder(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinksTable {
    pub rows: Vec<TableRow>,
}

/// Shows the last created link. `copy` carries the short URL exactly as the
/// server returned it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultPanel {
    pub created: Option<CreatedLink>,
    pub copy: Option<ClickTarget>,
}

/// The dashboard surface. Each region may be missing from a deployment;
/// updates aimed at a missing region do nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    pub form: Option<Form>,
    pub counters: Option<Counters>,
    pub table: Option<LinksTable>,
    pub result: Option<ResultPanel>,
}

impl Page {
    pub fn full(messages: &Messages) -> Self {
        Page {
            form: Some(Form {
                long_url: String::new(),
                custom_code: String::new(),
                submit: SubmitButton {
                    disabled: false,
                    label: messages.submit_idle.to_string(),
                },
            }),
            counters: Some(Counters::default()),
            table: Some(LinksTable::default()),
            result: Some(ResultPanel::default()),
        }
    }

    pub fn set_field(&mut self, field: Field, value: String) {
        if let Some(form) = self.form.as_mut() {
            match field {
                Field::LongUrl => form.long_url = value,
                Field::CustomCode => form.custom_code = value,
            }
        }
    }

    pub fn reset_form(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.long_url.clear();
            form.custom_code.clear();
        }
    }

    pub fn set_submitting(&mut self, busy: bool, messages: &Messages) {
        if let Some(form) = self.form.as_mut() {
            form.submit.disabled = busy;
            form.submit.label = if busy {
                messages.submit_busy
            } else {
                messages.submit_idle
            }
            .to_string();
        }
    }

    pub fn show_created(&mut self, created: CreatedLink) {
        if let Some(result) = self.result.as_mut() {
            result.copy = Some(ClickTarget::action(
                ActionKind::Copy,
                created.short_url.clone(),
            ));
            result.created = Some(created);
        }
    }

    /// Replaces counters and rows together.
    pub fn replace_links(&mut self, counters: Counters, rows: Vec<TableRow>) {
        if let Some(current) = self.counters.as_mut() {
            *current = counters;
        }
        if let Some(table) = self.table.as_mut() {
            table.rows = rows;
        }
    }

    pub fn link_rows(&self) -> impl Iterator<Item = &LinkRow> {
        self.table
            .iter()
            .flat_map(|table| table.rows.iter())
            .filter_map(|row| match row {
                TableRow::Link(link) => Some(link),
                TableRow::Placeholder(_) => None,
            })
    }
}
