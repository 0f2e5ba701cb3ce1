use chrono::Local;
use parking_lot::Mutex;
use tokio::time::Instant;

use crate::{
    controller::{
        clipboard::Clipboard,
        config::Config,
        dispatch::{Command, Dispatcher, Interaction},
        notification::{Notification, NotificationKind, Notifications},
        prompt::Prompt,
    },
    domain::{
        api::LinksApi,
        error::{ApiError, FlowError},
        models::CreateRequest,
    },
    view::{
        locale::Messages,
        page::{ActionKind, Page},
        projection::Projection,
    },
};

#[derive(Debug, Default)]
pub struct UiState {
    pub submission_in_flight: bool,
    pub notifications: Notifications,
}

#[derive(Debug)]
struct State {
    ui: UiState,
    page: Page,
    dispatcher: Dispatcher,
    /// Sequence number of the last issued stats request.
    issued_seq: u64,
    /// Sequence number of the request whose snapshot is on the page.
    displayed_seq: u64,
}

/// The dashboard's single controller: owns the page, the transient UI state
/// and the handles to the server and the host.
///
/// Flows take `&self` and may interleave at their await points. State is
/// only touched under the lock between awaits, never across one.
pub struct Controller<A: LinksApi, P: Prompt, C: Clipboard> {
    api: A,
    prompt: P,
    clipboard: C,
    config: Config,
    projection: Projection,
    state: Mutex<State>,
}

/// Clears the in-flight flag and restores the submit button however the
/// create flow exits.
struct SubmissionGuard<'a> {
    state: &'a Mutex<State>,
    messages: &'static Messages,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        state.ui.submission_in_flight = false;
        state.page.set_submitting(false, self.messages);
    }
}

impl<A: LinksApi, P: Prompt, C: Clipboard> Controller<A, P, C> {
    /// `origin` is the dashboard origin used for the short-link column,
    /// e.g. `http://localhost:8080`.
    pub fn new(
        api: A,
        prompt: P,
        clipboard: C,
        config: Config,
        origin: String,
        page: Page,
    ) -> Self {
        let projection = Projection {
            origin,
            truncate_length: config.truncate_length,
            locale: config.locale,
        };
        Controller {
            api,
            prompt,
            clipboard,
            config,
            projection,
            state: Mutex::new(State {
                ui: UiState::default(),
                page,
                dispatcher: Dispatcher::default(),
                issued_seq: 0,
                displayed_seq: 0,
            }),
        }
    }

    fn messages(&self) -> &'static Messages {
        self.config.locale.messages()
    }

    /// Binds interaction handlers and loads the first snapshot.
    pub async fn start(&self) {
        {
            let mut state = self.state.lock();
            if state.page.form.is_some() {
                state.dispatcher.bind_submit();
            } else {
                tracing::debug!("No creation form on the page; submit left unbound");
            }
            state
                .dispatcher
                .bind_action(ActionKind::Delete, Command::Delete);
            state
                .dispatcher
                .bind_action(ActionKind::Copy, Command::Copy);
        }
        self.sync().await;
    }

    pub async fn dispatch(&self, interaction: Interaction) {
        let command = self.state.lock().dispatcher.route(interaction);
        match command {
            Some(Command::Edit(field, value)) => self.state.lock().page.set_field(field, value),
            Some(Command::Shorten) => self.create().await,
            Some(Command::Delete(code)) => self.delete(&code).await,
            Some(Command::Copy(short_url)) => self.copy(&short_url).await,
            None => tracing::debug!("Interaction matched no bound handler"),
        }
    }

    /// Create flow: validate the form, submit once, report, then refresh on
    /// success.
    pub async fn create(&self) {
        let request = {
            let mut state = self.state.lock();
            if state.ui.submission_in_flight {
                tracing::debug!("Submission already in flight; ignoring submit");
                return;
            }
            let Some(form) = state.page.form.as_ref() else {
                return;
            };
            let request = CreateRequest::from_form(&form.long_url, &form.custom_code);
            if request.is_ok() {
                state.ui.submission_in_flight = true;
                state.page.set_submitting(true, self.messages());
            }
            request
        };
        let request = match request {
            Ok(request) => request,
            Err(err) => {
                self.report(err, self.messages().create_failed);
                return;
            }
        };

        let guard = SubmissionGuard {
            state: &self.state,
            messages: self.messages(),
        };
        let succeeded = match self.api.create(&request).await {
            Ok(created) => {
                tracing::info!(
                    event = "short_link_created",
                    code = created.code.as_str(),
                    short_url = created.short_url.as_str(),
                    long_url = created.long_url.as_str()
                );
                let mut state = self.state.lock();
                self.push_notification(
                    &mut state.ui,
                    NotificationKind::Success,
                    self.messages().created.to_string(),
                );
                state.page.show_created(created);
                state.page.reset_form();
                true
            }
            Err(err) => {
                self.report(err.into(), self.messages().create_failed);
                false
            }
        };
        drop(guard);

        if succeeded {
            self.sync().await;
        }
    }

    /// Delete flow: nothing happens unless the host confirms.
    pub async fn delete(&self, code: &str) {
        if !self.prompt.confirm(self.messages().confirm_delete).await {
            tracing::debug!(code, "Delete not confirmed");
            return;
        }

        match self.api.delete(code).await {
            Ok(()) => {
                tracing::info!(event = "short_link_deleted", code);
                self.notify(NotificationKind::Success, self.messages().deleted.to_string());
                self.sync().await;
            }
            Err(err) => self.report(err.into(), self.messages().delete_failed),
        }
    }

    /// Writes `short_url` to the host clipboard verbatim.
    pub async fn copy(&self, short_url: &str) {
        match self.clipboard.write_text(short_url).await {
            Ok(()) => {
                tracing::info!(event = "short_link_copied", short_url);
                self.notify(NotificationKind::Success, self.messages().copied.to_string());
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to write to clipboard");
                self.notify(NotificationKind::Error, self.messages().copy_failed.to_string());
            }
        }
    }

    /// Pulls a fresh snapshot and replaces counters and rows together. On
    /// failure the page keeps whatever it showed before.
    pub async fn sync(&self) {
        let seq = {
            let mut state = self.state.lock();
            state.issued_seq += 1;
            state.issued_seq
        };

        match self.api.fetch_stats().await {
            Ok(snapshot) => {
                let counters = Projection::counters(&snapshot);
                let rows = self.projection.table_rows(&snapshot.links, &Local);
                let mut state = self.state.lock();
                // Last arrival wins, even when it was issued earlier.
                if seq < state.displayed_seq {
                    tracing::debug!(
                        seq,
                        displayed_seq = state.displayed_seq,
                        "Stale stats response replaced a newer snapshot"
                    );
                }
                state.displayed_seq = seq;
                state.page.replace_links(counters, rows);
                tracing::debug!(
                    seq,
                    total_links = snapshot.total_links,
                    total_hits = snapshot.total_hits,
                    "Stats snapshot applied"
                );
            }
            Err(err) => {
                tracing::warn!(seq, error = %err, "Failed to load stats");
            }
        }
    }

    pub fn notify(&self, kind: NotificationKind, message: String) {
        let mut state = self.state.lock();
        self.push_notification(&mut state.ui, kind, message);
    }

    fn push_notification(&self, ui: &mut UiState, kind: NotificationKind, message: String) {
        let now = Instant::now();
        let expires_at = now
            .checked_add(self.config.notification_ttl())
            .unwrap_or_else(|| {
                tracing::warn!("Notification deadline out of range; expiring immediately");
                now
            });
        ui.notifications.push(message, kind, expires_at);
    }

    /// Turns a flow failure into an error notification.
    fn report(&self, err: FlowError, fallback: &str) {
        let messages = self.messages();
        let message = match &err {
            FlowError::Validation => messages.url_required.to_string(),
            FlowError::Api(ApiError::Application {
                message: Some(message),
                ..
            }) => message.clone(),
            FlowError::Api(ApiError::Application { message: None, .. }) => fallback.to_string(),
            FlowError::Api(ApiError::Transport(_)) => messages.network_error.to_string(),
        };
        tracing::warn!(error = %err, "Flow failed");
        self.notify(NotificationKind::Error, message);
    }

    pub fn expire_notifications(&self) -> usize {
        self.state.lock().ui.notifications.expire(Instant::now())
    }

    /// Dismisses the notification at `index` in the order
    /// [`notifications`](Self::notifications) returns them.
    pub fn dismiss_notification(&self, index: usize) -> bool {
        let mut state = self.state.lock();
        state.ui.notifications.expire(Instant::now());
        match state.ui.notifications.dismiss(index) {
            Some(dismissed) => {
                tracing::debug!(index, message = dismissed.message.as_str(), "Notification dismissed");
                true
            }
            None => false,
        }
    }

    /// Earliest deadline among active notifications; the host's one timer.
    pub fn next_expiry(&self) -> Option<Instant> {
        self.state.lock().ui.notifications.next_expiry()
    }

    /// Active notifications, most recent first.
    pub fn notifications(&self) -> Vec<Notification> {
        let mut state = self.state.lock();
        state.ui.notifications.expire(Instant::now());
        state.ui.notifications.latest_first().cloned().collect()
    }

    pub fn page(&self) -> Page {
        self.state.lock().page.clone()
    }

    pub fn submission_in_flight(&self) -> bool {
        self.state.lock().ui.submission_in_flight
    }
}
