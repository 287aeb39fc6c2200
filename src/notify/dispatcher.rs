use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::ConfigStore;
use crate::http::{HttpClient, HttpRequest};
use crate::notify::message::NotificationMessage;

/// Fire-and-forget notification dispatcher.
///
/// Each `send` spawns one independent task and returns immediately; delivery
/// configuration is re-read inside the task so toggling settings mid-run
/// takes effect on the next call. Transport failures are logged and dropped,
/// never surfaced to the caller.
pub struct NotificationDispatcher {
    settings: Arc<ConfigStore>,
    client: Arc<dyn HttpClient>,
    jobs: Mutex<Vec<JoinHandle<()>>>,
}

impl NotificationDispatcher {
    pub fn new(settings: Arc<ConfigStore>, client: Arc<dyn HttpClient>) -> Self {
        Self {
            settings,
            client,
            jobs: Mutex::new(Vec::new()),
        }
    }

    fn lock_jobs(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.jobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Submit a notification. Never blocks; the job is tracked until
    /// [`NotificationDispatcher::shutdown`] reaps it.
    pub fn send(&self, message: NotificationMessage) {
        let settings = Arc::clone(&self.settings);
        let client = Arc::clone(&self.client);
        let handle = tokio::spawn(async move {
            dispatch(settings, client, message).await;
        });
        self.lock_jobs().push(handle);
    }

    /// Wait for every submitted job to finish, then clear the job list.
    /// Safe to call repeatedly; subsequent calls return immediately.
    pub async fn shutdown(&self) {
        let handles: Vec<JoinHandle<()>> = self.lock_jobs().drain(..).collect();
        for handle in handles {
            if let Err(err) = handle.await {
                debug!(error = %err, "Notification job aborted");
            }
        }
    }
}

async fn dispatch(
    settings: Arc<ConfigStore>,
    client: Arc<dyn HttpClient>,
    message: NotificationMessage,
) {
    if !settings.get("notifications.enabled", false) {
        debug!("Unable to send notification, notifications are disabled");
        return;
    }

    let uri = settings.get("notifications.uri", String::new());
    if uri.is_empty() {
        debug!("Unable to send notification, notifications server is empty");
        return;
    }

    let mut request = HttpRequest::post(uri);
    request.headers = vec![
        ("Title".to_string(), message.title.clone()),
        ("Priority".to_string(), message.priority.as_u8().to_string()),
        ("Tags".to_string(), message.tags.join(",")),
        ("Markdown".to_string(), message.markdown.to_string()),
        ("Delay".to_string(), message.schedule.clone()),
        ("Click".to_string(), message.click_action.clone()),
        ("Attach".to_string(), message.attachment_url.clone()),
        ("Email".to_string(), message.email_recipient.clone()),
        ("Actions".to_string(), message.actions.join(";")),
    ];
    request.body = message.message.clone();
    request.username = settings.get("notifications.username", String::new());
    request.password = settings.get("notifications.password", String::new());

    match client.perform(request).await {
        Ok(response) if response.is_success() => {
            debug!(topic = %message.topic, "Notification sent");
        }
        Ok(response) => {
            debug!(
                status = response.status,
                body = %response.body,
                "Unable to send notification"
            );
        }
        Err(err) => {
            debug!(error = %err, "Unable to send notification");
        }
    }
}
