/// ntfy-style notification priority, 1 (min) through 5 (max).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    Min = 1,
    Low = 2,
    #[default]
    Default = 3,
    High = 4,
    Max = 5,
}

impl Priority {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// One outbound status notification. Constructed per call, consumed by a
/// single dispatch, never persisted.
#[derive(Debug, Clone, Default)]
pub struct NotificationMessage {
    pub topic: String,
    pub message: String,
    pub title: String,
    pub priority: Priority,
    pub tags: Vec<String>,
    pub markdown: bool,
    pub schedule: String,
    pub click_action: String,
    pub attachment_url: String,
    pub email_recipient: String,
    pub actions: Vec<String>,
}

impl NotificationMessage {
    pub fn new(topic: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_maps_to_ntfy_numeric_levels() {
        assert_eq!(Priority::Min.as_u8(), 1);
        assert_eq!(Priority::Default.as_u8(), 3);
        assert_eq!(Priority::Max.as_u8(), 5);
    }

    #[test]
    fn new_message_defaults() {
        let message = NotificationMessage::new("codes", "account updated");
        assert_eq!(message.topic, "codes");
        assert_eq!(message.message, "account updated");
        assert_eq!(message.priority, Priority::Default);
        assert!(!message.markdown);
        assert!(message.tags.is_empty());
        assert!(message.actions.is_empty());
    }

    #[test]
    fn builder_methods_set_fields() {
        let message = NotificationMessage::new("codes", "body")
            .with_title("Account updated")
            .with_priority(Priority::High)
            .with_tags(vec!["key".to_string()]);

        assert_eq!(message.title, "Account updated");
        assert_eq!(message.priority, Priority::High);
        assert_eq!(message.tags, vec!["key".to_string()]);
    }
}
