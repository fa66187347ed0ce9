use yewdux::Store;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub variant: ToastVariant,
}

/// Notifications waiting to be shown, oldest first.
#[derive(Debug, Default, Clone, PartialEq, Eq, Store)]
pub struct ToastQueue {
    pub toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    /// Queues a toast and returns its id.
    pub fn push(
        &mut self,
        title: impl Into<String>,
        description: Option<String>,
        variant: ToastVariant,
    ) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast {
            id,
            title: title.into(),
            description,
            variant,
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_assigns_increasing_ids() {
        let mut queue = ToastQueue::default();
        let first = queue.push("Saved", None, ToastVariant::Default);
        let second = queue.push("Failed", Some("boom".into()), ToastVariant::Destructive);
        assert!(second > first);
        assert_eq!(queue.toasts.len(), 2);
        assert_eq!(queue.toasts[1].variant, ToastVariant::Destructive);
    }

    #[test]
    fn dismiss_removes_only_that_toast() {
        let mut queue = ToastQueue::default();
        let first = queue.push("one", None, ToastVariant::Default);
        queue.push("two", None, ToastVariant::Default);
        queue.dismiss(first);
        assert_eq!(queue.toasts.len(), 1);
        assert_eq!(queue.toasts[0].title, "two");

        queue.dismiss(999);
        assert_eq!(queue.toasts.len(), 1);
    }
}
