use std::collections::VecDeque;

use crate::models::notification::{Notification, NotificationLevel};

const CAPACITY: usize = 32;

/// Pending toasts, oldest first. The oldest entry is dropped once full.
#[derive(Debug, Default)]
pub struct Notifications {
    queue: VecDeque<Notification>,
}

impl Notifications {
    pub fn push(&mut self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => log::info!("{}", notification.message),
            NotificationLevel::Error => log::warn!("{}", notification.message),
        }
        if self.queue.len() == CAPACITY {
            self.queue.pop_front();
        }
        self.queue.push_back(notification);
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }
}
