// src/store/live.rs
//
// Live-class bookkeeping: participant lists and an append-only message log.
// This is deliberately not a pub/sub engine; clients poll the log.

use chrono::Utc;

use crate::models::live_class::{
    CreateLiveClassRequest, LiveClass, LiveClassStatus, LiveMessage, PostMessageRequest,
};
use crate::store::{new_id, Store};

impl Store {
    pub fn create_live_class(&mut self, req: CreateLiveClassRequest) -> LiveClass {
        let class = LiveClass {
            id: new_id(),
            subject: req.subject,
            teacher_id: req.teacher_id,
            status: LiveClassStatus::Live,
            participants: Vec::new(),
            messages: Vec::new(),
            started_at: Utc::now(),
        };
        self.live_classes.push(class.clone());
        class
    }

    pub fn list_live_classes(&self) -> Vec<LiveClass> {
        self.live_classes.clone()
    }

    pub fn get_live_class(&self, id: &str) -> Option<LiveClass> {
        self.live_classes.iter().find(|c| c.id == id).cloned()
    }

    /// Adds a student to the participant list. Joining twice is a no-op.
    pub fn join_live_class(&mut self, class_id: &str, student_id: &str) -> Option<LiveClass> {
        let class = self.live_classes.iter_mut().find(|c| c.id == class_id)?;
        if !class.participants.iter().any(|p| p == student_id) {
            class.participants.push(student_id.to_string());
        }
        Some(class.clone())
    }

    pub fn leave_live_class(&mut self, class_id: &str, student_id: &str) -> Option<LiveClass> {
        let class = self.live_classes.iter_mut().find(|c| c.id == class_id)?;
        class.participants.retain(|p| p != student_id);
        Some(class.clone())
    }

    pub fn post_live_message(
        &mut self,
        class_id: &str,
        req: PostMessageRequest,
    ) -> Option<LiveMessage> {
        let class = self.live_classes.iter_mut().find(|c| c.id == class_id)?;
        let message = LiveMessage {
            id: new_id(),
            sender_id: req.sender_id,
            sender_name: req.sender_name,
            text: req.text,
            sent_at: Utc::now(),
        };
        class.messages.push(message.clone());
        Some(message)
    }

    pub fn live_messages(&self, class_id: &str) -> Option<Vec<LiveMessage>> {
        self.live_classes
            .iter()
            .find(|c| c.id == class_id)
            .map(|c| c.messages.clone())
    }

    /// Ends the class and clears the participant list. The message log is
    /// kept so a transcript remains readable afterwards.
    pub fn end_live_class(&mut self, class_id: &str) -> Option<LiveClass> {
        let class = self.live_classes.iter_mut().find(|c| c.id == class_id)?;
        class.status = LiveClassStatus::Ended;
        class.participants.clear();
        Some(class.clone())
    }
}
