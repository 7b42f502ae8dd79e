//! E-mail notifier that renders allocation announcements with `minijinja`.

use crate::booking::{
    domain::{Allocation, ReferenceTime},
    ports::{
        AllocationEvent, AllocationNotifier, EmailMessage, Mailer, NotifierError, NotifierResult,
    },
};
use async_trait::async_trait;
use minijinja::Environment;
use serde_json::{Map, Value};
use std::sync::Arc;

const SUBJECT_TEMPLATE: &str = "{{ heading }}: {{ subject }}";

const BODY_TEMPLATE: &str = "\
Hello {{ employee_name }},

{{ summary }}

Subject: {{ subject }}
Room: {{ room_id }}
From: {{ start_at }}
To: {{ end_at }}
";

/// Announces allocation changes to the booking employee by e-mail.
#[derive(Debug, Clone)]
pub struct EmailNotifier<M: Mailer> {
    mailer: Arc<M>,
    from: String,
    reference_time: ReferenceTime,
}

impl<M: Mailer> EmailNotifier<M> {
    /// Creates a notifier sending from `from`, with instants rendered in
    /// `reference_time`.
    #[must_use]
    pub fn new(mailer: Arc<M>, from: impl Into<String>, reference_time: ReferenceTime) -> Self {
        Self {
            mailer,
            from: from.into(),
            reference_time,
        }
    }

    /// Renders the message announcing `event` for `allocation`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::Render`] when a template fails to render.
    pub fn render(
        &self,
        event: AllocationEvent,
        allocation: &Allocation,
    ) -> NotifierResult<EmailMessage> {
        let environment = Environment::new();
        let context = self.template_context(event, allocation);
        let render = |template: &str| {
            environment
                .render_str(template, &context)
                .map_err(|err| NotifierError::Render {
                    event: event.as_str(),
                    reason: err.to_string(),
                })
        };

        Ok(EmailMessage {
            from: self.from.clone(),
            to: allocation.employee().email().to_owned(),
            subject: render(SUBJECT_TEMPLATE)?,
            body: render(BODY_TEMPLATE)?,
        })
    }

    fn template_context(&self, event: AllocationEvent, allocation: &Allocation) -> Map<String, Value> {
        let (heading, summary) = match event {
            AllocationEvent::Created => ("Room booked", "Your room booking is confirmed."),
            AllocationEvent::Updated => ("Booking changed", "Your room booking was changed."),
            AllocationEvent::Deleted => ("Booking cancelled", "Your room booking was cancelled."),
        };
        let mut context = Map::new();
        context.insert("heading".to_owned(), Value::from(heading));
        context.insert("summary".to_owned(), Value::from(summary));
        context.insert("subject".to_owned(), Value::from(allocation.subject()));
        context.insert(
            "employee_name".to_owned(),
            Value::from(allocation.employee().name()),
        );
        context.insert(
            "room_id".to_owned(),
            Value::from(allocation.room_id().to_string()),
        );
        context.insert(
            "start_at".to_owned(),
            Value::from(self.reference_time.format(allocation.start_at())),
        );
        context.insert(
            "end_at".to_owned(),
            Value::from(self.reference_time.format(allocation.end_at())),
        );
        context
    }

    async fn announce(&self, event: AllocationEvent, allocation: &Allocation) -> NotifierResult<()> {
        let message = self.render(event, allocation)?;
        self.mailer
            .send(&message)
            .await
            .map_err(NotifierError::delivery)
    }
}

#[async_trait]
impl<M: Mailer> AllocationNotifier for EmailNotifier<M> {
    async fn notify_created(&self, allocation: &Allocation) -> NotifierResult<()> {
        self.announce(AllocationEvent::Created, allocation).await
    }

    async fn notify_updated(&self, allocation: &Allocation) -> NotifierResult<()> {
        self.announce(AllocationEvent::Updated, allocation).await
    }

    async fn notify_deleted(&self, allocation: &Allocation) -> NotifierResult<()> {
        self.announce(AllocationEvent::Deleted, allocation).await
    }
}
