//! Change events and wire document DTOs

mod change_event;
mod documents;

pub use change_event::{
    ChangeEvent, DocumentPath, EventDecodeError, RawChangeEvent, TriggerKind,
};
pub use documents::{ChatMessageDoc, PlanDoc, SubscriptionDoc};
