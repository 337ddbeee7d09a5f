pub mod controller;
pub mod transport;
pub mod view;

pub use controller::{
    AdvanceOutcome, ConversationCursor, ConversationPhase, PageController, SubmitPhase,
};
pub use transport::{ConversationApi, HttpConversationApi, TransportError};
pub use view::PageView;
