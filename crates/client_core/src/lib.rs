//! Client-side behaviour of the donut storefront: FAQ chat answers and the
//! order form's submission to the third-party form relay.

pub mod chat;
pub mod config;
pub mod error;
pub mod faq;
pub mod order_form;
pub mod relay;
pub mod submission;

pub use chat::{ChatCommand, ChatExchange, ChatSession};
pub use faq::FaqMatcher;
pub use order_form::OrderForm;
pub use relay::{FormRelay, HttpFormRelay};
pub use submission::{OrderSubmissionController, SubmissionState, SubmitOutcome};
