//! Reducer for the order panel: dialog visibility, form contents, last status.

use client_core::{OrderForm, SubmissionState};
use shared::{catalog::find_product, domain::Product};
use tracing::debug;

use crate::controller::events::{refusal_line, status_line, FormSurface, OrderCommand};

#[derive(Debug, Clone, Default)]
pub struct OrderPanel {
    pub dialog_open: bool,
    pub selected: Option<Product>,
    pub form: OrderForm,
    pub status: Option<String>,
}

impl OrderPanel {
    pub fn dispatch(&mut self, catalog: &[Product], command: OrderCommand) {
        match command {
            OrderCommand::OpenDialog(product_id) => {
                self.selected = product_id
                    .and_then(|id| find_product(catalog, id))
                    .cloned();
                self.form = OrderForm::for_product(self.selected.as_ref());
                self.dialog_open = true;
            }
            OrderCommand::CloseDialog => {
                self.dialog_open = false;
            }
            OrderCommand::EditField { field, value } => match self.form.field_mut(&field) {
                Some(slot) => *slot = value,
                None => debug!(field = %field, "ignoring edit of unknown form field"),
            },
            OrderCommand::Dispatched(surface) => {
                if surface == FormSurface::Dialog {
                    self.dialog_open = false;
                }
                self.status = status_line(&SubmissionState::Submitting);
            }
            OrderCommand::Refused(rejected) => {
                self.status = Some(refusal_line(rejected).to_string());
            }
            OrderCommand::Finished(state) => {
                if state == SubmissionState::Succeeded {
                    self.form.clear();
                }
                self.status = status_line(&state);
            }
            OrderCommand::Reset => {
                self.status = None;
            }
        }
    }
}
