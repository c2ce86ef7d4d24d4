use shared::{
    domain::{OrderFields, Product},
    protocol::{ADDRESS_FIELD, NAME_FIELD, ORDER_FIELD, PHONE_FIELD},
};

use crate::error::ValidationError;

/// Editable order/contact form. `name` and `phone` are required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderForm {
    pub name: String,
    pub phone: String,
    pub order: String,
    pub address: String,
}

impl OrderForm {
    /// Form opened from a catalog card, with the order line prefilled.
    pub fn for_product(product: Option<&Product>) -> Self {
        Self {
            order: product.map(Product::order_line).unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn field_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            NAME_FIELD => Some(&mut self.name),
            PHONE_FIELD => Some(&mut self.phone),
            ORDER_FIELD => Some(&mut self.order),
            ADDRESS_FIELD => Some(&mut self.address),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn validate(&self) -> Result<OrderFields, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField(NAME_FIELD));
        }
        if self.phone.trim().is_empty() {
            return Err(ValidationError::MissingField(PHONE_FIELD));
        }

        let mut fields = OrderFields::new();
        fields.insert(NAME_FIELD.to_string(), self.name.trim().to_string());
        fields.insert(PHONE_FIELD.to_string(), self.phone.trim().to_string());
        fields.insert(ORDER_FIELD.to_string(), self.order.trim().to_string());
        fields.insert(ADDRESS_FIELD.to_string(), self.address.trim().to_string());
        Ok(fields)
    }
}
