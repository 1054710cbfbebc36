use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Identifiable, NamedEntity, Ordered};

/// Card, cash or account used to pay for a transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentMethod {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    pub color: String,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub is_default: bool,
}

impl PaymentMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            icon: String::from("card"),
            color: String::from("#607D8B"),
            order: 0,
            is_default: false,
        }
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }
}

impl Identifiable for PaymentMethod {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for PaymentMethod {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Ordered for PaymentMethod {
    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}
