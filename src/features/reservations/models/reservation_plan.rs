/// Tickets to claim in one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketSelection {
    pub category_id: i32,
    /// Bounded categories claim their own tickets, others the shared pool
    pub bounded: bool,
    pub amount: i32,
    pub src_price_cts: i32,
    pub final_price_cts: i32,
    /// Whether the promo code discount applies to these tickets
    pub discounted: bool,
    pub special_price_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSelection {
    pub additional_service_id: i32,
    pub quantity: i32,
    pub src_price_cts: i32,
    pub final_price_cts: i32,
}

/// A validated reservation request, ready to be written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationPlan {
    pub tickets: Vec<TicketSelection>,
    pub services: Vec<ServiceSelection>,
}

impl ReservationPlan {
    /// Tickets counted against the promo code usage cap
    pub fn discounted_tickets(&self) -> i64 {
        self.tickets
            .iter()
            .filter(|t| t.discounted)
            .map(|t| i64::from(t.amount))
            .sum()
    }
}
