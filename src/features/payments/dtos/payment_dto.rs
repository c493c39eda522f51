use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::payments::models::PaymentProxy;

/// An active payment proxy with the parameters the frontend needs to use it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentProxyWithParametersDto {
    pub payment_proxy: PaymentProxy,
    #[schema(value_type = Object)]
    pub parameters: BTreeMap<String, serde_json::Value>,
}
