pub mod common;

pub mod channel_transaction;
pub mod expense_type;
pub mod goods_receipt;
pub mod location;
pub mod lodgement;
pub mod notification;
pub mod price_scheme;
pub mod substore;
