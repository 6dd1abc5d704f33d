pub mod feature_row;
pub mod price_record;
pub mod session;
