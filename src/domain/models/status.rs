pub const PENDING: &str = "pending";
pub const CONFIRMED: &str = "confirmed";
pub const CANCELED: &str = "canceled";
pub const REFUSED: &str = "refused";

pub fn is_valid(status: &str) -> bool {
    matches!(status, PENDING | CONFIRMED | CANCELED | REFUSED)
}
