use sea_orm::Order;

/// Splits a sort key of the form `field` or `-field` into the field name and
/// the sort order. A leading '-' means descending, as in `-date`.
pub fn parse_sort(sort: &str) -> (&str, Order) {
    match sort.strip_prefix('-') {
        Some(field) => (field, Order::Desc),
        None => (sort, Order::Asc),
    }
}
