pub fn products_route() -> &'static str {
    "/products"
}

/// Router pattern for a single product. Clients must escape the id when
/// filling it in.
pub fn product_route_pattern() -> &'static str {
    "/products/:id"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_pattern_nests_under_collection() {
        assert!(product_route_pattern().starts_with(products_route()));
    }
}
