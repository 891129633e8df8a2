use common::property::Property;

/// Raw filter inputs, kept as entered. Parsing happens at apply time so a
/// half-typed bound never drops listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub search: String,
    pub location: String,
    pub min_price: String,
    pub max_price: String,
}

impl FilterState {
    fn search_term(&self) -> Option<String> {
        normalized_term(&self.search)
    }

    fn location_term(&self) -> Option<String> {
        normalized_term(&self.location)
    }

    /// Lower price bound, or `None` when empty or unparseable.
    fn min(&self) -> Option<f64> {
        self.min_price.trim().parse().ok()
    }

    /// Upper price bound, or `None` when empty or unparseable.
    fn max(&self) -> Option<f64> {
        self.max_price.trim().parse().ok()
    }
}

fn normalized_term(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// The full listing collection as fetched from the server, in server order.
#[derive(Debug, Default)]
pub struct ListingSet {
    all_properties: Vec<Property>,
}

impl ListingSet {
    pub fn new(all_properties: Vec<Property>) -> Self {
        Self { all_properties }
    }

    /// Replace the collection wholesale, e.g. after a refetch.
    pub fn replace_all(&mut self, all_properties: Vec<Property>) {
        self.all_properties = all_properties;
    }

    pub fn all(&self) -> &[Property] {
        &self.all_properties
    }

    /// Filter the collection against `filters`. Each active filter narrows
    /// the result further; the incoming order is preserved.
    pub fn apply<'a>(&'a self, filters: &FilterState) -> Vec<&'a Property> {
        let mut matches: Vec<&Property> = self.all_properties.iter().collect();

        if let Some(term) = filters.search_term() {
            matches.retain(|p| {
                p.title.to_lowercase().contains(&term)
                    || p.description.to_lowercase().contains(&term)
                    || p.location.to_lowercase().contains(&term)
            });
        }

        if let Some(term) = filters.location_term() {
            matches.retain(|p| p.location.to_lowercase().contains(&term));
        }

        if let Some(min) = filters.min() {
            matches.retain(|p| p.price >= min);
        }

        if let Some(max) = filters.max() {
            matches.retain(|p| p.price <= max);
        }

        matches
    }
}
