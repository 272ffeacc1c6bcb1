//! The ticker entry form
//!
//! A bounded list of optional ticker fields with an explicit visible
//! count, the slider-and-fields pattern independent of any UI toolkit.
//! Setting the count to k reveals exactly k fields; values sitting in
//! hidden fields are excluded from submission.

/// A bounded set of ticker input fields
#[derive(Debug, Clone)]
pub struct TickerForm {
    fields: Vec<Option<String>>,
    visible: usize,
}

impl TickerForm {
    /// Create a form with `max` fields, one visible initially
    pub fn new(max: usize) -> Self {
        Self {
            fields: vec![None; max.max(1)],
            visible: 1,
        }
    }

    /// Total number of fields
    pub fn max(&self) -> usize {
        self.fields.len()
    }

    /// Number of currently visible fields
    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Set the visible count, clamped to 1..=max
    pub fn set_visible(&mut self, count: usize) {
        self.visible = count.clamp(1, self.max());
    }

    /// Set the value of a field; out-of-range indexes are ignored
    pub fn set_field(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            *field = Some(value.into());
        }
    }

    /// Collect the visible, non-empty ticker values in field order
    pub fn submit(&self) -> Vec<String> {
        self.fields
            .iter()
            .take(self.visible)
            .filter_map(|f| f.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_uppercase)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_reveals_exactly_k_fields() {
        let mut form = TickerForm::new(10);
        form.set_visible(3);
        assert_eq!(form.visible(), 3);
        assert_eq!(form.max(), 10);
    }

    #[test]
    fn test_hidden_fields_excluded_from_submission() {
        let mut form = TickerForm::new(10);
        for i in 0..10 {
            form.set_field(i, format!("T{i}"));
        }
        form.set_visible(3);

        let tickers = form.submit();
        assert_eq!(tickers, vec!["T0", "T1", "T2"]);
    }

    #[test]
    fn test_empty_fields_filtered_out() {
        let mut form = TickerForm::new(5);
        form.set_visible(4);
        form.set_field(0, "msft");
        form.set_field(1, "   ");
        form.set_field(3, "aapl");

        assert_eq!(form.submit(), vec!["MSFT", "AAPL"]);
    }

    #[test]
    fn test_visible_count_clamped() {
        let mut form = TickerForm::new(5);
        form.set_visible(0);
        assert_eq!(form.visible(), 1);
        form.set_visible(99);
        assert_eq!(form.visible(), 5);
    }

    #[test]
    fn test_out_of_range_field_ignored() {
        let mut form = TickerForm::new(2);
        form.set_field(7, "MSFT");
        form.set_visible(2);
        assert!(form.submit().is_empty());
    }
}
