use maud::{html, Markup};

use crate::model::{DetailParams, ListingRecord};

/// Card for one listing. Pure projection of the record; it never fetches.
#[derive(Debug, Clone, Copy)]
pub struct ListingCard<'a> {
    record: &'a ListingRecord,
}

impl<'a> ListingCard<'a> {
    pub fn new(record: &'a ListingRecord) -> Self {
        Self { record }
    }

    /// Stable key for list reconciliation.
    pub fn key(&self) -> &'a str {
        &self.record.id
    }

    pub fn cover_image(&self) -> Option<&'a str> {
        self.record.cover_image()
    }

    pub fn price_label(&self) -> Option<String> {
        self.record.starting_bid.map(format_price)
    }

    /// "2 Beds · 3 Baths", leaving out whichever count is missing.
    pub fn rooms_label(&self) -> String {
        let beds = non_empty(&self.record.bedroom).map(|b| format!("{b} Beds"));
        let baths = non_empty(&self.record.bathroom).map(|b| format!("{b} Baths"));
        [beds, baths]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" · ")
    }

    /// Calls `on_select` with the handoff parameters of this card's record.
    pub fn select<R>(&self, on_select: impl FnOnce(DetailParams) -> R) -> R {
        on_select(DetailParams::from(self.record))
    }

    pub fn render(&self) -> Markup {
        let rooms = self.rooms_label();
        let location = self.record.location();

        html! {
            article class="listing-card" data-key=(self.key()) {
                @if let Some(src) = self.cover_image() {
                    img class="cover" src=(src) alt="";
                }
                @if self.record.is_hot {
                    span class="badge hot" { "Hot" }
                }
                div class="details" {
                    @if let Some(price) = self.price_label() {
                        p class="price" { "Starting from " (price) }
                    }
                    @if let Some(area) = non_empty(&self.record.area) {
                        p class="area" { (area) }
                    }
                    @if !rooms.is_empty() {
                        p class="rooms" { (rooms) }
                    }
                    @if !location.is_empty() {
                        p class="location" { (location) }
                    }
                }
            }
        }
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// `$1,250` for whole amounts, `$1,250.50` otherwise.
pub fn format_price(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    match cents % 100 {
        0 => format!("{sign}${grouped}"),
        rest => format!("{sign}${grouped}.{rest:02}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ListingRecord {
        ListingRecord {
            id: "r1".into(),
            img: vec!["https://img/1.jpg".into()],
            starting_bid: Some(1250.0),
            area: Some("4000 sq ft".into()),
            bedroom: Some("2".into()),
            bathroom: Some("3".into()),
            city: Some("Austin".into()),
            country: Some("USA".into()),
            is_hot: true,
            description: Some("Corner lot".into()),
        }
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(100.0), "$100");
        assert_eq!(format_price(1250.0), "$1,250");
        assert_eq!(format_price(1234567.5), "$1,234,567.50");
    }

    #[test]
    fn test_render_full_record() {
        let record = record();
        let html = ListingCard::new(&record).render().into_string();

        assert!(html.contains(r#"data-key="r1""#));
        assert!(html.contains(r#"src="https://img/1.jpg""#));
        assert!(html.contains("Hot"));
        assert!(html.contains("Starting from $1,250"));
        assert!(html.contains("4000 sq ft"));
        assert!(html.contains("2 Beds · 3 Baths"));
        assert!(html.contains("Austin, USA"));
    }

    #[test]
    fn test_render_partial_record() {
        let record = ListingRecord {
            bathroom: Some("1".into()),
            ..ListingRecord::new("bare")
        };
        let card = ListingCard::new(&record);
        let html = card.render().into_string();

        assert!(!html.contains("<img"));
        assert!(!html.contains("price"));
        assert!(!html.contains("badge"));
        assert_eq!(card.rooms_label(), "1 Baths");
    }

    #[test]
    fn test_select_forwards_params() {
        let record = record();
        let id = ListingCard::new(&record).select(|params| params.id);
        assert_eq!(id, "r1");
    }
}
