use maud::{html, Markup};

use crate::components::ListingCard;
use crate::framework::FetchState;
use crate::model::ListingRecord;

/// What the listing area shows. Exactly one at a time.
#[derive(Debug, Clone)]
pub enum Screen<'a> {
    Loading,
    /// Loaded, but nothing to show.
    Empty,
    Populated(Vec<ListingCard<'a>>),
    Failed(&'a str),
}

impl<'a> Screen<'a> {
    /// `Idle` shows the spinner: a mounted view fetches immediately.
    pub fn from_state(state: &'a FetchState<ListingRecord>) -> Self {
        match state {
            FetchState::Idle | FetchState::Loading => Screen::Loading,
            FetchState::Loaded(items) if items.is_empty() => Screen::Empty,
            FetchState::Loaded(items) => Screen::Populated(items.iter().map(ListingCard::new).collect()),
            FetchState::Failed(reason) => Screen::Failed(reason),
        }
    }

    pub fn render(&self) -> Markup {
        html! {
            @match self {
                Screen::Loading => {
                    div class="loading" aria-busy="true" { "Loading…" }
                }
                Screen::Empty => {
                    div class="empty" { "Not available" }
                }
                Screen::Populated(cards) => {
                    section class="listings" {
                        @for card in cards {
                            (card.render())
                        }
                    }
                }
                Screen::Failed(reason) => {
                    div class="error" role="alert" {
                        p { (reason) }
                        p class="hint" { "Pull down to try again" }
                    }
                }
            }
        }
    }
}
