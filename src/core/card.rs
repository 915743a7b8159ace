//! Card records: the static, ordered content the stack animates.
//!
//! The animator never looks inside a card; only `index` matters to it.
//! Everything else is a pass-through label for whoever renders the card.

/// One entry in the stack.  Insertion order is stacking order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// 0-based position, stable for the lifetime of the section.
    pub index: usize,
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
}

/// Raw content of the capability section, in display order.
const CAPABILITIES: &[(&str, &str, &str, &[&str])] = &[
    (
        "🔹",
        "Immediate Revenue Recovery",
        "We take your \"dead\" list of past customers and old leads and reignite them \
         with compelling, AI-powered campaigns, booking high-intent appointments and \
         generating cash flow in the first week.",
        &["Lead Reactivation", "CRM Automation", "Appointment Setting"],
    ),
    (
        "⚡",
        "Automated Trust & Authority",
        "Our system turns your happy customers into a powerful marketing engine, \
         automatically prompting them to leave 5-star Google reviews and asking for \
         referrals to create a stream of high-trust, free leads.",
        &["Review Systems", "Referral Automation", "Reputation Management"],
    ),
    (
        "🎯",
        "24/7 Lead Capture & Conversion",
        "Never miss an opportunity again. Our system instantly engages any missed call \
         or website lead within 5 minutes, 24/7, answering questions, qualifying \
         prospects, and booking them directly into your calendar.",
        &["AI Receptionist", "Instant Lead Response", "CRM Intelligence"],
    ),
    (
        "📈",
        "Scalable Acquisition Systems",
        "Once your foundation is secure, we build predictable client acquisition \
         machines. We use AI to optimize ad campaigns and nurture leads, ensuring a \
         profitable and scalable return on your marketing spend.",
        &["AI Ad Systems", "Funnel Optimization", "Growth Automation"],
    ),
];

/// Build the capability card list.  Indices are assigned in order.
pub fn capabilities() -> Vec<Card> {
    CAPABILITIES
        .iter()
        .enumerate()
        .map(|(index, &(icon, title, description, tags))| Card {
            index,
            icon,
            title,
            description,
            tags,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_indices_follow_insertion_order() {
        let cards = capabilities();
        assert_eq!(cards.len(), 4);
        for (i, card) in cards.iter().enumerate() {
            assert_eq!(card.index, i);
            assert!(!card.tags.is_empty());
        }
        assert_eq!(cards[3].title, "Scalable Acquisition Systems");
    }
}
